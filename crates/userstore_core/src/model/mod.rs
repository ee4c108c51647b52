//! Domain model for persisted user records.
//!
//! # Responsibility
//! - Define the in-memory shape of rows stored in the `users` table.
//!
//! # Invariants
//! - A record with `id == 0` has not been assigned an ID by storage yet.
//!
//! # See also
//! - crate::repo::user_repo

pub mod user;
