//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract callers program against.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repositories receive their connection at construction and never
//!   reach for process-wide state.
//! - Repository APIs return a semantic `NotFound` in addition to DB
//!   transport errors.

pub mod user_repo;
