//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the user store.
//! - Apply schema migrations in deterministic order.
//! - Hold the optional process-wide connection used by the binary.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Repositories only ever receive a connection with migrations applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod global;
pub mod migrations;
mod open;
mod target;

pub use global::{global_db, init_global_db, shutdown_global_db, SharedConnection};
pub use open::{open_db, open_db_in_memory, open_target};
pub use target::DbTarget;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    InvalidTarget(String),
    AlreadyInitialized {
        active: DbTarget,
        requested: DbTarget,
    },
    Closed,
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidTarget(message) => write!(f, "invalid database target: {message}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "database already initialized at `{active}`; refusing to switch to `{requested}`"
            ),
            Self::Closed => write!(f, "database connection has been shut down"),
            Self::Poisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
