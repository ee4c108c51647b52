//! Data access layer for the `users` table.
//! Callers program against [`UserRepository`]; storage stays behind it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use db::{DbError, DbResult, DbTarget};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::user::{User, UserId};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
