//! Startup configuration.
//!
//! Values come from command-line flags with environment fallbacks. The
//! connection string is the only storage setting; everything else about
//! the engine is fixed by [`crate::db`].

use crate::db::{DbResult, DbTarget};
use crate::logging::default_log_level;
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://userstore.db";

/// Settings shared by every entry point that opens the store.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct StoreConfig {
    /// Database connection string (`sqlite://<path>`, a bare path, or `:memory:`)
    #[arg(long, env = "USERSTORE_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "USERSTORE_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    pub log_level: String,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[arg(long, env = "USERSTORE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Parses the connection string.
    pub fn db_target(&self) -> DbResult<DbTarget> {
        DbTarget::parse(&self.database_url)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use crate::db::DbTarget;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        store: StoreConfig,
    }

    #[test]
    fn default_targets_local_file() {
        let config = StoreConfig::default();
        assert_eq!(
            config.db_target().unwrap(),
            DbTarget::File(PathBuf::from("userstore.db"))
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "userstore",
            "--database-url",
            ":memory:",
            "--log-level",
            "warn",
            "--log-dir",
            "/tmp/userstore-logs",
        ])
        .unwrap();

        assert_eq!(cli.store.db_target().unwrap(), DbTarget::Memory);
        assert_eq!(cli.store.log_level, "warn");
        assert_eq!(cli.store.log_dir, Some(PathBuf::from("/tmp/userstore-logs")));
    }
}
