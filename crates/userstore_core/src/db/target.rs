//! Connection string parsing.

use super::{DbError, DbResult};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const MEMORY_TARGET: &str = ":memory:";
const URL_PREFIXES: &[&str] = &["sqlite://", "sqlite:"];

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    Memory,
}

impl DbTarget {
    /// Parses a single connection string.
    ///
    /// Accepts a bare path, `sqlite://<path>`, `sqlite:<path>` or `:memory:`.
    ///
    /// # Errors
    /// - `InvalidTarget` when nothing remains after trimming the prefix.
    pub fn parse(value: &str) -> DbResult<Self> {
        let trimmed = value.trim();
        let location = URL_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);

        if location.is_empty() {
            return Err(DbError::InvalidTarget(format!(
                "connection string `{value}` does not name a database"
            )));
        }
        if location == MEMORY_TARGET {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(location)))
    }

    /// Short label used in log fields.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

impl Display for DbTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(MEMORY_TARGET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DbTarget;
    use crate::db::DbError;
    use std::path::PathBuf;

    #[test]
    fn parse_accepts_bare_paths_and_url_prefixes() {
        let expected = DbTarget::File(PathBuf::from("/var/lib/users.db"));
        assert_eq!(DbTarget::parse("/var/lib/users.db").unwrap(), expected);
        assert_eq!(DbTarget::parse("sqlite:///var/lib/users.db").unwrap(), expected);
        assert_eq!(DbTarget::parse(" sqlite:/var/lib/users.db ").unwrap(), expected);
    }

    #[test]
    fn parse_recognizes_memory() {
        assert_eq!(DbTarget::parse(":memory:").unwrap(), DbTarget::Memory);
        assert_eq!(DbTarget::parse("sqlite::memory:").unwrap(), DbTarget::Memory);
    }

    #[test]
    fn parse_rejects_empty_targets() {
        assert!(matches!(DbTarget::parse("  "), Err(DbError::InvalidTarget(_))));
        assert!(matches!(
            DbTarget::parse("sqlite://"),
            Err(DbError::InvalidTarget(_))
        ));
    }
}
