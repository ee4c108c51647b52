//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `users` table.
//! - Map between `User` and its row, including integer range checks.
//!
//! # Invariants
//! - Each write runs in its own transaction.
//! - No validation beyond what the column types require.
//! - Engine errors propagate unchanged inside `RepoError::Db`.

use crate::db::DbError;
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    age
FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(UserId),
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this error means "no row with that ID".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts `user`; a zero ID is replaced by the one storage assigns.
    fn create_user(&self, user: &mut User) -> RepoResult<()>;
    /// Fetches exactly one user, or `RepoError::NotFound`.
    fn get_user(&self, id: UserId) -> RepoResult<User>;
    /// Overwrites every column of the row keyed by `user.id`, inserting it
    /// when absent.
    fn update_user(&self, user: &mut User) -> RepoResult<()>;
    /// Removes the row keyed by `id`. Missing rows are not an error.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &mut User) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let id = insert_user(&tx, user)?;
        tx.commit()?;

        user.id = id;
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<User> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL}
             WHERE id = ?1
             ORDER BY id
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([to_db_int(id, "id")?])?;
        match rows.next()? {
            Some(row) => parse_user_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn update_user(&self, user: &mut User) -> RepoResult<()> {
        if !user.is_persisted() {
            return self.create_user(user);
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO users (id, name, email, age)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                age = excluded.age;",
            params![
                to_db_int(user.id, "id")?,
                user.name.as_str(),
                user.email.as_str(),
                to_db_int(user.age, "age")?,
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let db_id = to_db_int(id, "id")?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM users WHERE id = ?1;", [db_id])?;
        tx.commit()?;

        Ok(())
    }
}

fn insert_user(conn: &Connection, user: &User) -> RepoResult<UserId> {
    let age = to_db_int(user.age, "age")?;

    if user.is_persisted() {
        conn.execute(
            "INSERT INTO users (name, email, age, id) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.name.as_str(),
                user.email.as_str(),
                age,
                to_db_int(user.id, "id")?,
            ],
        )?;
    } else {
        conn.execute(
            "INSERT INTO users (name, email, age) VALUES (?1, ?2, ?3);",
            params![user.name.as_str(), user.email.as_str(), age],
        )?;
    }

    from_db_int(conn.last_insert_rowid(), "id")
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: from_db_int(row.get("id")?, "id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        age: from_db_int(row.get("age")?, "age")?,
    })
}

// SQLite INTEGER is signed; values above i64::MAX cannot be stored.
fn to_db_int(value: u64, column: &str) -> RepoResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "value `{value}` for users.{column} exceeds the storage range"
        ))
    })
}

fn from_db_int(value: i64, column: &str) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("negative value `{value}` in users.{column}"))
    })
}
