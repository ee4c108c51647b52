//! Process-wide database handle.
//!
//! # Responsibility
//! - Open the shared connection at most once per process.
//! - Hand the connection to callers as an opaque, lockable handle.
//! - Close the connection explicitly at shutdown.
//!
//! # Invariants
//! - Initialization runs once; later calls never reopen or migrate again.
//! - Re-initialization with a different target is rejected.
//! - After shutdown the handle stays closed for the rest of the process.

use super::{open_target, DbError, DbResult, DbTarget};
use log::{info, warn};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::sync::Mutex;

static GLOBAL_DB: OnceCell<GlobalDb> = OnceCell::new();

struct GlobalDb {
    target: DbTarget,
    shared: SharedConnection,
}

/// Lockable connection shared across the process.
///
/// Thread-safety is delegated to the mutex; callers borrow the connection
/// for the duration of one closure.
pub struct SharedConnection {
    conn: Mutex<Option<Connection>>,
}

impl SharedConnection {
    fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Runs `f` with the shared connection borrowed.
    ///
    /// # Errors
    /// - `Closed` after [`shutdown_global_db`].
    /// - `Poisoned` when a previous holder panicked.
    /// - Whatever `f` returns.
    pub fn with_conn<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let guard = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;
        f(conn)
    }

    /// Returns whether the connection is still open.
    pub fn is_open(&self) -> bool {
        self.conn
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn close(&self) -> DbResult<bool> {
        let mut guard = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        match guard.take() {
            Some(conn) => {
                conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Opens and migrates the process-wide connection, once.
///
/// Repeated calls with the same target return the existing handle.
///
/// # Errors
/// - `AlreadyInitialized` when a different target is already active.
/// - `Closed` when the handle was shut down earlier in this process.
/// - Any open or migration error from the first initialization.
pub fn init_global_db(target: &DbTarget) -> DbResult<&'static SharedConnection> {
    let state = GLOBAL_DB.get_or_try_init(|| -> DbResult<GlobalDb> {
        let conn = open_target(target)?;
        info!(
            "event=db_global_init module=db status=ok mode={} target={}",
            target.mode(),
            target
        );
        Ok(GlobalDb {
            target: target.clone(),
            shared: SharedConnection::new(conn),
        })
    })?;

    if state.target != *target {
        warn!(
            "event=db_global_init module=db status=rejected active={} requested={}",
            state.target, target
        );
        return Err(DbError::AlreadyInitialized {
            active: state.target.clone(),
            requested: target.clone(),
        });
    }
    if !state.shared.is_open() {
        return Err(DbError::Closed);
    }

    Ok(&state.shared)
}

/// Returns the process-wide handle when it has been initialized.
pub fn global_db() -> Option<&'static SharedConnection> {
    GLOBAL_DB.get().map(|state| &state.shared)
}

/// Closes the process-wide connection.
///
/// Safe to call repeatedly and before initialization.
pub fn shutdown_global_db() -> DbResult<()> {
    let Some(state) = GLOBAL_DB.get() else {
        return Ok(());
    };
    if state.shared.close()? {
        info!(
            "event=db_close module=db status=ok target={}",
            state.target
        );
    }
    Ok(())
}
