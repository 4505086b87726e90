//! Shared connection handle with scoped per-call acquisition.
//!
//! # Responsibility
//! - Own the single bootstrapped connection for a process.
//! - Grant exclusive access for the duration of one store operation.
//!
//! # Invariants
//! - Access is only possible through `DbGuard`, which releases the
//!   connection when dropped on every exit path (including `?` and panics).
//! - At most one operation touches the connection at a time.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle injected into services that need database access.
#[derive(Clone)]
pub struct DbHandle {
    conn: Arc<Mutex<Connection>>,
}

/// Exclusive borrow of the shared connection.
pub struct DbGuard<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl DbHandle {
    /// Wraps an already bootstrapped connection.
    ///
    /// Callers must pass a connection returned by [`open_db`] or
    /// [`open_db_in_memory`] so migrations are guaranteed to be applied.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens (and migrates) a file database and wraps it.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens (and migrates) a private in-memory database and wraps it.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Acquires exclusive access to the connection for one operation.
    ///
    /// # Errors
    /// - `DbError::ConnectionPoisoned` when a previous holder panicked.
    pub fn acquire(&self) -> DbResult<DbGuard<'_>> {
        let conn = self.conn.lock().map_err(|_| DbError::ConnectionPoisoned)?;
        Ok(DbGuard { conn })
    }
}

impl Deref for DbGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
