//! Guarded handle to an open DuckDB store.

use std::path::{Path, PathBuf};

use duckdb::Connection;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::connect::{self, OpenTarget, RetryPolicy};
use crate::error::{StoreError, StoreResult};

/// An open store. All engine access goes through [`TableStore::with_connection`];
/// the mutex is required because DuckDB's `Connection` is not `Sync`.
///
/// The handle can be closed explicitly and stays closed: later calls get
/// [`StoreError::Closed`] instead of touching a dead connection.
pub struct TableStore {
    conn: Mutex<Option<Connection>>,
    path: PathBuf,
    target: OpenTarget,
}

impl TableStore {
    /// Open the store at `path` with the default retry policy.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_policy(path, &RetryPolicy::default())
    }

    /// Open the store at `path`, retrying on lock contention per `policy`.
    pub fn open_with_policy(path: impl AsRef<Path>, policy: &RetryPolicy) -> StoreResult<Self> {
        let primary = path.as_ref();
        if let Some(parent) = primary.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opened = connect::open_with_retry(primary, policy)?;
        info!(path = %opened.path.display(), "connected to store");
        Ok(Self {
            conn: Mutex::new(Some(opened.conn)),
            path: opened.path,
            target: opened.target,
        })
    }

    /// Open a transient in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
            path: PathBuf::from(":memory:"),
            target: OpenTarget::Primary,
        })
    }

    /// The path this store is actually bound to (fallback path included).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when lock contention pushed this store onto its fallback file.
    pub fn is_fallback(&self) -> bool {
        self.target == OpenTarget::Fallback
    }

    /// Run `f` against the live connection.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let guard = self.conn.lock();
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(StoreError::Closed),
        }
    }

    /// Close the store. Safe to call more than once; only the first call
    /// releases the connection.
    pub fn close(&self) {
        let taken = self.conn.lock().take();
        if let Some(conn) = taken {
            if let Err((_, err)) = conn.close() {
                warn!(error = %err, "store connection did not close cleanly");
            }
            info!("store connection closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.conn.lock().is_none()
    }
}

impl Drop for TableStore {
    fn drop(&mut self) {
        self.close();
    }
}
