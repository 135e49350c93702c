//! Per-operation database sessions
//!
//! Every menu action opens its own [`Session`] and lets it drop when the
//! action returns, so the connection is released on error paths too.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use super::schema;
use super::StoreUnavailable;
use super::store::Store;
use crate::logging::log_debug;

/// Opens database sessions.
pub trait ConnectionProvider {
    fn open(&self) -> Result<Session>;
}

/// An open connection. Closed when dropped.
pub struct Session {
    store: Store,
    label: String,
}

impl Session {
    pub fn new(conn: Connection, label: impl Into<String>) -> Self {
        let label = label.into();
        log_debug("db::session", &format!("opened {}", label));
        Self {
            store: Store::new(conn),
            label,
        }
    }
}

impl Deref for Session {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.store
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log_debug("db::session", &format!("closed {}", self.label));
    }
}

/// Sessions on a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
}

impl SqliteProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConnectionProvider for SqliteProvider {
    fn open(&self) -> Result<Session> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreUnavailable {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(&self.path)
            .with_context(|| format!("Failed to open database at {}", self.path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        schema::ensure(&conn)?;

        Ok(Session::new(conn, self.path.display().to_string()))
    }
}
