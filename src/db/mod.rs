//! Database layer for the medical service
//!
//! SQLite through rusqlite. A [`ConnectionProvider`] hands out one
//! [`Session`] per logical operation; the session derefs to [`Store`],
//! which owns every SQL statement.
//!
//! # Example
//! ```no_run
//! use medical_service::db::{ConnectionProvider, SqliteProvider};
//!
//! let provider = SqliteProvider::new("medical_service.db");
//! let session = provider.open()?;
//! for patient in session.list_patients()? {
//!     println!("{} {}", patient.id, patient.full_name);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod provider;
pub mod schema;
pub mod store;

pub use provider::{ConnectionProvider, Session, SqliteProvider};
pub use store::{ReportOrder, Store, Table};

use std::fmt;
use std::path::PathBuf;

/// The database location could not be prepared before opening it.
#[derive(Debug)]
pub struct StoreUnavailable {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for StoreUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to create database directory {}", self.path.display())
    }
}

impl std::error::Error for StoreUnavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// True when the failure came from the database rather than the terminal
/// or configuration.
pub fn is_store_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.is::<rusqlite::Error>() || cause.is::<StoreUnavailable>())
}
