//! Storage for the `items` table: connection bootstrap and schema upgrades.
//!
//! Nothing outside this module touches `PRAGMA user_version`. A connection
//! handed to the repository always carries the schema this binary expects.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, MEMORY_DB};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the item store.
#[derive(Debug)]
pub enum DbError {
    /// Any SQLite-level failure, including constraint and trigger aborts.
    Sqlite(rusqlite::Error),
    /// The file was last written by a newer build of this service.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "item store uses schema v{found}, but this build only understands up to v{supported}; upgrade the service before opening it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
