//! SQLite bootstrap for the inventory store.
//!
//! `open_db*` hand out connections whose `vehicles` schema is current.
//! Schema state is stamped in `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::SCHEMA_VERSION;

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing the inventory database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build with a schema this one cannot read.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "inventory schema v{found} is ahead of this build (supports up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            return Some(err);
        }
        None
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
