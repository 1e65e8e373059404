//! `vehicles` table setup.
//!
//! The inventory has one table, so there is no migration chain: a fresh file
//! (`user_version = 0`) gets `schema.sql`, a current file is left alone, and a
//! file stamped by a newer build is refused.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema revision this build creates and understands.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

pub(super) fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
    Ok(())
}
