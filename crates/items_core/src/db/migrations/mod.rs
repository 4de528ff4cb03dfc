//! Schema history of the item store.
//!
//! Each step is a SQL file under this directory, applied once, in order.
//! Pending steps run inside a single transaction so a half-upgraded
//! `items` table is never observable.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step.
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "create_items",
    sql: include_str!("0001_items.sql"),
}];

/// Schema version produced by the newest step this build ships.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the item store up to `latest_version()`.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the store is ahead of this build.
/// - `DbError::Sqlite` when a step fails; nothing is applied in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();

    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    for step in pending {
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    Ok(())
}
