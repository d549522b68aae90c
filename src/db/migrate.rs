use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::debug;

/// Latest schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 2;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Create the key/value table holding the JSON mirrors.
fn create_kv_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
}

fn user_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn set_user_version(conn: &Connection, v: i32) -> rusqlite::Result<()> {
    // PRAGMA does not accept bound parameters
    conn.execute_batch(&format!("PRAGMA user_version = {v};"))
}

/// Apply every migration newer than the stored schema version.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = user_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "store schema v{current} is newer than supported v{SCHEMA_VERSION}"
        )));
    }

    if current < 1 {
        ensure_log_table(conn)?;
        set_user_version(conn, 1)?;
        debug!("migration v1 applied (log table)");
    }

    if current < 2 {
        create_kv_table(conn)?;
        set_user_version(conn, 2)?;
        debug!("migration v2 applied (kv table)");
        if current > 0 {
            let _ = ttlog(conn, "migration_applied", "v2", "kv table created");
        }
    }

    Ok(())
}
