//! Local key/value store holding the JSON mirrors of the remote data.
//!
//! Every key maps to one JSON document. Lists are rewritten whole on each
//! change: `append` is a read-modify-write with no locking, so two handles
//! on the same file that interleave can lose an update.

use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Backup mirror of submitted registrations.
pub const KEY_HOURS_BACKUP: &str = "workHoursRecords";
/// Mirror of the employee roster.
pub const KEY_EMPLOYEES: &str = "employees";
/// Logged-in user.
pub const KEY_CURRENT_USER: &str = "currentUser";
/// Duplicate of the session used by the route gate.
pub const KEY_SESSION_COOKIE: &str = "cookie:currentUser";

pub struct LocalStore {
    pool: DbPool,
}

impl LocalStore {
    /// Open (and migrate) the store at `path`. `:memory:` opens a volatile one.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = if path == ":memory:" {
            DbPool::in_memory()?
        } else {
            DbPool::new(path)?
        };
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::open(":memory:")
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    fn raw(&self, key: &str) -> Option<String> {
        let res = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional();

        match res {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "local store read failed, treating as empty");
                None
            }
        }
    }

    /// Read a JSON document. Missing, unreadable or malformed ⇒ `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "local store value is not valid JSON, ignoring");
                None
            }
        }
    }

    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, json, chrono::Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Read a named record list; any failure reads as an empty list.
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.get::<Vec<T>>(key).unwrap_or_default()
    }

    pub fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> AppResult<()> {
        self.put(key, items)
    }

    /// Append one record to a named list (read-modify-write, not atomic).
    pub fn append<T: Serialize + DeserializeOwned>(&self, key: &str, item: T) -> AppResult<()> {
        let mut items: Vec<T> = self.read_list(key);
        items.push(item);
        self.write_list(key, &items)
    }

    /// Internal audit log. Failures are reported but never block the caller.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warn!(operation, error = %e, "failed to write internal log");
        }
    }
}
