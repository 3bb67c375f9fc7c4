use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};

use super::KeyValueSlot;
use crate::error::SlotError;

pub const SQLITE_DB: &str = "resolve.db";

/// Slot backend storing values in a single-table SQLite database.
pub struct SqliteSlot {
    conn: Connection,
    path: PathBuf,
}

impl SqliteSlot {
    /// Open or create `resolve.db` inside `dir`
    pub fn open(dir: &Path) -> Result<Self, SlotError> {
        let path = dir.join(SQLITE_DB);
        let conn = Connection::open(&path)?;

        let slot = Self { conn, path };
        slot.init_schema()?;
        Ok(slot)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, SlotError> {
        let conn = Connection::open_in_memory()?;
        let slot = Self {
            conn,
            path: PathBuf::from(":memory:"),
        };
        slot.init_schema()?;
        Ok(slot)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_schema(&self) -> Result<(), SlotError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueSlot for SqliteSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            [key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "wrote sqlite slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_db() {
        let tmp = TempDir::new().unwrap();
        let slot = SqliteSlot::open(tmp.path()).unwrap();
        assert!(tmp.path().join(SQLITE_DB).exists());
        assert_eq!(slot.path(), tmp.path().join(SQLITE_DB));
    }

    #[test]
    fn test_value_replacement() {
        let mut slot = SqliteSlot::in_memory().unwrap();

        assert!(slot.read("logs").unwrap().is_none());

        slot.write("logs", "[1]").unwrap();
        assert_eq!(slot.read("logs").unwrap(), Some("[1]".to_string()));

        slot.write("logs", "[1,2]").unwrap();
        assert_eq!(slot.read("logs").unwrap(), Some("[1,2]".to_string()));
    }

    #[test]
    fn test_values_persist_across_connections() {
        let tmp = TempDir::new().unwrap();
        {
            let mut slot = SqliteSlot::open(tmp.path()).unwrap();
            slot.write("logs", "[]").unwrap();
        }

        let slot = SqliteSlot::open(tmp.path()).unwrap();
        assert_eq!(slot.read("logs").unwrap().as_deref(), Some("[]"));
    }
}
