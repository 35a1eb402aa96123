//! SQLite-backed key-value storage for engine state.
//!
//! Both state objects are stored as JSON under fixed keys in a single `kv`
//! table, so a schema change in the structs never needs a migration: older
//! values either deserialize with field defaults or fall back to a fresh
//! state.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, decode_or_default, StateStore, PROFILE_KEY, ROUTINE_KEY};
use crate::error::{DatabaseError, Result};
use crate::points::Profile;
use crate::routine::RoutineState;

/// SQLite database holding the persisted engine state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/luminique.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("luminique.db"))
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Write both state objects in one transaction.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails; nothing is
    /// written in that case.
    pub fn save_both(&mut self, routine: &RoutineState, profile: &Profile) -> Result<()> {
        let routine_json = serde_json::to_string(routine)?;
        let profile_json = serde_json::to_string(profile)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![ROUTINE_KEY, routine_json],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![PROFILE_KEY, profile_json],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl StateStore for Database {
    fn load_routine(&self) -> Result<Option<RoutineState>> {
        Ok(decode_or_default(ROUTINE_KEY, self.kv_get(ROUTINE_KEY)?))
    }

    fn save_routine(&mut self, state: &RoutineState) -> Result<()> {
        self.kv_set(ROUTINE_KEY, &serde_json::to_string(state)?)?;
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<Profile>> {
        Ok(decode_or_default(PROFILE_KEY, self.kv_get(PROFILE_KEY)?))
    }

    fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        self.kv_set(PROFILE_KEY, &serde_json::to_string(profile)?)?;
        Ok(())
    }

    fn save_snapshot(&mut self, routine: &RoutineState, profile: &Profile) -> Result<()> {
        self.save_both(routine, profile)
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute(
            "DELETE FROM kv WHERE key IN (?1, ?2)",
            params![ROUTINE_KEY, PROFILE_KEY],
        )?;
        Ok(())
    }
}
