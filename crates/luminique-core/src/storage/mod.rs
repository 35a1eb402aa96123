mod config;
pub mod database;
mod memory;

pub use config::{Config, LoggingConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::Result;
use crate::points::Profile;
use crate::routine::RoutineState;

/// Key the routine state is stored under.
pub const ROUTINE_KEY: &str = "luminique-routine";
/// Key the points profile is stored under.
pub const PROFILE_KEY: &str = "luminique-user";

/// Durable keyed store for the two engine state objects.
///
/// Loads return `Ok(None)` when nothing has been saved yet. Callers decide
/// how to treat a value that no longer parses; see [`decode_or_default`].
pub trait StateStore {
    fn load_routine(&self) -> Result<Option<RoutineState>>;
    fn save_routine(&mut self, state: &RoutineState) -> Result<()>;
    fn load_profile(&self) -> Result<Option<Profile>>;
    fn save_profile(&mut self, profile: &Profile) -> Result<()>;

    /// Persist both objects. Stores that can write atomically override this.
    fn save_snapshot(&mut self, routine: &RoutineState, profile: &Profile) -> Result<()> {
        self.save_routine(routine)?;
        self.save_profile(profile)
    }

    /// Remove all stored state.
    fn clear(&mut self) -> Result<()>;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn load_routine(&self) -> Result<Option<RoutineState>> {
        (**self).load_routine()
    }
    fn save_routine(&mut self, state: &RoutineState) -> Result<()> {
        (**self).save_routine(state)
    }
    fn load_profile(&self) -> Result<Option<Profile>> {
        (**self).load_profile()
    }
    fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        (**self).save_profile(profile)
    }
    fn save_snapshot(&mut self, routine: &RoutineState, profile: &Profile) -> Result<()> {
        (**self).save_snapshot(routine, profile)
    }
    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// Parse a stored JSON value, falling back to `None` if it is malformed.
///
/// A bad value is logged and treated as absent.
pub(crate) fn decode_or_default<T: serde::de::DeserializeOwned>(
    key: &str,
    raw: Option<String>,
) -> Option<T> {
    let raw = raw?;
    let decoded = serde_json::from_str::<serde_json::Value>(&raw).and_then(|value| {
        // Stored state is always an object. Derived structs also accept
        // positional arrays, which would misread foreign data.
        if value.is_object() {
            serde_json::from_value(value)
        } else {
            Err(serde::de::Error::custom("expected a JSON object"))
        }
    });
    match decoded {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored state is malformed, using defaults");
            None
        }
    }
}

/// Returns `~/.config/luminique[-dev]/` based on LUMINIQUE_ENV.
///
/// Set LUMINIQUE_ENV=dev to use the development data directory, or
/// LUMINIQUE_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("LUMINIQUE_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LUMINIQUE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("luminique-dev")
            } else {
                base_dir.join("luminique")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
