use std::collections::HashMap;

use super::{decode_or_default, StateStore, PROFILE_KEY, ROUTINE_KEY};
use crate::error::Result;
use crate::points::Profile;
use crate::routine::RoutineState;

/// In-process store holding serialized JSON, like the on-disk kv table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Overwrite the raw value for `key`, bypassing serialization.
    pub fn put_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl StateStore for MemoryStore {
    fn load_routine(&self) -> Result<Option<RoutineState>> {
        Ok(decode_or_default(ROUTINE_KEY, self.raw(ROUTINE_KEY).map(str::to_string)))
    }

    fn save_routine(&mut self, state: &RoutineState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.put_raw(ROUTINE_KEY, &json);
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<Profile>> {
        Ok(decode_or_default(PROFILE_KEY, self.raw(PROFILE_KEY).map(str::to_string)))
    }

    fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.put_raw(PROFILE_KEY, &json);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load_routine().unwrap().is_none());
        assert!(store.load_profile().unwrap().is_none());
    }

    #[test]
    fn malformed_value_loads_as_none() {
        let mut store = MemoryStore::new();
        store.put_raw(ROUTINE_KEY, "{not json");
        assert!(store.load_routine().unwrap().is_none());
    }

    #[test]
    fn positional_array_is_not_a_profile() {
        let mut store = MemoryStore::new();
        store.put_raw(PROFILE_KEY, "[1,2,3]");
        assert!(store.load_profile().unwrap().is_none());

        store.put_raw(PROFILE_KEY, r#"{"glow_points":"lots"}"#);
        assert!(store.load_profile().unwrap().is_none());
    }
}
