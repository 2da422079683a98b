use super::{SettingsError, SettingsStore, SCREEN_BRIGHTNESS};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

#[derive(Debug, Default)]
struct State {
    values: HashMap<String, i64>,
    writable: bool,
    should_fail: bool,
    writes: usize,
}

/// A mock [SettingsStore], usable when testing code using the trait.
#[derive(Debug, Clone)]
pub struct MockSettingsStore {
    state: Arc<Mutex<State>>,
}

impl MockSettingsStore {
    /// Create a writable store, optionally with an initial raw brightness
    pub fn new(initial_brightness: Option<i64>) -> MockSettingsStore {
        let mut values = HashMap::new();
        if let Some(b) = initial_brightness {
            values.insert(SCREEN_BRIGHTNESS.to_owned(), b);
        }
        MockSettingsStore {
            state: Arc::new(Mutex::new(State {
                values,
                writable: true,
                ..State::default()
            })),
        }
    }

    /// Set whether operations on this store should return an error or not
    #[cfg(test)]
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.state.lock().unwrap().should_fail = should_fail;
    }

    /// Grant or revoke the write permission
    #[cfg(test)]
    pub fn set_write_permission(&self, writable: bool) {
        self.state.lock().unwrap().writable = writable;
    }

    /// Peek at a value without going through the failure mode
    #[cfg(test)]
    pub fn value(&self, key: &str) -> Option<i64> {
        self.state.lock().unwrap().values.get(key).copied()
    }

    /// Number of successful writes so far
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

impl SettingsStore for MockSettingsStore {
    fn get_int(&self, key: &str) -> Result<i64, SettingsError> {
        let state = self.state.lock().unwrap();
        if state.should_fail {
            return Err(SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Mock SettingsStore is failing",
            )));
        }
        state
            .values
            .get(key)
            .copied()
            .ok_or_else(|| SettingsError::NotFound(key.to_owned()))
    }

    fn put_int(&self, key: &str, value: i64) -> Result<(), SettingsError> {
        let mut state = self.state.lock().unwrap();
        if !state.writable {
            return Err(SettingsError::PermissionDenied);
        }
        if state.should_fail {
            return Err(SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Mock SettingsStore is failing",
            )));
        }
        state.values.insert(key.to_owned(), value);
        state.writes += 1;
        Ok(())
    }

    fn can_write(&self) -> bool {
        self.state.lock().unwrap().writable
    }
}
