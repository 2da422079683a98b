use super::PermissionNavigator;
use anyhow::Result;
use std::sync::{Arc, Mutex};

/// A mock [PermissionNavigator] counting how many times it was asked to
/// navigate.
#[derive(Debug, Clone, Default)]
pub struct MockNavigator {
    navigations: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockNavigator {
    /// A navigator which hasn't navigated yet
    pub fn new() -> MockNavigator {
        MockNavigator::default()
    }

    /// Set whether navigation should fail or not
    #[cfg(test)]
    pub fn set_failure_mode(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Number of successful navigations
    #[cfg(test)]
    pub fn navigations(&self) -> usize {
        *self.navigations.lock().unwrap()
    }
}

impl PermissionNavigator for MockNavigator {
    fn open_write_settings_screen(&self) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(anyhow::anyhow!("Mock PermissionNavigator is failing"));
        }
        *self.navigations.lock().unwrap() += 1;
        Ok(())
    }
}
