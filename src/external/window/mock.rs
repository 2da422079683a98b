use super::{DisplaySurface, WindowAttributes, WindowError};
use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

/// A mock [DisplaySurface], usable when testing code using the trait.
#[derive(Debug, Clone, Default)]
pub struct MockWindow {
    attributes: Arc<Mutex<Cell<WindowAttributes>>>,
    should_fail: Arc<Mutex<Cell<bool>>>,
}

impl MockWindow {
    /// A window starting out with `initial` attributes
    pub fn new(initial: WindowAttributes) -> MockWindow {
        MockWindow {
            attributes: Arc::new(Mutex::new(Cell::new(initial))),
            should_fail: Arc::new(Mutex::new(Cell::new(false))),
        }
    }

    /// Set whether operations on this window should return an error or not
    #[cfg(test)]
    pub fn set_failure_mode(&self, should_fail: bool) {
        self.should_fail.lock().unwrap().set(should_fail);
    }

    /// Current attributes, regardless of failure mode
    #[cfg(test)]
    pub fn current(&self) -> WindowAttributes {
        self.attributes.lock().unwrap().get()
    }
}

impl DisplaySurface for MockWindow {
    fn attributes(&self) -> Result<WindowAttributes, WindowError> {
        if self.should_fail.lock().unwrap().get() {
            Err(WindowError::NoActiveWindow)
        } else {
            Ok(self.attributes.lock().unwrap().get())
        }
    }

    fn apply(&self, attributes: WindowAttributes) -> Result<(), WindowError> {
        if self.should_fail.lock().unwrap().get() {
            return Err(WindowError::Rejected(
                "Mock DisplaySurface is failing".to_owned(),
            ));
        }
        self.attributes.lock().unwrap().set(attributes);
        Ok(())
    }
}
