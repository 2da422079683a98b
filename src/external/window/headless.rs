use super::{DisplaySurface, WindowAttributes, WindowError};
use std::sync::{Arc, Mutex};

/// A [DisplaySurface] for hosts without a window system.
///
/// Attributes live in memory for as long as the process does and every
/// change is logged, which is all a one-shot command line caller can observe.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindow {
    attributes: Arc<Mutex<WindowAttributes>>,
}

impl HeadlessWindow {
    /// A window without any attributes set
    pub fn new() -> HeadlessWindow {
        HeadlessWindow::default()
    }
}

impl DisplaySurface for HeadlessWindow {
    fn attributes(&self) -> Result<WindowAttributes, WindowError> {
        self.attributes
            .lock()
            .map(|a| *a)
            .map_err(|_| WindowError::NoActiveWindow)
    }

    fn apply(&self, attributes: WindowAttributes) -> Result<(), WindowError> {
        let mut current = self
            .attributes
            .lock()
            .map_err(|_| WindowError::NoActiveWindow)?;
        if current.brightness_override != attributes.brightness_override {
            match attributes.brightness_override {
                Some(b) => log::info!("Window brightness overridden to {:.3}", b),
                None => log::info!("Window brightness follows the system"),
            }
        }
        if current.keep_screen_on != attributes.keep_screen_on {
            log::info!("Keep screen on: {}", attributes.keep_screen_on);
        }
        *current = attributes;
        Ok(())
    }
}
