use thiserror::Error;

/// Display-related attributes of a single window.
///
/// They only apply while the window is in the foreground and go away with it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowAttributes {
    /// Brightness in 0.0-1.0 taking precedence over the system brightness.
    /// `None` lets the system decide.
    pub brightness_override: Option<f32>,
    /// Keeps the display from dimming and going to sleep
    pub keep_screen_on: bool,
}

/// Failures of a [DisplaySurface]
#[derive(Debug, Error)]
pub enum WindowError {
    /// The application has no window in the foreground
    #[error("no active window to apply attributes to")]
    NoActiveWindow,

    /// The window system refused the change
    #[error("window rejected attributes: {0}")]
    Rejected(String),
}

/// The display surface of the application's active window.
///
/// Changes are made read-modify-write: fetch the current [WindowAttributes],
/// change the fields of interest and apply the whole set back.
pub trait DisplaySurface: 'static + Send + Sync + Clone {
    /// Current attributes of the window
    fn attributes(&self) -> Result<WindowAttributes, WindowError>;

    /// Replace the window's attributes
    fn apply(&self, attributes: WindowAttributes) -> Result<(), WindowError>;
}
