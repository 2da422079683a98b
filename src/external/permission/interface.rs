use anyhow::Result;

/// Opens the system screen on which the user can grant this application the
/// permission to write system settings.
///
/// Opening the screen is all this does. Whether and when the user grants the
/// permission is not observed, it has to be checked again later.
pub trait PermissionNavigator: 'static + Send + Sync + Clone {
    /// Bring up the screen, without waiting for the user
    fn open_write_settings_screen(&self) -> Result<()>;
}
