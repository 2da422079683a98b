use super::codec::ErrorCode;
use crate::external::{
    permission::PermissionNavigator,
    settings::{BrightnessMode, SettingsError, SettingsStore, SCREEN_BRIGHTNESS},
    window::{DisplaySurface, WindowAttributes, WindowError},
};
use thiserror::Error;

/// Reported by [BrightnessBridge::get_brightness] whenever the system
/// brightness can't be read, whatever the reason.
pub const FALLBACK_BRIGHTNESS: f64 = 0.5;

/// Top of the integer range the system stores brightness in
pub const MAX_RAW_BRIGHTNESS: i64 = 255;

/// Lowest brightness ever written, 0 would turn the screen fully black
pub const MIN_RAW_BRIGHTNESS: i64 = 1;

/// Failure of a bridge operation, reported to the caller in-band
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Settings can't be written until the user grants the permission
    #[error("WRITE_SETTINGS permission required")]
    PermissionNeeded,

    /// The system refused the operation, with its own error text
    #[error("{0}")]
    Brightness(String),
}

impl BridgeError {
    /// The wire code this error is reported under
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::PermissionNeeded => ErrorCode::PermissionNeeded,
            BridgeError::Brightness(_) => ErrorCode::BrightnessError,
        }
    }

    fn from_failure(e: impl std::fmt::Display) -> BridgeError {
        BridgeError::Brightness(e.to_string())
    }
}

/// Converts a 0.0-1.0 brightness into the integer the system stores.
pub fn to_raw_brightness(level: f64) -> i64 {
    // NaN casts to 0 and ends up clamped like any other too-low value
    ((level * MAX_RAW_BRIGHTNESS as f64).round() as i64)
        .clamp(MIN_RAW_BRIGHTNESS, MAX_RAW_BRIGHTNESS)
}

/// Converts the system's integer brightness into 0.0-1.0.
///
/// Anyone may have written the setting, values outside 0-255 are pinned to
/// the nearest end of the range.
pub fn from_raw_brightness(raw: i64) -> f64 {
    raw.clamp(0, MAX_RAW_BRIGHTNESS) as f64 / MAX_RAW_BRIGHTNESS as f64
}

/// The bridge's operations on the system display settings and the active
/// window.
///
/// Holds no state of its own: everything it reports is read from the
/// capabilities at the time of the call.
pub struct BrightnessBridge<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> {
    settings: S,
    window: W,
    navigator: N,
}

impl<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> BrightnessBridge<S, W, N> {
    /// A bridge working on the given capabilities
    pub fn new(settings: S, window: W, navigator: N) -> BrightnessBridge<S, W, N> {
        BrightnessBridge {
            settings,
            window,
            navigator,
        }
    }

    /// Current system brightness, or [FALLBACK_BRIGHTNESS] if it can't be
    /// read.
    pub fn get_brightness(&self) -> f64 {
        match self.settings.get_int(SCREEN_BRIGHTNESS) {
            Ok(raw) => from_raw_brightness(raw),
            Err(e) => {
                log::debug!("Couldn't read brightness, reporting fallback: {}", e);
                FALLBACK_BRIGHTNESS
            }
        }
    }

    /// Switch the system to manual brightness at `level` and show it on the
    /// window right away.
    ///
    /// Nothing is written without the write-settings permission.
    pub fn set_system_brightness(&self, level: f64) -> Result<bool, BridgeError> {
        if !self.settings.can_write() {
            return Err(BridgeError::PermissionNeeded);
        }
        let raw = to_raw_brightness(level);
        self.settings
            .set_brightness_mode(BrightnessMode::Manual)
            .map_err(BridgeError::from_failure)?;
        self.settings
            .put_int(SCREEN_BRIGHTNESS, raw)
            .map_err(BridgeError::from_failure)?;
        // The system setting takes a while to reach the screen, the window
        // override doesn't
        self.update_window(|a| a.brightness_override = Some(level.clamp(0.0, 1.0) as f32))
            .map_err(BridgeError::from_failure)?;
        log::debug!("System brightness set to {}", raw);
        Ok(true)
    }

    /// Hand brightness control back to the system.
    pub fn reset_system_brightness(&self) -> Result<bool, BridgeError> {
        self.settings
            .set_brightness_mode(BrightnessMode::Automatic)
            .map_err(BridgeError::from_failure)?;
        self.update_window(|a| a.brightness_override = None)
            .map_err(BridgeError::from_failure)?;
        log::debug!("System brightness reset to automatic");
        Ok(true)
    }

    /// The system's current [BrightnessMode]
    pub fn brightness_mode(&self) -> Result<BrightnessMode, SettingsError> {
        self.settings.get_brightness_mode()
    }

    /// Whether system settings may be written
    pub fn has_brightness_permission(&self) -> bool {
        self.settings.can_write()
    }

    /// Returns true if the permission is already granted. Otherwise sends the
    /// user to the permission-grant screen and returns false; the outcome has
    /// to be checked with [Self::has_brightness_permission] later.
    pub fn request_brightness_permission(&self) -> bool {
        if self.settings.can_write() {
            return true;
        }
        if let Err(e) = self.navigator.open_write_settings_screen() {
            log::error!("Couldn't open permission screen: {:#}", e);
        }
        false
    }

    /// Keep the display awake while the window is shown, or stop doing so.
    pub fn keep_screen_on(&self, on: bool) {
        if let Err(e) = self.update_window(|a| a.keep_screen_on = on) {
            log::error!("Couldn't change keep screen on to {}: {}", on, e);
        }
    }

    /// Drop every attribute the bridge may have put on the window.
    pub fn release_window(&self) -> Result<(), WindowError> {
        self.update_window(|a| {
            a.brightness_override = None;
            a.keep_screen_on = false;
        })
    }

    fn update_window(
        &self,
        change: impl FnOnce(&mut WindowAttributes),
    ) -> Result<(), WindowError> {
        let mut attributes = self.window.attributes()?;
        change(&mut attributes);
        self.window.apply(attributes)
    }
}
