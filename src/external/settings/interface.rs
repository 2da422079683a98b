use thiserror::Error;

/// Key of the integer system brightness, in the 0-255 range.
pub const SCREEN_BRIGHTNESS: &str = "screen_brightness";

/// Key of the brightness mode flag, see [BrightnessMode].
pub const SCREEN_BRIGHTNESS_MODE: &str = "screen_brightness_mode";

/// Whether the system adjusts the brightness on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessMode {
    /// Brightness stays where it was last set
    Manual,
    /// The system picks the brightness, usually from an ambient light sensor
    Automatic,
}

impl BrightnessMode {
    /// The value stored under [SCREEN_BRIGHTNESS_MODE]
    pub fn as_setting(self) -> i64 {
        match self {
            BrightnessMode::Manual => 0,
            BrightnessMode::Automatic => 1,
        }
    }

    /// Parses the value stored under [SCREEN_BRIGHTNESS_MODE]
    pub fn from_setting(value: i64) -> Result<BrightnessMode, SettingsError> {
        match value {
            0 => Ok(BrightnessMode::Manual),
            1 => Ok(BrightnessMode::Automatic),
            _ => Err(SettingsError::InvalidValue {
                key: SCREEN_BRIGHTNESS_MODE.to_owned(),
                value,
            }),
        }
    }
}

/// Failures of a [SettingsStore]
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The setting has never been written
    #[error("setting {0} not found")]
    NotFound(String),

    /// This process may not write settings
    #[error("no permission to write system settings")]
    PermissionDenied,

    /// The stored value means nothing for this key
    #[error("setting {key} has unexpected value {value}")]
    InvalidValue {
        /// Setting key
        key: String,
        /// The value found
        value: i64,
    },

    #[error("settings store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings store is corrupted: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("couldn't serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The system's store of integer display settings.
///
/// The store is owned by the system, not by the bridge. Other processes may
/// change it at any time, so nothing read from it should be cached.
pub trait SettingsStore: 'static + Send + Sync + Clone {
    /// Read an integer setting
    fn get_int(&self, key: &str) -> Result<i64, SettingsError>;

    /// Write an integer setting. Fails with [SettingsError::PermissionDenied]
    /// when [SettingsStore::can_write] is false.
    fn put_int(&self, key: &str, value: i64) -> Result<(), SettingsError>;

    /// Whether this process has been granted permission to write settings
    fn can_write(&self) -> bool;

    /// Read the [BrightnessMode]
    fn get_brightness_mode(&self) -> Result<BrightnessMode, SettingsError> {
        BrightnessMode::from_setting(self.get_int(SCREEN_BRIGHTNESS_MODE)?)
    }

    /// Write the [BrightnessMode]
    fn set_brightness_mode(&self, mode: BrightnessMode) -> Result<(), SettingsError> {
        self.put_int(SCREEN_BRIGHTNESS_MODE, mode.as_setting())
    }
}
