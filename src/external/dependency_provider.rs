use super::{
    permission::{command::CommandNavigator, mock::MockNavigator, PermissionNavigator},
    settings::{file::FileSettingsStore, mock::MockSettingsStore, SettingsStore},
    window::{headless::HeadlessWindow, mock::MockWindow, DisplaySurface, WindowAttributes},
};
use crate::config::Config;

/// Raw brightness the mock settings store starts with
pub const MOCK_INITIAL_BRIGHTNESS: i64 = 128;

/// Hands out the capabilities the bridge works with.
pub struct DependencyProvider<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> {
    settings_store: S,
    display_surface: W,
    permission_navigator: N,
}

impl<S: SettingsStore, W: DisplaySurface, N: PermissionNavigator> DependencyProvider<S, W, N> {
    /// Bundle the given capabilities
    pub fn new(
        settings_store: S,
        display_surface: W,
        permission_navigator: N,
    ) -> DependencyProvider<S, W, N> {
        DependencyProvider {
            settings_store,
            display_surface,
            permission_navigator,
        }
    }

    /// A handle to the settings store
    pub fn get_settings_store(&self) -> S {
        self.settings_store.clone()
    }

    /// A handle to the active window
    pub fn get_display_surface(&self) -> W {
        self.display_surface.clone()
    }

    /// A handle to the permission navigator
    pub fn get_permission_navigator(&self) -> N {
        self.permission_navigator.clone()
    }
}

impl DependencyProvider<FileSettingsStore, HeadlessWindow, CommandNavigator> {
    /// The capabilities of this system, as configured
    pub fn make_system(config: &Config) -> Self {
        let settings_store = FileSettingsStore::new(&config.settings.path);
        log::debug!(
            "Using settings store at {}",
            settings_store.path().display()
        );
        let navigator = CommandNavigator::new(
            config.permission.clone(),
            &config.settings.path.to_string_lossy(),
        );
        DependencyProvider::new(settings_store, HeadlessWindow::new(), navigator)
    }
}

impl DependencyProvider<MockSettingsStore, MockWindow, MockNavigator> {
    /// In-memory capabilities, for tests and dry runs
    pub fn make_mock() -> Self {
        DependencyProvider::new(
            MockSettingsStore::new(Some(MOCK_INITIAL_BRIGHTNESS)),
            MockWindow::new(WindowAttributes::default()),
            MockNavigator::new(),
        )
    }
}
