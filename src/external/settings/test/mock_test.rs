use super::super::mock::MockSettingsStore;
use crate::external::settings::{
    BrightnessMode, SettingsError, SettingsStore, SCREEN_BRIGHTNESS,
};

#[test]
fn test_setting_and_getting() {
    let store = MockSettingsStore::new(Some(100));
    assert_eq!(store.get_int(SCREEN_BRIGHTNESS).unwrap(), 100);
    store.put_int(SCREEN_BRIGHTNESS, 45).unwrap();
    assert_eq!(store.get_int(SCREEN_BRIGHTNESS).unwrap(), 45);
    store.set_brightness_mode(BrightnessMode::Automatic).unwrap();
    assert_eq!(
        store.get_brightness_mode().unwrap(),
        BrightnessMode::Automatic
    );
    assert_eq!(store.write_count(), 2);
}

#[test]
fn test_permission() {
    let store = MockSettingsStore::new(None);
    assert!(store.can_write());
    store.set_write_permission(false);
    assert!(!store.can_write());
    assert!(matches!(
        store.put_int(SCREEN_BRIGHTNESS, 10),
        Err(SettingsError::PermissionDenied)
    ));
    assert_eq!(store.value(SCREEN_BRIGHTNESS), None);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_errors() {
    let store = MockSettingsStore::new(Some(100));
    store.set_failure_mode(true);
    assert!(store.get_int(SCREEN_BRIGHTNESS).is_err());
    assert!(store.put_int(SCREEN_BRIGHTNESS, 42).is_err());
    assert_eq!(store.value(SCREEN_BRIGHTNESS), Some(100));
}
