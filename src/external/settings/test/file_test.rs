use super::super::file::{write_error, FileSettingsStore};
use crate::external::settings::{
    BrightnessMode, SettingsError, SettingsStore, SCREEN_BRIGHTNESS, SCREEN_BRIGHTNESS_MODE,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "brightness-bridge-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Couldn't create scratch directory");
    dir
}

#[test]
fn test_values_persist() {
    let dir = scratch_dir("persist");
    let path = dir.join("settings.toml");
    let store = FileSettingsStore::new(&path);
    assert!(store.can_write());
    store.put_int(SCREEN_BRIGHTNESS, 200).unwrap();
    store.set_brightness_mode(BrightnessMode::Manual).unwrap();

    let reopened = FileSettingsStore::new(&path);
    assert_eq!(reopened.get_int(SCREEN_BRIGHTNESS).unwrap(), 200);
    assert_eq!(
        reopened.get_brightness_mode().unwrap(),
        BrightnessMode::Manual
    );
    reopened.put_int(SCREEN_BRIGHTNESS, 3).unwrap();
    assert_eq!(store.get_int(SCREEN_BRIGHTNESS).unwrap(), 3);
    assert_eq!(store.get_int(SCREEN_BRIGHTNESS_MODE).unwrap(), 0);
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_missing_setting() {
    let dir = scratch_dir("missing");
    let store = FileSettingsStore::new(dir.join("settings.toml"));
    match store.get_int(SCREEN_BRIGHTNESS) {
        Err(SettingsError::NotFound(key)) => assert_eq!(key, SCREEN_BRIGHTNESS),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    store.put_int(SCREEN_BRIGHTNESS_MODE, 1).unwrap();
    store
        .get_int(SCREEN_BRIGHTNESS)
        .expect_err("Brightness appeared out of nowhere");
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_corrupted_file() {
    let dir = scratch_dir("corrupted");
    let path = dir.join("settings.toml");
    fs::write(&path, "screen_brightness = \"bright\"").unwrap();
    let store = FileSettingsStore::new(&path);
    assert!(matches!(
        store.get_int(SCREEN_BRIGHTNESS),
        Err(SettingsError::Parse(_))
    ));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_invalid_mode() {
    let dir = scratch_dir("invalid-mode");
    let store = FileSettingsStore::new(dir.join("settings.toml"));
    store.put_int(SCREEN_BRIGHTNESS_MODE, 7).unwrap();
    assert!(matches!(
        store.get_brightness_mode(),
        Err(SettingsError::InvalidValue { value: 7, .. })
    ));
    fs::remove_dir_all(dir).unwrap();
}

/// Whether this process may actually write `path`, whatever its mode bits say
fn writable_by_us(path: &Path) -> bool {
    fs::OpenOptions::new().append(true).open(path).is_ok()
}

#[test]
fn test_read_only_store() {
    let dir = scratch_dir("read-only");
    let path = dir.join("settings.toml");
    fs::write(&path, "screen_brightness = 128\n").unwrap();
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions.clone()).unwrap();

    // Mode bits alone don't decide, root writes read-only files just fine
    let store = FileSettingsStore::new(&path);
    let writable = writable_by_us(&path);
    assert_eq!(store.can_write(), writable);
    if writable {
        store.put_int(SCREEN_BRIGHTNESS, 10).unwrap();
        assert_eq!(store.get_int(SCREEN_BRIGHTNESS).unwrap(), 10);
    } else {
        assert!(matches!(
            store.put_int(SCREEN_BRIGHTNESS, 10),
            Err(SettingsError::PermissionDenied)
        ));
        assert_eq!(store.get_int(SCREEN_BRIGHTNESS).unwrap(), 128);
    }

    permissions.set_readonly(false);
    fs::set_permissions(&path, permissions).unwrap();
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_read_only_directory() {
    let dir = scratch_dir("read-only-dir");
    let store_dir = dir.join("store");
    fs::create_dir(&store_dir).unwrap();
    let mut permissions = fs::metadata(&store_dir).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&store_dir, permissions.clone()).unwrap();

    let store = FileSettingsStore::new(store_dir.join("settings.toml"));
    let writable = fs::File::create(store_dir.join("check")).is_ok();
    let _ = fs::remove_file(store_dir.join("check"));
    assert_eq!(store.can_write(), writable);
    if !writable {
        assert!(matches!(
            store.put_int(SCREEN_BRIGHTNESS, 10),
            Err(SettingsError::PermissionDenied)
        ));
    }
    // The access check leaves nothing behind
    assert_eq!(fs::read_dir(&store_dir).unwrap().count(), 0);

    permissions.set_readonly(false);
    fs::set_permissions(&store_dir, permissions).unwrap();
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_permission_checked_by_access() {
    let dir = scratch_dir("access");
    let path = dir.join("settings.toml");
    fs::write(&path, "screen_brightness = 40\n").unwrap();
    let store = FileSettingsStore::new(&path);
    assert!(store.can_write());
    // Checking doesn't touch the contents
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "screen_brightness = 40\n"
    );
    assert!(!FileSettingsStore::new(dir.join("missing").join("settings.toml")).can_write());
    assert!(!FileSettingsStore::new(&dir).can_write());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_refused_write_is_permission_error() {
    assert!(matches!(
        write_error(io::Error::from(io::ErrorKind::PermissionDenied)),
        SettingsError::PermissionDenied
    ));
    assert!(matches!(
        write_error(io::Error::from(io::ErrorKind::Other)),
        SettingsError::Io(_)
    ));
}
