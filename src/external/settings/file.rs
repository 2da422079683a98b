use super::{SettingsError, SettingsStore};
use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

type SettingsTable = BTreeMap<String, i64>;

/// A [SettingsStore] persisted as a flat TOML table of integers.
///
/// Write permission is whatever the filesystem lets this process do: the
/// file has to be openable for writing or, before it exists, a file has to be
/// creatable next to it. The file is rewritten as a whole on every write.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// A store kept in the file at `path`, created on first write
    pub fn new(path: impl Into<PathBuf>) -> FileSettingsStore {
        FileSettingsStore { path: path.into() }
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<SettingsTable, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SettingsTable::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Creates and removes a scratch file beside the store, the only portable
    /// way of asking whether the directory accepts new files from us.
    fn can_create_file(&self) -> bool {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let check_path = self
            .parent_dir()
            .join(format!(".{}.{}.access", name, std::process::id()));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&check_path)
        {
            Ok(_) => {
                if let Err(e) = fs::remove_file(&check_path) {
                    log::warn!("Couldn't remove {}: {}", check_path.display(), e);
                }
                true
            }
            Err(_) => false,
        }
    }
}

/// Refused writes mean missing permission, not a broken store.
pub(super) fn write_error(e: io::Error) -> SettingsError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        SettingsError::PermissionDenied
    } else {
        SettingsError::Io(e)
    }
}

impl SettingsStore for FileSettingsStore {
    fn get_int(&self, key: &str) -> Result<i64, SettingsError> {
        self.read_table()?
            .get(key)
            .copied()
            .ok_or_else(|| SettingsError::NotFound(key.to_owned()))
    }

    fn put_int(&self, key: &str, value: i64) -> Result<(), SettingsError> {
        if !self.can_write() {
            return Err(SettingsError::PermissionDenied);
        }
        let mut table = self.read_table()?;
        table.insert(key.to_owned(), value);
        fs::write(&self.path, toml::to_string(&table)?).map_err(write_error)?;
        log::trace!("Wrote {} = {} to {}", key, value, self.path.display());
        Ok(())
    }

    fn can_write(&self) -> bool {
        // Appending to nothing leaves the file as it is
        match OpenOptions::new().append(true).open(&self.path) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.can_create_file(),
            Err(_) => false,
        }
    }
}
