use directories::BaseDirs;
use mushaf_model::Settings;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "quran-unix";
const SETTINGS_FILE_NAME: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve the user configuration directory")]
    NoConfigDirectory,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// `~/.config/quran-unix` on Linux, the platform equivalent elsewhere.
    pub fn from_default_location() -> Result<Self, StorageError> {
        let base = BaseDirs::new().ok_or(StorageError::NoConfigDirectory)?;

        Ok(Self { dir: base.config_dir().join(APP_DIR_NAME) })
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// An explicit directory wins over the platform default.
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self, StorageError> {
        match dir {
            Some(dir) => Ok(Self::with_dir(dir)),
            None => Self::from_default_location(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    /// Missing file means defaults; unreadable or malformed content is an error.
    pub fn load(&self) -> Result<Settings, StorageError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }

        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %self.settings_path().display(), "ignoring settings file: {err}");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec(settings)?;
        fs::write(self.settings_path(), bytes)?;
        Ok(())
    }

    /// Saves, logging instead of returning a failure.
    pub fn save_best_effort(&self, settings: &Settings) {
        if let Err(err) = self.save(settings) {
            tracing::warn!(path = %self.settings_path().display(), "could not save settings: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SettingsStore::with_dir(temp.path().join("nested"));

        let settings = Settings { last_page: 292, dark_mode: true };
        store.save(&settings).expect("save should succeed");

        assert_eq!(store.load().expect("load should succeed"), settings);
    }

    #[test]
    fn writes_flat_schema() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SettingsStore::with_dir(temp.path());

        store.save(&Settings { last_page: 5, dark_mode: true }).expect("save should succeed");
        let written = fs::read_to_string(store.settings_path()).expect("file should exist");

        assert_eq!(written, r#"{"last_page":5,"dark_mode":true}"#);
    }

    #[test]
    fn load_defaults_when_file_absent() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SettingsStore::with_dir(temp.path());

        assert_eq!(store.load().expect("load should succeed"), Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error_but_falls_back() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SettingsStore::with_dir(temp.path());
        fs::write(store.settings_path(), "{not json").expect("write fixture");

        assert!(matches!(store.load(), Err(StorageError::Serde(_))));
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn wrong_value_type_falls_back() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let store = SettingsStore::with_dir(temp.path());
        fs::write(store.settings_path(), r#"{"last_page": -3, "dark_mode": true}"#)
            .expect("write fixture");

        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn unwritable_location_is_swallowed() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let blocker = temp.path().join("file");
        fs::write(&blocker, b"").expect("write fixture");

        let store = SettingsStore::with_dir(blocker.join("sub"));
        assert!(store.save(&Settings::default()).is_err());
        store.save_best_effort(&Settings::default());
    }

    #[test]
    fn explicit_dir_wins() {
        let store = SettingsStore::resolve(Some(PathBuf::from("/tmp/qu"))).expect("resolve");
        assert_eq!(store.settings_path(), PathBuf::from("/tmp/qu/config.json"));
    }
}
