//! Persisted user preferences (currently just the enabled flag).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Preferences backed by an optional JSON file.
pub struct PrefsStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PrefsStore {
    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            prefs: Preferences::default(),
        }
    }

    /// Open from file, returning defaults if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let prefs = match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), enabled = prefs.enabled, "preferences loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            prefs,
        })
    }

    pub fn get(&self) -> Preferences {
        self.prefs
    }

    pub fn enabled(&self) -> bool {
        self.prefs.enabled
    }

    /// Update the flag and persist it. If saving fails the previous value
    /// is restored.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), EngineError> {
        let previous = self.prefs;
        self.prefs.enabled = enabled;
        if let Err(e) = self.save() {
            self.prefs = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Atomic write: write to .tmp then rename.
    fn save(&self) -> Result<(), EngineError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(&self.prefs)?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::open(&dir.path().join("prefs.json")).unwrap();
        assert!(store.enabled());
    }

    #[test]
    fn set_enabled_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let mut store = PrefsStore::open(&path).unwrap();
        store.set_enabled(false).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let reopened = PrefsStore::open(&path).unwrap();
        assert_eq!(reopened.get(), Preferences { enabled: false });
    }

    #[test]
    fn empty_object_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{}").unwrap();
        assert!(PrefsStore::open(&path).unwrap().enabled());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "enabled = yes").unwrap();
        assert!(matches!(
            PrefsStore::open(&path),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn failed_save_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("prefs.json");
        let mut store = PrefsStore::open(&path).unwrap();
        fs::write(dir.path().join("sub"), "not a directory").unwrap();

        assert!(matches!(store.set_enabled(false), Err(EngineError::Io(_))));
        assert!(store.enabled());
        assert!(!path.exists());
    }

    #[test]
    fn in_memory_store_does_not_write() {
        let mut store = PrefsStore::in_memory();
        store.set_enabled(false).unwrap();
        assert!(!store.enabled());
    }
}
