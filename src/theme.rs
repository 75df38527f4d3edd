//! Theme Store
//!
//! Persists the single theme preference across restarts, the service-side
//! analogue of the browser's one local-storage key per dashboard variant.
//! The stored value is one bare identifier in a small file under the user
//! data directory.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Theme persistence errors
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme: {0}")]
    Unknown(String),

    #[error("failed to persist theme to {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// Reads and writes the persisted theme preference
pub struct ThemeStore {
    path: PathBuf,
    default: String,
    available: Vec<String>,
}

impl ThemeStore {
    pub fn new(
        path: impl Into<PathBuf>,
        default: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        Self {
            path: path.into(),
            default: default.into(),
            available,
        }
    }

    /// Default storage location under the user data dir
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daydash")
            .join("theme")
    }

    /// Themes the deployment enumerates
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Load the persisted theme, falling back to the configured default
    /// when the file is absent, empty, or holds an unknown identifier.
    /// The fallback is written back so the store holds the applied theme
    /// after first use.
    pub fn load(&self) -> String {
        if let Ok(raw) = std::fs::read_to_string(&self.path) {
            let name = raw.trim();
            if !name.is_empty() && self.is_known(name) {
                return name.to_string();
            }
        }

        if let Err(e) = self.save(&self.default) {
            tracing::debug!(theme = %self.default, error = %e, "could not persist default theme");
        }
        self.default.clone()
    }

    /// Persist a theme choice. Unknown identifiers are rejected.
    pub fn save(&self, name: &str) -> Result<(), ThemeError> {
        if !self.is_known(name) {
            return Err(ThemeError::Unknown(name.to_string()));
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }
        std::fs::write(&self.path, name).map_err(|e| self.io_error(&self.path, e))?;

        tracing::debug!(theme = %name, path = ?self.path, "Theme persisted");
        Ok(())
    }

    fn is_known(&self, name: &str) -> bool {
        self.available.iter().any(|t| t == name)
    }

    fn io_error(&self, path: &Path, error: std::io::Error) -> ThemeError {
        ThemeError::Io {
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &Path) -> ThemeStore {
        ThemeStore::new(
            dir.join("theme"),
            "floral",
            vec!["floral".into(), "ocean".into(), "midnight".into()],
        )
    }

    #[test]
    fn load_falls_back_to_default_when_missing() {
        let dir = tempdir().unwrap();
        assert_eq!(store(dir.path()).load(), "floral");
    }

    #[test]
    fn load_falls_back_when_file_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("theme"), "  \n").unwrap();
        assert_eq!(store(dir.path()).load(), "floral");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        store.save("midnight").unwrap();
        assert_eq!(store.load(), "midnight");
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        let err = store.save("neon").unwrap_err();
        assert!(matches!(err, ThemeError::Unknown(name) if name == "neon"));
        assert_eq!(store.load(), "floral");
    }

    #[test]
    fn unknown_persisted_value_falls_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("theme"), "neon").unwrap();
        assert_eq!(store(dir.path()).load(), "floral");
    }

    #[test]
    fn load_with_empty_storage_persists_the_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme");

        assert_eq!(store(dir.path()).load(), "floral");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "floral");
    }

    #[test]
    fn load_rewrites_an_unknown_persisted_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "neon").unwrap();

        store(dir.path()).load();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "floral");
    }
}
