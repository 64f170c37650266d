use std::path::{Path, PathBuf};

use crate::errors::{CoreError, PersistenceError};
use crate::models::holding::Holding;
use crate::models::settings::Settings;

use super::format::{self, DEFAULT_KEY};
use super::traits::PersistenceAdapter;

/// Durable slot on disk: `<dir>/<key>.json` (native only).
///
/// Saves go through a sibling `.tmp` file and a rename, so a crash mid-write
/// leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    key: String,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, DEFAULT_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Slot that default settings resolve to, if the platform has a data dir.
    pub fn default_location() -> Option<Self> {
        Self::from_settings(&Settings::default()).ok()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        let dir = settings.resolved_data_dir().ok_or_else(|| {
            CoreError::Config("No data directory configured and none available on this platform".into())
        })?;
        Ok(Self::with_key(dir, settings.storage_key.clone()))
    }

    /// Full path of the slot file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PersistenceAdapter for FileStorage {
    fn save(&self, holdings: &[Holding]) -> Result<(), PersistenceError> {
        let text = format::encode(holdings)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, self.path())?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Holding>, PersistenceError> {
        let text = std::fs::read_to_string(self.path())?;
        format::decode(&text)
    }
}
