use std::path::{Path, PathBuf};

use historyx_api::{EntrySource, HistoryError};
use tokio::{
    fs,
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, error, info, warn};

use crate::{
    file::{FORMAT_VERSION, HistoryFileStorage},
    index::PunishmentIndex,
};

/// JSON-file punishment store. Every mutation is written through to disk.
#[derive(Debug)]
pub struct FileHistoryStore {
    pub(super) path: PathBuf,
    pub(super) index: PunishmentIndex,
    pub(super) file_lock: Mutex<()>,
}

impl FileHistoryStore {
    /// Opens the history file at `path`, creating it (and its parent
    /// directories) when missing.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            Self::create_directory(parent).await?;
        }

        let storage = Self {
            path,
            index: PunishmentIndex::new(),
            file_lock: Mutex::new(()),
        };

        if storage.path.exists() {
            storage.load_from_file().await?;
        } else {
            storage.save_to_file().await?;
        }

        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn create_directory(path: &Path) -> Result<(), HistoryError> {
        fs::create_dir_all(path).await.map_err(|e| {
            error!("Failed to create directories {}: {}", path.display(), e);
            HistoryError::Io(e)
        })
    }

    async fn load_from_file(&self) -> Result<(), HistoryError> {
        debug!("Loading punishment history from file: {}", self.path.display());

        let _guard = self.file_lock.lock().await;
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            error!("Failed to read history file {}: {}", self.path.display(), e);
            HistoryError::Io(e)
        })?;

        let data: HistoryFileStorage = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse history file {}: {}", self.path.display(), e);
            HistoryError::Serialization(e.to_string())
        })?;

        if data.format_version != FORMAT_VERSION {
            warn!(
                log_type = "punishment_history",
                "History file {} has format version {}, expected {}",
                self.path.display(),
                data.format_version,
                FORMAT_VERSION
            );
        }

        for punishment in data.punishments {
            let id = punishment.id;
            if let Err(e) = punishment.to_entry(EntrySource::Custom) {
                warn!(
                    log_type = "punishment_history",
                    "Skipping punishment {} from {}: {}",
                    id,
                    self.path.display(),
                    e
                );
                continue;
            }

            if let Err(e) = self.index.insert(punishment) {
                warn!(
                    log_type = "punishment_history",
                    "Skipping punishment {} from {}: {}",
                    id,
                    self.path.display(),
                    e
                );
            }
        }

        info!(
            log_type = "punishment_history",
            "Loaded {} punishments from {}",
            self.index.count(),
            self.path.display()
        );
        Ok(())
    }

    async fn save_to_file(&self) -> Result<(), HistoryError> {
        let guard = self.file_lock.lock().await;
        self.write_snapshot(&guard).await
    }

    /// Writes the current index to disk. Callers hold `file_lock` for the
    /// whole mutate, save and rollback sequence.
    pub(super) async fn write_snapshot(
        &self,
        _guard: &MutexGuard<'_, ()>,
    ) -> Result<(), HistoryError> {
        let data = HistoryFileStorage {
            punishments: self.index.all().iter().map(|p| (**p).clone()).collect(),
            ..Default::default()
        };

        let content = serde_json::to_string_pretty(&data).map_err(|e| {
            error!("Failed to serialize punishment history: {}", e);
            HistoryError::Serialization(e.to_string())
        })?;

        let temp_path = self.path.with_extension("tmp");

        fs::write(&temp_path, content).await.map_err(|e| {
            error!(
                "Failed to write temporary file for {}: {}",
                self.path.display(),
                e
            );
            HistoryError::Io(e)
        })?;

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            error!(
                "Failed to rename temporary file for {}: {}",
                self.path.display(),
                e
            );
            HistoryError::Io(e)
        })?;

        debug!(
            log_type = "punishment_history",
            "Saved {} punishments to {}",
            data.punishments.len(),
            self.path.display()
        );
        Ok(())
    }
}
