//! Custom punishment history sources backed by memory or a JSON file.

use std::sync::Arc;

use async_trait::async_trait;
use historyx_api::{EntrySource, HistoryError, HistorySource, PunishmentEntry, Removal};
use tracing::{info, warn};
use uuid::Uuid;

pub mod config;
pub mod file;
pub mod index;
pub mod memory;
pub mod record;
pub mod store;

pub use config::{CustomHistoryConfig, HistoryStorageType};
pub use file::history_storage::FileHistoryStore;
pub use memory::MemoryHistoryStore;
pub use record::CustomPunishment;
pub use store::PunishmentStore;

/// Custom history source with its backend chosen by configuration.
#[derive(Clone, Debug)]
pub struct CustomHistory {
    backend: Arc<dyn PunishmentStore>,
    source: EntrySource,
}

impl CustomHistory {
    pub async fn new(config: &CustomHistoryConfig) -> Result<Self, HistoryError> {
        let backend: Arc<dyn PunishmentStore> = match config.storage_type {
            HistoryStorageType::Memory => {
                info!("Initializing in-memory punishment history");
                warn!("In-memory punishment history is not persistent and will be lost on restart");
                Arc::new(MemoryHistoryStore::new())
            }
            HistoryStorageType::File => {
                let path = config
                    .file_path
                    .clone()
                    .unwrap_or_else(|| "history.json".to_string());

                info!("Initializing file-based punishment history at {}", path);
                Arc::new(FileHistoryStore::open(&path).await?)
            }
        };

        Ok(Self {
            backend,
            source: config.source,
        })
    }

    pub fn with_backend(backend: Arc<dyn PunishmentStore>, source: EntrySource) -> Self {
        Self { backend, source }
    }

    pub fn source(&self) -> EntrySource {
        self.source
    }
}

#[async_trait]
impl PunishmentStore for CustomHistory {
    async fn add_punishment(&self, punishment: CustomPunishment) -> Result<(), HistoryError> {
        self.backend.add_punishment(punishment).await
    }

    async fn record_removal(
        &self,
        id: i64,
        removal: Removal,
    ) -> Result<CustomPunishment, HistoryError> {
        self.backend.record_removal(id, removal).await
    }

    async fn get_punishment(&self, id: i64) -> Result<CustomPunishment, HistoryError> {
        self.backend.get_punishment(id).await
    }

    async fn get_punishments_for(
        &self,
        player: &Uuid,
    ) -> Result<Vec<CustomPunishment>, HistoryError> {
        self.backend.get_punishments_for(player).await
    }

    async fn count(&self) -> Result<usize, HistoryError> {
        self.backend.count().await
    }
}

#[async_trait]
impl HistorySource<CustomPunishment> for CustomHistory {
    async fn get_history(&self, player: &Uuid) -> Result<Vec<PunishmentEntry>, HistoryError> {
        self.backend
            .get_punishments_for(player)
            .await?
            .iter()
            .map(|punishment| self.create_entry(punishment, self.source))
            .collect()
    }

    fn create_entry(
        &self,
        punishment: &CustomPunishment,
        source: EntrySource,
    ) -> Result<PunishmentEntry, HistoryError> {
        punishment.to_entry(source)
    }
}
