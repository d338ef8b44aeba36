use async_trait::async_trait;
use historyx_api::{EntrySource, HistoryError, Removal};
use tracing::debug;
use uuid::Uuid;

use crate::{CustomPunishment, PunishmentStore, index::PunishmentIndex};

/// Non-persistent punishment store, mostly useful for tests and for
/// short-lived imports.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    index: PunishmentIndex,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PunishmentStore for MemoryHistoryStore {
    async fn add_punishment(&self, punishment: CustomPunishment) -> Result<(), HistoryError> {
        punishment.to_entry(EntrySource::Custom)?;
        debug!(
            log_type = "punishment_history",
            "Adding punishment {} to memory store", punishment.id
        );
        self.index.insert(punishment)
    }

    async fn record_removal(
        &self,
        id: i64,
        removal: Removal,
    ) -> Result<CustomPunishment, HistoryError> {
        debug!(
            log_type = "punishment_history",
            "Recording removal of punishment {}", id
        );
        let updated = self.index.update(id, |p| p.apply_removal(removal))?;
        Ok((*updated).clone())
    }

    async fn get_punishment(&self, id: i64) -> Result<CustomPunishment, HistoryError> {
        match self.index.get(id) {
            Some(punishment) => Ok((*punishment).clone()),
            None => Err(HistoryError::NotFound),
        }
    }

    async fn get_punishments_for(
        &self,
        player: &Uuid,
    ) -> Result<Vec<CustomPunishment>, HistoryError> {
        let punishments = self.index.for_account(&player.to_string());
        Ok(punishments.into_iter().map(|p| (*p).clone()).collect())
    }

    async fn count(&self) -> Result<usize, HistoryError> {
        Ok(self.index.count())
    }
}
