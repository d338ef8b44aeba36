use async_trait::async_trait;
use historyx_api::{EntrySource, HistoryError, Removal};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{CustomPunishment, PunishmentStore};

use super::history_storage::FileHistoryStore;

#[async_trait]
impl PunishmentStore for FileHistoryStore {
    async fn add_punishment(&self, punishment: CustomPunishment) -> Result<(), HistoryError> {
        punishment.to_entry(EntrySource::Custom)?;

        let id = punishment.id;
        debug!(
            log_type = "punishment_history",
            "Adding punishment {} to {}",
            id,
            self.path.display()
        );

        let guard = self.file_lock.lock().await;
        self.index.insert(punishment)?;

        if let Err(e) = self.write_snapshot(&guard).await {
            warn!(
                log_type = "punishment_history",
                "Rolling back punishment {} after failed save", id
            );
            self.index.remove(id);
            return Err(e);
        }
        Ok(())
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

        let guard = self.file_lock.lock().await;
        let previous = self.index.get(id).ok_or(HistoryError::NotFound)?;
        let updated = self.index.update(id, |p| p.apply_removal(removal))?;

        if let Err(e) = self.write_snapshot(&guard).await {
            warn!(
                log_type = "punishment_history",
                "Rolling back removal of punishment {} after failed save", id
            );
            self.index.update(id, |p| *p = (*previous).clone())?;
            return Err(e);
        }
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
