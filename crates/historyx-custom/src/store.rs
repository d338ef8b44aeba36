//! Storage trait shared by the custom history backends

use std::fmt::Debug;

use async_trait::async_trait;
use historyx_api::{HistoryError, Removal};
use uuid::Uuid;

use crate::CustomPunishment;

#[async_trait]
pub trait PunishmentStore: Send + Sync + Debug {
    /// Fails with [`HistoryError::AlreadyExists`] on a duplicate id and with
    /// [`HistoryError::InvalidEntry`] when the record targets nothing.
    async fn add_punishment(&self, punishment: CustomPunishment) -> Result<(), HistoryError>;

    /// Records a moderator lifting a punishment and returns the updated row.
    async fn record_removal(
        &self,
        id: i64,
        removal: Removal,
    ) -> Result<CustomPunishment, HistoryError>;

    async fn get_punishment(&self, id: i64) -> Result<CustomPunishment, HistoryError>;

    /// Rows targeting `player`, oldest insertion first.
    async fn get_punishments_for(
        &self,
        player: &Uuid,
    ) -> Result<Vec<CustomPunishment>, HistoryError>;

    async fn count(&self) -> Result<usize, HistoryError>;
}
