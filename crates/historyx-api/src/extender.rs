//! Extension point for punishment plugins.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{EntrySource, HistoryError, PunishmentEntry};

/// Adapter that exposes one punishment plugin's records as [`PunishmentEntry`]
/// values. `P` is the plugin's native punishment record.
#[async_trait]
pub trait HistorySource<P>: Send + Sync + Debug {
    /// Every known punishment for `player`, in whatever order the plugin keeps
    /// them. A player without history yields an empty list; `Err` is reserved
    /// for failures reading the plugin's data.
    async fn get_history(&self, player: &Uuid) -> Result<Vec<PunishmentEntry>, HistoryError>;

    /// Maps a native record to an entry. Must not perform I/O.
    fn create_entry(
        &self,
        punishment: &P,
        source: EntrySource,
    ) -> Result<PunishmentEntry, HistoryError>;
}
