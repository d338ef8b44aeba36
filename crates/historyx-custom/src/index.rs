//! Concurrent lookup tables for punishment records

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use historyx_api::HistoryError;

use crate::CustomPunishment;

/// Thread-safe index of punishments by id and by targeted account.
#[derive(Clone, Debug, Default)]
pub struct PunishmentIndex {
    by_id: Arc<DashMap<i64, Arc<CustomPunishment>>>,
    // ids per lowercase account uuid, in insertion order
    by_account: Arc<DashMap<String, Vec<i64>>>,
}

fn account_key(uuid: &str) -> String {
    uuid.to_ascii_lowercase()
}

impl PunishmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, punishment: CustomPunishment) -> Result<(), HistoryError> {
        let id = punishment.id;
        let account = punishment.uuid.as_deref().map(account_key);

        match self.by_id.entry(id) {
            Entry::Occupied(_) => return Err(HistoryError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(punishment));
            }
        }

        if let Some(account) = account {
            self.by_account.entry(account).or_default().push(id);
        }

        Ok(())
    }

    pub fn remove(&self, id: i64) -> Option<Arc<CustomPunishment>> {
        let (_, punishment) = self.by_id.remove(&id)?;

        if let Some(uuid) = &punishment.uuid {
            let key = account_key(uuid);
            if let Some(mut ids) = self.by_account.get_mut(&key) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    drop(ids);
                    self.by_account.remove(&key);
                }
            }
        }

        Some(punishment)
    }

    /// Applies `update` to a copy of the record and swaps it in.
    ///
    /// The targeted account must not change; the account index is not rebuilt.
    pub fn update<F>(&self, id: i64, update: F) -> Result<Arc<CustomPunishment>, HistoryError>
    where
        F: FnOnce(&mut CustomPunishment),
    {
        let mut slot = self.by_id.get_mut(&id).ok_or(HistoryError::NotFound)?;

        let mut punishment = (**slot).clone();
        update(&mut punishment);
        let updated = Arc::new(punishment);
        *slot = updated.clone();

        Ok(updated)
    }

    pub fn get(&self, id: i64) -> Option<Arc<CustomPunishment>> {
        self.by_id.get(&id).map(|v| v.clone())
    }

    pub fn for_account(&self, uuid: &str) -> Vec<Arc<CustomPunishment>> {
        // clone the id list so no shard lock is held while reading by_id
        let ids = match self.by_account.get(&account_key(uuid)) {
            Some(ids) => ids.value().clone(),
            None => return Vec::new(),
        };

        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }

    /// Every record, ordered by id.
    pub fn all(&self) -> Vec<Arc<CustomPunishment>> {
        let mut punishments: Vec<_> = self.by_id.iter().map(|v| v.value().clone()).collect();
        punishments.sort_by_key(|p| p.id);
        punishments
    }

    pub fn count(&self) -> usize {
        self.by_id.len()
    }
}
