//! History statistics and the newest-first ordering used for history views.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::PunishmentEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatistics {
    pub total: usize,
    pub in_effect: usize,
    pub removed: usize,
    pub expired: usize,
    pub permanent: usize,
    pub temporary: usize,
    pub ip: usize,
}

impl HistoryStatistics {
    pub fn collect(entries: &[PunishmentEntry], now_millis: i64) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            if entry.is_in_effect_at(now_millis) {
                stats.in_effect += 1;
            }

            let removed = entry.was_removed();
            if removed {
                stats.removed += 1;
            }

            if entry.is_permanent() {
                stats.permanent += 1;
            } else {
                stats.temporary += 1;
                if !removed && entry.end_millis() <= now_millis {
                    stats.expired += 1;
                }
            }

            if entry.is_ip_punishment() {
                stats.ip += 1;
            }
        }

        stats
    }
}

/// Newest first by start time, ties broken by descending id.
pub fn sort_newest_first(entries: &mut [PunishmentEntry]) {
    entries.sort_by_key(|entry| Reverse((entry.start_millis(), entry.id())));
}
