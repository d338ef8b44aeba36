use serde::{Deserialize, Serialize};

use crate::CustomPunishment;

pub mod adapter;
pub mod history_storage;

pub const FORMAT_VERSION: u8 = 1;

/// History file storage format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryFileStorage {
    format_version: u8,
    punishments: Vec<CustomPunishment>,
}

impl Default for HistoryFileStorage {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            punishments: Vec::new(),
        }
    }
}
