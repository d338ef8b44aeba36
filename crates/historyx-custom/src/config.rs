use historyx_api::EntrySource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomHistoryConfig {
    pub storage_type: HistoryStorageType,

    pub file_path: Option<String>,

    /// Source tag stamped on every entry this store produces. Lets a custom
    /// store hold records imported from one of the supported plugins.
    pub source: EntrySource,
}

impl Default for CustomHistoryConfig {
    fn default() -> Self {
        Self {
            storage_type: HistoryStorageType::File,
            file_path: Some("history.json".to_string()),
            source: EntrySource::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStorageType {
    Memory,
    File,
}
