//! Punishment history model shared by every HistoryX source adapter.
//!
//! A [`PunishmentEntry`] is one historical punishment pulled from a ban
//! plugin. Adapters implement [`HistorySource`] for the plugin's native record
//! type and tag every entry with the [`EntrySource`] it came from, which
//! selects how the entry's status is read.

use thiserror::Error;

pub mod entry;
pub mod extender;
pub mod format;
pub mod source;
pub mod stats;

pub use entry::{PunishmentEntry, PunishmentEntryBuilder, Removal};
pub use extender::HistorySource;
pub use source::{EntrySource, PunishmentType};
pub use stats::{HistoryStatistics, sort_newest_first};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid punishment entry: {0}")]
    InvalidEntry(String),

    #[error("Unknown entry source: {0}")]
    UnknownSource(String),

    #[error("Punishment not found")]
    NotFound,

    #[error("Punishment already exists")]
    AlreadyExists,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Source error: {0}")]
    Source(String),
}
