//! Where a punishment entry came from and what kind of punishment it is.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::HistoryError;

/// The punishment plugin that produced an entry.
///
/// The source decides how an entry's status is interpreted: LiteBans keeps
/// its `active` column set after natural expiry, while AdvancedBans clears it
/// on both expiry and removal and tracks expiry separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    LiteBans,
    AdvancedBans,
    LibertyBans,
    Custom,
}

impl EntrySource {
    pub const ALL: [EntrySource; 4] = [
        EntrySource::LiteBans,
        EntrySource::AdvancedBans,
        EntrySource::LibertyBans,
        EntrySource::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::LiteBans => "litebans",
            EntrySource::AdvancedBans => "advancedbans",
            EntrySource::LibertyBans => "libertybans",
            EntrySource::Custom => "custom",
        }
    }

    /// Whether the source's raw active flag alone answers "was this removed".
    pub fn trusts_active_flag(&self) -> bool {
        matches!(self, EntrySource::AdvancedBans)
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntrySource {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntrySource::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HistoryError::UnknownSource(s.to_string()))
    }
}

/// Kind of punishment. Plugins are free to invent their own tags, which are
/// kept verbatim in [`PunishmentType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PunishmentType {
    Ban,
    Mute,
    Kick,
    Warn,
    Other(String),
}

impl PunishmentType {
    pub fn as_str(&self) -> &str {
        match self {
            PunishmentType::Ban => "ban",
            PunishmentType::Mute => "mute",
            PunishmentType::Kick => "kick",
            PunishmentType::Warn => "warn",
            PunishmentType::Other(tag) => tag,
        }
    }
}

impl From<&str> for PunishmentType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ban" => PunishmentType::Ban,
            "mute" => PunishmentType::Mute,
            "kick" => PunishmentType::Kick,
            "warn" | "warning" => PunishmentType::Warn,
            _ => PunishmentType::Other(tag.to_string()),
        }
    }
}

impl From<String> for PunishmentType {
    fn from(tag: String) -> Self {
        PunishmentType::from(tag.as_str())
    }
}

impl From<PunishmentType> for String {
    fn from(kind: PunishmentType) -> Self {
        match kind {
            PunishmentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PunishmentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PunishmentType::from(s))
    }
}

impl fmt::Display for PunishmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_case_insensitive() {
        assert_eq!("LiteBans".parse::<EntrySource>().unwrap(), EntrySource::LiteBans);
        assert_eq!(
            "ADVANCEDBANS".parse::<EntrySource>().unwrap(),
            EntrySource::AdvancedBans
        );
        assert_eq!(" custom ".parse::<EntrySource>().unwrap(), EntrySource::Custom);
    }

    #[test]
    fn test_source_parse_unknown() {
        let err = "essentials".parse::<EntrySource>().unwrap_err();
        assert!(matches!(err, HistoryError::UnknownSource(ref s) if s == "essentials"));
    }

    #[test]
    fn test_only_advancedbans_trusts_active_flag() {
        for source in EntrySource::ALL {
            assert_eq!(
                source.trusts_active_flag(),
                source == EntrySource::AdvancedBans
            );
        }
    }

    #[test]
    fn test_punishment_type_known_and_other() {
        assert_eq!(PunishmentType::from("BAN"), PunishmentType::Ban);
        assert_eq!(PunishmentType::from("Warning"), PunishmentType::Warn);
        assert_eq!(
            PunishmentType::from("TEMPBAN"),
            PunishmentType::Other("TEMPBAN".to_string())
        );
        assert_eq!(PunishmentType::from("TEMPBAN").to_string(), "TEMPBAN");
        assert_eq!(PunishmentType::Mute.to_string(), "mute");
    }
}
