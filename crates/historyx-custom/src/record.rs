use historyx_api::{EntrySource, HistoryError, PunishmentEntry, Removal};
use serde::{Deserialize, Serialize};

/// Punishment row as stored by the custom history backends.
///
/// Column names follow the layout most ban plugins share, so exports from
/// those plugins can be dropped into a history file as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPunishment {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: Option<String>,
    pub ip: Option<String>,
    #[serde(default)]
    pub reason: String,
    pub banned_by_uuid: Option<String>,
    pub banned_by_name: Option<String>,
    pub removed_by_uuid: Option<String>,
    pub removed_by_name: Option<String>,
    pub removed_by_reason: Option<String>,
    /// Creation time, epoch millis.
    pub time: i64,
    /// Expiry time, epoch millis. `<= 0` is permanent.
    #[serde(default)]
    pub until: i64,
    #[serde(default)]
    pub server_scope: String,
    #[serde(default)]
    pub server_origin: String,
    #[serde(default)]
    pub silent: bool,
    #[serde(default)]
    pub ipban: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub expired: bool,
}

fn default_active() -> bool {
    true
}

impl CustomPunishment {
    pub fn new(id: i64, kind: impl Into<String>, time: i64, until: i64) -> Self {
        Self {
            id,
            kind: kind.into(),
            uuid: None,
            ip: None,
            reason: String::new(),
            banned_by_uuid: None,
            banned_by_name: None,
            removed_by_uuid: None,
            removed_by_name: None,
            removed_by_reason: None,
            time,
            until,
            server_scope: String::new(),
            server_origin: String::new(),
            silent: false,
            ipban: false,
            active: true,
            expired: false,
        }
    }

    /// Length of a temporary punishment, `0` when permanent.
    pub fn duration(&self) -> Result<i64, HistoryError> {
        if self.until <= 0 {
            return Ok(0);
        }
        self.until.checked_sub(self.time).ok_or_else(|| {
            HistoryError::InvalidEntry(format!(
                "punishment {} has an out-of-range period ({} to {})",
                self.id, self.time, self.until
            ))
        })
    }

    pub fn removal(&self) -> Removal {
        Removal::new(
            self.removed_by_uuid.clone(),
            self.removed_by_name.clone(),
            self.removed_by_reason.clone(),
        )
    }

    /// Marks the row as lifted by a moderator.
    pub fn apply_removal(&mut self, removal: Removal) {
        self.removed_by_uuid = removal.removed_by_account;
        self.removed_by_name = removal.removed_by_name;
        self.removed_by_reason = removal.reason;
        self.active = false;
        self.expired = false;
    }

    pub fn to_entry(&self, source: EntrySource) -> Result<PunishmentEntry, HistoryError> {
        PunishmentEntry::builder(self.id, self.kind.as_str(), source)
            .target_account(self.uuid.clone())
            .target_ip(self.ip.clone())
            .reason(self.reason.clone())
            .executor(self.banned_by_uuid.clone(), self.banned_by_name.clone())
            .removal(self.removal())
            .period(self.time, self.until)
            .duration_millis(self.duration()?)
            .server(self.server_scope.clone(), self.server_origin.clone())
            .silent(self.silent)
            .ip_punishment(self.ipban)
            .active(self.active)
            .expired_by_plugin(self.expired)
            .build()
    }
}
