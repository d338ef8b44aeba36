//! Punishment history entries and their derived status queries.

use serde::{Deserialize, Serialize};
use wildmatch::WildMatch;

use crate::{
    EntrySource, HistoryError, PunishmentType,
    format::{current_millis, format_compact, format_date, format_date_in, format_digital},
};

/// Who reversed a punishment, and why.
///
/// Every field is optional because upstream plugins fill them in
/// inconsistently; some even store the literal text `"null"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub removed_by_account: Option<String>,
    pub removed_by_name: Option<String>,
    pub reason: Option<String>,
}

impl Removal {
    pub fn new(
        removed_by_account: Option<String>,
        removed_by_name: Option<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            removed_by_account,
            removed_by_name,
            reason,
        }
    }
}

/// A single punishment (ban, mute, kick, warn...) from a player's history.
///
/// Everything except the [`Removal`] is fixed at construction. Entries are
/// built through [`PunishmentEntry::builder`], which rejects entries that
/// target neither an account nor an IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PunishmentEntry {
    id: i64,
    punishment_type: PunishmentType,
    target_account: Option<String>,
    /// May contain `%` wildcard segments, e.g. `127.0.0.%`.
    target_ip: Option<String>,
    reason: String,
    executor_account: Option<String>,
    executor_name: Option<String>,
    start_millis: i64,
    /// `<= 0` means the punishment never expires.
    end_millis: i64,
    server_scope: String,
    server_origin: String,
    silent: bool,
    ip_punishment: bool,
    /// Unreliable for LiteBans, see [`PunishmentEntry::is_in_effect_at`].
    raw_active: bool,
    duration_millis: i64,
    source: EntrySource,
    removal: Removal,
    expired_by_plugin: bool,
}

impl PunishmentEntry {
    pub fn builder(
        id: i64,
        punishment_type: impl Into<PunishmentType>,
        source: EntrySource,
    ) -> PunishmentEntryBuilder {
        PunishmentEntryBuilder::new(id, punishment_type.into(), source)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn punishment_type(&self) -> &PunishmentType {
        &self.punishment_type
    }

    pub fn target_account(&self) -> Option<&str> {
        self.target_account.as_deref()
    }

    pub fn target_ip(&self) -> Option<&str> {
        self.target_ip.as_deref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn executor_account(&self) -> Option<&str> {
        self.executor_account.as_deref()
    }

    pub fn executor_name(&self) -> Option<&str> {
        self.executor_name.as_deref()
    }

    pub fn start_millis(&self) -> i64 {
        self.start_millis
    }

    pub fn end_millis(&self) -> i64 {
        self.end_millis
    }

    pub fn server_scope(&self) -> &str {
        &self.server_scope
    }

    pub fn server_origin(&self) -> &str {
        &self.server_origin
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_ip_punishment(&self) -> bool {
        self.ip_punishment
    }

    pub fn raw_active(&self) -> bool {
        self.raw_active
    }

    pub fn duration_millis(&self) -> i64 {
        self.duration_millis
    }

    pub fn source(&self) -> EntrySource {
        self.source
    }

    pub fn expired_by_plugin(&self) -> bool {
        self.expired_by_plugin
    }

    pub fn removal(&self) -> &Removal {
        &self.removal
    }

    pub fn removed_by_account(&self) -> Option<&str> {
        self.removal.removed_by_account.as_deref()
    }

    pub fn removed_by_name(&self) -> Option<&str> {
        self.removal.removed_by_name.as_deref()
    }

    pub fn removal_reason(&self) -> Option<&str> {
        self.removal.reason.as_deref()
    }

    /// Stores who reversed this punishment.
    pub fn record_removal(&mut self, removal: Removal) {
        self.removal = removal;
    }

    pub fn with_removal(mut self, removal: Removal) -> Self {
        self.record_removal(removal);
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.end_millis <= 0
    }

    /// Active flag combined with the expiry date. Only meaningful for
    /// LiteBans, which never clears `active` when a punishment runs out.
    pub fn is_currently_active_at(&self, now_millis: i64) -> bool {
        self.raw_active && (self.is_permanent() || self.end_millis > now_millis)
    }

    pub fn is_currently_active(&self) -> bool {
        self.is_currently_active_at(current_millis())
    }

    /// Whether the punishment is still in effect, using the check each
    /// source is reliable for.
    pub fn is_in_effect_at(&self, now_millis: i64) -> bool {
        match self.source {
            EntrySource::LiteBans => self.is_currently_active_at(now_millis),
            _ => self.raw_active,
        }
    }

    pub fn is_in_effect(&self) -> bool {
        self.is_in_effect_at(current_millis())
    }

    /// Whether a moderator reversed this punishment, as opposed to it
    /// expiring on its own.
    pub fn was_removed(&self) -> bool {
        if self.source.trusts_active_flag() {
            return !self.raw_active && !self.expired_by_plugin;
        }

        // Some sources write the literal "null" instead of leaving the column empty.
        match (&self.removal.removed_by_name, &self.removal.removed_by_account) {
            (Some(_), Some(account)) => !account.eq_ignore_ascii_case("null"),
            _ => false,
        }
    }

    pub fn duration_label(&self) -> String {
        if self.duration_millis <= 0 {
            return "Permanent".to_string();
        }
        format_compact(self.duration_millis)
    }

    /// Time left until expiry. Negative once expired and meaningless for
    /// permanent entries; check [`PunishmentEntry::is_permanent`] first.
    ///
    /// The subtraction wraps on overflow, so extreme end dates such as
    /// `i64::MIN` yield a garbage value instead of panicking.
    pub fn remaining_millis_at(&self, now_millis: i64) -> i64 {
        self.end_millis.wrapping_sub(now_millis)
    }

    pub fn remaining_millis(&self) -> i64 {
        self.remaining_millis_at(current_millis())
    }

    pub fn remaining_label_at(&self, now_millis: i64) -> String {
        format_compact(self.remaining_millis_at(now_millis))
    }

    pub fn remaining_label(&self) -> String {
        self.remaining_label_at(current_millis())
    }

    pub fn remaining_digital_label_at(&self, now_millis: i64) -> String {
        format_digital(self.remaining_millis_at(now_millis))
    }

    pub fn remaining_digital_label(&self) -> String {
        self.remaining_digital_label_at(current_millis())
    }

    /// Start date in the local time zone, e.g. `05/12/2020 12:34:56 (Dec 05)`.
    pub fn start_date_label(&self) -> String {
        format_date(self.start_millis)
    }

    pub fn end_date_label(&self) -> String {
        format_date(self.end_millis)
    }

    pub fn start_date_label_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format_date_in(self.start_millis, tz)
    }

    pub fn end_date_label_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format_date_in(self.end_millis, tz)
    }

    pub fn targets_account(&self, account: &str) -> bool {
        self.target_account
            .as_deref()
            .is_some_and(|target| target.eq_ignore_ascii_case(account))
    }

    /// Matches an address against the target IP.
    ///
    /// Targets use SQL `LIKE` wildcards: `%` matches any run of characters
    /// and `_` exactly one. A target holding `*` or `?` is compared verbatim.
    pub fn targets_ip(&self, ip: &str) -> bool {
        let Some(target) = self.target_ip.as_deref() else {
            return false;
        };

        if target.contains(['*', '?']) || !target.contains(['%', '_']) {
            return target == ip;
        }

        let pattern: String = target
            .chars()
            .map(|c| match c {
                '%' => '*',
                '_' => '?',
                other => other,
            })
            .collect();
        WildMatch::new(&pattern).matches(ip)
    }
}

/// Builder for [`PunishmentEntry`].
///
/// Entries from sources that track natural expiry separately (AdvancedBans)
/// should also call [`PunishmentEntryBuilder::expired_by_plugin`].
#[derive(Debug, Clone)]
pub struct PunishmentEntryBuilder {
    entry: PunishmentEntry,
}

impl PunishmentEntryBuilder {
    fn new(id: i64, punishment_type: PunishmentType, source: EntrySource) -> Self {
        Self {
            entry: PunishmentEntry {
                id,
                punishment_type,
                target_account: None,
                target_ip: None,
                reason: String::new(),
                executor_account: None,
                executor_name: None,
                start_millis: 0,
                end_millis: 0,
                server_scope: String::new(),
                server_origin: String::new(),
                silent: false,
                ip_punishment: false,
                raw_active: false,
                duration_millis: 0,
                source,
                removal: Removal::default(),
                expired_by_plugin: false,
            },
        }
    }

    pub fn target_account(mut self, account: Option<String>) -> Self {
        self.entry.target_account = account;
        self
    }

    pub fn target_ip(mut self, ip: Option<String>) -> Self {
        self.entry.target_ip = ip;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.entry.reason = reason.into();
        self
    }

    pub fn executor(mut self, account: Option<String>, name: Option<String>) -> Self {
        self.entry.executor_account = account;
        self.entry.executor_name = name;
        self
    }

    pub fn removal(mut self, removal: Removal) -> Self {
        self.entry.removal = removal;
        self
    }

    pub fn period(mut self, start_millis: i64, end_millis: i64) -> Self {
        self.entry.start_millis = start_millis;
        self.entry.end_millis = end_millis;
        self
    }

    pub fn duration_millis(mut self, duration_millis: i64) -> Self {
        self.entry.duration_millis = duration_millis;
        self
    }

    pub fn server(mut self, scope: impl Into<String>, origin: impl Into<String>) -> Self {
        self.entry.server_scope = scope.into();
        self.entry.server_origin = origin.into();
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.entry.silent = silent;
        self
    }

    pub fn ip_punishment(mut self, ip_punishment: bool) -> Self {
        self.entry.ip_punishment = ip_punishment;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.entry.raw_active = active;
        self
    }

    pub fn expired_by_plugin(mut self, expired: bool) -> Self {
        self.entry.expired_by_plugin = expired;
        self
    }

    pub fn build(self) -> Result<PunishmentEntry, HistoryError> {
        let has_target = |target: &Option<String>| target.as_deref().is_some_and(|t| !t.is_empty());

        if !has_target(&self.entry.target_account) && !has_target(&self.entry.target_ip) {
            return Err(HistoryError::InvalidEntry(format!(
                "entry {} targets neither an account nor an IP",
                self.entry.id
            )));
        }

        Ok(self.entry)
    }
}
