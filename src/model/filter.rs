//! Filter criteria and search specification
//!
//! `FilterCriteria` serializes directly to the API's `MembersFilterInput`.
//! Unset fields are omitted from the wire, so an unset field always means
//! "no constraint" and never an empty-string match.

use super::member::{Member, MemberStatus, VerificationStatus};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Date Ranges
// ═══════════════════════════════════════════════════════════════════════════════

/// Format a timestamp the way the API expects (`2024-01-12T00:00:00.000Z`)
pub fn format_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::format_iso;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format_iso(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}

/// Inclusive timestamp bounds (`{gte?, lte?}` on the wire)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_millis")]
    pub gte: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_millis")]
    pub lte: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Range from explicit timestamps; `None` when both ends are open
    pub fn from_datetimes(gte: Option<DateTime<Utc>>, lte: Option<DateTime<Utc>>) -> Option<Self> {
        let range = Self { gte, lte };
        (!range.is_open()).then_some(range)
    }

    /// Start (00:00:00.000) or end (23:59:59.999) of a UTC calendar day
    pub fn day_bound(date: NaiveDate, end_of_day: bool) -> Option<DateTime<Utc>> {
        let time = if end_of_day {
            date.and_hms_milli_opt(23, 59, 59, 999)
        } else {
            date.and_hms_milli_opt(0, 0, 0, 0)
        };
        time.map(|dt| dt.and_utc())
    }

    pub fn is_open(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }

    pub fn contains(&self, value: &DateTime<Utc>) -> bool {
        self.gte.map_or(true, |gte| *value >= gte) && self.lte.map_or(true, |lte| *value <= lte)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_bound = |b: &Option<DateTime<Utc>>| {
            b.map(|v| v.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        write!(f, "{} → {}", fmt_bound(&self.gte), fmt_bound(&self.lte))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Filter Criteria
// ═══════════════════════════════════════════════════════════════════════════════

/// Composable filters, ANDed together by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_created: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_last_active: Option<DateRange>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop blank strings and open ranges so they read as "unset"
    pub fn normalized(self) -> Self {
        Self {
            status: self.status,
            verification_status: self.verification_status,
            domain: non_blank(self.domain),
            search_term: non_blank(self.search_term),
            date_time_created: self.date_time_created.filter(|r| !r.is_open()),
            date_time_last_active: self.date_time_last_active.filter(|r| !r.is_open()),
        }
    }

    /// Exact-match and range predicates, ANDed
    pub fn matches(&self, member: &Member) -> bool {
        if self.status.is_some_and(|s| s != member.status) {
            return false;
        }
        if self
            .verification_status
            .is_some_and(|v| v != member.verification_status)
        {
            return false;
        }
        if self.domain.as_deref().is_some_and(|d| d != member.domain) {
            return false;
        }
        if let Some(term) = self.search_term.as_deref() {
            let term = term.to_lowercase();
            let hit = member.full_name().to_lowercase().contains(&term)
                || member.email_address.to_lowercase().contains(&term)
                || member.mobile_number.contains(&term);
            if !hit {
                return false;
            }
        }
        self.matches_dates(member)
    }

    /// Only the date range predicates
    pub fn matches_dates(&self, member: &Member) -> bool {
        self.date_time_created
            .map_or(true, |r| r.contains(&member.date_created))
            && self
                .date_time_last_active
                .map_or(true, |r| r.contains(&member.last_active))
    }
}

/// Partial update for [`FilterCriteria`]
///
/// Each field is tri-state: `None` leaves the current value alone,
/// `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub status: Option<Option<MemberStatus>>,
    pub verification_status: Option<Option<VerificationStatus>>,
    pub domain: Option<Option<String>>,
    pub search_term: Option<Option<String>>,
    pub date_time_created: Option<Option<DateRange>>,
    pub date_time_last_active: Option<Option<DateRange>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, value: Option<MemberStatus>) -> Self {
        self.status = Some(value);
        self
    }

    pub fn verification_status(mut self, value: Option<VerificationStatus>) -> Self {
        self.verification_status = Some(value);
        self
    }

    pub fn domain(mut self, value: Option<String>) -> Self {
        self.domain = Some(value);
        self
    }

    pub fn date_time_created(mut self, value: Option<DateRange>) -> Self {
        self.date_time_created = Some(value);
        self
    }

    pub fn date_time_last_active(mut self, value: Option<DateRange>) -> Self {
        self.date_time_last_active = Some(value);
        self
    }

    /// Merge onto `base`, or onto empty criteria when `replace` is set
    pub fn apply(self, base: &FilterCriteria, replace: bool) -> FilterCriteria {
        let mut next = if replace {
            FilterCriteria::default()
        } else {
            base.clone()
        };

        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = self.verification_status {
            next.verification_status = v;
        }
        if let Some(v) = self.domain {
            next.domain = v;
        }
        if let Some(v) = self.search_term {
            next.search_term = v;
        }
        if let Some(v) = self.date_time_created {
            next.date_time_created = v;
        }
        if let Some(v) = self.date_time_last_active {
            next.date_time_last_active = v;
        }

        next.normalized()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════════════

/// Which field a search term targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    #[default]
    None,
    Name,
    Email,
    Mobile,
}

impl SearchMode {
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::None => "none",
            SearchMode::Name => "Name",
            SearchMode::Email => "Email",
            SearchMode::Mobile => "Mobile",
        }
    }

    /// Cycle through the targetable modes (used by the search bar)
    pub fn next_target(&self) -> SearchMode {
        match self {
            SearchMode::None | SearchMode::Mobile => SearchMode::Name,
            SearchMode::Name => SearchMode::Email,
            SearchMode::Email => SearchMode::Mobile,
        }
    }
}

/// Active search: one mode and its term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    pub mode: SearchMode,
    pub term: String,
}

impl SearchSpec {
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a spec; a blank term collapses to no search
    pub fn new(mode: SearchMode, term: &str) -> Self {
        let term = term.trim();
        if mode == SearchMode::None || term.is_empty() {
            return Self::none();
        }
        Self {
            mode,
            term: term.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode != SearchMode::None && !self.term.trim().is_empty()
    }
}

/// Which empty-state message the table should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStateKind {
    NoSearchResults,
    NoFilterResults,
    NoMembers,
}

impl EmptyStateKind {
    pub fn classify(search: &SearchSpec, filters: &FilterCriteria) -> Self {
        if search.is_active() {
            EmptyStateKind::NoSearchResults
        } else if !filters.is_empty() {
            EmptyStateKind::NoFilterResults
        } else {
            EmptyStateKind::NoMembers
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyStateKind::NoSearchResults => "No members match your search",
            EmptyStateKind::NoFilterResults => "No members match the active filters",
            EmptyStateKind::NoMembers => "No members yet",
        }
    }
}
