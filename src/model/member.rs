//! Member record as served by the members API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn all() -> [MemberStatus; 3] {
        [Self::Active, Self::Inactive, Self::Suspended]
    }

    /// Wire value (`ACTIVE`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Capitalized label for chips and table cells
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity verification state of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

impl VerificationStatus {
    pub fn all() -> [VerificationStatus; 3] {
        [Self::Verified, Self::Pending, Self::Unverified]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Pending => "PENDING",
            Self::Unverified => "UNVERIFIED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Pending => "Pending",
            Self::Unverified => "Unverified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub date_created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub status: MemberStatus,
    pub verification_status: VerificationStatus,
    pub domain: String,
}

impl Member {
    /// "First Last", or just the first name when the last name is empty
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.trim().to_string()
        } else {
            format!("{} {}", self.first_name, self.last_name).trim().to_string()
        }
    }

    pub fn formatted_created(&self) -> String {
        self.date_created.format("%Y %b %d").to_string()
    }

    pub fn formatted_last_active(&self) -> String {
        self.last_active.format("%Y %b %d %H:%M").to_string()
    }
}
