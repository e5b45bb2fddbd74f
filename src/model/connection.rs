//! Cursor-paginated result envelopes

use super::member::{Member, MemberStatus, VerificationStatus};
use serde::{Deserialize, Serialize};

/// Page metadata of a connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One member plus its opaque cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub node: Member,
    pub cursor: String,
}

/// A member connection as returned by every members operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: usize,
}

impl Connection {
    /// Build a single, complete page where each cursor is the member id
    pub fn single_page(members: Vec<Member>) -> Self {
        let total_count = members.len();
        let edges = members
            .into_iter()
            .map(|node| Edge {
                cursor: node.id.clone(),
                node,
            })
            .collect();

        Self {
            edges,
            page_info: PageInfo::default(),
            total_count,
        }
    }
}

/// Uniform result shape exposed to the UI, whichever operation ran
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPage {
    pub members: Vec<Member>,
    /// `None` until a response has been received
    pub page_info: Option<PageInfo>,
    pub total_count: usize,
}

impl MemberPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            members: connection.edges.into_iter().map(|e| e.node).collect(),
            page_info: Some(connection.page_info),
            total_count: connection.total_count,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page_info.as_ref().is_some_and(|p| p.has_next_page)
    }

    pub fn end_cursor(&self) -> Option<&str> {
        self.page_info.as_ref().and_then(|p| p.end_cursor.as_deref())
    }
}

/// Headline counts over the displayed rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub active: usize,
    pub pending_verification: usize,
    pub inactive: usize,
}

impl MemberStats {
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        members.into_iter().fold(Self::default(), |mut stats, m| {
            match m.status {
                MemberStatus::Active => stats.active += 1,
                MemberStatus::Inactive => stats.inactive += 1,
                MemberStatus::Suspended => {}
            }
            if m.verification_status == VerificationStatus::Pending {
                stats.pending_verification += 1;
            }
            stats
        })
    }
}
