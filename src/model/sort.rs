//! Client-side ordering of the displayed rows
//!
//! Sorting never reaches the request; it only reorders the page already
//! loaded. Ties keep the order the source returned.

use super::member::Member;
use std::cmp::Ordering;
use std::fmt;

/// Field the members table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FirstName,
    LastName,
    DateCreated,
    LastActive,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::DateCreated => "Created",
            Self::LastActive => "Last active",
        }
    }

    pub fn next(&self) -> SortField {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::DateCreated,
            Self::DateCreated => Self::LastActive,
            Self::LastActive => Self::FirstName,
        }
    }

    /// Names case-insensitively, dates chronologically
    fn compare(&self, a: &Member, b: &Member) -> Ordering {
        match self {
            Self::FirstName => a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()),
            Self::LastName => a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase()),
            Self::DateCreated => a.date_created.cmp(&b.date_created),
            Self::LastActive => a.last_active.cmp(&b.last_active),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }

    fn flipped(&self) -> SortDirection {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort; defaults to first name ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl MemberSort {
    /// Picking the active field flips the direction; another field starts ascending
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Stable sort of `members` in place
    pub fn apply(&self, members: &mut [&Member]) {
        members.sort_by(|a, b| {
            let ordering = self.field.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    pub fn sorted<'a>(&self, mut members: Vec<&'a Member>) -> Vec<&'a Member> {
        self.apply(&mut members);
        members
    }
}

impl fmt::Display for MemberSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.label(), self.direction.arrow())
    }
}
