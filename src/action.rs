//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::modal::DateField;
use crate::model::SortField;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: poll background fetches
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,
    /// Order rows by a field; the active field flips direction
    SortBy(SortField),

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    /// Open the page size picker
    OpenPageSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the profile of the selected member
    OpenProfile,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal (e.g., previous option)
    ModalUp,
    /// Navigate down in modal (e.g., next option)
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Text Input (search bar, date range dialog)
    // ─────────────────────────────────────────────────────────────────────────
    /// Add character to the focused input
    TextInput(char),
    /// Remove last character from the focused input
    TextBackspace,
    /// Search: next target field. Date range: switch from/to.
    NextField,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the search bar
    OpenSearch,
    /// Drop the active search, keeping filters
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    OpenStatusFilter,
    OpenVerificationFilter,
    OpenDomainFilter,
    OpenDateFilter(DateField),
    /// Drop every filter and the search
    ClearAllFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-issue the last request after an error
    Retry,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::SortBy(field) => write!(f, "SortBy({})", field.label()),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::OpenPageSize => write!(f, "OpenPageSize"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenProfile => write!(f, "OpenProfile"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::TextInput(c) => write!(f, "TextInput('{}')", c),
            Action::TextBackspace => write!(f, "TextBackspace"),
            Action::NextField => write!(f, "NextField"),
            Action::OpenSearch => write!(f, "OpenSearch"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::OpenStatusFilter => write!(f, "OpenStatusFilter"),
            Action::OpenVerificationFilter => write!(f, "OpenVerificationFilter"),
            Action::OpenDomainFilter => write!(f, "OpenDomainFilter"),
            Action::OpenDateFilter(field) => write!(f, "OpenDateFilter({})", field.title()),
            Action::ClearAllFilters => write!(f, "ClearAllFilters"),
            Action::Retry => write!(f, "Retry"),
        }
    }
}
