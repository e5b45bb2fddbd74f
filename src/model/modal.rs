//! Modal stack for managing overlays
//!
//! Only the top modal receives input events; the table underneath stays
//! visible but inert while any modal is open.

/// Which list a picker dialog chooses from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Status,
    Verification,
    Domain,
    PageSize,
}

impl PickerKind {
    pub fn title(&self) -> &'static str {
        match self {
            PickerKind::Status => "Status",
            PickerKind::Verification => "Verification",
            PickerKind::Domain => "Domain",
            PickerKind::PageSize => "Page Size",
        }
    }

    /// Whether the first row clears the filter
    pub fn has_any_option(&self) -> bool {
        !matches!(self, PickerKind::PageSize)
    }
}

/// Which timestamp a date range dialog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    LastActive,
}

impl DateField {
    pub fn title(&self) -> &'static str {
        match self {
            DateField::Created => "Date Created",
            DateField::LastActive => "Last Active",
        }
    }
}

/// Represents a modal overlay that can be displayed on top of the main UI
///
/// Each variant's input state lives in the dialog component that renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Search input with a target field
    Search,
    /// Single-choice list for a filter or the page size
    Picker { kind: PickerKind },
    /// From/to inputs for a date filter
    DateRange { field: DateField },
    /// Read-only view of one member
    Profile { member_id: String },
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
