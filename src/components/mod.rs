//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod dashboard;
pub mod date_range_dialog;
pub mod help_dialog;
pub mod layout;
pub mod member_profile;
pub mod picker_dialog;
pub mod quit_dialog;
pub mod search_bar;

pub use dashboard::{draw_dashboard, DashboardComponent, DashboardRenderContext};
pub use date_range_dialog::DateRangeDialog;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use member_profile::MemberProfileDialog;
pub use picker_dialog::{PickerDialog, PickerOption};
pub use quit_dialog::QuitDialog;
pub use search_bar::SearchBar;
