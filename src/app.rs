//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. Member
//! data and query state live in the coordinator; the App turns Actions into
//! coordinator calls and keeps the modal stack.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard, DashboardComponent, DashboardRenderContext, DateRangeDialog, HelpDialog,
    MemberProfileDialog, PickerDialog, PickerOption, QuitDialog, SearchBar,
};
use crate::config::DataSource;
use crate::coordinator::{Backend, MemberCoordinator};
use crate::model::modal::{DateField, Modal, ModalStack, PickerKind};
use crate::model::options::OPTIONS_SAMPLE_SIZE;
use crate::model::pagination::PAGE_SIZE_CHOICES;
use crate::model::{FilterOptions, FilterPatch, Member, MemberStatus, VerificationStatus};
use crate::services::fetcher::{Dispatch, FetchTicket};
use crate::services::query::{normalize, MemberSource, QueryRequest};
use crate::services::{GraphqlClient, MockDataSource, ThreadDispatcher};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Filter, search, pagination and the current page
    pub coordinator: MemberCoordinator,

    /// Choices offered by the filter pickers
    pub options: FilterOptions,

    /// Background sample used to fill `options` in live mode
    options_fetch: Option<ThreadDispatcher>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub dashboard: DashboardComponent,
    pub search_bar: SearchBar,
    pub picker: PickerDialog,
    pub date_dialog: DateRangeDialog,
    pub profile_dialog: MemberProfileDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Build the app for `source`; nothing is fetched until `init`
    pub fn new(source: DataSource, page_size: usize) -> Result<App> {
        let (backend, options, options_fetch) = match source {
            DataSource::Mock => {
                tracing::info!("using mock member data");
                let mock = MockDataSource::new();
                let options = FilterOptions::from_members(mock.members());
                (Backend::Mock(mock), options, None)
            }
            DataSource::Live {
                url,
                token,
                timeout,
            } => {
                tracing::info!(url = %url, "using GraphQL endpoint");
                let client: Arc<dyn MemberSource> =
                    Arc::new(GraphqlClient::new(&url, &token, timeout)?);
                let dispatcher = ThreadDispatcher::new(Arc::clone(&client));
                (
                    Backend::Live(Box::new(dispatcher)),
                    FilterOptions::default(),
                    Some(ThreadDispatcher::new(client)),
                )
            }
        };

        Ok(App {
            coordinator: MemberCoordinator::new(backend, page_size),
            options,
            options_fetch,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            dashboard: DashboardComponent::new(),
            search_bar: SearchBar::new(),
            picker: PickerDialog::new(),
            date_dialog: DateRangeDialog::new(),
            profile_dialog: MemberProfileDialog::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
        })
    }

    /// Displayed rows in table order
    fn visible_members(&self) -> Vec<&Member> {
        self.dashboard.rows(self.coordinator.display_members())
    }

    fn row_count(&self) -> usize {
        self.coordinator.display_members().len()
    }

    /// Drop the selection so the next page starts at its first row
    fn reset_selection(&mut self) {
        self.dashboard.table_state.select(None);
        let len = self.row_count();
        self.dashboard.clamp(len);
    }

    fn poll_options(&mut self) {
        let Some(fetch) = self.options_fetch.as_mut() else {
            return;
        };
        let Some(completion) = fetch.drain().into_iter().next() else {
            return;
        };
        self.options_fetch = None;

        let page = completion
            .result
            .and_then(|response| normalize(completion.operation, response.data.as_ref()));
        match page {
            Ok(page) => {
                tracing::debug!(sampled = page.members.len(), "filter options loaded");
                self.options = FilterOptions::from_members(&page.members);
            }
            Err(error) => {
                tracing::warn!(%error, "could not load filter options");
                self.status_message = Some(format!("Filter options unavailable: {}", error));
            }
        }
    }

    fn open_picker(&mut self, kind: PickerKind) {
        let filters = self.coordinator.filters();
        let (options, current): (Vec<PickerOption>, Option<String>) = match kind {
            PickerKind::Status => (
                self.options
                    .status_choices()
                    .into_iter()
                    .map(|s| PickerOption::new(s.label(), s.as_str()))
                    .collect(),
                filters.status.map(|s| s.as_str().to_string()),
            ),
            PickerKind::Verification => (
                self.options
                    .verification_choices()
                    .into_iter()
                    .map(|v| PickerOption::new(v.label(), v.as_str()))
                    .collect(),
                filters.verification_status.map(|v| v.as_str().to_string()),
            ),
            PickerKind::Domain => (
                self.options
                    .domain_choices()
                    .iter()
                    .map(|d| PickerOption::new(d.as_str(), d.as_str()))
                    .collect(),
                filters.domain.clone(),
            ),
            PickerKind::PageSize => (
                PAGE_SIZE_CHOICES
                    .iter()
                    .map(|n| PickerOption::new(format!("{} per page", n), n.to_string()))
                    .collect(),
                Some(self.coordinator.page_size().to_string()),
            ),
        };
        self.picker.open(kind, options, current);
        self.modals.push(Modal::Picker { kind });
    }

    fn confirm_picker(&mut self, kind: PickerKind) {
        let Some(value) = self.picker.selected_value() else {
            self.modals.pop();
            return;
        };

        match kind {
            PickerKind::Status => {
                let status = value.as_deref().and_then(MemberStatus::parse);
                self.coordinator
                    .update_filters(FilterPatch::new().status(status), false);
            }
            PickerKind::Verification => {
                let verification = value.as_deref().and_then(VerificationStatus::parse);
                self.coordinator.update_filters(
                    FilterPatch::new().verification_status(verification),
                    false,
                );
            }
            PickerKind::Domain => {
                self.coordinator
                    .update_filters(FilterPatch::new().domain(value), false);
            }
            PickerKind::PageSize => {
                if let Some(size) = value.and_then(|v| v.parse::<usize>().ok()) {
                    self.coordinator.set_page_size(size);
                }
            }
        }
        self.modals.pop();
        self.reset_selection();
    }

    fn confirm_date_range(&mut self, field: DateField) {
        match self.date_dialog.to_range() {
            Ok(range) => {
                let patch = match field {
                    DateField::Created => FilterPatch::new().date_time_created(range),
                    DateField::LastActive => FilterPatch::new().date_time_last_active(range),
                };
                self.coordinator.update_filters(patch, false);
                self.modals.pop();
                self.reset_selection();
            }
            Err(message) => {
                self.date_dialog.error = Some(message);
            }
        }
    }

    fn open_profile(&mut self) {
        let member = self
            .dashboard
            .selected()
            .and_then(|i| self.visible_members().get(i).map(|m| (*m).clone()));
        let Some(member) = member else {
            return;
        };
        let member_id = member.id.clone();
        self.profile_dialog.set_member(Some(member));
        self.modals.push(Modal::Profile { member_id });
    }

    /// Component that receives input while `modal` is on top
    fn modal_component(&mut self, modal: &Modal) -> &mut dyn Component {
        match modal {
            Modal::QuitConfirm => &mut self.quit_dialog,
            Modal::Search => &mut self.search_bar,
            Modal::Picker { .. } => &mut self.picker,
            Modal::DateRange { .. } => &mut self.date_dialog,
            Modal::Profile { .. } => &mut self.profile_dialog,
            Modal::Help => &mut self.help_dialog,
        }
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.coordinator.load();
        if let Some(fetch) = self.options_fetch.as_mut() {
            fetch.submit(FetchTicket {
                token: 0,
                request: QueryRequest::list(OPTIONS_SAMPLE_SIZE),
            });
        }
        let len = self.row_count();
        self.dashboard.clamp(len);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top().cloned() {
            Some(modal) => self.modal_component(&modal).handle_key_event(key),
            None => self.dashboard.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            self.dashboard.handle_mouse_event(mouse)
        } else {
            Ok(None)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.coordinator.poll() {
                    let len = self.row_count();
                    self.dashboard.clamp(len);
                }
                self.poll_options();
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Table Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let len = self.row_count();
                self.dashboard.next(len);
            }
            Action::PrevRow => {
                let len = self.row_count();
                self.dashboard.previous(len);
            }
            Action::FirstRow => {
                let len = self.row_count();
                self.dashboard.select_first(len);
            }
            Action::LastRow => {
                let len = self.row_count();
                self.dashboard.select_last(len);
            }
            Action::SortBy(field) => {
                self.dashboard.sort.select(field);
                tracing::debug!(sort = %self.dashboard.sort, "rows reordered");
                self.reset_selection();
            }

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage => {
                if self.coordinator.next_page() {
                    self.reset_selection();
                }
            }
            Action::PrevPage => {
                if self.coordinator.prev_page() {
                    self.reset_selection();
                }
            }
            Action::OpenPageSize => self.open_picker(PickerKind::PageSize),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.request_pending = self.coordinator.loading();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenProfile => self.open_profile(),
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.top().cloned() {
                Some(Modal::QuitConfirm) => self.should_quit = true,
                Some(Modal::Search) => {
                    let mode = self.search_bar.mode;
                    let term = self.search_bar.term();
                    self.coordinator.search_by(mode, &term);
                    self.modals.pop();
                    self.reset_selection();
                }
                Some(Modal::Picker { kind }) => self.confirm_picker(kind),
                Some(Modal::DateRange { field }) => self.confirm_date_range(field),
                Some(Modal::Profile { .. }) | Some(Modal::Help) => {
                    self.modals.pop();
                }
                None => {}
            },
            Action::ModalUp
            | Action::ModalDown
            | Action::TextInput(_)
            | Action::TextBackspace
            | Action::NextField => {
                if let Some(modal) = self.modals.top().cloned() {
                    return self.modal_component(&modal).update(action);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::OpenSearch => {
                self.search_bar.open(self.coordinator.search(), &self.options);
                self.modals.push(Modal::Search);
            }
            Action::ClearSearch => {
                if self.coordinator.search().is_active() {
                    self.coordinator.clear_search();
                    self.reset_selection();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Action::OpenStatusFilter => self.open_picker(PickerKind::Status),
            Action::OpenVerificationFilter => self.open_picker(PickerKind::Verification),
            Action::OpenDomainFilter => self.open_picker(PickerKind::Domain),
            Action::OpenDateFilter(field) => {
                let filters = self.coordinator.filters();
                let current = match field {
                    DateField::Created => filters.date_time_created,
                    DateField::LastActive => filters.date_time_last_active,
                };
                self.date_dialog.open(field, current.as_ref());
                self.modals.push(Modal::DateRange { field });
            }
            Action::ClearAllFilters => {
                self.coordinator.clear_all_filters();
                self.status_message = None;
                self.reset_selection();
            }

            // ─────────────────────────────────────────────────────────────────
            // Data
            // ─────────────────────────────────────────────────────────────────
            Action::Retry => {
                if self.coordinator.error().is_some() {
                    self.coordinator.retry();
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = DashboardRenderContext {
            coordinator: &self.coordinator,
            status_message: self.status_message.as_deref(),
        };
        draw_dashboard(frame, area, &mut self.dashboard, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.modal_component(&modal).draw(frame, area)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchMode, SortField};

    fn mock_app() -> App {
        let mut app = App::new(DataSource::Mock, 20).unwrap();
        app.init().unwrap();
        app
    }

    fn run(app: &mut App, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            let mut next = Some(action);
            while let Some(a) = next {
                next = app.update(a).unwrap();
            }
        }
    }

    #[test]
    fn test_init_loads_mock_members() {
        let app = mock_app();
        assert!(app.coordinator.is_mock());
        assert_eq!(app.coordinator.total_count(), 12);
        assert_eq!(app.dashboard.selected(), Some(0));
        assert!(!app.options.domains.is_empty());
    }

    #[test]
    fn test_search_through_search_bar() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenSearch]);
        assert_eq!(app.modals.top(), Some(&Modal::Search));

        run(&mut app, "brow".chars().map(Action::TextInput));
        run(&mut app, [Action::ConfirmModal]);

        assert!(app.modals.is_empty());
        assert_eq!(app.coordinator.search().mode, SearchMode::Name);
        let ids: Vec<_> = app.coordinator.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "9"]);
    }

    #[test]
    fn test_search_suggestion_is_submitted() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenSearch, Action::NextField]);
        run(&mut app, "derek".chars().map(Action::TextInput));
        assert_eq!(app.search_bar.suggestions(), vec!["derek@example.com"]);

        run(&mut app, [Action::ModalDown, Action::ConfirmModal]);

        assert_eq!(app.coordinator.search().mode, SearchMode::Email);
        assert_eq!(app.coordinator.search().term, "derek@example.com");
        let ids: Vec<_> = app.coordinator.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_empty_search_clears() {
        let mut app = mock_app();
        app.coordinator.search_by_name("john");
        run(&mut app, [Action::OpenSearch]);
        for _ in 0..4 {
            run(&mut app, [Action::TextBackspace]);
        }
        run(&mut app, [Action::ConfirmModal]);

        assert!(!app.coordinator.search().is_active());
        assert_eq!(app.coordinator.total_count(), 12);
    }

    #[test]
    fn test_status_picker_applies_filter() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenStatusFilter]);
        let idx = app
            .picker
            .options
            .iter()
            .position(|o| o.value == "SUSPENDED")
            .unwrap();
        for _ in 0..=idx {
            run(&mut app, [Action::ModalDown]);
        }
        run(&mut app, [Action::ConfirmModal]);

        assert_eq!(app.coordinator.filters().status, Some(MemberStatus::Suspended));
        let ids: Vec<_> = app.coordinator.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["6"]);
    }

    #[test]
    fn test_any_row_clears_filter() {
        let mut app = mock_app();
        app.coordinator.update_filters(
            FilterPatch::new().domain(Some("kayakshop.net".to_string())),
            false,
        );
        run(&mut app, [Action::OpenDomainFilter]);
        run(&mut app, vec![Action::ModalUp; 10]);
        run(&mut app, [Action::ConfirmModal]);

        assert!(app.coordinator.filters().domain.is_none());
        assert_eq!(app.coordinator.total_count(), 12);
    }

    #[test]
    fn test_page_size_picker() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenPageSize]);
        run(&mut app, [Action::ModalUp, Action::ConfirmModal]);
        assert_eq!(app.coordinator.page_size(), 10);
    }

    #[test]
    fn test_invalid_date_range_keeps_dialog_open() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenDateFilter(DateField::Created)]);
        app.date_dialog.from = "2024-03-01".to_string();
        app.date_dialog.to = "2024-02-01".to_string();
        run(&mut app, [Action::ConfirmModal]);

        assert!(app.date_dialog.error.is_some());
        assert!(matches!(app.modals.top(), Some(Modal::DateRange { .. })));
        assert!(app.coordinator.filters().date_time_created.is_none());
    }

    #[test]
    fn test_created_range_filters_members() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenDateFilter(DateField::Created)]);
        app.date_dialog.from = "2024-01-10".to_string();
        app.date_dialog.to = "2024-01-15".to_string();
        run(&mut app, [Action::ConfirmModal]);

        assert!(app.modals.is_empty());
        let ids: Vec<_> = app
            .coordinator
            .display_members()
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(ids, vec!["1", "6", "11", "12"]);
    }

    #[test]
    fn test_profile_opens_for_selected_row() {
        let mut app = mock_app();
        run(&mut app, [Action::NextRow, Action::OpenProfile]);

        let expected = app.visible_members()[1].id.clone();
        assert_eq!(
            app.modals.top(),
            Some(&Modal::Profile {
                member_id: expected.clone()
            })
        );
        assert_eq!(
            app.profile_dialog.member.as_ref().map(|m| m.id.clone()),
            Some(expected)
        );
    }

    #[test]
    fn test_sort_reorders_rows_without_new_request() {
        let mut app = mock_app();
        let ids = |app: &App| -> Vec<String> {
            app.visible_members().iter().map(|m| m.id.clone()).collect()
        };
        assert_eq!(ids(&app)[..3], ["4", "5", "1"]);

        let request = app.coordinator.last_request().cloned();
        run(&mut app, [Action::SortBy(SortField::DateCreated)]);
        assert_eq!(ids(&app)[..3], ["5", "2", "7"]);
        run(&mut app, [Action::SortBy(SortField::DateCreated)]);
        assert_eq!(ids(&app)[..3], ["3", "10", "9"]);

        assert_eq!(app.coordinator.last_request().cloned(), request);
        let source_order: Vec<_> = app.coordinator.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(source_order[..3], ["1", "2", "3"]);
    }

    #[test]
    fn test_profile_follows_sorted_order() {
        let mut app = mock_app();
        run(&mut app, [Action::SortBy(SortField::LastActive), Action::OpenProfile]);
        assert_eq!(
            app.profile_dialog.member.as_ref().map(|m| m.id.as_str()),
            Some("5")
        );
    }

    #[test]
    fn test_clear_all_filters() {
        let mut app = mock_app();
        app.coordinator.search_by_email("kayak");
        app.coordinator.update_filters(
            FilterPatch::new().status(Some(MemberStatus::Active)),
            false,
        );
        run(&mut app, [Action::ClearAllFilters]);

        assert!(app.coordinator.filters().is_empty());
        assert!(!app.coordinator.search().is_active());
        assert_eq!(app.coordinator.total_count(), 12);
    }

    #[test]
    fn test_paging_is_inert_in_mock_mode() {
        let mut app = mock_app();
        run(&mut app, [Action::NextPage, Action::PrevPage]);
        assert_eq!(app.coordinator.current_page(), 1);
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenQuitDialog]);
        assert!(!app.should_quit);
        run(&mut app, [Action::ConfirmModal]);
        assert!(app.should_quit);
    }

    #[test]
    fn test_close_modal_returns_to_dashboard() {
        let mut app = mock_app();
        run(&mut app, [Action::OpenHelp, Action::CloseModal]);
        assert!(app.modals.is_empty());
    }
}
