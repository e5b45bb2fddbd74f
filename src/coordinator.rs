//! Member query coordinator
//!
//! Owns filter, search and pagination state, decides which operation to
//! issue, and exposes one result shape whichever backend answered. Every
//! mutating action issues exactly one request. Each request carries a
//! sequence token and only the latest token's completion is applied.

use crate::error::FetchError;
use crate::model::{
    EmptyStateKind, FilterCriteria, FilterPatch, Member, MemberPage, MemberStats, PageInfo,
    PaginationState, SearchMode, SearchSpec,
};
use crate::services::fetcher::{Dispatch, FetchCompletion, FetchTicket};
use crate::services::mock::MockDataSource;
use crate::services::query::{normalize, GraphqlResponse, MemberSource, Operation, QueryRequest};

/// Where requests go
pub enum Backend {
    /// Answered inline on the calling thread
    Mock(MockDataSource),
    /// Answered later through [`MemberCoordinator::poll`]
    Live(Box<dyn Dispatch>),
}

impl Backend {
    pub fn is_mock(&self) -> bool {
        matches!(self, Backend::Mock(_))
    }
}

pub struct MemberCoordinator {
    backend: Backend,
    filters: FilterCriteria,
    search: SearchSpec,
    pagination: PaginationState,
    page: MemberPage,
    loading: bool,
    error: Option<FetchError>,
    next_token: u64,
    pending: Option<u64>,
    last_request: Option<QueryRequest>,
}

impl MemberCoordinator {
    pub fn new(backend: Backend, page_size: usize) -> Self {
        Self {
            backend,
            filters: FilterCriteria::default(),
            search: SearchSpec::none(),
            pagination: PaginationState::new(page_size),
            page: MemberPage::empty(),
            loading: false,
            error: None,
            next_token: 1,
            pending: None,
            last_request: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    /// Rows of the current page as returned by the source
    pub fn members(&self) -> &[Member] {
        &self.page.members
    }

    /// Rows to display: the current page narrowed by the date ranges
    pub fn display_members(&self) -> Vec<&Member> {
        self.members()
            .iter()
            .filter(|m| self.filters.matches_dates(m))
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.page.total_count
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn loading_more(&self) -> bool {
        self.loading && self.pagination.current_page() > 1
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn has_next_page(&self) -> bool {
        self.page.has_next_page()
    }

    pub fn has_previous_page(&self) -> bool {
        self.pagination.current_page() > 1
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page.page_info.as_ref()
    }

    #[cfg(test)]
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn search(&self) -> &SearchSpec {
        &self.search
    }

    pub fn is_mock(&self) -> bool {
        self.backend.is_mock()
    }

    #[cfg(test)]
    pub fn last_request(&self) -> Option<&QueryRequest> {
        self.last_request.as_ref()
    }

    pub fn stats(&self) -> MemberStats {
        MemberStats::from_members(self.display_members())
    }

    /// Which empty state applies, if nothing is displayed and nothing is loading
    pub fn empty_state(&self) -> Option<EmptyStateKind> {
        if self.loading || !self.display_members().is_empty() {
            return None;
        }
        Some(EmptyStateKind::classify(&self.search, &self.filters))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Filter / Search Actions
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fetch the first page under the current state
    pub fn load(&mut self) {
        self.pagination.reset();
        self.issue(None);
    }

    /// Merge `patch` into the filters (or replace them), then refetch page 1
    pub fn update_filters(&mut self, patch: FilterPatch, replace: bool) {
        self.filters = patch.apply(&self.filters, replace);
        tracing::debug!(filters = ?self.filters, replace, "filters updated");
        self.pagination.reset();
        self.issue(None);
    }

    /// Search by one field; a blank term clears the search
    pub fn search_by(&mut self, mode: SearchMode, term: &str) {
        let spec = SearchSpec::new(mode, term);
        if !spec.is_active() {
            self.clear_search();
            return;
        }
        tracing::debug!(mode = spec.mode.label(), term = %spec.term, "search");
        self.search = spec;
        self.pagination.reset();
        self.issue(None);
    }

    pub fn search_by_name(&mut self, term: &str) {
        self.search_by(SearchMode::Name, term);
    }

    pub fn search_by_email(&mut self, term: &str) {
        self.search_by(SearchMode::Email, term);
    }

    pub fn search_by_mobile(&mut self, term: &str) {
        self.search_by(SearchMode::Mobile, term);
    }

    pub fn clear_search(&mut self) {
        tracing::debug!("search cleared");
        self.search = SearchSpec::none();
        self.pagination.reset();
        self.issue(None);
    }

    pub fn clear_all_filters(&mut self) {
        tracing::debug!("filters and search cleared");
        self.filters = FilterCriteria::default();
        self.search = SearchSpec::none();
        self.pagination.reset();
        self.issue(None);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Pagination Actions
    // ═══════════════════════════════════════════════════════════════════════════

    /// Load the page after the current one; returns whether a fetch was issued
    pub fn fetch_more(&mut self) -> bool {
        if self.is_mock() || self.loading || !self.page.has_next_page() {
            return false;
        }
        let Some(cursor) = self.pagination.end_cursor().map(str::to_string) else {
            return false;
        };

        self.pagination.advance(cursor.clone());
        tracing::debug!(page = self.pagination.current_page(), "next page");
        self.issue(Some(cursor));
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.fetch_more()
    }

    /// Reload the page before the current one with its recorded cursor
    pub fn prev_page(&mut self) -> bool {
        if self.is_mock() {
            return false;
        }
        let Some(cursor) = self.pagination.retreat() else {
            return false;
        };

        tracing::debug!(page = self.pagination.current_page(), "previous page");
        self.issue(cursor);
        true
    }

    /// Change the page size and refetch page 1; zero is ignored
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            tracing::warn!("ignoring page size of zero");
            return;
        }
        self.pagination.set_page_size(size);
        tracing::debug!(size, "page size changed");
        self.issue(None);
    }

    /// Re-issue the last request; returns false if nothing was issued yet
    pub fn retry(&mut self) -> bool {
        let Some(request) = self.last_request.clone() else {
            return false;
        };
        tracing::debug!(operation = request.operation.name(), "retry");
        self.dispatch(request);
        true
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Request Lifecycle
    // ═══════════════════════════════════════════════════════════════════════════

    /// Apply any completions that arrived; returns true if state changed
    pub fn poll(&mut self) -> bool {
        let Backend::Live(dispatcher) = &mut self.backend else {
            return false;
        };

        let mut changed = false;
        for completion in dispatcher.drain() {
            changed |= self.complete(completion);
        }
        changed
    }

    fn issue(&mut self, after: Option<String>) {
        let request = QueryRequest::new(
            &self.search,
            &self.filters,
            self.pagination.page_size(),
            after,
        );
        self.dispatch(request);
    }

    fn dispatch(&mut self, request: QueryRequest) {
        let token = self.next_token;
        self.next_token += 1;
        self.error = None;
        self.last_request = Some(request.clone());

        tracing::debug!(
            token,
            operation = request.operation.name(),
            first = request.first,
            after = ?request.after,
            "issuing members query"
        );

        match &mut self.backend {
            Backend::Mock(source) => {
                let operation = request.operation;
                let result = source.execute(&request);
                self.pending = None;
                self.loading = false;
                self.apply(operation, result);
            }
            Backend::Live(dispatcher) => {
                self.pending = Some(token);
                self.loading = true;
                dispatcher.submit(FetchTicket { token, request });
            }
        }
    }

    fn complete(&mut self, completion: FetchCompletion) -> bool {
        if self.pending != Some(completion.token) {
            tracing::debug!(token = completion.token, "discarding stale completion");
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.apply(completion.operation, completion.result);
        true
    }

    fn apply(&mut self, operation: Operation, result: Result<GraphqlResponse, FetchError>) {
        let (page, error) = match result {
            Ok(response) => {
                let graphql_error = response.error();
                match normalize(operation, response.data.as_ref()) {
                    Ok(page) => (page, graphql_error),
                    Err(e) => (MemberPage::empty(), Some(e)),
                }
            }
            Err(e) => (MemberPage::empty(), Some(e)),
        };

        if let Some(e) = &error {
            tracing::warn!(operation = operation.name(), error = %e, "members query failed");
        }

        self.pagination
            .record_end_cursor(page.end_cursor().map(str::to_string));
        self.page = page;
        self.error = error;
    }
}
