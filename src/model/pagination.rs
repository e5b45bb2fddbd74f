//! Cursor-stack pagination state
//!
//! `cursor_stack[i]` is the `after` cursor that produced page `i + 1`, so
//! the first entry is always `None`. Forward movement records a cursor at
//! the new page's index; backward movement only reads recorded entries.

/// Page sizes offered by the pagination footer
pub const PAGE_SIZE_CHOICES: [usize; 3] = [10, 20, 50];

/// Default page size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination state of the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
    cursor_stack: Vec<Option<String>>,
    end_cursor: Option<String>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Create pagination at page 1; a zero size falls back to the default
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            cursor_stack: vec![None],
            end_cursor: None,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn cursor_stack(&self) -> &[Option<String>] {
        &self.cursor_stack
    }

    /// End cursor of the page currently displayed
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    /// The `after` cursor that produced the current page
    pub fn active_cursor(&self) -> Option<&str> {
        self.cursor_stack
            .get(self.current_page - 1)
            .and_then(|c| c.as_deref())
    }

    /// Back to page 1 with a fresh stack
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.cursor_stack = vec![None];
        self.end_cursor = None;
    }

    /// Change the page size; always resets
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.reset();
    }

    /// Record the end cursor reported by the page just loaded
    pub fn record_end_cursor(&mut self, end_cursor: Option<String>) {
        self.end_cursor = end_cursor;
    }

    /// Move forward using `after`, recording it for the new page
    pub fn advance(&mut self, after: String) {
        let index = self.current_page;
        if index < self.cursor_stack.len() {
            self.cursor_stack[index] = Some(after);
        } else {
            self.cursor_stack.push(Some(after));
        }
        self.current_page += 1;
        self.end_cursor = None;
    }

    /// Move back one page, returning the recorded cursor that produced it
    ///
    /// Returns `None` on page 1. The outer `Some` carries the cursor to
    /// fetch with, which is itself `None` for the first page.
    pub fn retreat(&mut self) -> Option<Option<String>> {
        if self.current_page <= 1 {
            return None;
        }
        let cursor = self
            .cursor_stack
            .get(self.current_page - 2)
            .cloned()
            .flatten();
        self.current_page -= 1;
        self.end_cursor = None;
        Some(cursor)
    }
}
