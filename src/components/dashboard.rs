//! Dashboard component - the members screen
//!
//! Displays the header with totals, active filter chips, the members table
//! and the pagination footer. Owns row selection; everything else is read
//! from the coordinator at draw time.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::coordinator::MemberCoordinator;
use crate::model::modal::DateField;
use crate::model::{
    DateRange, Member, MemberSort, MemberStatus, SearchMode, SortField, VerificationStatus,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column titles and widths of the members table
const COLUMNS: [(&str, u16); 8] = [
    ("Name", 20),
    ("Email", 28),
    ("Mobile", 16),
    ("Domain", 18),
    ("Status", 10),
    ("Verification", 12),
    ("Created", 12),
    ("Last Active", 18),
];

/// Shorten `text` to `max` display columns, ending in `…` when cut
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn status_color(status: MemberStatus) -> Color {
    match status {
        MemberStatus::Active => Color::Green,
        MemberStatus::Inactive => Color::DarkGray,
        MemberStatus::Suspended => Color::Red,
    }
}

fn verification_color(status: VerificationStatus) -> Color {
    match status {
        VerificationStatus::Verified => Color::Green,
        VerificationStatus::Pending => Color::Yellow,
        VerificationStatus::Unverified => Color::Red,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Owns the table selection and row order, and maps main-screen keys to Actions
pub struct DashboardComponent {
    pub table_state: TableState,
    pub sort: MemberSort,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            sort: MemberSort::default(),
        }
    }

    /// `members` in the order the table shows them
    pub fn rows<'a>(&self, members: Vec<&'a Member>) -> Vec<&'a Member> {
        self.sort.sorted(members)
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.table_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.table_state.select(len.checked_sub(1));
    }

    /// Keep the selection inside a list that may have shrunk or grown
    pub fn clamp(&mut self, len: usize) {
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Enter => Some(Action::OpenProfile),
            KeyCode::Char('o') => Some(Action::SortBy(self.sort.field.next())),
            KeyCode::Char('O') => Some(Action::SortBy(self.sort.field)),

            // Pages
            KeyCode::Char('n') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('z') => Some(Action::OpenPageSize),

            // Search and filters
            KeyCode::Char('/') => Some(Action::OpenSearch),
            KeyCode::Char('s') => Some(Action::OpenStatusFilter),
            KeyCode::Char('v') => Some(Action::OpenVerificationFilter),
            KeyCode::Char('d') => Some(Action::OpenDomainFilter),
            KeyCode::Char('c') => Some(Action::OpenDateFilter(DateField::Created)),
            KeyCode::Char('a') => Some(Action::OpenDateFilter(DateField::LastActive)),
            KeyCode::Char('x') => Some(Action::ClearSearch),
            KeyCode::Char('X') => Some(Action::ClearAllFilters),

            KeyCode::Char('r') => Some(Action::Retry),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the coordinator; see draw_dashboard
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardRenderContext<'a> {
    pub coordinator: &'a MemberCoordinator,
    pub status_message: Option<&'a str>,
}

/// Draw the dashboard
pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let has_status = ctx.coordinator.error().is_some() || ctx.status_message.is_some();
    let layout = calculate_main_layout(area, has_status);

    render_header(frame, layout.header, ctx.coordinator);
    render_filter_bar(frame, layout.filters, ctx.coordinator);
    render_members_table(frame, layout.table, dashboard, ctx.coordinator);
    render_pagination_footer(frame, layout.footer, ctx.coordinator);
    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, coordinator: &MemberCoordinator) {
    let stats = coordinator.stats();
    let mut spans = vec![Span::styled(
        " Members ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if coordinator.is_mock() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " MOCK DATA ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{} total", coordinator.total_count()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format!("{} active", stats.active),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{} pending verification", stats.pending_verification),
        Style::default().fg(Color::Yellow),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{} inactive", stats.inactive),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn range_chip(range: &Option<DateRange>) -> Option<String> {
    range.as_ref().map(|r| r.to_string())
}

fn chip(label: &str, value: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {}: ", label),
            Style::default().fg(Color::Black).bg(Color::Blue),
        ),
        Span::styled(
            format!("{} ", value),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]
}

fn render_filter_bar(frame: &mut Frame, area: Rect, coordinator: &MemberCoordinator) {
    let filters = coordinator.filters();
    let search = coordinator.search();
    let mut spans = Vec::new();

    if search.is_active() {
        spans.extend(chip(search.mode.label(), &search.term));
    }
    if let Some(status) = filters.status {
        spans.extend(chip("Status", status.label()));
    }
    if let Some(verification) = filters.verification_status {
        spans.extend(chip("Verification", verification.label()));
    }
    if let Some(domain) = &filters.domain {
        spans.extend(chip("Domain", domain));
    }
    if let Some(term) = &filters.search_term {
        spans.extend(chip("Term", term));
    }
    if let Some(range) = range_chip(&filters.date_time_created) {
        spans.extend(chip("Created", &range));
    }
    if let Some(range) = range_chip(&filters.date_time_last_active) {
        spans.extend(chip("Active", &range));
    }

    if spans.is_empty() {
        spans.push(Span::styled(
            "No filters  ·  / search  s status  v verification  d domain  c created  a last active",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            "x clear search  X clear all",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(bar, area);
}

fn member_row(member: &Member, search_mode: SearchMode) -> Row<'static> {
    let cells = [
        member.full_name(),
        member.email_address.clone(),
        member.mobile_number.clone(),
        member.domain.clone(),
    ];
    let highlighted = match search_mode {
        SearchMode::Name => Some(0),
        SearchMode::Email => Some(1),
        SearchMode::Mobile => Some(2),
        SearchMode::None => None,
    };

    let mut row: Vec<Cell> = cells
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if highlighted == Some(i) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            Cell::from(truncate_to_width(&text, COLUMNS[i].1 as usize)).style(style)
        })
        .collect();

    row.push(
        Cell::from(member.status.label()).style(Style::default().fg(status_color(member.status))),
    );
    row.push(Cell::from(member.verification_status.label()).style(
        Style::default().fg(verification_color(member.verification_status)),
    ));
    row.push(Cell::from(member.formatted_created()).style(Style::default().fg(Color::DarkGray)));
    row.push(
        Cell::from(member.formatted_last_active()).style(Style::default().fg(Color::DarkGray)),
    );

    Row::new(row)
}

/// Column title with the sort arrow on the column that holds the sort field
fn column_title(column: usize, sort: &MemberSort) -> String {
    let title = COLUMNS[column].0;
    let arrow = sort.direction.arrow();
    match (column, sort.field) {
        (0, SortField::FirstName) => format!("{} {} first", title, arrow),
        (0, SortField::LastName) => format!("{} {} last", title, arrow),
        (6, SortField::DateCreated) | (7, SortField::LastActive) => {
            format!("{} {}", title, arrow)
        }
        _ => title.to_string(),
    }
}

fn render_members_table(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    coordinator: &MemberCoordinator,
) {
    let members = dashboard.rows(coordinator.display_members());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Members ({}) · sorted by {} ", members.len(), dashboard.sort))
        .border_style(Style::default().fg(Color::DarkGray));

    if members.is_empty() {
        let (message, hint) = if coordinator.loading() {
            ("Loading members…".to_string(), "")
        } else if let Some(kind) = coordinator.empty_state() {
            (kind.message().to_string(), "Press X to clear all filters")
        } else {
            (String::new(), "")
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new((0..COLUMNS.len()).map(|i| {
        Cell::from(column_title(i, &dashboard.sort)).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .bottom_margin(1);

    let search_mode = coordinator.search().mode;
    let rows: Vec<Row> = members.iter().map(|m| member_row(m, search_mode)).collect();
    let widths = COLUMNS.iter().map(|(_, w)| Constraint::Length(*w));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut dashboard.table_state);
}

fn render_pagination_footer(frame: &mut Frame, area: Rect, coordinator: &MemberCoordinator) {
    let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let shown = coordinator.display_members().len();
    let mut spans = vec![
        Span::styled(
            format!(" Showing {} of {} ", shown, coordinator.total_count()),
            Style::default().fg(Color::White),
        ),
        Span::styled("│ ", disabled),
        Span::styled(
            "◀ Prev ",
            if coordinator.has_previous_page() {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(
            format!(" Page {} ", coordinator.current_page()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " Next ▶",
            if coordinator.has_next_page() {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(" │ ", disabled),
        Span::styled(
            format!("{} per page", coordinator.page_size()),
            Style::default().fg(Color::White),
        ),
    ];

    if coordinator.loading_more() {
        spans.push(Span::styled("  ⟳ loading more…", Style::default().fg(Color::Yellow)));
    } else if coordinator.loading() {
        spans.push(Span::styled("  ⟳ loading…", Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let spans = if let Some(error) = ctx.coordinator.error() {
        vec![
            Span::styled(format!(" Error: {} ", error), Style::default().fg(Color::Red)),
            Span::styled(
                " r ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Retry"),
        ]
    } else if let Some(status) = ctx.status_message {
        vec![Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        )]
    } else {
        Vec::new()
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" / ", Color::Cyan),
        Span::raw("Search "),
        key(" s v d ", Color::Cyan),
        Span::raw("Filter "),
        key(" c a ", Color::Cyan),
        Span::raw("Dates "),
        key(" n p ", Color::Green),
        Span::raw("Page "),
        key(" z ", Color::Green),
        Span::raw("Size "),
        key(" o O ", Color::Green),
        Span::raw("Sort "),
        key(" Enter ", Color::Magenta),
        Span::raw("Profile "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sort::SortDirection;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Jane Smith", 20), "Jane Smith");
        assert_eq!(truncate_to_width("jane.smith@example.com", 10), "jane.smit…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // Each CJK character takes two columns
        let cut = truncate_to_width("会員会員会員", 7);
        assert_eq!(cut, "会員会…");
        assert!(cut.width() <= 7);
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut dashboard = DashboardComponent::new();
        dashboard.next(3);
        assert_eq!(dashboard.selected(), Some(0));
        dashboard.next(3);
        dashboard.next(3);
        dashboard.next(3);
        assert_eq!(dashboard.selected(), Some(2));
        dashboard.previous(3);
        assert_eq!(dashboard.selected(), Some(1));
        dashboard.select_last(3);
        assert_eq!(dashboard.selected(), Some(2));
        dashboard.select_first(0);
        assert_eq!(dashboard.selected(), None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut dashboard = DashboardComponent::new();
        dashboard.select_last(12);
        dashboard.clamp(3);
        assert_eq!(dashboard.selected(), Some(2));
        dashboard.clamp(0);
        assert_eq!(dashboard.selected(), None);
        dashboard.clamp(5);
        assert_eq!(dashboard.selected(), Some(0));
    }

    #[test]
    fn test_key_bindings() {
        let mut dashboard = DashboardComponent::new();
        let cases = [
            (KeyCode::Char('/'), Action::OpenSearch),
            (KeyCode::Char('s'), Action::OpenStatusFilter),
            (KeyCode::Char('X'), Action::ClearAllFilters),
            (KeyCode::Right, Action::NextPage),
            (KeyCode::Char('p'), Action::PrevPage),
            (KeyCode::Char('z'), Action::OpenPageSize),
            (KeyCode::Enter, Action::OpenProfile),
            (KeyCode::Char('r'), Action::Retry),
        ];
        for (code, expected) in cases {
            assert_eq!(dashboard.handle_key_event(key(code)).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_sort_keys_cycle_and_toggle() {
        let mut dashboard = DashboardComponent::new();
        assert_eq!(
            dashboard.handle_key_event(key(KeyCode::Char('o'))).unwrap(),
            Some(Action::SortBy(SortField::LastName))
        );
        assert_eq!(
            dashboard.handle_key_event(key(KeyCode::Char('O'))).unwrap(),
            Some(Action::SortBy(SortField::FirstName))
        );

        dashboard.sort.select(SortField::LastActive);
        assert_eq!(
            dashboard.handle_key_event(key(KeyCode::Char('o'))).unwrap(),
            Some(Action::SortBy(SortField::FirstName))
        );
    }

    #[test]
    fn test_column_title_marks_sorted_column() {
        let mut sort = MemberSort::default();
        assert_eq!(column_title(0, &sort), "Name ↑ first");
        assert_eq!(column_title(6, &sort), "Created");

        sort.select(SortField::DateCreated);
        sort.select(SortField::DateCreated);
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(column_title(0, &sort), "Name");
        assert_eq!(column_title(6, &sort), "Created ↓");
    }

    #[test]
    fn test_ctrl_c_force_quits() {
        let mut dashboard = DashboardComponent::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(dashboard.handle_key_event(event).unwrap(), Some(Action::ForceQuit));
    }
}
