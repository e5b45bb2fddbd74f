//! Picker dialog component
//!
//! Single-choice list used for the status, verification and domain filters
//! and for the page size. Filter pickers start with an "Any" row that
//! clears the filter.

use crate::action::Action;
use crate::component::Component;
use crate::model::modal::PickerKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One selectable row: what is shown and what is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub label: String,
    pub value: String,
}

impl PickerOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Picker dialog
pub struct PickerDialog {
    pub kind: PickerKind,
    pub options: Vec<PickerOption>,
    /// Value currently applied, shown with a marker
    pub current: Option<String>,
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for PickerDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            kind: PickerKind::Status,
            options: Vec::new(),
            current: None,
            selected_index: 0,
            list_state,
        }
    }

    fn offset(&self) -> usize {
        usize::from(self.kind.has_any_option())
    }

    fn row_count(&self) -> usize {
        self.options.len() + self.offset()
    }

    /// Reset the dialog for `kind`, selecting the row of `current` if present
    pub fn open(&mut self, kind: PickerKind, options: Vec<PickerOption>, current: Option<String>) {
        self.kind = kind;
        self.options = options;
        self.selected_index = current
            .as_deref()
            .and_then(|value| self.options.iter().position(|o| o.value == value))
            .map_or(0, |idx| idx + self.offset());
        self.current = current;
        self.list_state.select(Some(self.selected_index));
    }

    /// `Some(None)` is the "Any" row; `None` means nothing is selectable
    pub fn selected_value(&self) -> Option<Option<String>> {
        let offset = self.offset();
        if offset == 1 && self.selected_index == 0 {
            return Some(None);
        }
        self.options
            .get(self.selected_index - offset)
            .map(|o| Some(o.value.clone()))
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.row_count() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn row(&self, label: &str, value: Option<&str>) -> ListItem<'static> {
        let is_current = self.current.as_deref() == value;
        let style = match (is_current, value) {
            (true, _) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, None) => Style::default().fg(Color::DarkGray),
            (false, Some(_)) => Style::default().fg(Color::White),
        };
        ListItem::new(Line::from(vec![
            Span::styled(
                if is_current { "● " } else { "  " },
                Style::default().fg(Color::Green),
            ),
            Span::styled(label.to_string(), style),
        ]))
    }
}

impl Component for PickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.select_prev(),
            Action::ModalDown => self.select_next(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (self.row_count() as u16 + 8)
            .min(area.height.saturating_sub(4))
            .max(10);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(popup_width) / 2,
            area.y + area.height.saturating_sub(popup_height) / 2,
            popup_width,
            popup_height,
        );
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = match &self.current {
            Some(value) => format!("Current: {}", value),
            None => "No filter active".to_string(),
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.kind.title()))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        if self.options.is_empty() && !self.kind.has_any_option() {
            frame.render_widget(
                Paragraph::new("Nothing to choose").block(Block::default().borders(Borders::ALL)),
                chunks[1],
            );
        } else {
            let mut items = Vec::with_capacity(self.row_count());
            if self.kind.has_any_option() {
                items.push(self.row("Any", None));
            }
            for option in &self.options {
                items.push(self.row(&option.label, Some(option.value.as_str())));
            }

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses() -> Vec<PickerOption> {
        vec![
            PickerOption::new("Active", "ACTIVE"),
            PickerOption::new("Inactive", "INACTIVE"),
        ]
    }

    #[test]
    fn test_open_selects_current_value() {
        let mut picker = PickerDialog::new();
        picker.open(PickerKind::Status, statuses(), Some("INACTIVE".to_string()));
        assert_eq!(picker.selected_index, 2);
        assert_eq!(picker.selected_value(), Some(Some("INACTIVE".to_string())));
    }

    #[test]
    fn test_any_row_clears() {
        let mut picker = PickerDialog::new();
        picker.open(PickerKind::Status, statuses(), None);
        assert_eq!(picker.selected_value(), Some(None));

        picker.update(Action::ModalDown).unwrap();
        assert_eq!(picker.selected_value(), Some(Some("ACTIVE".to_string())));
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut picker = PickerDialog::new();
        picker.open(PickerKind::Status, statuses(), None);
        for _ in 0..5 {
            picker.update(Action::ModalDown).unwrap();
        }
        assert_eq!(picker.selected_index, 2);
        for _ in 0..5 {
            picker.update(Action::ModalUp).unwrap();
        }
        assert_eq!(picker.selected_index, 0);
    }

    #[test]
    fn test_page_size_picker_has_no_any_row() {
        let mut picker = PickerDialog::new();
        let sizes = vec![PickerOption::new("10", "10"), PickerOption::new("20", "20")];
        picker.open(PickerKind::PageSize, sizes, Some("20".to_string()));
        assert_eq!(picker.selected_index, 1);
        assert_eq!(picker.selected_value(), Some(Some("20".to_string())));
    }

    #[test]
    fn test_empty_page_size_list_selects_nothing() {
        let mut picker = PickerDialog::new();
        picker.open(PickerKind::PageSize, Vec::new(), None);
        assert_eq!(picker.selected_value(), None);
    }
}
