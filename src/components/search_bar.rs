//! Search bar component
//!
//! One text input plus a target field (name, email or mobile). Tab cycles
//! the target; Enter submits; an empty submission clears the search. Known
//! values for the target are offered below the input and picked with ↑/↓.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{FilterOptions, SearchMode, SearchSpec};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const MAX_SUGGESTIONS: usize = 5;

/// Search input dialog
pub struct SearchBar {
    pub mode: SearchMode,
    pub input: String,
    /// Values offered as suggestions, refreshed on open
    pub options: FilterOptions,
    /// Highlighted suggestion; `None` keeps the typed text
    pub suggestion: Option<usize>,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Name,
            input: String::new(),
            options: FilterOptions::default(),
            suggestion: None,
        }
    }

    /// Prefill from the active search, or start empty on the name field
    pub fn open(&mut self, current: &SearchSpec, options: &FilterOptions) {
        if current.is_active() {
            self.mode = current.mode;
            self.input = current.term.clone();
        } else {
            self.mode = SearchMode::Name;
            self.input.clear();
        }
        self.options = options.clone();
        self.suggestion = None;
    }

    /// Known values for the target that contain the input, case-insensitively
    pub fn suggestions(&self) -> Vec<&str> {
        let needle = self.input.trim().to_lowercase();
        self.options
            .search_values(self.mode)
            .iter()
            .filter(|value| value.to_lowercase().contains(&needle))
            .map(String::as_str)
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Term to submit: the highlighted suggestion, else the typed text
    pub fn term(&self) -> String {
        self.suggestion
            .and_then(|i| self.suggestions().get(i).map(|s| s.to_string()))
            .unwrap_or_else(|| self.input.clone())
    }

    fn suggestion_down(&mut self) {
        let count = self.suggestions().len();
        self.suggestion = match self.suggestion {
            _ if count == 0 => None,
            None => Some(0),
            Some(i) => Some((i + 1).min(count - 1)),
        };
    }

    fn suggestion_up(&mut self) {
        self.suggestion = match self.suggestion {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }
}

impl Component for SearchBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Backspace => Some(Action::TextBackspace),
            KeyCode::Char(c) => Some(Action::TextInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::TextInput(c) => {
                self.input.push(c);
                self.suggestion = None;
            }
            Action::TextBackspace => {
                self.input.pop();
                self.suggestion = None;
            }
            Action::NextField => {
                self.mode = self.mode.next_target();
                self.suggestion = None;
            }
            Action::ModalDown => self.suggestion_down(),
            Action::ModalUp => self.suggestion_up(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let suggestions = self.suggestions();
        let list_height = if suggestions.is_empty() {
            0
        } else {
            suggestions.len() as u16 + 2
        };
        let popup_area = centered_popup(area, 60, 9 + list_height);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // target tabs
                Constraint::Length(3),           // input
                Constraint::Length(list_height), // suggestions
                Constraint::Min(1),              // help
            ])
            .split(popup_area);

        let mut tabs = vec![Span::raw(" ")];
        for mode in [SearchMode::Name, SearchMode::Email, SearchMode::Mobile] {
            let style = if mode == self.mode {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(format!(" {} ", mode.label()), style));
            tabs.push(Span::raw(" "));
        }
        let tab_bar = Paragraph::new(Line::from(tabs)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(tab_bar, chunks[0]);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(self.input.clone(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(input, chunks[1]);

        if !suggestions.is_empty() {
            let items: Vec<ListItem> = suggestions
                .iter()
                .map(|value| ListItem::new(value.to_string()))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Known values ")
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                );
            let mut state = ListState::default().with_selected(self.suggestion);
            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Search  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Field  "),
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Suggestion  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(help, chunks[3]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::mock_members;

    fn bar_with_options() -> SearchBar {
        let mut bar = SearchBar::new();
        bar.open(&SearchSpec::none(), &FilterOptions::from_members(&mock_members()));
        bar
    }

    fn type_text(bar: &mut SearchBar, text: &str) {
        for c in text.chars() {
            bar.update(Action::TextInput(c)).unwrap();
        }
    }

    #[test]
    fn test_open_prefills_active_search() {
        let mut bar = SearchBar::new();
        let options = FilterOptions::default();
        bar.open(&SearchSpec::new(SearchMode::Email, "kayak"), &options);
        assert_eq!(bar.mode, SearchMode::Email);
        assert_eq!(bar.input, "kayak");

        bar.open(&SearchSpec::none(), &options);
        assert_eq!(bar.mode, SearchMode::Name);
        assert!(bar.input.is_empty());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut bar = SearchBar::new();
        type_text(&mut bar, "ann");
        bar.update(Action::TextBackspace).unwrap();
        assert_eq!(bar.input, "an");
    }

    #[test]
    fn test_tab_cycles_target() {
        let mut bar = SearchBar::new();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        let action = bar.handle_key_event(tab).unwrap().unwrap();
        bar.update(action).unwrap();
        assert_eq!(bar.mode, SearchMode::Email);
        bar.update(Action::NextField).unwrap();
        bar.update(Action::NextField).unwrap();
        assert_eq!(bar.mode, SearchMode::Name);
    }

    #[test]
    fn test_letters_are_text_not_shortcuts() {
        let mut bar = SearchBar::new();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(bar.handle_key_event(q).unwrap(), Some(Action::TextInput('q')));
    }

    #[test]
    fn test_suggestions_match_active_target() {
        let mut bar = bar_with_options();
        type_text(&mut bar, "BROW");
        assert_eq!(bar.suggestions(), vec!["Browni ex23", "browni ex23"]);

        bar.update(Action::NextField).unwrap();
        assert_eq!(
            bar.suggestions(),
            vec!["browni23@example.com", "browni23b@example.com"]
        );

        bar.update(Action::NextField).unwrap();
        assert!(bar.suggestions().is_empty());
    }

    #[test]
    fn test_suggestions_are_capped() {
        let bar = bar_with_options();
        assert_eq!(bar.suggestions().len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_highlighted_suggestion_becomes_term() {
        let mut bar = bar_with_options();
        bar.update(Action::NextField).unwrap();
        type_text(&mut bar, "de");
        assert_eq!(bar.suggestions(), vec!["derek@example.com", "aden@example.com"]);
        assert_eq!(bar.term(), "de");

        bar.update(Action::ModalDown).unwrap();
        bar.update(Action::ModalDown).unwrap();
        assert_eq!(bar.term(), "aden@example.com");

        // Past the last suggestion the highlight stays put
        bar.update(Action::ModalDown).unwrap();
        bar.update(Action::ModalDown).unwrap();
        assert_eq!(bar.suggestion, Some(1));

        bar.update(Action::ModalUp).unwrap();
        bar.update(Action::ModalUp).unwrap();
        bar.update(Action::ModalUp).unwrap();
        assert_eq!(bar.suggestion, None);
        assert_eq!(bar.term(), "de");
    }

    #[test]
    fn test_typing_drops_highlight() {
        let mut bar = bar_with_options();
        bar.update(Action::ModalDown).unwrap();
        assert!(bar.suggestion.is_some());
        type_text(&mut bar, "j");
        assert_eq!(bar.suggestion, None);
    }
}
