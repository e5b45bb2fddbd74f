//! Help dialog component
//!
//! Lists every keyboard shortcut, grouped by what it acts on.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SHORTCUTS: &[Section] = &[
    (
        "Table",
        &[
            ("j / ↓", "Next member"),
            ("k / ↑", "Previous member"),
            ("g / G", "First / last member"),
            ("Enter", "Open member profile"),
            ("o", "Sort by the next field"),
            ("O", "Reverse the sort order"),
        ],
    ),
    (
        "Pages",
        &[
            ("n / →", "Next page"),
            ("p / ←", "Previous page"),
            ("z", "Change page size"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Open search"),
            ("Tab", "Switch name / email / mobile"),
            ("↑ / ↓", "Pick a known value"),
            ("Enter", "Run search (empty clears)"),
            ("x", "Clear search"),
        ],
    ),
    (
        "Filters",
        &[
            ("s", "Filter by status"),
            ("v", "Filter by verification"),
            ("d", "Filter by domain"),
            ("c", "Date created range"),
            ("a", "Last active range"),
            ("X", "Clear search and all filters"),
        ],
    ),
    (
        "General",
        &[
            ("r", "Retry after an error"),
            ("?", "Show this help"),
            ("q", "Quit"),
            ("Ctrl+c", "Quit immediately"),
        ],
    ),
];

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl HelpDialog {
    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = help_lines();
        let dialog_area = centered_popup(area, 56, (lines.len() as u16 + 2).min(area.height));
        frame.render_widget(Clear, dialog_area);

        let visible = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let total = lines.len();
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }

        Ok(())
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SHORTCUTS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {:10}", key),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*description),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  q, Esc or ? closes this dialog",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
