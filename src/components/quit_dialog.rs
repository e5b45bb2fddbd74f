//! Quit confirmation dialog
//!
//! In-flight requests are abandoned on quit; their threads finish on their own.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Quit confirmation dialog
#[derive(Default)]
pub struct QuitDialog {
    /// A members request was still loading when the dialog opened
    pub request_pending: bool,
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        })
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = if self.request_pending { 8 } else { 7 };
        let popup_area = centered_popup(area, 44, height);
        frame.render_widget(Clear, popup_area);

        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled("Leave the members dashboard?", bold(Color::White))),
        ];
        if self.request_pending {
            content.push(Line::from(Span::styled(
                "A request is still loading",
                Style::default().fg(Color::DarkGray),
            )));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(" y ", bold(Color::Green)),
            Span::raw("Quit  "),
            Span::styled(" n/Esc ", bold(Color::Red)),
            Span::raw("Stay"),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Quit members-tui ")
            .title_style(bold(Color::Yellow))
            .border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(
            Paragraph::new(content).alignment(Alignment::Center).block(block),
            popup_area,
        );
        Ok(())
    }
}
