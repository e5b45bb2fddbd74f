//! Member profile dialog component
//!
//! Read-only view of every field of one member.

use crate::action::Action;
use crate::component::Component;
use crate::model::filter::format_iso;
use crate::model::Member;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Member profile dialog component
#[derive(Default)]
pub struct MemberProfileDialog {
    pub member: Option<Member>,
}

impl MemberProfileDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_member(&mut self, member: Option<Member>) {
        self.member = member;
    }
}

impl Component for MemberProfileDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let content = match &self.member {
            Some(member) => render_member(member),
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Member not available",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Member Profile ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(paragraph, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Esc/Enter ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

fn field(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<14}", label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Lines for one member, grouped into identity, contact and activity
pub fn render_member(member: &Member) -> Vec<Line<'static>> {
    let divider = Line::from(Span::styled(
        "  ─────────────────────────────────────────────",
        Style::default().fg(Color::DarkGray),
    ));

    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", member.full_name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        divider.clone(),
        field("ID", member.id.clone(), Color::DarkGray),
        field("Status", member.status.label().to_string(), Color::White),
        field(
            "Verification",
            member.verification_status.label().to_string(),
            Color::White,
        ),
        Line::from(""),
        field("Email", member.email_address.clone(), Color::White),
        field("Mobile", member.mobile_number.clone(), Color::White),
        field("Domain", member.domain.clone(), Color::White),
        Line::from(""),
        field(
            "Created",
            format!("{}  ({})", member.formatted_created(), format_iso(&member.date_created)),
            Color::White,
        ),
        field(
            "Last Active",
            format!(
                "{}  ({})",
                member.formatted_last_active(),
                format_iso(&member.last_active)
            ),
            Color::White,
        ),
        divider,
    ]
}
