//! Date range dialog component
//!
//! Two inputs, From and To. A bare date (`2024-01-12`) covers the whole UTC
//! day; a date with a time (`2024-01-12 09:30`) is used as typed. Either
//! side may be left blank for an open bound.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::modal::DateField;
use crate::model::DateRange;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse one bound. Blank is open; a bare date expands to the day's edge.
pub fn parse_bound(input: &str, end_of_day: bool) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT) {
        return Ok(Some(dt.and_utc()));
    }

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| format!("'{}' is not YYYY-MM-DD or YYYY-MM-DD HH:MM", input))?;
    Ok(DateRange::day_bound(date, end_of_day))
}

/// Inverse of `parse_bound` for prefilling the inputs
fn format_bound(value: &DateTime<Utc>, end_of_day: bool) -> String {
    let is_day_edge = if end_of_day {
        Some(value.time()) == NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
    } else {
        value.time() == NaiveTime::MIN
    };
    if is_day_edge {
        value.format(DATE_FORMAT).to_string()
    } else {
        value.format(DATE_TIME_FORMAT).to_string()
    }
}

/// Date range dialog
pub struct DateRangeDialog {
    pub field: DateField,
    pub from: String,
    pub to: String,
    /// Focus is on the To input
    pub editing_to: bool,
    pub error: Option<String>,
}

impl Default for DateRangeDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRangeDialog {
    pub fn new() -> Self {
        Self {
            field: DateField::Created,
            from: String::new(),
            to: String::new(),
            editing_to: false,
            error: None,
        }
    }

    pub fn open(&mut self, field: DateField, current: Option<&DateRange>) {
        self.field = field;
        self.from = current
            .and_then(|r| r.gte.as_ref())
            .map(|v| format_bound(v, false))
            .unwrap_or_default();
        self.to = current
            .and_then(|r| r.lte.as_ref())
            .map(|v| format_bound(v, true))
            .unwrap_or_default();
        self.editing_to = false;
        self.error = None;
    }

    /// `Ok(None)` clears the filter
    pub fn to_range(&self) -> Result<Option<DateRange>, String> {
        let gte = parse_bound(&self.from, false)?;
        let lte = parse_bound(&self.to, true)?;
        if let (Some(start), Some(end)) = (gte, lte) {
            if start > end {
                return Err("Start must be before end".to_string());
            }
        }
        Ok(DateRange::from_datetimes(gte, lte))
    }

    fn focused(&mut self) -> &mut String {
        if self.editing_to {
            &mut self.to
        } else {
            &mut self.from
        }
    }

    fn input_block(&self, title: &'static str, focused: bool, value: &str) -> Paragraph<'static> {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(Color::White))];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        )
    }
}

impl Component for DateRangeDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => Some(Action::NextField),
            KeyCode::Backspace => Some(Action::TextBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == ':' || c == ' ' => {
                Some(Action::TextInput(c))
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::TextInput(c) => {
                self.focused().push(c);
                self.error = None;
            }
            Action::TextBackspace => {
                self.focused().pop();
                self.error = None;
            }
            Action::NextField => self.editing_to = !self.editing_to,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 48, 13);
        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.field.title()))
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // From
                Constraint::Length(3), // To
                Constraint::Length(1), // error / format hint
                Constraint::Min(1),    // help
            ])
            .split(inner);

        frame.render_widget(
            self.input_block(" From ", !self.editing_to, &self.from),
            chunks[0],
        );
        frame.render_widget(self.input_block(" To ", self.editing_to, &self.to), chunks[1]);

        let hint = match &self.error {
            Some(error) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
            None => Span::styled(
                "YYYY-MM-DD or YYYY-MM-DD HH:MM, blank for open",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(hint)), chunks[2]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("From/To  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(help, chunks[3]);

        Ok(())
    }
}
