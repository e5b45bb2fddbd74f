//! Terminal lifecycle and event polling
//!
//! `Tui` owns the ratatui terminal. `enter` switches to raw mode on the
//! alternate screen; `exit` (also run on drop) puts the terminal back.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);

/// Leave the alternate screen and hand the terminal back to the shell
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(cursor::Show)?;
    Ok(())
}

/// Terminal wrapper for the dashboard
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long `next_event` waits before reporting a tick
    pub tick_rate: Duration,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            tick_rate: DEFAULT_TICK_RATE,
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Raw mode, alternate screen, mouse capture
    pub fn enter(&mut self) -> Result<()> {
        tracing::debug!("entering alternate screen");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(cursor::Hide)?;
        self.active = true;
        self.terminal.clear()?;
        Ok(())
    }

    /// Undo `enter`; calling it twice is harmless
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        tracing::debug!("restoring terminal");
        self.active = false;
        restore_terminal()?;
        Ok(())
    }

    /// Wait up to `tick_rate` for input. `None` means the tick elapsed.
    ///
    /// Key releases and repeats are dropped so each press maps to one Action.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            other => Ok(Some(other)),
        }
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tick_rate() {
        // Building the backend does not need a TTY; entering does
        if let Ok(tui) = Tui::new() {
            let tui = tui.with_tick_rate(Duration::from_millis(250));
            assert_eq!(tui.tick_rate, Duration::from_millis(250));
            assert!(!tui.active);
        }
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        if let Ok(mut tui) = Tui::new() {
            assert!(tui.exit().is_ok());
        }
    }
}
