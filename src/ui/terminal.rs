// Terminal ownership for the playlist view
// Keeps the list scroll state between frames; raw mode is only touched for the real stdout terminal

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    widgets::ListState,
    Terminal,
};
use std::io;

use super::form::AddForm;
use super::render;
use super::screen::{LayoutHits, Renderer, Screen};

pub struct TerminalManager<B: Backend = CrosstermBackend<io::Stdout>> {
    terminal: Terminal<B>,
    list_state: ListState,
    /// Only set when this manager switched the real terminal into raw mode.
    _raw_mode: Option<RawModeGuard>,
}

/// Leaves raw mode and the alternate screen when dropped, error or not.
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        leave_raw_mode();
    }
}

// Escape sequences only; the log file is the place for anything else
fn leave_raw_mode() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show);
}

impl TerminalManager {
    /// Take over stdout: raw mode, alternate screen, mouse capture.
    pub fn new() -> Result<Self> {
        // A previous run may have died mid-frame
        leave_raw_mode();

        enable_raw_mode()?;
        let guard = RawModeGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut manager = Self::with_backend(CrosstermBackend::new(stdout))?;
        manager.terminal.clear()?;
        manager._raw_mode = Some(guard);
        Ok(manager)
    }
}

impl<B: Backend> TerminalManager<B> {
    /// Draw onto any ratatui backend without touching the process terminal.
    pub fn with_backend(backend: B) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            list_state: ListState::default(),
            _raw_mode: None,
        })
    }
}

impl<B: Backend> Renderer for TerminalManager<B> {
    fn present(&mut self, screen: &Screen, form: &AddForm) -> Result<LayoutHits> {
        let mut hits = LayoutHits::default();
        let list_state = &mut self.list_state;
        self.terminal.draw(|f| {
            hits = render::draw(f, screen, form, list_state);
        })?;
        Ok(hits)
    }
}

impl<B: Backend> Drop for TerminalManager<B> {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        let _ = self.terminal.show_cursor();
    }
}
