// Main event loop - input in, commands to the controller, frame out
// Single-threaded: every event is handled to completion before the next poll

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::{sync::mpsc, time::sleep};
use tracing::{debug, info, warn};

use super::events::{key_to_app_event, key_to_form_event, key_to_help_event, mouse_to_app_event, AppEvent};
use super::form::AddForm;
use super::screen::{LayoutHits, Renderer, Screen};
use crate::audio::{Playback, PlayerEvent};
use crate::config::UiConfig;
use crate::controller::{Command, Controller, Outcome};

pub struct App<P: Playback, R: Renderer> {
    controller: Controller<P>,
    renderer: R,
    player_events: mpsc::UnboundedReceiver<PlayerEvent>,

    // UI state
    form: AddForm,
    highlighted: usize,
    last_active: Option<usize>,
    show_help: bool,
    status_message: Option<(String, Instant)>,
    status_timeout: Duration,
    tick_rate: Duration,
    hits: LayoutHits,
    should_quit: bool,
}

impl<P: Playback, R: Renderer> App<P, R> {
    pub fn new(
        controller: Controller<P>,
        renderer: R,
        player_events: mpsc::UnboundedReceiver<PlayerEvent>,
        ui: &UiConfig,
    ) -> Self {
        let last_active = controller.playlist().active_index();
        Self {
            controller,
            renderer,
            player_events,
            form: AddForm::new(),
            highlighted: last_active.unwrap_or(0),
            last_active,
            show_help: false,
            status_message: None,
            status_timeout: Duration::from_millis(ui.status_timeout_ms),
            tick_rate: Duration::from_millis(ui.tick_rate_ms),
            hits: LayoutHits::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("🎵 Entering event loop");

        while !self.should_quit {
            // Every queued event is handled before the next frame
            if event::poll(Duration::from_millis(50))? {
                self.handle_terminal_event(event::read()?);
                while !self.should_quit && event::poll(Duration::ZERO)? {
                    self.handle_terminal_event(event::read()?);
                }
            }

            self.controller.playback_mut().tick();
            self.pump_player_events();

            self.render()?;

            sleep(self.tick_rate).await;
        }

        info!("👋 Event loop finished");
        Ok(())
    }

    pub fn handle_terminal_event(&mut self, terminal_event: Event) {
        let app_event = match terminal_event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(key),
            Event::Mouse(mouse) if !self.form.is_open() && !self.show_help => {
                mouse_to_app_event(mouse, &self.hits)
            }
            _ => None,
        };

        if let Some(app_event) = app_event {
            self.handle_event(app_event);
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<AppEvent> {
        if self.form.is_open() {
            key_to_form_event(key)
        } else if self.show_help {
            key_to_help_event(key)
        } else {
            key_to_app_event(key, self.controller.volume_step())
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Command(command) => {
                self.run_command(command);
            }
            AppEvent::Row(action) => {
                if !self.controller.playlist().is_empty() {
                    self.run_command(action.command(self.highlighted));
                }
            }
            AppEvent::ClickRow(index) => {
                self.highlighted = index;
                self.run_command(Command::Select(index));
            }
            AppEvent::HighlightUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            AppEvent::HighlightDown => {
                let len = self.controller.playlist().len();
                if self.highlighted + 1 < len {
                    self.highlighted += 1;
                }
            }
            AppEvent::OpenForm => self.form.open(),
            AppEvent::ToggleHelp => self.show_help = !self.show_help,

            AppEvent::FormInput(c) => self.form.push(c),
            AppEvent::FormBackspace => self.form.pop(),
            AppEvent::FormNextField => self.form.focus_next(),
            AppEvent::FormPreviousField => self.form.focus_previous(),
            AppEvent::FormCancel => self.form.close(),
            AppEvent::FormSubmit => self.submit_form(),
        }
    }

    fn submit_form(&mut self) {
        let draft = self.form.to_draft();
        let title = draft.title.trim().to_string();

        if self.run_command(Command::Add(draft)) == Some(Outcome::Applied) {
            self.form.clear();
            self.highlighted = self.controller.playlist().len().saturating_sub(1);
            self.set_status(&format!("➕ Added: {}", title));
        } else {
            debug!("Add form rejected, keeping input");
        }
    }

    fn run_command(&mut self, command: Command) -> Option<Outcome> {
        let outcome = match self.controller.dispatch(command) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Command failed: {}", e);
                self.set_status(&format!("❌ {}", e));
                None
            }
        };

        if outcome == Some(Outcome::Quit) {
            self.should_quit = true;
        }
        self.after_update();
        outcome
    }

    /// Drain whatever the audio engine reported since the last frame.
    pub fn pump_player_events(&mut self) {
        while let Ok(player_event) = self.player_events.try_recv() {
            self.controller.handle_player_event(player_event);
        }
        self.after_update();
    }

    fn after_update(&mut self) {
        if let Some(message) = self.controller.take_status() {
            self.set_status(&message);
        }

        // Follow the active track when it moves, otherwise leave the highlight alone
        let active = self.controller.playlist().active_index();
        if active != self.last_active {
            if let Some(index) = active {
                self.highlighted = index;
            }
            self.last_active = active;
        }

        let len = self.controller.playlist().len();
        self.highlighted = self.highlighted.min(len.saturating_sub(1));
    }

    fn set_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), Instant::now()));
    }

    pub fn screen(&self) -> Screen {
        let mut screen = Screen::build(&self.controller);
        screen.highlighted = self.highlighted;
        screen.show_help = self.show_help;
        screen.status = self
            .status_message
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < self.status_timeout)
            .map(|(message, _)| message.clone());
        screen
    }

    fn render(&mut self) -> Result<()> {
        let screen = self.screen();
        self.hits = self.renderer.present(&screen, &self.form)?;
        Ok(())
    }

    pub fn controller(&self) -> &Controller<P> {
        &self.controller
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
