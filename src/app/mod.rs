//! Dashboard controller and main event loop
//!
//! Owns the terminal, the view state and the sync engine, and drives startup,
//! input, rendering and shutdown.

mod signals;
mod startup;
mod state;
pub mod status;

pub use signals::InterruptFlag;
pub use startup::Startup;
pub use state::{Direction, Focus, PromptEdit, PromptPurpose, PromptState, ViewState};

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::git::RepoClient;
use crate::sync::SyncEngine;
use crate::tui::views::{render_dashboard, render_loading_indicator, render_prompt};
use crate::tui::Tui;

/// Main application struct
pub struct App {
    config: Config,
    pub(crate) state: ViewState,
    engine: SyncEngine,
    startup: Startup,
    interrupted: InterruptFlag,
    pub(crate) tui: Tui,
    /// Loading text shown in the last rendered frame
    last_loading_message: Option<String>,
    shut_down: bool,
}

impl App {
    /// Create the application for one repository
    ///
    /// Must be called from within the tokio runtime; fails only if the
    /// terminal cannot be opened.
    pub async fn new(config: Config, repo: Arc<dyn RepoClient>) -> Result<Self> {
        tracing::info!(
            "Opening dashboard for {} (grace period {:?})",
            repo.workdir().display(),
            config.grace_period()
        );

        let interrupted = InterruptFlag::new();
        signals::listen_for_interrupts(interrupted.clone());

        Ok(Self {
            state: ViewState::new(config.status_display()),
            engine: SyncEngine::new(repo, config.commit_message.clone()),
            startup: Startup::new(config.grace_period()),
            interrupted,
            tui: Tui::new()?,
            last_loading_message: None,
            shut_down: false,
            config,
        })
    }

    /// Run the application until quit or interrupted
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        self.engine.start_initial_load();
        let result = self.event_loop().await;

        self.shutdown();
        result
    }

    /// Restore the terminal. Only the first call does anything.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("Shutting down");
        if let Err(e) = self.tui.exit() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }

    /// Main event loop
    async fn event_loop(&mut self) -> Result<()> {
        let tick_rate = self.config.tick_rate();

        // Always render on first frame
        self.state.needs_render = true;

        loop {
            if self.state.needs_render {
                self.render()?;
                self.state.needs_render = false;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => self.state.needs_render = true,
                    _ => {}
                }
            }

            self.process_completions();
            self.advance_startup();

            // Expired notices clear, running spinners animate
            if self.state.status.tick() || self.state.status.is_running() {
                self.state.needs_render = true;
            }

            if self.interrupted.is_set() || self.state.should_quit {
                tracing::info!("Leaving event loop");
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Raw mode delivers Ctrl+C as a key, so treat it as SIGINT
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c'))
        {
            tracing::info!("Received Ctrl+C, shutting down");
            self.interrupted.set();
            return;
        }

        self.engine.dispatch(&mut self.state, key);
        self.state.needs_render = true;
    }

    /// Drain finished operations into the view state
    fn process_completions(&mut self) {
        while let Some(completion) = self.engine.try_next_completion() {
            let operation = self.engine.handle_completion(&mut self.state, completion);
            if self.startup.record(&operation) {
                tracing::info!("Initial load finished");
                self.state.set_focus(Focus::Unstaged);
            }
            self.state.needs_render = true;
        }
    }

    /// Open the readiness gate once the grace period has passed
    fn advance_startup(&mut self) {
        if self.state.is_ready() {
            return;
        }
        if self.startup.gate_due() {
            if self.state.open_gate() {
                tracing::info!("Accepting keyboard input");
                self.last_loading_message = None;
                self.state.needs_render = true;
            }
            return;
        }
        // Countdown text changes once a second
        let message = self.startup.loading_message();
        if self.last_loading_message.as_deref() != Some(message.as_str()) {
            self.last_loading_message = Some(message);
            self.state.needs_render = true;
        }
    }

    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        let loading = if state.is_ready() {
            None
        } else {
            Some(self.startup.loading_message())
        };

        self.tui.draw(|frame| {
            let area = frame.size();
            render_dashboard(frame, area, state);
            if let Some(prompt) = state.prompt() {
                render_prompt(frame, area, prompt);
            }
            if let Some(message) = &loading {
                render_loading_indicator(frame, area, message);
            }
        })
    }
}
