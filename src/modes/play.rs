use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{Renderer, grid_for_viewport};
use crate::timing::{TimerEvent, TimingController};

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start overlay, timers stopped
    Ready,
    Running,
    /// Game over or board cleared, timers stopped
    Over,
}

pub struct PlayMode {
    engine: GameEngine,
    timers: TimingController,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    phase: Phase,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let timers = TimingController::from_config(&config);
        let engine = GameEngine::new(config).context("Failed to create game engine")?;

        Ok(Self {
            engine,
            timers,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            phase: Phase::Ready,
            should_quit: false,
        })
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.engine.config().fit_to_terminal {
            let (width, height) =
                crossterm::terminal::size().context("Failed to query terminal size")?;
            self.resize(width, height)?;
        }

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw at ~30 FPS independently of the game tick
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                event = self.timers.next() => {
                    self.on_timer(event);
                }

                _ = render_timer.tick() => {
                    let state = self.engine.state();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, &self.metrics, self.phase);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.timers.cancel();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind == KeyEventKind::Press {
                    let action = self.input_handler.handle_key_event(key);
                    self.handle_key_action(action);
                }
            }
            Event::Resize(width, height) => self.resize(width, height)?,
            _ => {}
        }

        Ok(())
    }

    fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if !self.engine.set_direction(direction) {
                    debug!(?direction, "direction change ignored");
                }
            }
            KeyAction::Start => self.start_game(),
            KeyAction::Restart => self.restart_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn on_timer(&mut self, event: TimerEvent) {
        if self.phase != Phase::Running {
            return;
        }

        match event {
            TimerEvent::Tick => self.update_game(),
            TimerEvent::Clock => self.engine.advance_clock(self.timers.clock_period()),
        }
    }

    fn update_game(&mut self) {
        let state = self.engine.tick();
        self.metrics.observe_score(state.score);

        if !state.is_alive {
            let (score, outcome) = (state.score, state.outcome);
            self.timers.cancel();
            self.metrics.on_game_over(score, outcome);
            self.phase = Phase::Over;
        }
    }

    fn start_game(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.phase = Phase::Running;
        self.timers.start();
        info!("game started");
    }

    fn restart_game(&mut self) {
        self.engine.reset();
        self.phase = Phase::Running;
        self.timers.start();
        info!("game restarted");
    }

    /// Re-derive the grid from a new terminal size and go back to the start screen
    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if !self.engine.config().fit_to_terminal {
            return Ok(());
        }

        let (rows, cols) = grid_for_viewport(width, height);
        self.timers.cancel();
        self.engine
            .configure(rows, cols)
            .context("Failed to resize grid")?;
        self.phase = Phase::Ready;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
