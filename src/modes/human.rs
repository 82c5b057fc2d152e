use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{Direction, GameConfig, GridSimulation, Speed};
use crate::input::{InputHandler, KeyAction, SwipeDetector};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;
use crate::scheduler::StepScheduler;

/// Interactive terminal game driven by keyboard and mouse drags
pub struct HumanMode {
    config: GameConfig,
    sim: GridSimulation,
    scheduler: StepScheduler,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeDetector,
    should_quit: bool,
}

impl HumanMode {
    /// Fails when the configuration cannot start a session
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut sim = GridSimulation::new(config.seed);
        sim.reset(&config).context("Invalid game configuration")?;

        Ok(Self {
            scheduler: StepScheduler::new(config.speed.tick_interval()),
            swipe: SwipeDetector::new(config.swipe_threshold),
            sim,
            config,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.scheduler.start();
        info!(speed = self.config.speed.as_str(), "Game started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!(%err, "Terminal event error"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.scheduler.next_tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics, self.config.speed);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(score = self.sim.score(), "Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => self.turn(direction),
                    KeyAction::ChangeSpeed(speed) => self.change_speed(speed),
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.swipe.handle_mouse_event(mouse) {
                    self.turn(direction);
                }
            }
            _ => {}
        }
    }

    fn turn(&mut self, direction: Direction) {
        if self.sim.set_direction(direction) {
            debug!(?direction, "Turn queued");
        }
    }

    fn change_speed(&mut self, speed: Speed) {
        self.config.speed = speed;
        self.scheduler.set_interval(speed.tick_interval());
    }

    fn update_game(&mut self) {
        let outcome = self.scheduler.step(&mut self.sim);

        if let Some(reason) = outcome.termination {
            self.metrics.on_game_over(self.sim.score(), Some(reason));
        }
    }

    fn reset_game(&mut self) {
        let abandoned_score = self.sim.is_running().then(|| self.sim.score());

        // The config was validated in `new`, so this only fails if it was edited since
        if let Err(err) = self.sim.reset(&self.config) {
            warn!(%err, "Restart rejected");
            return;
        }
        if let Some(score) = abandoned_score {
            self.metrics.on_game_over(score, None);
        }
        self.metrics.on_game_start();
        if !self.scheduler.is_running() {
            self.scheduler.start();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, SessionState};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default().with_seed(1)).unwrap();
        assert!(mode.sim.is_running());
        assert_eq!(mode.sim.score(), 0);
        assert!(!mode.scheduler.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HumanMode::new(GameConfig::new(0, 0)).is_err());
    }

    #[test]
    fn test_key_turns_snake() {
        let mut mode = HumanMode::new(GameConfig::small().with_seed(2)).unwrap();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.sim.pending_direction(), Some(Direction::Up));

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_and_restart() {
        let config = GameConfig::small()
            .with_start(Position::new(0, 0))
            .with_seed(3);
        let mut mode = HumanMode::new(config).unwrap();
        mode.scheduler.start();

        mode.handle_event(key(KeyCode::Left));
        mode.update_game();
        assert_eq!(mode.sim.state(), SessionState::Terminated);
        assert!(!mode.scheduler.is_running());
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r')));
        assert!(mode.sim.is_running());
        assert!(mode.scheduler.is_running());
        assert_eq!(mode.sim.head(), Position::new(0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_game_counts_as_played() {
        let config = GameConfig::small()
            .with_start(Position::new(1, 1))
            .with_seed(5);
        let mut mode = HumanMode::new(config).unwrap();
        mode.scheduler.start();
        mode.sim = GridSimulation::restore(
            &mode.config,
            vec![Position::new(1, 1)],
            Some(Direction::Right),
            Position::new(2, 1),
        )
        .unwrap();
        mode.update_game();
        assert_eq!(mode.sim.score(), 10);

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.best_score, 10);
        assert_eq!(mode.metrics.last_outcome, None);
        assert_eq!(mode.sim.score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change() {
        let mut mode = HumanMode::new(GameConfig::default().with_seed(4)).unwrap();
        mode.scheduler.start();

        mode.handle_event(key(KeyCode::Char('3')));
        assert_eq!(mode.config.speed, Speed::Fast);
        assert_eq!(mode.scheduler.interval(), Speed::Fast.tick_interval());
    }
}
