use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;

use crate::feedback::{Feedback, FeedbackObserver, Notifier};
use crate::game::GameSnapshot;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::{HighScore, HighScoreBoard};
use crate::store::KeyValueStore;
use crate::tick::{GameSession, TickScheduler};

/// Keyboard-driven game in the terminal
pub struct HumanMode {
    session: GameSession,
    scheduler: TickScheduler,
    snapshots: watch::Receiver<Arc<GameSnapshot>>,
    high_score: watch::Receiver<HighScore>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    notifier: Arc<dyn Notifier>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new<S>(mut session: GameSession, store: S, notifier: Arc<dyn Notifier>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let board = HighScoreBoard::load(store);
        let high_score = board.subscribe();
        session.add_observer(Box::new(board));
        session.add_observer(Box::new(FeedbackObserver::new(notifier.clone())));

        let scheduler = TickScheduler::new(session.config().tick_interval());
        let snapshots = session.subscribe();

        Self {
            session,
            scheduler,
            snapshots,
            high_score,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            notifier,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
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

        // The timer goes with the view, however the loop ended
        self.scheduler.stop();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame) so the clock keeps moving
        let mut render_timer = interval(Duration::from_millis(33));

        self.scheduler.start();
        info!(
            "game loop running at {:?} per tick",
            self.scheduler.period()
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; observers see every tick, finished game or not
                _ = self.scheduler.tick() => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            "leaving after {} games, {} ticks",
            self.metrics.games_played,
            self.scheduler.ticks()
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.notifier.notify(Feedback::Steer);
                self.session.set_pending_direction(direction);
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let transition = self.session.tick();

        if let Some(score) = transition.final_score() {
            self.metrics.on_game_over(score);
        }
    }

    fn reset_game(&mut self) {
        self.session.reset();
        self.metrics.on_game_start();
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = self.snapshots.borrow_and_update().clone();
        let high_score = *self.high_score.borrow_and_update();

        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &snapshot, high_score, &self.metrics);
            })
            .context("Failed to draw frame")?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::LogNotifier;
    use crate::game::{Direction, GameConfig, Position};
    use crate::score::HIGH_SCORE_KEY;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode_with_best(best: &str) -> HumanMode {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, best).unwrap();
        HumanMode::new(
            GameSession::seeded(GameConfig::default(), 21),
            store,
            Arc::new(LogNotifier),
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn play_until_over(mode: &mut HumanMode) {
        mode.handle_event(key(KeyCode::Up));
        while !mode.session.state().is_over {
            mode.update_game();
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode_with_best("70");
        assert!(!mode.session.state().is_over);
        assert_eq!(mode.session.state().score, 0);
        assert_eq!(mode.high_score.borrow().best, 70);
        assert_eq!(mode.scheduler.period(), Duration::from_secs(1) / 6);
        assert!(!mode.scheduler.is_running());
    }

    #[test]
    fn test_steering_sets_pending_direction() {
        let mut mode = mode_with_best("0");

        mode.handle_event(key(KeyCode::Char('w')));
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.session.state().pending_direction, Direction::Up);

        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.session.state().pending_direction, Direction::Down);
        assert_eq!(mode.session.state().direction, Direction::Right);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut mode = mode_with_best("0");
        let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        mode.handle_event(Event::Key(release));
        assert_eq!(mode.session.state().pending_direction, Direction::Right);
    }

    #[test]
    fn test_game_over_counts_and_keeps_ticking() {
        let mut mode = mode_with_best("0");
        play_until_over(&mut mode);
        assert_eq!(mode.metrics.games_played, 1);

        let frozen = mode.session.snapshot();
        mode.update_game();
        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);
        assert!(Arc::ptr_eq(&frozen, &mode.snapshots.borrow()));
    }

    #[test]
    fn test_high_score_follows_finished_games() {
        let mut mode = mode_with_best("0");
        mode.session.reset();
        play_until_over(&mut mode);

        let score = mode.session.state().score;
        assert_eq!(mode.high_score.borrow().best, score);
        assert_eq!(mode.high_score.borrow().beaten_this_game, score > 0);

        mode.handle_event(key(KeyCode::Enter));
        assert!(!mode.high_score.borrow().beaten_this_game);
    }

    #[test]
    fn test_restart_key_resets_game() {
        let mut mode = mode_with_best("0");
        play_until_over(&mut mode);

        mode.handle_event(key(KeyCode::Char('r')));

        let snapshot = mode.snapshots.borrow().clone();
        assert!(!snapshot.is_over);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.snake, vec![Position::new(7, 8)]);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode_with_best("0");
        mode.handle_event(key(KeyCode::Esc));
        assert!(mode.should_quit);
    }
}
