use log::debug;
use rand::{Rng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::watch;

use super::observer::TickObserver;
use crate::game::{Direction, GameConfig, GameEngine, GameSnapshot, GameState, Transition};

/// Single writer of one game's state
///
/// Every operation runs to completion before the next one starts, so the
/// state needs no locking. After each tick or reset the session publishes an
/// immutable snapshot on a `watch` channel and then notifies its observers.
pub struct GameSession<R: Rng = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    snapshot_tx: watch::Sender<Arc<GameSnapshot>>,
    observers: Vec<Box<dyn TickObserver>>,
}

impl GameSession<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_engine(GameEngine::seeded(config, seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_engine(mut engine: GameEngine<R>) -> Self {
        let state = engine.reset();
        let (snapshot_tx, _) = watch::channel(Arc::new(state.snapshot()));

        Self {
            engine,
            state,
            snapshot_tx,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn TickObserver>) {
        self.observers.push(observer);
    }

    /// Receiver that always holds the latest published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> Arc<GameSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.engine.set_pending_direction(&mut self.state, direction);
        if !accepted {
            debug!(
                "ignored {:?} (moving {:?}, over: {})",
                direction, self.state.direction, self.state.is_over
            );
        }
        accepted
    }

    /// Advance the game by one step and publish the result
    pub fn tick(&mut self) -> Transition {
        let transition = self.engine.advance(&mut self.state);
        self.publish(transition);
        transition
    }

    /// Start a fresh game; valid at any time
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.publish(Transition::Reset);
    }

    fn publish(&mut self, transition: Transition) {
        // A frozen game re-emits the snapshot it already published
        let snapshot = match transition {
            Transition::Frozen => self.snapshot(),
            _ => Arc::new(self.state.snapshot()),
        };
        self.snapshot_tx.send_replace(snapshot.clone());

        for observer in &mut self.observers {
            observer.on_transition(&snapshot, transition);
        }
    }
}
