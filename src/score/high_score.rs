use log::{error, info, warn};
use tokio::sync::watch;

use crate::game::{GameSnapshot, Transition};
use crate::store::KeyValueStore;
use crate::tick::TickObserver;

/// Slot the best score is stored under
pub const HIGH_SCORE_KEY: &str = "snake-highscore";

/// Published view of the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u32,
    /// The game in progress (or just finished) beat the previous best
    pub beaten_this_game: bool,
}

/// Best score across games and runs
///
/// Loaded from the store once, raised only when a finished game beats it,
/// and published on a `watch` channel so the renderer can show it.
pub struct HighScoreBoard<S: KeyValueStore> {
    store: S,
    best_tx: watch::Sender<HighScore>,
}

impl<S: KeyValueStore> HighScoreBoard<S> {
    /// Read the stored best; absent or non-numeric values count as 0
    pub fn load(store: S) -> Self {
        let best = match store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("ignoring non-numeric high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("could not read high score: {}", e);
                0
            }
        };

        info!("high score loaded: {}", best);
        let (best_tx, _) = watch::channel(HighScore {
            best,
            beaten_this_game: false,
        });
        Self { store, best_tx }
    }

    pub fn best(&self) -> u32 {
        self.best_tx.borrow().best
    }

    pub fn subscribe(&self) -> watch::Receiver<HighScore> {
        self.best_tx.subscribe()
    }

    /// Record a finished game's score; returns true if it is a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best() {
            return false;
        }

        self.best_tx.send_replace(HighScore {
            best: score,
            beaten_this_game: true,
        });
        info!("new high score: {}", score);

        if let Err(e) = self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            error!("failed to save high score: {}", e);
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> TickObserver for HighScoreBoard<S> {
    fn on_transition(&mut self, _snapshot: &GameSnapshot, transition: Transition) {
        if let Some(score) = transition.final_score() {
            self.record(score);
        } else if transition == Transition::Reset {
            self.best_tx.send_if_modified(|high| {
                std::mem::replace(&mut high.beaten_this_game, false)
            });
        }
    }
}
