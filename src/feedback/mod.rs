//! Physical feedback for game events
//!
//! Phones buzz on these events; a terminal can only ring its bell.
//! Notifiers are host capabilities: only observers and the host call them.

use crossterm::{execute, style::Print};
use log::debug;
use std::io::stderr;
use std::sync::Arc;

use crate::game::{GameSnapshot, Transition};
use crate::tick::TickObserver;

/// Event worth signalling to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// A steering key was pressed
    Steer,
    Ate,
    GameOver,
    Reset,
}

impl Feedback {
    /// Vibration pattern in milliseconds, alternating on and off
    pub fn pattern(&self) -> &'static [u64] {
        match self {
            Feedback::Steer => &[10],
            Feedback::Ate => &[25],
            Feedback::GameOver => &[150, 50, 150],
            Feedback::Reset => &[50],
        }
    }
}

pub trait Notifier {
    fn notify(&self, feedback: Feedback);
}

/// Writes feedback to the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, feedback: Feedback) {
        debug!("feedback {:?} {:?}", feedback, feedback.pattern());
    }
}

/// Rings the terminal bell once per pulse of the pattern, for eating and
/// game over; other events are only logged
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self, feedback: Feedback) {
        LogNotifier.notify(feedback);

        if !matches!(feedback, Feedback::Ate | Feedback::GameOver) {
            return;
        }

        let pulses = feedback.pattern().len().div_ceil(2);
        let mut err = stderr();
        for _ in 0..pulses {
            if execute!(err, Print('\u{7}')).is_err() {
                return;
            }
        }
    }
}

/// Turns core transitions into feedback
pub struct FeedbackObserver {
    notifier: Arc<dyn Notifier>,
}

impl FeedbackObserver {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl TickObserver for FeedbackObserver {
    fn on_transition(&mut self, _snapshot: &GameSnapshot, transition: Transition) {
        let feedback = match transition {
            Transition::Ate { .. } => Feedback::Ate,
            Transition::GameOver { .. } | Transition::GridFilled { .. } => Feedback::GameOver,
            Transition::Reset => Feedback::Reset,
            Transition::Moved | Transition::Frozen => return,
        };
        self.notifier.notify(feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<Feedback>>);

    impl Notifier for Recording {
        fn notify(&self, feedback: Feedback) {
            self.0.lock().unwrap().push(feedback);
        }
    }

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            snake: vec![Position::new(3, 3)],
            food: Position::new(1, 1),
            score: 10,
            is_over: false,
            grid_width: 15,
            grid_height: 15,
        }
    }

    #[test]
    fn test_maps_transitions_to_feedback() {
        let recording = Arc::new(Recording::default());
        let mut observer = FeedbackObserver::new(recording.clone());

        for transition in [
            Transition::Moved,
            Transition::Ate { score: 10 },
            Transition::Frozen,
            Transition::GameOver {
                collision: CollisionType::Wall,
                score: 10,
            },
            Transition::GridFilled { score: 20 },
            Transition::Reset,
        ] {
            observer.on_transition(&snapshot(), transition);
        }

        assert_eq!(
            *recording.0.lock().unwrap(),
            vec![
                Feedback::Ate,
                Feedback::GameOver,
                Feedback::GameOver,
                Feedback::Reset
            ]
        );
    }

    #[test]
    fn test_game_over_pattern_has_two_pulses() {
        assert_eq!(Feedback::GameOver.pattern(), &[150, 50, 150]);
        assert_eq!(Feedback::GameOver.pattern().len().div_ceil(2), 2);
        assert_eq!(Feedback::Steer.pattern(), &[10]);
    }
}
