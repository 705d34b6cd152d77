use crate::game::{GameSnapshot, Transition};

/// Consumer notified after every tick and every reset
///
/// Observers only see the published snapshot; they cannot reach the state
/// the session owns.
pub trait TickObserver {
    fn on_transition(&mut self, snapshot: &GameSnapshot, transition: Transition);
}
