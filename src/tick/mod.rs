//! Fixed-rate driving of a game session
//!
//! [`TickScheduler`] produces ticks, [`GameSession`] turns each tick into one
//! state transition and fans the result out to [`TickObserver`]s.

pub mod observer;
pub mod scheduler;
pub mod session;

pub use observer::TickObserver;
pub use scheduler::TickScheduler;
pub use session::GameSession;
