use log::debug;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fixed-rate tick source for the game loop
///
/// The scheduler owns its timer only while running. `stop()` and `Drop` both
/// release it, so a torn-down view never leaves a live timer behind. Awaiting
/// [`TickScheduler::tick`] on a stopped scheduler never resolves, which keeps
/// a `tokio::select!` branch on it inert.
pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
    ticks: u64,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking; the first tick fires one period from now
    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        let mut timer = interval_at(Instant::now() + self.period, self.period);
        // A stalled host gets one late tick, not a burst of catch-up ticks
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        debug!("tick scheduler started, period {:?}", self.period);
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("tick scheduler stopped after {} ticks", self.ticks);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Ticks delivered since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wait for the next tick and return its sequence number
    ///
    /// Cancel safe: dropping the future before it resolves loses no tick.
    pub async fn tick(&mut self) -> u64 {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
                self.ticks += 1;
                self.ticks
            }
            None => std::future::pending().await,
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
