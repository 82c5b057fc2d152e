//! Fixed-interval driver for the simulation
//!
//! The scheduler owns the tick timer only. It starts and stops it, changes its
//! period, and stops itself once a tick reports that the session ended. The
//! simulation is passed in per step so it stays independently testable.

use std::future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::{GridSimulation, SessionState, TickOutcome};

pub struct StepScheduler {
    interval: Duration,
    /// Present only while running
    timer: Option<Interval>,
}

impl StepScheduler {
    /// Create a stopped scheduler
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timer: None,
        }
    }

    /// Start ticking; the first tick fires one interval from now.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(&mut self) {
        self.timer = Some(Self::make_timer(self.interval));
        info!(interval_ms = self.interval.as_millis() as u64, "Scheduler started");
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            info!("Scheduler stopped");
        }
    }

    /// Change the tick period. A running timer restarts with the new period.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if self.timer.is_some() {
            self.timer = Some(Self::make_timer(interval));
        }
        debug!(interval_ms = interval.as_millis() as u64, "Scheduler interval changed");
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Wait for the next tick. Never completes while stopped, so it can sit in
    /// a `tokio::select!` next to other event sources.
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }

    /// Tick the simulation once, stopping when the session is over
    pub fn step(&mut self, simulation: &mut GridSimulation) -> TickOutcome {
        let outcome = simulation.tick();
        if outcome.state != SessionState::Running {
            self.stop();
        }
        outcome
    }

    fn make_timer(period: Duration) -> Interval {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}
