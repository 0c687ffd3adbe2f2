//! Timer-driven "run" mode, kept outside of the engine.
//!
//! The scheduler never touches the engine. The driver asks it whether a
//! step is due and performs the step itself, so stopping the scheduler is
//! all it takes to cancel the pending tick.

use std::time::{Duration, Instant};

pub const MIN_INTERVAL: Duration = Duration::from_millis(10);
pub const MAX_INTERVAL: Duration = Duration::from_millis(2000);
pub const INTERVAL_STEP: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    /// `Some` while running, holding when the next step is due
    next_due: Option<Instant>,
}

impl Scheduler {
    /// Creates a paused scheduler
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: clamp_interval(interval),
            next_due: None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Starts running, the first step is due right away
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            log::debug!("scheduler started ({:?})", self.interval);
            self.next_due = Some(now);
        }
    }

    /// Stops running, cancelling the pending step
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            log::debug!("scheduler stopped");
        }
    }

    /// Flips between running and paused, returning whether it now runs
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
        self.is_running()
    }

    /// Whether a step is due at `now`
    ///
    /// Returning `true` consumes the tick and schedules the next one an
    /// interval after `now`, so a slow step never causes a burst of catch-up
    /// steps.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Changes the interval, rescheduling a pending step from `now`
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = clamp_interval(interval);
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
        log::debug!("scheduler interval set to {:?}", self.interval);
    }

    pub fn faster(&mut self, now: Instant) {
        self.set_interval(self.interval.saturating_sub(INTERVAL_STEP), now);
    }

    pub fn slower(&mut self, now: Instant) {
        self.set_interval(self.interval + INTERVAL_STEP, now);
    }

    /// How long the driver can wait before the next step is due
    ///
    /// [`None`] while paused.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
}
