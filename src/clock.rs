//! Periodic tick sources.
//!
//! The game schedules a tick when a round starts and cancels it when the game
//! ends. The surrounding event loop asks the clock how many ticks have come
//! due and feeds them to the game one at a time, so ticks never interleave
//! with guess handling.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Start firing one tick every `period`, replacing any previous schedule.
    fn schedule(&mut self, period: Duration);

    /// Stop firing ticks.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;

    /// Number of ticks that came due since the last call. Always zero while
    /// not scheduled.
    fn due(&mut self) -> u32;
}

/// Wall-clock tick source backed by [`Instant`].
#[derive(Debug, Default)]
pub struct IntervalClock {
    schedule: Option<(Duration, Instant)>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the next tick, if scheduled. Used as an event poll
    /// timeout by the terminal loop.
    pub fn until_next(&self) -> Option<Duration> {
        self.schedule
            .map(|(period, last)| period.saturating_sub(last.elapsed()))
    }
}

impl Clock for IntervalClock {
    fn schedule(&mut self, period: Duration) {
        self.schedule = Some((period, Instant::now()));
    }

    fn cancel(&mut self) {
        self.schedule = None;
    }

    fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    fn due(&mut self) -> u32 {
        let Some((period, last)) = self.schedule.as_mut() else {
            return 0;
        };
        if period.is_zero() {
            return 0;
        }
        let elapsed = last.elapsed();
        let ticks = elapsed.as_nanos() / period.as_nanos();
        if ticks == 0 {
            return 0;
        }
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        // Keep the sub-period remainder so ticks do not drift
        *last += *period * ticks;
        ticks
    }
}

/// Manually driven tick source for tests and replays.
///
/// Records how often it was scheduled and cancelled.
#[derive(Debug, Default)]
pub struct ManualClock {
    period: Option<Duration>,
    pending: u32,
    pub schedule_count: usize,
    pub cancel_count: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ticks` ticks due. Ignored while not scheduled.
    pub fn advance(&mut self, ticks: u32) {
        if self.period.is_some() {
            self.pending = self.pending.saturating_add(ticks);
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, period: Duration) {
        self.period = Some(period);
        self.pending = 0;
        self.schedule_count += 1;
    }

    fn cancel(&mut self) {
        self.period = None;
        self.pending = 0;
        self.cancel_count += 1;
    }

    fn is_scheduled(&self) -> bool {
        self.period.is_some()
    }

    fn due(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}
