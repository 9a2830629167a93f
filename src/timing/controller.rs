use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::GameConfig;

/// Which periodic task fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Advance the game by one step
    Tick,
    /// Advance the elapsed-time display
    Clock,
}

/// Owns the game tick and the elapsed-time clock.
///
/// Both timers are always started and cancelled together, so restarting a
/// game can never leave a stale timer running next to a fresh one.
pub struct TimingController {
    tick_period: Duration,
    clock_period: Duration,
    tick: Option<Interval>,
    clock: Option<Interval>,
}

impl TimingController {
    pub fn new(tick_period: Duration, clock_period: Duration) -> Self {
        Self {
            tick_period,
            clock_period,
            tick: None,
            clock: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_interval(), config.clock_interval())
    }

    pub fn clock_period(&self) -> Duration {
        self.clock_period
    }

    /// (Re)start both timers. Each first fires one full period from now.
    pub fn start(&mut self) {
        self.cancel();
        let now = Instant::now();
        self.tick = Some(Self::periodic(now, self.tick_period, MissedTickBehavior::Delay));
        self.clock = Some(Self::periodic(now, self.clock_period, MissedTickBehavior::Burst));
    }

    /// Stop both timers
    pub fn cancel(&mut self) {
        self.tick = None;
        self.clock = None;
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some() || self.clock.is_some()
    }

    /// Wait for the next timer to fire. Never resolves while cancelled.
    ///
    /// Cancel safe: dropping the future before completion loses no ticks.
    pub async fn next(&mut self) -> TimerEvent {
        match (self.tick.as_mut(), self.clock.as_mut()) {
            (Some(tick), Some(clock)) => {
                tokio::select! {
                    biased;
                    _ = tick.tick() => TimerEvent::Tick,
                    _ = clock.tick() => TimerEvent::Clock,
                }
            }
            (Some(tick), None) => {
                tick.tick().await;
                TimerEvent::Tick
            }
            (None, Some(clock)) => {
                clock.tick().await;
                TimerEvent::Clock
            }
            (None, None) => std::future::pending().await,
        }
    }

    fn periodic(now: Instant, period: Duration, behavior: MissedTickBehavior) -> Interval {
        let mut timer = interval_at(now + period, period);
        timer.set_missed_tick_behavior(behavior);
        timer
    }
}
