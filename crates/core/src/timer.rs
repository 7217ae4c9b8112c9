//! Timer module - the periodic "advance time" capability
//!
//! The session never sleeps or spawns anything itself. It is handed a
//! [`RepeatingTimer`] and only arms or disarms it; whoever owns the event loop
//! calls [`GameState::tick`](crate::GameState::tick) when the timer fires.
//! [`ManualTimer`] is the stepped fake used by tests and headless harnesses.

/// Start/stop handle for a repeating trigger
pub trait RepeatingTimer {
    /// Start firing every `interval_ms`. Re-arming replaces the interval.
    fn arm(&mut self, interval_ms: u32);

    /// Stop firing. Must be a no-op when already disarmed.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

impl<T: RepeatingTimer + ?Sized> RepeatingTimer for Box<T> {
    fn arm(&mut self, interval_ms: u32) {
        (**self).arm(interval_ms)
    }

    fn disarm(&mut self) {
        (**self).disarm()
    }

    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }
}

/// Manually stepped timer
///
/// Time only moves when [`ManualTimer::advance`] is called, which reports how
/// many intervals elapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTimer {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
    arm_count: u32,
    disarm_count: u32,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interval, `None` while disarmed
    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Times `arm` was called
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    /// Times an armed timer was disarmed
    pub fn disarm_count(&self) -> u32 {
        self.disarm_count
    }

    /// Let `elapsed_ms` pass and return the number of ticks that fell due.
    /// A disarmed timer accumulates nothing.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(interval) = self.interval_ms.filter(|&ms| ms > 0) else {
            return 0;
        };
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let due = self.elapsed_ms / interval;
        self.elapsed_ms %= interval;
        due
    }
}

impl RepeatingTimer for ManualTimer {
    fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms);
        self.elapsed_ms = 0;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        if self.interval_ms.take().is_some() {
            self.disarm_count += 1;
        }
        self.elapsed_ms = 0;
    }

    fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }
}
