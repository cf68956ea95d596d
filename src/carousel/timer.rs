// src/carousel/timer.rs
// Countdown progress for the carousel: 100 -> 0, then auto-advance

use std::time::Duration;

/// Initial (and reset) progress value
pub const PROGRESS_START: f64 = 100.0;
/// Terminal progress value; reaching it triggers an advance
pub const PROGRESS_END: f64 = 0.0;

/// Dwell and tick lengths, both in whole milliseconds with a tick of at
/// least 1ms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    dwell: Duration,
    tick: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::from_millis(10_000, 100)
    }
}

impl TimerConfig {
    /// Sub-millisecond parts are dropped so the tick count matches the
    /// interval the driver actually runs
    pub fn new(dwell: Duration, tick: Duration) -> Self {
        Self::from_millis(millis(dwell), millis(tick))
    }

    pub fn from_millis(dwell_ms: u64, tick_ms: u64) -> Self {
        Self {
            dwell: Duration::from_millis(dwell_ms),
            tick: Duration::from_millis(tick_ms.max(1)),
        }
    }

    /// How long one fact stays on screen while running (default 10s)
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Interval between progress updates (default 100ms)
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Number of running ticks between two auto-advances
    pub fn ticks_per_dwell(&self) -> u32 {
        let tick = self.tick.as_millis().max(1);
        let ticks = self.dwell.as_millis().div_ceil(tick);
        ticks.clamp(1, u32::MAX as u128) as u32
    }

    /// Progress moved by a single tick, in percent
    pub fn step_percent(&self) -> f64 {
        PROGRESS_START / f64::from(self.ticks_per_dwell())
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved, the timer is suspended
    Suspended,
    /// Progress moved one step toward the terminal bound
    Progressed,
    /// The terminal bound was reached: advanced and reset
    Advanced,
}

/// Dwell timer with pause and hover suspension.
///
/// Progress is derived from an integer tick count, so exactly
/// [`TimerConfig::ticks_per_dwell`] running ticks separate two advances.
#[derive(Debug, Clone)]
pub struct ProgressTimer {
    config: TimerConfig,
    elapsed_ticks: u32,
    paused: bool,
    hovering: bool,
}

impl ProgressTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            elapsed_ticks: 0,
            paused: false,
            hovering: false,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn progress(&self) -> f64 {
        let total = self.config.ticks_per_dwell();
        let remaining = total.saturating_sub(self.elapsed_ticks);
        PROGRESS_START * f64::from(remaining) / f64::from(total)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_suspended(&self) -> bool {
        self.paused || self.hovering
    }

    /// Set the caller-controlled pause flag. Progress is frozen, not reset.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
    }

    /// Advance by one tick, calling `on_advance` when the countdown runs out.
    ///
    /// The reset to [`PROGRESS_START`] happens in the same step, so
    /// [`progress`](Self::progress) never reports the terminal value.
    pub fn tick(&mut self, on_advance: impl FnOnce()) -> TickOutcome {
        if self.is_suspended() {
            return TickOutcome::Suspended;
        }

        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.config.ticks_per_dwell() {
            self.elapsed_ticks = 0;
            on_advance();
            TickOutcome::Advanced
        } else {
            TickOutcome::Progressed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_hundred_ticks() {
        let config = TimerConfig::default();
        assert_eq!(config.ticks_per_dwell(), 100);
        assert!((config.step_percent() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exactly_hundred_ticks_between_advances() {
        let mut timer = ProgressTimer::new(TimerConfig::default());
        let mut advances = Vec::new();

        for tick in 1..=300u32 {
            let mut fired = false;
            timer.tick(|| fired = true);
            if fired {
                advances.push(tick);
            }
        }

        assert_eq!(advances, vec![100, 200, 300]);
    }

    #[test]
    fn test_progress_counts_down_and_resets() {
        let mut timer = ProgressTimer::new(TimerConfig::default());
        assert_eq!(timer.progress(), PROGRESS_START);

        for _ in 0..25 {
            timer.tick(|| {});
        }
        assert_eq!(timer.progress(), 75.0);

        for _ in 0..74 {
            assert_eq!(timer.tick(|| {}), TickOutcome::Progressed);
        }
        assert_eq!(timer.progress(), 1.0);

        assert_eq!(timer.tick(|| {}), TickOutcome::Advanced);
        assert_eq!(timer.progress(), PROGRESS_START);
    }

    #[test]
    fn test_suspend_freezes_progress() {
        let mut timer = ProgressTimer::new(TimerConfig::default());
        for _ in 0..37 {
            timer.tick(|| {});
        }
        let frozen = timer.progress();

        timer.set_paused(true);
        for _ in 0..500 {
            assert_eq!(timer.tick(|| panic!("advanced while paused")), TickOutcome::Suspended);
        }
        assert_eq!(timer.progress(), frozen);

        timer.set_paused(false);
        assert_eq!(timer.progress(), frozen);
        timer.tick(|| {});
        assert_eq!(timer.progress(), frozen - 1.0);
    }

    #[test]
    fn test_hover_suspends_independently_of_pause() {
        let mut timer = ProgressTimer::new(TimerConfig::default());
        timer.set_hovering(true);
        assert!(timer.is_suspended());
        assert_eq!(timer.tick(|| {}), TickOutcome::Suspended);

        timer.set_paused(true);
        timer.set_hovering(false);
        assert!(timer.is_suspended());

        timer.set_paused(false);
        assert!(!timer.is_suspended());
        assert_eq!(timer.tick(|| {}), TickOutcome::Progressed);
    }

    #[test]
    fn test_uneven_dwell_rounds_up() {
        let config = TimerConfig::from_millis(250, 100);
        assert_eq!(config.ticks_per_dwell(), 3);

        let config = TimerConfig::from_millis(0, 100);
        assert_eq!(config.ticks_per_dwell(), 1);
    }

    #[test]
    fn test_tick_is_whole_millis_and_never_zero() {
        let config = TimerConfig::new(Duration::from_secs(1), Duration::ZERO);
        assert_eq!(config.tick(), Duration::from_millis(1));
        assert_eq!(config.ticks_per_dwell(), 1_000);

        let config = TimerConfig::new(Duration::from_secs(1), Duration::from_micros(1_500));
        assert_eq!(config.tick(), Duration::from_millis(1));
        assert_eq!(config.ticks_per_dwell(), 1_000);

        let config = TimerConfig::new(Duration::from_millis(900), Duration::from_micros(300));
        assert_eq!(config.tick(), Duration::from_millis(1));
        assert_eq!(config.dwell(), Duration::from_millis(900));
    }
}
