use std::fmt;

/// Remaining countdown time. Whole milliseconds, so repeated ticks never
/// accumulate rounding error or dip below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeLeft(u64);

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Two decimal places, the way the timer overlay shows it (`15.23`).
/// Rounds half up to the nearest hundredth, so `29985ms` reads `29.99`.
impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centis = self.0.saturating_add(5) / 10;
        write!(f, "{}.{:02}", centis / 100, centis % 100)
    }
}

/// Countdown driven by a fixed-cadence tick source.
#[derive(Clone, Debug)]
pub struct Clock {
    step_ms: u64,
    remaining_ms: u64,
    running: bool,
    expired: bool,
}

impl Clock {
    /// `step_ms` is how much one tick removes from the countdown.
    pub fn new(duration_ms: u64, step_ms: u64) -> Self {
        Self {
            step_ms,
            remaining_ms: duration_ms,
            running: false,
            expired: false,
        }
    }

    pub fn start(&mut self, duration_ms: u64) {
        self.remaining_ms = duration_ms;
        self.expired = duration_ms == 0;
        self.running = !self.expired;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Continue from the retained remaining time. No effect once expired.
    pub fn resume(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    pub fn tick(&mut self) -> TimeLeft {
        if self.running && !self.expired {
            self.remaining_ms = self.remaining_ms.saturating_sub(self.step_ms);
            if self.remaining_ms == 0 {
                self.expired = true;
                self.running = false;
            }
        }
        self.remaining()
    }

    pub fn remaining(&self) -> TimeLeft {
        TimeLeft(self.remaining_ms)
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_only_while_running() {
        let mut clock = Clock::new(1_000, 10);
        assert_eq!(clock.tick().as_millis(), 1_000);

        clock.start(1_000);
        assert_eq!(clock.tick().as_millis(), 990);
        clock.stop();
        clock.stop();
        assert_eq!(clock.tick().as_millis(), 990);
        clock.resume();
        assert_eq!(clock.tick().as_millis(), 980);
    }

    #[test]
    fn expires_once_and_clamps_at_zero() {
        let mut clock = Clock::new(25, 10);
        clock.start(25);
        clock.tick();
        clock.tick();
        assert!(!clock.is_expired());
        assert_eq!(clock.tick(), TimeLeft::ZERO);
        assert!(clock.is_expired());
        assert!(!clock.is_running());

        // Stays expired; resume cannot revive it, start can.
        clock.resume();
        assert_eq!(clock.tick(), TimeLeft::ZERO);
        clock.start(25);
        assert!(!clock.is_expired());
        assert_eq!(clock.tick().as_millis(), 15);
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(TimeLeft::from_millis(30_000).to_string(), "30.00");
        assert_eq!(TimeLeft::from_millis(15_230).to_string(), "15.23");
        assert_eq!(TimeLeft::from_millis(29_985).to_string(), "29.99");
        assert_eq!(TimeLeft::from_millis(9_996).to_string(), "10.00");
        assert_eq!(TimeLeft::from_millis(4).to_string(), "0.00");
        assert_eq!(TimeLeft::from_millis(5).to_string(), "0.01");
        assert_eq!(TimeLeft::ZERO.to_string(), "0.00");
    }
}
