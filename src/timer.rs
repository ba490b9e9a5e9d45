//! Round countdown
//!
//! The countdown that limits how long a team may perform a scenario. It
//! knows nothing about wall-clock time: whoever owns it calls [`RoundTimer::tick`]
//! once per elapsed second, and the timer decrements while it is neither
//! paused nor expired.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Alarm messages driving the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One second has elapsed for the tick chain identified by `epoch`
    Tick {
        /// Identifies the chain that scheduled this tick
        epoch: u64,
    },
}

/// Countdown state for a single round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    /// Seconds left, `None` when no countdown is active
    remaining: Option<u64>,
    /// Whether the countdown is frozen, irrelevant when `remaining` is `None`
    paused: bool,
}

impl RoundTimer {
    /// Starts a countdown of `seconds`, replacing any prior countdown
    pub fn start(&mut self, seconds: u64) {
        self.remaining = Some(seconds);
        self.paused = false;
    }

    /// Freezes the countdown
    ///
    /// Only a countdown with time left can be paused.
    ///
    /// # Returns
    ///
    /// `true` if the timer went from running to paused
    pub fn pause(&mut self) -> bool {
        if self.paused || !self.remaining.is_some_and(|r| r > 0) {
            return false;
        }
        self.paused = true;
        true
    }

    /// Unfreezes a paused countdown
    ///
    /// # Returns
    ///
    /// `true` if the timer was paused
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }

    /// Adds `seconds` to the countdown and resumes it
    ///
    /// An inactive timer is initialised to `seconds`, and an expired timer
    /// becomes active again.
    pub fn extend(&mut self, seconds: u64) {
        self.remaining = Some(self.remaining.unwrap_or(0).saturating_add(seconds));
        self.paused = false;
    }

    /// Advances the countdown by one elapsed second
    ///
    /// # Returns
    ///
    /// `true` if `remaining` was decremented
    pub fn tick(&mut self) -> bool {
        match &mut self.remaining {
            Some(remaining) if !self.paused && *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Clears the countdown
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Seconds left, `None` when no countdown is active
    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    /// Whether the countdown is frozen
    pub fn is_paused(&self) -> bool {
        self.remaining.is_some() && self.paused
    }

    /// Whether the countdown reached exactly zero ("time's up")
    pub fn is_expired(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Whether the countdown is actively decreasing
    pub fn is_running(&self) -> bool {
        !self.paused && self.remaining.is_some_and(|r| r > 0)
    }

    /// Whether ticks may still change this countdown
    ///
    /// A paused countdown with time left still counts as pending: it keeps
    /// its tick source and simply ignores ticks until resumed.
    pub(crate) fn has_time_left(&self) -> bool {
        self.remaining.is_some_and(|r| r > 0)
    }
}

/// Displays a number of seconds the way the countdown shows it
///
/// Values of a minute or more are shown as `m:ss`, shorter values as plain
/// seconds, so `60` reads `1:00` and `59` reads `59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock(pub u64);

impl Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(seconds) = *self;
        if seconds >= 60 {
            write!(f, "{}:{:02}", seconds / 60, seconds % 60)
        } else {
            write!(f, "{seconds}")
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_inactive() {
        let timer = RoundTimer::default();
        assert_eq!(timer.remaining(), None);
        assert!(!timer.is_running());
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_ticks_down_to_zero_and_stays() {
        let mut timer = RoundTimer::default();
        timer.start(5);
        for _ in 0..5 {
            assert!(timer.tick());
        }
        assert_eq!(timer.remaining(), Some(0));
        assert!(timer.is_expired());

        assert!(!timer.tick());
        assert_eq!(timer.remaining(), Some(0));
    }

    #[test]
    fn test_tick_without_countdown_is_noop() {
        let mut timer = RoundTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn test_pause_freezes() {
        let mut timer = RoundTimer::default();
        timer.start(10);
        assert!(timer.pause());
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(timer.remaining(), Some(10));

        assert!(timer.resume());
        timer.tick();
        assert_eq!(timer.remaining(), Some(9));
    }

    #[test]
    fn test_pause_twice_is_noop() {
        let mut timer = RoundTimer::default();
        timer.start(10);
        assert!(timer.pause());
        assert!(!timer.pause());
        assert!(timer.is_paused());
    }

    #[test]
    fn test_pause_requires_time_left() {
        let mut timer = RoundTimer::default();
        assert!(!timer.pause());

        timer.start(1);
        timer.tick();
        assert!(!timer.pause());
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_resume_when_not_paused_is_noop() {
        let mut timer = RoundTimer::default();
        timer.start(3);
        assert!(!timer.resume());
        assert!(timer.is_running());
    }

    #[test]
    fn test_start_replaces_previous_countdown() {
        let mut timer = RoundTimer::default();
        timer.start(10);
        timer.pause();
        timer.start(4);
        assert_eq!(timer.remaining(), Some(4));
        assert!(timer.is_running());
    }

    #[test]
    fn test_extend_revives_expired_timer() {
        let mut timer = RoundTimer::default();
        timer.start(1);
        timer.tick();
        assert!(timer.is_expired());

        timer.extend(30);
        assert_eq!(timer.remaining(), Some(30));
        assert!(timer.tick());
        assert_eq!(timer.remaining(), Some(29));
    }

    #[test]
    fn test_extend_initialises_inactive_timer() {
        let mut timer = RoundTimer::default();
        timer.extend(15);
        assert_eq!(timer.remaining(), Some(15));
        assert!(timer.is_running());
    }

    #[test]
    fn test_extend_resumes_paused_timer() {
        let mut timer = RoundTimer::default();
        timer.start(10);
        timer.pause();
        timer.extend(5);
        assert_eq!(timer.remaining(), Some(15));
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_stop_clears_countdown() {
        let mut timer = RoundTimer::default();
        timer.start(10);
        timer.pause();
        timer.stop();
        assert_eq!(timer, RoundTimer::default());
    }

    #[test]
    fn test_clock_formatting() {
        assert_eq!(Clock(0).to_string(), "0");
        assert_eq!(Clock(59).to_string(), "59");
        assert_eq!(Clock(60).to_string(), "1:00");
        assert_eq!(Clock(65).to_string(), "1:05");
        assert_eq!(Clock(600).to_string(), "10:00");
    }
}
