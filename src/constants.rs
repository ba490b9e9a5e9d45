//! Configuration constants for the improv game engine
//!
//! This module contains the limits, defaults and presets used throughout
//! the game so that the setup boundary, the round timer and the built-in
//! scenario deck agree on the same numbers.

/// Team roster constants
pub mod teams {
    /// Minimum number of teams a session can be played with
    pub const MIN_TEAM_COUNT: usize = 1;
    /// Maximum number of teams a session can be played with
    pub const MAX_TEAM_COUNT: usize = 32;
    /// Team counts offered by the setup wizard
    pub const TEAM_COUNT_PRESETS: [usize; 6] = [2, 3, 4, 5, 6, 7];
    /// Maximum length of a team name in bytes
    pub const MAX_NAME_LENGTH: usize = 30;
    /// Prefix of the placeholder given to teams left without a name
    pub const PLACEHOLDER_PREFIX: &str = "Team";
}

/// Round count constants
pub mod rounds {
    /// Minimum number of rounds in a session
    pub const MIN_TOTAL_ROUNDS: u32 = 1;
    /// Maximum number of rounds in a session
    pub const MAX_TOTAL_ROUNDS: u32 = 100;
    /// Number of rounds assumed before setup completes
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;
    /// Round counts offered by the setup wizard (quick, standard, long, marathon)
    pub const ROUND_COUNT_PRESETS: [u32; 4] = [3, 5, 8, 12];
}

/// Round timer constants
pub mod timer {
    use std::time::Duration;

    /// Minimum countdown length in seconds
    pub const MIN_ROUND_DURATION: u64 = 1;
    /// Maximum countdown length in seconds
    pub const MAX_ROUND_DURATION: u64 = 3600;
    /// Countdown length in seconds assumed before setup completes
    pub const DEFAULT_ROUND_DURATION: u64 = 10;
    /// Seconds added by the "add time" action
    pub const EXTEND_SECONDS: u64 = 30;
    /// Real time between two ticks of the countdown
    pub const TICK_PERIOD: Duration = Duration::from_secs(1);
}

/// Scenario deck constants
pub mod scenario {
    use std::time::Duration;

    /// Artificial delay before the built-in deck hands out a prompt
    pub const THINKING_DELAY: Duration = Duration::from_secs(3);
}

/// Scoring constants
pub mod scoring {
    /// Point awards offered by the judging screen (good, great, epic)
    ///
    /// The engine accepts any signed delta; these are presentation presets.
    pub const AWARDS: [i64; 3] = [1, 3, 5];
}
