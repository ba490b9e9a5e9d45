//! Session setup configuration
//!
//! The setup flow (team count, team names, round count, round duration)
//! lives outside this crate. What it produces is a [`SetupConfig`], which
//! is validated here before the game leaves the setup stage.

use std::time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    constants,
    teams::{self, Team},
};

type ValidationResult = garde::Result;

/// Validates that a duration falls within specified bounds.
///
/// # Generics
///
/// * `MIN_SECONDS` - The minimum allowed duration in seconds (inclusive).
/// * `MAX_SECONDS` - The maximum allowed duration in seconds (inclusive).
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is outside the specified bounds.
pub fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    val: &Duration,
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "outside of bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates the countdown length of a round
fn validate_round_duration(val: &Duration, _ctx: &()) -> ValidationResult {
    validate_duration::<
        { constants::timer::MIN_ROUND_DURATION },
        { constants::timer::MAX_ROUND_DURATION },
    >(val)
}

/// Validates that every team name fits once surrounding whitespace is trimmed
#[allow(clippy::ptr_arg)]
fn validate_team_names(val: &Vec<String>, _ctx: &()) -> ValidationResult {
    match val
        .iter()
        .position(|name| rustrict::trim_whitespace(name).len() > constants::teams::MAX_NAME_LENGTH)
    {
        Some(position) => Err(garde::Error::new(format!(
            "team {} is longer than {} bytes",
            position + 1,
            constants::teams::MAX_NAME_LENGTH
        ))),
        None => Ok(()),
    }
}

/// Output of the setup flow
///
/// Team names are given in display order; blank names are allowed and
/// become placeholders when the roster is built.
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SetupConfig {
    /// Names of the participating teams, in display order
    #[garde(
        length(min = constants::teams::MIN_TEAM_COUNT, max = constants::teams::MAX_TEAM_COUNT),
        custom(validate_team_names)
    )]
    pub team_names: Vec<String>,
    /// Number of rounds to play
    #[garde(range(min = constants::rounds::MIN_TOTAL_ROUNDS, max = constants::rounds::MAX_TOTAL_ROUNDS))]
    pub total_rounds: u32,
    /// Countdown length applied whenever a new scenario is drawn
    #[garde(custom(validate_round_duration))]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub round_duration: Duration,
}

impl Default for SetupConfig {
    /// Two unnamed teams, five rounds of ten seconds each
    fn default() -> Self {
        Self {
            team_names: vec![String::new(); 2],
            total_rounds: constants::rounds::DEFAULT_TOTAL_ROUNDS,
            round_duration: Duration::from_secs(constants::timer::DEFAULT_ROUND_DURATION),
        }
    }
}

impl SetupConfig {
    /// Creates a setup configuration
    pub fn new<I, S>(team_names: I, total_rounds: u32, round_duration: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            team_names: team_names.into_iter().map(Into::into).collect(),
            total_rounds,
            round_duration,
        }
    }

    /// Builds the ordered team roster described by this configuration
    ///
    /// # Errors
    ///
    /// Returns the first team naming error, see [`Team::new`].
    pub fn teams(&self) -> Result<Vec<Team>, teams::Error> {
        teams::roster(&self.team_names)
    }
}
