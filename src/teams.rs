//! Team roster management
//!
//! This module defines the teams that take turns acting out scenarios.
//! Teams are created once, when the setup flow hands over its team names,
//! and keep the same identifier for the whole session. Only their score
//! changes afterwards.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use uuid::Uuid;

use crate::constants;

/// A unique identifier for a team
///
/// Identifiers are assigned when the roster is built and stay stable for
/// the duration of the session.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Creates a new random team ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TeamId {
    type Err = uuid::Error;

    /// Parses a team ID from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Errors that can occur while naming a team
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The name exceeds the maximum allowed length
    #[error("team name is too long")]
    TooLong,
}

/// A team taking part in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier, immutable for the session
    id: TeamId,
    /// Display name, never empty
    name: String,
    /// Accumulated points
    score: i64,
}

impl Team {
    /// Creates a team at the given roster position with a fresh ID and no points
    ///
    /// The name is trimmed of surrounding whitespace. A blank name is
    /// replaced by a placeholder derived from the position, so the first
    /// unnamed team becomes "Team 1".
    ///
    /// # Arguments
    ///
    /// * `position` - Zero-based position of the team in the roster
    /// * `name` - The name chosen by the facilitator, possibly blank
    ///
    /// # Errors
    ///
    /// * `Error::TooLong` - Trimmed name exceeds the maximum team name length
    pub fn new(position: usize, name: &str) -> Result<Self, Error> {
        let name = rustrict::trim_whitespace(name);
        if name.len() > constants::teams::MAX_NAME_LENGTH {
            return Err(Error::TooLong);
        }
        let name = if name.is_empty() {
            placeholder_name(position)
        } else {
            name.to_owned()
        };

        Ok(Self {
            id: TeamId::new(),
            name,
            score: 0,
        })
    }

    /// The team's identifier
    pub fn id(&self) -> TeamId {
        self.id
    }

    /// The team's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The team's current score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Adds a signed number of points to the score
    pub(crate) fn add_points(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
    }
}

/// Placeholder name for the team at a zero-based roster position
pub fn placeholder_name(position: usize) -> String {
    format!("{} {}", constants::teams::PLACEHOLDER_PREFIX, position + 1)
}

/// Builds an ordered roster from team names
///
/// Order is preserved and becomes the display order for the session.
///
/// # Errors
///
/// Returns the first naming error encountered, see [`Team::new`].
pub fn roster<I, S>(names: I) -> Result<Vec<Team>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(position, name)| Team::new(position, name.as_ref()))
        .collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_team_starts_without_points() {
        let team = Team::new(0, "Dragons").unwrap();
        assert_eq!(team.name(), "Dragons");
        assert_eq!(team.score(), 0);
    }

    #[test]
    fn test_blank_name_gets_placeholder() {
        let team = Team::new(2, "   ").unwrap();
        assert_eq!(team.name(), "Team 3");
    }

    #[test]
    fn test_name_is_trimmed() {
        let team = Team::new(0, "  Owls \t").unwrap();
        assert_eq!(team.name(), "Owls");
    }

    #[test]
    fn test_name_too_long() {
        let name = "a".repeat(constants::teams::MAX_NAME_LENGTH + 1);
        assert_eq!(Team::new(0, &name), Err(Error::TooLong));
    }

    #[test]
    fn test_length_measured_after_trimming() {
        let padded = format!("  {}  ", "a".repeat(constants::teams::MAX_NAME_LENGTH));
        let team = Team::new(0, &padded).unwrap();
        assert_eq!(team.name().len(), constants::teams::MAX_NAME_LENGTH);
    }

    #[test]
    fn test_danish_names_accepted() {
        for name in ["Hold Ærø på østkysten", "Slutspillerne", "Sovsekongerne"] {
            assert_eq!(Team::new(0, name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_roster_preserves_order_and_defaults() {
        let teams = roster(["Red", "", "Blue"]).unwrap();
        let names: Vec<_> = teams.iter().map(Team::name).collect();
        assert_eq!(names, ["Red", "Team 2", "Blue"]);
    }

    #[test]
    fn test_roster_ids_are_unique() {
        let teams = roster(["", "", "", ""]).unwrap();
        let mut ids: Vec<_> = teams.iter().map(Team::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_add_points_accepts_any_sign() {
        let mut team = Team::new(0, "Foxes").unwrap();
        team.add_points(5);
        team.add_points(-7);
        assert_eq!(team.score(), -2);
    }

    #[test]
    fn test_add_points_saturates() {
        let mut team = Team::new(0, "Foxes").unwrap();
        team.add_points(i64::MAX);
        team.add_points(1);
        assert_eq!(team.score(), i64::MAX);
    }

    #[test]
    fn test_team_id_round_trips_through_string() {
        let id = TeamId::new();
        let parsed: TeamId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<TeamId>().is_err());
    }
}
