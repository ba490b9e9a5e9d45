//! Standings and winner determination
//!
//! This module ranks the teams of a session by score and decides the
//! outcome of a finished game. Nothing here is stored: standings are
//! recomputed from the roster whenever they are asked for.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::teams::{Team, TeamId};

/// A team's place in the standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreMessage {
    /// The team's identifier
    pub id: TeamId,
    /// The team's display name
    pub name: String,
    /// Total points earned by the team
    pub points: i64,
    /// Position in the standings (0 is first)
    pub position: usize,
}

/// Teams ranked by score, highest first
///
/// Teams with equal scores keep their roster order relative to each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standings {
    ranked: Vec<ScoreMessage>,
}

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// A single team has the highest score
    Winner(ScoreMessage),
    /// Two or more teams share the highest score
    Draw {
        /// The shared top score
        points: i64,
        /// Every team holding the top score, in standings order
        teams: Vec<ScoreMessage>,
    },
}

impl Standings {
    /// Ranks the given teams by score
    ///
    /// # Examples
    ///
    /// ```rust
    /// use improv::leaderboard::Standings;
    /// use improv::teams::roster;
    ///
    /// let teams = roster(["Red", "Blue"]).unwrap();
    /// let standings = Standings::new(&teams);
    /// assert_eq!(standings.ranked().len(), 2);
    /// ```
    pub fn new(teams: &[Team]) -> Self {
        let ranked = teams
            .iter()
            .sorted_by_key(|team| Reverse(team.score()))
            .enumerate()
            .map(|(position, team)| ScoreMessage {
                id: team.id(),
                name: team.name().to_owned(),
                points: team.score(),
                position,
            })
            .collect_vec();

        Self { ranked }
    }

    /// The full ranked list
    pub fn ranked(&self) -> &[ScoreMessage] {
        &self.ranked
    }

    /// Position and score of a specific team
    pub fn score(&self, id: TeamId) -> Option<&ScoreMessage> {
        self.ranked.iter().find(|entry| entry.id == id)
    }

    /// Whether the first two places share the same score
    pub fn is_draw(&self) -> bool {
        matches!(self.ranked.as_slice(), [first, second, ..] if first.points == second.points)
    }

    /// Decides the outcome from the current standings
    ///
    /// # Returns
    ///
    /// `None` if there are no teams, otherwise the single winner or the
    /// draw between every team holding the top score
    pub fn outcome(&self) -> Option<Outcome> {
        let first = self.ranked.first()?;

        if !self.is_draw() {
            return Some(Outcome::Winner(first.clone()));
        }

        Some(Outcome::Draw {
            points: first.points,
            teams: self
                .ranked
                .iter()
                .take_while(|entry| entry.points == first.points)
                .cloned()
                .collect_vec(),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::teams::roster;

    fn teams_with_scores(scores: &[i64]) -> Vec<Team> {
        let mut teams = roster(scores.iter().map(|_| "")).unwrap();
        for (team, score) in teams.iter_mut().zip(scores) {
            team.add_points(*score);
        }
        teams
    }

    #[test]
    fn test_ranked_descending() {
        let teams = teams_with_scores(&[3, 9, 5]);
        let standings = Standings::new(&teams);

        let points = standings.ranked().iter().map(|e| e.points).collect_vec();
        assert_eq!(points, [9, 5, 3]);
        let positions = standings.ranked().iter().map(|e| e.position).collect_vec();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let teams = teams_with_scores(&[4, 4, 4]);
        let standings = Standings::new(&teams);

        let names = standings.ranked().iter().map(|e| e.name.as_str()).collect_vec();
        assert_eq!(names, ["Team 1", "Team 2", "Team 3"]);
    }

    #[test]
    fn test_single_winner() {
        let teams = teams_with_scores(&[3, 5]);
        let outcome = Standings::new(&teams).outcome().unwrap();

        match outcome {
            Outcome::Winner(winner) => {
                assert_eq!(winner.id, teams[1].id());
                assert_eq!(winner.points, 5);
            }
            Outcome::Draw { .. } => panic!("expected a winner"),
        }
    }

    #[test]
    fn test_two_way_draw() {
        let teams = teams_with_scores(&[7, 7]);
        let standings = Standings::new(&teams);
        assert!(standings.is_draw());
        assert!(matches!(
            standings.outcome(),
            Some(Outcome::Draw { points: 7, ref teams }) if teams.len() == 2
        ));
    }

    #[test]
    fn test_draw_names_only_top_teams() {
        let teams = teams_with_scores(&[5, 10, 10]);
        let standings = Standings::new(&teams);

        let Some(Outcome::Draw { points, teams: tied }) = standings.outcome() else {
            panic!("expected a draw");
        };
        assert_eq!(points, 10);
        let ids = tied.iter().map(|e| e.id).collect_vec();
        assert_eq!(ids, [teams[1].id(), teams[2].id()]);
        assert_eq!(standings.ranked().len(), 3);
    }

    #[test]
    fn test_single_team_wins() {
        let teams = teams_with_scores(&[0]);
        assert!(matches!(
            Standings::new(&teams).outcome(),
            Some(Outcome::Winner(_))
        ));
    }

    #[test]
    fn test_no_teams_no_outcome() {
        assert_eq!(Standings::new(&[]).outcome(), None);
    }

    #[test]
    fn test_score_lookup() {
        let teams = teams_with_scores(&[1, 2]);
        let standings = Standings::new(&teams);

        let entry = standings.score(teams[0].id()).unwrap();
        assert_eq!(entry.position, 1);
        assert_eq!(entry.points, 1);
        assert!(standings.score(TeamId::new()).is_none());
    }

    #[test]
    fn test_negative_scores_rank_last() {
        let teams = teams_with_scores(&[-2, 0]);
        let standings = Standings::new(&teams);
        assert_eq!(standings.ranked()[1].points, -2);
    }
}
