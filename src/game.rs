//! Core game logic and state management
//!
//! This module contains the session state machine: the stage the game is
//! in, the team roster and scores, the round counter, and the lifecycle of
//! a single round (drawing a scenario, counting down, judging).
//!
//! The game never sleeps and never talks to the outside world. Timed
//! events are requested from the caller through a `schedule_message`
//! callback and come back through [`Game::receive_alarm`]; scenarios are
//! requested with [`Game::request_scenario`] and delivered with
//! [`Game::receive_scenario`]. Both paths carry an epoch so that results
//! arriving after the round moved on are ignored.

use std::time::Duration;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    AlarmMessage,
    config::SetupConfig,
    constants,
    leaderboard::{Outcome, ScoreMessage, Standings},
    scenario,
    teams::{self, Team, TeamId},
    timer::{self, Clock, RoundTimer},
};

/// The phase the session is in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Stage {
    /// Teams and rounds are being configured
    #[default]
    Setup,
    /// A team is performing the current scenario
    Scenario,
    /// The facilitator is awarding points for the round
    Judging,
    /// The game is over and the standings are shown
    Winner,
}

/// Progress of the scenario request for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    /// No request is outstanding
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// The last request failed and may be retried
    Failed,
}

/// Session-wide state
///
/// Created when setup completes and replaced wholesale on restart.
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    stage: Stage,
    /// Teams in display order, fixed after setup
    teams: Vec<Team>,
    current_scenario: Option<String>,
    /// Every scenario shown this session, in order, repeats included
    history: Vec<String>,
    /// Starts at 1 and never exceeds `total_rounds`
    round_number: u32,
    total_rounds: u32,
    /// Countdown length applied whenever a new scenario is drawn
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    round_duration: Duration,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            stage: Stage::Setup,
            teams: Vec::new(),
            current_scenario: None,
            history: Vec::new(),
            round_number: 1,
            total_rounds: constants::rounds::DEFAULT_TOTAL_ROUNDS,
            round_duration: Duration::from_secs(constants::timer::DEFAULT_ROUND_DURATION),
        }
    }
}

impl GameState {
    /// The current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The teams in display order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The scenario being performed, if one has been drawn this round
    pub fn current_scenario(&self) -> Option<&str> {
        self.current_scenario.as_deref()
    }

    /// Every scenario shown this session
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The current round, starting at 1
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The configured number of rounds
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// The configured countdown length
    pub fn round_duration(&self) -> Duration {
        self.round_duration
    }
}

/// Errors that reject a setup hand-over
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Setup can only complete while the game is in the setup stage
    #[error("setup cannot complete during the {0} stage")]
    NotInSetup(Stage),
    /// No team was supplied
    #[error("at least one team is required")]
    NoTeams,
    /// A team identifier was supplied twice
    #[error("team {0} appears more than once")]
    DuplicateTeam(TeamId),
    /// The number of rounds is zero
    #[error("at least one round is required")]
    NoRounds,
    /// The round duration is shorter than a second
    #[error("round duration must be at least one second")]
    NoDuration,
    /// The setup configuration failed validation
    #[error("invalid setup: {0}")]
    Invalid(String),
    /// A team name was rejected
    #[error(transparent)]
    Team(#[from] teams::Error),
}

/// Proof that a scenario was requested for a specific round
///
/// Hand it back with the result so that results arriving after the round
/// has ended, or after a restart, can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTicket {
    epoch: u64,
}

/// Countdown information for the presentation
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerMessage {
    /// Seconds left, absent when no countdown is active
    pub remaining: Option<u64>,
    /// `remaining` formatted for display
    pub clock: Option<String>,
    /// Whether the countdown is frozen
    pub paused: bool,
    /// Whether time is up; the presentation then offers ending the round or adding time
    pub expired: bool,
}

impl From<&RoundTimer> for TimerMessage {
    fn from(timer: &RoundTimer) -> Self {
        Self {
            remaining: timer.remaining(),
            clock: timer.remaining().map(|r| Clock(r).to_string()),
            paused: timer.is_paused(),
            expired: timer.is_expired(),
        }
    }
}

/// Sync messages describing everything the presentation needs to show
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncMessage {
    /// The setup flow is active
    Setup,
    /// A round is being performed
    Scenario {
        /// Current round, starting at 1
        round: u32,
        /// Configured number of rounds
        total_rounds: u32,
        /// The scenario to act out, absent while the first one is loading
        scenario: Option<String>,
        /// Progress of the scenario request
        fetch: FetchStatus,
        /// Whether a new scenario may be drawn right now
        can_draw: bool,
        /// The countdown
        timer: TimerMessage,
    },
    /// Points are being awarded
    Judging {
        /// Current round, starting at 1
        round: u32,
        /// Configured number of rounds
        total_rounds: u32,
        /// Teams in display order with their scores
        teams: Vec<Team>,
    },
    /// The game is over
    Winner {
        /// Winner or draw
        outcome: Option<Outcome>,
        /// Every team, ranked
        standings: Vec<ScoreMessage>,
    },
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// The game session
///
/// All state changes go through the methods of this struct. Intents that
/// do not fit the current stage are ignored and reported by returning
/// `false`, so a stray button press can never corrupt the session.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Game {
    state: GameState,
    /// Countdown of the round being performed
    timer: RoundTimer,
    fetch: FetchStatus,
    /// Identifies the current round context for scenario tickets
    round_epoch: u64,
    /// Identifies the live tick chain
    tick_epoch: u64,
}

// Convenience methods
impl Game {
    /// Forgets everything belonging to the round in progress
    ///
    /// Outstanding scenario tickets and tick alarms become stale.
    fn reset_round(&mut self) {
        self.round_epoch = self.round_epoch.wrapping_add(1);
        self.tick_epoch = self.tick_epoch.wrapping_add(1);
        self.timer.stop();
        self.fetch = FetchStatus::Idle;
    }

    /// Whether the session is in the given stage, logging rejected intents
    fn expect_stage(&self, stage: Stage, intent: &'static str) -> bool {
        if self.state.stage == stage {
            true
        } else {
            tracing::debug!(intent, stage = %self.state.stage, "intent ignored in this stage");
            false
        }
    }

    /// Starts a new tick chain for the countdown
    ///
    /// Any previously scheduled tick becomes stale.
    fn start_tick_source<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
    ) {
        self.tick_epoch = self.tick_epoch.wrapping_add(1);

        if self.timer.has_time_left() {
            schedule_message(
                timer::AlarmMessage::Tick {
                    epoch: self.tick_epoch,
                }
                .into(),
                constants::timer::TICK_PERIOD,
            );
        }
    }
}

impl Game {
    /// Creates a game waiting for setup
    pub fn new() -> Self {
        Self::default()
    }

    /// The session state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current stage
    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// The countdown of the round being performed
    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Progress of the scenario request for the current round
    pub fn fetch_status(&self) -> FetchStatus {
        self.fetch
    }

    /// Hands the session over from the setup flow
    ///
    /// Moves the game from `Setup` to `Scenario` with the given roster and
    /// configuration, starting at round 1 with no scenario drawn.
    ///
    /// # Arguments
    ///
    /// * `teams` - The teams in display order
    /// * `total_rounds` - Number of rounds to play
    /// * `round_duration` - Countdown length for every scenario
    ///
    /// # Errors
    ///
    /// * `Error::NotInSetup` - The game already left the setup stage
    /// * `Error::NoTeams` - `teams` is empty
    /// * `Error::DuplicateTeam` - Two teams share an identifier
    /// * `Error::NoRounds` - `total_rounds` is zero
    /// * `Error::NoDuration` - `round_duration` is shorter than a second
    pub fn complete_setup(
        &mut self,
        teams: Vec<Team>,
        total_rounds: u32,
        round_duration: Duration,
    ) -> Result<(), Error> {
        if self.state.stage != Stage::Setup {
            tracing::debug!(stage = %self.state.stage, "setup hand-over rejected");
            return Err(Error::NotInSetup(self.state.stage));
        }
        if teams.is_empty() {
            return Err(Error::NoTeams);
        }
        if let Some(duplicate) = teams.iter().map(Team::id).duplicates().next() {
            return Err(Error::DuplicateTeam(duplicate));
        }
        if total_rounds == 0 {
            return Err(Error::NoRounds);
        }
        if round_duration.as_secs() == 0 {
            return Err(Error::NoDuration);
        }

        tracing::info!(
            teams = teams.len(),
            total_rounds,
            round_duration = round_duration.as_secs(),
            "setup completed"
        );

        self.state = GameState {
            stage: Stage::Scenario,
            teams,
            current_scenario: None,
            history: std::mem::take(&mut self.state.history),
            round_number: 1,
            total_rounds,
            round_duration,
        };
        self.reset_round();

        Ok(())
    }

    /// Hands the session over from a setup configuration
    ///
    /// Validates the configuration and builds the roster, filling in
    /// placeholder names for blank teams.
    ///
    /// # Errors
    ///
    /// * `Error::Invalid` - The configuration is outside the allowed limits
    /// * `Error::Team` - A team name was rejected
    /// * any error of [`Game::complete_setup`]
    pub fn complete_setup_with(&mut self, config: &SetupConfig) -> Result<(), Error> {
        config
            .validate()
            .map_err(|report| Error::Invalid(report.to_string()))?;

        let teams = config.teams()?;

        self.complete_setup(teams, config.total_rounds, config.round_duration)
    }

    /// Records the scenario being performed
    ///
    /// Valid in any stage. The text is always appended to the history, even
    /// if it was shown before. The stage does not change.
    pub fn set_current_scenario(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.history.push(text.clone());
        self.state.current_scenario = Some(text);
    }

    /// Whether a new scenario may be requested right now
    ///
    /// Requests are allowed during a round while no other request is
    /// outstanding. Once a scenario is showing, its countdown must not be
    /// actively running either.
    pub fn can_request_scenario(&self) -> bool {
        self.state.stage == Stage::Scenario
            && self.fetch != FetchStatus::Loading
            && (self.state.current_scenario.is_none() || !self.timer.is_running())
    }

    /// Whether the round still lacks a scenario and none is being fetched
    ///
    /// The presentation requests one as soon as a round is entered.
    pub fn needs_scenario(&self) -> bool {
        self.state.stage == Stage::Scenario
            && self.state.current_scenario.is_none()
            && self.fetch == FetchStatus::Idle
    }

    /// Starts a scenario request for the current round
    ///
    /// # Returns
    ///
    /// A ticket to hand back with the result, or `None` if a request is not
    /// allowed right now (see [`Game::can_request_scenario`])
    pub fn request_scenario(&mut self) -> Option<ScenarioTicket> {
        if !self.can_request_scenario() {
            tracing::debug!(
                stage = %self.state.stage,
                fetch = ?self.fetch,
                running = self.timer.is_running(),
                "scenario request ignored"
            );
            return None;
        }

        self.fetch = FetchStatus::Loading;

        Some(ScenarioTicket {
            epoch: self.round_epoch,
        })
    }

    /// Delivers the result of a scenario request
    ///
    /// A new scenario always (re)starts the countdown at the configured
    /// round duration. A failed request leaves the scenario untouched and
    /// marks the round as retryable.
    ///
    /// # Arguments
    ///
    /// * `ticket` - The ticket returned by [`Game::request_scenario`]
    /// * `result` - The scenario text or the reason there is none
    /// * `schedule_message` - Function to schedule the countdown's tick alarms
    ///
    /// # Returns
    ///
    /// `false` if the ticket is stale and the result was dropped
    pub fn receive_scenario<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        ticket: ScenarioTicket,
        result: Result<String, scenario::Error>,
        schedule_message: S,
    ) -> bool {
        if ticket.epoch != self.round_epoch
            || self.state.stage != Stage::Scenario
            || self.fetch != FetchStatus::Loading
        {
            tracing::debug!(
                ticket = ticket.epoch,
                current = self.round_epoch,
                "stale scenario dropped"
            );
            return false;
        }

        match result {
            Ok(text) => {
                self.fetch = FetchStatus::Idle;
                tracing::info!(round = self.state.round_number, scenario = %text, "scenario drawn");
                self.set_current_scenario(text);
                self.timer.start(self.state.round_duration.as_secs());
                self.start_tick_source(schedule_message);
            }
            Err(error) => {
                tracing::warn!(%error, round = self.state.round_number, "scenario request failed");
                self.fetch = FetchStatus::Failed;
            }
        }

        true
    }

    /// Freezes the countdown
    ///
    /// # Returns
    ///
    /// `true` if a running countdown was paused
    pub fn pause_timer(&mut self) -> bool {
        self.expect_stage(Stage::Scenario, "pause") && self.timer.pause()
    }

    /// Unfreezes the countdown
    ///
    /// # Returns
    ///
    /// `true` if a paused countdown was resumed
    pub fn resume_timer(&mut self) -> bool {
        self.expect_stage(Stage::Scenario, "resume") && self.timer.resume()
    }

    /// Adds time to the countdown and resumes it
    ///
    /// An expired countdown becomes active again; without a countdown one is
    /// started with `seconds`.
    ///
    /// # Arguments
    ///
    /// * `seconds` - Seconds to add
    /// * `schedule_message` - Function to schedule the countdown's tick alarms
    pub fn extend_timer<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        seconds: u64,
        schedule_message: S,
    ) -> bool {
        if !self.expect_stage(Stage::Scenario, "extend") {
            return false;
        }

        self.timer.extend(seconds);
        self.start_tick_source(schedule_message);

        true
    }

    /// Handles scheduled alarm messages
    ///
    /// A tick decrements the countdown and schedules the next tick while
    /// time is left. Ticks from a replaced chain or a finished round are
    /// ignored.
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm that fired
    /// * `schedule_message` - Function to schedule the next alarm
    ///
    /// # Returns
    ///
    /// `true` if the countdown changed
    pub fn receive_alarm<S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
    ) -> bool {
        match message {
            AlarmMessage::Timer(timer::AlarmMessage::Tick { epoch }) => {
                if epoch != self.tick_epoch || self.state.stage != Stage::Scenario {
                    tracing::trace!(epoch, current = self.tick_epoch, "stale tick dropped");
                    return false;
                }

                let changed = self.timer.tick();

                if self.timer.has_time_left() {
                    schedule_message(message, constants::timer::TICK_PERIOD);
                } else if changed {
                    tracing::info!(round = self.state.round_number, "time is up");
                }

                changed
            }
        }
    }

    /// Ends the performance and moves on to judging
    pub fn finish_round(&mut self) -> bool {
        if !self.expect_stage(Stage::Scenario, "finish round") {
            return false;
        }

        self.state.stage = Stage::Judging;
        self.reset_round();
        tracing::info!(round = self.state.round_number, "round finished");

        true
    }

    /// Awards points to a team
    ///
    /// The delta is added as-is, whatever its sign or size.
    ///
    /// # Arguments
    ///
    /// * `team_id` - The team receiving the points
    /// * `delta` - Points to add
    ///
    /// # Returns
    ///
    /// `false` outside of judging or if no team has the given ID
    pub fn apply_score(&mut self, team_id: TeamId, delta: i64) -> bool {
        if !self.expect_stage(Stage::Judging, "apply score") {
            return false;
        }

        let Some(team) = self.state.teams.iter_mut().find(|t| t.id() == team_id) else {
            tracing::warn!(team = %team_id, delta, "points for unknown team ignored");
            return false;
        };

        team.add_points(delta);
        tracing::debug!(team = %team_id, delta, score = team.score(), "points awarded");

        true
    }

    /// Leaves judging for the next round, or for the winner screen after the last round
    pub fn advance_round(&mut self) -> bool {
        if !self.expect_stage(Stage::Judging, "advance round") {
            return false;
        }

        if self.state.round_number < self.state.total_rounds {
            self.state.round_number += 1;
            self.state.current_scenario = None;
            self.state.stage = Stage::Scenario;
            self.reset_round();
            tracing::info!(
                round = self.state.round_number,
                total_rounds = self.state.total_rounds,
                "next round"
            );
        } else {
            self.state.stage = Stage::Winner;
            tracing::info!(rounds = self.state.round_number, "game over");
        }

        true
    }

    /// Ends the game from judging, skipping any remaining rounds
    pub fn end_game(&mut self) -> bool {
        if !self.expect_stage(Stage::Judging, "end game") {
            return false;
        }

        self.state.stage = Stage::Winner;
        tracing::info!(
            round = self.state.round_number,
            total_rounds = self.state.total_rounds,
            "game ended early"
        );

        true
    }

    /// Resets the whole session back to setup
    ///
    /// Used both to play again from the winner screen and to abort a game
    /// in progress.
    pub fn restart(&mut self) {
        tracing::info!(stage = %self.state.stage, "session reset");
        self.state = GameState::default();
        self.reset_round();
    }

    /// Teams ranked by score
    pub fn standings(&self) -> Standings {
        Standings::new(&self.state.teams)
    }

    /// The winner or draw, available once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state.stage {
            Stage::Winner => self.standings().outcome(),
            _ => None,
        }
    }

    /// Returns the message necessary to synchronize the presentation
    pub fn state_message(&self) -> SyncMessage {
        match self.state.stage {
            Stage::Setup => SyncMessage::Setup,
            Stage::Scenario => SyncMessage::Scenario {
                round: self.state.round_number,
                total_rounds: self.state.total_rounds,
                scenario: self.state.current_scenario.clone(),
                fetch: self.fetch,
                can_draw: self.can_request_scenario(),
                timer: TimerMessage::from(&self.timer),
            },
            Stage::Judging => SyncMessage::Judging {
                round: self.state.round_number,
                total_rounds: self.state.total_rounds,
                teams: self.state.teams.clone(),
            },
            Stage::Winner => {
                let standings = self.standings();
                SyncMessage::Winner {
                    outcome: standings.outcome(),
                    standings: standings.ranked().to_vec(),
                }
            }
        }
    }
}
