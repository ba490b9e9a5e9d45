//! Facilitator runtime
//!
//! Drives a [`Game`] in real time. A single actor task owns the game and is
//! its only writer; commands from the facilitator arrive over a channel,
//! and the helper tasks it spawns (the tick source and scenario requests)
//! only sleep or wait and then report back over a second channel. Every
//! change is pushed to a [`Tunnel`] as a complete state snapshot.

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::AbortHandle,
};

use crate::{
    AlarmMessage,
    config::SetupConfig,
    game::{FetchStatus, Game, ScenarioTicket, SyncMessage},
    scenario::{self, ScenarioSource},
    session::Tunnel,
    teams::TeamId,
};

const CHANNEL_CAPACITY: usize = 64;

/// Intents the facilitator can express
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave setup with the given configuration
    CompleteSetup(SetupConfig),
    /// Request a new scenario for the current round
    DrawScenario,
    /// Freeze the countdown
    PauseTimer,
    /// Unfreeze the countdown
    ResumeTimer,
    /// Add seconds to the countdown
    ExtendTimer(u64),
    /// Stop performing and move on to judging
    FinishRound,
    /// Award points to a team during judging
    AwardPoints {
        /// The team receiving the points
        team: TeamId,
        /// Points to add, may be negative
        points: i64,
    },
    /// Continue with the next round, or the winner screen after the last
    NextRound,
    /// Skip the remaining rounds
    EndGame,
    /// Reset everything back to setup
    Restart,
}

/// Errors returned by a [`Handle`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The facilitator task is no longer running
    #[error("facilitator has stopped")]
    Closed,
}

#[derive(Debug)]
enum Request {
    Command(Command),
    Snapshot(oneshot::Sender<SyncMessage>),
}

#[derive(Debug, derive_more::From)]
enum Event {
    Alarm(AlarmMessage),
    Scenario(ScenarioTicket, Result<String, scenario::Error>),
}

/// Cloneable handle to a running facilitator
///
/// The facilitator stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct Handle {
    requests: mpsc::Sender<Request>,
}

impl Handle {
    /// Queues a command
    ///
    /// Commands that do not fit the current stage are ignored by the game.
    ///
    /// # Errors
    ///
    /// Returns `Error::Closed` if the facilitator has stopped.
    pub async fn send(&self, command: Command) -> Result<(), Error> {
        self.requests
            .send(Request::Command(command))
            .await
            .map_err(|_| Error::Closed)
    }

    /// The current presentation state
    ///
    /// Every command sent earlier through this handle has been applied by
    /// the time the snapshot is taken.
    ///
    /// # Errors
    ///
    /// Returns `Error::Closed` if the facilitator has stopped.
    pub async fn snapshot(&self) -> Result<SyncMessage, Error> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Snapshot(reply))
            .await
            .map_err(|_| Error::Closed)?;
        response.await.map_err(|_| Error::Closed)
    }
}

/// The actor driving a game session
pub struct Facilitator<T, S> {
    game: Game,
    tunnel: T,
    source: Arc<S>,
    events: mpsc::Sender<Event>,
    /// The single live tick source
    tick: Option<AbortHandle>,
    /// The scenario request in flight
    fetch: Option<AbortHandle>,
}

impl<T: Tunnel, S: ScenarioSource> Facilitator<T, S> {
    /// Starts a facilitator for a fresh game on the current tokio runtime
    ///
    /// # Arguments
    ///
    /// * `tunnel` - Receives state snapshots and pulses
    /// * `source` - Supplies scenarios for every round
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn(tunnel: T, source: S) -> Handle {
        let (requests_tx, requests_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (facilitator, events_rx) = Self::new(tunnel, source);

        tokio::spawn(facilitator.run(requests_rx, events_rx));

        Handle {
            requests: requests_tx,
        }
    }

    fn new(tunnel: T, source: S) -> (Self, mpsc::Receiver<Event>) {
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let facilitator = Self {
            game: Game::new(),
            tunnel,
            source: Arc::new(source),
            events: events_tx,
            tick: None,
            fetch: None,
        };

        (facilitator, events_rx)
    }

    async fn run(
        mut self,
        mut requests: mpsc::Receiver<Request>,
        mut events: mpsc::Receiver<Event>,
    ) {
        self.publish();

        loop {
            tokio::select! {
                request = requests.recv() => match request {
                    Some(Request::Command(command)) => self.handle_command(command),
                    Some(Request::Snapshot(reply)) => {
                        let _ = reply.send(self.game.state_message());
                    }
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }

        self.cancel_tick();
        self.cancel_fetch();
        tracing::debug!("facilitator stopped");
    }

    fn handle_command(&mut self, command: Command) {
        tracing::debug!(?command, stage = %self.game.stage(), "command received");

        let mut alarms = Vec::new();

        let (changed, pulse) = match command {
            Command::CompleteSetup(config) => match self.game.complete_setup_with(&config) {
                Ok(()) => (true, false),
                Err(error) => {
                    tracing::warn!(%error, "setup rejected");
                    (false, false)
                }
            },
            Command::DrawScenario => (self.request_scenario(), false),
            Command::PauseTimer => (self.game.pause_timer(), false),
            Command::ResumeTimer => (self.game.resume_timer(), false),
            Command::ExtendTimer(seconds) => (
                self.game
                    .extend_timer(seconds, |message, delay| alarms.push((message, delay))),
                false,
            ),
            Command::FinishRound => {
                let changed = self.game.finish_round();
                (changed, changed)
            }
            Command::AwardPoints { team, points } => {
                let changed = self.game.apply_score(team, points);
                (changed, changed)
            }
            Command::NextRound => {
                let changed = self.game.advance_round();
                (changed, changed)
            }
            Command::EndGame => {
                let changed = self.game.end_game();
                (changed, changed)
            }
            Command::Restart => {
                self.game.restart();
                (true, true)
            }
        };

        self.schedule(alarms);
        self.settle();

        if changed {
            self.publish();
        }
        if pulse {
            self.tunnel.pulse();
        }
    }

    fn handle_event(&mut self, event: Event) {
        let mut alarms = Vec::new();

        match event {
            Event::Alarm(alarm) => {
                let changed = self
                    .game
                    .receive_alarm(alarm, |message, delay| alarms.push((message, delay)));
                self.schedule(alarms);

                if changed {
                    self.publish();
                }
            }
            Event::Scenario(ticket, result) => {
                let drawn = result.is_ok();
                let accepted = self.game.receive_scenario(ticket, result, |message, delay| {
                    alarms.push((message, delay));
                });
                self.schedule(alarms);

                if accepted {
                    self.fetch = None;
                    self.publish();
                    if drawn {
                        self.tunnel.pulse();
                    }
                }
            }
        }
    }

    /// Starts a scenario request if the game allows one
    fn request_scenario(&mut self) -> bool {
        let Some(ticket) = self.game.request_scenario() else {
            return false;
        };

        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let result = source.request_scenario().await;
            let _ = events.send(Event::from((ticket, result))).await;
        });

        self.cancel_fetch();
        self.fetch = Some(task.abort_handle());

        true
    }

    /// Replaces the tick source with the alarms the game asked for
    fn schedule(&mut self, alarms: Vec<(AlarmMessage, web_time::Duration)>) {
        for (alarm, delay) in alarms {
            let events = self.events.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = events.send(Event::from(alarm)).await;
            });

            self.cancel_tick();
            self.tick = Some(task.abort_handle());
        }
    }

    /// Brings helper tasks in line with the game after a command
    ///
    /// Leaving a round stops its countdown and cancels its request; a new
    /// round without a scenario gets one requested right away.
    fn settle(&mut self) {
        if !self.game.timer().has_time_left() {
            self.cancel_tick();
        }
        if self.game.fetch_status() != FetchStatus::Loading {
            self.cancel_fetch();
        }
        if self.game.needs_scenario() {
            self.request_scenario();
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.abort();
        }
    }

    fn cancel_fetch(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
    }

    fn publish(&self) {
        self.tunnel.send_state(&self.game.state_message());
    }
}
