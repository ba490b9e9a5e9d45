//! # Improv Game Library
//!
//! This library provides the core logic for a facilitator-run improv game
//! played by classroom teams. Teams take turns acting out a short scenario
//! under a countdown, the facilitator awards points after each round, and
//! after a configured number of rounds the highest score wins.
//!
//! The [`game`] module holds the session state machine. It is synchronous
//! and never sleeps; timed events are scheduled through a callback and fed
//! back in. The [`runtime`] module drives a game in real time on tokio and
//! pushes every change to a [`session::Tunnel`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::ignored_unit_patterns)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
use serde::{Deserialize, Serialize};

pub mod config;
pub mod constants;
pub mod game;
pub mod leaderboard;
pub mod runtime;
pub mod scenario;
pub mod session;
pub mod teams;
pub mod timer;

/// Alarm messages for timed events
///
/// The game asks its caller to deliver these after a delay; see
/// [`game::Game::receive_alarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Countdown alarms
    Timer(timer::AlarmMessage),
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_message_from_timer() {
        let alarm = AlarmMessage::from(timer::AlarmMessage::Tick { epoch: 3 });
        assert_eq!(alarm, AlarmMessage::Timer(timer::AlarmMessage::Tick { epoch: 3 }));
    }

    #[test]
    fn test_alarm_message_serialization() {
        let alarm: AlarmMessage = timer::AlarmMessage::Tick { epoch: 7 }.into();
        let json = serde_json::to_string(&alarm).unwrap();
        assert!(json.contains("Tick"));

        let parsed: AlarmMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alarm);
    }
}
