//! Presentation session
//!
//! This module defines the trait the session runtime uses to reach the
//! presentation layer. The game itself never renders anything; it hands
//! complete state snapshots and celebratory pulses to a [`Tunnel`], which
//! may be a terminal UI, a WebSocket, or a test double.

use crate::game::SyncMessage;

/// Trait for sending messages through to the presentation
pub trait Tunnel: Send + 'static {
    /// Sends a state synchronization message
    ///
    /// Sent after every change to the session, so the presentation can
    /// redraw from the latest snapshot alone.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);

    /// Triggers a short celebratory effect
    ///
    /// Fired when a scenario is drawn, a countdown starts, points are
    /// awarded, a round ends, and the game ends or restarts.
    fn pulse(&self);
}
