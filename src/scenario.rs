//! Scenario supply
//!
//! The game treats scenarios as opaque text handed out by a
//! [`ScenarioSource`]. The built-in [`ScenarioDeck`] draws prompts from a
//! fixed pool without replacement, starts over once every prompt has been
//! seen, and waits a little before answering to build anticipation.

mod classroom;

use std::{
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use serde::Serialize;
use thiserror::Error;

use crate::constants;

pub use classroom::SCENARIOS as CLASSROOM_SCENARIOS;

/// Errors that can occur while supplying scenarios
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pool has no usable prompt
    #[error("scenario pool is empty")]
    EmptyPool,
    /// The source could not produce a prompt
    #[error("scenario unavailable: {0}")]
    Unavailable(String),
}

/// Something that hands out scenario prompts on request
pub trait ScenarioSource: Send + Sync + 'static {
    /// Produces the next prompt
    ///
    /// Implementations should return non-empty text and avoid repeating a
    /// prompt until their pool is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if no prompt can be produced right now; the round
    /// stays retryable.
    fn request_scenario(&self) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Selection state of a deck
#[derive(Debug)]
struct Shuffle {
    /// Pool indices not handed out since the last reshuffle
    unseen: Vec<usize>,
    rng: fastrand::Rng,
}

impl Shuffle {
    fn new(rng: fastrand::Rng) -> Self {
        Self {
            unseen: Vec::new(),
            rng,
        }
    }
}

/// A pool of prompts drawn without replacement
#[derive(Debug)]
pub struct ScenarioDeck {
    pool: Vec<String>,
    shuffle: Mutex<Shuffle>,
    thinking: Duration,
}

impl ScenarioDeck {
    /// Creates a deck from a pool of prompts
    ///
    /// Blank prompts are dropped and the rest are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyPool` if no usable prompt remains.
    pub fn new<I, S>(pool: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pool: Vec<String> = pool
            .into_iter()
            .map(|s| s.as_ref().trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();

        if pool.is_empty() {
            return Err(Error::EmptyPool);
        }

        Ok(Self {
            pool,
            shuffle: Mutex::new(Shuffle::new(fastrand::Rng::new())),
            thinking: constants::scenario::THINKING_DELAY,
        })
    }

    /// Creates a deck holding the built-in classroom prompts
    pub fn classroom() -> Self {
        Self {
            pool: CLASSROOM_SCENARIOS.iter().map(|&s| s.to_owned()).collect(),
            shuffle: Mutex::new(Shuffle::new(fastrand::Rng::new())),
            thinking: constants::scenario::THINKING_DELAY,
        }
    }

    /// Sets the artificial delay before a requested prompt is handed out
    #[must_use]
    pub fn with_thinking(mut self, thinking: Duration) -> Self {
        self.thinking = thinking;
        self
    }

    /// Makes the draw order reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shuffle = Mutex::new(Shuffle::new(fastrand::Rng::with_seed(seed)));
        self
    }

    /// Number of prompts in the pool
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Always `false`: a deck cannot be built from an empty pool
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Draws a prompt not seen since the last reshuffle
    ///
    /// Once every prompt has been handed out the deck starts over.
    pub fn draw(&self) -> String {
        let mut shuffle = self.shuffle.lock().unwrap_or_else(PoisonError::into_inner);

        if shuffle.unseen.is_empty() {
            tracing::debug!(pool = self.pool.len(), "reshuffling scenario deck");
            shuffle.unseen = (0..self.pool.len()).collect();
        }

        let unseen = shuffle.unseen.len();
        let pick = shuffle.rng.usize(..unseen);
        let index = shuffle.unseen.swap_remove(pick);

        self.pool[index].clone()
    }
}

impl Default for ScenarioDeck {
    fn default() -> Self {
        Self::classroom()
    }
}

impl ScenarioSource for ScenarioDeck {
    async fn request_scenario(&self) -> Result<String, Error> {
        if !self.thinking.is_zero() {
            tokio::time::sleep(self.thinking).await;
        }

        Ok(self.draw())
    }
}
