// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity estimate options.
use serde::{Deserialize, Serialize};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

/// How the equity is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Exact enumeration if the number of boards is below
    /// [EquityOptions::max_combinations], sampling otherwise.
    #[default]
    Auto,
    /// Always enumerate all the boards.
    Exact,
    /// Always sample boards, unless the board is complete.
    Sample,
}

/// A flag to stop a running estimate.
///
/// The token can be cloned and sent to another thread, calling
/// [CancelToken::cancel] on any clone stops the estimate at the next trial.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Checks if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for [estimate](super::estimate).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityOptions {
    /// How to compute the equity.
    pub mode: Mode,
    /// In auto mode the largest number of boards that are enumerated.
    pub max_combinations: u64,
    /// The maximum number of sampled boards.
    pub max_trials: u64,
    /// Sampling stops when the standard error of every player equity share is
    /// below this value, a value of 0 runs all the trials.
    pub epsilon: f64,
    /// The number of parallel tasks.
    pub num_tasks: usize,
    /// Seed for sampling, if None the tasks are seeded from the OS.
    pub seed: Option<u64>,
    /// Cancellation flag.
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl EquityOptions {
    /// Default for [EquityOptions::max_combinations].
    pub const MAX_COMBINATIONS: u64 = 2_000_000;
    /// Default for [EquityOptions::max_trials].
    pub const MAX_TRIALS: u64 = 100_000;
    /// Default for [EquityOptions::epsilon].
    pub const EPSILON: f64 = 0.0025;

    /// Sets the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the enumeration threshold.
    pub fn with_max_combinations(mut self, max_combinations: u64) -> Self {
        self.max_combinations = max_combinations;
        self
    }

    /// Sets the sampling budget.
    pub fn with_max_trials(mut self, max_trials: u64) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Sets the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the number of tasks, zero is the same as one.
    pub fn with_num_tasks(mut self, num_tasks: usize) -> Self {
        self.num_tasks = num_tasks;
        self
    }

    /// Sets the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub(super) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

impl Default for EquityOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            max_combinations: Self::MAX_COMBINATIONS,
            max_trials: Self::MAX_TRIALS,
            epsilon: Self::EPSILON,
            num_tasks: thread::available_parallelism().map_or(1, |n| n.get()),
            seed: None,
            cancel: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());

        thread::spawn(move || token.cancel()).join().unwrap();
        assert!(other.is_cancelled());

        let opts = EquityOptions::default().with_cancel(other);
        assert!(opts.is_cancelled());
        assert!(!EquityOptions::default().is_cancelled());
    }

    #[test]
    fn options_from_json() {
        let opts: EquityOptions =
            serde_json::from_str(r#"{"mode": "sample", "max_trials": 5000, "seed": 7}"#).unwrap();
        assert_eq!(opts.mode, Mode::Sample);
        assert_eq!(opts.max_trials, 5_000);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.max_combinations, EquityOptions::MAX_COMBINATIONS);
        assert_eq!(opts.epsilon, EquityOptions::EPSILON);
        assert!(opts.num_tasks >= 1);
        assert!(opts.cancel.is_none());

        let json = serde_json::to_string(&opts.with_mode(Mode::Exact)).unwrap();
        assert!(json.contains(r#""mode":"exact""#));
    }
}
