// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity estimator.
//!
//! The equity of a hand is the share of the pot it expects to win when the rest
//! of the board is dealt at random. [estimate] computes it either by going
//! through every possible board completion or, when there are too many of them,
//! by sampling random completions until the estimate is precise enough or the
//! trials budget runs out.
//!
//! ```
//! # use showdown_core::*;
//! let hands: [HoleCards; 2] = ["AhKh".parse().unwrap(), "7c7d".parse().unwrap()];
//! let board: Board = "Jh Th 2c".parse().unwrap();
//!
//! let result = estimate(&hands, &board, &EquityOptions::default()).unwrap();
//! assert_eq!(result.method, Method::Exact);
//! assert_eq!(result.trials, 990);
//! assert!(result.players[0].equity() > result.players[1].equity());
//! ```
use log::debug;
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use std::{thread, time::Instant};

use showdown_eval::{Deck, nck};

use crate::{Board, Error, HoleCards, Result};

mod options;
pub use options::{CancelToken, EquityOptions, Mode};

mod tally;
use tally::{Showdown, Tally};

/// The maximum number of hands in an estimate.
pub const MAX_PLAYERS: usize = 10;

/// Number of trials between two convergence checks.
const ROUND_TRIALS: u64 = 10_000;

/// A player equity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerEquity {
    /// Percent of the boards this player wins alone.
    pub win_percent: f64,
    /// Percent of the pot this player gets from split pots.
    pub tie_percent: f64,
}

impl PlayerEquity {
    /// The total equity percent.
    pub fn equity(&self) -> f64 {
        self.win_percent + self.tie_percent
    }
}

/// How an estimate was computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Method {
    /// All board completions have been evaluated.
    Exact,
    /// Random board completions have been sampled.
    MonteCarlo {
        /// Whether the standard error dropped below the requested epsilon
        /// before the trials budget ran out.
        converged: bool,
        /// The largest standard error of the players equity share.
        std_error: f64,
    },
}

/// The result of an equity estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityResult {
    /// The players equity in the same order as the hands.
    pub players: Vec<PlayerEquity>,
    /// The number of boards evaluated.
    pub trials: u64,
    /// How the equity was computed.
    pub method: Method,
}

impl EquityResult {
    /// Checks if the result is exact.
    pub fn is_exact(&self) -> bool {
        self.method == Method::Exact
    }

    fn from_tally(tally: &Tally, method: Method) -> Self {
        let n = tally.trials.max(1) as f64;
        let players = tally
            .wins
            .iter()
            .zip(&tally.ties)
            .map(|(&wins, &ties)| PlayerEquity {
                win_percent: 100.0 * wins as f64 / n,
                tie_percent: 100.0 * ties / n,
            })
            .collect();

        Self {
            players,
            trials: tally.trials,
            method,
        }
    }
}

/// Estimates the equity of each hand.
///
/// Fails if there are fewer than 2 or more than 10 hands, if a card appears in
/// more than one hand or on the board, or if the estimate is cancelled.
pub fn estimate(hands: &[HoleCards], board: &Board, options: &EquityOptions) -> Result<EquityResult> {
    if hands.len() < 2 {
        return Err(Error::InsufficientPlayers(hands.len()));
    }

    if hands.len() > MAX_PLAYERS {
        return Err(Error::TooManyPlayers(hands.len()));
    }

    // All the known cards come out of the deck, this also checks that no card
    // is shared between hands and board.
    let known = hands
        .iter()
        .flat_map(HoleCards::cards)
        .chain(board.cards().iter().copied())
        .collect::<Vec<_>>();
    let deck = Deck::remaining(&known)?;

    let k = board.cards_to_come();
    let combinations = nck(deck.count(), k);
    let exact = match options.mode {
        _ if k == 0 => true,
        Mode::Auto => combinations <= options.max_combinations,
        Mode::Exact => true,
        Mode::Sample => false,
    };

    let now = Instant::now();
    let result = if exact {
        debug!(
            "Enumerating {combinations} boards for {} players on the {}",
            hands.len(),
            board.street()
        );

        let tally = enumerate(hands, board, &deck, options)?;
        EquityResult::from_tally(&tally, Method::Exact)
    } else {
        debug!(
            "Sampling up to {} of {combinations} boards for {} players on the {}",
            options.max_trials,
            hands.len(),
            board.street()
        );

        sample(hands, board, &deck, options)?
    };

    debug!(
        "Evaluated {} boards in {:.3}s",
        result.trials,
        now.elapsed().as_secs_f64()
    );

    Ok(result)
}

/// Evaluates every board completion.
fn enumerate(hands: &[HoleCards], board: &Board, deck: &Deck, opts: &EquityOptions) -> Result<Tally> {
    let k = board.cards_to_come();
    let num_boards = nck(deck.count(), k);
    let num_tasks = (opts.num_tasks as u64).clamp(1, num_boards.max(1)) as usize;

    let mut tallies = vec![Tally::new(hands.len()); num_tasks];
    let chunks = deck.combinations_chunks(num_tasks, k);

    thread::scope(|s| {
        for (tally, chunk) in tallies.iter_mut().zip(chunks) {
            s.spawn(move || {
                let mut showdown = Showdown::new(hands, board);
                for completion in chunk {
                    if opts.is_cancelled() {
                        break;
                    }

                    tally.add(showdown.eval(&completion));
                }
            });
        }
    });

    completed(merge(hands.len(), &tallies), num_boards)
}

/// Evaluates random board completions.
fn sample(
    hands: &[HoleCards],
    board: &Board,
    deck: &Deck,
    opts: &EquityOptions,
) -> Result<EquityResult> {
    let k = board.cards_to_come();
    let max_trials = opts.max_trials.max(1);
    let num_tasks = opts.num_tasks.clamp(1, max_trials.min(ROUND_TRIALS) as usize);

    // Each task has its own generator that lives across rounds.
    let mut rngs = (0..num_tasks as u64)
        .map(|task_id| match opts.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id)),
            None => SmallRng::from_os_rng(),
        })
        .collect::<Vec<_>>();

    let mut total = Tally::new(hands.len());
    let mut converged = false;

    while total.trials < max_trials {
        let round = (max_trials - total.trials).min(ROUND_TRIALS);
        let mut tallies = vec![Tally::new(hands.len()); num_tasks];

        thread::scope(|s| {
            for (task_id, (tally, rng)) in tallies.iter_mut().zip(&mut rngs).enumerate() {
                let trials = task_trials(round, num_tasks, task_id);
                s.spawn(move || {
                    let mut showdown = Showdown::new(hands, board);
                    for _ in 0..trials {
                        if opts.is_cancelled() {
                            break;
                        }

                        let completion = deck.draw(rng, k);
                        tally.add(showdown.eval(&completion));
                    }
                });
            }
        });

        total.merge(&completed(merge(hands.len(), &tallies), round)?);

        if total.max_std_error() < opts.epsilon {
            converged = true;
            break;
        }
    }

    let method = Method::MonteCarlo {
        converged,
        std_error: total.max_std_error(),
    };

    Ok(EquityResult::from_tally(&total, method))
}

/// The number of trials for a task so that the tasks trials add up to `round`.
fn task_trials(round: u64, num_tasks: usize, task_id: usize) -> u64 {
    let (per_task, extra) = (round / num_tasks as u64, round % num_tasks as u64);
    per_task + u64::from((task_id as u64) < extra)
}

/// Fails if the workers stopped before evaluating all the expected boards.
fn completed(tally: Tally, expected: u64) -> Result<Tally> {
    if tally.trials < expected {
        Err(Error::Cancelled)
    } else {
        Ok(tally)
    }
}

fn merge(players: usize, tallies: &[Tally]) -> Tally {
    tallies.iter().fold(Tally::new(players), |mut acc, t| {
        acc.merge(t);
        acc
    })
}
