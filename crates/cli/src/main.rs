// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown CLI: hand evaluation, equity and pot odds.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use showdown_core::{
    Board, CancelToken, EquityOptions, Error, HandValue, HoleCards, Mode, effective_stack, estimate,
    evaluate, parse_cards,
};

mod report;
mod units;

use report::{EquityReport, HandReport, OddsReport};
use units::{DisplayUnit, to_dollars};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Print the output as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates the best hand of 5 to 7 cards.
    Eval {
        /// The cards, for example `Ah Kh Qh Jh Th`.
        #[arg(required = true)]
        cards: Vec<String>,
    },
    /// Estimates the equity of 2 to 10 hands.
    Equity(EquityArgs),
    /// Computes pot odds and minimum defense frequency for a bet.
    Odds(OddsArgs),
}

#[derive(Debug, clap::Args)]
struct EquityArgs {
    /// A player hole cards, for example `AhKh`, repeat for each player.
    #[arg(long = "hand", short = 'H', required = true)]
    hands: Vec<HoleCards>,
    /// The board cards, 0, 3, 4 or 5 cards.
    #[arg(long, short)]
    board: Option<Board>,
    /// How the equity is computed.
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,
    /// The maximum number of sampled boards.
    #[arg(long, default_value_t = EquityOptions::MAX_TRIALS,
          value_parser = clap::value_parser!(u64).range(1..))]
    max_trials: u64,
    /// In auto mode the largest number of boards that are enumerated.
    #[arg(long, default_value_t = EquityOptions::MAX_COMBINATIONS)]
    max_combinations: u64,
    /// Sampling stops when the standard error of every player equity share is
    /// below this value.
    #[arg(long, default_value_t = EquityOptions::EPSILON, value_parser = parse_epsilon)]
    epsilon: f64,
    /// The number of parallel tasks, defaults to the number of CPUs.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=1024))]
    tasks: Option<u16>,
    /// The sampling seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Cancels the estimate after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, clap::Args)]
struct OddsArgs {
    /// The bet to call.
    #[arg(long, value_parser = parse_amount)]
    bet: f64,
    /// The pot before the bet.
    #[arg(long, value_parser = parse_amount)]
    pot: f64,
    /// The players stacks, repeat for each player.
    #[arg(long = "stack", value_parser = parse_amount)]
    stacks: Vec<f64>,
    /// The big blind size in dollars.
    #[arg(long, value_parser = parse_amount, required_if_eq("unit", "bb"))]
    big_blind: Option<f64>,
    /// The unit of the amounts.
    #[arg(long, value_enum, default_value_t = DisplayUnit::Dollars)]
    unit: DisplayUnit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Enumerate if there are at most max-combinations boards, sample otherwise.
    Auto,
    /// Enumerate all the boards.
    Exact,
    /// Sample random boards.
    Sample,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Exact => Mode::Exact,
            ModeArg::Sample => Mode::Sample,
        }
    }
}

fn parse_epsilon(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("`{s}` is not a non negative number")),
    }
}

fn parse_amount(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("`{s}` is not a valid amount")),
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Eval { cards } => eval(&cards, cli.json),
        Command::Equity(args) => equity(args, cli.json),
        Command::Odds(args) => odds(args, cli.json),
    }
}

fn eval(cards: &[String], json: bool) -> Result<()> {
    let cards = parse_cards(&cards.join(" "))?;

    // Validates the cards before looking for the best five.
    let value = evaluate(&cards)?;
    let (best_value, best) = HandValue::eval_with_best_hand(&cards);
    debug_assert_eq!(value, best_value);

    write(&HandReport::new(value, &best), json, HandReport::write_text)
}

fn equity(args: EquityArgs, json: bool) -> Result<()> {
    let board = args.board.unwrap_or_default();
    let cancel = CancelToken::new();
    let mut opts = EquityOptions::default()
        .with_mode(args.mode.into())
        .with_max_trials(args.max_trials)
        .with_max_combinations(args.max_combinations)
        .with_epsilon(args.epsilon)
        .with_cancel(cancel.clone());

    if let Some(tasks) = args.tasks {
        opts = opts.with_num_tasks(tasks as usize);
    }

    if let Some(seed) = args.seed {
        opts = opts.with_seed(seed);
    }

    if let Some(ms) = args.timeout_ms {
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(ms));
            cancel.cancel();
        });
    }

    info!(
        "Estimating {} hands on the {} with {} tasks",
        args.hands.len(),
        board.street(),
        opts.num_tasks
    );

    let result =
        estimate(&args.hands, &board, &opts).map_err(|err| estimate_error(err, args.timeout_ms))?;

    let report = EquityReport::new(&args.hands, &board, &result);
    write(&report, json, EquityReport::write_text)
}

fn estimate_error(err: Error, timeout_ms: Option<u64>) -> anyhow::Error {
    match (err, timeout_ms) {
        (Error::Cancelled, Some(ms)) => {
            anyhow::Error::new(Error::Cancelled).context(format!("timeout after {ms}ms"))
        }
        (err, _) => anyhow::Error::new(err).context("equity estimate failed"),
    }
}

fn odds(args: OddsArgs, json: bool) -> Result<()> {
    // Amounts are given in the display unit and converted to dollars.
    let big_blind = args.big_blind.unwrap_or(0.0);
    let in_dollars = |amount: f64| match args.unit {
        DisplayUnit::Dollars => amount,
        DisplayUnit::BigBlinds => to_dollars(amount, big_blind),
    };

    if args.unit == DisplayUnit::BigBlinds && big_blind <= 0.0 {
        bail!("the big blind must be positive to use big blinds");
    }

    let stacks = args.stacks.iter().map(|&s| in_dollars(s)).collect::<Vec<_>>();
    let stack = (!stacks.is_empty()).then(|| effective_stack(&stacks));

    let report = OddsReport::new(
        in_dollars(args.bet),
        in_dollars(args.pot),
        stack,
        args.unit,
        big_blind,
    );
    write(&report, json, OddsReport::write_text)
}

fn write<T, F>(report: &T, json: bool, write_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, report)?;
        writeln!(stdout)?;
    } else {
        write_text(report, &mut stdout)?;
    }

    Ok(())
}
