//! Rolling-window replay of a strategy set against historical draws.
//!
//! For each of the last `window` draws, the strategies see only the draws that precede it, select a
//! pool, generate games from it and have those games scored against the draw.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyrand::Rand;
use tracing::debug;

use crate::draw::Draw;
use crate::generate::{generate, Shortfall};
use crate::scoring::{prize_for, score, Money, Tally};
use crate::strategy::{combine, Strategy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub strategies: Vec<Strategy>,
    pub games_per_draw: usize,
    pub window: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BacktestError {
    #[error("backtest needs at least {required} draws, only {available} available")]
    InsufficientHistory { required: usize, available: usize },

    #[error("no strategies to backtest")]
    NoStrategies,
}

/// What happened at one offset of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetOutcome {
    pub contest: u32,
    pub pool_size: usize,
    pub games: usize,
    pub best_hits: u8,
    pub prize: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacktestResult {
    pub tally: Tally,
    pub skipped: usize,
    pub offsets: Vec<OffsetOutcome>,
}
impl BacktestResult {
    #[inline]
    pub fn net(&self) -> Money {
        self.tally.net()
    }
}

pub fn run(
    draws: &[Draw],
    config: &BacktestConfig,
    rand: &mut impl Rand,
) -> Result<BacktestResult, BacktestError> {
    if config.strategies.is_empty() {
        return Err(BacktestError::NoStrategies);
    }
    let available = draws.len();
    let required = config.window + 1;
    if available < required {
        return Err(BacktestError::InsufficientHistory {
            required,
            available,
        });
    }

    let mut tally = Tally::default();
    let mut skipped = 0;
    let mut offsets = Vec::with_capacity(config.window);
    let start = available - config.window;
    for target_index in start..available {
        let context = &draws[..target_index];
        let target = &draws[target_index];
        let pool = combine(&config.strategies, context);
        let generated = generate(pool, config.games_per_draw, rand);
        if let Some(Shortfall::InsufficientPool { size }) = generated.shortfall {
            debug!("skipping contest {}: pool of {size}", target.contest);
            skipped += 1;
        }

        let mut best_hits = 0;
        let mut prize = Money::ZERO;
        for game in &generated.games {
            let hits = score(game, target);
            best_hits = best_hits.max(hits);
            tally.record(hits);
            prize += prize_for(hits);
        }
        offsets.push(OffsetOutcome {
            contest: target.contest,
            pool_size: pool.len(),
            games: generated.games.len(),
            best_hits,
            prize,
        });
    }

    Ok(BacktestResult {
        tally,
        skipped,
        offsets,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    A,
    B,
    Tie,
}
impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::A => write!(f, "strategy set A performed better"),
            Verdict::B => write!(f, "strategy set B performed better"),
            Verdict::Tie => write!(f, "both strategy sets performed the same"),
        }
    }
}

/// Two backtests over the same window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub a: BacktestResult,
    pub b: BacktestResult,
}
impl Comparison {
    /// The better set by net result.
    pub fn verdict(&self) -> Verdict {
        match self.a.net().cmp(&self.b.net()) {
            std::cmp::Ordering::Greater => Verdict::A,
            std::cmp::Ordering::Less => Verdict::B,
            std::cmp::Ordering::Equal => Verdict::Tie,
        }
    }
}

pub fn compare(
    draws: &[Draw],
    a: &[Strategy],
    b: &[Strategy],
    games_per_draw: usize,
    window: usize,
    rand: &mut impl Rand,
) -> Result<Comparison, BacktestError> {
    let config = |strategies: &[Strategy]| BacktestConfig {
        strategies: strategies.to_vec(),
        games_per_draw,
        window,
    };
    let a = run(draws, &config(a), rand)?;
    let b = run(draws, &config(b), rand)?;
    Ok(Comparison { a, b })
}

#[cfg(test)]
mod tests;
