//! The catalogue of pool-selection strategies. Each [Strategy] maps a table of past draws to a
//! [Pool] of candidate numbers; several strategies combine by set union.
//!
//! Rankings break ties by ascending number (or digit, or row/column index), so every strategy is
//! deterministic for a given history.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use crate::draw::{Draw, NUMBERS};
use crate::pool::{union_all, Pool};
use crate::stats;
use crate::stats::{Axis, GRID};

pub const PRIMES: [u8; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];
pub const FIBONACCI: [u8; 7] = [1, 2, 3, 5, 8, 13, 21];

const MAX_POOL: usize = NUMBERS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub top_n: usize,
}
impl Default for Frequency {
    fn default() -> Self {
        Self { top_n: MAX_POOL }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delay {
    pub top_n: usize,
}
impl Default for Delay {
    fn default() -> Self {
        Self { top_n: MAX_POOL }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastDigit {
    pub top_digits: usize,
}
impl Default for LastDigit {
    fn default() -> Self {
        Self { top_digits: 5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOrColumn {
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaEnvolve {
    pub freq_n: usize,
    pub delay_n: usize,
}
impl Default for AlphaEnvolve {
    fn default() -> Self {
        Self {
            freq_n: 15,
            delay_n: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    Frequency(Frequency),
    Delay(Delay),
    LastDigit(LastDigit),
    Primes,
    Fibonacci,
    RowOrColumn(RowOrColumn),
    AlphaEnvolve(AlphaEnvolve),
}
impl Strategy {
    pub fn select(&self, draws: &[Draw]) -> Pool {
        match self {
            Strategy::Frequency(Frequency { top_n }) => frequency(draws, *top_n),
            Strategy::Delay(Delay { top_n }) => delay(draws, *top_n),
            Strategy::LastDigit(LastDigit { top_digits }) => last_digit(draws, *top_digits),
            Strategy::Primes => seeded_with_frequency(draws, &PRIMES),
            Strategy::Fibonacci => seeded_with_frequency(draws, &FIBONACCI),
            Strategy::RowOrColumn(RowOrColumn { axis }) => row_or_column(draws, *axis),
            Strategy::AlphaEnvolve(AlphaEnvolve { freq_n, delay_n }) => {
                alpha_envolve(draws, *freq_n, *delay_n)
            }
        }
    }
}

/// The union of the pools selected by each of the `strategies`.
pub fn combine(strategies: &[Strategy], draws: &[Draw]) -> Pool {
    union_all(strategies.iter().map(|strategy| strategy.select(draws)))
}

/// The `top_n` most frequently drawn numbers. Numbers that were never drawn are not candidates, so an
/// empty history selects nothing.
pub fn frequency(draws: &[Draw], top_n: usize) -> Pool {
    let frequencies = stats::frequencies(draws);
    stats::rank_descending(
        frequencies.iter().filter(|&(_, count)| count > 0),
        top_n,
    )
    .into_iter()
    .collect()
}

/// The `top_n` numbers absent for the most consecutive recent draws. An empty history yields every
/// number, as all are maximally delayed.
pub fn delay(draws: &[Draw], top_n: usize) -> Pool {
    if draws.is_empty() {
        return Pool::full();
    }
    stats::rank_descending(stats::delays(draws).iter(), top_n)
        .into_iter()
        .collect()
}

/// Every number whose last digit is among the `top_digits` most frequent last digits.
pub fn last_digit(draws: &[Draw], top_digits: usize) -> Pool {
    let buckets = stats::last_digit_frequencies(draws);
    let digits = stats::rank_descending(
        buckets
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(digit, &count)| (digit as u8, count)),
        top_digits,
    );
    (1..=NUMBERS)
        .filter(|number| digits.contains(&(number % 10)))
        .collect()
}

/// A fixed set topped up with the most frequent numbers, enough to fill the full range.
fn seeded_with_frequency(draws: &[Draw], fixed: &[u8]) -> Pool {
    let mut pool = frequency(draws, MAX_POOL - fixed.len());
    pool.extend(fixed.iter().copied());
    pool
}

/// All five numbers on the most frequently drawn row (or column) of the card.
pub fn row_or_column(draws: &[Draw], axis: Axis) -> Pool {
    if draws.is_empty() {
        return Pool::EMPTY;
    }
    let totals = stats::axis_frequencies(draws, axis);
    let mut best = 0;
    for index in 1..GRID {
        if totals[index] > totals[best] {
            best = index;
        }
    }
    axis.members(best + 1)
}

/// The union of the `freq_n` most frequent and the `delay_n` most delayed numbers.
pub fn alpha_envolve(draws: &[Draw], freq_n: usize, delay_n: usize) -> Pool {
    (frequency(draws, freq_n) | delay(draws, delay_n)).first(MAX_POOL)
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Frequency(Frequency { top_n }) => write!(f, "frequency:{top_n}"),
            Strategy::Delay(Delay { top_n }) => write!(f, "delay:{top_n}"),
            Strategy::LastDigit(LastDigit { top_digits }) => write!(f, "last-digit:{top_digits}"),
            Strategy::Primes => write!(f, "primes"),
            Strategy::Fibonacci => write!(f, "fibonacci"),
            Strategy::RowOrColumn(RowOrColumn { axis: Axis::Row }) => write!(f, "rows"),
            Strategy::RowOrColumn(RowOrColumn {
                axis: Axis::Column,
            }) => write!(f, "columns"),
            Strategy::AlphaEnvolve(AlphaEnvolve { freq_n, delay_n }) => {
                write!(f, "alpha:{freq_n}:{delay_n}")
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    /// Parses the compact form `name[:param[:param]]`, e.g. `frequency:20` or `alpha:15:10`.
    /// Omitted parameters take their defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut frags = s.trim().split(':');
        let name = frags.next().context("no strategy to parse")?;
        let params = frags
            .map(|frag| {
                frag.parse::<usize>()
                    .map_err(|err| anyhow!("invalid parameter '{frag}' for {name}: {err}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expect_params = |max: usize| -> anyhow::Result<()> {
            if params.len() > max {
                bail!("{name} takes at most {max} parameter(s), got {}", params.len());
            }
            Ok(())
        };

        let strategy = match name.to_lowercase().as_str() {
            "frequency" | "freq" => {
                expect_params(1)?;
                Strategy::Frequency(Frequency {
                    top_n: params.first().copied().unwrap_or(Frequency::default().top_n),
                })
            }
            "delay" => {
                expect_params(1)?;
                Strategy::Delay(Delay {
                    top_n: params.first().copied().unwrap_or(Delay::default().top_n),
                })
            }
            "last-digit" | "last_digit" => {
                expect_params(1)?;
                Strategy::LastDigit(LastDigit {
                    top_digits: params
                        .first()
                        .copied()
                        .unwrap_or(LastDigit::default().top_digits),
                })
            }
            "primes" => {
                expect_params(0)?;
                Strategy::Primes
            }
            "fibonacci" => {
                expect_params(0)?;
                Strategy::Fibonacci
            }
            "rows" | "row" => {
                expect_params(0)?;
                Strategy::RowOrColumn(RowOrColumn { axis: Axis::Row })
            }
            "columns" | "column" => {
                expect_params(0)?;
                Strategy::RowOrColumn(RowOrColumn { axis: Axis::Column })
            }
            "alpha" | "alpha-envolve" => {
                expect_params(2)?;
                let defaults = AlphaEnvolve::default();
                Strategy::AlphaEnvolve(AlphaEnvolve {
                    freq_n: params.first().copied().unwrap_or(defaults.freq_n),
                    delay_n: params.get(1).copied().unwrap_or(defaults.delay_n),
                })
            }
            _ => bail!("unsupported strategy '{name}'"),
        };
        Ok(strategy)
    }
}

/// A named set of strategies, in the plain structural form a caller may persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub strategies: Vec<Strategy>,
}
impl StrategyConfig {
    pub fn select(&self, draws: &[Draw]) -> Pool {
        combine(&self.strategies, draws)
    }
}

impl From<Vec<Strategy>> for StrategyConfig {
    fn from(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }
}
