//! Strategy selection, backtesting and Monte Carlo risk simulation for Lotofácil, a lottery in which
//! 15 numbers are drawn from 1 to 25.
//!
//! Strategies turn a table of historical draws into a pool of candidate numbers. Games are sampled
//! from pools, scored against draws and replayed over a rolling window of history to estimate how a
//! strategy would have fared.

#![allow(clippy::too_many_arguments)]

pub mod alert;
pub mod backtest;
pub mod comb;
pub mod cooccurrence;
pub mod csv;
pub mod display;
pub mod draw;
pub mod export;
pub mod file;
pub mod generate;
pub mod mc;
pub mod pool;
pub mod print;
pub mod provider;
pub mod scoring;
pub mod seed;
pub mod stats;
pub mod store;
pub mod strategy;
pub mod ticket;
pub mod timed;

#[cfg(test)]
pub(crate) mod testing;
