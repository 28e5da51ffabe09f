//! Monte Carlo simulation of the profit and loss of playing a fixed number of games.
//!
//! The hit rates are illustrative: they are supplied by the caller (or taken from
//! [HitRates::illustrative]) and are not estimated from any history.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;
use tinyrand::Rand;

use crate::scoring::{Money, Tier, TICKET_PRICE};

#[derive(Debug, Error, PartialEq)]
pub enum InvalidHitRates {
    #[error("rate for {hits} hits is {rate}, outside [0, 1]")]
    OutOfRange { hits: u8, rate: f64 },

    #[error("rates sum to {0}, exceeding 1")]
    Excessive(f64),
}

/// Probability of each prize tier, in ascending tier order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRates([f64; Tier::COUNT]);
impl HitRates {
    pub fn new(rates: [f64; Tier::COUNT]) -> Result<Self, InvalidHitRates> {
        for tier in Tier::iter() {
            let rate = rates[tier.ordinal()];
            if !(0.0..=1.0).contains(&rate) {
                return Err(InvalidHitRates::OutOfRange {
                    hits: tier.hits(),
                    rate,
                });
            }
        }
        let sum = rates.iter().sum::<f64>();
        if sum > 1.0 {
            return Err(InvalidHitRates::Excessive(sum));
        }
        Ok(Self(rates))
    }

    /// A fixed, made-up table for demonstration purposes only.
    pub fn illustrative() -> Self {
        Self([0.02, 0.008, 0.001, 0.000_05, 0.000_000_1])
    }

    #[inline]
    pub fn rate(&self, tier: Tier) -> f64 {
        self.0[tier.ordinal()]
    }

    /// Expected prize of a single game.
    pub fn expected_prize(&self) -> f64 {
        Tier::iter()
            .map(|tier| self.rate(tier) * tier.prize().as_f64())
            .sum()
    }
}

impl Default for HitRates {
    fn default() -> Self {
        Self::illustrative()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct McConfig {
    pub simulations: usize,
    pub games_per_simulation: usize,
}

/// The tier (if any) won by a game, given a uniform random `u` in `[0, 1)`. Tiers are visited in
/// ascending order, the first with `u` below the cumulative rate winning.
pub fn tier_for(rates: &HitRates, u: f64) -> Option<Tier> {
    let mut cumulative = 0.0;
    for tier in Tier::iter() {
        cumulative += rates.rate(tier);
        if u < cumulative {
            return Some(tier);
        }
    }
    None
}

/// Simulates one trial of `games` games, returning its net result.
pub fn run_once(rates: &HitRates, games: usize, rand: &mut impl Rand) -> Money {
    let mut prize = Money::ZERO;
    for _ in 0..games {
        if let Some(tier) = tier_for(rates, random_f64(rand)) {
            prize += tier.prize();
        }
    }
    prize - TICKET_PRICE * games as u64
}

pub fn simulate(rates: &HitRates, config: &McConfig, rand: &mut impl Rand) -> Distribution {
    let nets = (0..config.simulations)
        .map(|_| run_once(rates, config.games_per_simulation, rand))
        .collect();
    Distribution { nets }
}

/// The analytical mean of the net result of playing `games` games.
pub fn expected_net(rates: &HitRates, games: usize) -> f64 {
    games as f64 * (rates.expected_prize() - TICKET_PRICE.as_f64())
}

/// Net results of a set of trials, in the order they were simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub nets: Vec<Money>,
}
impl Distribution {
    /// The `q`-quantile (`q` in `[0, 1]`), linearly interpolating between the closest ranks.
    /// `None` if there are no trials.
    pub fn percentile(&self, q: f64) -> Option<f64> {
        if self.nets.is_empty() {
            return None;
        }
        let mut sorted = self.nets.iter().map(|net| net.as_f64()).collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        let q = q.clamp(0.0, 1.0);
        let rank = q * (sorted.len() - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        let fraction = rank - lower as f64;
        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
    }

    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.nets.is_empty() {
            None
        } else {
            Some(self.nets.iter().map(|net| net.as_f64()).sum::<f64>() / self.nets.len() as f64)
        }
    }

    /// Fraction of trials that ended in profit.
    pub fn prob_profit(&self) -> Option<f64> {
        if self.nets.is_empty() {
            None
        } else {
            let profitable = self.nets.iter().filter(|net| net.is_positive()).count();
            Some(profitable as f64 / self.nets.len() as f64)
        }
    }
}

/// A uniform sample in `[0, 1)` built from the upper 53 bits of a random word.
#[inline]
fn random_f64(rand: &mut impl Rand) -> f64 {
    (rand.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}
