//! Counts of numbers drawn together: pairs, triplets and quadruplets.
//!
//! Every draw contributes each of its `C(15, k)` `k`-subsets once, so quadruplet analysis costs
//! 1,365 increments per draw.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

use crate::comb;
use crate::display::DisplayCombination;
use crate::draw::{Draw, PICKS};
use crate::pool::Pool;
use crate::timed::Timed;

/// Histories longer than this trigger a warning when analysing quadruplets.
pub const QUAD_WARN_DRAWS: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Arity {
    Pair,
    Triplet,
    Quad,
}
impl Arity {
    #[inline]
    pub fn members(self) -> usize {
        match self {
            Arity::Pair => 2,
            Arity::Triplet => 3,
            Arity::Quad => 4,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("co-occurrence analysis exceeded its budget of {budget:?} after {draws} draws")]
pub struct BudgetExceeded {
    pub budget: Duration,
    pub draws: usize,
}

/// A set of numbers and the count of draws that contained all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    pub members: Vec<u8>,
    pub count: u64,
}
impl Combination {
    /// Descending count, then ascending members.
    fn rank(&self, other: &Combination) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.members.cmp(&other.members))
    }
}

impl Display for Combination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", DisplayCombination::from(&self.members[..]), self.count)
    }
}

/// The `top_n` most frequently co-drawn combinations of the given arity.
pub fn top_combinations(draws: &[Draw], arity: Arity, top_n: usize) -> Vec<Combination> {
    let mut counts = FxHashMap::default();
    for draw in draws {
        count_draw(draw, arity, &mut counts);
    }
    rank(counts, top_n)
}

/// As [top_combinations], but gives up once `budget` has elapsed. The budget is checked before each
/// draw, so a zero budget gives up before counting anything.
pub fn top_combinations_within(
    draws: &[Draw],
    arity: Arity,
    top_n: usize,
    budget: Duration,
) -> Result<Timed<Vec<Combination>>, BudgetExceeded> {
    if arity == Arity::Quad && draws.len() > QUAD_WARN_DRAWS {
        warn!(
            "quadruplet analysis over {} draws will enumerate {} combinations",
            draws.len(),
            draws.len() as u64 * comb::binomial(PICKS as u64, 4)
        );
    }
    Timed::result(|| {
        let start_time = Instant::now();
        let mut counts = FxHashMap::default();
        for (index, draw) in draws.iter().enumerate() {
            if start_time.elapsed() >= budget {
                debug!("abandoning {arity} analysis after {index} draws");
                return Err(BudgetExceeded {
                    budget,
                    draws: index,
                });
            }
            count_draw(draw, arity, &mut counts);
        }
        Ok(rank(counts, top_n))
    })
}

fn count_draw(draw: &Draw, arity: Arity, counts: &mut FxHashMap<Pool, u64>) {
    let numbers = draw.numbers();
    let mut ordinals = [0; 4];
    let ordinals = &mut ordinals[..arity.members()];
    comb::first(ordinals);
    loop {
        let combination = ordinals.iter().map(|&ordinal| numbers[ordinal]).collect::<Pool>();
        *counts.entry(combination).or_default() += 1;
        if !comb::advance(ordinals, PICKS) {
            break;
        }
    }
}

fn rank(counts: FxHashMap<Pool, u64>, top_n: usize) -> Vec<Combination> {
    let mut combinations = counts
        .into_iter()
        .map(|(pool, count)| Combination {
            members: pool.to_vec(),
            count,
        })
        .collect::<Vec<_>>();
    combinations.sort_by(Combination::rank);
    combinations.truncate(top_n);
    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{constant_history, history, random_history, LOW_FIFTEEN};
    use strum::IntoEnumIterator;

    const HIGH_FIFTEEN: [u8; 15] = [11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25];

    fn combination(members: &[u8], count: u64) -> Combination {
        Combination {
            members: members.to_vec(),
            count,
        }
    }

    #[test]
    fn every_subset_counted_once_per_draw() {
        let history = constant_history(3);
        for arity in Arity::iter() {
            let all = top_combinations(&history, arity, usize::MAX);
            assert_eq!(
                comb::binomial(15, arity.members() as u64),
                all.len() as u64,
                "{arity}"
            );
            assert!(all.iter().all(|combination| combination.count == 3));
        }
    }

    #[test]
    fn ties_ascending_lexicographic() {
        let history = constant_history(2);
        assert_eq!(
            vec![
                combination(&[1, 2], 2),
                combination(&[1, 3], 2),
                combination(&[1, 4], 2)
            ],
            top_combinations(&history, Arity::Pair, 3)
        );
    }

    #[test]
    fn most_frequent_first() {
        let history = history(&[&LOW_FIFTEEN, &HIGH_FIFTEEN]);
        let top = top_combinations(&history, Arity::Triplet, 11);
        // the ten triplets within 11-15 were drawn twice, the rest once
        assert_eq!(combination(&[11, 12, 13], 2), top[0]);
        assert_eq!(combination(&[13, 14, 15], 2), top[9]);
        assert_eq!(combination(&[1, 2, 3], 1), top[10]);
    }

    #[test]
    fn empty_history() {
        assert!(top_combinations(&[], Arity::Quad, 10).is_empty());
    }

    #[test]
    fn within_budget() {
        let history = random_history(30, 5);
        let timed = top_combinations_within(&history, Arity::Pair, 5, Duration::from_secs(60)).unwrap();
        assert_eq!(top_combinations(&history, Arity::Pair, 5), timed.value);
    }

    #[test]
    fn budget_exceeded() {
        let history = constant_history(5);
        let err = top_combinations_within(&history, Arity::Quad, 5, Duration::ZERO).unwrap_err();
        assert_eq!(
            BudgetExceeded {
                budget: Duration::ZERO,
                draws: 0
            },
            err
        );

        let empty = top_combinations_within(&[], Arity::Pair, 5, Duration::ZERO).unwrap();
        assert!(empty.value.is_empty());
    }

    #[test]
    fn arity_names() {
        assert_eq!(Ok(Arity::Triplet), "triplet".parse());
        assert_eq!("quad", Arity::Quad.to_string());
        assert!("quintet".parse::<Arity>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!("03-11-20 (7)", combination(&[3, 11, 20], 7).to_string());
    }
}
