//! Generation of distinct games from a pool of candidate numbers.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;
use tinyrand::Rand;
use tracing::{debug, warn};

use crate::comb;
use crate::comb::Combinator;
use crate::display::DisplayNumbers;
use crate::draw::PICKS;
use crate::pool::Pool;

/// A ticket of 15 distinct numbers, held in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Game([u8; PICKS]);
impl Game {
    /// Builds a game from exactly 15 distinct numbers, sorting them.
    pub(crate) fn from_unsorted(mut numbers: [u8; PICKS]) -> Self {
        numbers.sort_unstable();
        debug_assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
        Self(numbers)
    }

    #[inline]
    pub fn numbers(&self) -> &[u8; PICKS] {
        &self.0
    }

    pub fn pool(&self) -> Pool {
        self.0.iter().copied().collect()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DisplayNumbers::from(&self.0[..]))
    }
}

/// Why fewer games than requested were produced. Not a failure: the games that could be generated
/// are still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Shortfall {
    #[error("pool has {size} numbers, at least 15 are needed")]
    InsufficientPool { size: usize },

    #[error("requested {requested} games but the pool only admits {possible}")]
    Capacity { requested: usize, possible: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub games: Vec<Game>,
    pub shortfall: Option<Shortfall>,
}

/// Generates up to `count` distinct games from `pool`, each a uniform sample of 15 numbers drawn
/// without replacement.
///
/// When the pool admits no more than `count` distinct games, all of them are enumerated instead
/// and the shortfall (if any) is reported. Games are returned in the order they were generated.
pub fn generate(pool: Pool, count: usize, rand: &mut impl Rand) -> Generated {
    let size = pool.len();
    if size < PICKS {
        warn!("cannot generate games from a pool of {size} numbers");
        return Generated {
            games: vec![],
            shortfall: Some(Shortfall::InsufficientPool { size }),
        };
    }

    let possible = comb::binomial(size as u64, PICKS as u64);
    if possible <= count as u64 {
        let games = enumerate(pool);
        let shortfall = (possible < count as u64).then(|| {
            debug!("pool of {size} admits only {possible} of {count} requested games");
            Shortfall::Capacity {
                requested: count,
                possible,
            }
        });
        return Generated { games, shortfall };
    }

    let candidates = pool.to_vec();
    let mut scratch = candidates.clone();
    let mut seen = FxHashSet::default();
    let mut games = Vec::with_capacity(count);
    while games.len() < count {
        let game = sample(&candidates, &mut scratch, rand);
        if seen.insert(game) {
            games.push(game);
        }
    }
    Generated {
        games,
        shortfall: None,
    }
}

/// Every 15-number game in the pool, in lexicographic order.
fn enumerate(pool: Pool) -> Vec<Game> {
    let candidates = pool.to_vec();
    Combinator::new(candidates.len(), PICKS)
        .into_iter()
        .map(|ordinals| {
            let mut numbers = [0; PICKS];
            for (slot, ordinal) in numbers.iter_mut().zip(ordinals) {
                *slot = candidates[ordinal];
            }
            Game(numbers)
        })
        .collect()
}

/// Partial Fisher-Yates shuffle of the first 15 positions of `scratch`, which is reset from
/// `candidates` before each use.
fn sample(candidates: &[u8], scratch: &mut [u8], rand: &mut impl Rand) -> Game {
    scratch.copy_from_slice(candidates);
    let len = scratch.len();
    for index in 0..PICKS {
        let swap = index + rand.next_lim_u64((len - index) as u64) as usize;
        scratch.swap(index, swap);
    }
    let mut numbers = [0; PICKS];
    numbers.copy_from_slice(&scratch[..PICKS]);
    Game::from_unsorted(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyrand::{Seeded, StdRand, Wyrand};

    #[test]
    fn insufficient_pool() {
        let generated = generate(Pool::from_iter(1..=14), 10, &mut StdRand::default());
        assert!(generated.games.is_empty());
        assert_eq!(
            Some(Shortfall::InsufficientPool { size: 14 }),
            generated.shortfall
        );
    }

    #[test]
    fn exact_pool_yields_one_game() {
        let generated = generate(Pool::from_iter(1..=15), 5, &mut StdRand::default());
        assert_eq!(1, generated.games.len());
        assert_eq!(
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
            generated.games[0].numbers()
        );
        assert_eq!(
            Some(Shortfall::Capacity {
                requested: 5,
                possible: 1
            }),
            generated.shortfall
        );
    }

    #[test]
    fn capacity_enumerates_every_game() {
        let pool = Pool::from_iter(1..=16);
        let generated = generate(pool, 16, &mut StdRand::default());
        assert_eq!(16, generated.games.len());
        assert_eq!(None, generated.shortfall);
        let distinct = generated.games.iter().collect::<FxHashSet<_>>();
        assert_eq!(16, distinct.len());

        let generated = generate(pool, 100, &mut StdRand::default());
        assert_eq!(16, generated.games.len());
        assert_eq!(
            Some(Shortfall::Capacity {
                requested: 100,
                possible: 16
            }),
            generated.shortfall
        );
    }

    #[test]
    fn sampled_games_distinct_and_within_pool() {
        let pool = Pool::from_iter([1, 2, 3, 4, 5, 7, 9, 11, 13, 14, 16, 18, 20, 21, 23, 24, 25]);
        let generated = generate(pool, 50, &mut Wyrand::seed(42));
        assert_eq!(50, generated.games.len());
        assert_eq!(None, generated.shortfall);
        let distinct = generated.games.iter().collect::<FxHashSet<_>>();
        assert_eq!(50, distinct.len());
        for game in &generated.games {
            assert!(game.numbers().windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(game.pool(), game.pool() & pool);
            assert_eq!(PICKS, game.pool().len());
        }
    }

    #[test]
    fn seeded_runs_reproducible() {
        let pool = Pool::full();
        let first = generate(pool, 20, &mut Wyrand::seed(7));
        let second = generate(pool, 20, &mut Wyrand::seed(7));
        assert_eq!(first, second);
    }

    #[test]
    fn zero_games() {
        let generated = generate(Pool::full(), 0, &mut StdRand::default());
        assert!(generated.games.is_empty());
        assert_eq!(None, generated.shortfall);
    }

    #[test]
    fn display() {
        let game = Game::from_unsorted([25, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(
            "01 02 03 04 05 06 07 08 09 10 11 12 13 14 25",
            game.to_string()
        );
    }
}
