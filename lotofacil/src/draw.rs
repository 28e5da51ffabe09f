//! Historical draws and the [DrawHistory] table that every analysis reads.

use std::ops::Deref;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::pool::Pool;

/// Numbers are drawn from `1..=NUMBERS`.
pub const NUMBERS: u8 = 25;

/// Count of numbers in a draw, and in a game.
pub const PICKS: usize = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidDraw {
    #[error("contest numbers start at 1")]
    ZeroContest,

    #[error("contest {contest}: expected 15 numbers, got {count}")]
    WrongCount { contest: u32, count: usize },

    #[error("contest {contest}: number {number} outside 1-25")]
    OutOfRange { contest: u32, number: u8 },

    #[error("contest {contest}: number {number} drawn twice")]
    Duplicate { contest: u32, number: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    pub contest: u32,
    pub date: NaiveDate,
    numbers: [u8; PICKS],
    #[serde(skip)]
    pool: Pool,
}
impl Draw {
    pub fn new(
        contest: u32,
        date: NaiveDate,
        numbers: impl IntoIterator<Item = u8>,
    ) -> Result<Self, InvalidDraw> {
        if contest == 0 {
            return Err(InvalidDraw::ZeroContest);
        }
        let numbers = numbers.into_iter().collect::<Vec<_>>();
        if numbers.len() != PICKS {
            return Err(InvalidDraw::WrongCount {
                contest,
                count: numbers.len(),
            });
        }
        let mut pool = Pool::EMPTY;
        for &number in &numbers {
            if !(1..=NUMBERS).contains(&number) {
                return Err(InvalidDraw::OutOfRange { contest, number });
            }
            if pool.contains(number) {
                return Err(InvalidDraw::Duplicate { contest, number });
            }
            pool.insert(number);
        }

        let mut sorted = [0; PICKS];
        for (slot, number) in sorted.iter_mut().zip(pool.iter()) {
            *slot = number;
        }
        Ok(Self {
            contest,
            date,
            numbers: sorted,
            pool,
        })
    }

    /// The drawn numbers in ascending order.
    #[inline]
    pub fn numbers(&self) -> &[u8; PICKS] {
        &self.numbers
    }

    #[inline]
    pub fn pool(&self) -> Pool {
        self.pool
    }

    #[inline]
    pub fn contains(&self, number: u8) -> bool {
        self.pool.contains(number)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidHistory {
    #[error("contest {0} appears more than once")]
    DuplicateContest(u32),

    #[error("{0}")]
    InvalidDraw(#[from] InvalidDraw),
}

/// Draws ordered by ascending contest number. Gaps between contests are permitted; duplicates are
/// not. Once built, a history is never mutated; narrower views are obtained by slicing (it derefs
/// to `[Draw]`) or by [DrawHistory::between], which copies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    draws: Vec<Draw>,
}
impl DrawHistory {
    pub fn try_from_draws(mut draws: Vec<Draw>) -> Result<Self, InvalidHistory> {
        draws.sort_by_key(|draw| draw.contest);
        for pair in draws.windows(2) {
            if pair[0].contest == pair[1].contest {
                return Err(InvalidHistory::DuplicateContest(pair[0].contest));
            }
        }
        Ok(Self { draws })
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn latest(&self) -> Option<&Draw> {
        self.draws.last()
    }

    pub fn find(&self, contest: u32) -> Option<&Draw> {
        self.draws
            .binary_search_by_key(&contest, |draw| draw.contest)
            .ok()
            .map(|index| &self.draws[index])
    }

    /// A copy restricted to contests in `min..=max`.
    pub fn between(&self, min: u32, max: u32) -> DrawHistory {
        let draws = self
            .draws
            .iter()
            .filter(|draw| (min..=max).contains(&draw.contest))
            .cloned()
            .collect();
        Self { draws }
    }

    /// A copy restricted to draws dated within `from..=to`.
    pub fn dated(&self, from: NaiveDate, to: NaiveDate) -> DrawHistory {
        let draws = self
            .draws
            .iter()
            .filter(|draw| (from..=to).contains(&draw.date))
            .cloned()
            .collect();
        Self { draws }
    }
}

impl Deref for DrawHistory {
    type Target = [Draw];

    fn deref(&self) -> &Self::Target {
        &self.draws
    }
}
