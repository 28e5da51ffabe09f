//! Fixtures shared by the unit tests.

use chrono::NaiveDate;
use tinyrand::{Rand, Seeded, Wyrand};

use crate::draw::{Draw, DrawHistory, NUMBERS, PICKS};
use crate::pool::Pool;

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn draw(contest: u32, numbers: &[u8]) -> Draw {
    Draw::new(contest, date(), numbers.iter().copied()).unwrap()
}

/// A history whose contests are numbered from 1 in the order given.
pub fn history(draws: &[&[u8]]) -> DrawHistory {
    DrawHistory::try_from_draws(
        draws
            .iter()
            .enumerate()
            .map(|(index, numbers)| draw(index as u32 + 1, numbers))
            .collect(),
    )
    .unwrap()
}

/// `count` draws that all contain exactly `1..=15`.
pub fn constant_history(count: u32) -> DrawHistory {
    DrawHistory::try_from_draws((1..=count).map(|contest| draw(contest, &LOW_FIFTEEN)).collect())
        .unwrap()
}

/// `count` uniformly random draws, reproducible for a given `seed`.
pub fn random_history(count: u32, seed: u64) -> DrawHistory {
    let mut rand = Wyrand::seed(seed);
    let draws = (1..=count)
        .map(|contest| {
            let mut pool = Pool::EMPTY;
            while pool.len() < PICKS {
                pool.insert(rand.next_lim_u64(NUMBERS as u64) as u8 + 1);
            }
            Draw::new(contest, date(), pool).unwrap()
        })
        .collect();
    DrawHistory::try_from_draws(draws).unwrap()
}

pub const LOW_FIFTEEN: [u8; PICKS] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
