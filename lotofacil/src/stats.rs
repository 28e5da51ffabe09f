//! Descriptive statistics over a table of draws: frequencies, delays, last-digit buckets, the 5×5
//! card grid, positional frequencies, sums and ranges, and per-number trends.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::draw::{Draw, NUMBERS, PICKS};
use crate::pool::Pool;

/// Width (and height) of the card grid.
pub const GRID: usize = 5;

/// Window of the moving average used by [trend].
pub const TREND_WINDOW: usize = 20;

/// A value for every number, indexed by the number itself (`1..=25`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerNumber<T>([T; NUMBERS as usize]);

impl<T: Copy + Default> Default for PerNumber<T> {
    fn default() -> Self {
        Self([T::default(); NUMBERS as usize])
    }
}

impl<T: Copy> PerNumber<T> {
    /// `(number, value)` pairs in ascending order of number.
    pub fn iter(&self) -> impl Iterator<Item = (u8, T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, &value)| (index as u8 + 1, value))
    }
}

impl<T> Index<u8> for PerNumber<T> {
    type Output = T;

    fn index(&self, number: u8) -> &Self::Output {
        &self.0[number as usize - 1]
    }
}

impl<T> IndexMut<u8> for PerNumber<T> {
    fn index_mut(&mut self, number: u8) -> &mut Self::Output {
        &mut self.0[number as usize - 1]
    }
}

pub type Frequencies = PerNumber<u32>;

/// For each number, the count of consecutive most-recent draws in which it did not appear.
pub type DelayTable = PerNumber<u32>;

pub fn frequencies(draws: &[Draw]) -> Frequencies {
    let mut frequencies = Frequencies::default();
    for draw in draws {
        for &number in draw.numbers() {
            frequencies[number] += 1;
        }
    }
    frequencies
}

/// Scans the draws from oldest to newest, incrementing every absent number's counter and resetting
/// the counter of every drawn number.
pub fn delays(draws: &[Draw]) -> DelayTable {
    let mut delays = DelayTable::default();
    for draw in draws {
        for number in 1..=NUMBERS {
            if draw.contains(number) {
                delays[number] = 0;
            } else {
                delays[number] += 1;
            }
        }
    }
    delays
}

/// Occurrences of each last decimal digit (`0..=9`) across every drawn number.
pub fn last_digit_frequencies(draws: &[Draw]) -> [u32; 10] {
    let mut buckets = [0; 10];
    for draw in draws {
        for &number in draw.numbers() {
            buckets[(number % 10) as usize] += 1;
        }
    }
    buckets
}

/// Orders `(key, count)` entries by descending count, breaking ties by ascending key, and keeps the
/// first `top_n` keys.
pub fn rank_descending<K: Ord + Copy>(
    entries: impl IntoIterator<Item = (K, u32)>,
    top_n: usize,
) -> Vec<K> {
    let mut entries = entries.into_iter().collect::<Vec<_>>();
    entries.sort_by(|(a_key, a_count), (b_key, b_count)| {
        b_count.cmp(a_count).then_with(|| a_key.cmp(b_key))
    });
    entries.into_iter().take(top_n).map(|(key, _)| key).collect()
}

/// The numbers `1..=25` laid out on a 5×5 card, five to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}
impl Axis {
    /// One-based row or column of `number`.
    #[inline]
    pub fn index_of(self, number: u8) -> usize {
        let offset = (number - 1) as usize;
        match self {
            Axis::Row => offset / GRID + 1,
            Axis::Column => offset % GRID + 1,
        }
    }

    /// The five numbers on the one-based row or column `index`.
    pub fn members(self, index: usize) -> Pool {
        (1..=NUMBERS)
            .filter(|&number| self.index_of(number) == index)
            .collect()
    }
}

/// Total frequency of the numbers on each row (or column); element 0 is row (column) 1.
pub fn axis_frequencies(draws: &[Draw], axis: Axis) -> [u32; GRID] {
    let mut totals = [0; GRID];
    for (number, frequency) in frequencies(draws).iter() {
        totals[axis.index_of(number) - 1] += frequency;
    }
    totals
}

/// Frequencies arranged on the card: `heat_map[row][column]`, both zero-based.
pub fn heat_map(draws: &[Draw]) -> [[u32; GRID]; GRID] {
    let mut grid = [[0; GRID]; GRID];
    for (number, frequency) in frequencies(draws).iter() {
        grid[Axis::Row.index_of(number) - 1][Axis::Column.index_of(number) - 1] = frequency;
    }
    grid
}

/// How many numbers currently sit at each delay value.
pub fn delay_distribution(draws: &[Draw]) -> BTreeMap<u32, usize> {
    let mut distribution = BTreeMap::new();
    for (_, delay) in delays(draws).iter() {
        *distribution.entry(delay).or_insert(0) += 1;
    }
    distribution
}

/// Frequencies of each number at each sorted position; element 0 is the smallest number of each
/// draw.
pub fn positional_frequencies(draws: &[Draw]) -> Vec<Frequencies> {
    let mut positions = vec![Frequencies::default(); PICKS];
    for draw in draws {
        for (position, &number) in draw.numbers().iter().enumerate() {
            positions[position][number] += 1;
        }
    }
    positions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SumRange {
    pub contest: u32,
    pub sum: u32,
    pub range: u8,
}

pub fn sums_and_ranges(draws: &[Draw]) -> Vec<SumRange> {
    draws
        .iter()
        .map(|draw| {
            let summary = DrawSummary::from(draw);
            SumRange {
                contest: draw.contest,
                sum: summary.sum,
                range: summary.max - summary.min,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub contest: u32,
    pub appeared: bool,
    pub moving_average: Option<f64>,
}

/// Whether `number` appeared in each draw, with a trailing moving average of appearances that is
/// undefined until `window` draws have been seen.
pub fn trend(draws: &[Draw], number: u8, window: usize) -> Vec<TrendPoint> {
    let flags = draws
        .iter()
        .map(|draw| draw.contains(number))
        .collect::<Vec<_>>();
    let mut in_window = 0;
    flags
        .iter()
        .enumerate()
        .map(|(index, &appeared)| {
            in_window += appeared as usize;
            if index >= window {
                in_window -= flags[index - window] as usize;
            }
            let moving_average =
                (window > 0 && index + 1 >= window).then(|| in_window as f64 / window as f64);
            TrendPoint {
                contest: draws[index].contest,
                appeared,
                moving_average,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawSummary {
    pub sum: u32,
    pub min: u8,
    pub max: u8,
    pub evens: usize,
    pub odds: usize,
}

impl From<&Draw> for DrawSummary {
    fn from(draw: &Draw) -> Self {
        let numbers = draw.numbers();
        let evens = numbers.iter().filter(|&&number| number % 2 == 0).count();
        Self {
            sum: numbers.iter().map(|&number| number as u32).sum(),
            min: numbers[0],
            max: numbers[PICKS - 1],
            evens,
            odds: PICKS - evens,
        }
    }
}
