//! Hit counting, the prize table and money arithmetic.

use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter};

use crate::draw::Draw;
use crate::generate::Game;
use crate::pool::Pool;

/// A currency amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);
impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    #[inline]
    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Self::Output {
        Money(self.0 * rhs as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Every game costs 2.50.
pub const TICKET_PRICE: Money = Money::from_cents(250);

/// The prize-bearing hit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter, Serialize, Deserialize)]
pub enum Tier {
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
}
impl Tier {
    pub const MIN_HITS: u8 = 11;

    #[inline]
    pub fn hits(self) -> u8 {
        Self::MIN_HITS + self.ordinal() as u8
    }

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn prize(self) -> Money {
        match self {
            Tier::Eleven => Money::from_units(10),
            Tier::Twelve => Money::from_units(25),
            Tier::Thirteen => Money::from_units(100),
            Tier::Fourteen => Money::from_units(2_000),
            Tier::Fifteen => Money::from_units(2_000_000),
        }
    }

    pub fn from_hits(hits: u8) -> Option<Tier> {
        Tier::iter().find(|tier| tier.hits() == hits)
    }
}

/// The prize for a game with `hits` numbers matched; nothing below 11.
pub fn prize_for(hits: u8) -> Money {
    Tier::from_hits(hits).map(Tier::prize).unwrap_or(Money::ZERO)
}

/// Size of the intersection of two sets of numbers.
#[inline]
pub fn hits(a: Pool, b: Pool) -> u8 {
    (a & b).len() as u8
}

#[inline]
pub fn score(game: &Game, draw: &Draw) -> u8 {
    hits(game.pool(), draw.pool())
}

/// Running totals over a sequence of scored games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub games: u64,
    pub cost: Money,
    pub prize: Money,
    pub tiers: [u64; Tier::COUNT],
}
impl Tally {
    /// Records a single game that matched `hits` numbers.
    pub fn record(&mut self, hits: u8) {
        self.games += 1;
        self.cost += TICKET_PRICE;
        if let Some(tier) = Tier::from_hits(hits) {
            self.tiers[tier.ordinal()] += 1;
            self.prize += tier.prize();
        }
    }

    pub fn count(&self, tier: Tier) -> u64 {
        self.tiers[tier.ordinal()]
    }

    #[inline]
    pub fn net(&self) -> Money {
        self.prize - self.cost
    }
}
