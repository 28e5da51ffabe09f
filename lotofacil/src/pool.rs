//! A [Pool] is a set of candidate numbers in the range `1..=25`, held as a bitmap.

use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::display::DisplayNumbers;
use crate::draw::NUMBERS;

const FULL_MASK: u32 = ((1 << (NUMBERS as u32 + 1)) - 1) & !1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pool(u32);

impl Pool {
    pub const EMPTY: Pool = Pool(0);

    /// Every number from 1 to 25.
    pub fn full() -> Self {
        Self(FULL_MASK)
    }

    #[inline]
    pub fn insert(&mut self, number: u8) {
        debug_assert!(
            (1..=NUMBERS).contains(&number),
            "number {number} out of range"
        );
        self.0 |= 1 << number;
    }

    #[inline]
    pub fn contains(&self, number: u8) -> bool {
        number <= NUMBERS && self.0 & (1 << number) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: Pool) -> Pool {
        Pool(self.0 | other.0)
    }

    #[inline]
    pub fn intersection(self, other: Pool) -> Pool {
        Pool(self.0 & other.0)
    }

    /// Retains only the first `limit` numbers in ascending order.
    pub fn first(self, limit: usize) -> Pool {
        self.iter().take(limit).collect()
    }

    pub fn iter(&self) -> Iter {
        Iter { remaining: self.0 }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

/// Folds any number of pools into their union.
pub fn union_all(pools: impl IntoIterator<Item = Pool>) -> Pool {
    pools.into_iter().fold(Pool::EMPTY, Pool::union)
}

/// Ascending iterator over the members of a [Pool].
pub struct Iter {
    remaining: u32,
}

impl Iterator for Iter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let number = self.remaining.trailing_zeros() as u8;
            self.remaining &= self.remaining - 1;
            Some(number)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for Pool {
    type Item = u8;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<u8> for Pool {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut pool = Pool::EMPTY;
        pool.extend(iter);
        pool
    }
}

impl Extend<u8> for Pool {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        for number in iter {
            self.insert(number);
        }
    }
}

impl BitOr for Pool {
    type Output = Pool;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for Pool {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for Pool {
    type Output = Pool;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl Display for Pool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DisplayNumbers::from(&*self.to_vec()))
    }
}
