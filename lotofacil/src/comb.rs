//! Combinatorics.

/// The binomial coefficient `C(n, k)`, the number of `k`-element subsets of an `n`-element set.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = u64::min(k, n - k);
    let mut product = 1u128;
    for i in 0..k {
        product = product * (n - i) as u128 / (i + 1) as u128;
    }
    product as u64
}

/// Seeds `ordinals` with the first `k`-combination `[0, 1, .., k - 1]`.
pub fn first(ordinals: &mut [usize]) {
    for (index, ordinal) in ordinals.iter_mut().enumerate() {
        *ordinal = index;
    }
}

/// Advances `ordinals`, a strictly ascending selection of indexes into an `items`-element set, to
/// the next combination in lexicographic order. Returns `false` once the last combination has been
/// passed, leaving `ordinals` unspecified.
pub fn advance(ordinals: &mut [usize], items: usize) -> bool {
    let k = ordinals.len();
    let mut index = k;
    while index > 0 {
        index -= 1;
        if ordinals[index] < items - k + index {
            ordinals[index] += 1;
            for next in index + 1..k {
                ordinals[next] = ordinals[next - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Enumerates the `k`-combinations of `items` indexes in lexicographic order.
pub struct Combinator {
    items: usize,
    k: usize,
}
impl Combinator {
    pub fn new(items: usize, k: usize) -> Self {
        Self { items, k }
    }

    pub fn count(&self) -> u64 {
        binomial(self.items as u64, self.k as u64)
    }
}

impl IntoIterator for Combinator {
    type Item = Vec<usize>;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        let mut ordinals = vec![0; self.k];
        first(&mut ordinals);
        Self::IntoIter {
            remaining: self.k <= self.items,
            items: self.items,
            ordinals,
        }
    }
}

pub struct Iter {
    items: usize,
    ordinals: Vec<usize>,
    remaining: bool,
}
impl Iterator for Iter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining {
            let current = self.ordinals.clone();
            self.remaining = advance(&mut self.ordinals, self.items);
            Some(current)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(1, binomial(0, 0));
        assert_eq!(0, binomial(3, 4));
        assert_eq!(1, binomial(15, 15));
        assert_eq!(16, binomial(16, 15));
        assert_eq!(105, binomial(15, 2));
        assert_eq!(455, binomial(15, 3));
        assert_eq!(1_365, binomial(15, 4));
        assert_eq!(3_268_760, binomial(25, 15));
    }

    #[test]
    fn test_advance() {
        let mut ordinals = [0; 2];
        first(&mut ordinals);
        let mut outputs = vec![ordinals.to_vec()];
        while advance(&mut ordinals, 4) {
            outputs.push(ordinals.to_vec());
        }
        let expected_outputs = vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]
            .iter()
            .map(|array| array.to_vec())
            .collect::<Vec<_>>();
        assert_eq!(expected_outputs, outputs);
    }

    #[test]
    fn iterator() {
        let combinator = Combinator::new(5, 3);
        assert_eq!(10, combinator.count());
        let outputs = combinator.into_iter().collect::<Vec<_>>();
        let expected_outputs = vec![
            [0, 1, 2],
            [0, 1, 3],
            [0, 1, 4],
            [0, 2, 3],
            [0, 2, 4],
            [0, 3, 4],
            [1, 2, 3],
            [1, 2, 4],
            [1, 3, 4],
            [2, 3, 4],
        ]
        .iter()
        .map(|array| array.to_vec())
        .collect::<Vec<_>>();
        assert_eq!(expected_outputs, outputs);
    }

    #[test]
    fn iterator_counts_match_binomial() {
        for (items, k) in [(15, 2), (15, 4), (6, 6), (6, 0)] {
            let combinator = Combinator::new(items, k);
            let expected = combinator.count();
            assert_eq!(expected, combinator.into_iter().count() as u64, "C({items}, {k})");
        }
    }

    #[test]
    fn iterator_k_exceeds_items() {
        assert_eq!(0, Combinator::new(3, 4).into_iter().count());
    }
}
