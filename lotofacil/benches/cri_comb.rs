use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Rand, Seeded, Wyrand};

use lotofacil::comb::binomial;
use lotofacil::cooccurrence::{top_combinations, Arity};
use lotofacil::draw::{Draw, DrawHistory, NUMBERS, PICKS};
use lotofacil::pool::Pool;

fn random_history(count: u32) -> DrawHistory {
    let mut rand = Wyrand::seed(42);
    let date = NaiveDate::default();
    let draws = (1..=count)
        .map(|contest| {
            let mut pool = Pool::EMPTY;
            while pool.len() < PICKS {
                pool.insert(rand.next_lim_u64(NUMBERS as u64) as u8 + 1);
            }
            Draw::new(contest, date, pool).unwrap()
        })
        .collect();
    DrawHistory::try_from_draws(draws).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let history = random_history(100);

    // sanity check
    let pairs = top_combinations(&history, Arity::Pair, usize::MAX);
    assert_eq!(
        100 * binomial(PICKS as u64, 2),
        pairs.iter().map(|pair| pair.count).sum::<u64>()
    );

    for arity in [Arity::Pair, Arity::Triplet, Arity::Quad] {
        c.bench_function(&format!("cri_comb_{arity}_100"), |b| {
            b.iter(|| top_combinations(&history, arity, 10));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
