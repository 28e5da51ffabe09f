use super::*;
use crate::scoring::{Tier, TICKET_PRICE};
use crate::stats::Axis;
use crate::strategy::{Delay, Frequency, RowOrColumn};
use crate::testing::{constant_history, history, random_history, LOW_FIFTEEN};
use tinyrand::{Seeded, StdRand, Wyrand};

const HIGH_FIFTEEN: [u8; 15] = [11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25];

fn config(strategies: Vec<Strategy>, games_per_draw: usize, window: usize) -> BacktestConfig {
    BacktestConfig {
        strategies,
        games_per_draw,
        window,
    }
}

fn frequency(top_n: usize) -> Strategy {
    Strategy::Frequency(Frequency { top_n })
}

#[test]
fn insufficient_history() {
    let history = constant_history(5);
    assert_eq!(
        Err(BacktestError::InsufficientHistory {
            required: 6,
            available: 5
        }),
        run(&history, &config(vec![frequency(15)], 1, 5), &mut StdRand::default())
    );
    assert_eq!(
        Err(BacktestError::InsufficientHistory {
            required: 4,
            available: 0
        }),
        run(&[], &config(vec![frequency(15)], 1, 3), &mut StdRand::default())
    );
}

#[test]
fn no_strategies() {
    let history = constant_history(10);
    assert_eq!(
        Err(BacktestError::NoStrategies),
        run(&history, &config(vec![], 1, 5), &mut StdRand::default())
    );
}

#[test]
fn constant_history_hits_jackpot() {
    let history = constant_history(20);
    let result = run(&history, &config(vec![frequency(15)], 1, 5), &mut StdRand::default()).unwrap();
    assert_eq!(5, result.tally.games);
    assert_eq!(TICKET_PRICE * 5, result.tally.cost);
    assert_eq!(Tier::Fifteen.prize() * 5, result.tally.prize);
    assert_eq!([0, 0, 0, 0, 5], result.tally.tiers);
    assert_eq!(0, result.skipped);
    assert_eq!(
        vec![16, 17, 18, 19, 20],
        result.offsets.iter().map(|offset| offset.contest).collect::<Vec<_>>()
    );
    for offset in &result.offsets {
        assert_eq!(15, offset.pool_size);
        assert_eq!(1, offset.games);
        assert_eq!(15, offset.best_hits);
        assert_eq!(Tier::Fifteen.prize(), offset.prize);
    }
    assert_eq!(
        Money::from_units(10_000_000) - Money::from_cents(1_250),
        result.net()
    );
}

#[test]
fn target_excluded_from_context() {
    let history = history(&[&LOW_FIFTEEN, &HIGH_FIFTEEN]);
    let strategies = vec![Strategy::Delay(Delay { top_n: 15 })];
    let result = run(&history, &config(strategies, 3, 1), &mut StdRand::default()).unwrap();
    // the context is the first draw alone, so 16-25 are the most delayed, topped up by 1-5
    assert_eq!(
        vec![OffsetOutcome {
            contest: 2,
            pool_size: 15,
            games: 1,
            best_hits: 10,
            prize: Money::ZERO,
        }],
        result.offsets
    );
    assert_eq!(TICKET_PRICE, result.tally.cost);
    assert_eq!(-250, result.net().cents());
}

#[test]
fn small_pools_skipped() {
    let history = constant_history(10);
    let strategies = vec![Strategy::RowOrColumn(RowOrColumn { axis: Axis::Row })];
    let result = run(&history, &config(strategies, 10, 4), &mut StdRand::default()).unwrap();
    assert_eq!(4, result.skipped);
    assert_eq!(0, result.tally.games);
    assert_eq!(Money::ZERO, result.tally.cost);
    assert_eq!(Money::ZERO, result.net());
    assert_eq!(4, result.offsets.len());
    assert!(result.offsets.iter().all(|offset| offset.pool_size == 5 && offset.games == 0));
}

#[test]
fn seeded_runs_identical() {
    let history = random_history(20, 99);
    let config = config(vec![frequency(20)], 10, 5);
    let first = run(&history, &config, &mut Wyrand::seed(42)).unwrap();
    let second = run(&history, &config, &mut Wyrand::seed(42)).unwrap();
    assert_eq!(first, second);
    assert_eq!(50, first.tally.games);
    assert_eq!(
        first.tally.prize,
        first.offsets.iter().map(|offset| offset.prize).sum::<Money>()
    );
}

#[test]
fn compare_by_net() {
    let history = constant_history(20);
    let rows = vec![Strategy::RowOrColumn(RowOrColumn { axis: Axis::Row })];
    let comparison = compare(&history, &[frequency(15)], &rows, 1, 5, &mut StdRand::default()).unwrap();
    assert_eq!(Verdict::A, comparison.verdict());

    let comparison = compare(&history, &rows, &[frequency(15)], 1, 5, &mut StdRand::default()).unwrap();
    assert_eq!(Verdict::B, comparison.verdict());

    let comparison = compare(
        &history,
        &[frequency(15)],
        &[frequency(15)],
        1,
        5,
        &mut StdRand::default(),
    )
    .unwrap();
    assert_eq!(Verdict::Tie, comparison.verdict());
}

#[test]
fn compare_propagates_errors() {
    let history = constant_history(3);
    assert_eq!(
        Err(BacktestError::InsufficientHistory {
            required: 6,
            available: 3
        }),
        compare(&history, &[frequency(15)], &[frequency(15)], 1, 5, &mut StdRand::default())
    );
}
