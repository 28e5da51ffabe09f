//! Flat CSV tables of generated games, backtest results and simulated outcomes.

use std::io;
use std::io::Write;

use strum::IntoEnumIterator;

use crate::backtest::BacktestResult;
use crate::csv::{CsvWriter, Record};
use crate::draw::{Draw, PICKS};
use crate::generate::Game;
use crate::mc::Distribution;
use crate::scoring::Tier;

pub fn draw_headers() -> Record {
    let mut headers = Record::from(&["contest", "date"][..]);
    for position in 1..=PICKS {
        headers.push(format!("n{position}"));
    }
    headers
}

/// One row per draw, in the layout read back by [crate::provider::CsvFileProvider]. Dates are
/// written as `yyyy-mm-dd`.
pub fn write_draws<W: Write>(writer: &mut CsvWriter<W>, draws: &[Draw]) -> Result<(), io::Error> {
    writer.append(draw_headers())?;
    for draw in draws {
        let mut record = Record::with_values([draw.contest.to_string(), draw.date.to_string()]);
        for number in draw.numbers() {
            record.push(number);
        }
        writer.append(record)?;
    }
    writer.flush()
}

pub fn game_headers() -> Record {
    let mut headers = Record::from(&["game"][..]);
    for position in 1..=PICKS {
        headers.push(format!("n{position}"));
    }
    headers
}

/// One row per game: its one-based ordinal and its numbers in ascending order.
pub fn write_games<W: Write>(writer: &mut CsvWriter<W>, games: &[Game]) -> Result<(), io::Error> {
    writer.append(game_headers())?;
    for (index, game) in games.iter().enumerate() {
        let mut record = Record::with_values([index + 1]);
        for number in game.numbers() {
            record.push(number);
        }
        writer.append(record)?;
    }
    writer.flush()
}

pub const OFFSET_HEADERS: [&str; 5] = ["contest", "pool_size", "games", "best_hits", "prize"];

pub const TIER_HEADERS: [&str; 2] = ["hits", "count"];

/// The per-offset trace of a backtest.
pub fn write_offsets<W: Write>(
    writer: &mut CsvWriter<W>,
    result: &BacktestResult,
) -> Result<(), io::Error> {
    writer.append(OFFSET_HEADERS)?;
    for offset in &result.offsets {
        writer.append(Record::with_values([
            offset.contest.to_string(),
            offset.pool_size.to_string(),
            offset.games.to_string(),
            offset.best_hits.to_string(),
            offset.prize.to_string(),
        ]))?;
    }
    writer.flush()
}

/// How many games of a backtest hit each prize tier.
pub fn write_tiers<W: Write>(
    writer: &mut CsvWriter<W>,
    result: &BacktestResult,
) -> Result<(), io::Error> {
    writer.append(TIER_HEADERS)?;
    for tier in Tier::iter() {
        writer.append(Record::with_values([
            u64::from(tier.hits()),
            result.tally.count(tier),
        ]))?;
    }
    writer.flush()
}

pub const TRIAL_HEADERS: [&str; 2] = ["trial", "net"];

pub fn write_trials<W: Write>(
    writer: &mut CsvWriter<W>,
    distribution: &Distribution,
) -> Result<(), io::Error> {
    writer.append(TRIAL_HEADERS)?;
    for (index, net) in distribution.nets.iter().enumerate() {
        writer.append(Record::with_values([(index + 1).to_string(), net.to_string()]))?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::OffsetOutcome;
    use crate::scoring::{Money, Tally};
    use chrono::NaiveDate;

    fn written(f: impl FnOnce(&mut CsvWriter<Vec<u8>>) -> Result<(), io::Error>) -> String {
        let mut writer = CsvWriter::new(vec![]);
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn games() {
        let game = Game::from_unsorted([25, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
        let csv = written(|writer| write_games(writer, &[game]));
        assert_eq!(
            "game,n1,n2,n3,n4,n5,n6,n7,n8,n9,n10,n11,n12,n13,n14,n15\n1,1,2,3,4,5,6,7,8,9,10,11,12,13,14,25\n",
            csv
        );
    }

    #[test]
    fn draws() {
        let draw = Draw::new(
            12,
            NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
            [25, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
        )
        .unwrap();
        assert_eq!(
            "contest,date,n1,n2,n3,n4,n5,n6,n7,n8,n9,n10,n11,n12,n13,n14,n15\n12,2024-02-09,1,2,3,4,5,6,7,8,9,10,11,12,13,14,25\n",
            written(|writer| write_draws(writer, &[draw]))
        );
    }

    #[test]
    fn backtest() {
        let mut tally = Tally::default();
        tally.record(11);
        tally.record(2);
        let result = BacktestResult {
            tally,
            skipped: 1,
            offsets: vec![
                OffsetOutcome {
                    contest: 10,
                    pool_size: 18,
                    games: 2,
                    best_hits: 11,
                    prize: Money::from_units(10),
                },
                OffsetOutcome {
                    contest: 11,
                    pool_size: 12,
                    games: 0,
                    best_hits: 0,
                    prize: Money::ZERO,
                },
            ],
        };
        assert_eq!(
            "contest,pool_size,games,best_hits,prize\n10,18,2,11,10.00\n11,12,0,0,0.00\n",
            written(|writer| write_offsets(writer, &result))
        );
        assert_eq!(
            "hits,count\n11,1\n12,0\n13,0\n14,0\n15,0\n",
            written(|writer| write_tiers(writer, &result))
        );
    }

    #[test]
    fn trials() {
        let distribution = Distribution {
            nets: vec![Money::from_cents(-12_500), Money::from_cents(750)],
        };
        assert_eq!(
            "trial,net\n1,-125.00\n2,7.50\n",
            written(|writer| write_trials(writer, &distribution))
        );
    }
}
