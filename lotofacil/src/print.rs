//! Console tables for the binaries.

use std::collections::BTreeMap;

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};
use strum::IntoEnumIterator;

use crate::alert::{Alert, AlertStatus};
use crate::backtest::{Comparison, OffsetOutcome};
use crate::cooccurrence::Combination;
use crate::display::{DisplayCombination, DisplayNumbers};
use crate::generate::Game;
use crate::mc::Distribution;
use crate::scoring::{Tally, Tier};
use crate::stats::{Axis, DelayTable, DrawSummary, Frequencies, SumRange, TrendPoint, GRID};
use crate::ticket::Check;

fn left(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(Left))
}

fn right(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Right))
}

fn header(cells: Vec<Cell>) -> Row {
    Row::new(Styles::default().with(Header(true)), cells)
}

fn row(cells: Vec<Cell>) -> Row {
    Row::new(Styles::default(), cells)
}

pub fn tabulate_games(games: &[Game]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(5), left(44)])
        .with_row(header(vec!["Game".into(), "Numbers".into()]));
    for (index, game) in games.iter().enumerate() {
        table.push_row(row(vec![
            format!("{}", index + 1).into(),
            game.to_string().into(),
        ]));
    }
    table
}

pub fn tabulate_tally(tally: &Tally) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(10), right(10), right(14)])
        .with_row(header(vec!["Hits".into(), "Count".into(), "Prize".into()]));
    for tier in Tier::iter() {
        let count = tally.count(tier);
        table.push_row(row(vec![
            format!("{}", tier.hits()).into(),
            format!("{count}").into(),
            format!("{}", tier.prize() * count).into(),
        ]));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec!["Games".into(), format!("{}", tally.games).into(), "".into()],
    ));
    for (label, amount) in [
        ("Cost", tally.cost),
        ("Prize", tally.prize),
        ("Net", tally.net()),
    ] {
        table.push_row(row(vec![label.into(), "".into(), format!("{amount}").into()]));
    }
    table
}

pub fn tabulate_offsets(offsets: &[OffsetOutcome]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(8), right(6), right(6), right(6), right(12)])
        .with_row(header(vec![
            "Contest".into(),
            "Pool".into(),
            "Games".into(),
            "Best".into(),
            "Prize".into(),
        ]));
    for offset in offsets {
        table.push_row(row(vec![
            format!("{}", offset.contest).into(),
            format!("{}", offset.pool_size).into(),
            format!("{}", offset.games).into(),
            format!("{}", offset.best_hits).into(),
            format!("{}", offset.prize).into(),
        ]));
    }
    table
}

pub fn tabulate_comparison(comparison: &Comparison) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(10), right(14), right(14)])
        .with_row(header(vec!["".into(), "A".into(), "B".into()]));
    let (a, b) = (&comparison.a.tally, &comparison.b.tally);
    for tier in Tier::iter() {
        table.push_row(row(vec![
            format!("{} hits", tier.hits()).into(),
            format!("{}", a.count(tier)).into(),
            format!("{}", b.count(tier)).into(),
        ]));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Games".into(),
            format!("{}", a.games).into(),
            format!("{}", b.games).into(),
        ],
    ));
    table.push_row(row(vec![
        "Skipped".into(),
        format!("{}", comparison.a.skipped).into(),
        format!("{}", comparison.b.skipped).into(),
    ]));
    table.push_row(row(vec![
        "Net".into(),
        format!("{}", a.net()).into(),
        format!("{}", b.net()).into(),
    ]));
    table
}

pub fn tabulate_combinations(combinations: &[Combination]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(14), right(8)])
        .with_row(header(vec!["Combination".into(), "Count".into()]));
    for combination in combinations {
        table.push_row(row(vec![
            format!("{}", DisplayCombination::from(&combination.members[..])).into(),
            format!("{}", combination.count).into(),
        ]));
    }
    table
}

pub fn tabulate_frequencies(frequencies: &Frequencies, delays: &DelayTable) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(6), right(10), right(6)])
        .with_row(header(vec![
            "Number".into(),
            "Frequency".into(),
            "Delay".into(),
        ]));
    for (number, frequency) in frequencies.iter() {
        table.push_row(row(vec![
            format!("{number:02}").into(),
            format!("{frequency}").into(),
            format!("{}", delays[number]).into(),
        ]));
    }
    table
}

/// Frequencies laid out on the card, one row of the table per row of the card.
pub fn tabulate_heat_map(grid: &[[u32; GRID]; GRID]) -> Table {
    let mut table = Table::default().with_cols({
        let mut cols = vec![left(6)];
        cols.extend((0..GRID).map(|_| right(6)));
        cols
    });
    table.push_row(header({
        let mut cells = vec!["".into()];
        cells.extend((1..=GRID).map(|column| format!("C{column}").into()));
        cells
    }));
    for (index, frequencies) in grid.iter().enumerate() {
        let mut cells = vec![format!("R{}", index + 1).into()];
        cells.extend(frequencies.iter().map(|frequency| format!("{frequency}").into()));
        table.push_row(row(cells));
    }
    table
}

pub fn tabulate_last_digits(buckets: &[u32; 10]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(6), right(10)])
        .with_row(header(vec!["Digit".into(), "Count".into()]));
    for (digit, count) in buckets.iter().enumerate() {
        table.push_row(row(vec![format!("{digit}").into(), format!("{count}").into()]));
    }
    table
}

pub fn tabulate_sums_and_ranges(sums: &[SumRange]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(8), right(6), right(6)])
        .with_row(header(vec!["Contest".into(), "Sum".into(), "Range".into()]));
    for sum in sums {
        table.push_row(row(vec![
            format!("{}", sum.contest).into(),
            format!("{}", sum.sum).into(),
            format!("{}", sum.range).into(),
        ]));
    }
    table
}

pub fn tabulate_summary(contest: u32, numbers: &[u8], summary: &DrawSummary) -> Table {
    Table::default()
        .with_cols(vec![left(10), left(44)])
        .with_row(row(vec!["Contest".into(), format!("{contest}").into()]))
        .with_row(row(vec![
            "Numbers".into(),
            format!("{}", DisplayNumbers::from(numbers)).into(),
        ]))
        .with_row(row(vec!["Sum".into(), format!("{}", summary.sum).into()]))
        .with_row(row(vec![
            "Min/max".into(),
            format!("{:02}/{:02}", summary.min, summary.max).into(),
        ]))
        .with_row(row(vec![
            "Even/odd".into(),
            format!("{}/{}", summary.evens, summary.odds).into(),
        ]))
}

/// The 5th, 50th and 95th percentiles, the mean and the probability of profit.
pub fn tabulate_distribution(distribution: &Distribution, expected: f64) -> Table {
    let format = |value: Option<f64>| {
        value
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "-".into())
    };
    Table::default()
        .with_cols(vec![left(16), right(14)])
        .with_row(row(vec![
            "Trials".into(),
            format!("{}", distribution.nets.len()).into(),
        ]))
        .with_row(row(vec!["P5".into(), format(distribution.percentile(0.05)).into()]))
        .with_row(row(vec!["Median".into(), format(distribution.median()).into()]))
        .with_row(row(vec!["P95".into(), format(distribution.percentile(0.95)).into()]))
        .with_row(row(vec!["Mean".into(), format(distribution.mean()).into()]))
        .with_row(row(vec!["Expected".into(), format!("{expected:.2}").into()]))
        .with_row(row(vec![
            "P(profit)".into(),
            distribution
                .prob_profit()
                .map(|prob| format!("{:.2}%", prob * 100.0))
                .unwrap_or_else(|| "-".into())
                .into(),
        ]))
}

pub fn tabulate_check(check: &Check) -> Table {
    Table::default()
        .with_cols(vec![left(10), left(44)])
        .with_row(row(vec!["Contest".into(), format!("{}", check.contest).into()]))
        .with_row(row(vec![
            "Hits".into(),
            format!("{} ({})", check.hits.len(), DisplayNumbers::from(&check.hits[..])).into(),
        ]))
        .with_row(row(vec!["Prize".into(), format!("{}", check.prize).into()]))
}

pub fn tabulate_alerts(alerts: &[(Alert, AlertStatus)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(16), left(10), left(40)])
        .with_row(header(vec!["Alert".into(), "Status".into(), "Detail".into()]));
    for (alert, status) in alerts {
        let (status, detail) = match status {
            AlertStatus::Triggered(message) => ("triggered", message.as_str()),
            AlertStatus::Quiet => ("quiet", ""),
            AlertStatus::NoData => ("no data", ""),
        };
        table.push_row(row(vec![
            alert.name.clone().into(),
            status.into(),
            detail.to_string().into(),
        ]));
    }
    table
}

/// Row or column totals, one table row per line of the card.
pub fn tabulate_axis(axis: Axis, totals: &[u32; GRID]) -> Table {
    let label = match axis {
        Axis::Row => "Row",
        Axis::Column => "Column",
    };
    let mut table = Table::default()
        .with_cols(vec![left(8), left(20), right(10)])
        .with_row(header(vec![label.into(), "Numbers".into(), "Frequency".into()]));
    for (index, total) in totals.iter().enumerate() {
        let members = axis.members(index + 1).to_vec();
        table.push_row(row(vec![
            format!("{}", index + 1).into(),
            format!("{}", DisplayNumbers::from(&members[..])).into(),
            format!("{total}").into(),
        ]));
    }
    table
}

pub fn tabulate_delay_distribution(distribution: &BTreeMap<u32, usize>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(6), right(8)])
        .with_row(header(vec!["Delay".into(), "Numbers".into()]));
    for (delay, numbers) in distribution {
        table.push_row(row(vec![format!("{delay}").into(), format!("{numbers}").into()]));
    }
    table
}

/// For each sorted position, the number seen there most often and its count.
pub fn tabulate_positions(positions: &[Frequencies]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(8), right(8), right(8)])
        .with_row(header(vec!["Position".into(), "Mode".into(), "Count".into()]));
    for (index, frequencies) in positions.iter().enumerate() {
        let (number, count) = frequencies.iter().fold((0, 0), |best, (number, count)| {
            if count > best.1 {
                (number, count)
            } else {
                best
            }
        });
        let mode = if count == 0 {
            "-".to_string()
        } else {
            format!("{number:02}")
        };
        table.push_row(row(vec![
            format!("{}", index + 1).into(),
            mode.into(),
            format!("{count}").into(),
        ]));
    }
    table
}

pub fn tabulate_trend(number: u8, trend: &[TrendPoint]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![right(8), left(6), right(10)])
        .with_row(header(vec![
            "Contest".into(),
            format!("{number:02}").into(),
            "Average".into(),
        ]));
    for point in trend {
        table.push_row(row(vec![
            format!("{}", point.contest).into(),
            (if point.appeared { "x" } else { "" }).into(),
            point
                .moving_average
                .map(|average| format!("{average:.2}"))
                .unwrap_or_else(|| "-".into())
                .into(),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Money;
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    #[test]
    fn tally_table() {
        let mut tally = Tally::default();
        tally.record(11);
        tally.record(3);
        let rendered = Console::default().render(&tabulate_tally(&tally)).to_string();
        assert!(rendered.contains("10.00"), "{rendered}");
        assert!(rendered.contains("Net"), "{rendered}");
        assert!(rendered.contains("5.00"), "{rendered}");
    }

    #[test]
    fn distribution_table() {
        let distribution = Distribution {
            nets: vec![Money::from_units(-10), Money::from_units(20)],
        };
        let rendered = Console::default()
            .render(&tabulate_distribution(&distribution, -2.5))
            .to_string();
        assert!(rendered.contains("50.00%"), "{rendered}");
        assert!(rendered.contains("-2.50"), "{rendered}");
    }

    #[test]
    fn positions_table_shows_mode() {
        let mut first = Frequencies::default();
        first[1] = 3;
        first[2] = 5;
        let rendered = Console::default()
            .render(&tabulate_positions(&[first, Frequencies::default()]))
            .to_string();
        assert!(rendered.contains("02"), "{rendered}");
        assert!(rendered.contains("-"), "{rendered}");
    }
}
