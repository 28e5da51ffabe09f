use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use chrono::NaiveDate;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use lotofacil::cooccurrence::{top_combinations_within, Arity};
use lotofacil::csv::CsvWriter;
use lotofacil::draw::NUMBERS;
use lotofacil::export;
use lotofacil::print::{
    tabulate_axis, tabulate_combinations, tabulate_delay_distribution, tabulate_frequencies,
    tabulate_heat_map, tabulate_last_digits, tabulate_positions, tabulate_summary,
    tabulate_sums_and_ranges, tabulate_trend,
};
use lotofacil::provider;
use lotofacil::stats;
use lotofacil::stats::{Axis, DrawSummary, TREND_WINDOW};
use lotofacil::timed::Timed;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the draw history from (.json or .csv)
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// earliest contest to consider
    #[clap(long)]
    from: Option<u32>,

    /// latest contest to consider
    #[clap(long)]
    to: Option<u32>,

    /// earliest draw date to consider (yyyy-mm-dd)
    #[clap(long)]
    since: Option<NaiveDate>,

    /// latest draw date to consider (yyyy-mm-dd)
    #[clap(long)]
    until: Option<NaiveDate>,

    /// co-occurrence arity: pair, triplet or quad
    #[clap(short = 'a', long, default_value = "pair")]
    arity: Arity,

    /// number of combinations to list
    #[clap(short = 't', long, default_value = "10")]
    top: usize,

    /// time budget of the co-occurrence analysis, in milliseconds
    #[clap(long, default_value = "10000")]
    budget_ms: u64,

    /// number whose appearance trend to plot
    #[clap(short = 'n', long)]
    number: Option<u8>,

    /// print the sum and range of each draw
    #[clap(short = 'v', long)]
    verbose: bool,

    /// CSV file to write the analysed draws to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(number) = self.number {
            if !(1..=NUMBERS).contains(&number) {
                bail!("number {number} lies outside 1-{NUMBERS}");
            }
        }
        if let (Some(since), Some(until)) = (self.since, self.until) {
            if since > until {
                bail!("--since {since} falls after --until {until}");
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut history = provider::load(&args.file, args.from, args.to)?;
    if args.since.is_some() || args.until.is_some() {
        history = history.dated(
            args.since.unwrap_or(NaiveDate::MIN),
            args.until.unwrap_or(NaiveDate::MAX),
        );
    }
    info!("loaded {} draws", history.len());
    if let Some(out) = &args.out {
        let mut writer = CsvWriter::create(out)?;
        export::write_draws(&mut writer, &history)?;
        info!("wrote {} draws to {}", history.len(), out.display());
    }
    let Some(latest) = history.latest() else {
        warn!("no draws to analyse");
        return Ok(());
    };
    info!(
        "latest draw:\n{}",
        Console::default().render(&tabulate_summary(
            latest.contest,
            latest.numbers(),
            &DrawSummary::from(latest)
        ))
    );

    let frequencies = stats::frequencies(&history);
    let delays = stats::delays(&history);
    info!(
        "frequencies and delays:\n{}",
        Console::default().render(&tabulate_frequencies(&frequencies, &delays))
    );
    info!(
        "heat map:\n{}",
        Console::default().render(&tabulate_heat_map(&stats::heat_map(&history)))
    );
    for axis in [Axis::Row, Axis::Column] {
        info!(
            "{axis:?} totals:\n{}",
            Console::default().render(&tabulate_axis(axis, &stats::axis_frequencies(&history, axis)))
        );
    }
    info!(
        "last digits:\n{}",
        Console::default().render(&tabulate_last_digits(&stats::last_digit_frequencies(&history)))
    );
    info!(
        "delay distribution:\n{}",
        Console::default().render(&tabulate_delay_distribution(&stats::delay_distribution(&history)))
    );
    info!(
        "positions:\n{}",
        Console::default().render(&tabulate_positions(&stats::positional_frequencies(&history)))
    );
    if args.verbose {
        info!(
            "sums and ranges:\n{}",
            Console::default().render(&tabulate_sums_and_ranges(&stats::sums_and_ranges(&history)))
        );
    }

    match top_combinations_within(
        &history,
        args.arity,
        args.top,
        Duration::from_millis(args.budget_ms),
    ) {
        Ok(Timed { value: combinations, elapsed }) => {
            info!(
                "top {} {} combinations (took {elapsed:?}):\n{}",
                args.top,
                args.arity,
                Console::default().render(&tabulate_combinations(&combinations))
            );
        }
        Err(err) => warn!("{err}"),
    }

    if let Some(number) = args.number {
        let trend = stats::trend(&history, number, TREND_WINDOW);
        info!(
            "trend of {number:02}:\n{}",
            Console::default().render(&tabulate_trend(number, &trend))
        );
    }
    Ok(())
}
