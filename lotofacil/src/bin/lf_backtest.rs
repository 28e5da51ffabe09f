use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, Wyrand};
use tracing::{debug, info};

use lotofacil::backtest::{run, BacktestConfig};
use lotofacil::csv::CsvWriter;
use lotofacil::export;
use lotofacil::file::ReadJsonFile;
use lotofacil::print::{tabulate_offsets, tabulate_tally};
use lotofacil::provider;
use lotofacil::seed;
use lotofacil::strategy::{Strategy, StrategyConfig};
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

    /// strategy, e.g. frequency:20 or alpha:15:10; may be repeated
    #[clap(short = 's', long = "strategy")]
    strategies: Vec<Strategy>,

    /// JSON file containing a strategy configuration
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// number of most recent draws to replay
    #[clap(short = 'w', long, default_value = "50")]
    window: usize,

    /// games generated for each replayed draw
    #[clap(short = 'g', long, default_value = "10")]
    games: usize,

    /// seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,

    /// print the outcome of every replayed draw
    #[clap(short = 'v', long)]
    verbose: bool,

    /// CSV file to write the per-draw outcomes to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,

    /// CSV file to write the prize tier counts to
    #[clap(long)]
    tiers_out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.strategies.is_empty() == self.config.is_none() {
            bail!("either the -s or the -c flag must be specified");
        }
        if self.window == 0 {
            bail!("the window must span at least one draw");
        }
        Ok(())
    }

    fn strategy_config(&self) -> anyhow::Result<StrategyConfig> {
        match &self.config {
            Some(path) => Ok(StrategyConfig::read_json_file(path)?),
            None => Ok(StrategyConfig::from(self.strategies.clone())),
        }
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

    let history = provider::load(&args.file, args.from, args.to)?;
    info!("loaded {} draws", history.len());
    let strategies = args.strategy_config()?.strategies;
    info!(
        "backtesting [{}] over the last {} draws, {} games each",
        strategies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        args.window,
        args.games
    );

    let config = BacktestConfig {
        strategies,
        games_per_draw: args.games,
        window: args.window,
    };
    let seed = seed::seed_or_clock(args.seed);
    let Timed { value: result, elapsed } =
        Timed::result(|| run(&history, &config, &mut Wyrand::seed(seed)))?;
    info!("backtest took {elapsed:?}");

    if args.verbose {
        info!("offsets:\n{}", Console::default().render(&tabulate_offsets(&result.offsets)));
    }
    info!("results:\n{}", Console::default().render(&tabulate_tally(&result.tally)));
    if result.skipped > 0 {
        info!("{} of {} draws skipped for want of a 15-number pool", result.skipped, args.window);
    }

    if let Some(out) = &args.out {
        let mut writer = CsvWriter::create(out)?;
        export::write_offsets(&mut writer, &result)?;
        info!("wrote offsets to {}", out.display());
    }
    if let Some(out) = &args.tiers_out {
        let mut writer = CsvWriter::create(out)?;
        export::write_tiers(&mut writer, &result)?;
        info!("wrote tiers to {}", out.display());
    }
    Ok(())
}
