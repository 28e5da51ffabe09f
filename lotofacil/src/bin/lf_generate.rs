use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, Wyrand};
use tracing::{debug, info, warn};

use lotofacil::csv::CsvWriter;
use lotofacil::export;
use lotofacil::file::ReadJsonFile;
use lotofacil::generate::generate;
use lotofacil::print::tabulate_games;
use lotofacil::provider;
use lotofacil::seed;
use lotofacil::strategy::{Strategy, StrategyConfig};

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

    /// number of games to generate
    #[clap(short = 'g', long, default_value = "10")]
    games: usize,

    /// seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,

    /// CSV file to write the games to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.strategies.is_empty() == self.config.is_none() {
            bail!("either the -s or the -c flag must be specified");
        }
        if self.games == 0 {
            bail!("at least one game must be generated");
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
    let config = args.strategy_config()?;

    let pool = config.select(&history);
    info!("pool of {}: {pool}", pool.len());

    let seed = seed::seed_or_clock(args.seed);
    let generated = generate(pool, args.games, &mut Wyrand::seed(seed));
    if let Some(shortfall) = &generated.shortfall {
        warn!("{shortfall}");
    }
    info!("games:\n{}", Console::default().render(&tabulate_games(&generated.games)));

    if let Some(out) = &args.out {
        let mut writer = CsvWriter::create(out)?;
        export::write_games(&mut writer, &generated.games)?;
        info!("wrote {} games to {}", generated.games.len(), out.display());
    }
    Ok(())
}
