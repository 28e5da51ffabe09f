use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, Wyrand};
use tracing::{debug, info};

use lotofacil::backtest::compare;
use lotofacil::print::tabulate_comparison;
use lotofacil::provider;
use lotofacil::seed;
use lotofacil::strategy::Strategy;

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

    /// strategy of set A; may be repeated
    #[clap(short = 'a', long = "a")]
    a: Vec<Strategy>,

    /// strategy of set B; may be repeated
    #[clap(short = 'b', long = "b")]
    b: Vec<Strategy>,

    /// number of most recent draws to replay
    #[clap(short = 'w', long, default_value = "50")]
    window: usize,

    /// games generated for each replayed draw
    #[clap(short = 'g', long, default_value = "10")]
    games: usize,

    /// seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.a.is_empty() || self.b.is_empty() {
            bail!("both -a and -b must name at least one strategy");
        }
        if self.window == 0 {
            bail!("the window must span at least one draw");
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

    let history = provider::load(&args.file, args.from, args.to)?;
    info!("loaded {} draws", history.len());
    info!("A: {}", describe(&args.a));
    info!("B: {}", describe(&args.b));

    let seed = seed::seed_or_clock(args.seed);
    let comparison = compare(
        &history,
        &args.a,
        &args.b,
        args.games,
        args.window,
        &mut Wyrand::seed(seed),
    )?;
    info!("comparison:\n{}", Console::default().render(&tabulate_comparison(&comparison)));
    info!("{}", comparison.verdict());
    Ok(())
}

fn describe(strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
