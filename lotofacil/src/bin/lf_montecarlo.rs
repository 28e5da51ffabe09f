use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::EnumCount;
use tinyrand::{Seeded, Wyrand};
use tracing::{debug, info, warn};

use lotofacil::csv::CsvWriter;
use lotofacil::export;
use lotofacil::mc::{expected_net, simulate, HitRates, McConfig};
use lotofacil::print::tabulate_distribution;
use lotofacil::scoring::Tier;
use lotofacil::seed;
use lotofacil::timed::Timed;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// number of independent trials
    #[clap(short = 'n', long, default_value = "1000")]
    simulations: usize,

    /// games played in each trial
    #[clap(short = 'g', long, default_value = "50")]
    games: usize,

    /// comma-separated probabilities of 11..15 hits
    #[clap(short = 'r', long)]
    rates: Option<String>,

    /// seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,

    /// CSV file to write the net result of every trial to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.simulations == 0 {
            bail!("at least one simulation must be run");
        }
        if self.games == 0 {
            bail!("at least one game must be played per simulation");
        }
        Ok(())
    }

    fn hit_rates(&self) -> anyhow::Result<HitRates> {
        match &self.rates {
            None => Ok(HitRates::illustrative()),
            Some(rates) => parse_rates(rates),
        }
    }
}

fn parse_rates(s: &str) -> anyhow::Result<HitRates> {
    let values = s
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|err| anyhow!("invalid rate '{value}': {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let rates: [f64; Tier::COUNT] = values
        .try_into()
        .map_err(|values: Vec<f64>| anyhow!("expected {} rates, got {}", Tier::COUNT, values.len()))?;
    Ok(HitRates::new(rates)?)
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

    let rates = args.hit_rates()?;
    if args.rates.is_none() {
        warn!("using illustrative hit rates; these are not the true odds");
    }
    info!("hit rates: {rates:?}, expected prize per game: {:.4}", rates.expected_prize());

    let config = McConfig {
        simulations: args.simulations,
        games_per_simulation: args.games,
    };
    let seed = seed::seed_or_clock(args.seed);
    let Timed { value: distribution, elapsed } =
        Timed::measure(|| simulate(&rates, &config, &mut Wyrand::seed(seed)));
    info!("{} simulations took {elapsed:?}", args.simulations);

    let expected = expected_net(&rates, args.games);
    info!(
        "distribution:\n{}",
        Console::default().render(&tabulate_distribution(&distribution, expected))
    );

    if let Some(out) = &args.out {
        let mut writer = CsvWriter::create(out)?;
        export::write_trials(&mut writer, &distribution)?;
        info!("wrote {} trials to {}", distribution.nets.len(), out.display());
    }
    Ok(())
}
