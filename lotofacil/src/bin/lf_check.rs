use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use lotofacil::print::tabulate_check;
use lotofacil::provider;
use lotofacil::ticket::{check, Ticket};

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

    /// the 15 numbers of the ticket, separated by commas or spaces
    #[clap(short = 't', long)]
    ticket: String,

    /// contest to check against; the latest if omitted
    #[clap(short = 'c', long)]
    contest: Option<u32>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<Ticket> {
        Ok(self.ticket.parse::<Ticket>()?)
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
    let ticket = args.validate()?;
    debug!("args: {args:?}");

    let history = provider::load(&args.file, args.from, args.to)?;
    let draw = match args.contest {
        Some(contest) => history
            .find(contest)
            .ok_or_else(|| anyhow!("contest {contest} not found"))?,
        None => history.latest().ok_or_else(|| anyhow!("no draws loaded"))?,
    };
    info!("ticket: {}", ticket.game());

    let check = check(&ticket, draw);
    info!("check:\n{}", Console::default().render(&tabulate_check(&check)));
    if check.is_winner() {
        info!("winning ticket: {} hits pay {}", check.hits.len(), check.prize);
    } else {
        info!("no prize with {} hits", check.hits.len());
    }
    Ok(())
}
