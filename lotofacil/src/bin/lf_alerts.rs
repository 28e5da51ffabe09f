use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use lotofacil::alert::{Alert, AlertStatus};
use lotofacil::file::ReadJsonFile;
use lotofacil::print::tabulate_alerts;
use lotofacil::provider;
use lotofacil::store::{MemoryStore, Store};

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

    /// JSON file containing an array of alerts
    #[clap(short = 'a', long)]
    alerts: PathBuf,
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
    debug!("args: {args:?}");

    let history = provider::load(&args.file, args.from, args.to)?;
    info!("loaded {} draws", history.len());

    let mut store = MemoryStore::default();
    for alert in Vec::<Alert>::read_json_file(&args.alerts)? {
        store.save(&alert.name.clone(), alert);
    }
    info!("{} alerts defined", store.len());

    let statuses = store
        .list()
        .into_iter()
        .filter_map(|name| store.load(&name))
        .map(|saved| (saved.value.clone(), saved.value.evaluate(&history)))
        .collect::<Vec<_>>();
    info!("alerts:\n{}", Console::default().render(&tabulate_alerts(&statuses)));

    let triggered = statuses
        .iter()
        .filter(|(_, status)| matches!(status, AlertStatus::Triggered(_)))
        .count();
    info!("{triggered} of {} alerts triggered", statuses.len());
    Ok(())
}
