//! Sources of historical draws. The analyses only ever see a materialised [DrawHistory]; providers
//! are how one is obtained.
//!
//! Two file formats are understood: the JSON dump of the public results API (an array of objects
//! with `concurso`, `data` as `dd/mm/yyyy` and `dezenas` as zero-padded strings), and a flat CSV
//! of `contest,date,n1..n15`.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::csv::CsvReader;
use crate::draw::{Draw, DrawHistory, InvalidHistory, PICKS};
use crate::file;

/// How long a [CachedProvider] serves a fetched history before fetching again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3_600);

const API_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum UpstreamUnavailable {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed source: {0}")]
    Malformed(String),

    #[error("{0}")]
    InvalidHistory(#[from] InvalidHistory),

    #[error("unsupported source format '{0}'")]
    UnsupportedFormat(String),
}

pub trait DrawProvider {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable>;

    fn fetch_range(&self, min: u32, max: u32) -> Result<DrawHistory, UpstreamUnavailable> {
        Ok(self.fetch_all()?.between(min, max))
    }

    fn fetch_latest(&self) -> Result<Option<Draw>, UpstreamUnavailable> {
        Ok(self.fetch_all()?.latest().cloned())
    }
}

impl<P: DrawProvider + ?Sized> DrawProvider for Box<P> {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable> {
        (**self).fetch_all()
    }
}

/// Fetches every draw, degrading a failure to an empty history. The failure is logged and
/// returned alongside.
pub fn fetch_or_empty(
    provider: &impl DrawProvider,
) -> (DrawHistory, Option<UpstreamUnavailable>) {
    match provider.fetch_all() {
        Ok(history) => (history, None),
        Err(err) => {
            error!("draw history unavailable: {err}");
            (DrawHistory::default(), Some(err))
        }
    }
}

/// Chooses a file provider by the extension of `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Box<dyn DrawProvider>, UpstreamUnavailable> {
    let path = path.as_ref().to_path_buf();
    match file::extension(&path).as_deref() {
        Some("json") => Ok(Box::new(JsonFileProvider::new(path))),
        Some("csv") => Ok(Box::new(CsvFileProvider::new(path))),
        _ => Err(UpstreamUnavailable::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

/// Reads the draws in `path` whose contests fall within the optional `from`/`to` bounds.
pub fn load(
    path: impl AsRef<Path>,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<DrawHistory, UpstreamUnavailable> {
    let provider = open(path)?;
    match (from, to) {
        (None, None) => provider.fetch_all(),
        (from, to) => provider.fetch_range(from.unwrap_or(1), to.unwrap_or(u32::MAX)),
    }
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    concurso: u32,
    data: String,
    dezenas: Vec<ApiNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiNumber {
    Text(String),
    Number(u8),
}
impl ApiNumber {
    fn parse(&self) -> Result<u8, UpstreamUnavailable> {
        match self {
            ApiNumber::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| UpstreamUnavailable::Malformed(format!("'{text}' is not a number"))),
            ApiNumber::Number(number) => Ok(*number),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, UpstreamUnavailable> {
    NaiveDate::parse_from_str(s, API_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, ISO_DATE_FORMAT))
        .map_err(|err| UpstreamUnavailable::Malformed(format!("invalid date '{s}': {err}")))
}

#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}
impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DrawProvider for JsonFileProvider {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable> {
        let file = File::open(&self.path)?;
        let results: Vec<ApiResult> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| UpstreamUnavailable::Malformed(err.to_string()))?;
        let draws = results
            .iter()
            .map(|result| {
                let date = parse_date(&result.data)?;
                let numbers = result
                    .dezenas
                    .iter()
                    .map(ApiNumber::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Draw::new(result.concurso, date, numbers).map_err(InvalidHistory::from)?)
            })
            .collect::<Result<Vec<_>, UpstreamUnavailable>>()?;
        debug!("read {} draws from {}", draws.len(), self.path.display());
        Ok(DrawHistory::try_from_draws(draws)?)
    }
}

#[derive(Debug, Clone)]
pub struct CsvFileProvider {
    path: PathBuf,
}
impl CsvFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DrawProvider for CsvFileProvider {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable> {
        let mut draws = vec![];
        let mut reader = CsvReader::open(&self.path)?;
        let mut first = true;
        while let Some(record) = reader.read() {
            let record = record?;
            let line = reader.line();
            if std::mem::take(&mut first) && record[0].eq_ignore_ascii_case("contest") {
                continue;
            }
            if record.len() != PICKS + 2 {
                return Err(UpstreamUnavailable::Malformed(format!(
                    "line {line} has {} fields, expected {}",
                    record.len(),
                    PICKS + 2
                )));
            }
            let contest = record[0].parse().map_err(|_| {
                UpstreamUnavailable::Malformed(format!(
                    "line {line}: invalid contest '{}'",
                    &record[0]
                ))
            })?;
            let date = parse_date(&record[1])?;
            let numbers = record
                .iter()
                .skip(2)
                .map(|field| {
                    field.parse::<u8>().map_err(|_| {
                        UpstreamUnavailable::Malformed(format!("'{field}' is not a number"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            draws.push(Draw::new(contest, date, numbers).map_err(InvalidHistory::from)?);
        }
        debug!("read {} draws from {}", draws.len(), self.path.display());
        Ok(DrawHistory::try_from_draws(draws)?)
    }
}

/// Serves the history fetched from an inner provider until `ttl` elapses. Failures are not cached.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    cache: Mutex<Option<(Instant, DrawHistory)>>,
}
impl<P: DrawProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn invalidate(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<P: DrawProvider> DrawProvider for CachedProvider<P> {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((fetched_at, history)) = &*cache {
            if fetched_at.elapsed() < self.ttl {
                return Ok(history.clone());
            }
        }
        let history = self.inner.fetch_all()?;
        *cache = Some((Instant::now(), history.clone()));
        Ok(history)
    }
}

#[cfg(test)]
mod tests;
