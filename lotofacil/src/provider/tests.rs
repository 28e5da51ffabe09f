use super::*;
use std::env;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::csv::CsvWriter;
use crate::export::write_draws;
use crate::testing::{constant_history, random_history};

const API_DUMP: &str = r#"[
    {
        "loteria": "lotofacil",
        "concurso": 2,
        "data": "03/01/2024",
        "dezenas": ["25", "24", "23", "22", "21", "20", "19", "18", "17", "16", "15", "14", "13", "12", "11"]
    },
    {
        "loteria": "lotofacil",
        "concurso": 1,
        "data": "01/01/2024",
        "dezenas": ["01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15"]
    }
]"#;

const CSV_DUMP: &str = "contest,date,n1,n2,n3,n4,n5,n6,n7,n8,n9,n10,n11,n12,n13,n14,n15
1,2024-01-01,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15
2,03/01/2024,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25
";

/// A file in the temp directory, removed on drop.
struct TempFile(PathBuf);
impl TempFile {
    fn new(name: &str, contents: &str) -> Self {
        let path = env::temp_dir().join(format!("lotofacil-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        Self(path)
    }
}
impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn assert_two_draws(history: &DrawHistory) {
    assert_eq!(
        vec![1, 2],
        history.iter().map(|draw| draw.contest).collect::<Vec<_>>()
    );
    assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), history[1].date);
    assert_eq!(
        &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25],
        history[1].numbers()
    );
}

#[test]
fn json_api_dump() {
    let file = TempFile::new("api.json", API_DUMP);
    let history = JsonFileProvider::new(&file.0).fetch_all().unwrap();
    assert_two_draws(&history);
}

#[test]
fn csv_dump() {
    let file = TempFile::new("draws.csv", CSV_DUMP);
    let history = CsvFileProvider::new(&file.0).fetch_all().unwrap();
    assert_two_draws(&history);
    assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), history[0].date);
}

#[test]
fn csv_errors_name_the_line() {
    let file = TempFile::new(
        "blank-lines.csv",
        "contest,date,n1,n2,n3,n4,n5,n6,n7,n8,n9,n10,n11,n12,n13,n14,n15\n\n1,2024-01-01,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15\n2,2024-01-02,1,2\n",
    );
    let err = CsvFileProvider::new(&file.0).fetch_all().unwrap_err();
    assert_eq!("malformed source: line 4 has 4 fields, expected 17", err.to_string());
}

#[test]
fn exported_draws_read_back() {
    let history = random_history(20, 9);
    let file = TempFile::new("exported.csv", "");
    let mut writer = CsvWriter::create(&file.0).unwrap();
    write_draws(&mut writer, &history).unwrap();
    drop(writer);
    assert_eq!(history, CsvFileProvider::new(&file.0).fetch_all().unwrap());
}

#[test]
fn open_by_extension() {
    let file = TempFile::new("by-extension.csv", CSV_DUMP);
    let provider = open(&file.0).unwrap();
    let range = provider.fetch_range(2, 5).unwrap();
    assert_eq!(1, range.len());
    assert_eq!(2, provider.fetch_latest().unwrap().unwrap().contest);

    assert!(matches!(
        open("draws.xlsx"),
        Err(UpstreamUnavailable::UnsupportedFormat(_))
    ));
}

#[test]
fn load_bounded() {
    let file = TempFile::new("load.json", API_DUMP);
    assert_eq!(2, load(&file.0, None, None).unwrap().len());
    assert_eq!(1, load(&file.0, None, Some(1)).unwrap().len());
    assert_eq!(2, load(&file.0, Some(2), None).unwrap()[0].contest);
    assert!(load(&file.0, Some(3), Some(9)).unwrap().is_empty());
}

#[test]
fn malformed_sources() {
    let file = TempFile::new("malformed.json", "{\"not\": \"an array\"}");
    assert!(matches!(
        JsonFileProvider::new(&file.0).fetch_all(),
        Err(UpstreamUnavailable::Malformed(_))
    ));

    let file = TempFile::new("short.csv", "1,2024-01-01,1,2,3\n");
    assert!(matches!(
        CsvFileProvider::new(&file.0).fetch_all(),
        Err(UpstreamUnavailable::Malformed(_))
    ));

    let file = TempFile::new(
        "invalid.csv",
        "1,2024-01-01,1,1,3,4,5,6,7,8,9,10,11,12,13,14,15\n",
    );
    assert!(matches!(
        CsvFileProvider::new(&file.0).fetch_all(),
        Err(UpstreamUnavailable::InvalidHistory(_))
    ));

    assert!(matches!(
        CsvFileProvider::new("/nonexistent/draws.csv").fetch_all(),
        Err(UpstreamUnavailable::Io(_))
    ));
}

#[test]
fn duplicate_contests_rejected() {
    let file = TempFile::new(
        "duplicate.csv",
        "1,2024-01-01,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15\n1,2024-01-02,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15\n",
    );
    assert!(matches!(
        CsvFileProvider::new(&file.0).fetch_all(),
        Err(UpstreamUnavailable::InvalidHistory(InvalidHistory::DuplicateContest(1)))
    ));
}

#[test]
fn fetch_or_empty_degrades() {
    let (history, err) = fetch_or_empty(&JsonFileProvider::new("/nonexistent/draws.json"));
    assert!(history.is_empty());
    assert!(err.is_some());
}

struct CountingProvider {
    fetches: AtomicUsize,
}
impl DrawProvider for CountingProvider {
    fn fetch_all(&self) -> Result<DrawHistory, UpstreamUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(constant_history(3))
    }
}

fn counting() -> CountingProvider {
    CountingProvider {
        fetches: AtomicUsize::new(0),
    }
}

#[test]
fn cache_serves_within_ttl() {
    let provider = CachedProvider::new(counting());
    assert_eq!(3, provider.fetch_all().unwrap().len());
    assert_eq!(2, provider.fetch_range(2, 3).unwrap().len());
    assert_eq!(1, provider.inner.fetches.load(Ordering::SeqCst));

    provider.invalidate();
    provider.fetch_all().unwrap();
    assert_eq!(2, provider.inner.fetches.load(Ordering::SeqCst));
}

#[test]
fn cache_expires() {
    let provider = CachedProvider::with_ttl(counting(), Duration::ZERO);
    provider.fetch_all().unwrap();
    provider.fetch_all().unwrap();
    assert_eq!(2, provider.inner.fetches.load(Ordering::SeqCst));
}
