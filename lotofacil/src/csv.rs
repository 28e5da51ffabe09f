//! Utilities for working with CSV files.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::ops::Index;
use std::path::Path;

pub struct CsvWriter<W: Write> {
    writer: W,
}
impl CsvWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut first = true;
        for datum in record.into_iter() {
            if first {
                first = false;
            } else {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(datum.as_ref().as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads comma-separated records, one per line, trimming each field. Blank lines are skipped.
pub struct CsvReader<R: BufRead> {
    lines: Lines<R>,
    line: usize,
}
impl CsvReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// One-based number of the line last read, counting blank lines.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn read(&mut self) -> Option<Result<Record, io::Error>> {
        loop {
            let next = self.lines.next()?;
            self.line += 1;
            match next {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok(Record::with_values(line.split(',').map(str::trim)))),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<Record, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    items: Vec<Cow<'static, str>>,
}
impl Record {
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let items = values
            .into_iter()
            .map(|value| Cow::Owned(value.to_string()))
            .collect();
        Self { items }
    }

    pub fn push(&mut self, value: impl ToString) {
        self.items.push(Cow::Owned(value.to_string()));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(AsRef::as_ref)
    }
}

impl From<&[&'static str]> for Record {
    fn from(headers: &[&'static str]) -> Self {
        Self {
            items: headers.iter().map(|&header| Cow::Borrowed(header)).collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = Cow<'static, str>;
    type IntoIter = std::vec::IntoIter<Cow<'static, str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Index<usize> for Record {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
