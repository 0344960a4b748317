//! Row sources feeding the profile and risk-matrix cores.
//!
//! The cores never open files themselves. They pull header-keyed records from
//! an already-open [`RowSource`]; the caller owns acquiring and releasing
//! whatever backs it. [`CsvRowSource`] is the file-backed adapter and
//! [`MemoryRowSource`] serves tests and programmatic drivers.
//!
//! # Example
//!
//! ```rust
//! use sqatt::io::{MemoryRowSource, RowSource};
//!
//! let mut rows = MemoryRowSource::new(["Component", "Quadrant"])
//!     .with_row(["ComponentA", "Q1"]);
//!
//! let record = rows.next_record().unwrap().unwrap();
//! assert_eq!(record.get("Quadrant"), Some("Q1"));
//! ```

use crate::errors::{Error, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// One data row, addressable by header name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Value of `column`, or `None` when the header lacks it or the row is short.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// Like [`get`](Self::get) but missing columns are an error.
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| Error::missing_column(column))
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// `(header, value)` pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

/// An already-positioned stream of header-keyed rows.
pub trait RowSource {
    /// Column names, read once when the source was opened.
    fn headers(&self) -> &[String];

    /// Next data row, `None` once the source is exhausted.
    fn next_record(&mut self) -> Option<Result<Record>>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn headers(&self) -> &[String] {
        (**self).headers()
    }

    fn next_record(&mut self) -> Option<Result<Record>> {
        (**self).next_record()
    }
}

/// CSV-backed row source.
///
/// Comma delimited with a mandatory header row. Surrounding whitespace is
/// trimmed from every cell so `Component, Quadrant` reads the same as
/// `Component,Quadrant`.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    headers: Arc<[String]>,
    buffer: csv::StringRecord,
}

impl CsvRowSource<File> {
    /// Open a CSV file. The file is closed when the source is dropped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::file_system("Failed to open row source", path, e))?;
        log::debug!("Reading rows from {}", path.display());
        Self::from_reader(file)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();

        Ok(Self {
            reader,
            headers,
            buffer: csv::StringRecord::new(),
        })
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_record(&mut self) -> Option<Result<Record>> {
        match self.reader.read_record(&mut self.buffer) {
            Ok(true) => {
                let values = self.buffer.iter().map(str::to_string).collect();
                Some(Ok(Record::new(Arc::clone(&self.headers), values)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// In-memory row source.
#[derive(Debug, Clone)]
pub struct MemoryRowSource {
    headers: Arc<[String]>,
    rows: VecDeque<Vec<String>>,
}

impl MemoryRowSource {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
        }
    }

    /// Builder-style row append.
    pub fn with_row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(values);
        self
    }

    pub fn push_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push_back(values.into_iter().map(Into::into).collect());
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemoryRowSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_record(&mut self) -> Option<Result<Record>> {
        self.rows
            .pop_front()
            .map(|values| Ok(Record::new(Arc::clone(&self.headers), values)))
    }
}
