//! Parse record files and route every record into its domain table.
//!
//! A file is either one JSON array of records or newline-delimited JSON with
//! one record per line. The array form is tried first.

mod batch;

pub use batch::{BatchReport, BatchRunner, DEFAULT_EXTENSIONS};

use std::path::Path;
use subp_core::{Error, Record, RecordStore, Result};

/// Shape a file was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Array,
    Lines,
    /// Nothing but whitespace, or a bare `null`.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub format: Format,
    pub records: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

impl IngestReport {
    fn new(format: Format) -> Self {
        IngestReport { format, records: 0, inserted: 0, duplicates: 0 }
    }
}

pub struct Ingestor<'a, S: RecordStore> {
    store: &'a S,
}

impl<'a, S: RecordStore> Ingestor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Ingestor { store }
    }

    /// Read `path` and ingest its records.
    pub fn ingest_file(&self, path: &Path) -> Result<IngestReport> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.ingest_str(path, &content)
    }

    /// Ingest already-loaded `content`; `path` is only used in errors.
    ///
    /// A top-level `null` counts as an empty array.
    ///
    /// In line mode records are stored as they are parsed, so a bad line
    /// leaves the lines before it committed.
    pub fn ingest_str(&self, path: &Path, content: &str) -> Result<IngestReport> {
        if let Ok(array) = serde_json::from_str::<Option<Vec<Record>>>(content) {
            let Some(records) = array else { return Ok(IngestReport::new(Format::Empty)) };
            let mut report = IngestReport::new(Format::Array);
            for record in &records {
                self.route(record, &mut report)?;
            }
            return Ok(report);
        }

        let mut report = IngestReport::new(Format::Empty);
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(line)
                .map_err(|source| Error::Parse { path: path.to_path_buf(), line: Some(idx + 1), source })?;
            report.format = Format::Lines;
            self.route(&record, &mut report)?;
        }
        Ok(report)
    }

    fn route(&self, record: &Record, report: &mut IngestReport) -> Result<()> {
        let table = record.table();
        self.store.ensure_table(table).map_err(|e| Error::storage(table, e))?;
        let inserted = self.store.insert(table, record).map_err(|e| Error::storage(table, e))?;
        tracing::debug!(table, host = %record.host, inserted, "routed record");
        report.records += 1;
        if inserted { report.inserted += 1 } else { report.duplicates += 1 }
        Ok(())
    }
}
