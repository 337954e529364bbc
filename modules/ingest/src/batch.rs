use crate::{IngestReport, Ingestor};
use std::path::{Path, PathBuf};
use subp_core::{Error, RecordStore, Result};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: &[&str] = &["json"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<PathBuf>,
    pub records: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

impl BatchReport {
    fn add(&mut self, path: PathBuf, report: &IngestReport) {
        self.files.push(path);
        self.records += report.records;
        self.inserted += report.inserted;
        self.duplicates += report.duplicates;
    }
}

/// Drives an [`Ingestor`] over every matching file directly inside a
/// directory, in file-name order. The first failing file stops the batch.
pub struct BatchRunner<'a, S: RecordStore> {
    ingestor: Ingestor<'a, S>,
    extensions: Vec<String>,
}

impl<'a, S: RecordStore> BatchRunner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        BatchRunner {
            ingestor: Ingestor::new(store),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the recognized extensions (without the leading dot).
    pub fn with_extensions<I, T>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `path` carries a recognized extension. A bare dotfile such
    /// as `.json` counts as having the extension `json`.
    pub fn matches(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).or_else(|| {
            path.file_name().and_then(|n| n.to_str()).and_then(|n| n.strip_prefix('.'))
        });
        match ext {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }

    /// Matching regular files in `dir`, sorted by name. No recursion.
    pub fn collect_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::io(dir, e.into()))?;
            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Ingest every matching file in `dir`. `progress` is called after each
    /// file that completed.
    pub fn run<F>(&self, dir: &Path, mut progress: F) -> Result<BatchReport>
    where
        F: FnMut(&Path, &IngestReport),
    {
        let mut batch = BatchReport::default();
        for path in self.collect_files(dir)? {
            let report = self.ingestor.ingest_file(&path)?;
            tracing::info!(file = %path.display(), records = report.records, inserted = report.inserted, "processed file");
            progress(&path, &report);
            batch.add(path, &report);
        }
        Ok(batch)
    }
}
