use crate::Record;

/// Keyed storage with a `(host, input)` uniqueness guarantee per table.
///
/// The check-then-insert sequence is not atomic; implementations are driven
/// by a single thread of control.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create `name` if it does not exist yet. Safe to call repeatedly.
    fn ensure_table(&self, name: &str) -> Result<(), Self::Error>;

    fn exists(&self, table: &str, host: &str, input: &str) -> Result<bool, Self::Error>;

    /// Insert `record` unless its `(host, input)` pair is already present.
    /// Returns `false` when the record was suppressed as a duplicate.
    fn insert(&self, table: &str, record: &Record) -> Result<bool, Self::Error>;
}
