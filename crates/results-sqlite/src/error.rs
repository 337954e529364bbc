use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid table name {0:?}: contains NUL")]
    InvalidTableName(String),
    #[error("table name {requested:?} collides with existing table {existing:?} (names are case-insensitive)")]
    TableNameCollision { requested: String, existing: String },
    #[error("no such table: {0:?}")]
    NoSuchTable(String),
    #[error("timestamp formatting: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
