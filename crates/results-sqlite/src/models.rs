use serde::{Deserialize, Serialize};

pub type RowId = i64;

/// A row as stored in a per-domain table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRow {
    pub id: RowId,
    pub host: Option<String>,
    pub input: Option<String>,
    pub sources: Option<String>,
    pub timestamp: Option<String>,
}

/// A domain table and its row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: i64,
}
