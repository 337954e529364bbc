use serde::{Deserialize, Serialize};

/// Source label stamped on records generated from a plain subdomain list.
pub const ADMIN_SOURCE: &str = "Admin";

/// Separator used when `sources` is flattened into a single column.
pub const SOURCES_SEPARATOR: &str = ",";

/// One host observation. `input` is the domain the host was found for and
/// names the destination table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Record {
    pub fn new(host: impl Into<String>, input: impl Into<String>, sources: Vec<String>) -> Self {
        Record { host: host.into(), input: input.into(), sources }
    }

    /// Destination table for this record.
    pub fn table(&self) -> &str {
        &self.input
    }

    pub fn joined_sources(&self) -> String {
        self.sources.join(SOURCES_SEPARATOR)
    }
}
