//! Turn a plain list of hostnames into a JSON array of records that the
//! ingestor can load.

use std::path::Path;
use subp_core::{Error, Record, Result, ADMIN_SOURCE};

/// One record per line of `content`, all stamped with `input_domain` and the
/// admin source. Blank lines are kept as empty hosts.
pub fn records_from_list(content: &str, input_domain: &str) -> Vec<Record> {
    content
        .lines()
        .map(|host| Record::new(host, input_domain, vec![ADMIN_SOURCE.to_string()]))
        .collect()
}

/// Read the list at `list_path` and write the records to `out_path` as a
/// single JSON array. Returns the number of records written.
pub fn convert_list(list_path: &Path, out_path: &Path, input_domain: &str) -> Result<usize> {
    let content = std::fs::read_to_string(list_path).map_err(|e| Error::io(list_path, e))?;
    let records = records_from_list(&content, input_domain);
    let json = serde_json::to_vec(&records)
        .map_err(|source| Error::Encode { path: out_path.to_path_buf(), source })?;
    std::fs::write(out_path, json).map_err(|e| Error::io(out_path, e))?;
    tracing::debug!(list = %list_path.display(), out = %out_path.display(), records = records.len(), "converted subdomain list");
    Ok(records.len())
}
