use crate::StoreError;

/// Quote `name` as an SQL identifier. Embedded double quotes are doubled;
/// NUL cannot be represented and is rejected.
pub fn quote_ident(name: &str) -> Result<String, StoreError> {
    if name.contains('\0') {
        return Err(StoreError::InvalidTableName(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// DDL for one per-domain table.
pub(crate) fn domain_table_ddl(name: &str) -> Result<String, StoreError> {
    Ok(format!(
        r#"CREATE TABLE IF NOT EXISTS {} (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  host            TEXT,
  input           TEXT,
  sources         TEXT,
  timestamp       DATETIME,
  UNIQUE (host, input)
)"#,
        quote_ident(name)?
    ))
}
