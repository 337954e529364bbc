use crate::schema::{domain_table_ddl, quote_ident};
use crate::{Db, StoreError};
use rusqlite::params;
use subp_core::{Record, RecordStore};
use time::macros::format_description;
use time::OffsetDateTime;

impl Db {
    /// Create the per-domain table `name` unless it already exists.
    ///
    /// SQLite matches table names without regard to ASCII case, so a name
    /// that differs only in case from an existing table is rejected rather
    /// than silently sharing it.
    pub fn ensure_table(&self, name: &str) -> Result<(), StoreError> {
        if self.check_table_name(name)? {
            return Ok(());
        }
        self.conn.execute_batch(&domain_table_ddl(name)?)?;
        tracing::debug!(table = name, "created domain table");
        Ok(())
    }

    /// Insert `record` into `table` unless `(host, input)` is already there.
    pub fn insert_record(&self, table: &str, record: &Record) -> Result<bool, StoreError> {
        self.check_table_name(table)?;
        if self.record_exists(table, &record.host, &record.input)? {
            tracing::debug!(table, host = %record.host, "duplicate suppressed");
            return Ok(false);
        }
        let timestamp = now_timestamp()?;
        self.conn.execute(
            &format!("INSERT INTO {} (host, input, sources, timestamp) VALUES (?,?,?,?)", quote_ident(table)?),
            params![record.host, record.input, record.joined_sources(), timestamp],
        )?;
        Ok(true)
    }
}

fn now_timestamp() -> Result<String, StoreError> {
    Ok(OffsetDateTime::now_utc().format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))?)
}

impl RecordStore for Db {
    type Error = StoreError;

    fn ensure_table(&self, name: &str) -> Result<(), StoreError> {
        Db::ensure_table(self, name)
    }

    fn exists(&self, table: &str, host: &str, input: &str) -> Result<bool, StoreError> {
        self.record_exists(table, host, input)
    }

    fn insert(&self, table: &str, record: &Record) -> Result<bool, StoreError> {
        self.insert_record(table, record)
    }
}
