use crate::schema::quote_ident;
use crate::{Db, HostRow, StoreError, TableSummary};
use rusqlite::{params, OptionalExtension};

impl Db {
    pub fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let cnt: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |r| r.get(0),
        )?;
        Ok(cnt > 0)
    }

    /// Existing table whose name equals `name` ignoring ASCII case.
    pub fn find_table_nocase(&self, name: &str) -> Result<Option<String>, StoreError> {
        let found = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=? COLLATE NOCASE LIMIT 1",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        Ok(found)
    }

    /// `Ok(true)` if `name` exists exactly, `Ok(false)` if no table matches,
    /// and an error if only a case variant of it exists.
    pub(crate) fn check_table_name(&self, name: &str) -> Result<bool, StoreError> {
        match self.find_table_nocase(name)? {
            None => Ok(false),
            Some(existing) if existing == name => Ok(true),
            Some(existing) => Err(StoreError::TableNameCollision { requested: name.to_string(), existing }),
        }
    }

    pub fn record_exists(&self, table: &str, host: &str, input: &str) -> Result<bool, StoreError> {
        let hit: Option<i64> = self
            .conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE host=? AND input=? LIMIT 1", quote_ident(table)?),
                params![host, input],
                |r| r.get(0),
            )
            .optional()?;
        Ok(hit.is_some())
    }

    /// User tables in name order; SQLite's internal tables are left out.
    pub fn domain_tables(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' ORDER BY name",
        )?;
        let names = stmt.query_map([], |r| r.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    pub fn count_rows(&self, table: &str) -> Result<i64, StoreError> {
        self.require_table(table)?;
        let n = self.conn.query_row(&format!("SELECT COUNT(1) FROM {}", quote_ident(table)?), [], |r| r.get(0))?;
        Ok(n)
    }

    pub fn rows(&self, table: &str) -> Result<Vec<HostRow>, StoreError> {
        self.require_table(table)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, host, input, sources, timestamp FROM {} ORDER BY id",
            quote_ident(table)?
        ))?;
        let rows = stmt
            .query_map([], |r| {
                Ok(HostRow { id: r.get(0)?, host: r.get(1)?, input: r.get(2)?, sources: r.get(3)?, timestamp: r.get(4)? })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn summaries(&self) -> Result<Vec<TableSummary>, StoreError> {
        self.domain_tables()?
            .into_iter()
            .map(|name| -> Result<TableSummary, StoreError> { Ok(TableSummary { rows: self.count_rows(&name)?, name }) })
            .collect()
    }

    pub(crate) fn require_table(&self, table: &str) -> Result<(), StoreError> {
        if self.table_exists(table)? { Ok(()) } else { Err(StoreError::NoSuchTable(table.to_string())) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subp_core::Record;

    #[test]
    fn internal_tables_are_not_listed() {
        let db = Db::open_in_memory().unwrap();
        db.ensure_table("b.com").unwrap();
        db.ensure_table("a.com").unwrap();
        // AUTOINCREMENT creates sqlite_sequence on first insert
        db.insert_record("a.com", &Record::new("h", "a.com", vec![])).unwrap();
        assert_eq!(db.domain_tables().unwrap(), vec!["a.com".to_string(), "b.com".to_string()]);
        let summaries = db.summaries().unwrap();
        assert_eq!(summaries[0], TableSummary { name: "a.com".into(), rows: 1 });
        assert_eq!(summaries[1].rows, 0);
    }

    #[test]
    fn case_variant_lookup() {
        let db = Db::open_in_memory().unwrap();
        db.ensure_table("Example.com").unwrap();
        assert_eq!(db.find_table_nocase("EXAMPLE.COM").unwrap().as_deref(), Some("Example.com"));
        assert_eq!(db.find_table_nocase("other.com").unwrap(), None);
        assert!(db.check_table_name("Example.com").unwrap());
        assert!(!db.check_table_name("other.com").unwrap());
        assert!(db.check_table_name("example.com").is_err());
    }

    #[test]
    fn missing_table_is_reported() {
        let db = Db::open_in_memory().unwrap();
        assert!(!db.table_exists("nope").unwrap());
        assert!(matches!(db.rows("nope"), Err(StoreError::NoSuchTable(_))));
    }

    #[test]
    fn record_exists_on_missing_table_is_a_storage_error() {
        let db = Db::open_in_memory().unwrap();
        assert!(matches!(db.record_exists("nope", "h", "nope"), Err(StoreError::Sqlite(_))));
    }
}
