use crate::StoreError;
use rusqlite::Connection;
use std::path::Path;

/// Owned handle on the store file. Opened once at startup and closed at
/// shutdown; everything else borrows it.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Db { conn: Connection::open_in_memory()? })
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

fn apply_pragmas(conn: &Connection) -> Result<(), StoreError> {
    let _mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |r| r.get(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}
