use arrow::array::{ArrayRef, Int64Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use rusqlite::Row;
use std::path::Path;
use std::sync::Arc;

use crate::schema::quote_ident;
use crate::{arrow_schemas, Db, StoreError};

const CHUNK: usize = 10_000;

/// Write every row of `table` to `out` as ZSTD-compressed Parquet.
/// Returns the number of rows written.
pub fn export_table_to_parquet(db: &Db, table: &str, out: &Path) -> Result<usize, StoreError> {
    db.require_table(table)?;
    let sql = format!("SELECT id, host, input, sources, timestamp FROM {} ORDER BY id", quote_ident(table)?);
    let mut stmt = db.conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let file = std::fs::File::create(out)?;
    let schema = Arc::new(arrow_schemas::hosts_schema());

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let mut total = 0;
    loop {
        let mut batch = RowBatch::new();
        let mut count = 0;
        while count < CHUNK {
            let Some(row) = rows.next()? else { break; };
            batch.push(row)?;
            count += 1;
        }
        if count == 0 { break; }
        let rb = RecordBatch::try_new(schema.clone(), batch.finish())?;
        writer.write(&rb)?;
        total += count;
    }

    writer.close()?;
    tracing::info!(table, rows = total, out = %out.display(), "exported parquet");
    Ok(total)
}

struct RowBatch {
    id: Int64Builder,
    host: StringBuilder,
    input: StringBuilder,
    sources: StringBuilder,
    timestamp: StringBuilder,
}

impl RowBatch {
    fn new() -> Self {
        RowBatch {
            id: Int64Builder::new(),
            host: StringBuilder::new(),
            input: StringBuilder::new(),
            sources: StringBuilder::new(),
            timestamp: StringBuilder::new(),
        }
    }

    fn push(&mut self, row: &Row) -> rusqlite::Result<()> {
        self.id.append_value(row.get::<_, i64>(0)?);
        self.host.append_option(row.get::<_, Option<String>>(1)?);
        self.input.append_option(row.get::<_, Option<String>>(2)?);
        self.sources.append_option(row.get::<_, Option<String>>(3)?);
        self.timestamp.append_option(row.get::<_, Option<String>>(4)?);
        Ok(())
    }

    fn finish(mut self) -> Vec<ArrayRef> {
        vec![
            Arc::new(self.id.finish()),
            Arc::new(self.host.finish()),
            Arc::new(self.input.finish()),
            Arc::new(self.sources.finish()),
            Arc::new(self.timestamp.finish()),
        ]
    }
}
