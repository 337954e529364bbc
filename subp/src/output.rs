use anyhow::{Context, Result};
use results_sqlite::HostRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_csv(rows: &[HostRow], out: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(out).with_context(|| format!("creating {}", out.display()))?;
    for row in rows {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_jsonl(rows: &[HostRow], out: &Path) -> Result<()> {
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut w = BufWriter::new(file);
    for row in rows {
        writeln!(w, "{}", serde_json::to_string(row)?)?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HostRow> {
        vec![
            HostRow { id: 1, host: Some("a.com".into()), input: Some("x".into()), sources: Some("s1,s2".into()), timestamp: Some("2024-01-02 03:04:05".into()) },
            HostRow { id: 2, host: Some("b.com".into()), input: Some("x".into()), sources: None, timestamp: None },
        ]
    }

    #[test]
    fn csv_has_header_and_quotes_joined_sources() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.csv");
        write_csv(&sample(), &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,host,input,sources,timestamp"));
        assert_eq!(lines.next(), Some("1,a.com,x,\"s1,s2\",2024-01-02 03:04:05"));
        assert_eq!(lines.next(), Some("2,b.com,x,,"));
    }

    #[test]
    fn jsonl_writes_one_object_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.jsonl");
        write_jsonl(&sample(), &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let rows: Vec<HostRow> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(rows, sample());
    }
}
