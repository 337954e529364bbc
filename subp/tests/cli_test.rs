/// End-to-end tests driving the `subp` binary.
use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use results_sqlite::Db;

const F1: &str = r#"[{"host":"a.example.com","input":"example.com","sources":["s1","s2"]}]"#;
const F3: &str = r#"{"host":"c.example.com","input":"example.com","sources":["s3"]}"#;

fn subp(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_subp"));
    cmd.current_dir(cwd);
    cmd
}

fn hosts(db: &Path, table: &str) -> Vec<String> {
    let db = Db::open_or_create(db).unwrap();
    db.rows(table).unwrap().into_iter().filter_map(|r| r.host).collect()
}

#[test]
fn test_ingest_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.json"), F1).unwrap();
    fs::write(input.join("b.json"), format!("{F3}\n{{\"host\":\"d.other.org\",\"input\":\"other.org\",\"sources\":[]}}\n")).unwrap();
    fs::write(input.join("readme.txt"), "not json").unwrap();

    subp(tmp.path())
        .args(["ingest", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(tmp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed file: a.json"))
        .stdout(predicate::str::contains("Processed file: b.json"))
        .stdout(predicate::str::contains("readme.txt").not())
        .stdout(predicate::str::contains("Database saved at:"));

    let db_path = tmp.path().join("out").join("data.db");
    assert_eq!(hosts(&db_path, "example.com"), vec!["a.example.com", "c.example.com"]);
    assert_eq!(hosts(&db_path, "other.org"), vec!["d.other.org"]);
    let db = Db::open_or_create(&db_path).unwrap();
    assert_eq!(db.rows("example.com").unwrap()[0].sources.as_deref(), Some("s1,s2"));
}

#[test]
fn test_reingest_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.json"), F1).unwrap();
    for _ in 0..2 {
        subp(tmp.path()).args(["ingest", "-i", ".", "-o", "out"]).assert().success();
    }
    assert_eq!(hosts(&tmp.path().join("out/data.db"), "example.com").len(), 1);
}

#[test]
fn test_batch_halts_on_first_bad_file() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("f1.json"), F1).unwrap();
    fs::write(tmp.path().join("f2.json"), "{\"host\": broken").unwrap();
    fs::write(tmp.path().join("f3.json"), F3).unwrap();

    subp(tmp.path())
        .args(["ingest", "-i", ".", "-o", "out"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Processed file: f1.json"))
        .stdout(predicate::str::contains("f3.json").not())
        .stderr(predicate::str::contains("f2.json"));

    assert_eq!(hosts(&tmp.path().join("out/data.db"), "example.com"), vec!["a.example.com"]);
}

#[test]
fn test_single_file_with_original_aliases() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("one.json"), F1).unwrap();
    fs::write(tmp.path().join("two.json"), F3).unwrap();

    subp(tmp.path())
        .args(["ingest", "--input", ".", "--output", "out", "--dbname", "recon.db", "--jsfile", "two.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed file: two.json"));

    assert_eq!(hosts(&tmp.path().join("out/recon.db"), "example.com"), vec!["c.example.com"]);
}

#[test]
fn test_subdomain_list_is_converted_ingested_and_cleaned_up() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("subs.txt"), "a.sub.com\nb.sub.com\n").unwrap();
    fs::write(tmp.path().join("ignored.json"), F1).unwrap();

    subp(tmp.path())
        .args(["ingest", "-i", ".", "-o", "out", "-l", "subs.txt", "--input-domain", "target.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted subdomain list to JSON"));

    let db_path = tmp.path().join("out/data.db");
    assert_eq!(hosts(&db_path, "target.com"), vec!["a.sub.com", "b.sub.com"]);
    let db = Db::open_or_create(&db_path).unwrap();
    assert!(!db.table_exists("example.com").unwrap());
    assert!(db.rows("target.com").unwrap().iter().all(|r| r.sources.as_deref() == Some("Admin")));
    assert!(!tmp.path().join("subdomains_temp.json").exists());
}

#[test]
fn test_list_requires_input_domain() {
    let tmp = tempfile::tempdir().unwrap();
    subp(tmp.path())
        .args(["ingest", "-i", ".", "-o", "out", "-l", "subs.txt"])
        .assert()
        .failure();
}

#[test]
fn test_missing_required_args() {
    let tmp = tempfile::tempdir().unwrap();
    subp(tmp.path())
        .args(["ingest", "-i", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_config_sets_db_name_and_extensions() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("subp.yaml"), "ingest:\n  db_name: cfg.db\n  extensions: [ndjson]\n").unwrap();
    fs::write(tmp.path().join("a.json"), "{broken").unwrap();
    fs::write(tmp.path().join("b.ndjson"), F3).unwrap();

    subp(tmp.path())
        .args(["ingest", "-i", ".", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed file: b.ndjson"));

    assert_eq!(hosts(&tmp.path().join("out/cfg.db"), "example.com"), vec!["c.example.com"]);
}

#[test]
fn test_convert_tables_and_export() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("subs.txt"), "a.sub.com\nb.sub.com\n").unwrap();

    subp(tmp.path())
        .args(["convert", "-l", "subs.txt", "--input-domain", "target.com", "--out", "subs.json"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(tmp.path().join("subs.json")).unwrap(),
        r#"[{"host":"a.sub.com","input":"target.com","sources":["Admin"]},{"host":"b.sub.com","input":"target.com","sources":["Admin"]}]"#
    );

    subp(tmp.path()).args(["ingest", "-i", ".", "-o", "out"]).assert().success();

    subp(tmp.path())
        .args(["tables", "--db", "out/data.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("target.com\t2"));

    subp(tmp.path())
        .args(["export", "--db", "out/data.db", "--table", "target.com", "--format", "jsonl", "--out", "t.jsonl"])
        .assert()
        .success();
    let exported = fs::read_to_string(tmp.path().join("t.jsonl")).unwrap();
    assert_eq!(exported.lines().count(), 2);
    assert!(exported.contains("\"host\":\"a.sub.com\""));

    subp(tmp.path())
        .args(["export", "--db", "out/data.db", "--table", "missing.com", "--out", "m.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such table"));
}

#[test]
fn test_tables_on_missing_database() {
    let tmp = tempfile::tempdir().unwrap();
    subp(tmp.path())
        .args(["tables", "--db", "nope.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database not found"));
}
