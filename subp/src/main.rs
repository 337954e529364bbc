use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ingest::{BatchRunner, Ingestor, DEFAULT_EXTENSIONS};
use results_sqlite::Db;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;

const DEFAULT_DB_NAME: &str = "data.db";
/// Name of the file a subdomain list is converted into, inside the input directory.
const GENERATED_FILE: &str = "subdomains_temp.json";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ExportFormat {
    Parquet,
    Csv,
    Jsonl,
}

#[derive(Debug, Parser)]
#[command(name = "subp", version, about = "Load subdomain enumeration results into per-domain SQLite tables")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./subp.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Ingest JSON / JSON-lines result files into the database
    Ingest {
        /// Directory containing JSON files
        #[arg(short = 'i', long = "input")]
        input_dir: PathBuf,
        /// Directory to save the SQLite DB file (created if missing)
        #[arg(short = 'o', long = "output")]
        output_dir: PathBuf,
        /// SQLite DB file name (default: data.db)
        #[arg(long, aliases = ["dbname", "db"])]
        db_name: Option<String>,
        /// Process only this file, relative to the input directory
        #[arg(long, aliases = ["jsonfilename", "jsfile"], conflicts_with = "list")]
        file: Option<PathBuf>,
        /// Plain list of subdomains to convert to JSON and process
        #[arg(short = 'l', long, alias = "subdomainlist", requires = "input_domain")]
        list: Option<PathBuf>,
        /// Input domain stamped on records generated from --list
        #[arg(long, aliases = ["inputdomain", "ind"], requires = "list")]
        input_domain: Option<String>,
    },
    /// Convert a plain subdomain list into a JSON records file
    Convert {
        /// Newline-delimited subdomains
        #[arg(short = 'l', long)]
        list: PathBuf,
        /// Input domain stamped on every record
        #[arg(long)]
        input_domain: String,
        /// Output JSON file (overwrites)
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// List domain tables and their row counts
    Tables {
        /// Path to the SQLite DB file
        #[arg(long)]
        db: PathBuf,
    },
    /// Export one domain table
    Export {
        /// Path to the SQLite DB file
        #[arg(long)]
        db: PathBuf,
        /// Table (input domain) to export
        #[arg(long)]
        table: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file (overwrites)
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref()).unwrap_or_default();
    match cli.command {
        Commands::Version => {
            println!("subp {} (core {})", env!("CARGO_PKG_VERSION"), subp_core::version());
        }
        Commands::Ingest { input_dir, output_dir, db_name, file, list, input_domain } => {
            let cfg = loaded_cfg.ingest();
            if !output_dir.exists() {
                fs::create_dir_all(&output_dir)
                    .with_context(|| format!("creating output directory {}", output_dir.display()))?;
            }
            let db_name = db_name.or(cfg.db_name).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
            let db_path = output_dir.join(db_name);
            let db = Db::open_or_create(&db_path)
                .with_context(|| format!("initializing database {}", db_path.display()))?;

            if let Some(list) = list {
                let Some(domain) = input_domain else { bail!("--input-domain is required when using --list") };
                let generated = input_dir.join(GENERATED_FILE);
                subdomain_list::convert_list(&list, &generated, &domain)
                    .context("converting subdomain list to JSON")?;
                println!("Converted subdomain list to JSON: {}", generated.display());
                let result = Ingestor::new(&db)
                    .ingest_file(&generated)
                    .context("processing generated JSON file");
                if !cfg.keep_generated.unwrap_or(false) {
                    if let Err(e) = fs::remove_file(&generated) {
                        tracing::warn!(path = %generated.display(), error = %e, "could not remove generated file");
                    }
                }
                result?;
                println!("Processed file: {}", generated.display());
            } else if let Some(file) = file {
                Ingestor::new(&db)
                    .ingest_file(&input_dir.join(&file))
                    .with_context(|| format!("processing JSON file {}", file.display()))?;
                println!("Processed file: {}", file.display());
            } else {
                let extensions = cfg
                    .extensions
                    .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());
                let report = BatchRunner::new(&db)
                    .with_extensions(extensions)
                    .run(&input_dir, |path, _| println!("Processed file: {}", display_name(path)))
                    .context("processing JSON files")?;
                tracing::info!(
                    files = report.files.len(),
                    records = report.records,
                    inserted = report.inserted,
                    duplicates = report.duplicates,
                    "batch complete"
                );
            }

            db.close().context("closing database")?;
            println!("Database saved at: {}", db_path.display());
        }
        Commands::Convert { list, input_domain, out } => {
            let n = subdomain_list::convert_list(&list, &out, &input_domain)
                .context("converting subdomain list to JSON")?;
            println!("Converted {} subdomains to JSON: {}", n, out.display());
        }
        Commands::Tables { db } => {
            let db = open_existing(&db)?;
            for t in db.summaries()? {
                println!("{}\t{}", t.name, t.rows);
            }
        }
        Commands::Export { db, table, format, out } => {
            let db = open_existing(&db)?;
            let written = match format {
                ExportFormat::Parquet => results_sqlite::export_table_to_parquet(&db, &table, &out)?,
                ExportFormat::Csv => {
                    let rows = db.rows(&table)?;
                    output::write_csv(&rows, &out)?;
                    rows.len()
                }
                ExportFormat::Jsonl => {
                    let rows = db.rows(&table)?;
                    output::write_jsonl(&rows, &out)?;
                    rows.len()
                }
            };
            println!("Exported {} rows from {:?} to {}", written, table, out.display());
        }
    }
    Ok(())
}

fn open_existing(path: &Path) -> Result<Db> {
    if !path.is_file() {
        bail!("database not found: {}", path.display());
    }
    Db::open_or_create(path).with_context(|| format!("opening database {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}
