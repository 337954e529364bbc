use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = "subp.yaml";

#[derive(Debug, Default, Deserialize, Clone)]
pub struct IngestConfig {
    pub db_name: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub keep_generated: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    pub ingest: Option<IngestConfig>,
}

impl Config {
    pub fn ingest(&self) -> IngestConfig {
        self.ingest.clone().unwrap_or_default()
    }
}

/// Load `path`, or `./subp.yaml` when no path is given and it exists.
/// A missing or malformed file yields `None`.
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG);
            if p.exists() { p.to_path_buf() } else { return None; }
        }
    };
    let s = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config not readable, ignoring");
            return None;
        }
    };
    match serde_yaml::from_str(&s) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config not valid YAML, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_ingest_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subp.yaml");
        fs::write(&path, "ingest:\n  db_name: recon.db\n  extensions: [json, ndjson]\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap().ingest();
        assert_eq!(cfg.db_name.as_deref(), Some("recon.db"));
        assert_eq!(cfg.extensions, Some(vec!["json".to_string(), "ndjson".to_string()]));
        assert_eq!(cfg.keep_generated, None);
    }

    #[test]
    fn malformed_or_missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "ingest: [unclosed").unwrap();
        assert!(load_config(Some(&path)).is_none());
        assert!(load_config(Some(&dir.path().join("missing.yaml"))).is_none());
    }
}
