//! Collector: turn a directory of benchmark logs into a dataset.

pub mod error;
pub mod parse;

pub use error::CollectError;
pub use parse::LogParser;

use crate::record::Dataset;
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Log files are recognised by extension only; subdirectories are not scanned.
pub const LOG_PATTERN: &str = "*.log";

/// List the log files directly inside `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let pattern = dir.join(LOG_PATTERN).to_string_lossy().into_owned();
    let mut paths: Vec<_> = glob(&pattern)
        .map_err(|source| CollectError::Glob {
            pattern: pattern.clone(),
            source,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Parse every log in `dir`. The first malformed file aborts the whole run.
pub fn collect_dir(dir: &Path, params: &[String]) -> anyhow::Result<Dataset> {
    let parser = LogParser::new(params)?;
    let files = discover(dir)?;

    let mut out = Dataset::with_capacity(files.len());
    for path in files {
        info!(file = %path.display(), "parsing log");
        let record = parser.parse_file(&path)?;
        debug!(params = ?record.params, outcome = ?record.outcome, "parsed record");
        out.push(record);
    }

    info!(dir = %dir.display(), records = out.len(), "collected logs");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Outcome, ParamValue};
    use std::fs;
    use tempfile::tempdir;

    fn params(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_dir_yields_empty_dataset() {
        let dir = tempdir().unwrap();
        let data = collect_dir(dir.path(), &params(&["k"])).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn only_top_level_log_files_are_read() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("k=4.log"), "TIME: 1.5.\n").unwrap();
        fs::write(root.join("k=8.txt"), "TIME: 2.5.\n").unwrap();
        fs::write(root.join("nested/k=16.log"), "TIME: 3.5.\n").unwrap();

        let found = discover(root).unwrap();
        assert_eq!(found, vec![root.join("k=4.log")]);
    }

    #[test]
    fn collects_one_record_per_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("scheme=ecmp-k=4.log"), "start\nTIME: 12.5.\n").unwrap();
        fs::write(
            root.join("scheme=f-k=8.log"),
            "start\nTIMEOUT: 3600 seconds.\n",
        )
        .unwrap();
        fs::write(root.join("scheme=ecmp-k=16.log"), "ERROR: 2.\n").unwrap();

        let data = collect_dir(root, &params(&["scheme", "k"])).unwrap();
        assert_eq!(data.len(), 3);

        let by_k = |k: u64| {
            data.iter()
                .find(|r| r.get("k") == Some(&ParamValue::Int(k)))
                .unwrap()
        };
        assert_eq!(by_k(4).outcome, Outcome::ElapsedTime(12.5));
        assert_eq!(by_k(8).outcome, Outcome::Timeout(3600));
        assert_eq!(by_k(16).outcome, Outcome::Error(2));
        assert_eq!(
            by_k(8).get("scheme"),
            Some(&ParamValue::Token("f".to_string()))
        );
    }

    #[test]
    fn missing_param_aborts_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("k=4.log"), "TIME: 1.0.\n").unwrap();

        let err = collect_dir(dir.path(), &params(&["k", "prism"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CollectError>(),
            Some(CollectError::ParameterExtraction { param, .. }) if param == "prism"
        ));
    }

    #[test]
    fn unrecognised_content_aborts_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("k=4.log"), "TIME: 1.0.\n").unwrap();
        fs::write(dir.path().join("k=8.log"), "segfault\n").unwrap();

        let err = collect_dir(dir.path(), &params(&["k"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CollectError>(),
            Some(CollectError::OutcomeExtraction { .. })
        ));
    }
}
