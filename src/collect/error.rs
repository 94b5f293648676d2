use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("could not parse file name {path}: no '{param}=<value>' token")]
    ParameterExtraction { path: PathBuf, param: String },

    #[error("could not parse result in {path}: no TIME, TIMEOUT or ERROR line")]
    OutcomeExtraction { path: PathBuf },

    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl CollectError {
    pub fn parameter(path: impl Into<PathBuf>, param: impl Into<String>) -> Self {
        Self::ParameterExtraction {
            path: path.into(),
            param: param.into(),
        }
    }

    pub fn outcome(path: impl Into<PathBuf>) -> Self {
        Self::OutcomeExtraction { path: path.into() }
    }
}
