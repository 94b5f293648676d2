//! Run configuration.
//!
//! Defaults are compile-time constants; an optional JSON file may override any
//! of them:
//! {
//!   "params": ["scheme", "k"],          // table columns, in order
//!   "data_dir": "logs",
//!   "table_path": "fattree.txt",
//!   "plot": {
//!     "method_key": "method",           // parameter naming the tool
//!     "x_key": "num_switches",          // independent variable (integer)
//!     "methods": ["bayonet"],           // whitelist, must have a style below
//!     "chart_path": "bayonet.html",
//!     "dump_path": "bayonet.txt"
//!   }
//! }

use crate::Result;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters pulled from each file name. Table rows are sorted by these.
pub const PARAMS: &[&str] = &["scheme", "k", "prism", "cps", "dont_iterate", "parallelize"];

pub const DATA_DIR: &str = ".";
pub const TABLE_PATH: &str = "fattree.txt";
pub const CHART_PATH: &str = "bayonet.html";
pub const DUMP_PATH: &str = "bayonet.txt";

pub const METHOD_KEY: &str = "method";
pub const X_KEY: &str = "num_switches";

/// Wall-clock limit given to each benchmark run, in seconds.
pub const TIME_LIMIT_SECS: f64 = 3600.0;

/// Marker drawn at each data point of a series; mapped onto plotly symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Star,
    FilledX,
    Diamond,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodStyle {
    pub id: &'static str,
    pub label: &'static str,
    pub marker: Marker,
    pub color: &'static str,
}

/// Known tools, in legend order.
pub const METHOD_STYLES: &[MethodStyle] = &[
    MethodStyle {
        id: "bayonet",
        label: "Bayonet",
        marker: Marker::Circle,
        color: "darkgreen",
    },
    MethodStyle {
        id: "probnetkat_false_true_24",
        label: "ProbNetKAT (cluster)",
        marker: Marker::Square,
        color: "navy",
    },
    MethodStyle {
        id: "probnetkat_false_true_0",
        label: "ProbNetKAT",
        marker: Marker::Star,
        color: "orange",
    },
    MethodStyle {
        id: "prism_exact",
        label: "Prism (exact)",
        marker: Marker::FilledX,
        color: "red",
    },
    MethodStyle {
        id: "prism_approx",
        label: "Prism (approx)",
        marker: Marker::Diamond,
        color: "purple",
    },
    MethodStyle {
        id: "prism_exact.compiled",
        label: "PPNK (exact)",
        marker: Marker::Circle,
        color: "green",
    },
    MethodStyle {
        id: "prism_approx.compiled",
        label: "PPNK (approx)",
        marker: Marker::Cross,
        color: "black",
    },
];

pub fn method_style(id: &str) -> Option<&'static MethodStyle> {
    METHOD_STYLES.iter().find(|s| s.id == id)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub params: Vec<String>,
    pub data_dir: PathBuf,
    pub table_path: PathBuf,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub method_key: String,
    pub x_key: String,
    pub methods: Vec<String>,
    pub chart_path: PathBuf,
    pub dump_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            params: PARAMS.iter().map(|s| s.to_string()).collect(),
            data_dir: PathBuf::from(DATA_DIR),
            table_path: PathBuf::from(TABLE_PATH),
            plot: PlotConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            method_key: METHOD_KEY.to_string(),
            x_key: X_KEY.to_string(),
            methods: METHOD_STYLES.iter().map(|s| s.id.to_string()).collect(),
            chart_path: PathBuf::from(CHART_PATH),
            dump_path: PathBuf::from(DUMP_PATH),
        }
    }
}

impl Config {
    /// Built-in defaults, or the JSON file at `path` layered over them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            None => Config::default(),
            Some(p) => {
                let text = fs::read_to_string(p)
                    .with_context(|| format!("read config file {}", p.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parse config file {}", p.display()))?
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parameters to extract when plotting: the table columns plus the method
    /// and x keys.
    pub fn plot_params(&self) -> Vec<String> {
        let mut out = self.params.clone();
        for key in [&self.plot.method_key, &self.plot.x_key] {
            if !out.contains(key) {
                out.push(key.clone());
            }
        }
        out
    }

    pub fn validate(&self) -> Result<()> {
        if self.params.is_empty() {
            bail!("config must list at least 1 parameter");
        }
        let mut seen = BTreeSet::new();
        for p in &self.params {
            if p.is_empty() {
                bail!("empty parameter name in config");
            }
            if !seen.insert(p.as_str()) {
                bail!("duplicate parameter in config: {}", p);
            }
        }
        self.plot.validate()
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<()> {
        for m in &self.methods {
            if method_style(m).is_none() {
                bail!("plot method '{}' has no label/marker/color entry", m);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::load(None).unwrap();
        assert_eq!(cfg.params.len(), PARAMS.len());
        assert_eq!(cfg.params.last().map(String::as_str), Some("parallelize"));
        assert_eq!(cfg.plot.methods.len(), METHOD_STYLES.len());
    }

    #[test]
    fn every_method_has_unique_id() {
        let ids: BTreeSet<_> = METHOD_STYLES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), METHOD_STYLES.len());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "params": ["k"], "plot": {{ "methods": ["bayonet"] }} }}"#).unwrap();

        let cfg = Config::load(Some(f.path())).unwrap();
        assert_eq!(cfg.params, vec!["k".to_string()]);
        assert_eq!(cfg.plot.methods, vec!["bayonet".to_string()]);
        assert_eq!(cfg.plot.x_key, X_KEY);
        assert_eq!(cfg.table_path, PathBuf::from(TABLE_PATH));
    }

    #[test]
    fn plot_params_append_plot_keys_once() {
        let cfg = Config {
            params: vec!["method".into(), "k".into()],
            ..Config::default()
        };
        assert_eq!(
            cfg.plot_params(),
            vec!["method".to_string(), "k".to_string(), X_KEY.to_string()]
        );
    }

    #[test]
    fn rejects_duplicate_params() {
        let cfg = Config {
            params: vec!["k".into(), "k".into()],
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unstyled_method() {
        let mut cfg = Config::default();
        cfg.plot.methods.push("mystery".into());
        assert!(cfg.validate().is_err());
    }
}
