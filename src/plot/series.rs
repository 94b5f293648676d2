//! Grouping and reduction of elapsed times into one series per method.

use crate::config::{PlotConfig, TIME_LIMIT_SECS};
use crate::record::Dataset;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A last point at or above this mean sits on the time limit and is not drawn.
pub const TRIM_THRESHOLD_SECS: f64 = TIME_LIMIT_SECS - 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: u64,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub method: String,
    /// Sorted by `x`.
    pub points: Vec<Point>,
    /// Whether a time-limit point was dropped from the end.
    pub trimmed: bool,
}

/// Group elapsed times by (method, x) for whitelisted methods and reduce each
/// bucket to mean and population standard deviation.
///
/// Records without an elapsed time, without the method key, or without an
/// integer x are skipped. Series come back ordered by method id.
pub fn build_series(data: &Dataset, cfg: &PlotConfig) -> Vec<Series> {
    let whitelist: BTreeSet<&str> = cfg.methods.iter().map(String::as_str).collect();

    let mut buckets: BTreeMap<String, BTreeMap<u64, Vec<f64>>> = BTreeMap::new();
    for r in data {
        let Some(time) = r.outcome.elapsed_time() else {
            continue;
        };
        let Some(method) = r.get(&cfg.method_key).map(|v| v.to_string()) else {
            debug!(file = %r.path.display(), key = %cfg.method_key, "no method, not plotted");
            continue;
        };
        if !whitelist.contains(method.as_str()) {
            continue;
        }
        let Some(x) = r.get(&cfg.x_key).and_then(|v| v.as_int()) else {
            debug!(file = %r.path.display(), key = %cfg.x_key, "no integer x, not plotted");
            continue;
        };
        buckets
            .entry(method)
            .or_default()
            .entry(x)
            .or_default()
            .push(time);
    }

    let mut out = Vec::with_capacity(buckets.len());
    for (method, by_x) in buckets {
        let mut points: Vec<Point> = by_x
            .into_iter()
            .map(|(x, times)| {
                let (mean, std) = mean_std(&times);
                Point { x, mean, std }
            })
            .collect();

        let trimmed = points
            .last()
            .is_some_and(|p| p.mean >= TRIM_THRESHOLD_SECS);
        if trimmed {
            points.pop();
        }

        out.push(Series {
            method,
            points,
            trimmed,
        });
    }
    out
}

/// Mean and population standard deviation. `values` must be non-empty.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
