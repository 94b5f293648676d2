//! Plotter: elapsed time against problem size, one series per tool.

pub mod chart;
pub mod series;

pub use chart::render_chart;
pub use series::{Series, build_series};

use crate::Result;
use crate::config::PlotConfig;
use crate::record::{Dataset, fmt_float};
use anyhow::Context;
use std::fmt::Write;
use std::fs;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotSummary {
    pub series: usize,
    pub points: usize,
    pub trimmed: usize,
}

/// Build the series, write the chart and the TSV dump of every drawn point.
pub fn plot(data: &Dataset, cfg: &PlotConfig) -> Result<PlotSummary> {
    let series = build_series(data, cfg);

    let html = render_chart(&series)?;
    fs::write(&cfg.chart_path, html)
        .with_context(|| format!("write chart {}", cfg.chart_path.display()))?;

    fs::write(&cfg.dump_path, render_dump(&series))
        .with_context(|| format!("write plot data {}", cfg.dump_path.display()))?;

    let summary = PlotSummary {
        series: series.iter().filter(|s| !s.points.is_empty()).count(),
        points: series.iter().map(|s| s.points.len()).sum(),
        trimmed: series.iter().filter(|s| s.trimmed).count(),
    };
    info!(
        chart = %cfg.chart_path.display(),
        dump = %cfg.dump_path.display(),
        series = summary.series,
        points = summary.points,
        trimmed = summary.trimmed,
        "wrote plot"
    );
    Ok(summary)
}

/// `method\tx\ty` per drawn point, one block per method.
pub fn render_dump(series: &[Series]) -> String {
    let mut out = String::new();
    for s in series {
        for p in &s.points {
            let _ = writeln!(out, "{}\t{}\t{}", s.method, p.x, fmt_float(p.mean));
        }
    }
    out
}
