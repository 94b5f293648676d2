//! Plotly chart of mean elapsed time against problem size.
//!
//! The `Plot` value carries all chart state; traces, axes, the time-limit band
//! and its annotation are added to it explicitly.

use crate::Result;
use crate::config::{Marker, TIME_LIMIT_SECS, method_style};
use crate::plot::Series;
use anyhow::anyhow;
use plotly::common::{ErrorData, ErrorType, Font, Line, Mode, Title};
use plotly::layout::{Annotation, Axis, AxisType, Shape, ShapeLine, ShapeType};
use plotly::{Layout, Plot, Scatter};

pub const CHART_WIDTH: usize = 600;
pub const CHART_HEIGHT: usize = 300;
pub const X_RANGE: (f64, f64) = (1.0, 100000.0);
pub const Y_RANGE: (f64, f64) = (0.5, 10000.0);

pub const X_LABEL: &str = "Number of switches";
pub const Y_LABEL: &str = "Time (seconds)";
pub const TIME_LIMIT_NOTE: &str = "Time limit = 3600s";

const FRAME_COLOR: &str = "#999999";

fn symbol(marker: Marker) -> plotly::common::MarkerSymbol {
    use plotly::common::MarkerSymbol;
    match marker {
        Marker::Circle => MarkerSymbol::Circle,
        Marker::Square => MarkerSymbol::Square,
        Marker::Star => MarkerSymbol::Star,
        Marker::FilledX => MarkerSymbol::X,
        Marker::Diamond => MarkerSymbol::Diamond,
        Marker::Cross => MarkerSymbol::XOpen,
    }
}

/// Log-scaled axis over `range`. Plotly takes log axis ranges as exponents.
fn log_axis(label: &str, range: (f64, f64)) -> Axis {
    Axis::new()
        .title(Title::new(label))
        .type_(AxisType::Log)
        .range(vec![range.0.log10(), range.1.log10()])
        .show_grid(true)
        .show_line(true)
        .line_color(FRAME_COLOR)
}

/// One trace per non-empty series, with population std as error bars.
pub fn build_chart(series: &[Series]) -> Result<Plot> {
    let mut plot = Plot::new();

    for s in series.iter().filter(|s| !s.points.is_empty()) {
        let style = method_style(&s.method)
            .ok_or_else(|| anyhow!("no plot style for method '{}'", s.method))?;

        let xs: Vec<u64> = s.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = s.points.iter().map(|p| p.mean).collect();
        let errs: Vec<f64> = s.points.iter().map(|p| p.std).collect();

        let trace = Scatter::new(xs, ys)
            .name(style.label)
            .mode(Mode::LinesMarkers)
            .marker(
                plotly::common::Marker::new()
                    .symbol(symbol(style.marker))
                    .color(style.color)
                    .size(8),
            )
            .line(Line::new().color(style.color))
            .error_y(ErrorData::new(ErrorType::Data).array(errs).color(style.color));
        plot.add_trace(trace);
    }

    let mut layout = Layout::new()
        .width(CHART_WIDTH)
        .height(CHART_HEIGHT)
        .show_legend(true)
        .x_axis(log_axis(X_LABEL, X_RANGE))
        .y_axis(log_axis(Y_LABEL, Y_RANGE));

    // Shapes take data coordinates even on log axes; annotations take exponents.
    layout.add_shape(
        Shape::new()
            .shape_type(ShapeType::Rect)
            .x_ref("x")
            .y_ref("y")
            .x0(X_RANGE.0)
            .x1(X_RANGE.1)
            .y0(TIME_LIMIT_SECS)
            .y1(Y_RANGE.1)
            .fill_color("red")
            .opacity(0.2)
            .line(ShapeLine::new().width(0.0)),
    );
    layout.add_annotation(
        Annotation::new()
            .x(400f64.log10())
            .y(500f64.log10())
            .text(TIME_LIMIT_NOTE)
            .show_arrow(false)
            .font(Font::new().color("gray")),
    );
    layout.add_annotation(
        Annotation::new()
            .x(400f64.log10())
            .y(TIME_LIMIT_SECS.log10())
            .ax_ref("x")
            .ay_ref("y")
            .ax(400f64.log10())
            .ay(1000f64.log10())
            .text("")
            .show_arrow(true)
            .arrow_color("gray"),
    );

    plot.set_layout(layout);
    Ok(plot)
}

/// Self-contained HTML document for `series`.
pub fn render_chart(series: &[Series]) -> Result<String> {
    Ok(build_chart(series)?.to_html())
}
