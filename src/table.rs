//! Tabulator: render a dataset as a boxed text table and write it to disk.

use crate::Result;
use crate::record::{Dataset, Outcome, ParamValue, Record};
use anyhow::Context;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::info;

pub const RESULT_COLUMN: &str = "RESULT";

/// Row order of the rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortMode {
    /// Order by the last configured parameter; ties fall back to the whole row
    /// read left to right.
    #[default]
    LastKey,
    /// Order by every parameter in configured order, then by result.
    Lexicographic,
}

/// Render the table and overwrite `path` with it.
pub fn write_table(data: &Dataset, params: &[String], sort: SortMode, path: &Path) -> Result<()> {
    let text = render_table(data, params, sort)?;
    fs::write(path, text).with_context(|| format!("write table {}", path.display()))?;
    info!(path = %path.display(), rows = data.len(), "wrote table");
    Ok(())
}

/// Render `data` with one column per parameter plus RESULT.
pub fn render_table(data: &Dataset, params: &[String], sort: SortMode) -> Result<String> {
    let mut rows: Vec<(Vec<&ParamValue>, &Record)> = Vec::with_capacity(data.len());
    for r in data {
        rows.push((r.values_for(params)?, r));
    }

    rows.sort_by(|(a, ra), (b, rb)| {
        let full = || cmp_cells(a, b).then_with(|| cmp_outcome(&ra.outcome, &rb.outcome));
        match sort {
            SortMode::LastKey => a.last().cmp(&b.last()).then_with(full),
            SortMode::Lexicographic => full(),
        }
    });

    let header: Vec<String> = params
        .iter()
        .cloned()
        .chain(std::iter::once(RESULT_COLUMN.to_string()))
        .collect();

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(values, r)| {
            values
                .iter()
                .map(|v| v.to_string())
                .chain(std::iter::once(r.outcome.result_cell()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = {
        let mut s = String::from("+");
        for w in &widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    push_row(&mut out, &header, &widths);
    out.push_str(&rule);
    out.push('\n');
    if !body.is_empty() {
        for row in &body {
            push_row(&mut out, row, &widths);
        }
        out.push_str(&rule);
        out.push('\n');
    }
    Ok(out)
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, w) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(&center(cell, *w));
        out.push_str(" |");
    }
    out.push('\n');
}

/// Center `text` in `width` columns. With odd slack, odd-length text gets the
/// extra space on the right and even-length text on the left.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let excess = width.saturating_sub(len);
    let (left, right) = if excess % 2 == 0 {
        (excess / 2, excess / 2)
    } else if len % 2 == 1 {
        (excess / 2, excess / 2 + 1)
    } else {
        (excess / 2 + 1, excess / 2)
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn cmp_cells(a: &[&ParamValue], b: &[&ParamValue]) -> Ordering {
    a.iter().cmp(b.iter())
}

/// Times first (ascending), then timeouts, then errors.
fn cmp_outcome(a: &Outcome, b: &Outcome) -> Ordering {
    fn rank(o: &Outcome) -> (u8, f64) {
        match o {
            Outcome::ElapsedTime(t) => (0, *t),
            Outcome::Timeout(s) => (1, *s as f64),
            Outcome::Error(c) => (2, *c as f64),
        }
    }
    let (ra, va) = rank(a);
    let (rb, vb) = rank(b);
    ra.cmp(&rb).then_with(|| va.total_cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn params(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rec(scheme: &str, k: u64, outcome: Outcome) -> Record {
        let mut p = BTreeMap::new();
        p.insert("scheme".to_string(), ParamValue::Token(scheme.to_string()));
        p.insert("k".to_string(), ParamValue::Int(k));
        Record::new(format!("scheme={scheme}-k={k}.log"), p, outcome)
    }

    #[test]
    fn empty_dataset_renders_header_only() {
        let got = render_table(&Vec::new(), &params(&["scheme", "k"]), SortMode::LastKey).unwrap();
        let want = "\
+--------+---+--------+
| scheme | k | RESULT |
+--------+---+--------+
";
        assert_eq!(got, want);
    }

    #[test]
    fn renders_results_and_sorts_by_last_param() {
        let data = vec![
            rec("ecmp", 8, Outcome::Timeout(3600)),
            rec("f", 4, Outcome::ElapsedTime(12.5)),
            rec("ecmp", 4, Outcome::Error(2)),
            rec("ecmp", 16, Outcome::ElapsedTime(5.0)),
        ];
        let got = render_table(&data, &params(&["scheme", "k"]), SortMode::LastKey).unwrap();
        let want = "\
+--------+----+---------+
| scheme | k  |  RESULT |
+--------+----+---------+
|  ecmp  | 4  |  ERROR  |
|   f    | 4  |   12.5  |
|  ecmp  | 8  | TIMEOUT |
|  ecmp  | 16 |   5.0   |
+--------+----+---------+
";
        assert_eq!(got, want);
    }

    #[test]
    fn lexicographic_sort_uses_every_param() {
        let data = vec![
            rec("f", 4, Outcome::ElapsedTime(1.0)),
            rec("ecmp", 16, Outcome::ElapsedTime(2.0)),
            rec("ecmp", 4, Outcome::ElapsedTime(3.0)),
        ];
        let got =
            render_table(&data, &params(&["scheme", "k"]), SortMode::Lexicographic).unwrap();
        let rows: Vec<&str> = got.lines().skip(3).take(3).collect();
        assert_eq!(
            rows,
            vec![
                "|  ecmp  | 4  |  3.0   |",
                "|  ecmp  | 16 |  2.0   |",
                "|   f    | 4  |  1.0   |",
            ]
        );
    }

    #[test]
    fn column_order_follows_config_not_input() {
        let data = vec![rec("ecmp", 4, Outcome::ElapsedTime(1.0))];
        let got = render_table(&data, &params(&["k", "scheme"]), SortMode::LastKey).unwrap();
        assert_eq!(got.lines().nth(1), Some("| k | scheme | RESULT |"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = vec![rec("ecmp", 4, Outcome::ElapsedTime(1.0))];
        assert!(render_table(&data, &params(&["scheme", "prism"]), SortMode::LastKey).is_err());
    }

    #[test]
    fn write_table_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        fs::write(&path, "stale contents that are much longer than the table").unwrap();

        write_table(&Vec::new(), &params(&["k"]), SortMode::LastKey, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "+---+--------+\n| k | RESULT |\n+---+--------+\n");
    }
}
