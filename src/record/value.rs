use serde::Serialize;
use std::fmt;

/// A parameter value taken from a `name=value` token in a file name.
///
/// Ordering puts integers before tokens so mixed columns still sort totally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(u64),
    Token(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Token(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Token(s) => f.write_str(s),
        }
    }
}

/// Terminal status of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    /// `TIME: <secs>.`
    #[serde(rename = "elapsed_time")]
    ElapsedTime(f64),
    /// `TIMEOUT: <secs> seconds.`
    #[serde(rename = "timeout_seconds")]
    Timeout(u64),
    /// `ERROR: <code>.`
    #[serde(rename = "error_code")]
    Error(u64),
}

impl Outcome {
    pub fn elapsed_time(&self) -> Option<f64> {
        match self {
            Outcome::ElapsedTime(t) => Some(*t),
            _ => None,
        }
    }

    /// Cell shown in the RESULT column of the table.
    pub fn result_cell(&self) -> String {
        match self {
            Outcome::ElapsedTime(t) => fmt_float(*t),
            Outcome::Timeout(_) => "TIMEOUT".to_string(),
            Outcome::Error(_) => "ERROR".to_string(),
        }
    }
}

/// Format a float the way it reads in a decimal report: shortest round-trip
/// digits, whole numbers keep a trailing `.0` (`5.0`), and magnitudes below
/// `1e-4` or from `1e16` up switch to exponent form with a signed two-digit
/// exponent (`1e-05`, `1.5e+16`).
pub fn fmt_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` gives the shortest mantissa, e.g. "1.5e16" or "1e-5".
    let sci = format!("{:e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }

    let plain = format!("{}", x);
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}
