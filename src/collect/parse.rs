use crate::collect::CollectError;
use crate::record::{Outcome, ParamValue, Record};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Status lines, tried as one alternation per line:
/// 1) `TIME: 12.5.`
/// 2) `TIMEOUT: 3600 seconds.`
/// 3) `ERROR: 2.`
const OUTCOME_RE: &str = r"TIME: (?P<time>\d+\.\d*)\.|TIMEOUT: (?P<timeout>\d+) seconds\.|ERROR: (?P<error>\d+)\.";

/// Compiled matchers for one run: one per configured parameter plus the
/// outcome alternation.
#[derive(Debug)]
pub struct LogParser {
    params: Vec<(String, Regex)>,
    outcome: Regex,
}

impl LogParser {
    pub fn new(params: &[String]) -> anyhow::Result<Self> {
        let mut compiled = Vec::with_capacity(params.len());
        for p in params {
            // `k=4` or `scheme=ecmp`; the value is either all digits or all letters.
            let re = Regex::new(&format!(
                r"{}=(?:(?P<n>\d+)|(?P<s>[a-zA-Z]+))",
                regex::escape(p)
            ))?;
            compiled.push((p.clone(), re));
        }
        Ok(Self {
            params: compiled,
            outcome: Regex::new(OUTCOME_RE)?,
        })
    }

    /// Read and parse one log file.
    pub fn parse_file(&self, path: &Path) -> Result<Record, CollectError> {
        let params = self.parse_params(path)?;
        let text = fs::read_to_string(path).map_err(|source| CollectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let outcome = self
            .parse_outcome(&text)
            .ok_or_else(|| CollectError::outcome(path))?;
        Ok(Record::new(path, params, outcome))
    }

    /// Extract every configured parameter from the path string.
    pub fn parse_params(&self, path: &Path) -> Result<BTreeMap<String, ParamValue>, CollectError> {
        let haystack = path.to_string_lossy();
        let mut out = BTreeMap::new();
        for (name, re) in &self.params {
            let caps = re
                .captures(&haystack)
                .ok_or_else(|| CollectError::parameter(path, name))?;
            let value = if let Some(n) = caps.name("n") {
                let n = n
                    .as_str()
                    .parse::<u64>()
                    .map_err(|_| CollectError::parameter(path, name))?;
                ParamValue::Int(n)
            } else if let Some(s) = caps.name("s") {
                ParamValue::Token(s.as_str().to_string())
            } else {
                return Err(CollectError::parameter(path, name));
            };
            out.insert(name.clone(), value);
        }
        Ok(out)
    }

    /// Find the status line closest to the end of the log.
    ///
    /// Lines are visited last to first and the first line carrying a status
    /// wins; within that line the leftmost status wins.
    pub fn parse_outcome(&self, text: &str) -> Option<Outcome> {
        text.lines()
            .rev()
            .find_map(|line| self.outcome.captures(line))
            .and_then(|caps| {
                if let Some(t) = caps.name("time") {
                    t.as_str().parse().ok().map(Outcome::ElapsedTime)
                } else if let Some(t) = caps.name("timeout") {
                    t.as_str().parse().ok().map(Outcome::Timeout)
                } else if let Some(e) = caps.name("error") {
                    e.as_str().parse().ok().map(Outcome::Error)
                } else {
                    None
                }
            })
    }
}
