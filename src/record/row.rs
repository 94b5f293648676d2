use crate::record::{Outcome, ParamValue};
use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One parsed log file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Source log file.
    pub path: PathBuf,
    pub params: BTreeMap<String, ParamValue>,
    pub outcome: Outcome,
}

/// All records of one run, in scan order.
pub type Dataset = Vec<Record>;

impl Record {
    pub fn new(
        path: impl Into<PathBuf>,
        params: BTreeMap<String, ParamValue>,
        outcome: Outcome,
    ) -> Self {
        Self {
            path: path.into(),
            params,
            outcome,
        }
    }

    pub fn get(&self, param: &str) -> Option<&ParamValue> {
        self.params.get(param)
    }

    /// Values for `params` in the given order; fails if any is absent.
    pub fn values_for<'a>(&'a self, params: &[String]) -> anyhow::Result<Vec<&'a ParamValue>> {
        let mut out = Vec::with_capacity(params.len());
        for p in params {
            match self.params.get(p) {
                Some(v) => out.push(v),
                None => bail!(
                    "record from {} has no value for parameter '{}'",
                    self.path.display(),
                    p
                ),
            }
        }
        Ok(out)
    }
}
