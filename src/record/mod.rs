//! Parsed benchmark records: parameters taken from a log file name plus the
//! single outcome reported inside the log.

pub mod row;
pub mod value;

pub use row::{Dataset, Record};
pub use value::{Outcome, ParamValue, fmt_float};
