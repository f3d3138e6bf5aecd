//! Calendar extraction for the imsakia converter.
//!
//! This crate reads the schedule workbook, projects its rows onto
//! [`DayRecord`](imsakia_shared::DayRecord)s and writes them as a JSON array
//! (see [`pipeline::convert`]).

pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod workbook;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use pipeline::{ConvertResult, ProgressReporter, SilentProgress, convert};
