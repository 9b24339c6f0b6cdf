//! # sessreport-core
//!
//! Statistics and report assembly for sessreport.
//!
//! A run has three phases: the input is read into memory, transformed
//! ([`process`]), and the finished [`Report`] is written once
//! ([`write_report`]). [`Pipeline`] drives all three.

mod dates;
mod error;
mod pipeline;
mod report;
pub mod stats;
mod writer;

pub use dates::{iso_date, parse_date};
pub use error::ReportError;
pub use pipeline::{process, Pipeline};
pub use report::{build_report, Report, UsersStats};
pub use stats::{GlobalMetric, GlobalStats, UserMetric, UserStats};
pub use writer::{render, write_report};
