//! Baseline ("golden file") testing.
//!
//! A fixture folder holds three trees: `cases` (inputs), `results` (what a
//! handler produced this run) and `baselines` (approved output). [`run`]
//! walks the cases, hands each to a caller-supplied handler, and the handler
//! calls [`CaseContext::match_baseline`] to compare its result tree against
//! the baseline, getting every discrepancy back as one readable diff.
//!
//! - `areas`: the case orchestrator and filesystem helpers
//! - `artifacts`: diffing, tree comparison, cases and reporting
//! - `commands`: running a shell command stored in a case

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::fixture::{Baseline, BaselineOptions, CaseOutcome, RunReport, run, skip};
pub use artifacts::case::{Case, CaseContext, CaseFilter, CaseKind};
pub use artifacts::compare::{AggregateMismatch, Mismatch, TreeComparator};
pub use artifacts::core::{RecordingReporter, ReportEvent, Reporter, TracingReporter};
pub use artifacts::diff::{DiffFormatOptions, render};
pub use errors::BaselineError;
