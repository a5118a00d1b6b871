//! Cases and what a handler sees of them
//!
//! - `case_info`: a discovered case and its derived paths
//! - `filter`: glob, negated glob and regex case selection
//! - `copy`: accepting results as the new baseline
//! - `context`: the per-case handle passed to handlers

pub mod case_info;
pub mod context;
pub mod copy;
pub mod filter;

pub use case_info::{Case, CaseKind};
pub use context::CaseContext;
pub use copy::CopyToBaseline;
pub use filter::CaseFilter;
