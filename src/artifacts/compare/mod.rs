//! Baseline/result tree comparison
//!
//! - `mismatch`: the closed set of discrepancies and their aggregate error
//! - `snapshot`: modification-time snapshots used to detect stale output
//! - `tree_compare`: the recursive baseline-versus-result walk

pub mod mismatch;
pub mod snapshot;
pub mod tree_compare;

pub use mismatch::{AggregateMismatch, Mismatch};
pub use snapshot::ResultSnapshot;
pub use tree_compare::TreeComparator;
