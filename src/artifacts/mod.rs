//! Data structures and algorithms
//!
//! - `case`: discovered cases, filters and handler contexts
//! - `compare`: baseline-versus-result tree comparison and the mismatch taxonomy
//! - `core`: shared utilities (the reporting capability)
//! - `diff`: Myers' diff, word/line segmentation and bounded rendering

pub mod case;
pub mod compare;
pub mod core;
pub mod diff;
