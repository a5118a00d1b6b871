//! Filesystem-facing building blocks
//!
//! - `fixture`: the case orchestrator over a `cases/results/baselines` layout
//! - `workspace`: folder listing, reading and reset helpers

pub mod fixture;
pub mod workspace;
