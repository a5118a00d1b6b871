#![allow(dead_code)]

pub mod file;

use assert_fs::TempDir;
use baseline_diff::{AggregateMismatch, BaselineError, CaseOutcome, DiffFormatOptions};
use rstest::fixture;

/// An empty fixture root with an empty `cases` folder.
#[fixture]
pub fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    file::create_directory(&dir.path().join("cases"));
    dir
}

pub fn plain_diff() -> DiffFormatOptions {
    DiffFormatOptions::default()
}

/// Unwraps the aggregate mismatch a failed `match_baseline` produced.
pub fn expect_mismatch(outcome: &CaseOutcome) -> &AggregateMismatch {
    outcome.mismatch().unwrap_or_else(|| {
        panic!(
            "case '{}' should have failed with a mismatch, got {:?}",
            outcome.name, outcome.result
        )
    })
}

pub fn expect_no_case_found(result: Result<impl std::fmt::Debug, BaselineError>) -> String {
    match result {
        Err(e @ BaselineError::NoCaseFound { .. }) => e.to_string(),
        other => panic!("expected NoCaseFound, got {other:?}"),
    }
}
