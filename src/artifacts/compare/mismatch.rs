use crate::artifacts::diff::{DiffFormatOptions, render};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// One discrepancy between a baseline tree and a result tree.
///
/// Every variant carries the raw content it was built from and the diff
/// rendered at construction, so rendering the mismatch later is a pure
/// string operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Both sides have the file and the contents differ.
    MismatchFile {
        actual_path: PathBuf,
        actual: String,
        expected_path: PathBuf,
        expected: String,
        diff: String,
    },
    /// The baseline has the file, the result does not. `path` is where the
    /// result was expected.
    MissingResultFile {
        path: PathBuf,
        baseline: String,
        diff: String,
    },
    /// The result has a file the baseline does not.
    ExtraResultFile {
        path: PathBuf,
        result: String,
        diff: String,
    },
}

impl Mismatch {
    pub fn mismatch_file(
        actual_path: &Path,
        actual: String,
        expected_path: &Path,
        expected: String,
        options: &DiffFormatOptions,
    ) -> Self {
        let diff = render(&expected, &actual, options);

        Mismatch::MismatchFile {
            actual_path: actual_path.to_path_buf(),
            actual,
            expected_path: expected_path.to_path_buf(),
            expected,
            diff,
        }
    }

    pub fn missing_result_file(path: &Path, baseline: String, options: &DiffFormatOptions) -> Self {
        let diff = render(&baseline, "", options);

        Mismatch::MissingResultFile {
            path: path.to_path_buf(),
            baseline,
            diff,
        }
    }

    pub fn extra_result_file(path: &Path, result: String, options: &DiffFormatOptions) -> Self {
        let diff = render("", &result, options);

        Mismatch::ExtraResultFile {
            path: path.to_path_buf(),
            result,
            diff,
        }
    }

    /// The result-side path this mismatch is about.
    pub fn path(&self) -> &Path {
        match self {
            Mismatch::MismatchFile { actual_path, .. } => actual_path,
            Mismatch::MissingResultFile { path, .. } | Mismatch::ExtraResultFile { path, .. } => {
                path
            }
        }
    }

    pub fn diff(&self) -> &str {
        match self {
            Mismatch::MismatchFile { diff, .. }
            | Mismatch::MissingResultFile { diff, .. }
            | Mismatch::ExtraResultFile { diff, .. } => diff,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Mismatch::MismatchFile {
                actual_path,
                expected_path,
                ..
            } => format!(
                "File '{}' does not match with '{}'.",
                actual_path.display(),
                expected_path.display()
            ),
            Mismatch::MissingResultFile { path, .. } => {
                format!("Missing result file '{}'.", path.display())
            }
            Mismatch::ExtraResultFile { path, .. } => {
                format!("Extra result file '{}'.", path.display())
            }
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\n{}", self.summary(), self.diff())
    }
}

/// Every mismatch found by one comparison, in traversal order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateMismatch {
    items: Vec<Mismatch>,
}

impl AggregateMismatch {
    pub fn from_items(items: Vec<Mismatch>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn items(&self) -> &[Mismatch] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Mismatch> {
        self.items
    }
}

impl Display for AggregateMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        write!(f, "Mismatch detected: \n{rendered}")
    }
}

impl std::error::Error for AggregateMismatch {}
