use crate::artifacts::case::case_info::{Case, CaseKind};
use crate::artifacts::case::copy::CopyToBaseline;
use crate::artifacts::compare::TreeComparator;
use crate::errors::BaselineError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a handler needs to run one case and check its output.
#[derive(Debug, Clone)]
pub struct CaseContext {
    case: Arc<Case>,
    comparator: Arc<TreeComparator>,
    copy: CopyToBaseline,
}

impl CaseContext {
    pub fn new(case: Case, comparator: TreeComparator) -> Self {
        let copy = CopyToBaseline::new(case.result_path.clone(), case.baseline_path.clone());

        Self {
            case: Arc::new(case),
            comparator: Arc::new(comparator),
            copy,
        }
    }

    pub fn case(&self) -> &Case {
        &self.case
    }

    pub fn name(&self) -> &str {
        &self.case.name
    }

    pub fn kind(&self) -> CaseKind {
        self.case.kind
    }

    pub fn case_path(&self) -> &Path {
        &self.case.case_path
    }

    pub fn baseline_path(&self) -> &Path {
        &self.case.baseline_path
    }

    pub fn result_path(&self) -> &Path {
        &self.case.result_path
    }

    /// Compares the result against the baseline, failing with
    /// [`BaselineError::Mismatch`] on any difference.
    ///
    /// `target` is relative to the case's result folder for directory cases
    /// and to the results root for file cases; `None` compares the whole case.
    pub async fn match_baseline(&self, target: Option<&str>) -> Result<(), BaselineError> {
        Arc::clone(&self.comparator)
            .compare_async(target.map(PathBuf::from))
            .await
    }

    pub async fn copy_to_baseline(&self, pattern: Option<&str>) -> Result<Vec<PathBuf>, BaselineError> {
        self.copy.copy(pattern).await
    }

    pub async fn skip_copy_to_baseline(
        &self,
        pattern: Option<&str>,
    ) -> Result<Vec<PathBuf>, BaselineError> {
        self.copy.skip(pattern).await
    }
}
