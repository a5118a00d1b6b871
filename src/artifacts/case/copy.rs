use crate::areas::workspace::Workspace;
use crate::errors::BaselineError;
use derive_new::new;
use glob::Pattern;
use std::path::{Path, PathBuf};

const DEFAULT_PATTERN: &str = "*";

/// Accepts a case's current result as its new baseline.
#[derive(Debug, Clone, new)]
pub struct CopyToBaseline {
    result_path: PathBuf,
    baseline_path: PathBuf,
}

impl CopyToBaseline {
    /// Copies every result file whose path relative to the result folder
    /// matches `pattern` (default `*`, which also matches across `/`) to the
    /// same place under the baseline folder. A result that is a single file
    /// is matched by its file name. Returns the baseline files written.
    pub async fn copy(&self, pattern: Option<&str>) -> Result<Vec<PathBuf>, BaselineError> {
        let raw = pattern.unwrap_or(DEFAULT_PATTERN);
        let pattern = Pattern::new(raw).map_err(|e| BaselineError::InvalidFilter {
            filter: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !self.result_path.exists() {
            return Ok(Vec::new());
        }

        let mut copied = Vec::new();
        for file in Workspace::new(&self.result_path).list_files()? {
            let (source, target, matched_on) = if file.as_os_str().is_empty() {
                let name = self
                    .result_path
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_default();
                (self.result_path.clone(), self.baseline_path.clone(), name)
            } else {
                (
                    self.result_path.join(&file),
                    self.baseline_path.join(&file),
                    file,
                )
            };

            if !pattern.matches_path(&matched_on) {
                continue;
            }

            Self::copy_file(&source, &target).await?;
            copied.push(target);
        }

        Ok(copied)
    }

    /// Same signature as [`copy`](Self::copy), does nothing.
    pub async fn skip(&self, _pattern: Option<&str>) -> Result<Vec<PathBuf>, BaselineError> {
        Ok(Vec::new())
    }

    async fn copy_file(source: &Path, target: &Path) -> Result<(), BaselineError> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        // a directory-shaped baseline is replaced by the file
        if tokio::fs::metadata(target).await.is_ok_and(|m| m.is_dir()) {
            tokio::fs::remove_dir_all(target).await?;
        }
        tokio::fs::copy(source, target).await?;

        Ok(())
    }
}
