use crate::areas::workspace::Workspace;
use crate::artifacts::compare::mismatch::{AggregateMismatch, Mismatch};
use crate::artifacts::compare::snapshot::ResultSnapshot;
use crate::artifacts::core::{ReportEvent, Reporter};
use crate::artifacts::diff::DiffFormatOptions;
use crate::errors::BaselineError;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Missing,
    File,
    Directory,
}

impl Node {
    fn probe(path: &Path) -> std::io::Result<Self> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(Node::Directory),
            Ok(_) => Ok(Node::File),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Node::Missing),
            Err(e) => Err(e),
        }
    }
}

/// Compares a result tree against its baseline tree for one case.
///
/// The result tree is snapshotted when the comparator is built. Every
/// comparison first deletes files that are still byte-for-byte untouched
/// since that snapshot, so output left behind by an earlier run or another
/// case sharing the same result root never counts as this case's output.
pub struct TreeComparator {
    baseline_root: PathBuf,
    result_root: PathBuf,
    default_target: PathBuf,
    excluded: Vec<PathBuf>,
    options: DiffFormatOptions,
    snapshot: ResultSnapshot,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for TreeComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeComparator")
            .field("baseline_root", &self.baseline_root)
            .field("result_root", &self.result_root)
            .field("default_target", &self.default_target)
            .field("excluded", &self.excluded)
            .field("snapshot", &self.snapshot.len())
            .finish()
    }
}

impl TreeComparator {
    /// `default_target` is what `compare(None)` compares, relative to both
    /// roots; an empty path means the roots themselves.
    pub fn new(
        baseline_root: impl Into<PathBuf>,
        result_root: impl Into<PathBuf>,
        default_target: impl Into<PathBuf>,
        options: DiffFormatOptions,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, BaselineError> {
        Self::with_excluded(
            baseline_root,
            result_root,
            default_target,
            Vec::new(),
            options,
            reporter,
        )
    }

    /// A comparator whose result root contains paths owned by someone else.
    ///
    /// Files at or below an `excluded` path are never snapshotted, so
    /// [`purge_stale`](Self::purge_stale) cannot delete them.
    pub fn with_excluded(
        baseline_root: impl Into<PathBuf>,
        result_root: impl Into<PathBuf>,
        default_target: impl Into<PathBuf>,
        excluded: Vec<PathBuf>,
        options: DiffFormatOptions,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, BaselineError> {
        let result_root = result_root.into();
        let snapshot = ResultSnapshot::capture_excluding(&result_root, &excluded)?;

        Ok(Self {
            baseline_root: baseline_root.into(),
            result_root,
            default_target: default_target.into(),
            excluded,
            options,
            snapshot,
            reporter,
        })
    }

    pub fn baseline_root(&self) -> &Path {
        &self.baseline_root
    }

    pub fn result_root(&self) -> &Path {
        &self.result_root
    }

    /// Deletes result files nobody rewrote since construction.
    pub fn purge_stale(&self) -> Result<Vec<PathBuf>, BaselineError> {
        let current = ResultSnapshot::capture_excluding(&self.result_root, &self.excluded)?;
        let stale = self.snapshot.unchanged_in(&current);

        for path in &stale {
            std::fs::remove_file(path)?;
            self.reporter.debug(&ReportEvent::StaleFileRemoved { path });
        }

        Ok(stale)
    }

    /// Purges stale output, then compares `baseline_root/target` with
    /// `result_root/target`.
    pub fn compare(&self, target: Option<&Path>) -> Result<(), BaselineError> {
        self.purge_stale()?;

        let target = target.unwrap_or(&self.default_target);
        let (baseline, result) = if target.as_os_str().is_empty() {
            (self.baseline_root.clone(), self.result_root.clone())
        } else {
            (self.baseline_root.join(target), self.result_root.join(target))
        };

        let started = Instant::now();
        let mismatches = self.collect_mismatches(&baseline, &result)?;
        self.reporter.debug(&ReportEvent::Compared {
            baseline: &baseline,
            result: &result,
            elapsed: started.elapsed(),
        });

        match AggregateMismatch::from_items(mismatches) {
            Some(aggregate) => Err(aggregate.into()),
            None => Ok(()),
        }
    }

    /// Runs `compare` on the blocking pool.
    pub async fn compare_async(self: Arc<Self>, target: Option<PathBuf>) -> Result<(), BaselineError> {
        tokio::task::spawn_blocking(move || self.compare(target.as_deref())).await?
    }

    /// Every mismatch between two paths, in name order at each level.
    ///
    /// Only the two roots being absent at once is an error; any other absence
    /// turns into missing or extra files.
    pub fn collect_mismatches(
        &self,
        baseline: &Path,
        result: &Path,
    ) -> Result<Vec<Mismatch>, BaselineError> {
        if Node::probe(baseline)? == Node::Missing && Node::probe(result)? == Node::Missing {
            return Err(std::io::Error::new(
                ErrorKind::NotFound,
                format!(
                    "neither '{}' nor '{}' exists",
                    baseline.display(),
                    result.display()
                ),
            )
            .into());
        }

        let mut mismatches = Vec::new();
        self.walk(baseline, result, &mut mismatches)?;

        Ok(mismatches)
    }

    fn walk(
        &self,
        baseline: &Path,
        result: &Path,
        mismatches: &mut Vec<Mismatch>,
    ) -> Result<(), BaselineError> {
        match (Node::probe(baseline)?, Node::probe(result)?) {
            (Node::Missing, Node::Missing) => {}
            (Node::File, Node::File) => {
                let expected = std::fs::read(baseline)?;
                let actual = std::fs::read(result)?;

                if expected != actual {
                    mismatches.push(Mismatch::mismatch_file(
                        result,
                        String::from_utf8_lossy(&actual).into_owned(),
                        baseline,
                        String::from_utf8_lossy(&expected).into_owned(),
                        &self.options,
                    ));
                }
            }
            (Node::Directory, Node::Directory) => {
                let names = Workspace::new(baseline)
                    .list_dir()?
                    .into_iter()
                    .chain(Workspace::new(result).list_dir()?)
                    .collect::<BTreeSet<_>>();

                for name in names {
                    self.walk(&baseline.join(&name), &result.join(&name), mismatches)?;
                }
            }
            (baseline_node, result_node) => {
                if baseline_node != Node::Missing {
                    self.report_missing(baseline, result, mismatches)?;
                }
                if result_node != Node::Missing {
                    self.report_extra(result, mismatches)?;
                }
            }
        }

        Ok(())
    }

    fn report_missing(
        &self,
        baseline: &Path,
        result: &Path,
        mismatches: &mut Vec<Mismatch>,
    ) -> Result<(), BaselineError> {
        let workspace = Workspace::new(baseline);

        for file in workspace.list_files()? {
            let missing_path = if file.as_os_str().is_empty() {
                result.to_path_buf()
            } else {
                result.join(&file)
            };
            mismatches.push(Mismatch::missing_result_file(
                &missing_path,
                workspace.read_file(&file)?,
                &self.options,
            ));
        }

        Ok(())
    }

    fn report_extra(&self, result: &Path, mismatches: &mut Vec<Mismatch>) -> Result<(), BaselineError> {
        let workspace = Workspace::new(result);

        for file in workspace.list_files()? {
            let extra_path = if file.as_os_str().is_empty() {
                result.to_path_buf()
            } else {
                result.join(&file)
            };
            mismatches.push(Mismatch::extra_result_file(
                &extra_path,
                workspace.read_file(&file)?,
                &self.options,
            ));
        }

        Ok(())
    }
}
