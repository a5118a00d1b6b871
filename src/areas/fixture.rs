use crate::areas::workspace::{Workspace, ensure_folder_empty, ensure_folder_exist, is_hidden};
use crate::artifacts::case::{Case, CaseContext, CaseFilter, CaseKind};
use crate::artifacts::compare::{AggregateMismatch, TreeComparator};
use crate::artifacts::core::{ReportEvent, Reporter, default_reporter};
use crate::artifacts::diff::DiffFormatOptions;
use crate::errors::BaselineError;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BaselineOptions {
    /// Fixture root holding the cases, results and baselines folders.
    pub base_path: PathBuf,
    pub cases_folder: String,
    pub results_folder: String,
    pub baselines_folder: String,
    pub filter: Option<CaseFilter>,
    /// Don't warn about cases the filter excluded.
    pub suppress_filter_warnings: bool,
    /// Start every case at once instead of one after another.
    pub parallel: bool,
    pub diff: DiffFormatOptions,
}

impl Default for BaselineOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("fixtures"),
            cases_folder: "cases".to_string(),
            results_folder: "results".to_string(),
            baselines_folder: "baselines".to_string(),
            filter: None,
            suppress_filter_warnings: false,
            parallel: false,
            diff: DiffFormatOptions::default(),
        }
    }
}

impl From<&str> for BaselineOptions {
    fn from(base_path: &str) -> Self {
        PathBuf::from(base_path).into()
    }
}

impl From<&Path> for BaselineOptions {
    fn from(base_path: &Path) -> Self {
        base_path.to_path_buf().into()
    }
}

impl From<PathBuf> for BaselineOptions {
    fn from(base_path: PathBuf) -> Self {
        Self {
            base_path,
            ..Default::default()
        }
    }
}

impl BaselineOptions {
    pub fn with_filter(mut self, filter: CaseFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_folders(mut self, cases: &str, results: &str, baselines: &str) -> Self {
        self.cases_folder = cases.to_string();
        self.results_folder = results.to_string();
        self.baselines_folder = baselines.to_string();
        self
    }

    pub fn with_suppressed_filter_warnings(mut self) -> Self {
        self.suppress_filter_warnings = true;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_diff(mut self, diff: DiffFormatOptions) -> Self {
        self.diff = diff;
        self
    }

    pub fn cases_root(&self) -> PathBuf {
        self.base_path.join(&self.cases_folder)
    }

    pub fn results_root(&self) -> PathBuf {
        self.base_path.join(&self.results_folder)
    }

    pub fn baselines_root(&self) -> PathBuf {
        self.base_path.join(&self.baselines_folder)
    }
}

/// How one case's handler finished.
#[derive(Debug)]
pub struct CaseOutcome {
    pub name: String,
    pub result: anyhow::Result<()>,
}

impl CaseOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The comparison failure behind this outcome, if that is what failed it.
    pub fn mismatch(&self) -> Option<&AggregateMismatch> {
        self.result
            .as_ref()
            .err()
            .and_then(|e| e.downcast_ref::<BaselineError>())
            .and_then(BaselineError::as_mismatch)
    }
}

/// Outcomes of every executed case, in case order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn names(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn into_result(self) -> anyhow::Result<()> {
        let total = self.outcomes.len();
        let failures = self
            .outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.err().map(|e| (outcome.name, e)))
            .collect::<Vec<_>>();

        if failures.is_empty() {
            return Ok(());
        }

        let details = failures
            .iter()
            .map(|(name, e)| format!("case '{name}': {e:#}"))
            .collect::<Vec<_>>()
            .join("\n");

        anyhow::bail!("{} of {} cases failed\n{}", failures.len(), total, details)
    }
}

/// Iterates the cases of a `cases/results/baselines` fixture.
pub struct Baseline {
    options: BaselineOptions,
    reporter: Arc<dyn Reporter>,
}

impl Baseline {
    pub fn new(options: impl Into<BaselineOptions>) -> Self {
        Self {
            options: options.into(),
            reporter: default_reporter(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn options(&self) -> &BaselineOptions {
        &self.options
    }

    /// Lists the cases that will run and makes sure the results and
    /// baselines roots exist.
    ///
    /// Hidden entries are skipped silently; entries the filter rejects are
    /// reported once each unless warnings are suppressed.
    pub fn prepare_cases(&self) -> Result<Vec<Case>, BaselineError> {
        let options = &self.options;
        if !options.base_path.exists() {
            return Err(BaselineError::no_case_found(&options.base_path));
        }

        let cases_root = Workspace::new(options.cases_root());
        if !cases_root.exists() {
            return Err(BaselineError::no_case_found(cases_root.path()));
        }

        let names = cases_root
            .list_dir()?
            .into_iter()
            .filter(|name| !is_hidden(name))
            .filter(|name| {
                let included = options.filter.as_ref().is_none_or(|f| f.matches(name));
                if !included && !options.suppress_filter_warnings {
                    self.reporter.warn(&ReportEvent::CaseFiltered {
                        case: name,
                        base_path: &options.base_path,
                    });
                }
                included
            })
            .collect::<Vec<_>>();

        if names.is_empty() {
            return Err(BaselineError::no_case_found(cases_root.path()));
        }

        let results_root = options.results_root();
        let baselines_root = options.baselines_root();
        ensure_folder_exist(&results_root)?;
        ensure_folder_exist(&baselines_root)?;

        names
            .iter()
            .map(|name| {
                Case::discover(name, cases_root.path(), &baselines_root, &results_root)
                    .map_err(BaselineError::from)
            })
            .collect()
    }

    /// Resets the case's folders and builds its comparator.
    ///
    /// Directory cases get a pristine result folder. File cases share the
    /// results root, so nothing is cleared for them; the comparator's
    /// snapshot of that root keeps other output out of the comparison.
    /// `claimed` holds the result path of every case in the run: a file
    /// case never snapshots, and so never purges, another case's path.
    pub fn prepare_context(
        &self,
        case: Case,
        claimed: &[PathBuf],
    ) -> Result<CaseContext, BaselineError> {
        let comparator = match case.kind {
            CaseKind::Directory => {
                ensure_folder_empty(&case.result_path)?;
                ensure_folder_exist(&case.baseline_path)?;
                TreeComparator::new(
                    &case.baseline_path,
                    &case.result_path,
                    "",
                    self.options.diff,
                    Arc::clone(&self.reporter),
                )?
            }
            CaseKind::File => TreeComparator::with_excluded(
                self.options.baselines_root(),
                self.options.results_root(),
                &case.name,
                claimed
                    .iter()
                    .filter(|path| **path != case.result_path)
                    .cloned()
                    .collect(),
                self.options.diff,
                Arc::clone(&self.reporter),
            )?,
        };

        Ok(CaseContext::new(case, comparator))
    }

    /// Runs `handler` once per case.
    ///
    /// Fails before any handler runs when no case can be found. Otherwise
    /// every case's failure, a mismatch or anything else its handler
    /// returned, is kept in that case's outcome.
    pub async fn run<F, Fut>(&self, handler: F) -> Result<RunReport, BaselineError>
    where
        F: Fn(CaseContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let cases = self.prepare_cases()?;
        let claimed = cases
            .iter()
            .map(|case| case.result_path.clone())
            .collect::<Vec<_>>();

        let outcomes = if self.options.parallel {
            // every reset and snapshot happens before the first handler starts
            let prepared = cases
                .into_iter()
                .map(|case| (case.name.clone(), self.prepare_context(case, &claimed)))
                .collect::<Vec<_>>();
            let units = prepared
                .into_iter()
                .map(|(name, context)| self.run_case(name, context, &handler));
            futures::future::join_all(units).await
        } else {
            let mut outcomes = Vec::new();
            for case in cases {
                let name = case.name.clone();
                let context = self.prepare_context(case, &claimed);
                outcomes.push(self.run_case(name, context, &handler).await);
            }
            outcomes
        };

        Ok(RunReport { outcomes })
    }

    /// Same shape as [`run`](Self::run); runs nothing.
    pub async fn skip<F, Fut>(&self, _handler: F) -> Result<RunReport, BaselineError>
    where
        F: Fn(CaseContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        Ok(RunReport::default())
    }

    async fn run_case<F, Fut>(
        &self,
        name: String,
        context: Result<CaseContext, BaselineError>,
        handler: &F,
    ) -> CaseOutcome
    where
        F: Fn(CaseContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let result = match context {
            Ok(context) => handler(context).await,
            Err(e) => Err(e.into()),
        };

        if let Err(error) = &result {
            self.reporter.debug(&ReportEvent::CaseFailed {
                case: &name,
                error,
            });
        }

        CaseOutcome { name, result }
    }
}

pub async fn run<F, Fut>(
    options: impl Into<BaselineOptions>,
    handler: F,
) -> Result<RunReport, BaselineError>
where
    F: Fn(CaseContext) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    Baseline::new(options).run(handler).await
}

pub async fn skip<F, Fut>(
    options: impl Into<BaselineOptions>,
    handler: F,
) -> Result<RunReport, BaselineError>
where
    F: Fn(CaseContext) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    Baseline::new(options).skip(handler).await
}
