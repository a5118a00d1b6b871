//! Core utilities and shared types
//!
//! This module contains the logging capability threaded through the
//! orchestrator and the comparator, and the events it carries.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Something worth telling the user about during a run.
///
/// `Display` gives the human-readable message; the fields stay available to
/// reporters that log them individually.
#[derive(Debug)]
pub enum ReportEvent<'e> {
    CaseFiltered {
        case: &'e str,
        base_path: &'e Path,
    },
    CaseFailed {
        case: &'e str,
        error: &'e anyhow::Error,
    },
    StaleFileRemoved {
        path: &'e Path,
    },
    Compared {
        baseline: &'e Path,
        result: &'e Path,
        elapsed: Duration,
    },
}

impl Display for ReportEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportEvent::CaseFiltered { case, base_path } => write!(
                f,
                "case '{}' in '{}' is filtered and not executed",
                case,
                base_path.display()
            ),
            ReportEvent::CaseFailed { case, error } => {
                write!(f, "case '{case}' failed: {error:#}")
            }
            ReportEvent::StaleFileRemoved { path } => {
                write!(f, "removed stale result file {}", path.display())
            }
            ReportEvent::Compared {
                baseline,
                result,
                elapsed,
            } => write!(
                f,
                "comparing {} and {} took {} ms",
                baseline.display(),
                result.display(),
                elapsed.as_millis()
            ),
        }
    }
}

/// Sink for the diagnostics a run produces.
///
/// The orchestrator and every comparator receive one at construction instead
/// of reaching for a process-wide logger, so a test can observe exactly what
/// a run reported.
pub trait Reporter: Send + Sync {
    fn warn(&self, event: &ReportEvent<'_>);
    fn debug(&self, event: &ReportEvent<'_>);
}

/// Forwards to the `tracing` macros, one field per event attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

macro_rules! trace_event {
    ($level:ident, $event:expr) => {
        match $event {
            ReportEvent::CaseFiltered { case, base_path } => tracing::$level!(
                target: "baseline_diff",
                case = %case,
                base_path = %base_path.display(),
                "case filtered and not executed"
            ),
            ReportEvent::CaseFailed { case, error } => tracing::$level!(
                target: "baseline_diff",
                case = %case,
                error = ?error,
                "case failed"
            ),
            ReportEvent::StaleFileRemoved { path } => tracing::$level!(
                target: "baseline_diff",
                path = %path.display(),
                "removed stale result file"
            ),
            ReportEvent::Compared {
                baseline,
                result,
                elapsed,
            } => tracing::$level!(
                target: "baseline_diff",
                baseline = %baseline.display(),
                result = %result.display(),
                elapsed_ms = elapsed.as_millis() as u64,
                "compared result against baseline"
            ),
        }
    };
}

impl Reporter for TracingReporter {
    fn warn(&self, event: &ReportEvent<'_>) {
        trace_event!(warn, event);
    }

    fn debug(&self, event: &ReportEvent<'_>) {
        trace_event!(debug, event);
    }
}

/// Keeps every warning in memory as its message; debug events are dropped.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    warnings: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .map(|warnings| warnings.clone())
            .unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn warn(&self, event: &ReportEvent<'_>) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(event.to_string());
        }
    }

    fn debug(&self, _event: &ReportEvent<'_>) {}
}

pub fn default_reporter() -> Arc<dyn Reporter> {
    Arc::new(TracingReporter)
}
