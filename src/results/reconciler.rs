use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::report::{AssertionResult, RunReport};
use super::status::{ReconciledStatus, StatusKind, StatusSource};
use crate::utils::terse_message;

/// In-memory [`StatusSource`] built from a completed run.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    files: HashMap<String, Vec<ReconciledStatus>>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_report(report: &RunReport) -> Self {
        let mut reconciler = Self::new();
        reconciler.update(report);
        reconciler
    }

    /// Replaces the statuses of every file present in `report`; other files keep
    /// what an earlier run recorded.
    pub fn update(&mut self, report: &RunReport) {
        for file in &report.test_results {
            let statuses: Vec<ReconciledStatus> =
                file.assertion_results.iter().map(reconcile).collect();
            debug!(
                file = %file.name.display(),
                statuses = statuses.len(),
                "reconciled file results"
            );
            self.files.insert(key(&file.name), statuses);
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl StatusSource for Reconciler {
    fn statuses_for(&self, file: &Path) -> &[ReconciledStatus] {
        self.files.get(&key(file)).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn status_kind(status: &str) -> StatusKind {
    match status {
        "passed" => StatusKind::KnownSuccess,
        "failed" => StatusKind::KnownFail,
        "pending" | "skipped" | "todo" | "disabled" => StatusKind::KnownSkip,
        _ => StatusKind::Unknown,
    }
}

fn reconcile(assertion: &AssertionResult) -> ReconciledStatus {
    ReconciledStatus {
        title: assertion.full_title(),
        status: status_kind(&assertion.status),
        line: assertion.location.map(|location| location.line),
        terse_message: assertion
            .failure_messages
            .first()
            .and_then(|message| terse_message(message)),
    }
}

fn key(file: &Path) -> String {
    file.to_string_lossy().replace('\\', "/")
}
