use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

use super::report::AssertionResult;
use crate::tree::{build_id, Decoration, TestLeaf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    KnownSuccess,
    KnownFail,
    KnownSkip,
    Unknown,
}

/// Run outcome of one test as recorded by a reconciled-results source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledStatus {
    /// Full title: ancestor titles and test title joined by spaces.
    pub title: String,
    pub status: StatusKind,
    pub line: Option<usize>,
    pub terse_message: Option<String>,
}

/// Read-only lookup of reconciled statuses per test file.
///
/// Statuses are borrowed from the source, so per-assertion lookups stay cheap.
/// An empty result means the file has not been run yet; it never removes
/// tests from the tree.
pub trait StatusSource: Send + Sync {
    fn statuses_for(&self, file: &Path) -> &[ReconciledStatus];
}

pub fn resolve_status(
    assertion: &AssertionResult,
    file: &Path,
    source: Option<&dyn StatusSource>,
) -> Option<ReconciledStatus> {
    let source = source?;
    let title = assertion.full_title();
    let resolved = source
        .statuses_for(file)
        .iter()
        .find(|status| status.title == title)
        .cloned();

    if resolved.is_none() {
        trace!(file = %file.display(), title = %title, "no reconciled status");
    }
    resolved
}

/// At most one `{line, message}` decoration for a failed assertion.
pub fn decorations_for(
    assertion: &AssertionResult,
    file: &Path,
    source: Option<&dyn StatusSource>,
) -> Vec<Decoration> {
    let Some(status) = resolve_status(assertion, file, source) else {
        return Vec::new();
    };

    let line = status
        .line
        .or_else(|| assertion.location.map(|location| location.line));

    match (line, status.terse_message) {
        (Some(line), Some(message)) => vec![Decoration { line, message }],
        _ => Vec::new(),
    }
}

/// Builds the test node for one assertion. The reconciled line, when known,
/// replaces the reported location, and `skipped` reflects a known skip only.
pub fn assertion_to_test_node(
    assertion: &AssertionResult,
    file: &Path,
    working_dir: &Path,
    source: Option<&dyn StatusSource>,
) -> TestLeaf {
    let resolved = resolve_status(assertion, file, source);
    let id = build_id(file, working_dir, Some(&assertion.full_title()));

    let line = resolved
        .as_ref()
        .and_then(|status| status.line)
        .or_else(|| assertion.location.map(|location| location.line));
    let skipped = resolved
        .as_ref()
        .is_some_and(|status| status.status == StatusKind::KnownSkip);

    TestLeaf {
        id,
        label: assertion.title.clone(),
        file: file.to_string_lossy().into_owned(),
        line,
        skipped: Some(skipped),
    }
}
