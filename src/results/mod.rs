//! Result-side adapter: turns a completed run into a [`SuiteNode`] tree plus
//! per-test decorations.

pub mod grouper;
pub mod reconciler;
pub mod report;
pub mod status;

pub use grouper::{group_assertions, map_file_results};
pub use reconciler::Reconciler;
pub use report::{AssertionResult, FileResult, Location, RunReport};
pub use status::{
    assertion_to_test_node, decorations_for, resolve_status, ReconciledStatus, StatusKind,
    StatusSource,
};

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::tree::{build_id, merge_nodes, Decoration, SuiteNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDecorations {
    /// Identifier of the decorated test.
    pub test: String,
    pub decorations: Vec<Decoration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTree {
    pub suite: SuiteNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<TestDecorations>,
}

/// Builds the result-side tree for a whole run under a fresh root.
pub fn map_results(
    report: &RunReport,
    working_dir: &Path,
    runner_label: &str,
    source: Option<&dyn StatusSource>,
) -> ResultTree {
    let mut root = SuiteNode::root(runner_label);
    let mut decorations = Vec::new();

    for file in &report.test_results {
        let path = file.name.as_path();
        if let Some(node) = map_file_results(path, working_dir, &file.assertion_results, source) {
            merge_nodes(&mut root.children, vec![node]);
        }

        for assertion in &file.assertion_results {
            let found = decorations_for(assertion, path, source);
            if !found.is_empty() {
                decorations.push(TestDecorations {
                    test: build_id(path, working_dir, Some(&assertion.full_title())),
                    decorations: found,
                });
            }
        }
    }

    info!(
        files = report.test_results.len(),
        tests = root.test_count(),
        decorated = decorations.len(),
        "mapped run results"
    );

    ResultTree {
        suite: root,
        decorations,
    }
}
