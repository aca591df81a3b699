//! Load and run lifecycle.
//!
//! Reloads are serialized: a `load` issued while another is in flight waits
//! for it to finish and then explores again, so events from two loads never
//! interleave. Every `LoadStarted` is followed by a `LoadFinished`, also when
//! exploration fails.

use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::discovery::DirectoryExplorer;
use crate::error::Result;
use crate::results::{map_results, Reconciler, ResultTree, RunReport};
use crate::tree::{merge_suites, SuiteNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LifecycleEvent {
    LoadStarted,
    LoadFinished {
        #[serde(skip_serializing_if = "Option::is_none")]
        suite: Option<SuiteNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    RunStarted,
    RunFinished {
        result: ResultTree,
    },
}

#[derive(Default)]
struct LoaderState {
    declarations: Option<SuiteNode>,
    results: Option<SuiteNode>,
    reconciler: Reconciler,
}

pub struct TestLoader {
    explorer: DirectoryExplorer,
    events: mpsc::UnboundedSender<LifecycleEvent>,
    load_lock: Mutex<()>,
    state: Mutex<LoaderState>,
}

impl TestLoader {
    pub fn new(explorer: DirectoryExplorer, events: mpsc::UnboundedSender<LifecycleEvent>) -> Self {
        Self {
            explorer,
            events,
            load_lock: Mutex::new(()),
            state: Mutex::new(LoaderState::default()),
        }
    }

    pub fn channel(explorer: DirectoryExplorer) -> (Self, mpsc::UnboundedReceiver<LifecycleEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(explorer, tx), rx)
    }

    /// Rebuilds the declaration tree from scratch. A failed load keeps the
    /// previous tree.
    pub async fn load(&self) -> Result<SuiteNode> {
        let _guard = self.load_lock.lock().await;
        self.emit(LifecycleEvent::LoadStarted);

        match self.explorer.explore().await {
            Ok(suite) => {
                self.state.lock().await.declarations = Some(suite.clone());
                self.emit(LifecycleEvent::LoadFinished {
                    suite: Some(suite.clone()),
                    error: None,
                });
                Ok(suite)
            }
            Err(e) => {
                warn!(error = %e, "test discovery failed");
                self.emit(LifecycleEvent::LoadFinished {
                    suite: None,
                    error: Some(e.to_string()),
                });
                Err(e)
            }
        }
    }

    /// Rebuilds the result tree for a completed run. Statuses accumulate in
    /// the reconciler across runs; the tree itself only covers this run.
    pub async fn map_run(&self, report: &RunReport) -> ResultTree {
        self.emit(LifecycleEvent::RunStarted);

        let result = {
            let mut state = self.state.lock().await;
            state.reconciler.update(report);
            let result = map_results(
                report,
                self.explorer.root(),
                self.explorer.runner_label(),
                Some(&state.reconciler),
            );
            state.results = Some(result.suite.clone());
            result
        };

        self.emit(LifecycleEvent::RunFinished {
            result: result.clone(),
        });
        result
    }

    /// Declarations first, then results, recomputed on every call.
    pub async fn merged_tree(&self) -> SuiteNode {
        let state = self.state.lock().await;
        let mut merged = SuiteNode::root(self.explorer.runner_label());
        for side in [&state.declarations, &state.results].into_iter().flatten() {
            merged = merge_suites(merged, side.clone());
        }
        merged
    }

    fn emit(&self, event: LifecycleEvent) {
        if self.events.send(event).is_err() {
            debug!("lifecycle receiver dropped");
        }
    }
}
