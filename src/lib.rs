//! Test Explorer Core
//!
//! Builds a single path-addressable test tree for a JavaScript/TypeScript
//! project from two sources: test declarations parsed with Tree-sitter, and
//! the results of a completed Jest run. Both sides share one identifier
//! scheme, so they merge node by node.
pub mod classifier;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod logging;
pub mod output;
pub mod parser;
pub mod results;
pub mod tree;
pub mod utils;

pub use config::ExplorerConfig;
pub use discovery::DirectoryExplorer;
pub use error::{Error, Result};
pub use filter::{map_test_ids_to_test_filter, TestFilter};
pub use lifecycle::{LifecycleEvent, TestLoader};
pub use results::{map_results, ResultTree, RunReport};
pub use tree::{SuiteNode, TestLeaf, TestNode};
