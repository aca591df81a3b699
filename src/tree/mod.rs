//! Canonical test tree shared by the declaration and result adapters.
//!
//! Both sides produce [`TestNode`] forests; they are combined with [`merge_nodes`]
//! and wrapped in a [`SuiteNode::root`] before being handed to a host.

pub mod folder;
pub mod id;
pub mod merge;

pub use folder::fold_into_path;
pub use id::{build_id, relative_path, ROOT_ID, SEPARATOR};
pub use merge::{merge_forests, merge_nodes, merge_suites};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TestNode {
    Suite(SuiteNode),
    Test(TestLeaf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteNode {
    pub id: String,
    pub label: String,
    /// Absent for synthetic directory suites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default)]
    pub children: Vec<TestNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLeaf {
    pub id: String,
    pub label: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
}

/// A `{line, message}` annotation attached to a test after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub line: usize,
    pub message: String,
}

impl TestNode {
    pub fn id(&self) -> &str {
        match self {
            TestNode::Suite(suite) => &suite.id,
            TestNode::Test(test) => &test.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TestNode::Suite(suite) => &suite.label,
            TestNode::Test(test) => &test.label,
        }
    }

    pub fn as_suite(&self) -> Option<&SuiteNode> {
        match self {
            TestNode::Suite(suite) => Some(suite),
            TestNode::Test(_) => None,
        }
    }

    pub fn as_test(&self) -> Option<&TestLeaf> {
        match self {
            TestNode::Test(test) => Some(test),
            TestNode::Suite(_) => None,
        }
    }
}

impl SuiteNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            file: None,
            line: None,
            children: Vec::new(),
        }
    }

    /// The top of every emitted tree.
    pub fn root(runner_label: impl Into<String>) -> Self {
        Self::new(ROOT_ID, runner_label)
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn with_children(mut self, children: Vec<TestNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first lookup among descendants by identifier.
    pub fn find(&self, id: &str) -> Option<&TestNode> {
        self.children.iter().find_map(|child| {
            if child.id() == id {
                return Some(child);
            }
            child.as_suite().and_then(|suite| suite.find(id))
        })
    }

    /// Every identifier below this suite, in depth-first order.
    pub fn descendant_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for child in &self.children {
            ids.push(child.id().to_string());
            if let TestNode::Suite(suite) = child {
                ids.extend(suite.descendant_ids());
            }
        }
        ids
    }

    pub fn test_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                TestNode::Suite(suite) => suite.test_count(),
                TestNode::Test(_) => 1,
            })
            .sum()
    }
}

impl TestLeaf {
    pub fn new(id: impl Into<String>, label: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            file: file.into(),
            line: None,
            skipped: None,
        }
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl From<SuiteNode> for TestNode {
    fn from(suite: SuiteNode) -> Self {
        TestNode::Suite(suite)
    }
}

impl From<TestLeaf> for TestNode {
    fn from(test: TestLeaf) -> Self {
        TestNode::Test(test)
    }
}
