use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::title_path;
use crate::error::ReportError;

/// The subset of a Jest `--json` report the explorer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    #[serde(default)]
    pub test_results: Vec<FileResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    /// Absolute path of the test file.
    pub name: PathBuf,
    #[serde(default)]
    pub assertion_results: Vec<AssertionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResult {
    #[serde(default)]
    pub ancestor_titles: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub failure_messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    #[serde(default)]
    pub column: usize,
}

impl RunReport {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json).map_err(|e| ReportError::malformed(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ReportError::read_error(path, e))?;
        Self::from_json(&content)
    }

    pub fn file(&self, path: &Path) -> Option<&FileResult> {
        self.test_results.iter().find(|result| result.name.as_path() == path)
    }
}

impl AssertionResult {
    pub fn new(ancestor_titles: &[&str], title: &str) -> Self {
        let ancestors: Vec<String> = ancestor_titles.iter().map(|t| t.to_string()).collect();
        let full_name = title_path(&ancestors.join(" "), title);
        Self {
            ancestor_titles: ancestors,
            title: title.to_string(),
            full_name,
            status: String::new(),
            location: None,
            failure_messages: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.location = Some(Location { line, column: 1 });
        self
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure_messages.push(message.to_string());
        self
    }

    /// Ancestor titles and the test title joined by single spaces. Reports
    /// without `fullName` fall back to rebuilding it.
    pub fn full_title(&self) -> String {
        if self.full_name.is_empty() {
            title_path(&self.ancestor_titles.join(" "), &self.title)
        } else {
            self.full_name.clone()
        }
    }
}
