//! Explorer settings.
//!
//! The engine only consumes [`ExplorerConfig`]; reading it from a YAML or JSON
//! file is a convenience for the CLI.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Jest's default `testRegex`.
pub const DEFAULT_TEST_REGEX: &str = r"(/__tests__/.*|(\.|/)(test|spec))\.[jt]sx?$";

pub const DEFAULT_RUNNER_LABEL: &str = "Jest";

/// Directory names never descended into during discovery.
pub const IGNORED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Which files count as test files: one regular expression, or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternSet {
    Regex(String),
    Globs(Vec<String>),
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::Regex(DEFAULT_TEST_REGEX.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplorerConfig {
    /// Working directory; identifiers are relative to it.
    pub root: PathBuf,

    #[serde(default)]
    pub test_match: PatternSet,

    #[serde(default = "default_runner_label")]
    pub runner_label: String,
}

fn default_runner_label() -> String {
    DEFAULT_RUNNER_LABEL.to_string()
}

impl ExplorerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            test_match: PatternSet::default(),
            runner_label: default_runner_label(),
        }
    }

    pub fn with_test_match(mut self, test_match: PatternSet) -> Self {
        self.test_match = test_match;
        self
    }

    pub fn with_runner_label(mut self, label: impl Into<String>) -> Self {
        self.runner_label = label.into();
        self
    }

    /// Reads settings from a YAML or JSON file. A relative `root` is resolved
    /// against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::settings_read_error(path, e.to_string()))?;
        let mut config: ExplorerConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::settings_parse_error(path, e.to_string()))?;

        if config.root.is_relative() {
            if let Some(parent) = path.parent() {
                config.root = parent.join(&config.root);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_follow_jest() {
        let config = ExplorerConfig::new("/project");
        assert_eq!(
            config.test_match,
            PatternSet::Regex(DEFAULT_TEST_REGEX.to_string())
        );
        assert_eq!(config.runner_label, "Jest");
    }

    #[test]
    fn test_from_path_yaml_with_globs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("explorer.yaml");
        fs::write(
            &path,
            "root: app\ntest_match:\n  - \"**/*.spec.ts\"\n  - \"**/__tests__/**/*.js\"\nrunner_label: Vitest\n",
        )
        .unwrap();

        let config = ExplorerConfig::from_path(&path).unwrap();

        assert_eq!(config.root, temp_dir.path().join("app"));
        assert_eq!(
            config.test_match,
            PatternSet::Globs(vec![
                "**/*.spec.ts".to_string(),
                "**/__tests__/**/*.js".to_string()
            ])
        );
        assert_eq!(config.runner_label, "Vitest");
    }

    #[test]
    fn test_from_path_json_with_regex() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("explorer.json");
        fs::write(&path, r#"{"root": "/abs/project", "test_match": "\\.test\\.js$"}"#).unwrap();

        let config = ExplorerConfig::from_path(&path).unwrap();

        assert_eq!(config.root, PathBuf::from("/abs/project"));
        assert_eq!(config.test_match, PatternSet::Regex(r"\.test\.js$".to_string()));
        assert_eq!(config.runner_label, DEFAULT_RUNNER_LABEL);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ExplorerConfig::from_path(Path::new("/nonexistent/explorer.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SettingsReadError { .. }));
    }

    #[test]
    fn test_from_path_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("explorer.yaml");
        fs::write(&path, "runner_label: Jest\n").unwrap();

        let err = ExplorerConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::SettingsParseError { .. }));
    }
}
