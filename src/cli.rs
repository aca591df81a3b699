use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Component, Path, PathBuf};

use crate::config::{ExplorerConfig, PatternSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    Json,
    /// Single-line JSON
    Compact,
}

#[derive(Parser, Debug)]
#[command(name = "test-explorer")]
#[command(about = "Test explorer - build a merged test tree from test files and Jest results", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE", global = true)]
    pub output_file: Option<PathBuf>,

    /// Output format (json, compact)
    #[arg(short = 'f', long, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover tests by parsing test files under the working directory
    Discover(DiscoverArgs),
    /// Map a Jest JSON report onto the test tree
    Results(ResultsArgs),
    /// Translate selected test identifiers into Jest include patterns
    Filter(FilterArgs),
}

/// Settings shared by every command that walks the working directory.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExplorerArgs {
    /// Working directory (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Settings file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Regular expression selecting test files
    #[arg(long, value_name = "REGEX", conflicts_with = "test_match")]
    pub test_regex: Option<String>,

    /// Glob selecting test files. Can be specified multiple times.
    #[arg(long, value_name = "GLOB")]
    pub test_match: Vec<String>,

    /// Label of the root node
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub explorer: ExplorerArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ResultsArgs {
    /// Jest JSON report (`jest --json --outputFile=...`)
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Also discover declared tests and merge them with the results
    #[arg(long)]
    pub merge: bool,

    #[command(flatten)]
    pub explorer: ExplorerArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Selected test, file or directory identifiers
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Print Jest command-line arguments instead of JSON
    #[arg(long)]
    pub cli_args: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Discover(discover) => discover.explorer.validate(),
            Command::Results(results) => {
                validate_path(&results.report)?;
                results.explorer.validate()
            }
            Command::Filter(_) => Ok(()),
        }
    }
}

impl ExplorerArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            validate_path(root)?;
        }
        if let Some(config) = &self.config {
            if !config.is_file() {
                anyhow::bail!("Settings file does not exist: {}", config.display());
            }
        }
        Ok(())
    }

    /// Builds the explorer settings: the settings file first, then flags on top.
    /// The root is made absolute so result paths can be stripped against it.
    pub fn to_config(&self) -> Result<ExplorerConfig> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::from_path(path)?,
            None => ExplorerConfig::new("."),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(regex) = &self.test_regex {
            config.test_match = PatternSet::Regex(regex.clone());
        } else if !self.test_match.is_empty() {
            config.test_match = PatternSet::Globs(self.test_match.clone());
        }
        if let Some(label) = &self.label {
            config.runner_label = label.clone();
        }

        config.root = absolute_root(&config.root)?;
        Ok(config)
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(root)
        .with_context(|| format!("Cannot resolve root: {}", root.display()))?;
    Ok(absolute
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect())
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else if path.is_dir() {
        std::fs::metadata(path)
            .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    } else {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }

    Ok(())
}
