use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, trace, warn};

use super::matcher::IncludeMatcher;
use crate::classifier::classify_file;
use crate::config::{ExplorerConfig, IGNORED_DIRECTORIES};
use crate::error::{ConfigError, IoError, Result};
use crate::parser::DeclarationParser;
use crate::tree::{fold_into_path, merge_forests, SuiteNode, TestNode};

/// Walks a working directory and builds the declaration-side tree.
///
/// Entries of each directory are explored concurrently. Every matching file is
/// parsed, classified and folded into its directory chain; the chains are then
/// merged level by level, so directories without tests never appear.
pub struct DirectoryExplorer {
    root: PathBuf,
    runner_label: String,
    matcher: IncludeMatcher,
    parser: Arc<dyn DeclarationParser>,
}

impl DirectoryExplorer {
    pub fn new(
        config: &ExplorerConfig,
        parser: Arc<dyn DeclarationParser>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            root: config.root.clone(),
            runner_label: config.runner_label.clone(),
            matcher: IncludeMatcher::from_patterns(&config.test_match)?,
            parser,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runner_label(&self) -> &str {
        &self.runner_label
    }

    pub async fn explore(&self) -> Result<SuiteNode> {
        let metadata = fs::metadata(&self.root)
            .await
            .map_err(|_| IoError::directory_not_found(&self.root))?;
        if !metadata.is_dir() {
            return Err(IoError::directory_not_found(&self.root).into());
        }

        debug!(root = %self.root.display(), "exploring test directory");
        let children = self.explore_directory(self.root.clone()).await?;
        let suite = SuiteNode::root(self.runner_label.as_str()).with_children(children);

        info!(
            root = %self.root.display(),
            tests = suite.test_count(),
            "test discovery complete"
        );
        Ok(suite)
    }

    fn explore_directory(&self, dir: PathBuf) -> BoxFuture<'_, Result<Vec<TestNode>>> {
        async move {
            let mut reader = fs::read_dir(&dir)
                .await
                .map_err(|e| IoError::read_dir_error(&dir, e))?;

            let mut entries = Vec::new();
            while let Some(entry) = reader
                .next_entry()
                .await
                .map_err(|e| IoError::read_dir_error(&dir, e))?
            {
                if is_ignored(&entry.file_name().to_string_lossy()) {
                    trace!(path = %entry.path().display(), "skipping ignored entry");
                    continue;
                }
                entries.push(entry.path());
            }
            entries.sort();

            let contributions =
                try_join_all(entries.into_iter().map(|path| self.explore_entry(path))).await?;
            Ok(merge_forests(contributions))
        }
        .boxed()
    }

    async fn explore_entry(&self, path: PathBuf) -> Result<Vec<TestNode>> {
        let file_type = fs::symlink_metadata(&path)
            .await
            .map_err(|e| IoError::read_error(&path, e))?
            .file_type();

        if file_type.is_dir() {
            return self.explore_directory(path).await;
        }
        if !file_type.is_file() || !self.matcher.is_match(&path) {
            return Ok(Vec::new());
        }
        Ok(self.explore_file(path).await?.into_iter().collect())
    }

    async fn explore_file(&self, path: PathBuf) -> Result<Option<TestNode>> {
        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %path.display(), "skipping non-UTF-8 test file");
                return Ok(None);
            }
            Err(e) => return Err(IoError::read_error(&path, e).into()),
        };

        let parser = Arc::clone(&self.parser);
        let parse_path = path.clone();
        let parsed =
            tokio::task::spawn_blocking(move || parser.parse(&parse_path, &source)).await;

        let declarations = match parsed {
            Ok(Ok(declarations)) => declarations,
            Ok(Err(e)) => {
                warn!(path = %path.display(), error = %e, "skipping unparseable test file");
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "parser task failed");
                return Ok(None);
            }
        };

        let nodes = classify_file(&declarations, &path, &self.root);
        if nodes.is_empty() {
            trace!(path = %path.display(), "no tests declared");
            return Ok(None);
        }
        Ok(Some(fold_into_path(&path, &self.root, nodes)))
    }
}

fn is_ignored(name: &str) -> bool {
    IGNORED_DIRECTORIES.contains(&name)
}
