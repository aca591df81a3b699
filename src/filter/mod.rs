//! Turns identifiers selected in a host back into runner include patterns.

use serde::Serialize;
use tracing::debug;

use crate::tree::id::split_id;
use crate::tree::{ROOT_ID, SEPARATOR};

/// Runner-level include patterns: Jest's `--testPathPattern` and `--testNamePattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFilter {
    pub test_file_pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_name_pattern: Option<String>,
}

impl TestFilter {
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "--testPathPattern".to_string(),
            self.test_file_pattern.clone(),
        ];
        if let Some(name) = &self.test_name_pattern {
            args.push("--testNamePattern".to_string());
            args.push(name.clone());
        }
        args
    }
}

/// Maps a homogeneous selection of identifiers to a [`TestFilter`].
///
/// Returns `None` (run everything) for an empty selection or one containing
/// `"root"`. The first identifier decides the mode:
///
/// * it contains [`SEPARATOR`]: every identifier is read as a test. File parts
///   form the file pattern and title parts, already anchored regexes, form the
///   name pattern.
/// * otherwise every identifier is read as a file or directory path and only a
///   file pattern is produced.
///
/// Callers are expected to pass either only tests or only files and
/// directories. A mixed selection is not rejected: in test mode a path
/// identifier narrows the files but adds no name pattern, and in path mode a
/// test identifier becomes a path pattern that matches no file.
pub fn map_test_ids_to_test_filter<S: AsRef<str>>(ids: &[S]) -> Option<TestFilter> {
    let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
    let first = ids.first()?;
    if ids.contains(&ROOT_ID) {
        return None;
    }

    let filter = if first.contains(SEPARATOR) {
        let mut files = Vec::new();
        let mut names = Vec::new();
        for id in &ids {
            let (file, name) = split_id(id);
            push_unique(&mut files, file);
            if let Some(name) = name {
                push_unique(&mut names, name);
            }
        }
        TestFilter {
            test_file_pattern: path_alternation(&files),
            test_name_pattern: (!names.is_empty()).then(|| names.join("|")),
        }
    } else {
        let mut paths = Vec::new();
        for id in &ids {
            push_unique(&mut paths, id);
        }
        TestFilter {
            test_file_pattern: path_alternation(&paths),
            test_name_pattern: None,
        }
    };

    debug!(
        selected = ids.len(),
        file_pattern = %filter.test_file_pattern,
        name_pattern = ?filter.test_name_pattern,
        "mapped selection to test filter"
    );
    Some(filter)
}

/// Each path matches on a component boundary, against relative or absolute
/// runner paths alike: `src/a.test.ts` matches `/home/dev/app/src/a.test.ts`
/// and a directory matches every file below it.
fn path_alternation(paths: &[&str]) -> String {
    paths
        .iter()
        .map(|path| format!("(?:^|/){}(?:/|$)", regex::escape(path)))
        .collect::<Vec<_>>()
        .join("|")
}

fn push_unique<'a>(items: &mut Vec<&'a str>, item: &'a str) {
    if !items.contains(&item) {
        items.push(item);
    }
}
