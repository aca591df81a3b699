//! Declaration-side adapter: turns a parsed declaration tree into [`TestNode`]s.

use std::path::Path;
use tracing::trace;

use crate::parser::{Declaration, DeclarationKind};
use crate::tree::{build_id, merge_forests, SuiteNode, TestLeaf, TestNode};

/// Classifies every top-level declaration of one file, in source order.
///
/// Blocks declared twice under the same title collapse into one node.
pub fn classify_file(root: &Declaration, file: &Path, working_dir: &Path) -> Vec<TestNode> {
    let declarations = match root.kind {
        DeclarationKind::Root => root.children.as_slice(),
        _ => std::slice::from_ref(root),
    };

    let nodes = merge_forests(
        declarations
            .iter()
            .filter_map(|decl| classify_declaration(decl, file, working_dir, ""))
            .map(|node| vec![node]),
    );

    trace!(file = %file.display(), nodes = nodes.len(), "classified declarations");
    nodes
}

/// Classifies one declaration nested under the describe titles in `prefix`
/// (space-joined). Returns `None` for anything that is neither a group nor a test.
pub fn classify_declaration(
    decl: &Declaration,
    file: &Path,
    working_dir: &Path,
    prefix: &str,
) -> Option<TestNode> {
    let title = title_path(prefix, &decl.name);
    let id = build_id(file, working_dir, Some(&title));
    let file_name = file.to_string_lossy();
    let line = Some(decl.start_line);

    match decl.kind {
        DeclarationKind::It => Some(
            TestLeaf::new(id, decl.name.as_str(), file_name)
                .with_line(line)
                .into(),
        ),
        DeclarationKind::Describe => {
            let children = merge_forests(
                decl.children
                    .iter()
                    .filter_map(|child| classify_declaration(child, file, working_dir, &title))
                    .map(|node| vec![node]),
            );
            Some(
                SuiteNode::new(id, decl.name.as_str())
                    .with_file(file_name)
                    .with_line(line)
                    .with_children(children)
                    .into(),
            )
        }
        DeclarationKind::Root | DeclarationKind::Expect | DeclarationKind::Unknown => None,
    }
}

pub(crate) fn title_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix} {name}")
    }
}
