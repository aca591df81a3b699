use super::{SuiteNode, TestNode};

/// Merges `src` into `dest`, treating nodes with equal identifiers as the same node.
///
/// Suites sharing an identifier have their children merged recursively. Entries
/// that are new to `dest` are appended in source order. A test already present in
/// `dest` is never replaced: the first occurrence of a leaf wins, as does a suite
/// or test colliding with an entry of the other kind.
pub fn merge_nodes(dest: &mut Vec<TestNode>, src: Vec<TestNode>) {
    for node in src {
        let Some(index) = dest.iter().position(|existing| existing.id() == node.id()) else {
            dest.push(node);
            continue;
        };

        if let (TestNode::Suite(existing), TestNode::Suite(incoming)) = (&mut dest[index], node) {
            merge_nodes(&mut existing.children, incoming.children);
        }
    }
}

/// Folds any number of sibling forests into one, left to right.
pub fn merge_forests<I>(forests: I) -> Vec<TestNode>
where
    I: IntoIterator<Item = Vec<TestNode>>,
{
    forests.into_iter().fold(Vec::new(), |mut merged, forest| {
        merge_nodes(&mut merged, forest);
        merged
    })
}

/// Merges two trees whose tops are the same suite, e.g. two roots.
pub fn merge_suites(mut dest: SuiteNode, src: SuiteNode) -> SuiteNode {
    merge_nodes(&mut dest.children, src.children);
    dest
}
