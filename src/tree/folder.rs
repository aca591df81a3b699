use std::path::Path;

use super::id::relative_path;
use super::{SuiteNode, TestNode};

/// Wraps a file's nodes in a file suite and then in one directory suite per
/// ancestor directory below `working_dir`.
///
/// For `/root/src/foo/bar.test.ts` under `/root` the result is the chain
/// `src` → `src/foo` → `src/foo/bar.test.ts`, with `children` inside the
/// innermost suite. The outermost suite is returned so it can be merged with
/// its siblings under a common root.
pub fn fold_into_path(file: &Path, working_dir: &Path, children: Vec<TestNode>) -> TestNode {
    let relative = relative_path(file, working_dir);
    let segments: Vec<&str> = relative.split('/').collect();

    let Some(last) = segments.iter().rposition(|segment| !segment.is_empty()) else {
        let label = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| relative.clone());
        return SuiteNode::new(relative.clone(), label)
            .with_file(file.to_string_lossy())
            .with_children(children)
            .into();
    };

    let file_suite = SuiteNode::new(relative.clone(), segments[last])
        .with_file(file.to_string_lossy())
        .with_children(children);

    wrap_in_directories(&segments[..last], file_suite.into())
}

fn wrap_in_directories(segments: &[&str], inner: TestNode) -> TestNode {
    match segments.split_last() {
        None => inner,
        Some((segment, rest)) if segment.is_empty() => wrap_in_directories(rest, inner),
        Some((segment, rest)) => {
            let directory = SuiteNode::new(segments.join("/"), *segment).with_children(vec![inner]);
            wrap_in_directories(rest, directory.into())
        }
    }
}
