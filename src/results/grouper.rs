use std::path::Path;
use tracing::debug;

use super::report::AssertionResult;
use super::status::{assertion_to_test_node, StatusSource};
use crate::classifier::title_path;
use crate::tree::{build_id, fold_into_path, merge_nodes, SuiteNode, TestNode};

/// Regroups one file's flat assertion results into nested describe suites.
///
/// Results with ancestor titles are inserted first, creating or reusing one
/// suite per cumulative title path; results without ancestors follow as
/// top-level tests. Suites are matched purely by recomputed identifier, so
/// `["A", "B"]` and `["A", "C"]` share a single `A`.
pub fn group_assertions(
    file: &Path,
    working_dir: &Path,
    assertions: &[AssertionResult],
    source: Option<&dyn StatusSource>,
) -> Vec<TestNode> {
    let (grouped, top_level): (Vec<&AssertionResult>, Vec<&AssertionResult>) = assertions
        .iter()
        .partition(|assertion| !assertion.ancestor_titles.is_empty());

    let mut nodes = Vec::new();
    for assertion in grouped {
        insert_grouped(
            &mut nodes,
            &assertion.ancestor_titles,
            "",
            assertion,
            file,
            working_dir,
            source,
        );
    }
    for assertion in top_level {
        let test = assertion_to_test_node(assertion, file, working_dir, source);
        merge_nodes(&mut nodes, vec![test.into()]);
    }
    nodes
}

/// Groups one file's results and folds them into the file's directory chain.
/// Returns `None` for a file without assertion results.
pub fn map_file_results(
    file: &Path,
    working_dir: &Path,
    assertions: &[AssertionResult],
    source: Option<&dyn StatusSource>,
) -> Option<TestNode> {
    let nodes = group_assertions(file, working_dir, assertions, source);
    if nodes.is_empty() {
        return None;
    }
    Some(fold_into_path(file, working_dir, nodes))
}

fn insert_grouped(
    siblings: &mut Vec<TestNode>,
    titles: &[String],
    prefix: &str,
    assertion: &AssertionResult,
    file: &Path,
    working_dir: &Path,
    source: Option<&dyn StatusSource>,
) {
    let Some((title, rest)) = titles.split_first() else {
        let test = assertion_to_test_node(assertion, file, working_dir, source);
        merge_nodes(siblings, vec![test.into()]);
        return;
    };

    let cumulative = title_path(prefix, title);
    let id = build_id(file, working_dir, Some(&cumulative));

    let existing = siblings.iter().position(|node| node.id() == id);
    let index = match existing {
        Some(index) => index,
        None => {
            let suite = SuiteNode::new(id, title.as_str()).with_file(file.to_string_lossy());
            siblings.push(suite.into());
            siblings.len() - 1
        }
    };

    match &mut siblings[index] {
        TestNode::Suite(suite) => insert_grouped(
            &mut suite.children,
            rest,
            &cumulative,
            assertion,
            file,
            working_dir,
            source,
        ),
        TestNode::Test(test) => {
            debug!(
                id = %test.id,
                title = %assertion.title,
                "describe title collides with a test, dropping assertion"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FILE: &str = "/project/src/math.test.ts";

    fn group(assertions: &[AssertionResult]) -> Vec<TestNode> {
        group_assertions(Path::new(FILE), Path::new("/project"), assertions, None)
    }

    #[test]
    fn test_shared_prefix_produces_single_parent() {
        let nodes = group(&[
            AssertionResult::new(&["Math", "Addition"], "adds"),
            AssertionResult::new(&["Math", "Subtraction"], "subtracts"),
        ]);

        assert_eq!(nodes.len(), 1);
        let math = nodes[0].as_suite().unwrap();
        assert_eq!(math.label, "Math");
        assert_eq!(math.id, "src/math.test.ts##^Math$");

        let labels: Vec<&str> = math.children.iter().map(TestNode::label).collect();
        assert_eq!(labels, vec!["Addition", "Subtraction"]);

        let addition = math.children[0].as_suite().unwrap();
        assert_eq!(addition.id, "src/math.test.ts##^Math Addition$");
        assert_eq!(addition.children.len(), 1);
        assert_eq!(
            addition.children[0].id(),
            "src/math.test.ts##^Math Addition adds$"
        );

        let subtraction = math.children[1].as_suite().unwrap();
        assert_eq!(subtraction.children.len(), 1);
    }

    #[test]
    fn test_top_level_tests_follow_suites() {
        let nodes = group(&[
            AssertionResult::new(&[], "standalone"),
            AssertionResult::new(&["Math"], "adds"),
        ]);

        let labels: Vec<&str> = nodes.iter().map(TestNode::label).collect();
        assert_eq!(labels, vec!["Math", "standalone"]);
        assert!(nodes[1].as_test().is_some());
    }

    #[test]
    fn test_duplicate_assertions_collapse() {
        let nodes = group(&[
            AssertionResult::new(&["Math"], "adds").with_line(3),
            AssertionResult::new(&["Math"], "adds").with_line(30),
        ]);

        let math = nodes[0].as_suite().unwrap();
        assert_eq!(math.children.len(), 1);
        assert_eq!(math.children[0].as_test().unwrap().line, Some(3));
    }

    #[test]
    fn test_reported_ids_match_declared_escaped_titles() {
        use crate::classifier::classify_file;
        use crate::parser::{DeclarationParser, JsTestParser};

        let source = "it('it\\'s fine', () => {});\nit(\"tab\\tsep\", () => {});\n";
        let declared = JsTestParser.parse(Path::new(FILE), source).unwrap();
        let declared_ids: Vec<String> =
            classify_file(&declared, Path::new(FILE), Path::new("/project"))
                .iter()
                .map(|node| node.id().to_string())
                .collect();

        let reported_ids: Vec<String> = group(&[
            AssertionResult::new(&[], "it's fine"),
            AssertionResult::new(&[], "tab\tsep"),
        ])
        .iter()
        .map(|node| node.id().to_string())
        .collect();

        assert_eq!(declared_ids, reported_ids);
        assert_eq!(declared_ids[0], "src/math.test.ts##^it's fine$");
    }

    #[test]
    fn test_map_file_results_folds_path() {
        let node = map_file_results(
            Path::new(FILE),
            Path::new("/project"),
            &[AssertionResult::new(&["Math"], "adds")],
            None,
        )
        .unwrap();

        let src = node.as_suite().unwrap();
        assert_eq!(src.id, "src");
        let file = src.children[0].as_suite().unwrap();
        assert_eq!(file.id, "src/math.test.ts");
        assert_eq!(file.children[0].label(), "Math");
    }

    #[test]
    fn test_map_file_results_without_assertions() {
        assert_eq!(
            map_file_results(Path::new(FILE), Path::new("/project"), &[], None),
            None
        );
    }
}
