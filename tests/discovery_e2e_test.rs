mod fixtures;

use fixtures::{sample_project, write_file};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;
use test_explorer_core::config::{ExplorerConfig, PatternSet};
use test_explorer_core::discovery::DirectoryExplorer;
use test_explorer_core::parser::JsTestParser;
use test_explorer_core::tree::TestNode;

fn explorer(config: &ExplorerConfig) -> DirectoryExplorer {
    DirectoryExplorer::new(config, Arc::new(JsTestParser::new())).unwrap()
}

#[tokio::test]
async fn test_discovery_e2e_sample_project() {
    let root = sample_project();
    let suite = explorer(&ExplorerConfig::new(&root))
        .explore()
        .await
        .expect("Failed to explore sample project");

    assert_eq!(suite.id, "root");
    assert_eq!(suite.label, "Jest");
    assert_eq!(
        suite.descendant_ids(),
        vec![
            "__tests__",
            "__tests__/strings.js",
            "__tests__/strings.js##^uppercases$",
            "__tests__/strings.js##^padding$",
            "__tests__/strings.js##^padding pads left$",
            "src",
            "src/math",
            "src/math/math.test.ts",
            "src/math/math.test.ts##^Math$",
            "src/math/math.test.ts##^Math Addition$",
            r"src/math/math.test.ts##^Math Addition adds 1 \+ 2$",
            "src/math/math.test.ts##^Math Addition adds negatives$",
            "src/math/math.test.ts##^Math Subtraction$",
            "src/math/math.test.ts##^Math Subtraction subtracts$",
        ]
    );
    assert_eq!(suite.test_count(), 5);
}

#[tokio::test]
async fn test_discovery_e2e_lines_and_files() {
    let root = sample_project();
    let suite = explorer(&ExplorerConfig::new(&root)).explore().await.unwrap();

    let file = suite.find("src/math/math.test.ts").unwrap().as_suite().unwrap();
    let expected_file = root.join("src/math/math.test.ts");
    assert_eq!(file.file.as_deref(), Some(expected_file.to_str().unwrap()));
    assert_eq!(file.label, "math.test.ts");

    let adds = suite
        .find("src/math/math.test.ts##^Math Addition adds negatives$")
        .and_then(TestNode::as_test)
        .unwrap();
    assert_eq!(adds.label, "adds negatives");
    assert_eq!(adds.line, Some(9));
    assert_eq!(adds.file, expected_file.to_string_lossy());

    let math = suite
        .find("src/math/math.test.ts##^Math$")
        .and_then(TestNode::as_suite)
        .unwrap();
    assert_eq!(math.line, Some(3));
}

#[tokio::test]
async fn test_discovery_e2e_ignores_dependencies_and_empty_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "node_modules/lib/index.test.js", "it('vendored', () => {});\n");
    write_file(root, ".git/hooks/pre-commit.test.js", "it('hook', () => {});\n");
    write_file(root, "src/app.ts", "export default 1;\n");
    std::fs::create_dir_all(root.join("src/empty/deeper")).unwrap();
    write_file(root, "src/app.test.ts", "it('boots', () => {});\n");

    let suite = explorer(&ExplorerConfig::new(root)).explore().await.unwrap();

    assert_eq!(
        suite.descendant_ids(),
        vec!["src", "src/app.test.ts", "src/app.test.ts##^boots$"]
    );
}

#[tokio::test]
async fn test_discovery_e2e_custom_globs() {
    let root = sample_project();
    let config = ExplorerConfig::new(&root)
        .with_test_match(PatternSet::Globs(vec!["**/src/**/*.test.ts".to_string()]));

    let suite = explorer(&config).explore().await.unwrap();

    let files: Vec<&str> = suite.children.iter().map(TestNode::id).collect();
    assert_eq!(files, vec!["src"]);
    assert_eq!(suite.test_count(), 3);
}

#[tokio::test]
async fn test_discovery_e2e_empty_root() {
    let temp_dir = TempDir::new().unwrap();
    let suite = explorer(&ExplorerConfig::new(temp_dir.path()))
        .explore()
        .await
        .unwrap();

    assert!(suite.is_empty());
    assert_eq!(suite.id, "root");
}
