use std::path::{Path, PathBuf};

pub fn get_test_fixture_path(fixture_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(fixture_name)
}

pub fn sample_project() -> PathBuf {
    get_test_fixture_path("sample-project")
}

pub fn sample_report_json() -> String {
    std::fs::read_to_string(get_test_fixture_path("reports/sample-report.json")).unwrap()
}

/// The sample report with its `/project` paths moved under `root`.
pub fn sample_report_json_for(root: &Path) -> String {
    let root = root.to_string_lossy().replace('\\', "/");
    sample_report_json().replace("\"/project/", &format!("\"{root}/"))
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
