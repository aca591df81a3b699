use regex::RegexBuilder;
use std::path::Path;

/// Delimits the file part from the title part of a test identifier.
///
/// `regex::escape` always escapes `#`, so the delimiter never occurs inside the
/// escaped title and identifiers can be split on its first occurrence.
pub const SEPARATOR: &str = "##";

pub const ROOT_ID: &str = "root";

/// Strips `working_dir` from `file` and normalizes separators to `/`.
///
/// The prefix match is case-insensitive and only succeeds on a path component
/// boundary. Paths that do not start with the prefix pass through unchanged
/// apart from separator normalization, which makes the function idempotent.
pub fn relative_path(file: &Path, working_dir: &Path) -> String {
    let normalized = normalize(&file.to_string_lossy());
    let prefix = normalize(&working_dir.to_string_lossy());
    let prefix = prefix.trim_end_matches('/');

    if prefix.is_empty() {
        return normalized.trim_start_matches('/').to_string();
    }

    let pattern = format!("^{}(?:/+|$)", regex::escape(prefix));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace(&normalized, "").into_owned(),
        Err(_) => normalized,
    }
}

/// Builds the identifier of a file, or of a test or describe block inside it
/// when `title` is given.
///
/// The title part is `^<escaped title>$`, so hosts can hand it straight back
/// to the runner as an anchored test-name pattern.
pub fn build_id(file: &Path, working_dir: &Path, title: Option<&str>) -> String {
    let relative = relative_path(file, working_dir);
    match title {
        Some(title) => format!("{relative}{SEPARATOR}^{}$", regex::escape(title)),
        None => relative,
    }
}

/// Splits an identifier into its file part and, for tests, its title pattern.
pub fn split_id(id: &str) -> (&str, Option<&str>) {
    match id.split_once(SEPARATOR) {
        Some((file, title)) => (file, Some(title)),
        None => (id, None),
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_path_strips_working_dir() {
        let rel = relative_path(
            Path::new("/project/src/math.test.ts"),
            Path::new("/project"),
        );
        assert_eq!(rel, "src/math.test.ts");
    }

    #[test]
    fn test_relative_path_trailing_separator_on_working_dir() {
        let rel = relative_path(
            Path::new("/project/src/math.test.ts"),
            Path::new("/project/"),
        );
        assert_eq!(rel, "src/math.test.ts");
    }

    #[test]
    fn test_relative_path_is_case_insensitive() {
        let rel = relative_path(
            Path::new("/Users/Dev/Project/a.test.js"),
            Path::new("/users/dev/project"),
        );
        assert_eq!(rel, "a.test.js");
    }

    #[test]
    fn test_relative_path_normalizes_backslashes() {
        let rel = relative_path(
            Path::new(r"C:\work\app\src\a.test.ts"),
            Path::new(r"c:\work\app"),
        );
        assert_eq!(rel, "src/a.test.ts");
    }

    #[test]
    fn test_relative_path_escapes_regex_in_prefix() {
        let rel = relative_path(
            Path::new("/tmp/a+b (1)/x.test.ts"),
            Path::new("/tmp/a+b (1)"),
        );
        assert_eq!(rel, "x.test.ts");

        // `.` must not act as a wildcard
        let rel = relative_path(Path::new("/tmp/aXb/x.test.ts"), Path::new("/tmp/a.b"));
        assert_eq!(rel, "/tmp/aXb/x.test.ts");
    }

    #[test]
    fn test_relative_path_requires_component_boundary() {
        let rel = relative_path(Path::new("/project2/a.test.ts"), Path::new("/project"));
        assert_eq!(rel, "/project2/a.test.ts");
    }

    #[test]
    fn test_relative_path_is_idempotent() {
        let root = Path::new("/project");
        let once = relative_path(Path::new("/project/src/a.test.ts"), root);
        let twice = relative_path(Path::new(&once), root);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relative_path_round_trip() {
        let root = PathBuf::from("/home/dev/app");
        for file in [
            "/home/dev/app/a.test.ts",
            "/home/dev/app/src/deep/nested/b.spec.js",
            "/home/dev/app/__tests__/c.js",
        ] {
            let rel = relative_path(Path::new(file), &root);
            assert_eq!(root.join(&rel), PathBuf::from(file));
        }
    }

    #[test]
    fn test_build_id_for_file() {
        let id = build_id(
            Path::new("/project/src/a.test.ts"),
            Path::new("/project"),
            None,
        );
        assert_eq!(id, "src/a.test.ts");
    }

    #[test]
    fn test_build_id_for_test_escapes_title() {
        let id = build_id(
            Path::new("/project/a.test.ts"),
            Path::new("/project"),
            Some("adds 1 + 2 (fast)"),
        );
        assert_eq!(id, r"a.test.ts##^adds 1 \+ 2 \(fast\)$");
    }

    #[test]
    fn test_test_id_title_is_anchored_regex() {
        let id = build_id(
            Path::new("/project/a.test.ts"),
            Path::new("/project"),
            Some("Math sums [a, b]?"),
        );
        let (_, title) = split_id(&id);
        let re = regex::Regex::new(title.unwrap()).unwrap();
        assert!(re.is_match("Math sums [a, b]?"));
        assert!(!re.is_match("Math sums [a, b]? again"));
    }

    #[test]
    fn test_separator_cannot_collide_with_title() {
        let id = build_id(
            Path::new("/project/a.test.ts"),
            Path::new("/project"),
            Some("issue ## 12"),
        );
        let (file, title) = split_id(&id);
        assert_eq!(file, "a.test.ts");
        assert_eq!(title, Some(r"^issue \#\# 12$"));
    }

    #[test]
    fn test_split_id_for_file() {
        assert_eq!(split_id("src/a.test.ts"), ("src/a.test.ts", None));
    }
}
