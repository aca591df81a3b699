use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Compact => Ok(serde_json::to_string(value)?),
        }
    }

    /// Writes to `output_file`, or stdout when none is given.
    pub fn write(content: &str, output_file: Option<&Path>) -> Result<()> {
        match output_file {
            Some(path) => std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Cannot write output file: {}", path.display())),
            None => {
                println!("{content}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TestFilter;
    use tempfile::TempDir;

    fn filter() -> TestFilter {
        TestFilter {
            test_file_pattern: "a".to_string(),
            test_name_pattern: None,
        }
    }

    #[test]
    fn test_compact_is_single_line() {
        let json = OutputFormatter::format(&filter(), OutputFormat::Compact).unwrap();
        assert_eq!(json, r#"{"testFilePattern":"a"}"#);
    }

    #[test]
    fn test_pretty_is_indented() {
        let json = OutputFormatter::format(&filter(), OutputFormat::Json).unwrap();
        assert_eq!(json, "{\n  \"testFilePattern\": \"a\"\n}");
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        OutputFormatter::write("{}", Some(&path)).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }
}
