use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::path::Path;

use crate::config::PatternSet;
use crate::error::ConfigError;

/// Decides which files are test files.
#[derive(Debug, Clone)]
pub enum IncludeMatcher {
    /// Matched against the `/`-normalized path, like Jest's `testRegex`.
    Regex(Regex),
    /// Matched against the path, like Jest's `testMatch`. `*` does not cross `/`.
    Globs(GlobSet),
}

impl IncludeMatcher {
    pub fn from_patterns(patterns: &PatternSet) -> Result<Self, ConfigError> {
        match patterns {
            PatternSet::Regex(pattern) => Regex::new(pattern)
                .map(Self::Regex)
                .map_err(|e| ConfigError::invalid_regex(pattern, e.to_string())),
            PatternSet::Globs(globs) => {
                let mut builder = GlobSetBuilder::new();
                for pattern in globs {
                    let glob = GlobBuilder::new(pattern)
                        .literal_separator(true)
                        .build()
                        .map_err(|e| ConfigError::invalid_glob(pattern, e.to_string()))?;
                    builder.add(glob);
                }
                builder
                    .build()
                    .map(Self::Globs)
                    .map_err(|e| ConfigError::invalid_glob(globs.join(", "), e.to_string()))
            }
        }
    }

    pub fn is_match(&self, path: &Path) -> bool {
        match self {
            Self::Regex(re) => re.is_match(&path.to_string_lossy().replace('\\', "/")),
            Self::Globs(set) => set.is_match(path),
        }
    }
}
