use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid test regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("invalid test glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("failed to read settings file '{path}': {message}")]
    SettingsReadError { path: PathBuf, message: String },

    #[error("failed to parse settings file '{path}': {message}")]
    SettingsParseError { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn invalid_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn settings_read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SettingsReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn settings_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SettingsParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
