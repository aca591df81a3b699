mod javascript;

pub use javascript::JsTestParser;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ParserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Root,
    Describe,
    It,
    Expect,
    #[serde(other)]
    Unknown,
}

/// One node of a statically parsed test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    #[serde(default)]
    pub name: String,
    /// 1-based.
    #[serde(default)]
    pub start_line: usize,
    #[serde(default)]
    pub children: Vec<Declaration>,
}

impl Declaration {
    pub fn root(children: Vec<Declaration>) -> Self {
        Self {
            kind: DeclarationKind::Root,
            name: String::new(),
            start_line: 0,
            children,
        }
    }

    pub fn describe(name: impl Into<String>, start_line: usize, children: Vec<Declaration>) -> Self {
        Self {
            kind: DeclarationKind::Describe,
            name: name.into(),
            start_line,
            children,
        }
    }

    pub fn it(name: impl Into<String>, start_line: usize) -> Self {
        Self {
            kind: DeclarationKind::It,
            name: name.into(),
            start_line,
            children: Vec::new(),
        }
    }
}

/// Turns source text into a declaration tree rooted at a [`DeclarationKind::Root`] node.
pub trait DeclarationParser: Send + Sync {
    fn parse(&self, path: &Path, source: &str) -> Result<Declaration, ParserError>;
}
