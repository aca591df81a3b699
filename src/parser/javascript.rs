use std::path::Path;
use tracing::{debug, trace};
use tree_sitter::{Language, Node, Parser};

use super::{Declaration, DeclarationKind, DeclarationParser};
use crate::error::ParserError;
use crate::utils::decode_js_escape;

const DESCRIBE_FUNCTIONS: &[&str] = &["describe", "fdescribe", "xdescribe"];
const TEST_FUNCTIONS: &[&str] = &["it", "test", "fit", "xit", "xtest"];
const MODIFIERS: &[&str] = &["only", "skip", "todo", "concurrent", "failing"];

/// Extracts `describe`/`it`/`test` blocks from JavaScript and TypeScript sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsTestParser;

impl JsTestParser {
    pub fn new() -> Self {
        Self
    }

    fn language_for(path: &Path) -> Option<(&'static str, Language)> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => {
                Some(("javascript", tree_sitter_javascript::LANGUAGE.into()))
            }
            "ts" | "mts" | "cts" => Some((
                "typescript",
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            )),
            "tsx" => Some(("tsx", tree_sitter_typescript::LANGUAGE_TSX.into())),
            _ => None,
        }
    }
}

impl DeclarationParser for JsTestParser {
    fn parse(&self, path: &Path, source: &str) -> Result<Declaration, ParserError> {
        let (language_name, language) =
            Self::language_for(path).ok_or_else(|| ParserError::unsupported_file(path))?;
        trace!(path = %path.display(), language = language_name, "parsing test file");

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|_| ParserError::language_setup_failed(language_name))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParserError::parse_failed(path))?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|node| {
                    let position = node.start_position();
                    (position.row + 1, position.column + 1)
                })
                .unwrap_or((0, 0));
            return Err(ParserError::syntax_error(path, line, column));
        }

        let declarations = collect_declarations(root, source.as_bytes());
        debug!(
            path = %path.display(),
            top_level = declarations.len(),
            "parsed test declarations"
        );
        Ok(Declaration::root(declarations))
    }
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

fn collect_declarations(node: Node<'_>, source: &[u8]) -> Vec<Declaration> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();

    let mut declarations = Vec::new();
    for child in children {
        match as_declaration(child, source) {
            Some(declaration) => declarations.push(declaration),
            None => declarations.extend(collect_declarations(child, source)),
        }
    }
    declarations
}

fn as_declaration(node: Node<'_>, source: &[u8]) -> Option<Declaration> {
    if node.kind() != "call_expression" {
        return None;
    }

    let kind = callee_kind(node.child_by_field_name("function")?, source)?;
    let arguments = node.child_by_field_name("arguments")?;
    let name = first_argument_name(arguments, source)?;
    let start_line = node.start_position().row + 1;

    let declaration = match kind {
        DeclarationKind::Describe => {
            Declaration::describe(name, start_line, collect_declarations(arguments, source))
        }
        _ => Declaration::it(name, start_line),
    };
    Some(declaration)
}

fn callee_kind(function: Node<'_>, source: &[u8]) -> Option<DeclarationKind> {
    match function.kind() {
        "identifier" => {
            let name = text(function, source);
            if DESCRIBE_FUNCTIONS.contains(&name) {
                Some(DeclarationKind::Describe)
            } else if TEST_FUNCTIONS.contains(&name) {
                Some(DeclarationKind::It)
            } else {
                None
            }
        }
        // describe.skip(...), it.only(...)
        "member_expression" => {
            let property = function.child_by_field_name("property")?;
            if !MODIFIERS.contains(&text(property, source)) {
                return None;
            }
            callee_kind(function.child_by_field_name("object")?, source)
        }
        // describe.each(table)(...), it.each`table`(...)
        "call_expression" => {
            let inner = function.child_by_field_name("function")?;
            if inner.kind() != "member_expression" {
                return None;
            }
            let property = inner.child_by_field_name("property")?;
            if text(property, source) != "each" {
                return None;
            }
            callee_kind(inner.child_by_field_name("object")?, source)
        }
        _ => None,
    }
}

fn first_argument_name(arguments: Node<'_>, source: &[u8]) -> Option<String> {
    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;

    match first.kind() {
        "string" | "template_string" => Some(literal_value(first, source)),
        _ => Some(text(first, source).to_string()),
    }
}

/// Runtime value of a string or template literal, without its delimiters.
/// Escapes are decoded; `${...}` substitutions stay as written.
fn literal_value(literal: Node<'_>, source: &[u8]) -> String {
    let start = literal.start_byte() + 1;
    let end = literal.end_byte().saturating_sub(1).max(start);

    let mut units: Vec<u16> = Vec::new();
    let mut offset = start;
    let mut cursor = literal.walk();
    for escape in literal
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "escape_sequence")
    {
        units.extend(raw_units(source, offset, escape.start_byte()));
        units.extend(decode_js_escape(text(escape, source)));
        offset = escape.end_byte();
    }
    units.extend(raw_units(source, offset, end));

    String::from_utf16_lossy(&units)
}

fn raw_units(source: &[u8], start: usize, end: usize) -> Vec<u16> {
    source
        .get(start..end)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .map(|raw| raw.encode_utf16().collect())
        .unwrap_or_default()
}

fn text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}
