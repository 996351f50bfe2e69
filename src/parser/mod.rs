//! Per-dialect symbol extraction.
//!
//! Each dialect has a [`SymbolParser`] that pulls variable declarations,
//! imports and (for the preprocessors) mixins and functions out of a
//! stylesheet. Parsers do not validate grammar; they only need the statement
//! structure, which they get from the shared scanner in `statements`.
//!
//! # Fail-soft parsing
//!
//! [`parse_symbols`] never fails. A stylesheet the scanner cannot structure
//! (unclosed block, stray `}`, unterminated comment or string) is logged and
//! yields an empty [`SymbolTable`], so one broken file never stops symbol
//! resolution for the rest of a project.
//!
//! # Variable names
//!
//! Names are stored without their sigil: `--primary`, `@primary` and
//! `$primary` are all stored as `primary`. [`Dialect::reference`] renders a
//! name back into source syntax.
//!
//! # Example
//!
//! ```rust
//! use stylescope::core::Dialect;
//! use stylescope::parser::parse_symbols;
//! use std::path::Path;
//!
//! let table = parse_symbols(":root{--c: #fff;}", Path::new("a.css"), Dialect::Css);
//! assert_eq!(table.variables[0].name, "c");
//! assert_eq!(table.variables[0].value, "#fff");
//! assert_eq!(table.variables[0].offset, Some(6));
//! ```

pub mod css;
pub mod less;
pub mod scss;
pub(crate) mod statements;

use crate::core::{Dialect, StyleError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use css::CssParser;
pub use less::LessParser;
pub use scss::ScssParser;

/// A variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Name without sigil
    pub name: String,
    /// Declared value, trimmed, comments removed
    pub value: String,
    /// Byte offset of the declaration; `None` when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Variable {
    /// Create a variable with a known offset.
    pub fn new(name: impl Into<String>, value: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            offset: Some(offset),
        }
    }
}

/// An import as written in the source, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRef {
    /// Path text from the import statement
    pub path: String,
}

impl ImportRef {
    /// Create an import reference.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

/// A LESS mixin or SCSS mixin/function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mixin {
    /// Name as written (LESS mixins keep their leading `.` or `#`)
    pub name: String,
    /// Parameter list text without parentheses (empty when none)
    pub parameters: String,
    /// Byte offset of the definition
    pub offset: usize,
}

/// Symbols extracted from one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    /// Variable declarations in source order
    pub variables: Vec<Variable>,
    /// Imports in source order
    pub imports: Vec<ImportRef>,
    /// Mixin definitions (LESS and SCSS)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Mixin>,
    /// Function definitions (SCSS)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Mixin>,
}

impl SymbolTable {
    /// Whether nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
            && self.imports.is_empty()
            && self.mixins.is_empty()
            && self.functions.is_empty()
    }

    /// Last declaration of `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().rev().find(|v| v.name == name)
    }
}

/// Extracts symbols from one stylesheet dialect.
pub trait SymbolParser: Send + Sync {
    /// Dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Parse `text`. `source` names the file in errors.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::ParseFailure`] when the statement structure of
    /// `text` is malformed.
    fn parse(&self, text: &str, source: &Path) -> Result<SymbolTable, StyleError>;
}

static PARSERS: [&dyn SymbolParser; 3] = [&CssParser, &LessParser, &ScssParser];

/// The parser registered for `dialect`.
#[must_use]
pub fn parser_for(dialect: Dialect) -> &'static dyn SymbolParser {
    PARSERS[dialect.index()]
}

/// Parse `text` as `dialect`, logging failures and returning an empty table.
#[must_use]
pub fn parse_symbols(text: &str, source: &Path, dialect: Dialect) -> SymbolTable {
    match parser_for(dialect).parse(text, source) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("{e}");
            SymbolTable::default()
        }
    }
}

pub(crate) fn parse_failure(
    source: &Path,
    dialect: Dialect,
    error: statements::SyntaxError,
) -> StyleError {
    StyleError::ParseFailure {
        path: source.display().to_string(),
        dialect: dialect.name().to_string(),
        reason: format!("{} at byte {}", error.reason, error.offset),
        offset: error.offset,
    }
}

/// Path from an import parameter: the first quoted string, else the
/// contents of an unquoted `url(...)`, else the raw text.
pub(crate) fn import_path(params: &str) -> String {
    let params = params.trim();
    if let Some(quoted) = quoted_strings(params).into_iter().next() {
        return quoted;
    }
    if let Some(inner) = params.strip_prefix("url(").and_then(|rest| rest.split(')').next()) {
        return inner.trim().to_string();
    }
    params.to_string()
}

/// Contents of every quoted string in `text`, in order.
pub(crate) fn quoted_strings(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut chars = text.char_indices();
    while let Some((start, c)) = chars.next() {
        if c != '"' && c != '\'' {
            continue;
        }
        let mut end = None;
        for (i, inner) in chars.by_ref() {
            if inner == c {
                end = Some(i);
                break;
            }
        }
        match end {
            Some(end) => found.push(text[start + 1..end].to_string()),
            None => break,
        }
    }
    found
}

/// Split an at-rule statement into its keyword (without `@`) and parameters.
pub(crate) fn at_rule(statement: &str) -> Option<(&str, &str)> {
    let rest = statement.strip_prefix('@')?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    Some((&rest[..end], rest[end..].trim()))
}
