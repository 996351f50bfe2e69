//! Code lenses that swap literal values and variable references.
//!
//! A literal that equals a visible variable's value gets a lens offering to
//! replace it with a reference to that variable. With
//! `variable_to_value` enabled, every reference to a visible variable also
//! gets a lens offering the opposite edit. Each lens carries the exact
//! range and replacement text, so an editor applies it without re-parsing.

use crate::core::Dialect;
use crate::document::{LineIndex, Position};
use crate::symbols::ResolvedSymbolMap;
use crate::symbols::alias::referenced_name;
use serde::Serialize;

/// Edit a lens performs when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LensCommand {
    /// Replace a literal value with a variable reference
    ConvertValueToVariable,
    /// Replace a variable reference with its value
    ConvertVariableToValue,
}

impl LensCommand {
    /// Command identifier registered with the editor.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            LensCommand::ConvertValueToVariable => "stylescope.convert-value-to-variable",
            LensCommand::ConvertVariableToValue => "stylescope.convert-variable-to-value",
        }
    }
}

/// One lens over a span of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLens {
    /// Start of the replaced text
    pub start: Position,
    /// End of the replaced text
    pub end: Position,
    /// Edit performed
    pub command: LensCommand,
    /// Label shown above the span
    pub title: String,
    /// Variable name without sigil
    pub name: String,
    /// Text that replaces the span
    pub replacement: String,
}

/// Lenses for `dialect` in `text`.
///
/// `text` is a stylesheet or the dialect's projection of a markup document;
/// positions are valid in the document either way. Variables come from
/// `symbols` filtered to `dialect`. A variable whose value is itself a
/// reference never matches as a literal, and a variable's own declaration
/// is skipped. Lenses are returned in document order.
#[must_use]
pub fn code_lenses(
    text: &str,
    dialect: Dialect,
    symbols: &ResolvedSymbolMap,
    variable_to_value: bool,
) -> Vec<CodeLens> {
    let mut variables: Vec<(String, String)> = symbols.flatten(Some(dialect)).into_iter().collect();
    variables.sort();

    let index = LineIndex::new(text);
    let mut found: Vec<(usize, usize, LensCommand, &str, String)> = Vec::new();

    for (name, value) in &variables {
        let reference = dialect.reference(name);
        let declaration = format!("{}{name}", dialect.sigil());

        let value = value.trim();
        if !value.is_empty() && referenced_name(value).is_none() {
            for (start, _) in text.match_indices(value) {
                let end = start + value.len();
                if is_literal(text, start, end) && !is_declared_value(text, start, &declaration) {
                    found.push((start, end, LensCommand::ConvertValueToVariable, name.as_str(), reference.clone()));
                }
            }
        }

        if variable_to_value {
            for (start, _) in text.match_indices(&reference) {
                let end = start + reference.len();
                if is_reference(text, start, end, dialect) {
                    found.push((start, end, LensCommand::ConvertVariableToValue, name.as_str(), value.to_string()));
                }
            }
        }
    }

    found.sort_by_key(|(start, end, ..)| (*start, *end));
    found
        .into_iter()
        .map(|(start, end, command, name, replacement)| CodeLens {
            start: index.position_at(text, start),
            end: index.position_at(text, end),
            title: match command {
                LensCommand::ConvertValueToVariable => format!("use variable {replacement}"),
                LensCommand::ConvertVariableToValue => format!("use value {replacement}"),
            },
            command,
            name: name.to_string(),
            replacement,
        })
        .collect()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// `text[start..end]` is a whole value token, not part of a longer one.
fn is_literal(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let open = before.is_none_or(|c| !(is_name_char(c) || matches!(c, '#' | '.' | '@' | '$')));
    let close = after.is_none_or(|c| c.is_whitespace() || matches!(c, ';' | ')' | ',' | '}' | '!'));
    open && close
}

/// The literal at `start` is the value of `declaration` itself.
fn is_declared_value(text: &str, start: usize, declaration: &str) -> bool {
    text[..start]
        .trim_end()
        .strip_suffix(':')
        .is_some_and(|head| head.trim_end().ends_with(declaration))
}

/// `text[start..end]` is a whole reference and not a declaration.
fn is_reference(text: &str, start: usize, end: usize, dialect: Dialect) -> bool {
    if dialect == Dialect::Css {
        // `var(--name)` is closed by its own parenthesis
        return true;
    }
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    let open = before.is_none_or(|c| !(is_name_char(c) || matches!(c, '@' | '$')));
    let close = after.is_none_or(|c| !is_name_char(c));
    open && close && !text[end..].trim_start().starts_with(':')
}
