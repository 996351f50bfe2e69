//! Variable completion.
//!
//! Completion is offered when the text before the cursor ends in the start
//! of a variable reference (`@`, `$`, `--` or `var(--`, optionally followed
//! by part of a name). Items are rendered in the dialect's reference syntax.

use crate::core::Dialect;
use crate::symbols::{ResolvedSymbolMap, resolve_terminal};
use serde::Serialize;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    /// Text shown in the list
    pub label: String,
    /// Text replacing the typed prefix
    pub insert_text: String,
    /// Value shown next to the label
    pub detail: String,
    /// Resolved value, used by editors to filter by color or size
    pub filter_value: String,
}

/// Byte offset where the reference being typed at `offset` starts, if the
/// text before the cursor is the beginning of a variable reference.
///
/// ```
/// use stylescope::core::Dialect;
/// use stylescope::services::completion::reference_start;
///
/// assert_eq!(reference_start("a { color: @pri", 15, Dialect::Less), Some(11));
/// assert_eq!(reference_start("a { color: var(--p", 18, Dialect::Css), Some(11));
/// assert_eq!(reference_start("a { color: red", 14, Dialect::Less), None);
/// ```
#[must_use]
pub fn reference_start(text: &str, offset: usize, dialect: Dialect) -> Option<usize> {
    let head = text.get(..offset.min(text.len()))?;
    let partial = head
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .map_or(0, |i| i + 1);

    match dialect {
        Dialect::Less | Dialect::Scss => {
            let sigil = dialect.sigil();
            head[..partial].ends_with(sigil).then(|| partial - sigil.len())
        }
        Dialect::Css => {
            let word = &head[partial..];
            if !word.starts_with('-') {
                return None;
            }
            Some(if head[..partial].ends_with("var(") { partial - 4 } else { partial })
        }
    }
}

/// Completion items for every variable visible in `symbols`.
///
/// Later declarations of a name replace earlier ones; items are sorted by
/// label.
#[must_use]
pub fn completion_items(symbols: &ResolvedSymbolMap, dialect: Dialect) -> Vec<CompletionItem> {
    let values = symbols.flatten(Some(dialect));
    let mut items: Vec<CompletionItem> = values
        .iter()
        .map(|(name, value)| {
            let reference = dialect.reference(name);
            let resolved = resolve_terminal(name, &values).unwrap_or_else(|| value.clone());
            CompletionItem {
                label: reference.clone(),
                insert_text: reference,
                detail: value.clone(),
                filter_value: resolved,
            }
        })
        .collect();
    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}
