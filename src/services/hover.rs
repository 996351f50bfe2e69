//! Hover text for style variables.

use crate::core::Dialect;
use crate::symbols::{ResolvedSymbolMap, resolve_terminal};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// What the editor shows when the cursor rests on a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    /// Variable name without sigil
    pub name: String,
    /// Declared value
    pub value: String,
    /// Terminal value when the declared value is an alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    /// File declaring the variable
    pub path: PathBuf,
}

impl Hover {
    /// Markdown rendering for the editor popup.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut text = format!("`{}`: `{}`", self.name, self.value);
        if let Some(resolved) = &self.resolved {
            text.push_str(&format!(" (resolves to `{resolved}`)"));
        }
        text.push_str(&format!("\n\nDefined in `{}`", self.path.display()));
        text
    }
}

impl fmt::Display for Hover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Hover for `name`, taken from its winning declaration.
#[must_use]
pub fn hover(symbols: &ResolvedSymbolMap, name: &str, dialect: Option<Dialect>) -> Option<Hover> {
    let (path, variable) = symbols.find_variable(name, dialect)?;
    let resolved = resolve_terminal(name, &symbols.flatten(dialect)).filter(|t| *t != variable.value);
    Some(Hover {
        name: variable.name.clone(),
        value: variable.value.clone(),
        resolved,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AliasMap;
    use crate::resolver::PathResolver;
    use crate::symbols::{ResolveOptions, SymbolCache, SymbolGraph, SymbolRoot};
    use crate::test_utils::StyleFixture;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hover_shows_value_and_source() {
        let fixture = StyleFixture::new().unwrap();
        let theme = fixture.write("theme.css", ":root {\n  --accent: #0af;\n  --link: var(--accent);\n}").unwrap();
        let graph = SymbolGraph::new(
            Arc::new(SymbolCache::new()),
            PathResolver::new(fixture.root(), AliasMap::new()),
        );
        let map = graph.resolve_closure(&[SymbolRoot::Path(theme.clone())], &ResolveOptions::default()).await;

        let link = hover(&map, "link", Some(Dialect::Css)).unwrap();
        assert_eq!(link.value, "var(--accent)");
        assert_eq!(link.resolved.as_deref(), Some("#0af"));
        assert_eq!(link.path, theme);
        assert!(link.to_markdown().starts_with("`link`: `var(--accent)` (resolves to `#0af`)"));

        let accent = hover(&map, "accent", None).unwrap();
        assert_eq!(accent.resolved, None);
        assert!(hover(&map, "missing", None).is_none());
    }
}
