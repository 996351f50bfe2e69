//! Go-to-definition for style variables.

use crate::core::Dialect;
use crate::core::file_error::FileOps;
use crate::document::LineIndex;
use crate::symbols::ResolvedSymbolMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A position in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// File containing the declaration
    pub path: PathBuf,
    /// Zero-based line
    pub line: u32,
    /// Zero-based UTF-16 column
    pub character: u32,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Name (without sigil) of the variable reference under `offset`.
///
/// A cursor on the sigil or just after the last character of the name still
/// counts. CSS names must carry their `--` prefix; LESS and SCSS names must
/// be preceded by `@` or `$`.
///
/// ```
/// use stylescope::core::Dialect;
/// use stylescope::services::definition::variable_at_offset;
///
/// let text = "a { color: @primary; }";
/// assert_eq!(variable_at_offset(text, 14, Dialect::Less).as_deref(), Some("primary"));
/// assert_eq!(variable_at_offset(text, 4, Dialect::Less), None);
/// ```
#[must_use]
pub fn variable_at_offset(text: &str, offset: usize, dialect: Dialect) -> Option<String> {
    let bytes = text.as_bytes();
    let mut cursor = offset.min(bytes.len());
    if dialect != Dialect::Css && bytes.get(cursor) == Some(&dialect.sigil().as_bytes()[0]) {
        cursor += 1;
    }

    let mut start = cursor;
    while start > 0 && is_name_byte(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end < bytes.len() && is_name_byte(bytes[end]) {
        end += 1;
    }
    if start == end {
        return None;
    }

    let word = &text[start..end];
    let name = match dialect {
        Dialect::Css => word.strip_prefix("--")?,
        Dialect::Less | Dialect::Scss => {
            let sigil = dialect.sigil().as_bytes()[0];
            if start == 0 || bytes[start - 1] != sigil {
                return None;
            }
            word
        }
    };
    (!name.is_empty()).then(|| name.to_string())
}

/// Location of the winning declaration of `name`.
///
/// `open` supplies the current text of a document whose on-disk contents
/// may be stale; every other file is read to turn the declaration offset
/// into a line and column.
pub async fn find_definition(
    symbols: &ResolvedSymbolMap,
    name: &str,
    dialect: Option<Dialect>,
    open: Option<(&Path, &str)>,
) -> Option<Location> {
    let (path, variable) = symbols.find_variable(name, dialect)?;
    let offset = variable.offset?;

    let text = match open {
        Some((open_path, text)) if open_path == path => text.to_string(),
        _ => match FileOps::read_with_context(path, "definition lookup", "services::definition").await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("{}", e.user_message());
                return None;
            }
        },
    };

    let index = LineIndex::new(&text);
    let position = index.position_at(&text, offset.min(text.len()));
    Some(Location {
        path: path.to_path_buf(),
        line: position.line,
        character: position.character,
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

    #[test]
    fn test_variable_at_offset() {
        let css = "a { color: var(--brand-main); }";
        assert_eq!(variable_at_offset(css, 18, Dialect::Css).as_deref(), Some("brand-main"));
        assert_eq!(variable_at_offset(css, 15, Dialect::Css).as_deref(), Some("brand-main"));
        assert_eq!(variable_at_offset(css, 4, Dialect::Css), None);

        let scss = "$gap: 4px;\n.a { margin: $gap; }";
        assert_eq!(variable_at_offset(scss, 24, Dialect::Scss).as_deref(), Some("gap"));
        assert_eq!(variable_at_offset(scss, 28, Dialect::Scss).as_deref(), Some("gap"));
        assert_eq!(variable_at_offset(scss, 0, Dialect::Scss).as_deref(), Some("gap"));
        assert_eq!(variable_at_offset(scss, 24, Dialect::Less), None);
        assert_eq!(variable_at_offset("", 0, Dialect::Less), None);
    }

    #[tokio::test]
    async fn test_find_definition_in_import() {
        let fixture = StyleFixture::new().unwrap();
        let vars = fixture.write("vars.scss", "// colors\n$accent: red;\n").unwrap();
        let main = fixture.write("main.scss", "@import 'vars';\n.a { color: $accent; }").unwrap();
        let graph = SymbolGraph::new(
            Arc::new(SymbolCache::new()),
            PathResolver::new(fixture.root(), AliasMap::new()),
        );
        let map = graph.resolve_closure(&[SymbolRoot::Path(main)], &ResolveOptions::default()).await;

        let location = find_definition(&map, "accent", Some(Dialect::Scss), None).await.unwrap();
        assert_eq!(
            location,
            Location {
                path: vars,
                line: 1,
                character: 0,
            }
        );
        assert!(find_definition(&map, "missing", None, None).await.is_none());
    }

    #[tokio::test]
    async fn test_find_definition_uses_open_text() {
        let fixture = StyleFixture::new().unwrap();
        let doc = fixture.root().join("App.vue");
        let text = "<template></template>\n<style lang=\"less\">\n@a: 1px;\n</style>";
        let graph = SymbolGraph::new(
            Arc::new(SymbolCache::new()),
            PathResolver::new(fixture.root(), AliasMap::new()),
        );
        let projection = crate::embedded::extract(text).project(Dialect::Less, false);
        let root = SymbolRoot::Content {
            path: doc.clone(),
            dialect: Dialect::Less,
            text: projection,
        };
        let map = graph.resolve_closure(&[root], &ResolveOptions::default()).await;

        let location = find_definition(&map, "a", None, Some((&doc, text))).await.unwrap();
        assert_eq!((location.line, location.character), (2, 0));
    }
}
