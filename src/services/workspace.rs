//! Workspace facade used by editor integrations.
//!
//! [`StyleWorkspace`] owns the configuration and both caches and answers the
//! questions editor features ask: which symbols are visible in this
//! document, where is this variable declared, what does it hover as.
//!
//! Invalidation follows the editor's events:
//!
//! - configuration change: [`StyleWorkspace::apply_config`] clears every
//!   cache and re-warms the global stylesheets
//! - watched files changed: [`StyleWorkspace::files_changed`] re-parses
//!   exactly those paths
//! - document closed: [`StyleWorkspace::document_closed`] drops its region model
//!
//! # Example
//!
//! ```rust,no_run
//! use stylescope::config::WorkspaceConfig;
//! use stylescope::document::{Position, TextDocument};
//! use stylescope::services::StyleWorkspace;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = WorkspaceConfig::load(std::path::Path::new("/project")).await?;
//! let mut workspace = StyleWorkspace::new(config);
//! workspace.apply_config(WorkspaceConfig::with_root("/project")).await;
//!
//! let doc = TextDocument::new("file:///project/App.vue", "vue", 1, "<style lang=\"less\">@a: red;</style>");
//! let symbols = workspace.visible_symbols(&doc, Some(Position::new(0, 22))).await?;
//! println!("{} stylesheets", symbols.len());
//! # Ok(())
//! # }
//! ```

use super::code_lens::{CodeLens, code_lenses};
use super::completion::{CompletionItem, completion_items, reference_start};
use super::definition::{Location, find_definition, variable_at_offset};
use super::hover::{Hover, hover};
use crate::config::WorkspaceConfig;
use crate::core::{Dialect, Language, StyleError};
use crate::document::{LineIndex, Position, TextDocument};
use crate::model_cache::ModelCache;
use crate::symbols::{ResolveOptions, ResolvedSymbolMap, SymbolCache, SymbolGraph, SymbolRoot};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration plus the symbol and region model caches.
#[derive(Debug)]
pub struct StyleWorkspace {
    config: WorkspaceConfig,
    symbols: Arc<SymbolCache>,
    models: ModelCache,
}

impl StyleWorkspace {
    /// Create a workspace with empty caches.
    #[must_use]
    pub fn new(config: WorkspaceConfig) -> Self {
        let models = ModelCache::new(config.model_cache.max_entries, config.model_cache.ttl());
        Self {
            config,
            symbols: Arc::new(SymbolCache::new()),
            models,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Persistent symbol cache.
    #[must_use]
    pub fn symbol_cache(&self) -> &Arc<SymbolCache> {
        &self.symbols
    }

    /// Region model cache.
    #[must_use]
    pub fn model_cache(&self) -> &ModelCache {
        &self.models
    }

    /// Symbol graph over the shared cache.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub fn graph(&self) -> Result<SymbolGraph, StyleError> {
        Ok(SymbolGraph::new(Arc::clone(&self.symbols), self.config.path_resolver()?)
            .with_read_timeout(self.config.resolver.read_timeout()))
    }

    /// Replace the configuration.
    ///
    /// Every cached symbol table and region model is dropped; when a root is
    /// configured the global stylesheets are parsed again straight away.
    /// Returns how many stylesheets the warm-up reached.
    pub async fn apply_config(&mut self, config: WorkspaceConfig) -> usize {
        self.models.dispose();
        self.symbols.clear();
        self.models = ModelCache::new(config.model_cache.max_entries, config.model_cache.ttl());
        self.config = config;

        match self.global_symbols(None).await {
            Ok(global) => {
                tracing::info!("warmed {} global stylesheets", global.len());
                global.len()
            }
            Err(e) => {
                tracing::debug!("skipping global style warm-up: {e}");
                0
            }
        }
    }

    /// Re-parse changed files so the next request sees their new symbols.
    ///
    /// Files that can no longer be read are dropped from the cache. Returns
    /// how many files were re-parsed.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set; the
    /// paths are still invalidated.
    pub async fn files_changed(&self, paths: &[PathBuf]) -> Result<usize, StyleError> {
        for path in paths {
            self.symbols.invalidate(path);
        }
        let graph = self.graph()?;
        let mut refreshed = 0;
        for path in paths {
            if graph.refresh(path).await {
                refreshed += 1;
            }
        }
        tracing::debug!("re-parsed {refreshed} of {} changed files", paths.len());
        Ok(refreshed)
    }

    /// Forget the region model of a closed document.
    pub fn document_closed(&self, uri: &str) -> bool {
        self.models.remove(uri)
    }

    /// Closure of the configured global stylesheets.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn global_symbols(
        &self,
        filter: Option<Vec<Dialect>>,
    ) -> Result<ResolvedSymbolMap, StyleError> {
        let graph = self.graph()?;
        let roots: Vec<SymbolRoot> =
            self.config.global_style_files()?.into_iter().map(SymbolRoot::Path).collect();
        let options = ResolveOptions {
            dialect_filter: filter,
            force_refresh: false,
        };
        Ok(graph.resolve_closure(&roots, &options).await)
    }

    /// Dialects whose symbols apply at `position` in `document`.
    ///
    /// A stylesheet has its own dialect. In a markup document the dialect of
    /// the region under the cursor applies, or every dialect present when no
    /// position is given.
    pub fn dialects_at(&self, document: &TextDocument, position: Option<Position>) -> Vec<Dialect> {
        match document.language() {
            Language::Style(dialect) => vec![dialect],
            Language::Host => {
                let model = self.models.get(document);
                match position {
                    Some(position) => model.language_at(position).dialect().into_iter().collect(),
                    None => model.languages_present(),
                }
            }
        }
    }

    /// Closure of an open document, built from its current text.
    ///
    /// Markup documents contribute one projection per applicable dialect, so
    /// declaration offsets still point into the document.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn document_symbols(
        &self,
        document: &TextDocument,
        position: Option<Position>,
    ) -> Result<ResolvedSymbolMap, StyleError> {
        let graph = self.graph()?;
        let path = document.path();

        let roots: Vec<SymbolRoot> = match document.language() {
            Language::Style(dialect) => vec![SymbolRoot::Content {
                path,
                dialect,
                text: document.text.clone(),
            }],
            Language::Host => {
                let model = self.models.get(document);
                self.dialects_at(document, position)
                    .into_iter()
                    .map(|dialect| SymbolRoot::Content {
                        path: path.clone(),
                        dialect,
                        text: model.project(dialect, false),
                    })
                    .collect()
            }
        };

        Ok(graph.resolve_closure(&roots, &ResolveOptions::default()).await)
    }

    /// Global symbols overlaid with the document's own closure, so the
    /// document's declarations win. When the document is itself a global
    /// stylesheet, its unsaved text replaces the copy on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn visible_symbols(
        &self,
        document: &TextDocument,
        position: Option<Position>,
    ) -> Result<ResolvedSymbolMap, StyleError> {
        let dialects = self.dialects_at(document, position);
        if dialects.is_empty() {
            return Ok(ResolvedSymbolMap::default());
        }
        let mut symbols = self.global_symbols(Some(dialects)).await?;
        symbols.overlay(self.document_symbols(document, position).await?);
        Ok(symbols)
    }

    /// Dialect and variable name under the cursor.
    fn reference_at(&self, document: &TextDocument, position: Position) -> Option<(Dialect, String)> {
        let dialect = *self.dialects_at(document, Some(position)).first()?;
        let offset = LineIndex::new(&document.text).offset_at(&document.text, position);
        let name = variable_at_offset(&document.text, offset, dialect)?;
        Some((dialect, name))
    }

    /// Declaration of the variable under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn definition(
        &self,
        document: &TextDocument,
        position: Position,
    ) -> Result<Option<Location>, StyleError> {
        let Some((dialect, name)) = self.reference_at(document, position) else {
            return Ok(None);
        };
        let symbols = self.visible_symbols(document, Some(position)).await?;
        let path = document.path();
        Ok(find_definition(&symbols, &name, Some(dialect), Some((&path, &document.text))).await)
    }

    /// Hover for the variable under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn hover(
        &self,
        document: &TextDocument,
        position: Position,
    ) -> Result<Option<Hover>, StyleError> {
        let Some((dialect, name)) = self.reference_at(document, position) else {
            return Ok(None);
        };
        let symbols = self.visible_symbols(document, Some(position)).await?;
        Ok(hover(&symbols, &name, Some(dialect)))
    }

    /// Completion items at the cursor, empty unless a reference is being typed.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn completions(
        &self,
        document: &TextDocument,
        position: Position,
    ) -> Result<Vec<CompletionItem>, StyleError> {
        let Some(&dialect) = self.dialects_at(document, Some(position)).first() else {
            return Ok(Vec::new());
        };
        let offset = LineIndex::new(&document.text).offset_at(&document.text, position);
        if reference_start(&document.text, offset, dialect).is_none() {
            return Ok(Vec::new());
        }
        let symbols = self.visible_symbols(document, Some(position)).await?;
        Ok(completion_items(&symbols, dialect))
    }

    /// Value and reference lenses for the whole document.
    ///
    /// Every dialect present in the document is scanned against the symbols
    /// visible without a cursor. Empty when lenses are disabled.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub async fn code_lenses(&self, document: &TextDocument) -> Result<Vec<CodeLens>, StyleError> {
        let settings = &self.config.code_lens;
        if !settings.enabled {
            return Ok(Vec::new());
        }
        let symbols = self.visible_symbols(document, None).await?;

        let mut lenses = match document.language() {
            Language::Style(dialect) => {
                code_lenses(&document.text, dialect, &symbols, settings.variable_to_value)
            }
            Language::Host => {
                let model = self.models.get(document);
                model
                    .languages_present()
                    .into_iter()
                    .flat_map(|dialect| {
                        code_lenses(
                            &model.project(dialect, false),
                            dialect,
                            &symbols,
                            settings.variable_to_value,
                        )
                    })
                    .collect()
            }
        };
        lenses.sort_by_key(|lens| (lens.start, lens.end));
        Ok(lenses)
    }

    /// Stop background work and drop every cache.
    pub fn dispose(&self) {
        self.models.dispose();
        self.symbols.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::path_to_uri;
    use crate::test_utils::StyleFixture;

    const APP: &str = "<template><div style=\"color: red\"></div></template>\n\
<style lang=\"less\">\n@import './theme.less';\n@primary: @accent;\n.a { color: @primary; }\n</style>\n";

    fn workspace(fixture: &StyleFixture) -> StyleWorkspace {
        let mut config = WorkspaceConfig::with_root(fixture.root());
        config.global_style = vec!["global".to_string()];
        StyleWorkspace::new(config)
    }

    #[tokio::test]
    async fn test_root_required() {
        let workspace = StyleWorkspace::new(WorkspaceConfig::default());
        let doc = TextDocument::new("file:///a.less", "less", 1, "@a: 1;");

        assert!(matches!(workspace.global_symbols(None).await, Err(StyleError::RootDirNotConfigured)));
        assert!(matches!(
            workspace.document_symbols(&doc, None).await,
            Err(StyleError::RootDirNotConfigured)
        ));
        assert!(matches!(
            workspace.files_changed(&[PathBuf::from("/a.less")]).await,
            Err(StyleError::RootDirNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_markup_document_symbols() {
        let fixture = StyleFixture::new().unwrap();
        fixture.write("theme.less", "@accent: #112233;").unwrap();
        let uri = path_to_uri(&fixture.root().join("App.vue"));
        let doc = TextDocument::new(&uri, "vue", 1, APP);
        let workspace = workspace(&fixture);

        // the style attribute (CSS), theme.less and the LESS block
        let symbols = workspace.document_symbols(&doc, None).await.unwrap();
        assert_eq!(symbols.len(), 3);
        assert_eq!(crate::services::color::color_map(&symbols, None)["primary"], "#112233");
        assert!(workspace.model_cache().contains(&uri));

        // cursor inside the template sees no style symbols
        let host = workspace.visible_symbols(&doc, Some(Position::new(0, 3))).await.unwrap();
        assert!(host.is_empty());

        assert!(workspace.document_closed(&uri));
        assert!(!workspace.model_cache().contains(&uri));
    }

    #[tokio::test]
    async fn test_definition_hover_and_completion() {
        let fixture = StyleFixture::new().unwrap();
        let theme = fixture.write("theme.less", "@accent: #112233;").unwrap();
        let uri = path_to_uri(&fixture.root().join("App.vue"));
        let doc = TextDocument::new(&uri, "vue", 1, APP);
        let workspace = workspace(&fixture);

        // line 3 is "@primary: @accent;"
        let on_accent = Position::new(3, 12);
        let location = workspace.definition(&doc, on_accent).await.unwrap().unwrap();
        assert_eq!(location.path, theme);
        assert_eq!((location.line, location.character), (0, 0));

        let on_primary = Position::new(4, 14);
        let location = workspace.definition(&doc, on_primary).await.unwrap().unwrap();
        assert_eq!(location.path, fixture.root().join("App.vue"));
        assert_eq!((location.line, location.character), (3, 0));

        let hover = workspace.hover(&doc, on_primary).await.unwrap().unwrap();
        assert_eq!(hover.value, "@accent");
        assert_eq!(hover.resolved.as_deref(), Some("#112233"));

        let items = workspace.completions(&doc, Position::new(4, 13)).await.unwrap();
        assert!(items.iter().any(|i| i.insert_text == "@accent"));
        assert!(items.iter().any(|i| i.insert_text == "@primary"));
        assert!(workspace.completions(&doc, Position::new(4, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_globals_and_invalidation() {
        let fixture = StyleFixture::new().unwrap();
        let global = fixture.write("global/colors.scss", "$brand: red;").unwrap();
        fixture.write("global/sizes.less", "@gap: 4px;").unwrap();
        let mut workspace = workspace(&fixture);

        let warmed = workspace.apply_config(workspace.config().clone()).await;
        assert_eq!(warmed, 2);
        assert_eq!(workspace.symbol_cache().len(), 2);

        let scss_only = workspace.global_symbols(Some(vec![Dialect::Scss])).await.unwrap();
        assert_eq!(scss_only.len(), 1);

        fixture.write("global/colors.scss", "$brand: blue;").unwrap();
        assert_eq!(workspace.global_symbols(None).await.unwrap().flatten(None)["brand"], "red");
        assert_eq!(workspace.files_changed(&[global]).await.unwrap(), 1);
        assert_eq!(workspace.global_symbols(None).await.unwrap().flatten(None)["brand"], "blue");

        let doc = TextDocument::new("file:///x.scss", "scss", 1, ".a { color: $brand; }");
        let visible = workspace.visible_symbols(&doc, None).await.unwrap();
        assert_eq!(visible.flatten(None)["brand"], "blue");
        assert!(!visible.flatten(None).contains_key("gap"));

        workspace.dispose();
        assert!(workspace.symbol_cache().is_empty());
    }

    #[tokio::test]
    async fn test_code_lenses_in_markup_document() {
        let fixture = StyleFixture::new().unwrap();
        fixture.write("theme.less", "@accent: #112233;").unwrap();
        let uri = path_to_uri(&fixture.root().join("App.vue"));
        let text = "<p style=\"color: #112233\"></p>\n<style lang=\"less\">\n@import './theme.less';\n.a { color: #112233; }\n</style>\n";
        let doc = TextDocument::new(&uri, "vue", 1, text);

        let mut workspace = workspace(&fixture);
        let lenses = workspace.code_lenses(&doc).await.unwrap();
        // the CSS attribute sees no LESS variables
        assert_eq!(lenses.len(), 1);
        assert_eq!((lenses[0].start, lenses[0].end), (Position::new(3, 12), Position::new(3, 19)));
        assert_eq!(lenses[0].replacement, "@accent");

        let mut config = workspace.config().clone();
        config.code_lens.enabled = false;
        workspace.apply_config(config).await;
        assert!(workspace.code_lenses(&doc).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_global_stylesheet_uses_unsaved_text() {
        let fixture = StyleFixture::new().unwrap();
        let theme = fixture.write("theme.less", "@a: 1;").unwrap();
        let mut config = WorkspaceConfig::with_root(fixture.root());
        config.global_style = vec!["theme.less".to_string()];
        let workspace = StyleWorkspace::new(config);

        let uri = path_to_uri(&theme);
        let doc = TextDocument::new(&uri, "less", 2, "@a: 2;\n@b: 3;");
        let visible = workspace.visible_symbols(&doc, None).await.unwrap();

        assert_eq!(visible.len(), 1);
        let flat = visible.flatten(None);
        assert_eq!(flat["a"], "2");
        assert_eq!(flat["b"], "3");
    }
}
