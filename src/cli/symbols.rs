//! Print resolved symbol closures.
//!
//! Stylesheets are resolved from disk (and cached like any import);
//! markup documents contribute one projection per style dialect they embed.
//!
//! # Examples
//!
//! ```bash
//! stylescope symbols src/styles/theme.less
//! stylescope symbols src/App.vue --dialect less
//! stylescope symbols a.scss b.scss --json
//! ```

use super::common::{absolute_path, dialect_label, load_document};
use crate::config::WorkspaceConfig;
use crate::core::Dialect;
use crate::services::StyleWorkspace;
use crate::symbols::{ResolveOptions, ResolvedSymbolMap, SymbolRoot};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `stylescope symbols`.
#[derive(Args, Debug)]
pub struct SymbolsCommand {
    /// Stylesheets or markup documents to resolve
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Only follow and print files of this dialect
    #[arg(long, value_enum)]
    dialect: Option<Dialect>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl SymbolsCommand {
    /// Resolve and print.
    pub async fn execute(self, config: WorkspaceConfig) -> Result<()> {
        let workspace = StyleWorkspace::new(config);
        let graph = workspace.graph()?;
        let options = ResolveOptions {
            dialect_filter: self.dialect.map(|d| vec![d]),
            force_refresh: false,
        };

        let mut resolved = ResolvedSymbolMap::default();
        let mut stylesheets = Vec::new();
        for file in &self.files {
            let path = absolute_path(file)?;
            let is_stylesheet = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(Dialect::from_language_id)
                .is_some();
            if is_stylesheet {
                stylesheets.push(SymbolRoot::Path(path));
            } else {
                let document = load_document(&path).await?;
                resolved.merge(workspace.document_symbols(&document, None).await?);
            }
        }
        resolved.merge(graph.resolve_closure(&stylesheets, &options).await);

        let entries: Vec<_> =
            resolved.iter().filter(|e| self.dialect.is_none_or(|d| d == e.dialect)).collect();

        if self.json {
            let output: Vec<_> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "path": entry.path,
                        "dialect": entry.dialect,
                        "symbols": entry.table.as_ref(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("No stylesheets resolved ({})", dialect_label(self.dialect));
            return Ok(());
        }

        for entry in entries {
            println!(
                "{} {}",
                entry.path.display().to_string().bold(),
                format!("({})", entry.dialect).dimmed()
            );
            for import in &entry.table.imports {
                println!("  {} {}", "import".dimmed(), import.path);
            }
            for variable in &entry.table.variables {
                println!(
                    "  {}: {}",
                    entry.dialect.reference(&variable.name).cyan(),
                    variable.value
                );
            }
            for mixin in &entry.table.mixins {
                println!("  {} {}({})", "mixin".dimmed(), mixin.name.green(), mixin.parameters);
            }
            for function in &entry.table.functions {
                println!("  {} {}({})", "function".dimmed(), function.name.green(), function.parameters);
            }
        }
        Ok(())
    }
}
