//! Print variables that resolve to colors.
//!
//! For a stylesheet the file's own closure is used; for a markup document,
//! every embedded style block. Global stylesheets from the configuration are
//! included, with the file's declarations taking precedence.

use super::common::load_document;
use crate::config::WorkspaceConfig;
use crate::services::{StyleWorkspace, color_map};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `stylescope colors`.
#[derive(Args, Debug)]
pub struct ColorsCommand {
    /// Stylesheet or markup document
    file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl ColorsCommand {
    /// Resolve and print the color map.
    pub async fn execute(self, config: WorkspaceConfig) -> Result<()> {
        let workspace = StyleWorkspace::new(config);
        let document = load_document(&self.file).await?;
        let symbols = workspace.visible_symbols(&document, None).await?;
        let colors = color_map(&symbols, None);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&colors)?);
            return Ok(());
        }

        if colors.is_empty() {
            println!("{}", "No color variables found".yellow());
            return Ok(());
        }
        for (name, value) in &colors {
            println!("{}: {}", name.cyan(), value);
        }
        Ok(())
    }
}
