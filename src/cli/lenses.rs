//! Print the code lenses of a document.
//!
//! Each lens is printed as `line:column` (one-based), the lens title and the
//! text it would replace.

use super::common::load_document;
use crate::config::WorkspaceConfig;
use crate::services::StyleWorkspace;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `stylescope lenses`.
#[derive(Args, Debug)]
pub struct LensesCommand {
    /// Stylesheet or markup document
    file: PathBuf,

    /// Also offer to replace references with their values
    #[arg(long)]
    variable_to_value: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl LensesCommand {
    /// Compute and print the lenses.
    pub async fn execute(self, mut config: WorkspaceConfig) -> Result<()> {
        config.code_lens.variable_to_value |= self.variable_to_value;
        let workspace = StyleWorkspace::new(config);
        let document = load_document(&self.file).await?;
        let lenses = workspace.code_lenses(&document).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&lenses)?);
            return Ok(());
        }

        if lenses.is_empty() {
            println!("{}", "No code lenses".yellow());
            return Ok(());
        }
        for lens in &lenses {
            println!(
                "{}:{} {} ({})",
                lens.start.line + 1,
                lens.start.character + 1,
                lens.title.cyan(),
                lens.command.id().dimmed()
            );
        }
        Ok(())
    }
}
