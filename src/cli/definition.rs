//! Find the declaration of the variable at a position.
//!
//! Lines and columns are one-based on both input and output, matching
//! compiler diagnostics, and printed as `path:line:column`.

use super::common::load_document;
use crate::config::WorkspaceConfig;
use crate::document::Position;
use crate::services::StyleWorkspace;
use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;

/// Arguments of `stylescope definition`.
#[derive(Args, Debug)]
pub struct DefinitionCommand {
    /// Document containing the reference
    file: PathBuf,

    /// One-based line of the reference
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    line: u32,

    /// One-based column (UTF-16 code units) of the reference
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    character: u32,
}

impl DefinitionCommand {
    /// Look up and print the declaration.
    pub async fn execute(self, config: WorkspaceConfig) -> Result<()> {
        let workspace = StyleWorkspace::new(config);
        let document = load_document(&self.file).await?;
        let position = Position::new(self.line - 1, self.character - 1);

        match workspace.definition(&document, position).await? {
            Some(location) => {
                println!("{}:{}:{}", location.path.display(), location.line + 1, location.character + 1);
                Ok(())
            }
            None => bail!(
                "No variable definition found at {}:{}:{}",
                self.file.display(),
                self.line,
                self.character
            ),
        }
    }
}
