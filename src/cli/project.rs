//! Print the projection of one dialect out of a markup document.
//!
//! The output has exactly the byte length and line structure of the input,
//! so offsets and line numbers reported against it hold for the original.

use super::common::load_document;
use crate::core::Dialect;
use crate::embedded::extract;
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments of `stylescope project`.
#[derive(Args, Debug)]
pub struct ProjectCommand {
    /// Markup document to project
    file: PathBuf,

    /// Dialect to keep
    #[arg(long, value_enum)]
    dialect: Dialect,

    /// Blank out style attribute values instead of wrapping them
    #[arg(long)]
    ignore_attributes: bool,
}

impl ProjectCommand {
    /// Project and write to stdout.
    pub async fn execute(self) -> Result<()> {
        let document = load_document(&self.file).await?;
        let projection = extract(&document.text).project(self.dialect, self.ignore_attributes);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(projection.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
