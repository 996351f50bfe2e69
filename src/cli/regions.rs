//! Print the language ranges of a markup document.

use super::common::load_document;
use crate::core::Language;
use crate::embedded::extract;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `stylescope regions`.
#[derive(Args, Debug)]
pub struct RegionsCommand {
    /// Markup document to scan
    file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl RegionsCommand {
    /// Scan the document and print one line per range.
    pub async fn execute(self) -> Result<()> {
        let document = load_document(&self.file).await?;
        let model = extract(&document.text);
        let ranges = model.language_ranges();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&ranges)?);
            return Ok(());
        }

        for range in &ranges {
            let start = model.line_index().position_at(model.text(), range.start);
            let label = match range.language {
                Language::Host => range.language.to_string().dimmed(),
                Language::Style(_) => range.language.to_string().green(),
            };
            let attribute = if range.is_attribute_value { " (attribute)" } else { "" };
            println!(
                "{:>6}..{:<6} {}:{} {}{}",
                range.start,
                range.end,
                start.line + 1,
                start.character + 1,
                label,
                attribute
            );
        }

        let present = model.languages_present();
        if present.is_empty() {
            println!("{}", "no style regions".yellow());
        } else {
            let names: Vec<String> = present.iter().map(ToString::to_string).collect();
            println!("dialects: {}", names.join(", "));
        }
        Ok(())
    }
}
