//! Helpers shared by the CLI commands.

use crate::core::Dialect;
use crate::core::file_error::FileOps;
use crate::document::{TextDocument, path_to_uri};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Absolute form of a path given on the command line.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve path {}", path.display()))
}

/// Read a file given on the command line as an open document.
///
/// The language id is the file extension, so `.vue`/`.html` files are
/// markup documents and `.less`/`.scss`/`.css` files are stylesheets.
pub async fn load_document(path: &Path) -> Result<TextDocument> {
    let path = absolute_path(path)?;
    let text = FileOps::read_with_context(&path, "command input", "cli").await?;
    let language_id = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("html")
        .to_ascii_lowercase();
    Ok(TextDocument::new(path_to_uri(&path), language_id, 1, text))
}

/// Label for a dialect filter in human-readable output.
#[must_use]
pub fn dialect_label(dialect: Option<Dialect>) -> String {
    dialect.map_or_else(|| "all dialects".to_string(), |d| d.to_string())
}
