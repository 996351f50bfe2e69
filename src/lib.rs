//! stylescope - style variable resolution for editor tooling
//!
//! Editor features such as completion, hover, go-to-definition, code lenses
//! and inline color swatches need to know which style variables are visible
//! at a cursor: CSS custom properties (`--name`), LESS variables (`@name`)
//! and SCSS variables (`$name`). Those variables may be declared in
//! `<style>` blocks of a markup document or in stylesheets reached through
//! imports and path aliases. stylescope answers that question.
//!
//! # Architecture Overview
//!
//! ```text
//! editor event
//!   -> embedded (markup document)  or  parser (stylesheet)
//!   -> symbols::graph (walks imports via resolver, consults symbols::cache)
//!   -> merged symbol map
//!   -> services (completion, hover, definition, colors, code lenses)
//! ```
//!
//! # Core Modules
//!
//! ## Engine
//! - [`embedded`] - region extraction and byte-preserving projections of markup documents
//! - [`parser`] - per-dialect symbol extraction (CSS, LESS, SCSS)
//! - [`resolver`] - import and alias path resolution
//! - [`symbols`] - import closures, the persistent symbol cache and alias chains
//! - [`model_cache`] - bounded, time-aware cache of region models per open document
//!
//! ## Editor Integration
//! - [`services`] - the [`services::StyleWorkspace`] facade and feature helpers
//! - [`document`] - open documents and offset/position conversion
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`config`] - `stylescope.toml` loading
//! - [`constants`] - default limits and timeouts
//! - [`core`] - dialects, errors and file operation context
//!
//! # Configuration (stylescope.toml)
//!
//! ```toml
//! root_dir = "."
//! global_style = ["src/styles"]
//!
//! [aliases]
//! "@" = "src"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use stylescope::config::WorkspaceConfig;
//! use stylescope::document::TextDocument;
//! use stylescope::services::{StyleWorkspace, color_map};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let workspace = StyleWorkspace::new(WorkspaceConfig::with_root("/project"));
//! let doc = TextDocument::new(
//!     "file:///project/src/App.vue",
//!     "vue",
//!     1,
//!     "<style lang=\"scss\">$brand: #3366ff;</style>",
//! );
//!
//! let symbols = workspace.visible_symbols(&doc, None).await?;
//! for (name, color) in color_map(&symbols, None) {
//!     println!("{name}: {color}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod document;
pub mod embedded;
pub mod model_cache;
pub mod parser;
pub mod resolver;
pub mod services;
pub mod symbols;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
