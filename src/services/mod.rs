//! Editor feature helpers built on the symbol engine.
//!
//! - [`workspace`]: the [`StyleWorkspace`] facade owning configuration and caches
//! - [`color`]: color classification and name-to-color maps
//! - [`definition`]: variable under the cursor and its declaration
//! - [`hover`]: hover text
//! - [`completion`]: variable completion items
//! - [`code_lens`]: value and reference swap lenses

pub mod code_lens;
pub mod color;
pub mod completion;
pub mod definition;
pub mod hover;
pub mod workspace;

pub use code_lens::{CodeLens, LensCommand, code_lenses};
pub use color::{color_map, is_color_value};
pub use completion::{CompletionItem, completion_items};
pub use definition::{Location, find_definition, variable_at_offset};
pub use hover::{Hover, hover};
pub use workspace::StyleWorkspace;
