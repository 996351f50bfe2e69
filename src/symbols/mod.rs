//! Symbol resolution across stylesheets.
//!
//! - [`graph`]: walks imports from a set of roots and merges the symbol
//!   tables of every stylesheet reached
//! - [`cache`]: the persistent per-path table cache the walk consults
//! - [`alias`]: follows variable-to-variable references to a terminal value

pub mod alias;
pub mod cache;
pub mod graph;

pub use alias::{resolve_terminal, try_resolve_terminal};
pub use cache::{CacheStats, CachedTable, SymbolCache};
pub use graph::{ResolveOptions, ResolvedEntry, ResolvedSymbolMap, SymbolGraph, SymbolRoot};
