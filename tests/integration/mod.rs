//! Integration test suite for stylescope
//!
//! End-to-end tests over real fixture projects on disk.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: the reference behaviours of parsing, aliasing, projection and imports
//! - **projection**: offset and partition properties of region extraction
//! - **closure**: import walks, caching, aliases, packages and cycles
//! - **workspace**: the editor-facing facade across configuration and file events
//! - **cli**: the `stylescope` binary

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod closure;
mod projection;
mod scenarios;
mod workspace;
