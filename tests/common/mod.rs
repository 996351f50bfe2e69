//! Common test utilities for stylescope integration tests
//!
//! Wraps [`StyleFixture`] with helpers for building workspaces and running
//! the binary against a fixture project.

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use stylescope::config::{AliasMap, WorkspaceConfig};
use stylescope::document::path_to_uri;
use stylescope::resolver::PathResolver;
use stylescope::symbols::{SymbolCache, SymbolGraph};
use stylescope::test_utils::StyleFixture;

/// A fixture project plus a symbol graph over a fresh cache.
pub struct TestProject {
    pub fixture: StyleFixture,
}

impl TestProject {
    /// Create an empty project.
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: StyleFixture::new()?,
        })
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.fixture.root()
    }

    /// Write a file relative to the project root.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        self.fixture.write(relative, content)
    }

    /// Graph without aliases over a new cache.
    pub fn graph(&self) -> SymbolGraph {
        self.graph_with_aliases(AliasMap::new())
    }

    /// Graph with `aliases` over a new cache.
    pub fn graph_with_aliases(&self, aliases: AliasMap) -> SymbolGraph {
        SymbolGraph::new(Arc::new(SymbolCache::new()), PathResolver::new(self.root(), aliases))
    }

    /// Configuration rooted at the project.
    pub fn config(&self) -> WorkspaceConfig {
        WorkspaceConfig::with_root(self.root())
    }

    /// `file://` URI of a project file.
    pub fn uri(&self, relative: &str) -> String {
        path_to_uri(&self.root().join(relative))
    }

    /// Run the stylescope binary in the project directory.
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_stylescope"))
            .args(args)
            .current_dir(self.root())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run stylescope")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Captured output of a CLI run.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}
