//! Filesystem fixtures for stylesheet projects.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory removed on drop.
///
/// # Example
///
/// ```rust,no_run
/// use stylescope::test_utils::StyleFixture;
///
/// # fn main() -> anyhow::Result<()> {
/// let fixture = StyleFixture::new()?;
/// let vars = fixture.write("src/styles/vars.less", "@accent: #112233;")?;
/// assert!(vars.starts_with(fixture.root()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StyleFixture {
    temp_dir: TempDir,
}

impl StyleFixture {
    /// Create an empty project directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create fixture directory")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories, and
    /// return the absolute path.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }

    /// Write `stylescope.toml` at the project root.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.write(crate::constants::CONFIG_FILE_NAME, content)
    }
}
