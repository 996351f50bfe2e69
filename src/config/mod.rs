//! Workspace configuration for stylescope
//!
//! Configuration comes from a `stylescope.toml` file in the project root (or
//! an explicit `--config` path). Every setting has a default, so a project
//! without a configuration file works as long as a root directory is known.
//!
//! # Configuration File
//!
//! ```toml
//! # Project root; relative paths are resolved against the config file's
//! # directory, and a missing value means "the config file's directory"
//! root_dir = "."
//!
//! # Stylesheets (or directories of stylesheets) whose symbols are visible
//! # in every document
//! global_style = ["src/styles", "theme.less"]
//!
//! # Import path aliases; the first matching prefix wins, in file order
//! [aliases]
//! "@" = "src"
//! "$theme" = "src/theme"
//!
//! [model_cache]
//! max_entries = 30
//! ttl_secs = 120
//!
//! [resolver]
//! read_timeout_ms = 5000
//!
//! [code_lens]
//! enabled = true
//! variable_to_value = false
//! ```
//!
//! # Modules
//!
//! - `aliases` - ordered alias map with prefix/target normalization

pub mod aliases;

pub use aliases::{AliasMap, PathAlias};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_MODEL_CACHE_ENTRIES, STYLE_EXTENSIONS, default_model_ttl,
    default_read_timeout,
};
use crate::core::StyleError;
use crate::core::file_error::{
    FileOperation, FileOperationContext, FileOperationError, FileResultExt,
};
use crate::resolver::PathResolver;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use walkdir::WalkDir;

/// Region model cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCacheSettings {
    /// Maximum number of cached documents
    pub max_entries: usize,
    /// Idle seconds before a cached model is swept (0 disables the sweep)
    pub ttl_secs: u64,
}

impl Default for ModelCacheSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MODEL_CACHE_ENTRIES,
            ttl_secs: default_model_ttl().as_secs(),
        }
    }
}

impl ModelCacheSettings {
    /// Idle time as a duration.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Import resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Per-file read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            read_timeout_ms: u64::try_from(default_read_timeout().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl ResolverSettings {
    /// Read timeout as a duration.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Code lens settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeLensSettings {
    /// Offer lenses at all
    pub enabled: bool,
    /// Also offer to replace variable references with their values
    pub variable_to_value: bool,
}

impl Default for CodeLensSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            variable_to_value: false,
        }
    }
}

/// Complete workspace configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Project root for alias, package and global-style lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
    /// Global stylesheet files or directories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_style: Vec<String>,
    /// Import path aliases
    pub aliases: AliasMap,
    /// Region model cache
    pub model_cache: ModelCacheSettings,
    /// Import resolution
    pub resolver: ResolverSettings,
    /// Value and reference code lenses
    pub code_lens: CodeLensSettings,
}

impl WorkspaceConfig {
    /// Configuration rooted at `root_dir` with all other settings defaulted.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: Some(root_dir.into()),
            ..Self::default()
        }
    }

    /// Load `stylescope.toml` from `project_dir`, or default settings rooted
    /// at `project_dir` when there is no such file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, project_dir.display());
            Ok(Self::with_root(project_dir))
        }
    }

    /// Load from an explicit path when given, else from `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed. An
    /// explicit path that does not exist is an error.
    pub async fn load_with_optional(path: Option<PathBuf>, project_dir: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load(project_dir).await,
        }
    }

    /// Load a configuration file.
    ///
    /// A missing or relative `root_dir` is resolved against the file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid
    /// configuration TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| StyleError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let root = match config.root_dir.take() {
            Some(root) if root.is_absolute() => root,
            Some(root) => crate::resolver::normalize_path(&base.join(root)),
            None => base,
        };
        config.root_dir = Some(root);

        tracing::debug!(
            "loaded {} ({} aliases, {} global style entries)",
            path.display(),
            config.aliases.len(),
            config.global_style.len()
        );
        Ok(config)
    }

    /// The project root.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub fn root_dir(&self) -> Result<&Path, StyleError> {
        self.root_dir.as_deref().ok_or(StyleError::RootDirNotConfigured)
    }

    /// Path resolver for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub fn path_resolver(&self) -> Result<PathResolver, StyleError> {
        Ok(PathResolver::new(self.root_dir()?, self.aliases.clone()))
    }

    /// Expand `global_style` into stylesheet files.
    ///
    /// Entries are resolved like imports from the project root. Directories
    /// are walked recursively for files with a stylesheet extension; file
    /// entries are kept as-is. Entries that do not exist are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::RootDirNotConfigured`] when no root is set.
    pub fn global_style_files(&self) -> Result<Vec<PathBuf>, StyleError> {
        let resolver = self.path_resolver()?;
        let mut files = Vec::new();

        for entry in &self.global_style {
            let path = resolver.resolve(entry, resolver.root_dir());
            if path.is_file() {
                files.push(path);
            } else if path.is_dir() {
                files.extend(style_files_in(&path));
            } else {
                let error = std::fs::metadata(&path)
                    .with_file_context(FileOperation::Metadata, &path, "global style", "config")
                    .err();
                if let Some(error) = error {
                    tracing::warn!("{}", error.user_message());
                }
            }
        }

        Ok(files)
    }
}

/// Stylesheet files under `dir`, sorted for a stable walk order.
fn style_files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() && has_style_extension(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => {
                let io = e.into_io_error().unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                let error = FileOperationError::new(
                    FileOperationContext::new(FileOperation::Walk, dir, "global style", "config"),
                    io,
                );
                tracing::warn!("{}", error.user_message());
            }
        }
    }
    files
}

fn has_style_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| STYLE_EXTENSIONS.iter().any(|allowed| allowed[1..].eq_ignore_ascii_case(ext)))
}
