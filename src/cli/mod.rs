//! Command-line interface for stylescope.
//!
//! The CLI exposes the symbol engine for scripting and debugging editor
//! integrations. Every command that resolves symbols loads
//! `stylescope.toml` from the current directory (or `--config`), so aliases
//! and global stylesheets apply exactly as they do in the editor.
//!
//! # Commands
//!
//! - `symbols` - resolve and print the symbol closure of stylesheets or markup files
//! - `regions` - print the language ranges of a markup document
//! - `project` - print the byte-preserving projection of one dialect
//! - `colors` - print the variables that resolve to colors
//! - `definition` - find where the variable at a position is declared
//! - `lenses` - print the value/reference swap lenses of a document
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - configuration file to use instead of `./stylescope.toml`
//! - `--root` - project root, overriding the configuration
//!
//! # Examples
//!
//! ```bash
//! stylescope symbols src/styles/theme.less
//! stylescope project src/App.vue --dialect scss
//! stylescope definition src/App.vue 12 18
//! ```

mod colors;
pub mod common;
mod definition;
mod lenses;
mod project;
mod regions;
mod symbols;

use crate::config::WorkspaceConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` leaves `RUST_LOG` in charge
    pub log_level: Option<String>,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
    /// Project root override
    pub root_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tracing subscriber. Logs go to stderr so command output
    /// on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load the workspace configuration these settings point at.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the
    /// configuration file cannot be read or parsed.
    pub async fn load_workspace_config(&self) -> Result<WorkspaceConfig> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let mut config = WorkspaceConfig::load_with_optional(self.config_path.clone(), &cwd).await?;
        if let Some(root) = &self.root_dir {
            let root = std::path::absolute(root)
                .with_context(|| format!("Failed to resolve project root {}", root.display()))?;
            config.root_dir = Some(root);
        }
        Ok(config)
    }
}

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "stylescope",
    about = "Resolve CSS, LESS and SCSS variables across imports and embedded style blocks",
    version,
    long_about = "stylescope extracts style variables from stylesheets and markup documents, \
                  follows imports through path aliases and resolves variable aliases to their values."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (defaults to ./stylescope.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root directory, overriding root_dir from the configuration
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved symbol closure of stylesheets or markup files
    Symbols(symbols::SymbolsCommand),

    /// Print the language ranges of a markup document
    Regions(regions::RegionsCommand),

    /// Print the projection of one dialect out of a markup document
    Project(project::ProjectCommand),

    /// Print variables that resolve to colors
    Colors(colors::ColorsCommand),

    /// Find the declaration of the variable at a position
    Definition(definition::DefinitionCommand),

    /// Print the value and reference swap lenses of a document
    Lenses(lenses::LensesCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` turns it into a user-facing
    /// message and exit code 1.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Settings from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            root_dir: self.root.clone(),
        }
    }

    /// Execute with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Regions(cmd) => cmd.execute().await,
            Commands::Project(cmd) => cmd.execute().await,
            Commands::Symbols(cmd) => cmd.execute(config.load_workspace_config().await?).await,
            Commands::Colors(cmd) => cmd.execute(config.load_workspace_config().await?).await,
            Commands::Definition(cmd) => cmd.execute(config.load_workspace_config().await?).await,
            Commands::Lenses(cmd) => cmd.execute(config.load_workspace_config().await?).await,
        }
    }
}
