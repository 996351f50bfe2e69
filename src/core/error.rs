//! Error handling for stylescope
//!
//! This module provides the error types and user-facing error reporting for the
//! style symbol engine. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the exact failure mode
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Recoverable and fatal conditions
//!
//! Most conditions in the engine are recovered where they happen and never reach
//! a caller as an `Err`:
//! - [`StyleError::ParseFailure`] - a malformed stylesheet; logged, an empty symbol
//!   table is substituted and resolution continues
//! - [`StyleError::UnresolvedImport`] - an import target is missing or unreadable;
//!   the import contributes nothing
//! - [`StyleError::AliasCycle`] - a variable alias chain loops; reported as "no
//!   terminal value"
//!
//! The remaining variants are surfaced to callers:
//! - [`StyleError::RootDirNotConfigured`] - features needing file lookup are
//!   unavailable until a project root is established
//! - [`StyleError::ConfigParseError`] - bad configuration
//! - [`StyleError::FileReadTimeout`], [`StyleError::IoError`] - file access
//!
//! Use [`user_friendly_error`] to convert any error into an [`ErrorContext`] with
//! contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use stylescope::core::{ErrorContext, StyleError};
//!
//! let context = ErrorContext::new(StyleError::RootDirNotConfigured)
//!     .with_suggestion("Set root_dir in stylescope.toml")
//!     .with_details("Alias and package lookups are relative to the project root");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for stylescope operations.
///
/// Each variant names one failure mode of the engine and carries the details
/// needed to explain it (file paths, variable chains, reasons).
#[derive(Error, Debug)]
pub enum StyleError {
    /// A stylesheet could not be tokenized into statements.
    ///
    /// Never escapes the parser entry points; they log it and return an
    /// empty symbol table.
    #[error("Failed to parse {dialect} stylesheet {path}: {reason}")]
    ParseFailure {
        /// Source path used for diagnostics (may be empty for in-memory text)
        path: String,
        /// Dialect name (`css`, `less`, `scss`)
        dialect: String,
        /// Description of the grammar problem
        reason: String,
        /// Byte offset where the problem was detected
        offset: usize,
    },

    /// An import target does not exist or cannot be read.
    #[error("Unable to resolve import '{import}' from {importer}")]
    UnresolvedImport {
        /// The import path as written in the source
        import: String,
        /// The file containing the import
        importer: String,
    },

    /// A variable alias chain refers back to itself.
    #[error("Cyclic variable alias: {}", chain.join(" -> "))]
    AliasCycle {
        /// Names visited, ending with the repeated name
        chain: Vec<String>,
    },

    /// No project root has been configured.
    #[error("No project root directory is configured")]
    RootDirNotConfigured,

    /// The configuration file exists but is invalid.
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// Configuration file path
        file: String,
        /// Why the configuration was rejected
        reason: String,
    },

    /// Reading a file took longer than the configured read timeout.
    #[error("Timed out after {timeout_ms}ms reading {path}")]
    FileReadTimeout {
        /// File being read
        path: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// IO error from the standard library.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Clone for StyleError {
    fn clone(&self) -> Self {
        match self {
            Self::ParseFailure {
                path,
                dialect,
                reason,
                offset,
            } => Self::ParseFailure {
                path: path.clone(),
                dialect: dialect.clone(),
                reason: reason.clone(),
                offset: *offset,
            },
            Self::UnresolvedImport {
                import,
                importer,
            } => Self::UnresolvedImport {
                import: import.clone(),
                importer: importer.clone(),
            },
            Self::AliasCycle {
                chain,
            } => Self::AliasCycle {
                chain: chain.clone(),
            },
            Self::RootDirNotConfigured => Self::RootDirNotConfigured,
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::FileReadTimeout {
                path,
                timeout_ms,
            } => Self::FileReadTimeout {
                path: path.clone(),
                timeout_ms: *timeout_ms,
            },
            // io::Error is not Clone; keep the kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
        }
    }
}

/// Error wrapper carrying a user-facing suggestion and details.
///
/// Used by the binary to print errors; library code returns [`StyleError`]
/// or `anyhow::Error` and leaves presentation to the caller.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: StyleError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: StyleError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach extra details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion.
///
/// Known [`StyleError`] variants get tailored advice; IO errors are
/// mapped onto [`StyleError::IoError`]; anything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(style_error) = error.downcast_ref::<StyleError>() {
        return create_error_context(style_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let kind = io_error.kind();
        let ctx = ErrorContext::new(StyleError::IoError(std::io::Error::new(
            kind,
            io_error.to_string(),
        )));
        return match kind {
            std::io::ErrorKind::NotFound => ctx
                .with_suggestion("Check that the file or directory exists and the path is correct"),
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check file ownership and read permissions")
            }
            _ => ctx,
        };
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(StyleError::IoError(std::io::Error::other(message)))
}

fn create_error_context(error: StyleError) -> ErrorContext {
    match &error {
        StyleError::RootDirNotConfigured => ErrorContext::new(error)
            .with_suggestion("Set root_dir in stylescope.toml or pass --root")
            .with_details("Alias, package and global-style lookups are relative to the project root"),

        StyleError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in stylescope.toml")
            .with_details("Aliases must be a table of string prefixes to directory paths"),

        StyleError::FileReadTimeout { .. } => ErrorContext::new(error)
            .with_suggestion("Increase [resolver] read_timeout_ms or check the file system is responsive"),

        StyleError::AliasCycle { .. } => ErrorContext::new(error)
            .with_suggestion("Break the loop so the chain ends in a literal value"),

        _ => ErrorContext::new(error),
    }
}
