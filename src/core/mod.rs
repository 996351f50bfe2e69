//! Core types shared by every stylescope module
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`StyleError`] - one variant per failure mode of the engine
//! - [`ErrorContext`] - user-facing wrapper with suggestions and details
//! - [`user_friendly_error`] - convert any error into an [`ErrorContext`]
//!
//! ## `file_error` - File Operation Context
//!
//! - [`FileOperationError`](file_error::FileOperationError) - IO failures that
//!   remember which file, why, and who asked
//! - [`FileOps`](file_error::FileOps) - reads with context and timeouts
//!
//! ## `dialect` - Languages
//!
//! - [`Dialect`] - CSS, LESS, SCSS
//! - [`Language`] - a dialect or the host markup language
//!
//! # Example
//!
//! ```rust
//! use stylescope::core::{Dialect, Language};
//! use std::path::Path;
//!
//! assert_eq!(Dialect::from_path(Path::new("theme.less")), Dialect::Less);
//! assert_eq!(Language::from_language_id("vue"), Language::Host);
//! ```

pub mod dialect;
pub mod error;
pub mod file_error;

pub use dialect::{Dialect, Language};
pub use error::{ErrorContext, StyleError, user_friendly_error};
