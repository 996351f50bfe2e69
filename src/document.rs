//! Editor documents and offset/position conversion.
//!
//! The engine works on byte offsets throughout. Editors address text by
//! line and UTF-16 column, so [`LineIndex`] converts between the two at the
//! boundary.

use crate::core::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Zero-based line and UTF-16 column, as editors report cursor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number
    pub line: u32,
    /// Zero-based column in UTF-16 code units
    pub character: u32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self {
            line,
            character,
        }
    }
}

/// An open document supplied by the editor.
///
/// The engine never reads open documents from disk; their text comes from
/// the editor together with a version that increases on every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    /// Document identity (usually a `file://` URI)
    pub uri: String,
    /// Editor language id (`vue`, `html`, `scss`, ...)
    pub language_id: String,
    /// Monotonic edit version
    pub version: i64,
    /// Full text
    pub text: String,
}

impl TextDocument {
    /// Create a document.
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        version: i64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            version,
            text: text.into(),
        }
    }

    /// Language of the whole document.
    #[must_use]
    pub fn language(&self) -> Language {
        Language::from_language_id(&self.language_id)
    }

    /// Filesystem path for the document.
    ///
    /// `file://` URIs are decoded (percent escapes included); any other value
    /// is taken as a plain path.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        uri_to_path(&self.uri)
    }
}

/// Convert a `file://` URI (or plain path) to a filesystem path.
///
/// Anything that is not a `file` URL, or that names a remote host, is taken
/// as a plain path.
#[must_use]
pub fn uri_to_path(uri: &str) -> PathBuf {
    match Url::parse(uri) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().unwrap_or_else(|()| {
            tracing::debug!("{uri} has no local file path, using it as a path");
            PathBuf::from(uri)
        }),
        _ => PathBuf::from(uri),
    }
}

/// `file://` URI for an absolute path; relative paths are returned as-is.
#[must_use]
pub fn path_to_uri(path: &Path) -> String {
    Url::from_file_path(path).map_or_else(|()| path.display().to_string(), String::from)
}

/// Line start table for converting offsets to positions and back.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the index. `\n`, `\r\n` and lone `\r` all end a line.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    line_starts.push(i + 2);
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Byte offsets at which each line starts.
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    #[must_use]
    pub fn position_at(&self, text: &str, offset: usize) -> Position {
        let offset = floor_char_boundary(text, offset.min(self.len));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let character = text[start..offset].encode_utf16().count();
        Position::new(line as u32, character as u32)
    }

    /// Byte offset of a position. Columns past the end of the line clamp to
    /// the line end; lines past the end clamp to the document end.
    #[must_use]
    pub fn offset_at(&self, text: &str, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return self.len;
        }
        let start = self.line_starts[line];
        let end = self.line_starts.get(line + 1).copied().unwrap_or(self.len);
        let line_text = text[start..end].trim_end_matches(['\r', '\n']);

        let mut units = 0u32;
        for (i, ch) in line_text.char_indices() {
            if units >= position.character {
                return start + i;
            }
            units += ch.len_utf16() as u32;
        }
        start + line_text.len()
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
