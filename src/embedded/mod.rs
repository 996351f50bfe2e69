//! Embedded stylesheet regions in composite markup documents.
//!
//! Single-file component formats (Vue, Svelte, plain HTML) host stylesheets
//! inside `<style>` elements and `style="..."` attributes. [`extract`] scans
//! a document once and records those spans as [`Region`]s; the resulting
//! [`RegionModel`] answers "which language is at this offset" and produces
//! per-dialect projections that the stylesheet parsers can consume while
//! keeping every offset valid in the original document.
//!
//! # Example
//!
//! ```rust
//! use stylescope::core::{Dialect, Language};
//! use stylescope::embedded::extract;
//!
//! let text = "<template><p/></template><style lang=\"scss\">$a: red;</style>";
//! let model = extract(text);
//!
//! assert_eq!(model.languages_present(), vec![Dialect::Scss]);
//! let offset = text.find("$a").unwrap();
//! assert_eq!(model.language_at_offset(offset), Language::Style(Dialect::Scss));
//!
//! let projection = model.project(Dialect::Scss, false);
//! assert_eq!(&projection[offset..offset + 8], "$a: red;");
//! ```

pub mod projection;
pub mod scanner;

use crate::constants::MAX_DIALECTS_PER_DOCUMENT;
use crate::core::{Dialect, Language};
use crate::document::{LineIndex, Position};
use scanner::{Scanner, Token};
use serde::Serialize;

/// A span of the document written in one stylesheet dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset just past the last byte
    pub end: usize,
    /// Dialect of the span
    pub dialect: Dialect,
    /// Whether the span is the value of a `style` attribute rather than an
    /// element body
    pub is_attribute_value: bool,
}

/// One span of the full partition returned by [`RegionModel::language_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageRange {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset just past the last byte
    pub end: usize,
    /// Language of the span
    pub language: Language,
    /// Set for `style="..."` value spans
    pub is_attribute_value: bool,
}

/// Regions of one document version.
#[derive(Debug, Clone)]
pub struct RegionModel {
    text: String,
    regions: Vec<Region>,
    line_index: LineIndex,
}

/// Scan `text` for embedded stylesheet regions.
#[must_use]
pub fn extract(text: &str) -> RegionModel {
    let mut regions = Vec::new();
    let mut tag = "";
    let mut attribute: Option<&str> = None;
    let mut dialect = Dialect::Css;

    for token in Scanner::new(text) {
        match token {
            Token::StartTag(name) => {
                tag = name;
                attribute = None;
                dialect = Dialect::Css;
            }
            Token::AttributeName(name) => attribute = Some(name),
            Token::AttributeValue {
                value,
                start,
                end,
            } => {
                match attribute {
                    Some(name) if name.eq_ignore_ascii_case("lang") && tag.eq_ignore_ascii_case("style") => {
                        dialect = Dialect::from_lang_attribute(value);
                    }
                    Some(name) if name.eq_ignore_ascii_case("style") && end > start => {
                        regions.push(Region {
                            start,
                            end,
                            dialect: Dialect::Css,
                            is_attribute_value: true,
                        });
                    }
                    _ => {}
                }
                attribute = None;
            }
            Token::Styles {
                start,
                end,
            } => regions.push(Region {
                start,
                end,
                dialect,
                is_attribute_value: false,
            }),
            Token::StartTagClose | Token::EndTag(_) => {}
        }
    }

    tracing::trace!("extracted {} style regions", regions.len());
    RegionModel {
        text: text.to_string(),
        regions,
        line_index: LineIndex::new(text),
    }
}

impl RegionModel {
    /// Document text the model was built from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Regions in document order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Line index of the document text.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Language at a byte offset. Region ends are inclusive, so a cursor
    /// sitting just after the last byte of a style body still belongs to it.
    #[must_use]
    pub fn language_at_offset(&self, offset: usize) -> Language {
        for region in &self.regions {
            if region.start > offset {
                break;
            }
            if offset <= region.end {
                return Language::Style(region.dialect);
            }
        }
        Language::Host
    }

    /// Language at an editor position.
    #[must_use]
    pub fn language_at(&self, position: Position) -> Language {
        self.language_at_offset(self.line_index.offset_at(&self.text, position))
    }

    /// Distinct dialects in region order, at most three.
    #[must_use]
    pub fn languages_present(&self) -> Vec<Dialect> {
        let mut present = Vec::new();
        for region in &self.regions {
            if !present.contains(&region.dialect) {
                present.push(region.dialect);
                if present.len() == MAX_DIALECTS_PER_DOCUMENT {
                    break;
                }
            }
        }
        present
    }

    /// Byte-length-preserving projection of `dialect`.
    #[must_use]
    pub fn project(&self, dialect: Dialect, ignore_attribute_values: bool) -> String {
        projection::project(&self.text, &self.regions, dialect, ignore_attribute_values)
    }

    /// Partition of `[0, len)` into host and region spans, without gaps.
    #[must_use]
    pub fn language_ranges(&self) -> Vec<LanguageRange> {
        let mut ranges = Vec::with_capacity(self.regions.len() * 2 + 1);
        let mut cursor = 0;

        for region in &self.regions {
            if cursor < region.start {
                ranges.push(LanguageRange {
                    start: cursor,
                    end: region.start,
                    language: Language::Host,
                    is_attribute_value: false,
                });
            }
            ranges.push(LanguageRange {
                start: region.start,
                end: region.end,
                language: Language::Style(region.dialect),
                is_attribute_value: region.is_attribute_value,
            });
            cursor = region.end;
        }
        if cursor < self.text.len() {
            ranges.push(LanguageRange {
                start: cursor,
                end: self.text.len(),
                language: Language::Host,
                is_attribute_value: false,
            });
        }
        ranges
    }
}
