//! Stylesheet dialects and document languages.
//!
//! A [`Dialect`] is one of the three stylesheet grammars the engine extracts
//! symbols from. A [`Language`] classifies a span of a composite document:
//! either one of the dialects or the host markup language around it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Stylesheet grammar handled by a dedicated symbol parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Plain CSS; variables are `--name` custom properties in `:root`
    Css,
    /// LESS; variables are `@name`
    Less,
    /// SCSS (and indented-syntax files mapped onto it); variables are `$name`
    Scss,
}

impl Dialect {
    /// All dialects in lookup-table order.
    pub const ALL: [Dialect; 3] = [Dialect::Css, Dialect::Less, Dialect::Scss];

    /// Position of this dialect in [`Dialect::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Dialect::Css => 0,
            Dialect::Less => 1,
            Dialect::Scss => 2,
        }
    }

    /// Lowercase dialect name, also used as editor language id.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Css => "css",
            Dialect::Less => "less",
            Dialect::Scss => "scss",
        }
    }

    /// Default file extension (without dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.name()
    }

    /// Variable sigil as written at a declaration site.
    #[must_use]
    pub const fn sigil(self) -> &'static str {
        match self {
            Dialect::Css => "--",
            Dialect::Less => "@",
            Dialect::Scss => "$",
        }
    }

    /// Render a reference to variable `name` in this dialect's syntax.
    ///
    /// ```
    /// use stylescope::core::Dialect;
    ///
    /// assert_eq!(Dialect::Css.reference("primary"), "var(--primary)");
    /// assert_eq!(Dialect::Less.reference("primary"), "@primary");
    /// assert_eq!(Dialect::Scss.reference("primary"), "$primary");
    /// ```
    #[must_use]
    pub fn reference(self, name: &str) -> String {
        match self {
            Dialect::Css => format!("var(--{name})"),
            Dialect::Less => format!("@{name}"),
            Dialect::Scss => format!("${name}"),
        }
    }

    /// Synthetic text placed before an attribute-value region in a projection.
    #[must_use]
    pub const fn attribute_prefix(self) -> &'static str {
        match self {
            Dialect::Css => "__{",
            Dialect::Less => "@",
            Dialect::Scss => "$",
        }
    }

    /// Synthetic text placed after an attribute-value region in a projection.
    #[must_use]
    pub const fn attribute_suffix(self) -> &'static str {
        match self {
            Dialect::Css => "}",
            Dialect::Less | Dialect::Scss => "",
        }
    }

    /// Map an editor language id or file extension to a dialect.
    ///
    /// PostCSS flavours map to CSS and the indented `sass` syntax maps to SCSS.
    #[must_use]
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "css" | "pcss" | "postcss" => Some(Dialect::Css),
            "less" => Some(Dialect::Less),
            "scss" | "sass" => Some(Dialect::Scss),
            _ => None,
        }
    }

    /// Dialect of a stylesheet file, judged by its extension.
    ///
    /// Unknown or missing extensions are treated as CSS, which is how bare
    /// `@import url(...)` targets behave in practice.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_language_id)
            .unwrap_or(Dialect::Css)
    }

    /// Dialect selected by a `<style lang="...">` attribute value.
    ///
    /// The value may still carry its quotes. Anything other than `less`,
    /// `scss` or `sass` selects CSS.
    #[must_use]
    pub fn from_lang_attribute(value: &str) -> Self {
        let unquoted = value.trim().trim_matches(|c| c == '"' || c == '\'');
        match unquoted.to_ascii_lowercase().as_str() {
            "less" => Dialect::Less,
            "scss" | "sass" => Dialect::Scss,
            _ => Dialect::Css,
        }
    }

    /// Whether `//` starts a line comment in this dialect.
    #[must_use]
    pub const fn has_line_comments(self) -> bool {
        !matches!(self, Dialect::Css)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a span in a (possibly composite) document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "dialect")]
pub enum Language {
    /// The outer markup document hosting style blocks
    Host,
    /// An embedded or standalone stylesheet
    Style(Dialect),
}

impl Language {
    /// Map an editor language id. Markup ids (`vue`, `html`, `svelte`, ...)
    /// and anything unrecognised are the host language.
    #[must_use]
    pub fn from_language_id(id: &str) -> Self {
        Dialect::from_language_id(id).map_or(Language::Host, Language::Style)
    }

    /// The dialect, if this is a stylesheet language.
    #[must_use]
    pub const fn dialect(self) -> Option<Dialect> {
        match self {
            Language::Host => None,
            Language::Style(d) => Some(d),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Host => f.write_str("host"),
            Language::Style(d) => write!(f, "{d}"),
        }
    }
}
