//! Color classification for variable values.
//!
//! Editors draw a swatch next to variables whose value is a color. The
//! color map is built from a resolved closure: every variable is followed
//! to its terminal value and kept only when that value is a CSS color.

use crate::core::Dialect;
use crate::symbols::{ResolvedSymbolMap, resolve_terminal};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rgba?|hsla?|hwb|lab|lch|oklab|oklch)\(\s*[^()]*\)$")
        .expect("color function pattern is valid")
});

/// CSS Color Module named colors.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// Whether `value` is a CSS color literal.
///
/// ```
/// use stylescope::services::color::is_color_value;
///
/// assert!(is_color_value("#112233"));
/// assert!(is_color_value("rgba(0, 0, 0, .5)"));
/// assert!(is_color_value("oklch(70% 0.1 200)"));
/// assert!(is_color_value("RebeccaPurple"));
/// assert!(!is_color_value("12px"));
/// ```
#[must_use]
pub fn is_color_value(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let lower = value.to_ascii_lowercase();
    if lower == "transparent" || lower == "currentcolor" || NAMED_COLORS.contains(&lower.as_str()) {
        return true;
    }
    HEX_COLOR.is_match(value) || COLOR_FUNCTION.is_match(value)
}

/// Variable name to terminal color value.
///
/// Aliases are followed through the whole closure; variables whose chain
/// loops or ends in a non-color are left out. With `dialect` set, only
/// declarations in files of that dialect are considered.
#[must_use]
pub fn color_map(symbols: &ResolvedSymbolMap, dialect: Option<Dialect>) -> BTreeMap<String, String> {
    let values = symbols.flatten(dialect);
    values
        .keys()
        .filter_map(|name| {
            let terminal = resolve_terminal(name, &values)?;
            is_color_value(&terminal).then(|| (name.clone(), terminal))
        })
        .collect()
}
