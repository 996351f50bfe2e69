//! Offset-preserving projection of one dialect out of a composite document.
//!
//! The projection has exactly the byte length and line starts of the source:
//! bytes of matching regions are copied, every other byte becomes a space
//! except `\n` and `\r`, which are kept. Offsets and line/column positions
//! computed on the projection are therefore valid in the source.

use super::Region;
use crate::core::Dialect;

/// Project `dialect` out of `text`.
///
/// Attribute-value regions are wrapped in the dialect's prefix/suffix (for
/// CSS, `__{` and `}`) written over the padding next to them, so a lone
/// declaration list parses as a rule. Prefix and suffix are placed together
/// or not at all: when the padding before the region (on its line) cannot
/// hold the prefix, or the padding after it (on its line) cannot hold the
/// suffix, the region is padded like foreign content. With
/// `ignore_attribute_values`, attribute-value regions are always padded.
#[must_use]
pub fn project(
    text: &str,
    regions: &[Region],
    dialect: Dialect,
    ignore_attribute_values: bool,
) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = bytes.iter().map(|&b| if is_line_break(b) { b } else { b' ' }).collect();

    let selected: Vec<&Region> = regions
        .iter()
        .filter(|r| r.dialect == dialect && !(ignore_attribute_values && r.is_attribute_value))
        .collect();
    let prefix = dialect.attribute_prefix().as_bytes();
    let suffix = dialect.attribute_suffix().as_bytes();

    let mut gap_start = 0;
    // bytes at the start of the current gap taken by the previous suffix
    let mut reserved = 0;

    for (i, region) in selected.iter().enumerate() {
        let next_start = selected.get(i + 1).map_or(bytes.len(), |r| r.start);
        let before = &bytes[gap_start..region.start];
        let after = &bytes[region.end..next_start];

        if region.is_attribute_value {
            let wrap = prefix.len() <= trailing_room(before, reserved) && suffix.len() <= leading_room(after);
            reserved = 0;
            if wrap {
                out[region.start - prefix.len()..region.start].copy_from_slice(prefix);
                out[region.start..region.end].copy_from_slice(&bytes[region.start..region.end]);
                out[region.end..region.end + suffix.len()].copy_from_slice(suffix);
                reserved = suffix.len();
            } else {
                tracing::trace!("attribute value at {} has no room to wrap, padding it", region.start);
            }
        } else {
            out[region.start..region.end].copy_from_slice(&bytes[region.start..region.end]);
            reserved = 0;
        }
        gap_start = region.end;
    }

    // regions start and end on ASCII delimiters, so the copied spans are whole characters
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn is_line_break(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Padding available on the first line of `gap`.
fn leading_room(gap: &[u8]) -> usize {
    gap.iter().position(|&b| is_line_break(b)).unwrap_or(gap.len())
}

/// Padding available on the last line of `gap`, minus `reserved` bytes
/// already used at its start when the gap is a single line.
fn trailing_room(gap: &[u8], reserved: usize) -> usize {
    match gap.iter().rposition(|&b| is_line_break(b)) {
        Some(last) => gap.len() - last - 1,
        None => gap.len().saturating_sub(reserved),
    }
}
