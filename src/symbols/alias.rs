//! Variable alias chains.
//!
//! A variable whose value is a reference to another variable (`@primary:
//! @accent`, `$a: $b`, `--a: var(--b)`) is an alias. The terminal value is
//! found by following references until a value that is not a known
//! variable. Chains that loop back on themselves have no terminal value.

use crate::core::StyleError;
use std::collections::{HashMap, HashSet};

/// Follow `name` to its terminal value.
///
/// Returns `None` for unknown names and for cyclic chains; cycles are logged.
#[must_use]
pub fn resolve_terminal(name: &str, values: &HashMap<String, String>) -> Option<String> {
    match try_resolve_terminal(name, values) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("{e}");
            None
        }
    }
}

/// Follow `name` to its terminal value, reporting cycles.
///
/// # Errors
///
/// Returns [`StyleError::AliasCycle`] with the visited chain when a name is
/// reached twice.
pub fn try_resolve_terminal(
    name: &str,
    values: &HashMap<String, String>,
) -> Result<Option<String>, StyleError> {
    let Some(mut value) = values.get(name) else {
        return Ok(None);
    };
    let mut chain = vec![name.to_string()];
    let mut visited: HashSet<&str> = HashSet::from([name]);

    while let Some(next) = referenced_name(value).filter(|n| values.contains_key(*n)) {
        chain.push(next.to_string());
        if !visited.insert(next) {
            return Err(StyleError::AliasCycle {
                chain,
            });
        }
        value = &values[next];
    }

    Ok(Some(value.clone()))
}

/// Variable named by a bare reference value, in any dialect's syntax.
///
/// ```
/// use stylescope::symbols::alias::referenced_name;
///
/// assert_eq!(referenced_name("@accent"), Some("accent"));
/// assert_eq!(referenced_name("$gap"), Some("gap"));
/// assert_eq!(referenced_name("var(--c, #fff)"), Some("c"));
/// assert_eq!(referenced_name("#112233"), None);
/// ```
#[must_use]
pub fn referenced_name(value: &str) -> Option<&str> {
    let value = value.trim();
    let name = if let Some(inner) = value.strip_prefix("var(").and_then(|v| v.strip_suffix(')')) {
        let inner = inner.split(',').next().unwrap_or_default().trim();
        inner.strip_prefix("--")?
    } else if let Some(rest) = value.strip_prefix('@').or_else(|| value.strip_prefix('$')) {
        rest
    } else {
        return None;
    };
    let is_name =
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    is_name.then_some(name)
}
