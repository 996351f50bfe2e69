//! Import path resolution.
//!
//! Turns a path as written in an `@import` (or a configured global-style
//! entry) into an absolute file path. Resolution never fails: when no
//! candidate exists on disk the plain relative-to-importer path is returned,
//! and the caller treats a missing file as "no symbols".
//!
//! # Candidate order
//!
//! 1. An absolute path that exists is returned unchanged.
//! 2. A single leading `~` (the old webpack "from node_modules/root" marker)
//!    is stripped.
//! 3. The first alias prefix matching the path is substituted; a relative
//!    result is anchored at the project root.
//! 4. `<root>/node_modules/<path>` for package imports.
//! 5. `<dir of importer>/<path>`.
//!
//! ```rust,no_run
//! use stylescope::config::AliasMap;
//! use stylescope::resolver::path::resolve_path;
//! use std::path::Path;
//!
//! let aliases = AliasMap::from_pairs([("@", "src")]);
//! let path = resolve_path(
//!     "@/styles/vars.less",
//!     Path::new("/project/src/App.vue"),
//!     &aliases,
//!     Path::new("/project"),
//! );
//! // "/project/src/styles/vars.less" if it exists
//! # let _ = path;
//! ```

use crate::config::AliasMap;
use crate::constants::PACKAGE_DIR;
use crate::core::Dialect;
use std::path::{Component, Path, PathBuf};

/// Resolve `raw` as referenced from `base` (a file or a directory).
#[must_use]
pub fn resolve_path(raw: &str, base: &Path, aliases: &AliasMap, root_dir: &Path) -> PathBuf {
    let raw_path = Path::new(raw);
    if is_existing_absolute(raw_path) {
        return raw_path.to_path_buf();
    }

    let raw = raw.strip_prefix('~').unwrap_or(raw);

    let base_dir = if base.is_dir() {
        base
    } else {
        base.parent().unwrap_or(base)
    };

    let alias_path = substitute_alias(raw, aliases, root_dir);
    if is_existing_absolute(&alias_path) {
        return alias_path;
    }

    let package_path = normalize_path(&root_dir.join(PACKAGE_DIR).join(raw));
    if is_existing_absolute(&package_path) {
        return package_path;
    }

    normalize_path(&base_dir.join(raw))
}

/// Resolve an import, trying the importer dialect's extension conventions
/// when the path has no extension.
///
/// LESS appends `.less`; SCSS tries `name.scss`, the partial `_name.scss`
/// and `name/_index.scss`; CSS appends `.css`. The first candidate that
/// exists wins, otherwise the plain resolution of `raw` is returned.
#[must_use]
pub fn resolve_import(
    raw: &str,
    importer: &Path,
    dialect: Dialect,
    aliases: &AliasMap,
    root_dir: &Path,
) -> PathBuf {
    let plain = resolve_path(raw, importer, aliases, root_dir);
    if plain.is_file() || Path::new(raw).extension().is_some() {
        return plain;
    }

    extension_candidates(raw.strip_prefix('~').unwrap_or(raw), dialect)
        .into_iter()
        .map(|candidate| resolve_path(&candidate, importer, aliases, root_dir))
        .find(|path| path.is_file())
        .unwrap_or(plain)
}

/// Import spellings to try for an extensionless `raw` path.
fn extension_candidates(raw: &str, dialect: Dialect) -> Vec<String> {
    let ext = dialect.extension();
    match dialect {
        Dialect::Css | Dialect::Less => vec![format!("{raw}.{ext}")],
        Dialect::Scss => {
            let (dir, name) = match raw.rfind('/') {
                Some(i) => (&raw[..=i], &raw[i + 1..]),
                None => ("", raw),
            };
            vec![
                format!("{raw}.{ext}"),
                format!("{dir}_{name}.{ext}"),
                format!("{raw}/_index.{ext}"),
            ]
        }
    }
}

/// Substitute the first matching alias prefix. Without a match the path is
/// returned as written.
fn substitute_alias(raw: &str, aliases: &AliasMap, root_dir: &Path) -> PathBuf {
    let Some(alias) = aliases.first_match(raw) else {
        return PathBuf::from(raw);
    };

    let substituted = Path::new(&alias.target).join(&raw[alias.prefix.len()..]);
    if substituted.is_absolute() {
        normalize_path(&substituted)
    } else {
        normalize_path(&root_dir.join(substituted))
    }
}

fn is_existing_absolute(path: &Path) -> bool {
    path.is_absolute() && path.exists()
}

/// Lexically normalize a path, removing `.` and resolving `..` components.
///
/// Does not touch the filesystem, so symlinks are not followed.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/foo/./bar/../baz")), PathBuf::from("/foo/baz"));
        assert_eq!(normalize_path(Path::new("../src/./lib.rs")), PathBuf::from("../src/lib.rs"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_existing_absolute_path_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let file = touch(temp.path(), "a.css");
        let resolved =
            resolve_path(file.to_str().unwrap(), Path::new("/elsewhere"), &AliasMap::new(), temp.path());
        assert_eq!(resolved, file);
    }

    #[test]
    fn test_relative_to_importer() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "styles/main.less");
        let target = touch(temp.path(), "styles/vars.less");

        let resolved = resolve_path("./vars.less", &importer, &AliasMap::new(), temp.path());
        assert_eq!(resolved, target);
    }

    #[test]
    fn test_base_may_be_directory() {
        let temp = TempDir::new().unwrap();
        let target = touch(temp.path(), "theme/a.css");
        let resolved = resolve_path("theme/a.css", temp.path(), &AliasMap::new(), temp.path());
        assert_eq!(resolved, target);
    }

    #[test]
    fn test_alias_substitution() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "src/pages/App.vue");
        let target = touch(temp.path(), "src/styles/vars.scss");
        let aliases = AliasMap::from_pairs([("@", "src")]);

        let resolved = resolve_path("@/styles/vars.scss", &importer, &aliases, temp.path());
        assert_eq!(resolved, target);
    }

    #[test]
    fn test_tilde_package_lookup() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "src/app.less");
        let target = touch(temp.path(), "node_modules/antd/style/themes.less");

        let resolved =
            resolve_path("~antd/style/themes.less", &importer, &AliasMap::new(), temp.path());
        assert_eq!(resolved, target);
    }

    #[test]
    fn test_alias_wins_over_package() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "app.less");
        let aliased = touch(temp.path(), "local/lib/x.less");
        touch(temp.path(), "node_modules/lib/x.less");
        let aliases = AliasMap::from_pairs([("lib", "local/lib")]);

        let resolved = resolve_path("lib/x.less", &importer, &aliases, temp.path());
        assert_eq!(resolved, aliased);
    }

    #[test]
    fn test_missing_file_falls_back_to_relative_path() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "a.css");

        let resolved = resolve_path("./b.css", &importer, &AliasMap::new(), temp.path());
        assert_eq!(resolved, temp.path().join("b.css"));
        assert!(!resolved.exists());
    }

    #[test]
    fn test_import_extension_candidates() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "main.scss");
        let partial = touch(temp.path(), "base/_colors.scss");
        let less_importer = touch(temp.path(), "main.less");
        let less_target = touch(temp.path(), "theme.less");

        let resolved =
            resolve_import("base/colors", &importer, Dialect::Scss, &AliasMap::new(), temp.path());
        assert_eq!(resolved, partial);

        let resolved =
            resolve_import("./theme", &less_importer, Dialect::Less, &AliasMap::new(), temp.path());
        assert_eq!(resolved, less_target);
    }

    #[test]
    fn test_scss_index_candidate() {
        let temp = TempDir::new().unwrap();
        let importer = touch(temp.path(), "main.scss");
        let index = touch(temp.path(), "tokens/_index.scss");

        let resolved =
            resolve_import("tokens", &importer, Dialect::Scss, &AliasMap::new(), temp.path());
        assert_eq!(resolved, index);
    }
}
