//! Source tree scanning and unit name derivation.
//!
//! The scan is purely lexical: it lists candidate files under a root and
//! derives the qualified unit name each path implies. Whether a name
//! corresponds to a real unit is the registry's business. Traversal order
//! is made deterministic by sorting directory entries, so repeated builds
//! over the same tree produce identical tables.

use std::path::Path;

use walkdir::WalkDir;

use crate::MapError;

/// File suffix identifying candidate units.
pub const UNIT_SUFFIX: &str = ".rs";

/// Separator between segments of a qualified unit name.
const NAME_SEPARATOR: &str = "::";

/// Derives the qualified unit name implied by a scan-relative path.
///
/// The suffix is stripped, path separators become name separators, and the
/// namespace (when non-empty) is prepended:
///
/// ```
/// use atlas::unit_name;
///
/// assert_eq!(
///     unit_name("app", "user/profile.rs").as_deref(),
///     Some("app::user::profile"),
/// );
/// assert_eq!(unit_name("", "ping.rs").as_deref(), Some("ping"));
/// assert_eq!(unit_name("app", "notes.txt"), None);
/// ```
pub fn unit_name(namespace: &str, relative_path: &str) -> Option<String> {
    let stem = relative_path.strip_suffix(UNIT_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    let joined = stem.replace('/', NAME_SEPARATOR);
    if namespace.is_empty() {
        Some(joined)
    } else {
        Some(format!("{namespace}{NAME_SEPARATOR}{joined}"))
    }
}

/// Lists candidate unit files under `root`, as `/`-separated paths
/// relative to it, in deterministic (lexically sorted) order.
///
/// Files without the unit suffix are omitted here rather than reported,
/// since a source tree legitimately contains non-unit files.
pub(crate) fn scan(root: &Path) -> Result<Vec<String>, MapError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| MapError::Io {
            path: root.display().to_string(),
            source: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| MapError::Io {
                path: entry.path().display().to_string(),
                source: e.to_string(),
            })?;
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if joined.ends_with(UNIT_SUFFIX) {
            files.push(joined);
        }
    }
    Ok(files)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
