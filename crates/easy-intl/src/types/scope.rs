//! Scope identifiers for translation namespaces.
//!
//! The store treats a scope id as an opaque key. These helpers produce ids that
//! are stable across rebuilds: either the calling module path (see the
//! [`scope_id!`](crate::scope_id) macro) or a normalized source-file path.

use std::path::{Component, Path};

/// Derive a scope id from a source file location relative to a project root.
///
/// The extension is dropped and components are joined with `/` regardless of
/// platform, so `src\components\Header.tsx` becomes `src/components/Header`.
/// Returns `None` when `file` is not under `root` or has no file name.
///
/// ```
/// use std::path::Path;
/// use easy_intl::scope_id_from_source;
///
/// let id = scope_id_from_source(Path::new("/work/app"), Path::new("/work/app/src/header/view.rs"));
/// assert_eq!(id.as_deref(), Some("src/header/view"));
/// ```
pub fn scope_id_from_source(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let mut parts: Vec<&str> = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                Component::CurDir => {}
                Component::Prefix(_) | Component::RootDir | Component::ParentDir => return None,
            }
        }
    }
    parts.push(stem);
    Some(parts.join("/"))
}
