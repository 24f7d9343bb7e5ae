//! Path manipulation utilities for component-deps

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component where possible.
///
/// The filesystem is never consulted, so symlinks inside the path are not
/// resolved. Leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Compute the path of `target` relative to the directory `base`.
///
/// Both paths are normalized first, since `pathdiff` cannot walk back out of
/// a `..` in the base. The result is what a symlink placed in `base` needs as
/// its target so that it resolves to `target`, e.g.
/// `relative_path("dependencies/foo/lib/a.libsonnet", "dependencies/lib")` is
/// `../foo/lib/a.libsonnet`.
///
/// Returns `None` when no relative path exists, such as for a relative
/// `target` and an absolute `base`.
pub fn relative_path(target: &Path, base: &Path) -> Option<PathBuf> {
    let relative = pathdiff::diff_paths(normalize(target), normalize(base))?;
    if relative.as_os_str().is_empty() {
        Some(PathBuf::from("."))
    } else {
        Some(relative)
    }
}
