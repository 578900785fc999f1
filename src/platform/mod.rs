#[cfg(unix)]
pub mod unix;
#[cfg(windows)]
pub mod windows;

use std::fs::Permissions;
use std::path::{Component, Path, PathBuf};

/// Containing directory of `path`, or `None` once `path` is the root
/// (or an empty relative path) and taking its parent would not move.
pub fn parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| *p != path)
}

/// The prefix and root portion of `path` (`/` on Unix, `C:\` on Windows).
/// Empty for relative paths.
pub fn root_of(path: &Path) -> PathBuf {
    path.components()
        .take_while(|comp| matches!(comp, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Joins segments with the host's separator.
pub fn join_segments<I, S>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut result = PathBuf::new();
    for segment in segments {
        result.push(segment);
    }
    result
}

#[cfg(unix)]
pub fn dir_permissions(current: Permissions, locked: bool) -> Permissions {
    unix::dir_permissions(current, locked)
}

#[cfg(windows)]
pub fn dir_permissions(current: Permissions, locked: bool) -> Permissions {
    windows::dir_permissions(current, locked)
}

#[cfg(not(any(unix, windows)))]
pub fn dir_permissions(mut current: Permissions, locked: bool) -> Permissions {
    current.set_readonly(locked);
    current
}
