//! Symlink resolution and containment checks.
//!
//! Resolution follows the host's `realpath` rules rather than
//! `std::fs::canonicalize`: a path that does not exist is resolved as far
//! as possible and the remainder kept as written. Only Unix link
//! semantics are modelled.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::fs::{link_loop_error, push_components, EntryKind, FileSystem, MAX_LINK_HOPS};
use crate::platform;

/// Whether a link's target may sit below the candidate directory or must
/// be directly inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainmentScope {
    Exact,
    #[default]
    Recursive,
}

impl From<bool> for ContainmentScope {
    fn from(include_subdirs: bool) -> Self {
        if include_subdirs {
            ContainmentScope::Recursive
        } else {
            ContainmentScope::Exact
        }
    }
}

/// The real path `path` points to after following every link on the way,
/// including chains. Paths that are not links come back as their own
/// absolute, normalized form.
pub fn symlink_to_real_path<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        fs.current_dir()?.join(path)
    };

    let mut pending = Vec::new();
    push_components(&mut pending, &absolute);

    let mut resolved = platform::root_of(&absolute);
    let mut hops = 0;

    while let Some(part) = pending.pop() {
        if part == ".." {
            resolved.pop();
            continue;
        }

        let candidate = resolved.join(&part);
        // Lookup errors (e.g. a file used as a directory) mean "not a link".
        if let Ok(Some(EntryKind::Symlink)) = fs.kind(&candidate) {
            hops += 1;
            if hops > MAX_LINK_HOPS {
                return Err(link_loop_error(path).into());
            }
            let target = fs.read_link(&candidate)?;
            trace!("{} -> {}", candidate.display(), target.display());
            if target.is_absolute() {
                resolved = platform::root_of(&target);
            }
            push_components(&mut pending, &target);
        } else {
            resolved = candidate;
        }
    }

    Ok(resolved)
}

pub fn symlinks_to_real_paths<F, P>(fs: &F, paths: &[P]) -> Result<Vec<PathBuf>>
where
    F: FileSystem + ?Sized,
    P: AsRef<Path>,
{
    paths
        .iter()
        .map(|path| symlink_to_real_path(fs, path.as_ref()))
        .collect()
}

/// Whether the file `link` points to lives in `dir`, or below it when
/// `scope` is `Recursive`. The target need not exist. Directories are
/// compared by path component, so `/a/b` does not contain `/a/bcd`.
pub fn symlink_source_is_in_dir<F: FileSystem + ?Sized>(
    fs: &F,
    link: &Path,
    dir: &Path,
    scope: ContainmentScope,
) -> Result<bool> {
    if !fs.is_symlink(link) {
        return Err(Error::invalid(format!(
            "not a symbolic link: {}",
            link.display()
        )));
    }

    let source = symlink_to_real_path(fs, link)?;
    let source_dir = platform::parent(&source).unwrap_or(source.as_path());

    let contained = match scope {
        ContainmentScope::Recursive => source_dir.starts_with(dir),
        ContainmentScope::Exact => source_dir == dir,
    };
    debug!(
        "{} resolves into {}: {}",
        link.display(),
        source_dir.display(),
        contained
    );
    Ok(contained)
}
