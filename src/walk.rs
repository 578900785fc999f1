use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::fs::{require_dir, FileSystem};

/// Number of files in `dir` and every directory below it. Directories
/// themselves are not counted.
pub fn count_files_recursively<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<usize> {
    require_dir(fs, dir)?;

    let count = fs.walk_files(dir)?.len();
    debug!("{} files under {}", count, dir.display());
    Ok(count)
}

pub fn recursively_list_files<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<PathBuf>> {
    recursively_list_files_in_dirs(fs, &[dir])
}

/// Full paths of every file below each of `dirs`.
///
/// All directories are validated before any is walked. Results are
/// concatenated in input order and never deduplicated, so overlapping
/// inputs list the shared files once per input that reaches them.
pub fn recursively_list_files_in_dirs<F, P>(fs: &F, dirs: &[P]) -> Result<Vec<PathBuf>>
where
    F: FileSystem + ?Sized,
    P: AsRef<Path>,
{
    for dir in dirs {
        require_dir(fs, dir.as_ref())?;
    }

    let mut files = Vec::new();
    for dir in dirs {
        let found = fs.walk_files(dir.as_ref())?;
        debug!("{} files under {}", found.len(), dir.as_ref().display());
        files.extend(found);
    }
    Ok(files)
}
