//! Filesystem capability used by every operation in this crate.
//!
//! `OsFileSystem` talks to the host; `MemoryFileSystem` is an in-memory
//! tree for exercising the same logic without touching the disk.

pub mod memory;
pub mod os;

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

/// Maximum number of symlinks followed while resolving a single path.
pub const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

pub trait FileSystem {
    /// Kind of the entry at `path` without following a final symlink.
    /// `Ok(None)` when nothing exists there.
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Kind of the entry `path` ultimately refers to, following symlinks.
    /// `Ok(None)` for missing paths and dangling links.
    fn resolved_kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Immediate children of a directory as `path.join(name)`, in listing order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Size in bytes of the file `path` refers to.
    fn file_len(&self, path: &Path) -> io::Result<u64>;

    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Makes a directory read + traverse only, or restores owner write.
    fn set_dir_locked(&self, path: &Path, locked: bool) -> io::Result<()>;

    /// Every non-directory entry below `root`. Directory symlinks are
    /// neither entered nor reported; any other symlink is reported.
    fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    fn exists(&self, path: &Path) -> bool {
        matches!(self.resolved_kind(path), Ok(Some(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.resolved_kind(path), Ok(Some(EntryKind::Dir)))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.resolved_kind(path), Ok(Some(EntryKind::File)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(self.kind(path), Ok(Some(EntryKind::Symlink)))
    }
}

pub(crate) fn require_exists<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    if !fs.exists(path) {
        return Err(Error::invalid(format!(
            "path does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

pub(crate) fn require_dir<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    require_exists(fs, path)?;
    if !fs.is_dir(path) {
        return Err(Error::invalid(format!(
            "path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Pushes the name and `..` components of `path` onto `stack` so that
/// popping yields them first to last. Root, prefix and `.` are dropped.
pub(crate) fn push_components(stack: &mut Vec<OsString>, path: &Path) {
    for comp in path.components().rev() {
        match comp {
            Component::Normal(name) => stack.push(name.to_os_string()),
            Component::ParentDir => stack.push(OsString::from("..")),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
}

pub(crate) fn link_loop_error(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("too many levels of symbolic links: {}", path.display()),
    )
}
