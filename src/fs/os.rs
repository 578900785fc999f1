use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

use super::{EntryKind, FileSystem};
use crate::platform;

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::File
    }
}

fn missing_as_none(result: io::Result<fs::Metadata>) -> io::Result<Option<EntryKind>> {
    match result {
        Ok(metadata) => Ok(Some(kind_of(metadata.file_type()))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

impl FileSystem for OsFileSystem {
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        missing_as_none(fs::symlink_metadata(path))
    }

    fn resolved_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        missing_as_none(fs::metadata(path))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect()
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn set_dir_locked(&self, path: &Path, locked: bool) -> io::Result<()> {
        let current = fs::metadata(path)?.permissions();
        fs::set_permissions(path, platform::dir_permissions(current, locked))
    }

    fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
            let entry = entry?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                continue;
            }
            if file_type.is_symlink() && entry.path().is_dir() {
                trace!("Not following directory link {}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }
}
