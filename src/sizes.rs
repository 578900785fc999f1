use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::fs::{require_exists, EntryKind, FileSystem};

/// Files of one directory keyed by byte size. Within a bucket, paths keep
/// the order the directory listing produced them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeBuckets {
    buckets: BTreeMap<u64, Vec<PathBuf>>,
}

impl SizeBuckets {
    pub fn push(&mut self, size: u64, path: PathBuf) {
        self.buckets.entry(size).or_default().push(path);
    }

    pub fn get(&self, size: u64) -> Option<&[PathBuf]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &[PathBuf])> {
        self.buckets
            .iter()
            .map(|(size, paths)| (*size, paths.as_slice()))
    }

    pub fn distinct_sizes(&self) -> usize {
        self.buckets.len()
    }

    pub fn total_files(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.buckets
            .iter()
            .map(|(size, paths)| size * paths.len() as u64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets holding more than one file.
    pub fn shared_sizes(&self) -> impl Iterator<Item = (u64, &[PathBuf])> {
        self.iter().filter(|(_, paths)| paths.len() > 1)
    }

    /// Every path, smallest size first.
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.buckets.into_values().flatten().collect()
    }

    pub fn into_inner(self) -> BTreeMap<u64, Vec<PathBuf>> {
        self.buckets
    }
}

/// Groups the files directly inside `dir` by size. Subdirectories are
/// skipped, not counted and not descended into.
pub fn dir_files_keyed_by_size<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<SizeBuckets> {
    require_exists(fs, dir)?;

    let mut buckets = SizeBuckets::default();
    for entry in fs.read_dir(dir)? {
        if !fs.is_file(&entry) {
            if matches!(fs.kind(&entry), Ok(Some(EntryKind::Symlink))) && !fs.exists(&entry) {
                warn!("Skipping dangling symlink {}", entry.display());
            } else {
                trace!("Skipping {}", entry.display());
            }
            continue;
        }
        let size = fs.file_len(&entry)?;
        buckets.push(size, entry);
    }

    debug!(
        "{} distinct sizes, {} files, {} bytes in {}",
        buckets.distinct_sizes(),
        buckets.total_files(),
        buckets.total_bytes(),
        dir.display()
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fs::MemoryFileSystem;
    use std::collections::BTreeSet;

    fn shot_dir() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.add_file("/shot/f1", 10)
            .add_file("/shot/f2", 10)
            .add_file("/shot/f3", 20)
            .add_file("/shot/sub/nested", 10)
            .add_file("/other/target", 20)
            .add_symlink("/shot/link", "/other/target")
            .add_symlink("/shot/broken", "/nowhere");
        fs
    }

    #[test]
    fn test_groups_by_size_in_listing_order() {
        let fs = shot_dir();
        let buckets = dir_files_keyed_by_size(&fs, Path::new("/shot")).unwrap();

        assert_eq!(buckets.distinct_sizes(), 2);
        assert_eq!(
            buckets.get(10).unwrap(),
            &[PathBuf::from("/shot/f1"), PathBuf::from("/shot/f2")]
        );
        assert_eq!(
            buckets.get(20).unwrap(),
            &[PathBuf::from("/shot/f3"), PathBuf::from("/shot/link")]
        );
    }

    #[test]
    fn test_subdirectories_and_broken_links_are_ignored() {
        let fs = shot_dir();
        let buckets = dir_files_keyed_by_size(&fs, Path::new("/shot")).unwrap();

        assert_eq!(buckets.total_files(), 4);
        assert!(buckets.get(0).is_none());
        assert!(buckets
            .iter()
            .all(|(_, paths)| !paths.iter().any(|p| p.ends_with("sub") || p.ends_with("broken"))));
    }

    #[test]
    fn test_flattening_recovers_every_file_once() {
        let fs = shot_dir();
        let buckets = dir_files_keyed_by_size(&fs, Path::new("/shot")).unwrap();
        assert_eq!(buckets.total_bytes(), 60);

        let flattened = buckets.into_paths();
        let unique: BTreeSet<_> = flattened.iter().cloned().collect();
        assert_eq!(flattened.len(), unique.len());

        let expected: BTreeSet<_> = fs
            .read_dir(Path::new("/shot"))
            .unwrap()
            .into_iter()
            .filter(|p| fs.is_file(p))
            .collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_shared_sizes() {
        let fs = shot_dir();
        let buckets = dir_files_keyed_by_size(&fs, Path::new("/shot")).unwrap();
        let shared: Vec<u64> = buckets.shared_sizes().map(|(size, _)| size).collect();
        assert_eq!(shared, vec![10, 20]);
    }

    #[test]
    fn test_empty_directory() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/empty");
        let buckets = dir_files_keyed_by_size(&fs, Path::new("/empty")).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let fs = MemoryFileSystem::new();
        assert!(matches!(
            dir_files_keyed_by_size(&fs, Path::new("/missing")),
            Err(Error::InvalidArgument(_))
        ));
    }
}
