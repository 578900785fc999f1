use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::fs::{require_exists, FileSystem};
use crate::platform;

/// How many ancestor levels a marker search may inspect.
///
/// A raw depth of `0` converts to `Unbounded`, the same as no depth at
/// all; there is no way to ask for a search that inspects nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchDepth {
    #[default]
    Unbounded,
    Levels(NonZeroUsize),
}

impl SearchDepth {
    fn allows(&self, inspected: usize) -> bool {
        match self {
            SearchDepth::Unbounded => true,
            SearchDepth::Levels(levels) => inspected < levels.get(),
        }
    }
}

impl From<usize> for SearchDepth {
    fn from(depth: usize) -> Self {
        NonZeroUsize::new(depth).map_or(SearchDepth::Unbounded, SearchDepth::Levels)
    }
}

impl From<Option<usize>> for SearchDepth {
    fn from(depth: Option<usize>) -> Self {
        depth.map_or(SearchDepth::Unbounded, SearchDepth::from)
    }
}

/// Walks upward from `path` and returns the first ancestor directory that
/// directly contains any of `markers`.
///
/// `path` itself is never inspected. When it is a file the walk starts
/// above its containing directory. The root is inspected once and ends
/// the walk. A relative `path` is walked lexically and ends at the empty
/// path, so a marker in the current directory comes back as `Some("")`.
pub fn ancestor_contains_file<F, S>(
    fs: &F,
    path: &Path,
    markers: &[S],
    depth: SearchDepth,
) -> Result<Option<PathBuf>>
where
    F: FileSystem + ?Sized,
    S: AsRef<Path>,
{
    require_exists(fs, path)?;
    if markers.is_empty() {
        return Err(Error::invalid("no marker file names given"));
    }

    let start = if fs.is_dir(path) {
        path
    } else {
        platform::parent(path).unwrap_or(path)
    };

    let mut inspected = 0;
    let mut current = platform::parent(start);
    while let Some(dir) = current {
        trace!("Looking for markers in {}", dir.display());
        if markers.iter().any(|marker| fs.exists(&dir.join(marker))) {
            debug!("Found marker above {} in {}", path.display(), dir.display());
            return Ok(Some(dir.to_path_buf()));
        }

        inspected += 1;
        if !depth.allows(inspected) {
            break;
        }
        current = platform::parent(dir);
    }

    debug!(
        "No marker above {} after {} levels",
        path.display(),
        inspected
    );
    Ok(None)
}

/// Like [`ancestor_contains_file`], but a miss is an [`Error::NotFound`].
pub fn require_ancestor_containing<F, S>(
    fs: &F,
    path: &Path,
    markers: &[S],
    depth: SearchDepth,
) -> Result<PathBuf>
where
    F: FileSystem + ?Sized,
    S: AsRef<Path>,
{
    ancestor_contains_file(fs, path, markers, depth)?.ok_or_else(|| {
        Error::NotFound(format!(
            "no ancestor of {} contains any of the markers",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    fn levels(n: usize) -> SearchDepth {
        SearchDepth::from(n)
    }

    #[test]
    fn test_unbounded_search_reaches_far_ancestor() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/root/a/b/c").add_file("/root/.marker", 0);

        let found =
            ancestor_contains_file(&fs, Path::new("/root/a/b/c"), &[".marker"], SearchDepth::Unbounded)
                .unwrap();
        assert_eq!(found, Some(PathBuf::from("/root")));
    }

    #[test]
    fn test_depth_one_only_checks_parent() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/show/seq/shot").add_file("/show/.marker", 0);

        let path = Path::new("/show/seq/shot");
        assert_eq!(ancestor_contains_file(&fs, path, &[".marker"], levels(1)).unwrap(), None);
        assert_eq!(
            ancestor_contains_file(&fs, path, &[".marker"], levels(2)).unwrap(),
            Some(PathBuf::from("/show"))
        );

        fs.add_file("/show/seq/.marker", 0);
        assert_eq!(
            ancestor_contains_file(&fs, path, &[".marker"], levels(1)).unwrap(),
            Some(PathBuf::from("/show/seq"))
        );
    }

    #[test]
    fn test_start_directory_is_not_inspected() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/asset/.asset", 0).add_dir("/asset/work");

        assert_eq!(
            ancestor_contains_file(&fs, Path::new("/asset"), &[".asset"], SearchDepth::Unbounded)
                .unwrap(),
            None
        );
        assert_eq!(
            ancestor_contains_file(&fs, Path::new("/asset/work"), &[".asset"], levels(1)).unwrap(),
            Some(PathBuf::from("/asset"))
        );
    }

    #[test]
    fn test_file_start_skips_its_own_directory() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/proj/.asset", 0)
            .add_file("/proj/model/.asset", 0)
            .add_file("/proj/model/mesh.obj", 100);

        let found = ancestor_contains_file(
            &fs,
            Path::new("/proj/model/mesh.obj"),
            &[".asset"],
            SearchDepth::Unbounded,
        )
        .unwrap();
        assert_eq!(found, Some(PathBuf::from("/proj")));
    }

    #[test]
    fn test_root_is_checked() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/.top", 0).add_dir("/a/b");

        assert_eq!(
            ancestor_contains_file(&fs, Path::new("/a/b"), &[".top"], SearchDepth::Unbounded)
                .unwrap(),
            Some(PathBuf::from("/"))
        );
        assert_eq!(
            ancestor_contains_file(&fs, Path::new("/a/b"), &[".missing"], levels(50)).unwrap(),
            None
        );
    }

    #[test]
    fn test_any_marker_matches_nearest_first() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/x/.second", 0)
            .add_file("/x/y/.first", 0)
            .add_dir("/x/y/z/w");

        let found = ancestor_contains_file(
            &fs,
            Path::new("/x/y/z/w"),
            &[".second", ".first"],
            SearchDepth::Unbounded,
        )
        .unwrap();
        assert_eq!(found, Some(PathBuf::from("/x/y")));
    }

    #[test]
    fn test_trailing_separator_is_ignored() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/m/n").add_file("/m/.marker", 0);

        assert_eq!(
            ancestor_contains_file(&fs, Path::new("/m/n/"), &[".marker"], levels(1)).unwrap(),
            Some(PathBuf::from("/m"))
        );
    }

    #[test]
    fn test_relative_start_ends_at_current_dir() {
        let fs = MemoryFileSystem::new().with_current_dir("/work");
        fs.add_dir("/work/a/b").add_file("/work/.marker", 0);

        assert_eq!(
            ancestor_contains_file(&fs, Path::new("a/b"), &[".marker"], SearchDepth::Unbounded)
                .unwrap(),
            Some(PathBuf::from(""))
        );
        assert_eq!(
            ancestor_contains_file(&fs, Path::new("a/b"), &[".marker"], levels(1)).unwrap(),
            None
        );
        assert_eq!(
            ancestor_contains_file(&fs, Path::new("a/b"), &[".missing"], SearchDepth::Unbounded)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_zero_depth_means_unbounded() {
        assert_eq!(SearchDepth::from(0), SearchDepth::Unbounded);
        assert_eq!(SearchDepth::from(None), SearchDepth::Unbounded);
        assert_eq!(
            SearchDepth::from(Some(3)),
            SearchDepth::Levels(NonZeroUsize::new(3).unwrap())
        );
    }

    #[test]
    fn test_preconditions() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/here");
        let none: [&str; 0] = [];

        assert!(matches!(
            ancestor_contains_file(&fs, Path::new("/gone"), &[".m"], SearchDepth::Unbounded),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            ancestor_contains_file(&fs, Path::new("/here"), &none, SearchDepth::Unbounded),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_require_reports_not_found() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/a/b");

        assert!(matches!(
            require_ancestor_containing(&fs, Path::new("/a/b"), &[".m"], SearchDepth::Unbounded),
            Err(Error::NotFound(_))
        ));
    }
}
