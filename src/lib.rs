//! Small, stateless filesystem helpers: counting and listing files
//! recursively, inverting a directory list, converting slash paths,
//! resolving symlinks, grouping files by size, finding marker files in
//! ancestors, locking directories and checking where a link points.
//!
//! Every operation takes a [`FileSystem`] so it can run against the host
//! ([`OsFileSystem`]) or an in-memory tree ([`MemoryFileSystem`]).

pub mod ancestor;
pub mod config;
pub mod dirs;
pub mod error;
pub mod fs;
pub mod links;
pub mod lock;
pub mod paths;
pub mod platform;
pub mod sizes;
pub mod walk;

pub use ancestor::{ancestor_contains_file, require_ancestor_containing, SearchDepth};
pub use crate::config::AppConfig;
pub use dirs::invert_dir_list;
pub use error::{Error, Result};
pub use fs::{EntryKind, FileSystem, MemoryFileSystem, OsFileSystem};
pub use links::{
    symlink_source_is_in_dir, symlink_to_real_path, symlinks_to_real_paths, ContainmentScope,
};
pub use lock::{lock_dir, unlock_dir};
pub use paths::convert_unix_path_to_os_path;
pub use sizes::{dir_files_keyed_by_size, SizeBuckets};
pub use walk::{count_files_recursively, recursively_list_files, recursively_list_files_in_dirs};
