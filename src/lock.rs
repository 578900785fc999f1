use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::fs::{require_dir, FileSystem};

/// Leaves `dir` readable and traversable but stops entries being created,
/// removed or renamed in it (mode `0o555` on Unix).
pub fn lock_dir<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<()> {
    require_dir(fs, dir)?;
    fs.set_dir_locked(dir, true)?;
    info!("Locked {}", dir.display());
    Ok(())
}

/// Gives the owner write access to `dir` again (mode `0o755` on Unix).
pub fn unlock_dir<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<()> {
    require_dir(fs, dir)?;
    fs.set_dir_locked(dir, false)?;
    info!("Unlocked {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fs::MemoryFileSystem;

    #[test]
    fn test_lock_and_unlock() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/publish/v001/data.bin", 5);

        lock_dir(&fs, Path::new("/publish/v001")).unwrap();
        assert!(fs.is_locked("/publish/v001"));
        assert!(!fs.is_locked("/publish"));

        unlock_dir(&fs, Path::new("/publish/v001")).unwrap();
        assert!(!fs.is_locked("/publish/v001"));
    }

    #[test]
    fn test_lock_through_symlink_locks_target() {
        let fs = MemoryFileSystem::new();
        fs.add_dir("/real").add_symlink("/alias", "/real");

        lock_dir(&fs, Path::new("/alias")).unwrap();
        assert!(fs.is_locked("/real"));
    }

    #[test]
    fn test_lock_requires_a_directory() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/file", 1);

        assert!(matches!(
            lock_dir(&fs, Path::new("/file")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            lock_dir(&fs, Path::new("/missing")),
            Err(Error::InvalidArgument(_))
        ));
    }
}
