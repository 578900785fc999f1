use std::cell::RefCell;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::{link_loop_error, push_components, EntryKind, FileSystem, MAX_LINK_HOPS};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File { len: u64 },
    Dir { locked: bool },
    Symlink { target: PathBuf },
}

/// A Unix-shaped in-memory tree rooted at `/`.
///
/// Entries are listed in the order they were added, which stands in for
/// the host's directory listing order. Builder paths are taken literally:
/// missing parent directories are created and symlinks are not followed.
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: RefCell<Vec<(PathBuf, Node)>>,
    cwd: PathBuf,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("not a directory: {}", path.display()),
    )
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![(PathBuf::from("/"), Node::Dir { locked: false })]),
            cwd: PathBuf::from("/"),
        }
    }

    /// Directory that relative paths are resolved against. Created if missing.
    pub fn with_current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        let cwd: PathBuf = cwd.into();
        let cwd = self.absolute(&cwd);
        self.add_dir(&cwd);
        self.cwd = cwd;
        self
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        self.insert(path.as_ref(), Node::Dir { locked: false });
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>, len: u64) -> &Self {
        self.insert(path.as_ref(), Node::File { len });
        self
    }

    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl Into<PathBuf>) -> &Self {
        self.insert(
            path.as_ref(),
            Node::Symlink {
                target: target.into(),
            },
        );
        self
    }

    /// Whether the directory `path` refers to has been locked.
    pub fn is_locked(&self, path: impl AsRef<Path>) -> bool {
        match self.resolve(path.as_ref(), true) {
            Ok(Some(physical)) => matches!(self.node(&physical), Some(Node::Dir { locked: true })),
            _ => false,
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes
            .borrow()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, node)| node.clone())
    }

    fn insert(&self, path: &Path, node: Node) {
        let path = self.absolute(path);
        if let Some(parent) = path.parent() {
            let missing: Vec<PathBuf> = parent
                .ancestors()
                .filter(|dir| self.node(dir).is_none())
                .map(Path::to_path_buf)
                .collect();
            for dir in missing.into_iter().rev() {
                self.nodes
                    .borrow_mut()
                    .push((dir, Node::Dir { locked: false }));
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter_mut().find(|(p, _)| *p == path) {
            Some(existing) => existing.1 = node,
            None => nodes.push((path, node)),
        }
    }

    fn child_names(&self, dir: &Path) -> Vec<OsString> {
        self.nodes
            .borrow()
            .iter()
            .filter(|(p, _)| p.parent() == Some(dir))
            .filter_map(|(p, _)| p.file_name().map(|name| name.to_os_string()))
            .collect()
    }

    /// Physical location of `path` with every intermediate symlink
    /// followed, and the final one too when `follow_last` is set.
    fn resolve(&self, path: &Path, follow_last: bool) -> io::Result<Option<PathBuf>> {
        let mut pending = Vec::new();
        push_components(&mut pending, &self.absolute(path));

        let mut current = PathBuf::from("/");
        let mut hops = 0;

        while let Some(part) = pending.pop() {
            if part == ".." {
                current.pop();
                continue;
            }

            let candidate = current.join(&part);
            match self.node(&candidate) {
                None => return Ok(None),
                Some(Node::Symlink { target }) if follow_last || !pending.is_empty() => {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(link_loop_error(path));
                    }
                    if target.is_absolute() {
                        current = PathBuf::from("/");
                    }
                    push_components(&mut pending, &target);
                }
                Some(Node::File { .. }) if !pending.is_empty() => return Ok(None),
                Some(_) => current = candidate,
            }
        }

        Ok(Some(current))
    }

    fn node_kind(&self, path: &Path, follow_last: bool) -> io::Result<Option<EntryKind>> {
        let physical = match self.resolve(path, follow_last)? {
            Some(physical) => physical,
            None => return Ok(None),
        };
        Ok(self.node(&physical).map(|node| match node {
            Node::File { .. } => EntryKind::File,
            Node::Dir { .. } => EntryKind::Dir,
            Node::Symlink { .. } => EntryKind::Symlink,
        }))
    }

    fn physical_dir(&self, path: &Path) -> io::Result<PathBuf> {
        let physical = self.resolve(path, true)?.ok_or_else(|| not_found(path))?;
        match self.node(&physical) {
            Some(Node::Dir { .. }) => Ok(physical),
            _ => Err(not_a_directory(path)),
        }
    }

    fn walk_into(&self, shown: &Path, physical: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
        for name in self.child_names(physical) {
            let shown_child = shown.join(&name);
            let physical_child = physical.join(&name);

            match self.node(&physical_child) {
                Some(Node::Dir { .. }) => self.walk_into(&shown_child, &physical_child, files)?,
                Some(Node::Symlink { .. }) => {
                    if !matches!(self.node_kind(&physical_child, true), Ok(Some(EntryKind::Dir))) {
                        files.push(shown_child);
                    }
                }
                Some(Node::File { .. }) => files.push(shown_child),
                None => {}
            }
        }
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        self.node_kind(path, false)
    }

    fn resolved_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        self.node_kind(path, true)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let physical = self.physical_dir(path)?;
        Ok(self
            .child_names(&physical)
            .into_iter()
            .map(|name| path.join(name))
            .collect())
    }

    fn file_len(&self, path: &Path) -> io::Result<u64> {
        let physical = self.resolve(path, true)?.ok_or_else(|| not_found(path))?;
        match self.node(&physical) {
            Some(Node::File { len }) => Ok(len),
            Some(_) => Ok(0),
            None => Err(not_found(path)),
        }
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        let physical = self.resolve(path, false)?.ok_or_else(|| not_found(path))?;
        match self.node(&physical) {
            Some(Node::Symlink { target }) => Ok(target),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a symbolic link: {}", path.display()),
            )),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn set_dir_locked(&self, path: &Path, locked: bool) -> io::Result<()> {
        let physical = self.physical_dir(path)?;
        self.insert(&physical, Node::Dir { locked });
        Ok(())
    }

    fn walk_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let physical = self.physical_dir(root)?;
        let mut files = Vec::new();
        self.walk_into(root, &physical, &mut files)?;
        Ok(files)
    }
}
