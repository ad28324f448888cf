use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::tree::DirectoryEntry;

/// Abstract interface for file system operations.
pub trait FileSystem: Send + Sync {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn read_all(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    fn write_all(&self, path: &Path, data: &[u8]) -> std::io::Result<()>;

    /// Recursive listing of `root`, sorted by file name.
    /// Directories named in `ignore` are skipped with their contents.
    fn read_tree(&self, root: &Path, ignore: &[String]) -> std::io::Result<DirectoryEntry>;
}

/// Standard implementation of FileSystem using std::fs and walkdir.
pub struct PhysicalFileSystem;

impl FileSystem for PhysicalFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_all(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_all(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)
    }

    fn read_tree(&self, root: &Path, ignore: &[String]) -> std::io::Result<DirectoryEntry> {
        // Entries come depth-first with parents before children; `open`
        // holds the chain of directories from the root to the current one.
        let mut open: Vec<DirectoryEntry> = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !(e.file_type().is_dir()
                        && ignore.iter().any(|name| e.file_name() == name.as_str()))
            });

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let depth = entry.depth();

            while open.len() > depth {
                close_dir(&mut open);
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let rel_path = entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(&name));

            if entry.file_type().is_dir() {
                open.push(DirectoryEntry::dir(name, rel_path, Vec::new()));
            } else if let Some(parent) = open.last_mut() {
                if let Some(children) = parent.children.as_mut() {
                    children.push(DirectoryEntry::file(name, rel_path));
                }
            } else {
                // Root itself is a file
                return Ok(DirectoryEntry::file(name, rel_path));
            }
        }

        while open.len() > 1 {
            close_dir(&mut open);
        }
        open.pop().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is empty or unreadable", root.display()),
            )
        })
    }
}

/// Pop the innermost open directory into its parent
fn close_dir(open: &mut Vec<DirectoryEntry>) {
    if open.len() < 2 {
        return;
    }
    if let Some(done) = open.pop() {
        if let Some(children) = open.last_mut().and_then(|p| p.children.as_mut()) {
            children.push(done);
        }
    }
}
