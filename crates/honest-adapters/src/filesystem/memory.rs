//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use honest_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HonestError, HonestResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle and give another to a
/// service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn add_file(&mut self, path: &Path, bytes: Vec<u8>) {
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.insert(path.to_path_buf(), bytes);
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a text file (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.write().add_file(path.as_ref(), content.as_bytes().to_vec());
        self
    }

    /// Seed a binary file (testing helper).
    pub fn with_bytes(self, path: impl AsRef<Path>, bytes: &[u8]) -> Self {
        self.write().add_file(path.as_ref(), bytes.to_vec());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let bytes = self.read().files.get(path)?.clone();
        String::from_utf8(bytes).ok()
    }

    pub fn read_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.read().files.get(path).cloned()
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.read().files.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> HonestResult<()> {
        self.write().add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> HonestResult<()> {
        self.write().add_file(path, content.as_bytes().to_vec());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> HonestResult<String> {
        let bytes = self
            .read()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))?;
        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to read file: {}", e),
            }
            .into()
        })
    }

    fn copy_file(&self, from: &Path, to: &Path) -> HonestResult<()> {
        let mut inner = self.write();
        let bytes = inner.files.get(from).cloned().ok_or_else(|| not_found(from))?;
        inner.add_file(to, bytes);
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> HonestResult<()> {
        let mut inner = self.write();
        if !inner.directories.contains(from) {
            return Err(not_found(from));
        }
        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, Vec<u8>)> = inner
            .files
            .iter()
            .filter_map(|(p, b)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), b.clone())))
            .collect();

        for dir in dirs {
            inner.add_dirs(&dir);
        }
        for (path, bytes) in files {
            inner.add_file(&path, bytes);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read().files.contains_key(path)
    }

    fn list_files(&self, dir: &Path) -> HonestResult<Vec<PathBuf>> {
        Ok(self
            .read()
            .files
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect())
    }

    fn remove_file(&self, path: &Path) -> HonestResult<()> {
        self.write()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn remove_dir_all(&self, path: &Path) -> HonestResult<()> {
        let mut inner = self.write();
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

fn not_found(path: &Path) -> HonestError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert_eq!(other.read_file(Path::new("/p/a.txt")).as_deref(), Some("x"));
        assert!(other.exists(Path::new("/p")));
    }

    #[test]
    fn copy_dir_all_rebases_paths() {
        let fs = MemoryFilesystem::new()
            .with_file("/t/files/package.json", "{}")
            .with_bytes("/t/files/public/icon.png", &[0, 159, 146, 150]);

        fs.copy_dir_all(Path::new("/t/files"), Path::new("/out")).unwrap();

        assert_eq!(fs.read_file(Path::new("/out/package.json")).as_deref(), Some("{}"));
        assert_eq!(
            fs.read_bytes(Path::new("/out/public/icon.png")),
            Some(vec![0, 159, 146, 150])
        );
        assert!(fs.read_to_string(Path::new("/out/public/icon.png")).is_err());
    }

    #[test]
    fn remove_dir_all_drops_everything_below() {
        let fs = MemoryFilesystem::new()
            .with_file("/p/a.txt", "")
            .with_file("/p/b/c.txt", "")
            .with_file("/q.txt", "");
        fs.remove_dir_all(Path::new("/p")).unwrap();
        assert!(!fs.exists(Path::new("/p")));
        assert!(!fs.exists(Path::new("/p/b")));
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn missing_files_are_errors() {
        let fs = MemoryFilesystem::new();
        assert!(fs.read_to_string(Path::new("/nope")).is_err());
        assert!(fs.remove_file(Path::new("/nope")).is_err());
        assert!(fs.copy_dir_all(Path::new("/nope"), Path::new("/x")).is_err());
    }
}
