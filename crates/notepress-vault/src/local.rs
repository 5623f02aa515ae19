use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::traits::{FileStore, VaultError, VaultFile, VaultResult};

/// Local filesystem vault rooted at a base directory.
#[derive(Clone, Debug)]
pub struct LocalVault {
    base_path: PathBuf,
}

impl LocalVault {
    /// Create a vault rooted at `base_path`. The directory is not required to
    /// exist until the first operation.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        LocalVault {
            base_path: base_path.into(),
        }
    }

    /// Convert a vault-relative path to a filesystem path.
    ///
    /// Paths containing traversal sequences or a leading slash are rejected so
    /// a crafted reference cannot escape the vault root.
    fn relative_to_path(&self, path: &str) -> VaultResult<PathBuf> {
        if path.contains("..") || path.starts_with('/') {
            return Err(VaultError::InvalidPath(path.to_string()));
        }
        Ok(self.base_path.join(path))
    }
}

#[async_trait]
impl FileStore for LocalVault {
    async fn list(&self) -> VaultResult<Vec<VaultFile>> {
        let mut files = Vec::new();
        let mut pending = vec![self.base_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    if let Ok(relative) = path.strip_prefix(&self.base_path) {
                        let relative = relative.to_string_lossy().replace('\\', "/");
                        files.push(VaultFile::new(relative));
                    }
                }
            }
        }

        // Deterministic order so resolution precedence is stable across runs.
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    async fn read(&self, path: &str) -> VaultResult<Vec<u8>> {
        let full_path = self.relative_to_path(path)?;
        match fs::read(&full_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(VaultError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn write_file(root: &std::path::Path, rel: &str, data: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.unwrap();
        }
        fs::write(path, data).await.unwrap();
    }

    #[tokio::test]
    async fn lists_files_recursively_in_sorted_order() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "note.md", b"hello").await;
        write_file(dir.path(), "attachments/cat.png", b"png").await;
        write_file(dir.path(), "attachments/deep/dog.jpg", b"jpg").await;

        let vault = LocalVault::new(dir.path());
        let files = vault.list().await.unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["attachments/cat.png", "attachments/deep/dog.jpg", "note.md"]
        );
    }

    #[tokio::test]
    async fn reads_file_content() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "attachments/cat.png", b"binary data").await;

        let vault = LocalVault::new(dir.path());
        let data = vault.read("attachments/cat.png").await.unwrap();
        assert_eq!(data, b"binary data");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let vault = LocalVault::new(dir.path());

        let result = vault.read("nope.png").await;
        assert!(matches!(result, Err(VaultError::NotFound(_))));
    }

    #[tokio::test]
    async fn path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let vault = LocalVault::new(dir.path());

        let result = vault.read("../../../etc/passwd").await;
        assert!(matches!(result, Err(VaultError::InvalidPath(_))));

        let result = vault.read("/etc/passwd").await;
        assert!(matches!(result, Err(VaultError::InvalidPath(_))));
    }
}
