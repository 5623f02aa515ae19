//! File store abstraction
//!
//! The publishing pipeline only needs two operations from a vault: enumerate
//! every known file, and read one file's full binary content.

use async_trait::async_trait;
use thiserror::Error;

/// Vault operation errors
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid vault path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// A file known to the vault, addressed by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    /// Forward-slash relative path, e.g. `attachments/cat.png`.
    pub path: String,
}

impl VaultFile {
    pub fn new(path: impl Into<String>) -> Self {
        VaultFile { path: path.into() }
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File extension without the leading dot; empty when there is none.
    pub fn extension(&self) -> &str {
        self.name().rsplit_once('.').map_or("", |(_, ext)| ext)
    }
}

/// File store abstraction
///
/// Implementations decide where the bytes live (local filesystem, in-memory
/// test fixtures). The resolver and pipeline are written against this trait.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Enumerate every file in the store, with vault-relative paths.
    async fn list(&self) -> VaultResult<Vec<VaultFile>>;

    /// Read a file's full binary content by vault-relative path.
    async fn read(&self, path: &str) -> VaultResult<Vec<u8>>;
}
