//! Notepress Vault Library
//!
//! Local file store abstraction for the publishing pipeline: enumerate the
//! files an author's vault contains and read attachment bytes. Also hosts the
//! attachment resolver, which matches an authored path token against the file
//! set using an ordered search strategy.
//!
//! Vault paths are forward-slash relative paths. Paths containing `..` or a
//! leading `/` are rejected before touching the filesystem.

pub mod local;
pub mod resolver;
pub mod traits;

// Re-export commonly used types
pub use local::LocalVault;
pub use resolver::resolve_attachment;
pub use traits::{FileStore, VaultError, VaultFile, VaultResult};
