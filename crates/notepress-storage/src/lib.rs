//! Notepress Storage Library
//!
//! Upload strategies for image attachments. Two strategies exist, attempted in
//! order for each asset and never concurrently:
//!
//! - **Direct**: presign a PUT against an S3-compatible endpoint and upload
//!   the bytes straight to object storage.
//! - **Proxy**: base64-encode the bytes and POST them to an upload API that
//!   performs the storage write server-side.
//!
//! A failed direct upload falls through to the proxy. Strategy failures are
//! reported as `None` so the pipeline can leave the original reference in the
//! document and continue.

pub mod direct;
pub mod proxy;
pub mod uploader;

// Re-export commonly used types
pub use uploader::{StorageError, StorageUploader, Uploader};
