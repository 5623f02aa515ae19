//! Attachment resolution
//!
//! Matches the path token from an embedded image reference against the vault's
//! file set. Authors routinely omit leading folders, so each candidate is
//! checked both for exact equality and as a `/`-delimited path suffix.

use crate::traits::VaultFile;

/// Folders searched when neither the token itself nor the configured
/// attachment folder matches. Tried in this fixed order.
const FALLBACK_FOLDERS: [&str; 5] = ["attachments", "images", "assets", "media", "resources"];

fn find_candidate<'a>(files: &'a [VaultFile], candidate: &str) -> Option<&'a VaultFile> {
    let suffix = format!("/{}", candidate);
    files
        .iter()
        .find(|file| file.path == candidate || file.path.ends_with(&suffix))
}

/// Locate the vault file an image reference points at, or `None`.
///
/// Search order, first match wins, each step scanning the complete file set:
/// the token itself, then `<attachment_folder>/<token>` when a folder hint is
/// configured, then each fallback folder. Not found is a skip-and-continue
/// signal for callers, never a fatal error.
pub fn resolve_attachment<'a>(
    files: &'a [VaultFile],
    token: &str,
    attachment_folder: Option<&str>,
) -> Option<&'a VaultFile> {
    if let Some(file) = find_candidate(files, token) {
        return Some(file);
    }

    if let Some(folder) = attachment_folder {
        if let Some(file) = find_candidate(files, &format!("{}/{}", folder, token)) {
            return Some(file);
        }
    }

    for folder in FALLBACK_FOLDERS {
        if let Some(file) = find_candidate(files, &format!("{}/{}", folder, token)) {
            return Some(file);
        }
    }

    None
}
