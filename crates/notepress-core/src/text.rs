//! Pure text helpers for the publishing pipeline.
//!
//! Everything here is side-effect free: embedded image reference extraction,
//! hashtag extraction, description derivation, filename sanitization, and the
//! extension-to-MIME mapping. Nothing touches the filesystem or the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ImageReference;

/// Embedded image syntax: `![[path]]` or `![[path|alt]]`. The path may contain
/// any character except `]` or `|`; no nested or escaped brackets.
static IMAGE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([\w-]+)").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading YAML frontmatter block, anchored to the start of the document.
static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n.*?\n---\n").unwrap());

/// First paragraph (up to two lines), optionally preceded by one heading.
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:#{1,6}\s+.+\n+)?((?:[^\n]+\n?){1,2})").unwrap());

const MAX_DESCRIPTION_CHARS: usize = 180;

/// Scan document text for embedded image references, in left-to-right order of
/// the first character of each match. Restartable and lazy; does not
/// deduplicate.
pub fn extract_image_references(content: &str) -> impl Iterator<Item = ImageReference> + '_ {
    IMAGE_REF_RE.captures_iter(content).map(|caps| {
        let original_text = caps.get(0).map_or("", |m| m.as_str()).to_string();
        let path = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let alt = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|alt| !alt.is_empty())
            .map(str::to_string);
        ImageReference {
            original_text,
            path,
            alt,
        }
    })
}

/// Extract `#tag` tokens (word characters and hyphens) in order of first
/// occurrence. Duplicates are kept; callers may dedupe if they care.
pub fn extract_tags(content: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sanitize a filename for use as an object key component: whitespace runs
/// become hyphens, every character outside `[a-zA-Z0-9.\-_]` is stripped, and
/// the result is lowercased.
pub fn sanitize_filename(filename: &str) -> String {
    WHITESPACE_RE
        .replace_all(filename, "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// MIME type for an image file extension (with or without a leading dot).
/// Unknown extensions fall back to `application/octet-stream`.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension
        .trim_start_matches('.')
        .to_ascii_lowercase()
        .as_str()
    {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Derive a short description for a note: the first paragraph after optional
/// YAML frontmatter and an optional leading heading, collapsed to a single
/// line and truncated to 180 characters.
pub fn extract_description(content: &str) -> String {
    let body = FRONTMATTER_RE.replace(content, "");

    let Some(paragraph) = PARAGRAPH_RE.captures(&body).and_then(|caps| caps.get(1)) else {
        return String::new();
    };

    let description = paragraph.as_str().replace('\n', " ").trim().to_string();
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        let truncated: String = description
            .chars()
            .take(MAX_DESCRIPTION_CHARS - 3)
            .collect();
        format!("{}...", truncated)
    } else {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_reference_without_alt() {
        let refs: Vec<_> = extract_image_references("before ![[cat.png]] after").collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].original_text, "![[cat.png]]");
        assert_eq!(refs[0].path, "cat.png");
        assert_eq!(refs[0].alt, None);
    }

    #[test]
    fn extracts_reference_with_alt() {
        let refs: Vec<_> = extract_image_references("![[cat.png|A cat]]").collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].original_text, "![[cat.png|A cat]]");
        assert_eq!(refs[0].path, "cat.png");
        assert_eq!(refs[0].alt.as_deref(), Some("A cat"));
    }

    #[test]
    fn empty_alt_is_absent() {
        let refs: Vec<_> = extract_image_references("![[cat.png|]]").collect();
        assert_eq!(refs[0].alt, None);
    }

    #[test]
    fn extracts_multiple_references_in_order() {
        let content = "![[a.png]] middle ![[b.jpg|B]] end ![[sub/c.gif]]";
        let paths: Vec<_> = extract_image_references(content)
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["a.png", "b.jpg", "sub/c.gif"]);
    }

    #[test]
    fn keeps_duplicate_references() {
        let refs: Vec<_> = extract_image_references("![[x.png]] and ![[x.png]]").collect();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], refs[1]);
    }

    #[test]
    fn plain_markdown_images_are_not_references() {
        let refs: Vec<_> =
            extract_image_references("![alt](https://example.com/x.png) and [[wiki link]]")
                .collect();
        assert!(refs.is_empty());
    }

    #[test]
    fn extracts_tags_in_order_with_hyphens() {
        assert_eq!(
            extract_tags("Hello #foo and #bar-baz!"),
            vec!["foo", "bar-baz"]
        );
    }

    #[test]
    fn tags_keep_duplicates() {
        assert_eq!(extract_tags("#a #b #a"), vec!["a", "b", "a"]);
    }

    #[test]
    fn no_tags_yields_empty_vec() {
        assert!(extract_tags("no tags here").is_empty());
    }

    #[test]
    fn sanitizes_filename() {
        assert_eq!(sanitize_filename("My Photo (1).PNG"), "my-photo-1.png");
        assert_eq!(sanitize_filename("already-clean.jpg"), "already-clean.jpg");
        assert_eq!(sanitize_filename("tabs\tand  spaces.png"), "tabs-and-spaces.png");
        assert_eq!(sanitize_filename("ünïcödé.png"), "ncd.png");
    }

    #[test]
    fn content_types_for_known_extensions() {
        assert_eq!(content_type_for_extension("jpg"), "image/jpeg");
        assert_eq!(content_type_for_extension(".JPEG"), "image/jpeg");
        assert_eq!(content_type_for_extension("png"), "image/png");
        assert_eq!(content_type_for_extension("svg"), "image/svg+xml");
        assert_eq!(content_type_for_extension("tif"), "image/tiff");
        assert_eq!(
            content_type_for_extension("exe"),
            "application/octet-stream"
        );
    }

    #[test]
    fn description_is_first_paragraph() {
        let content = "First line.\nSecond line.\n\nThird paragraph.";
        assert_eq!(extract_description(content), "First line. Second line.");
    }

    #[test]
    fn description_skips_frontmatter_and_heading() {
        let content = "---\ntitle: x\n---\n# Heading\n\nBody text here.\n";
        assert_eq!(extract_description(content), "Body text here.");
    }

    #[test]
    fn description_truncates_long_paragraphs() {
        let content = "a".repeat(300);
        let description = extract_description(&content);
        assert_eq!(description.chars().count(), 180);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn description_of_empty_document_is_empty() {
        assert_eq!(extract_description(""), "");
    }
}
