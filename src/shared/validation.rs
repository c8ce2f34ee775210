use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::ALLOWED_IMAGE_EXTENSIONS;

lazy_static! {
    /// Runs of whitespace, collapsed into a single underscore
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();

    /// Anything outside the portable filename alphabet
    /// - Kept: "photo_1.png", "scan-2.JPG"
    /// - Dropped: "/", "\\", "ü", "$", quotes
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// Whether the filename carries one of the accepted image extensions.
pub fn has_allowed_image_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Reduce a client-supplied filename to something safe to embed in a storage key.
///
/// Only the last path component survives; the result may be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let underscored = WHITESPACE_REGEX.replace_all(base.trim(), "_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&underscored, "");
    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}

/// Lowercased extension including the dot, e.g. ".png"
pub fn image_extension(filename: &str) -> Option<&'static str> {
    let lower = filename.to_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| lower.ends_with(ext))
}

/// Content type to store alongside an accepted image
pub fn content_type_for_image(filename: &str) -> &'static str {
    match image_extension(filename) {
        Some(".png") => "image/png",
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
