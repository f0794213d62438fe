use std::path::Path;

use percent_encoding::percent_decode_str;
use url::Url;

/// Name used when a URL has no usable last path segment.
pub const FALLBACK_FILE_NAME: &str = "download";

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Percent-decoded last path segment of `url`.
fn last_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}

/// Last path segment of `url`, sanitized for the local filesystem.
pub fn file_name_from_url(url: &Url) -> String {
    let segment = last_segment(url).unwrap_or_default();

    let name = sanitize_filename(&segment);
    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name
    }
}

/// Lowercased extension of the URL's last path segment, if any.
pub fn url_extension(url: &Url) -> Option<String> {
    let segment = last_segment(url)?;
    Path::new(&segment)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
