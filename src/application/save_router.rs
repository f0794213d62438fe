use url::Url;

use crate::domain::{MediaKind, SaveTarget};
use crate::utils::url_extension;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Picks the save target from the extension of the URL's last path segment.
/// Unknown or missing extensions go to document storage.
pub fn classify(url: &Url) -> SaveTarget {
    match url_extension(url) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
            SaveTarget::Gallery(MediaKind::Image)
        }
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => {
            SaveTarget::Gallery(MediaKind::Video)
        }
        _ => SaveTarget::Documents,
    }
}

/// The link as a URL when it points at an image.
pub fn image_url(link: &str) -> Option<Url> {
    let url = Url::parse(link).ok()?;
    match classify(&url) {
        SaveTarget::Gallery(MediaKind::Image) => Some(url),
        _ => None,
    }
}
