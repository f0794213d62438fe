use std::path::PathBuf;

use bytes::Bytes;
use iced::widget::image::Handle;
use image::DynamicImage;

/// Edge length in pixels thumbnails are scaled down to.
pub const THUMBNAIL_SIZE: u32 = 200;

/// Decodes `path` and scales it to fit a `THUMBNAIL_SIZE` square.
/// `None` when the file is missing or not a decodable image.
pub async fn load_thumbnail(path: PathBuf) -> Option<Handle> {
    decode_off_thread(move || match image::open(&path) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::debug!("No thumbnail for {}: {}", path.display(), e);
            None
        }
    })
    .await
}

/// Same as [`load_thumbnail`] for an image already in memory.
pub async fn thumbnail_from_bytes(bytes: Bytes) -> Option<Handle> {
    decode_off_thread(move || match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::debug!("Undecodable preview: {}", e);
            None
        }
    })
    .await
}

async fn decode_off_thread<F>(decode: F) -> Option<Handle>
where
    F: FnOnce() -> Option<DynamicImage> + Send + 'static,
{
    let (width, height, pixels) = tokio::task::spawn_blocking(move || {
        let rgba = decode()?
            .thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Some((width, height, rgba.into_raw()))
    })
    .await
    .ok()
    .flatten()?;

    Some(Handle::from_rgba(width, height, pixels))
}
