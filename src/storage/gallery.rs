use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use uuid::Uuid;

use super::StorageError;
use crate::domain::MediaKind;

const MAX_NAME_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAccess {
    Granted,
    Denied,
}

/// Imports images and videos into the user's media directories.
#[derive(Debug, Clone)]
pub struct GalleryWriter {
    pictures: PathBuf,
    videos: PathBuf,
}

impl GalleryWriter {
    pub fn new(pictures: impl Into<PathBuf>, videos: impl Into<PathBuf>) -> Self {
        Self {
            pictures: pictures.into(),
            videos: videos.into(),
        }
    }

    pub fn library_for(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Image => &self.pictures,
            MediaKind::Video => &self.videos,
        }
    }

    /// Access is granted when the library directory exists (or can be created)
    /// and a file can actually be created inside it.
    pub async fn request_access(&self, kind: MediaKind) -> GalleryAccess {
        let library = self.library_for(kind);

        if let Err(e) = tokio::fs::create_dir_all(library).await {
            tracing::warn!("Cannot create gallery {}: {}", library.display(), e);
            return GalleryAccess::Denied;
        }

        let check = library.join(format!(".save-it-access-{}", Uuid::new_v4()));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&check)
            .await
        {
            Ok(file) => {
                drop(file);
                if let Err(e) = tokio::fs::remove_file(&check).await {
                    tracing::warn!("Failed to remove {}: {}", check.display(), e);
                }
                GalleryAccess::Granted
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::warn!("Gallery {} is not writable", library.display());
                GalleryAccess::Denied
            }
            Err(e) => {
                tracing::warn!("Cannot write to gallery {}: {}", library.display(), e);
                GalleryAccess::Denied
            }
        }
    }

    /// Adds `source` to the library as a new item. Existing items are never
    /// replaced: a taken name gets a ` (n)` suffix. `source` is left in place.
    pub async fn write(&self, source: &Path, kind: MediaKind) -> Result<PathBuf, StorageError> {
        let library = self.library_for(kind);
        if self.request_access(kind).await == GalleryAccess::Denied {
            return Err(StorageError::AccessDenied(library.to_path_buf()));
        }

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("item")
            .to_string();
        let extension = source.extension().and_then(|s| s.to_str());

        let mut input = tokio::fs::File::open(source).await?;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let destination = library.join(numbered_name(&stem, extension, attempt));
            let mut output = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&destination)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            let copied = async {
                tokio::io::copy(&mut input, &mut output).await?;
                output.sync_all().await
            }
            .await;

            if let Err(e) = copied {
                drop(output);
                // Don't leave a truncated item in the library
                let _ = tokio::fs::remove_file(&destination).await;
                return Err(e.into());
            }

            tracing::info!("Added {:?} to gallery: {}", kind, destination.display());
            return Ok(destination);
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free name for {} in {}", stem, library.display()),
        )
        .into())
    }
}

fn numbered_name(stem: &str, extension: Option<&str>, attempt: u32) -> String {
    let stem = if attempt == 0 {
        stem.to_string()
    } else {
        format!("{} ({})", stem, attempt)
    };

    match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer_in(dir: &Path) -> GalleryWriter {
        GalleryWriter::new(dir.join("Pictures"), dir.join("Videos"))
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("cat", Some("png"), 0), "cat.png");
        assert_eq!(numbered_name("cat", Some("png"), 2), "cat (2).png");
        assert_eq!(numbered_name("clip", None, 1), "clip (1)");
    }

    #[tokio::test]
    async fn test_images_and_videos_go_to_their_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = writer_in(dir.path());

        let image = dir.path().join("cat.png");
        let video = dir.path().join("clip.mp4");
        std::fs::write(&image, "png").unwrap();
        std::fs::write(&video, "mp4").unwrap();

        let saved_image = gallery.write(&image, MediaKind::Image).await.unwrap();
        let saved_video = gallery.write(&video, MediaKind::Video).await.unwrap();

        assert_eq!(saved_image, dir.path().join("Pictures/cat.png"));
        assert_eq!(saved_video, dir.path().join("Videos/clip.mp4"));
        assert!(image.exists());
    }

    #[tokio::test]
    async fn test_repeated_import_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = writer_in(dir.path());
        let image = dir.path().join("cat.png");
        std::fs::write(&image, "one").unwrap();

        let first = gallery.write(&image, MediaKind::Image).await.unwrap();
        std::fs::write(&image, "two").unwrap();
        let second = gallery.write(&image, MediaKind::Image).await.unwrap();

        assert_eq!(second, dir.path().join("Pictures/cat (1).png"));
        assert_eq!(std::fs::read_to_string(first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(second).unwrap(), "two");
    }

    #[tokio::test]
    async fn test_unusable_library_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the library directory should be
        let blocker = dir.path().join("Pictures");
        std::fs::write(&blocker, "").unwrap();
        let gallery = GalleryWriter::new(blocker.join("Save It"), dir.path().join("Videos"));

        assert_eq!(gallery.request_access(MediaKind::Image).await, GalleryAccess::Denied);
        assert_eq!(gallery.request_access(MediaKind::Video).await, GalleryAccess::Granted);

        let image = dir.path().join("cat.png");
        std::fs::write(&image, "png").unwrap();
        let err = gallery.write(&image, MediaKind::Image).await.unwrap_err();
        assert!(matches!(err, StorageError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_access_check_leaves_library_clean() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = writer_in(dir.path());

        assert_eq!(gallery.request_access(MediaKind::Image).await, GalleryAccess::Granted);
        let leftovers = std::fs::read_dir(dir.path().join("Pictures")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_only_library_is_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("Pictures");
        std::fs::create_dir_all(&library).unwrap();
        std::fs::set_permissions(&library, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits don't bind root; nothing to check then
        let writable = std::fs::write(library.join("canary"), "").is_ok();
        if !writable {
            let gallery = writer_in(dir.path());
            assert_eq!(gallery.request_access(MediaKind::Image).await, GalleryAccess::Denied);

            let image = dir.path().join("cat.png");
            std::fs::write(&image, "png").unwrap();
            let err = gallery.write(&image, MediaKind::Image).await.unwrap_err();
            assert!(matches!(err, StorageError::AccessDenied(_)));
        }

        std::fs::set_permissions(&library, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_no_partial_item() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = writer_in(dir.path());

        // Opening a directory works, reading it does not
        let unreadable = dir.path().join("cat.png");
        std::fs::create_dir_all(&unreadable).unwrap();

        let err = gallery.write(&unreadable, MediaKind::Image).await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(!dir.path().join("Pictures/cat.png").exists());
        assert_eq!(std::fs::read_dir(dir.path().join("Pictures")).unwrap().count(), 0);
    }
}
