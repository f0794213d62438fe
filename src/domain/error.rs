use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Input is not a valid URL")]
    InvalidUrl,

    #[error("This link has already been downloaded")]
    AlreadyDownloaded,

    #[error("A download is already in progress")]
    Busy,

    #[error("Download failed: {0}")]
    Fetch(String),

    #[error("Gallery access was denied")]
    GalleryAccessDenied,

    #[error("I/O error: {0}")]
    Io(String),
}
