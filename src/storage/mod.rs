pub mod documents;
pub mod gallery;
pub mod prefs;
pub mod records;

use thiserror::Error;

pub use documents::DocumentWriter;
pub use gallery::GalleryWriter;
pub use prefs::PreferenceStore;
pub use records::RecordStore;

/// Failure while copying a download into the gallery or document storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Gallery access was denied for {0}")]
    AccessDenied(std::path::PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
