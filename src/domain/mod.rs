pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{DownloadPhase, LinkRecord, MediaKind, Notice, RecordList, SaveTarget, SavedFile};
