//! Application state and the single-download state machine.
//!
//! `Idle -> Downloading -> {SavedToGallery | SavedToDocuments | Failed} -> Idle`.
//! At most one download is in flight; deletions only happen while idle.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;
use uuid::Uuid;

use crate::domain::{
    AppError, DownloadPhase, LinkRecord, MediaKind, Notice, RecordList, SavedFile,
};
use crate::storage::RecordStore;

pub struct AppState {
    records: RecordList,
    store: RecordStore,
    phase: DownloadPhase,
    notice: Option<Notice>,
    pending_delete: Option<Uuid>,
    /// Where this session's gallery images were saved. Not persisted.
    saved_images: HashMap<Uuid, PathBuf>,
}

impl AppState {
    /// Loads the saved history from `store`.
    pub fn new(store: RecordStore) -> Self {
        Self {
            records: store.load(),
            store,
            phase: DownloadPhase::Idle,
            notice: None,
            pending_delete: None,
            saved_images: HashMap::new(),
        }
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == DownloadPhase::Downloading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Gallery file the record's image was saved to, if saved this session.
    pub fn saved_image(&self, id: Uuid) -> Option<&Path> {
        self.saved_images.get(&id).map(PathBuf::as_path)
    }

    pub fn pending_delete(&self) -> Option<&LinkRecord> {
        self.pending_delete.and_then(|id| self.records.get(id))
    }

    /// Guards entry into `Downloading`. On success the caller owns the fetch
    /// and must hand its outcome to [`AppState::finish_download`].
    pub fn begin_download(&mut self, input: &str) -> Result<Url, AppError> {
        if self.phase != DownloadPhase::Idle {
            return Err(AppError::Busy);
        }

        if self.records.contains_link(input) {
            tracing::info!("Skipping already downloaded link {}", input);
            self.notice = Some(Notice::AlreadyDownloaded);
            return Err(AppError::AlreadyDownloaded);
        }

        let url = Url::parse(input).map_err(|e| {
            tracing::debug!("Ignoring invalid URL {:?}: {}", input, e);
            AppError::InvalidUrl
        })?;

        self.phase = DownloadPhase::Downloading;
        Ok(url)
    }

    pub fn finish_download(&mut self, link: String, outcome: Result<SavedFile, AppError>) {
        if self.phase != DownloadPhase::Downloading {
            tracing::warn!("Dropping download result for {} outside a download", link);
            return;
        }

        let mut saved_image = None;
        let (phase, notice) = match outcome {
            Ok(SavedFile::Gallery { path, kind }) => {
                if kind == MediaKind::Image {
                    saved_image = Some(path);
                }
                (
                    DownloadPhase::SavedToGallery,
                    Notice::Completed { export: None },
                )
            }
            Ok(SavedFile::Documents { path }) => (
                DownloadPhase::SavedToDocuments,
                Notice::Completed { export: Some(path) },
            ),
            Err(AppError::GalleryAccessDenied) => {
                (DownloadPhase::Failed, Notice::GalleryAccessDenied)
            }
            Err(e) => {
                tracing::warn!("Download of {} failed: {}", link, e);
                (DownloadPhase::Failed, Notice::Failed)
            }
        };

        if phase != DownloadPhase::Failed {
            let record = LinkRecord::new(link);
            let id = record.id;
            if self.records.push(record) {
                if let Some(path) = saved_image {
                    self.saved_images.insert(id, path);
                }
            }
            self.persist();
        }

        self.phase = phase;
        self.notice = Some(notice);
    }

    /// Closes the open notice. A finished download returns to `Idle`.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.phase.is_terminal() {
            self.phase = DownloadPhase::Idle;
        }
    }

    /// Sets a notice without changing the phase.
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn request_delete(&mut self, id: Uuid) -> bool {
        if self.phase != DownloadPhase::Idle || self.notice.is_some() {
            return false;
        }
        if self.records.get(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Removes the record awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Option<LinkRecord> {
        let id = self.pending_delete.take()?;
        let removed = self.records.remove(id)?;
        self.saved_images.remove(&id);
        self.persist();
        tracing::info!("Deleted saved link {}", removed.link);
        Some(removed)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.records) {
            tracing::error!("Failed to save download history: {}", e);
        }
    }
}
