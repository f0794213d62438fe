use std::path::{Path, PathBuf};

use url::Url;

use crate::{
    application::save_router::classify,
    config::AppConfig,
    domain::{AppError, SaveTarget, SavedFile},
    net::{FetchClient, FetchConfig},
    storage::{DocumentWriter, GalleryWriter, StorageError},
};

/// Runs fetch -> classify -> save for one link.
#[derive(Clone)]
pub struct DownloadCoordinator {
    client: FetchClient,
    gallery: GalleryWriter,
    documents: DocumentWriter,
}

impl DownloadCoordinator {
    pub fn new(client: FetchClient, gallery: GalleryWriter, documents: DocumentWriter) -> Self {
        Self {
            client,
            gallery,
            documents,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = FetchClient::new(FetchConfig {
            temp_dir: config.temp_dir.clone(),
            ..FetchConfig::default()
        });
        let gallery = GalleryWriter::new(&config.pictures_dir, &config.videos_dir);
        let documents = DocumentWriter::new(config.documents_dir());

        Self::new(client, gallery, documents)
    }

    pub async fn download_and_save(&self, url: Url) -> Result<SavedFile, AppError> {
        let downloaded = self.client.fetch(&url).await.map_err(|e| {
            tracing::warn!("Fetching {} failed: {}", url, e);
            AppError::Fetch(e.to_string())
        })?;

        let saved = match classify(&url) {
            SaveTarget::Gallery(kind) => self
                .gallery
                .write(&downloaded, kind)
                .await
                .map(|path| SavedFile::Gallery { path, kind }),
            SaveTarget::Documents => self
                .documents
                .write(&downloaded)
                .await
                .map(|path| SavedFile::Documents { path }),
        };

        saved.map_err(|e| match e {
            StorageError::AccessDenied(library) => {
                tracing::warn!("Gallery access denied: {}", library.display());
                AppError::GalleryAccessDenied
            }
            StorageError::Io(e) => {
                tracing::error!("Saving {} failed: {}", downloaded.display(), e);
                AppError::Io(e.to_string())
            }
        })
    }

    /// Image bytes straight from the link, for records whose saved file
    /// isn't known this session.
    pub async fn fetch_preview(&self, url: Url) -> Option<bytes::Bytes> {
        match self.client.fetch_bytes(&url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!("No preview for {}: {}", url, e);
                None
            }
        }
    }

    pub async fn choose_export_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(&suggested_filename)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Lets the user copy a saved document somewhere else.
    /// `Ok(None)` means the dialog was cancelled.
    pub async fn export(&self, source: PathBuf) -> Result<Option<PathBuf>, AppError> {
        let suggested = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(destination) = self.choose_export_path(suggested).await else {
            return Ok(None);
        };

        copy_file(&source, &destination).await?;
        tracing::info!("Exported {} to {}", source.display(), destination.display());
        Ok(Some(destination))
    }
}

async fn copy_file(source: &Path, destination: &Path) -> Result<(), AppError> {
    tokio::fs::copy(source, destination)
        .await
        .map(|_| ())
        .map_err(|e| AppError::Io(format!("Failed to export file: {}", e)))
}
