use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::models::FetchConfig;
use crate::utils::file_name_from_url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to write download: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Clone)]
pub struct FetchClient {
    config: FetchConfig,
    client: Client,
}

impl FetchClient {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self { config, client }
    }

    /// Download `url` into the temp directory.
    /// Returns the path of the downloaded file.
    pub async fn fetch(&self, url: &Url) -> Result<PathBuf> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        }

        tokio::fs::create_dir_all(&self.config.temp_dir).await?;
        let path = self.config.temp_dir.join(file_name_from_url(url));
        tracing::debug!("Fetching {} into {}", url, path.display());

        if let Err(e) = self.write_body(url, &path).await {
            // Don't leave a truncated file behind
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e);
        }

        tracing::info!("Fetched {}", url);
        Ok(path)
    }

    /// Whole response body in memory, for small resources such as previews.
    pub async fn fetch_bytes(&self, url: &Url) -> Result<bytes::Bytes> {
        let (_, stream) = self.download_file_stream(url).await?;
        let chunks: Vec<bytes::Bytes> = stream.try_collect().await?;
        Ok(chunks.concat().into())
    }

    async fn write_body(&self, url: &Url, path: &Path) -> Result<()> {
        let (total_size, stream) = self.download_file_stream(url).await?;
        if let Some(total) = total_size {
            tracing::debug!("Expecting {} bytes", total);
        }

        let mut stream = stream.boxed();
        let mut file = tokio::fs::File::create(path).await?;

        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }

        file.sync_all().await?;
        Ok(())
    }

    /// Returns (total_size, stream)
    pub async fn download_file_stream(
        &self,
        url: &Url,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(FetchError::RequestError);

        Ok((total_size, stream))
    }
}
