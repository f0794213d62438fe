use std::path::{Path, PathBuf};

use super::StorageError;

/// Copies downloads into the app's private document directory.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    root: PathBuf,
}

impl DocumentWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Copies `source` under its own file name, replacing any existing file.
    pub async fn write(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let name = source.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", source.display()),
            )
        })?;

        tokio::fs::create_dir_all(&self.root).await?;
        let destination = self.root.join(name);
        tokio::fs::copy(source, &destination).await?;

        tracing::info!("Saved document {}", destination.display());
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_copies_and_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.pdf");
        std::fs::write(&source, "pdf bytes").unwrap();

        let writer = DocumentWriter::new(dir.path().join("Documents"));
        let saved = writer.write(&source).await.unwrap();

        assert_eq!(saved, dir.path().join("Documents/report.pdf"));
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "pdf bytes");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_write_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("Documents");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(docs.join("notes.txt"), "first version, longer").unwrap();

        let source = dir.path().join("notes.txt");
        std::fs::write(&source, "second").unwrap();

        let saved = DocumentWriter::new(&docs).write(&source).await.unwrap();
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "second");
        assert_eq!(std::fs::read_dir(&docs).unwrap().count(), 1);
    }
}
