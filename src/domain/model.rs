use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed download, as shown in the history strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: Uuid,
    pub link: String,
    pub timestamp: DateTime<Utc>,
}

impl LinkRecord {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            link: link.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Download history in insertion order. Links are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordList(Vec<LinkRecord>);

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_link(&self, link: &str) -> bool {
        self.0.iter().any(|record| record.link == link)
    }

    /// Appends `record` unless its link is already present.
    pub fn push(&mut self, record: LinkRecord) -> bool {
        if self.contains_link(&record.link) {
            return false;
        }
        self.0.push(record);
        true
    }

    pub fn remove(&mut self, id: Uuid) -> Option<LinkRecord> {
        let index = self.0.iter().position(|record| record.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&LinkRecord> {
        self.0.iter().find(|record| record.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<LinkRecord> for RecordList {
    fn from_iter<I: IntoIterator<Item = LinkRecord>>(iter: I) -> Self {
        let mut list = RecordList::new();
        for record in iter {
            list.push(record);
        }
        list
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Gallery(MediaKind),
    Documents,
}

/// Where a downloaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedFile {
    Gallery { path: PathBuf, kind: MediaKind },
    Documents { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Downloading,
    SavedToGallery,
    SavedToDocuments,
    Failed,
}

impl DownloadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DownloadPhase::SavedToGallery | DownloadPhase::SavedToDocuments | DownloadPhase::Failed
        )
    }
}

/// Modal message shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// `export` is set when the file went to document storage.
    Completed { export: Option<PathBuf> },
    AlreadyDownloaded,
    Failed,
    GalleryAccessDenied,
    ExportFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Completed { .. } => "✅ Download complete.",
            Notice::AlreadyDownloaded => "This file has already been downloaded.",
            Notice::Failed => "❌ Failed to download the file.",
            Notice::GalleryAccessDenied => "Gallery access was denied. The file was not saved.",
            Notice::ExportFailed => "Could not export the file.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_duplicate_link() {
        let mut list = RecordList::new();
        assert!(list.push(LinkRecord::new("https://example.com/cat.png")));
        assert!(!list.push(LinkRecord::new("https://example.com/cat.png")));
        assert!(list.push(LinkRecord::new("https://example.com/cat.png?v=2")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_by_id_only_touches_that_record() {
        let mut list = RecordList::new();
        let timestamp = Utc::now();
        let first = LinkRecord {
            id: Uuid::new_v4(),
            link: "https://example.com/a.pdf".to_string(),
            timestamp,
        };
        let second = LinkRecord {
            id: Uuid::new_v4(),
            link: "https://example.com/b.pdf".to_string(),
            timestamp,
        };
        list.push(first.clone());
        list.push(second.clone());

        assert_eq!(list.remove(first.id), Some(first.clone()));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![&second]);
        assert_eq!(list.remove(first.id), None);
    }

    #[test]
    fn test_json_shape_and_order() {
        let list: RecordList = ["https://example.com/1.png", "https://example.com/2.mp4"]
            .into_iter()
            .map(LinkRecord::new)
            .collect();

        let json = serde_json::to_value(&list).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["link"], "https://example.com/1.png");
        assert!(entries[0]["id"].is_string());
        // RFC 3339
        assert!(entries[0]["timestamp"].as_str().unwrap().contains('T'));

        let decoded: RecordList = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!DownloadPhase::Idle.is_terminal());
        assert!(!DownloadPhase::Downloading.is_terminal());
        assert!(DownloadPhase::SavedToGallery.is_terminal());
        assert!(DownloadPhase::Failed.is_terminal());
    }
}
