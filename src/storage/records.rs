use super::prefs::{PreferenceStore, Result};
use crate::domain::RecordList;

const SAVED_LINKS_KEY: &str = "savedLinks";

/// Persists the download history in a single preference slot.
#[derive(Debug, Clone)]
pub struct RecordStore {
    prefs: PreferenceStore,
}

impl RecordStore {
    pub fn new(prefs: PreferenceStore) -> Self {
        Self { prefs }
    }

    /// Saved history, or an empty list when nothing usable is stored.
    pub fn load(&self) -> RecordList {
        let records = self
            .prefs
            .get::<RecordList>(SAVED_LINKS_KEY)
            .unwrap_or_default();
        tracing::debug!(
            "Loaded {} saved links from {}",
            records.len(),
            self.prefs.path().display()
        );
        records
    }

    pub fn save(&self, records: &RecordList) -> Result<()> {
        self.prefs.set(SAVED_LINKS_KEY, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LinkRecord;

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(PreferenceStore::new(dir.path().join("prefs.json")));

        let records: RecordList = [
            "https://example.com/z.png",
            "https://example.com/a.pdf",
            "https://example.com/m.mp4",
        ]
        .into_iter()
        .map(LinkRecord::new)
        .collect();

        store.save(&records).unwrap();
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_load_without_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(PreferenceStore::new(dir.path().join("prefs.json")));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_with_garbage_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"savedLinks": [{"link": 42}]}"#).unwrap();

        let store = RecordStore::new(PreferenceStore::new(&path));
        assert!(store.load().is_empty());
    }
}
