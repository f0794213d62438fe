//! Command line / environment configuration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[clap(name = "save-it", about = "Download a link into your gallery or documents")]
pub struct AppConfig {
    /// Directory holding the preferences file
    #[clap(long, env = "SAVE_IT_DATA_DIR", default_value_os_t = default_data_dir())]
    pub data_dir: PathBuf,

    /// Document storage for non-media files, defaults to `<data dir>/Documents`
    #[clap(long, env = "SAVE_IT_DOCUMENTS_DIR")]
    pub documents_dir: Option<PathBuf>,

    /// Gallery directory for images
    #[clap(long, env = "SAVE_IT_PICTURES_DIR", default_value_os_t = default_pictures_dir())]
    pub pictures_dir: PathBuf,

    /// Gallery directory for videos
    #[clap(long, env = "SAVE_IT_VIDEOS_DIR", default_value_os_t = default_videos_dir())]
    pub videos_dir: PathBuf,

    /// Scratch directory downloads land in before being saved
    #[clap(long, env = "SAVE_IT_TEMP_DIR", default_value_os_t = std::env::temp_dir().join("save-it"))]
    pub temp_dir: PathBuf,
}

impl AppConfig {
    pub fn documents_dir(&self) -> PathBuf {
        self.documents_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("Documents"))
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    /// Everything under one root, for tests.
    #[cfg(test)]
    pub fn rooted_at(root: &std::path::Path) -> Self {
        Self {
            data_dir: root.join("data"),
            documents_dir: None,
            pictures_dir: root.join("Pictures"),
            videos_dir: root.join("Videos"),
            temp_dir: root.join("tmp"),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("save-it")
}

fn default_pictures_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Save It")
}

fn default_videos_dir() -> PathBuf {
    dirs::video_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Videos")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Save It")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_dir_defaults_under_data_dir() {
        let config = AppConfig::try_parse_from(["save-it", "--data-dir", "/srv/save-it"]).unwrap();
        assert_eq!(config.documents_dir(), PathBuf::from("/srv/save-it/Documents"));
        assert_eq!(
            config.preferences_path(),
            PathBuf::from("/srv/save-it/preferences.json")
        );
    }

    #[test]
    fn test_explicit_documents_dir_wins() {
        let config = AppConfig::try_parse_from([
            "save-it",
            "--data-dir",
            "/srv/save-it",
            "--documents-dir",
            "/srv/docs",
        ])
        .unwrap();
        assert_eq!(config.documents_dir(), PathBuf::from("/srv/docs"));
    }
}
