use std::path::PathBuf;

/// Configuration for the fetch client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Downloads are written here, named after the URL's last path segment
    pub temp_dir: PathBuf,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("save-it"),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
