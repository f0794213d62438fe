pub mod download_coordinator;
pub mod save_router;
pub mod state;

pub use download_coordinator::DownloadCoordinator;
pub use state::AppState;
