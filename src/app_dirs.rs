use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the tracing log goes while the UI owns the terminal.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("flipquiz");
            Some(state_dir.join("flipquiz.log"))
        } else {
            ProjectDirs::from("", "", "flipquiz")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("flipquiz.log"))
        }
    }
}
