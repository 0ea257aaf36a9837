use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("wordfall"),
            )
        } else {
            ProjectDirs::from("", "", "wordfall").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// Default destination for `--log-file` without an explicit path
    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("wordfall.log"))
    }
}
