use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("leaderboard.db"))
    }

    /// Device-local fallback list used when the leaderboard write fails.
    pub fn local_scores_path() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("tigerpat_scores.json"))
    }

    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("tigerpat"),
            )
        } else {
            ProjectDirs::from("", "", "tigerpat").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }
}
