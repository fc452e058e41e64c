use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Game tuning and remembered preferences.
///
/// Every probability and interval is a named field so tests can pin them
/// (e.g. force a chance to 0.0 or 1.0) instead of fighting the RNG.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub round_secs: u32,
    pub base_points: u32,
    pub bonus_points: u32,
    pub pet_interval_ms: u64,
    pub pet_poll_ms: u64,
    pub ambient_interval_ms: u64,
    pub ambient_sparkle_chance: f64,
    pub drag_sparkle_chance: f64,
    pub click_flash_ms: u64,
    pub max_name_len: usize,
    pub leaderboard_limit: usize,
    pub player_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: 60,
            base_points: 1,
            bonus_points: 2,
            pet_interval_ms: 500,
            pet_poll_ms: 100,
            ambient_interval_ms: 300,
            ambient_sparkle_chance: 0.1,
            drag_sparkle_chance: 0.3,
            click_flash_ms: 150,
            max_name_len: 20,
            leaderboard_limit: 10,
            player_name: None,
        }
    }
}

impl Config {
    pub fn pet_interval(&self) -> Duration {
        Duration::from_millis(self.pet_interval_ms)
    }

    pub fn pet_poll(&self) -> Duration {
        Duration::from_millis(self.pet_poll_ms)
    }

    pub fn ambient_interval(&self) -> Duration {
        Duration::from_millis(self.ambient_interval_ms)
    }

    pub fn click_flash(&self) -> Duration {
        Duration::from_millis(self.click_flash_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "tigerpat") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tigerpat_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
