use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::mode::ModeKind;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: ModeKind,
    pub language: String,
    /// fixed field width in pixels; follows the terminal when unset
    pub field_width: Option<f64>,
    /// fixed field height in pixels; follows the terminal when unset
    pub field_height: Option<f64>,
    /// RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeKind::Falling,
            language: "turkish".to_string(),
            field_width: None,
            field_height: None,
            seed: None,
        }
    }
}

impl Config {
    /// Field size for a terminal area, with configured dimensions taking precedence
    pub fn viewport_for(&self, cols: u16, rows: u16) -> Viewport {
        let auto = Viewport::from_cells(cols, rows);
        Viewport::new(
            self.field_width.unwrap_or(auto.width),
            self.field_height.unwrap_or(auto.height),
        )
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
        let path = if let Some(pd) = ProjectDirs::from("", "", "wordfall") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("wordfall_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring unreadable config {}: {e}", self.path.display());
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
