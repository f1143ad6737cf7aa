//! Console host configuration.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Where the plugin keeps its files and how the simulated server is seeded.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub namespace: String,
    pub log_dir: Option<PathBuf>,
    pub armor_stand_editor: bool,
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            namespace: "wanderfuladditions".to_string(),
            log_dir: None,
            armor_stand_editor: false,
            seed: None,
        }
    }
}

impl ServerConfig {
    pub const SETTINGS_FILE: &'static str = "config.yml";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WAND_DATA_DIR` - Plugin data folder (default: platform-specific)
    /// - `WAND_NAMESPACE` - Namespace of recipe and marker keys (default: wanderfuladditions)
    /// - `WAND_LOG_DIR` - Also write daily log files here (default: stderr only)
    /// - `WAND_ARMOR_STAND_EDITOR` - Start with ArmorStandEditor loaded (default: false)
    /// - `WAND_SEED` - Seed for trade rolls (default: entropy)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("WAND_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(namespace) = env::var("WAND_NAMESPACE") {
            config.namespace = namespace;
        }
        config.log_dir = env::var("WAND_LOG_DIR").ok().map(PathBuf::from);

        if let Some(enable) = read_env::<bool>("WAND_ARMOR_STAND_EDITOR") {
            config.armor_stand_editor = enable;
        } else if env::var("WAND_ARMOR_STAND_EDITOR").is_ok() {
            // Accept the bare variable as "true"
            config.armor_stand_editor = true;
        }

        config.seed = read_env::<u64>("WAND_SEED");
        config
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(Self::SETTINGS_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "Prof-Bloodstone", "WanderfulAdditions")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./plugins/WanderfulAdditions"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
