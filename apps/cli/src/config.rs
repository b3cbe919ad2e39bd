use std::fs;
use std::path::{Path, PathBuf};

use bluefin_app::{AppConfig, DEFAULT_EXPORT_NAME};
use bluefin_core::PolicyConfig;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "bluefin";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_PORT: u16 = 3846;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub port: u16,
    /// Download name used when the UI does not supply one.
    pub export_name: String,
    pub policy: PolicyConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            export_name: DEFAULT_EXPORT_NAME.to_string(),
            policy: PolicyConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            policy: self.policy,
            default_export_name: self.export_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Reads the config file, writing one with defaults when it does not exist.
pub fn load_or_create(path: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_dir()?.join(CONFIG_FILE_NAME),
    };

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }
    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn default_config_dir() -> Result<PathBuf, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
