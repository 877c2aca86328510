use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "DIRA_ODDS_CONFIG";

pub const DIRA_API_BASE: &str = "https://www.dira.moch.gov.il/api/Invoker";
/// Projects whose lottery has been drawn.
pub const PROJECT_STATUS_DRAWN: u32 = 4;
pub const ENTITLEMENT_GENERAL: u32 = 1;
/// Fixed page size; only the first page is fetched.
pub const PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub api: Api,
    pub output: Output,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub project_status: u32,
    pub entitlement: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Output {
    pub dir: PathBuf,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DIRA_API_BASE.to_string(),
            project_status: PROJECT_STATUS_DRAWN,
            entitlement: ENTITLEMENT_GENERAL,
            page_size: PAGE_SIZE,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
