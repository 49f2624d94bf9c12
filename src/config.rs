use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::browser::ViewMode;
use crate::news::{ApiSettings, Category};

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

const APP_DIR: &str = "news-browser";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// On-disk `config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub lang: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    pub view: Option<String>,
    pub debounce_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub open_command: Option<String>,
    pub header: Option<String>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api: ApiSettings,
    pub category: Category,
    pub view: ViewMode,
    pub debounce: Duration,
    pub timeout: Duration,
    pub open_command: Option<String>,
    pub header: Option<String>,
    pub log_file: Option<PathBuf>,
}

pub fn load(config_override: Option<String>) -> Result<RuntimeConfig> {
    let file = match config_override {
        Some(path_str) => read_config_file(Path::new(&path_str))?,
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config_file(&path)?,
            _ => AppConfig::default(),
        },
    };
    resolve(file, env::var(API_KEY_ENV).ok())
}

pub fn read_config_file(path: &Path) -> Result<AppConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

/// Merge file values, the environment key and built-in defaults.
pub fn resolve(file: AppConfig, env_key: Option<String>) -> Result<RuntimeConfig> {
    let defaults = ApiSettings::default();
    let api_key = env_key
        .filter(|k| !k.trim().is_empty())
        .or(file.api_key)
        .map(|k| k.trim().to_string())
        .unwrap_or_default();

    let category = match file.category.as_deref() {
        Some(name) => name.parse::<Category>().context("invalid `category` in config")?,
        None => Category::default(),
    };
    let view = match file.view.as_deref() {
        Some(name) => match name.parse::<ViewMode>() {
            Ok(v) => v,
            Err(msg) => bail!("invalid `view` in config: {}", msg),
        },
        None => ViewMode::default(),
    };

    Ok(RuntimeConfig {
        api: ApiSettings {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            api_key,
            lang: file.lang.unwrap_or(defaults.lang),
            country: file.country.unwrap_or(defaults.country),
        },
        category,
        view,
        debounce: Duration::from_millis(file.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1)),
        open_command: file.open_command,
        header: file.header,
        log_file: file.log_file.or_else(default_log_path),
    })
}

/// Prompt once for a missing API key when someone is at the terminal.
pub fn ensure_api_key(cfg: &mut RuntimeConfig) -> Result<()> {
    if !cfg.api.api_key.is_empty() {
        return Ok(());
    }
    if !console::user_attended() {
        bail!("no API key: set {} or `api_key` in config.toml", API_KEY_ENV);
    }
    let key: String = dialoguer::Password::new()
        .with_prompt("GNews API key")
        .interact()
        .context("failed to read API key")?;
    let key = key.trim().to_string();
    if key.is_empty() {
        bail!("no API key: set {} or `api_key` in config.toml", API_KEY_ENV);
    }
    cfg.api.api_key = key;
    Ok(())
}

fn app_dir() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    if let Ok(home) = env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join(APP_DIR));
    }
    None
}

fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

fn default_log_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("news-browser.log"))
}
