use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pushcard_notifications::adapters::expo::DEFAULT_BASE_URL;
use pushcard_notifications::{PlatformOs, ProjectIdSource};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_APP_ID: &str = "com.pushcard.terminal";

/// Keys accepted by `pushcard config set`.
pub const KEYS: &[&str] = &[
    "project_id",
    "eas_project_id",
    "endpoint",
    "token",
    "device_id",
    "device_token",
    "platform",
    "app_id",
    "development",
    "log_level",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub project_id: Option<String>,
    /// Fallback project ID, as written by the build tooling
    pub eas_project_id: Option<String>,
    pub endpoint: Option<String>,
    /// Default recipient for `pushcard send`
    pub token: Option<String>,
    pub device_id: Option<String>,
    /// Native push token of this host; without one the host is treated as a simulator
    pub device_token: Option<String>,
    pub platform: Option<String>,
    pub app_id: Option<String>,
    pub development: Option<bool>,
    pub log_level: Option<String>,
}

impl ProfileConfig {
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "project_id" => self.project_id.clone(),
            "eas_project_id" => self.eas_project_id.clone(),
            "endpoint" => self.endpoint.clone(),
            "token" => self.token.clone(),
            "device_id" => self.device_id.clone(),
            "device_token" => self.device_token.clone(),
            "platform" => self.platform.clone(),
            "app_id" => self.app_id.clone(),
            "development" => self.development.map(|d| d.to_string()),
            "log_level" => self.log_level.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        match key {
            "project_id" => self.project_id = Some(value),
            "eas_project_id" => self.eas_project_id = Some(value),
            "endpoint" => {
                url::Url::parse(&value).with_context(|| format!("Invalid endpoint URL: {value}"))?;
                self.endpoint = Some(value);
            }
            "token" => self.token = Some(value),
            "device_id" => self.device_id = Some(value),
            "device_token" => self.device_token = Some(value),
            "platform" => {
                parse_platform(&value)?;
                self.platform = Some(value);
            }
            "app_id" => self.app_id = Some(value),
            "development" => {
                let flag = value
                    .parse::<bool>()
                    .with_context(|| format!("development must be true or false, got {value}"))?;
                self.development = Some(flag);
            }
            "log_level" => self.log_level = Some(value),
            other => {
                anyhow::bail!("Unknown config key: {other}. Valid keys: {}", KEYS.join(", "))
            }
        }
        Ok(())
    }

    pub fn os(&self) -> Result<PlatformOs> {
        self.platform
            .as_deref()
            .map(parse_platform)
            .transpose()
            .map(|os| os.unwrap_or(PlatformOs::Other))
    }
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn parse_platform(value: &str) -> Result<PlatformOs> {
    match value.to_ascii_lowercase().as_str() {
        "android" => Ok(PlatformOs::Android),
        "ios" => Ok(PlatformOs::Ios),
        "other" => Ok(PlatformOs::Other),
        other => anyhow::bail!("Unknown platform: {other}. Valid values: android, ios, other"),
    }
}

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".pushcard");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load_all_from(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let cfg: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(cfg)
}

pub fn save_profile_to(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all_from(path)?;
    all.insert(profile.to_string(), config.clone());
    let content = toml::to_string_pretty(&all)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let all = load_all_from(&config_path()?)?;
    Ok(all.get(profile).cloned().unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    save_profile_to(&config_path()?, profile, config)
}

pub fn resolve_endpoint(cli_endpoint: &Option<String>, cfg: &ProfileConfig) -> Result<String> {
    // 1. --endpoint flag / PUSHCARD_ENDPOINT env
    // 2. config.toml profile
    // 3. hosted relay
    let endpoint = cli_endpoint
        .clone()
        .or_else(|| cfg.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    url::Url::parse(&endpoint).with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;
    Ok(endpoint)
}

pub fn resolve_project_id(cli_project_id: &Option<String>, cfg: &ProfileConfig) -> Option<String> {
    ProjectIdSource {
        app_config: cli_project_id.clone().or_else(|| cfg.project_id.clone()),
        eas_config: cfg.eas_project_id.clone(),
    }
    .resolve()
}

pub fn resolve_token(cli_token: &Option<String>, cfg: &ProfileConfig) -> Option<String> {
    cli_token.clone().or_else(|| cfg.token.clone())
}
