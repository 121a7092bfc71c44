use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};
use crate::security::InputValidator;

/// Environment variable that overrides the config file's API key.
pub const API_KEY_ENV: &str = "FREEIMAGE_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://freeimage.host/api/1/upload";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub resize_threshold_bytes: u64,
    pub target_width: u32,
    pub jpeg_quality: u8,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            resize_threshold_bytes: 1024 * 1024, // 1 MiB
            target_width: 800,
            jpeg_quality: 85,
            request_timeout_secs: 120,
            log_level: "info".to_string(),
        }
    }
}

fn get_config_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Config("Could not find config directory".to_string()))?
        .join("freeimage-uploader");

    fs::create_dir_all(&config_dir)?;
    Ok(config_dir.join("config.json"))
}

pub fn load_config() -> AppResult<Config> {
    let config_path = get_config_path()?;

    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_str).unwrap_or_else(|e| {
            log::warn!("Failed to parse config file: {}. Using defaults.", e);
            Config::default()
        });

        // Validate config before returning
        validate_config(&config)?;

        Ok(config)
    } else {
        // Create default config
        let default_config = Config::default();
        save_config_internal(&default_config)?;
        Ok(default_config)
    }
}

pub fn save_config(config: &Config) -> AppResult<()> {
    validate_config(config)?;
    save_config_internal(config)
}

fn save_config_internal(config: &Config) -> AppResult<()> {
    let config_path = get_config_path()?;

    // Create backup of existing config
    if config_path.exists() {
        let backup_path = config_path.with_extension("json.bak");
        if let Err(e) = fs::copy(&config_path, &backup_path) {
            log::warn!("Failed to create config backup: {}", e);
        }
    }

    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_str)?;

    log::info!("Configuration saved successfully");
    Ok(())
}

/// Resolve the API key at runtime: environment first, then config file.
/// The key is never embedded in source.
pub fn resolve_api_key(config: &Config) -> AppResult<String> {
    let from_env = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty());
    resolve_api_key_from(from_env, config)
}

fn resolve_api_key_from(env_key: Option<String>, config: &Config) -> AppResult<String> {
    let key = env_key
        .or_else(|| config.api_key.clone())
        .ok_or(AppError::MissingApiKey)?;
    let key = key.trim().to_string();

    InputValidator::validate_api_key(&key)?;
    Ok(key)
}

pub fn validate_config(config: &Config) -> AppResult<()> {
    InputValidator::validate_endpoint(&config.endpoint)?;

    if config.resize_threshold_bytes == 0 {
        return Err(AppError::validation(
            "resize_threshold_bytes",
            "Must be greater than 0",
        ));
    }

    if config.target_width == 0 {
        return Err(AppError::validation("target_width", "Must be greater than 0"));
    }

    if config.jpeg_quality == 0 || config.jpeg_quality > 100 {
        return Err(AppError::validation(
            "jpeg_quality",
            "Must be between 1 and 100",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(AppError::validation(
            "request_timeout_secs",
            "Must be greater than 0",
        ));
    }

    // Validate log level
    let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
    if !valid_log_levels.contains(&config.log_level.as_str()) {
        return Err(AppError::validation("log_level", "Must be a valid log level"));
    }

    Ok(())
}
