use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::models::PollPolicy;
use crate::global_constants;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub openai_base_url: String,
    pub openai_model: String,
    pub temperature: f32,
    #[serde(default)]
    pub poll_policy: PollPolicy,
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            openai_base_url: global_constants::DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: global_constants::DEFAULT_OPENAI_MODEL.to_string(),
            temperature: global_constants::DEFAULT_TEMPERATURE,
            poll_policy: PollPolicy::default(),
            output_directory: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from_path(&settings_path)
    }

    pub fn load_from_path(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save_to_path(settings_path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(settings_path)?;
        let mut settings: AppSettings = serde_json::from_str(&contents)?;

        if settings.poll_policy.max_attempts == 0 {
            log::warn!("[SETTINGS] poll_policy.max_attempts is 0, polling at least once");
            settings.poll_policy.max_attempts = 1;
        }

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Model: {}", settings.openai_model);
        log::debug!("[SETTINGS] Poll policy: {:?}", settings.poll_policy);

        Ok(settings)
    }

    pub fn save_to_path(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    /// Environment values win over the settings file.
    pub fn apply_environment_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = non_empty(lookup(global_constants::ENV_OPENAI_BASE_URL)) {
            log::debug!("[SETTINGS] Using OpenAI base URL from environment");
            self.openai_base_url = base_url;
        }

        if let Some(model) = non_empty(lookup(global_constants::ENV_OPENAI_MODEL)) {
            log::debug!("[SETTINGS] Using OpenAI model from environment: {}", model);
            self.openai_model = model;
        }

        if let Some(output_dir) = non_empty(lookup(global_constants::ENV_OUTPUT_DIR)) {
            self.output_directory = Some(PathBuf::from(output_dir));
        }
    }

    pub fn resolved_output_directory(&self) -> PathBuf {
        self.output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

/// API keys and endpoints. These only ever come from the environment.
#[derive(Clone, Default)]
pub struct ServiceCredentials {
    pub azure_api_key: String,
    pub azure_endpoint: String,
    pub openai_api_key: String,
}

impl std::fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("azure_api_key", &redact(&self.azure_api_key))
            .field("azure_endpoint", &self.azure_endpoint)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

impl ServiceCredentials {
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Missing values are not fatal; the remote service rejects the call.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| match non_empty(lookup(key)) {
            Some(value) => value,
            None => {
                log::warn!("[SETTINGS] {} is not set", key);
                String::new()
            }
        };

        Self {
            azure_api_key: read(global_constants::ENV_AZURE_API_KEY),
            azure_endpoint: read(global_constants::ENV_AZURE_ENDPOINT),
            openai_api_key: read(global_constants::ENV_OPENAI_API_KEY),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
