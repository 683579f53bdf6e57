use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::models::{FeatureType, LanguageHint};
use crate::global_constants;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub auth_base_url: String,
    pub functions_base_url: String,
    pub annotate_function: String,
}

impl std::fmt::Debug for FirebaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSettings")
            .field("api_key", &redact(&self.api_key))
            .field("auth_base_url", &self.auth_base_url)
            .field("functions_base_url", &self.functions_base_url)
            .field("annotate_function", &self.annotate_function)
            .finish()
    }
}

impl Default for FirebaseSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_base_url: global_constants::DEFAULT_AUTH_BASE_URL.to_string(),
            functions_base_url: global_constants::DEFAULT_FUNCTIONS_BASE_URL.to_string(),
            annotate_function: global_constants::DEFAULT_ANNOTATE_FUNCTION.to_string(),
        }
    }
}

/// The pre-provisioned demo account. Not user supplied.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("email", &self.email)
            .field("password", &redact(&self.password))
            .finish()
    }
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            email: global_constants::DEFAULT_DEMO_EMAIL.to_string(),
            password: global_constants::DEFAULT_DEMO_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    pub target_width: u32,
    pub target_height: u32,
    pub jpeg_quality: u8,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            target_width: global_constants::DEFAULT_TARGET_WIDTH,
            target_height: global_constants::DEFAULT_TARGET_HEIGHT,
            jpeg_quality: global_constants::DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub features: Vec<FeatureType>,
    pub language_hints: Vec<LanguageHint>,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            features: vec![FeatureType::TextDetection],
            language_hints: LanguageHint::default_table(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub firebase: FirebaseSettings,
    pub credentials: DemoCredentials,
    pub encoder: EncoderSettings,
    pub request: RequestSettings,
}

impl AppSettings {
    /// Loads settings from `path`, writing the defaults there first if the file is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!(
                "{} No settings file at {:?}, writing defaults",
                global_constants::LOG_TAG_SETTINGS,
                path
            );
            let default_settings = Self::default();
            default_settings.save_to(path)?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Settings file {:?} is not valid JSON", path))?;

        log::info!("{} Loaded settings from {:?}", global_constants::LOG_TAG_SETTINGS, path);
        log::debug!("{} {:?}", global_constants::LOG_TAG_SETTINGS, settings);

        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;

        log::info!("{} Saved settings to {:?}", global_constants::LOG_TAG_SETTINGS, path);
        Ok(())
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
