//! Configuration loading and persistence.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/lazycommit/config.toml` on Linux). Missing files and missing
//! keys fall back to defaults, so a partial config is always valid. A few
//! environment variables override the file for one-off runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// LLM backend used for message enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    None,
    OpenAi,
    Anthropic,
    Ollama,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::None => "none",
            AiProvider::OpenAi => "openai",
            AiProvider::Anthropic => "anthropic",
            AiProvider::Ollama => "ollama",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" => Some(AiProvider::None),
            "openai" => Some(AiProvider::OpenAi),
            "anthropic" => Some(AiProvider::Anthropic),
            "ollama" => Some(AiProvider::Ollama),
            _ => None,
        }
    }
}

/// How scopes are rendered inside the conventional-commit prefix.
///
/// `CamelCase` reproduces the historical transform exactly: it title-cases
/// and concatenates words, so `USER_AUTH` becomes `UserAuth` (PascalCase
/// despite the name). Asserted by tests; do not "fix" silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScopeStyle {
    #[default]
    #[serde(rename = "lowercase")]
    Lowercase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "camelCase")]
    CamelCase,
}

/// Settings for the enhancement backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::None,
            model: "gpt-4".to_string(),
            temperature: 0.3,
            max_tokens: 150,
            timeout_secs: 30,
        }
    }
}

/// Settings for commit message formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    pub conventional: bool,
    pub max_length: usize,
    pub scope_style: ScopeStyle,
    pub include_scope: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            conventional: true,
            max_length: 72,
            scope_style: ScopeStyle::Lowercase,
            include_scope: true,
        }
    }
}

/// Toggles for the comment-marker signal sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enable_todos: bool,
    pub enable_fixes: bool,
    pub enable_bugs: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enable_todos: true,
            enable_fixes: true,
            enable_bugs: true,
        }
    }
}

/// Top-level configuration, passed by reference into each component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub commit: CommitConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("lazycommit").join("config.toml"))
    }

    /// Load from the default location, creating the file with defaults on
    /// first run, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            config
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
        toml::from_str(&content).map_err(ConfigError::ParseFailed)
    }

    /// Save atomically: write to a temp file in the target directory, then
    /// persist over the final path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(ConfigError::WriteFailed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(content.as_bytes())
            .map_err(ConfigError::WriteFailed)?;
        tmp.persist(path)
            .map_err(|e| ConfigError::WriteFailed(e.error))?;

        Ok(())
    }

    /// Environment overrides for one-off runs without editing the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(provider) = std::env::var("LAZYCOMMIT_AI_PROVIDER")
            && let Some(parsed) = AiProvider::from_name(&provider)
        {
            self.ai.provider = parsed;
        }
        if let Ok(model) = std::env::var("LAZYCOMMIT_AI_MODEL")
            && !model.is_empty()
        {
            self.ai.model = model;
        }
        if let Ok(raw) = std::env::var("LAZYCOMMIT_MAX_LENGTH")
            && let Ok(len) = raw.parse::<usize>()
        {
            self.commit.max_length = len;
        }
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ai.temperature) {
            return Err(ConfigError::InvalidValue {
                key: "ai.temperature".to_string(),
                reason: format!("must be between 0.0 and 1.0, got {}", self.ai.temperature),
            });
        }
        if self.ai.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ai.max_tokens".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ai.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.commit.max_length < 10 {
            return Err(ConfigError::InvalidValue {
                key: "commit.max_length".to_string(),
                reason: format!("must be at least 10, got {}", self.commit.max_length),
            });
        }
        Ok(())
    }
}
