//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `DOCBRIDGE_*` env vars (`__` separates nested keys). Provides helpers to
//! expand `~` and `${VAR}` and to resolve relative paths against a known base
//! directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Typed view of the merged configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub server: ServerSettings,
    pub preview: PreviewSettings,
    pub suggest: SuggestSettings,
    pub normalizer: NormalizerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Engine binary. Must exist when the client is constructed.
    pub path: String,
    /// Directory the engine keeps its index in. Only checked for a startup warning.
    pub index_dir: String,
    /// Current directory for the engine child process.
    pub working_dir: Option<String>,
    /// Bounded wait per invocation. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            path: "../c_core/search_engine".to_string(),
            index_dir: "index_data".to_string(),
            working_dir: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewSettings {
    pub max_chars: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { max_chars: 200 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestSettings {
    pub max_suggestions: usize,
    pub min_prefix_chars: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self { max_suggestions: 5, min_prefix_chars: 2 }
    }
}

/// How raw document bytes become text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// Invalid UTF-8 sequences are dropped.
    #[default]
    Lossy,
    /// Invalid UTF-8 makes the document fail.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerSettings {
    pub extensions: Vec<String>,
    /// Replaces the built-in English stopword list when set.
    pub stopwords: Option<Vec<String>>,
    pub decoding: Decoding,
    pub stemming: bool,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self { extensions: vec!["txt".to_string()], stopwords: None, decoding: Decoding::Lossy, stemming: true }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => tracing::warn!(env = %env_name, "unknown RUST_ENV, using config.toml only"),
        }
        figment = figment.merge(Env::prefixed("DOCBRIDGE_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config = Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(self.figment.extract()?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let settings = self.settings()?;
        if settings.engine.path.trim().is_empty() {
            return Err(ConfigError::Invalid("engine.path must not be empty".to_string()));
        }
        if settings.preview.max_chars == 0 {
            return Err(ConfigError::Invalid("preview.max_chars must be positive".to_string()));
        }
        if settings.suggest.max_suggestions == 0 {
            return Err(ConfigError::Invalid("suggest.max_suggestions must be positive".to_string()));
        }
        if settings.suggest.min_prefix_chars == 0 {
            return Err(ConfigError::Invalid("suggest.min_prefix_chars must be at least 1".to_string()));
        }
        if settings.engine.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("engine.timeout_secs must be positive when set".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

/// Resolve against the process's current directory.
pub fn absolutize(p: &Path) -> std::io::Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    Ok(resolve_with_base(&env::current_dir()?, p.to_string_lossy()))
}
