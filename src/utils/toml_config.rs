//! TOML-based configuration for Feelora
//!
//! Settings are read from `feelora.toml`. Secrets never live in the file:
//! the `*_env` fields name the environment variables that hold them, and
//! `.env` is loaded into the environment before the file is read.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [auth]
//! jwt_secret_env = "JWT_SECRET"
//!
//! [gemini]
//! api_key_env = "GEMINI_API_KEY"
//! model = "gemini-pro"
//! ```

use crate::chat::session::{DEFAULT_MAX_SESSIONS_PER_OWNER, DEFAULT_SESSION_IDLE_TTL_SECS};
use crate::llm::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::llm::GenerationConfig;
use crate::types::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "feelora.toml";

/// Shortest accepted JWT signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Root configuration structure loaded from feelora.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeloraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_expiry: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_jwt_refresh_expiry")]
    pub jwt_refresh_expiry: i64,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_jwt_access_expiry() -> i64 {
    900
}

fn default_jwt_refresh_expiry() -> i64 {
    604800
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            jwt_access_expiry: default_jwt_access_expiry(),
            jwt_refresh_expiry: default_jwt_refresh_expiry(),
        }
    }
}

// ============= Gemini Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Environment variable name containing the API key
    #[serde(default = "default_gemini_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_gemini_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    GenerationConfig::default().temperature
}

fn default_top_k() -> u32 {
    GenerationConfig::default().top_k
}

fn default_top_p() -> f32 {
    GenerationConfig::default().top_p
}

fn default_max_output_tokens() -> u32 {
    GenerationConfig::default().max_output_tokens
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_gemini_key_env(),
            api_base: default_api_base(),
            model: default_model(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl GeminiConfig {
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

// ============= Chat Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Open conversations one principal may hold; opening another evicts
    /// their least recently active one
    #[serde(default = "default_max_sessions_per_owner")]
    pub max_sessions_per_owner: usize,

    /// Seconds of inactivity after which a conversation is dropped
    #[serde(default = "default_session_idle_ttl")]
    pub session_idle_ttl: i64,
}

fn default_max_sessions_per_owner() -> usize {
    DEFAULT_MAX_SESSIONS_PER_OWNER
}

fn default_session_idle_ttl() -> i64 {
    DEFAULT_SESSION_IDLE_TTL_SECS
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_sessions_per_owner: default_max_sessions_per_owner(),
            session_idle_ttl: default_session_idle_ttl(),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {0}: {1}")]
    ReadError(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl FeeloraConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate against the process environment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// Validate value ranges and the JWT secret, resolving env vars through
    /// `lookup`.
    pub fn validate_with<F>(&self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(&self.auth.jwt_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "{} must be at least {} characters",
                self.auth.jwt_secret_env, MIN_JWT_SECRET_LEN
            )));
        }

        if self.auth.jwt_access_expiry <= 0 || self.auth.jwt_refresh_expiry <= 0 {
            return Err(ConfigError::ValidationError(
                "Token expiry values must be positive".to_string(),
            ));
        }

        if self.chat.max_sessions_per_owner == 0 || self.chat.session_idle_ttl <= 0 {
            return Err(ConfigError::ValidationError(
                "chat.max_sessions_per_owner and chat.session_idle_ttl must be positive"
                    .to_string(),
            ));
        }

        let gemini = &self.gemini;
        if !(0.0..=2.0).contains(&gemini.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "gemini.temperature must be between 0 and 2, got {}",
                gemini.temperature
            )));
        }
        if !(0.0..=1.0).contains(&gemini.top_p) {
            return Err(ConfigError::ValidationError(format!(
                "gemini.top_p must be between 0 and 1, got {}",
                gemini.top_p
            )));
        }
        if gemini.top_k == 0 || gemini.max_output_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "gemini.top_k and gemini.max_output_tokens must be positive".to_string(),
            ));
        }
        if gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.auth.jwt_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Get the Gemini API key from the environment
    pub fn gemini_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.gemini.api_key_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.gemini.api_key_env.clone()))
    }

    /// Environment-provided secrets with their values masked, for display.
    pub fn masked_secrets(&self) -> Vec<(String, String)> {
        [&self.auth.jwt_secret_env, &self.gemini.api_key_env]
            .into_iter()
            .map(|name| {
                let shown = match self.resolve_env(name) {
                    Some(value) => mask_secret(&value),
                    None => "(not set)".to_string(),
                };
                (name.clone(), shown)
            })
            .collect()
    }
}

/// Keep the first four characters of a secret and hide the rest.
pub fn mask_secret(value: &str) -> String {
    if value.chars().count() <= 8 {
        return "********".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    format!("{}********", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    const SECRET: &str = "test-secret-at-least-32-characters-long";

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[auth]
jwt_secret_env = "TEST_JWT_SECRET"
jwt_access_expiry = 600

[gemini]
api_key_env = "TEST_GEMINI_KEY"
api_base = "http://localhost:9999/v1beta"
temperature = 0.5

[chat]
max_sessions_per_owner = 3
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = FeeloraConfig::from_toml(&create_test_config()).unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.auth.jwt_access_expiry, 600);
        assert_eq!(config.auth.jwt_refresh_expiry, 604800);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.top_k, 40);

        let generation = config.gemini.generation_config();
        assert_eq!(generation.temperature, 0.5);
        assert_eq!(generation.max_output_tokens, 300);

        assert_eq!(config.chat.max_sessions_per_owner, 3);
        assert_eq!(config.chat.session_idle_ttl, 3600);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = FeeloraConfig::from_toml("").unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.gemini.api_base, DEFAULT_API_BASE);
        assert_eq!(config.gemini.generation_config(), GenerationConfig::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FeeloraConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(create_test_config().as_bytes()).unwrap();

        let config = FeeloraConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server\nport = ").unwrap();

        assert!(matches!(
            FeeloraConfig::load(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate_requires_jwt_secret() {
        let config = FeeloraConfig::from_toml(&create_test_config()).unwrap();

        let err = config.validate_with(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "TEST_JWT_SECRET"));

        let err = config
            .validate_with(env(&[("TEST_JWT_SECRET", "short")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        config
            .validate_with(env(&[("TEST_JWT_SECRET", SECRET)]))
            .unwrap();
    }

    #[test]
    fn test_validate_rejects_out_of_range_sampling() {
        let mut config = FeeloraConfig::default();
        config.gemini.top_p = 1.5;
        assert!(config
            .validate_with(env(&[("JWT_SECRET", SECRET)]))
            .is_err());

        let mut config = FeeloraConfig::default();
        config.gemini.max_output_tokens = 0;
        assert!(config
            .validate_with(env(&[("JWT_SECRET", SECRET)]))
            .is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_chat_limits() {
        let mut config = FeeloraConfig::default();
        config.chat.max_sessions_per_owner = 0;
        assert!(config
            .validate_with(env(&[("JWT_SECRET", SECRET)]))
            .is_err());

        let mut config = FeeloraConfig::default();
        config.chat.session_idle_ttl = 0;
        assert!(config
            .validate_with(env(&[("JWT_SECRET", SECRET)]))
            .is_err());
    }

    #[test]
    fn test_config_error_maps_to_app_error() {
        let err: AppError = ConfigError::MissingEnvVar("X".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "********");
        assert_eq!(mask_secret("AIzaSyExampleKey"), "AIza********");
    }
}
