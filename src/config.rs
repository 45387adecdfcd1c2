//! Configuration module - environment variables and CLI overrides

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the inference API key
pub const ENV_API_KEY: &str = "HF_API_KEY";

/// Environment variable overriding the inference base URL
pub const ENV_BASE_URL: &str = "PROMPTCRAFT_BASE_URL";

/// Environment variable overriding the enhancement model
pub const ENV_MODEL: &str = "PROMPTCRAFT_MODEL";

/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "PROMPTCRAFT_TIMEOUT_SECS";

/// Environment variable overriding the completion token budget
pub const ENV_MAX_TOKENS: &str = "PROMPTCRAFT_MAX_TOKENS";

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co";
pub const DEFAULT_MODEL: &str = "google/gemma-2-9b-it";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_PORT: u16 = 3000;

/// Optional settings, usually from the command line, that win over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_tokens: Option<u32>,
    pub port: Option<u16>,
    pub export_dir: Option<PathBuf>,
    pub no_browser: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when no credential is configured; enhancement then fails fast
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub port: u16,
    pub export_dir: PathBuf,
    pub no_browser: bool,
}

impl Config {
    /// Build a config from explicit values
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        options: ConfigOptions,
    ) -> Result<Arc<Self>, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Empty(ENV_BASE_URL));
        }

        let model = options
            .model
            .map(|m| m.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.is_empty() {
            return Err(ConfigError::Empty(ENV_MODEL));
        }

        let timeout_secs = options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                name: ENV_TIMEOUT_SECS,
                value: "0".to_string(),
            });
        }

        Ok(Arc::new(Self {
            api_key: api_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            port: options.port.unwrap_or(DEFAULT_PORT),
            export_dir: options.export_dir.unwrap_or_else(|| PathBuf::from(".")),
            no_browser: options.no_browser,
        }))
    }

    /// Build a config from the process environment, then apply `options`
    pub fn from_env(options: ConfigOptions) -> Result<Arc<Self>, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), options)
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, mut options: ConfigOptions) -> Result<Arc<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = non_blank(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if options.model.is_none() {
            options.model = non_blank(ENV_MODEL);
        }

        if options.timeout_secs.is_none() {
            options.timeout_secs = non_blank(ENV_TIMEOUT_SECS)
                .map(|v| parse_positive(ENV_TIMEOUT_SECS, &v))
                .transpose()?;
        }

        if options.max_tokens.is_none() {
            options.max_tokens = non_blank(ENV_MAX_TOKENS)
                .map(|v| parse_positive(ENV_MAX_TOKENS, &v))
                .transpose()?
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX));
        }

        Self::new(lookup(ENV_API_KEY), &base_url, options)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
