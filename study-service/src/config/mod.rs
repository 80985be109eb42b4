use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

/// Public Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Placeholder used when no key is supplied. It is never validated locally;
/// the upstream rejects it on first use.
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub common: core_config::Config,
    pub provider: ProviderKind,
    pub gemini: GeminiSettings,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// OTLP collector endpoint. Spans are only exported when set.
    pub otlp_endpoint: Option<String>,
}

/// Which model client backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    /// Deterministic local responses, for development without an API key.
    Mock,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "STUDY_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

impl StudyConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let timeout_secs = get_env(
            "GEMINI_TIMEOUT_SECS",
            Some(&DEFAULT_TIMEOUT_SECS.to_string()),
            is_prod,
        )?
        .parse()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS: {}", e)))?;

        Ok(StudyConfig {
            common: common_config,
            provider: get_env("STUDY_PROVIDER", Some("gemini"), is_prod)?.parse()?,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env(
                    "GEMINI_API_KEY",
                    Some(PLACEHOLDER_API_KEY),
                    false,
                )?),
                model: get_env("GEMINI_MODEL", Some("gemini-pro"), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                timeout_secs,
            },
            telemetry: TelemetryConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }

    /// Local configuration with the mock provider, bound to a random port.
    pub fn local_mock() -> Self {
        StudyConfig {
            common: core_config::Config {
                host: [127, 0, 0, 1].into(),
                port: 0,
            },
            provider: ProviderKind::Mock,
            gemini: GeminiSettings {
                api_key: Secret::new(PLACEHOLDER_API_KEY.to_string()),
                model: "gemini-pro".to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
