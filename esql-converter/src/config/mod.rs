use crate::services::xsd::XsdTemplate;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub upload: UploadConfig,
    pub conversion: ConversionConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Ceiling applied to every request body, multipart or not.
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    pub template: XsdTemplate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// When set, spans are exported over OTLP in addition to local logs.
    pub otlp_endpoint: Option<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            upload: UploadConfig {
                max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            conversion: ConversionConfig {
                template: XsdTemplate::default(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
        }
    }
}

impl ConverterConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;

        let max_bytes = get_env("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse::<usize>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid MAX_UPLOAD_BYTES: {}", e))
            })?;

        let template = get_env("XSD_TEMPLATE", "standard")
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(ConverterConfig {
            common: common_config,
            upload: UploadConfig { max_bytes },
            conversion: ConversionConfig { template },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", "info"),
                otlp_endpoint: env::var("OTLP_ENDPOINT")
                    .ok()
                    .filter(|endpoint| !endpoint.trim().is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
