use crate::services::testimonials::SCENARIOS;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Scenarios drawn from the catalog on each generation run.
const DEFAULT_TESTIMONIAL_COUNT: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub storage: StorageConfig,
    pub profile: ProfileConfig,
    pub testimonials: TestimonialConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// `None` leaves the completion client unconfigured; the service still
    /// starts and the model-backed endpoints answer 500.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub local_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub developer_name: String,
    pub developer_role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialConfig {
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl PortfolioConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PortfolioConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: non_blank(env::var("OPENAI_API_KEY").ok()),
                model: get_env("OPENAI_MODEL", Some("gpt-4o-mini"), is_prod)?,
                base_url: get_env(
                    "OPENAI_BASE_URL",
                    Some("https://api.openai.com/v1"),
                    is_prod,
                )?,
            },
            storage: StorageConfig {
                local_path: get_env("STORAGE_LOCAL_PATH", Some("storage"), is_prod)?,
            },
            profile: ProfileConfig {
                developer_name: get_env("DEVELOPER_NAME", Some("Mwenda_Dipark"), is_prod)?,
                developer_role: get_env(
                    "DEVELOPER_ROLE",
                    Some("Full-Stack Developer"),
                    is_prod,
                )?,
            },
            testimonials: TestimonialConfig {
                count: parse_testimonial_count(&get_env(
                    "TESTIMONIAL_COUNT",
                    Some(&DEFAULT_TESTIMONIAL_COUNT.to_string()),
                    is_prod,
                )?)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|origins| parse_origins(&origins))
                    .unwrap_or_default(),
            },
        })
    }
}

pub fn clamp_testimonial_count(count: usize) -> usize {
    count.clamp(1, SCENARIOS.len())
}

fn parse_testimonial_count(raw: &str) -> Result<usize, AppError> {
    let count = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            AppError::ConfigError(anyhow::anyhow!("Invalid TESTIMONIAL_COUNT {:?}: {}", raw, e))
        })?;
    Ok(clamp_testimonial_count(count))
}

/// Blank or whitespace-only keys leave the client unconfigured.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
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
