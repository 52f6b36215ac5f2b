use std::env;

use crate::error::AppError;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_AI_MODEL: &str = "@cf/meta/llama-3-8b-instruct";

/// Where users, tasks and sessions are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    /// Process-local maps; data is lost on restart.
    Memory,
}

/// Connection settings for the external text-generation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub run_url: String,
    pub api_token: Option<String>,
    pub model: String,
}

pub struct Config {
    pub server_port: u16,
    pub server_host: String,
    pub storage: StorageBackend,
    pub session_ttl_secs: u64,
    /// `None` when no model endpoint is configured; AI features then fall back to defaults.
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| AppError::ConfigError("SERVER_PORT must be a number".into()))?;

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres {
                database_url: env::var("DATABASE_URL").map_err(|_| {
                    AppError::ConfigError("DATABASE_URL must be set".into())
                })?,
            },
            other => {
                return Err(AppError::ConfigError(format!(
                    "Unknown STORAGE_BACKEND '{}', expected 'postgres' or 'memory'",
                    other
                )))
            }
        };

        let session_ttl_secs = match env::var("SESSION_TTL_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError("SESSION_TTL_SECS must be a number of seconds".into())
            })?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        let ai = non_empty_var("AI_RUN_URL").map(|run_url| AiConfig {
            run_url,
            api_token: non_empty_var("AI_API_TOKEN"),
            model: non_empty_var("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
        });

        Ok(Self {
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            storage,
            session_ttl_secs,
            ai,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
