// src/config/mod.rs

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct WillowConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Gemini Configuration
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_timeout: u64,
    pub gemini_max_retries: u32,
    pub gemini_retry_delay_ms: u64,

    // ── Conversation Settings
    pub session_history_cap: usize,
    pub chat_context_cap: usize,
    pub chat_history_limit: u32,

    // ── API Defaults
    pub page_default_limit: u32,
    pub page_max_limit: u32,

    // ── CORS Settings
    pub cors_origin: String,

    // ── Timeouts (in seconds)
    pub request_timeout: u64,

    // ── Logging Configuration
    pub log_level: String,
}

// Tolerates inline comments and stray whitespace in .env values.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl WillowConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("WILLOW_HOST", "0.0.0.0".to_string()),
            port: env_var_or("PORT", 3000),
            database_url: env_var_or("DATABASE_URL", "sqlite:./willow.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            gemini_base_url: env_var_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com".to_string(),
            ),
            gemini_model: env_var_or("GEMINI_MODEL", "gemini-1.5-pro".to_string()),
            gemini_timeout: env_var_or("GEMINI_TIMEOUT", 30),
            gemini_max_retries: env_var_or("GEMINI_MAX_RETRIES", 3),
            gemini_retry_delay_ms: env_var_or("GEMINI_RETRY_DELAY_MS", 1000),
            session_history_cap: env_var_or("WILLOW_SESSION_HISTORY_CAP", 10),
            chat_context_cap: env_var_or("WILLOW_CHAT_CONTEXT_CAP", 10),
            chat_history_limit: env_var_or("WILLOW_CHAT_HISTORY_LIMIT", 50),
            page_default_limit: env_var_or("WILLOW_PAGE_DEFAULT_LIMIT", 10),
            page_max_limit: env_var_or("WILLOW_PAGE_MAX_LIMIT", 100),
            cors_origin: env_var_or("WILLOW_CORS_ORIGIN", "*".to_string()),
            request_timeout: env_var_or("WILLOW_REQUEST_TIMEOUT", 120),
            log_level: env_var_or("WILLOW_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods for Common Operations ---

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get per-request timeout for Gemini calls
    pub fn gemini_request_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini_timeout)
    }

    /// Base delay between Gemini retry attempts
    pub fn gemini_retry_delay(&self) -> Duration {
        Duration::from_millis(self.gemini_retry_delay_ms)
    }

    /// Get tracing level, falling back to INFO on unknown names
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }

    /// Whether CORS should be wide open (no specific origin configured)
    pub fn cors_allow_any(&self) -> bool {
        self.cors_origin == "*"
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<WillowConfig> = Lazy::new(WillowConfig::from_env);
