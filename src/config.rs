use std::env;
use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "xiaomi/mimo-v2-flash:free";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// All environment configuration, read once at startup and passed to the
/// components that need it. Nothing reads the environment after this.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub pdf_font_dir: Option<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("pdf_font_dir", &self.pdf_font_dir)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| "OPENROUTER_API_KEY must be set".to_string())?;

        Ok(Self {
            api_key,
            api_base: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: env::var("DEFAULT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            debug: env::var("DEBUG")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            request_timeout_secs: env::var("AI_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: env::var("AI_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_RETRIES),
            pdf_font_dir: env::var("PDF_FONT_DIR").ok(),
        })
    }

    /// Key as shown in logs and the health endpoint; never the full value.
    pub fn masked_api_key(&self) -> String {
        if self.api_key.len() > 8 {
            format!(
                "{}***{}",
                &self.api_key[0..4],
                &self.api_key[self.api_key.len() - 4..]
            )
        } else {
            "***".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> AppConfig {
        AppConfig {
            api_key: key.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            pdf_font_dir: None,
        }
    }

    #[test]
    fn test_masked_key_keeps_only_the_ends() {
        let config = config_with_key("sk-or-v1-abcdef123456");
        let masked = config.masked_api_key();
        assert!(masked.starts_with("sk-o"));
        assert!(masked.ends_with("3456"));
        assert!(!masked.contains("abcdef"));
    }

    #[test]
    fn test_short_keys_are_fully_masked() {
        let config = config_with_key("tiny");
        assert_eq!(config.masked_api_key(), "***");
    }

    #[test]
    fn test_debug_output_redacts_the_key() {
        let config = config_with_key("sk-or-v1-abcdef123456");
        let debugged = format!("{:?}", config);
        assert!(debugged.contains("[REDACTED]"));
        assert!(!debugged.contains("abcdef"));
    }
}
