//! Configuration module
//!
//! Client settings come from the environment (optionally seeded from a
//! `.env` file) with defaults that talk to the public corpus API.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::AppError;
use crate::models::DEFAULT_CATEGORY_ID;

const DEFAULT_API_URL: &str = "https://api.corpus.swecha.org";
const HTTP_TIMEOUT_SECS: u64 = 60;
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub default_category_id: String,
    /// `None` disables the request timeout.
    pub http_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("CORPUS_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_file = match env::var("CORPUS_SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file()?,
        };

        let default_category_id = env::var("CORPUS_DEFAULT_CATEGORY_ID")
            .unwrap_or_else(|_| DEFAULT_CATEGORY_ID.to_string());

        let timeout_secs = match env::var("CORPUS_HTTP_TIMEOUT_SECS") {
            Ok(value) => value.trim().parse::<u64>().map_err(|_| {
                AppError::Config("CORPUS_HTTP_TIMEOUT_SECS must be a whole number of seconds".into())
            })?,
            Err(_) => HTTP_TIMEOUT_SECS,
        };

        let config = Self {
            api_url,
            session_file,
            default_category_id,
            http_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        };
        config.validate()?;

        tracing::debug!(
            api_url = %config.api_url,
            session_file = %config.session_file.display(),
            "Loaded client configuration"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.default_category_id.trim().is_empty() {
            return Err(AppError::Config(
                "CORPUS_DEFAULT_CATEGORY_ID must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Config pointing at `api_url` with a session file at `session_file`.
    pub fn new(api_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            session_file: session_file.into(),
            default_category_id: DEFAULT_CATEGORY_ID.to_string(),
            http_timeout: Some(Duration::from_secs(HTTP_TIMEOUT_SECS)),
        }
    }
}

/// `<data dir>/session.json`, e.g. `~/.local/share/corpus/session.json` on Linux.
pub fn default_session_file() -> Result<PathBuf, AppError> {
    let dirs = ProjectDirs::from("org", "swecha", "corpus").ok_or_else(|| {
        AppError::Config("No home directory found; set CORPUS_SESSION_FILE".into())
    })?;
    Ok(dirs.data_dir().join(SESSION_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/", "/tmp/session.json");
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.default_category_id, DEFAULT_CATEGORY_ID);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ClientConfig::new("ftp://example.org", "/tmp/session.json");
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_blank_category() {
        let mut config = ClientConfig::new("https://example.org", "/tmp/session.json");
        config.default_category_id = "  ".into();
        assert!(config.validate().is_err());
    }
}
