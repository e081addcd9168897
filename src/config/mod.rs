pub mod keybindings;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const APP_DIR: &str = "infrapilot";
const MIN_POLL_INTERVAL_SECS: u64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find config directory")]
    NoConfigDir,
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Everything read from `config.toml`. Sections missing from the file take
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub notifications: NotificationConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API Gateway stage URL, e.g. `https://abc.execute-api.us-east-1.amazonaws.com/prod`
    pub base_url: String,
    pub chat_path: String,
    pub deployments_path: String,
    /// Prefix for the Authorization header (e.g. "Bearer"). The raw token is sent when unset.
    pub auth_scheme: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            chat_path: "/chat".to_string(),
            deployments_path: "/get".to_string(),
            auth_scheme: None,
            timeout_secs: 30,
        }
    }
}

/// Hosted identity provider settings, injected once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Token issuer; when set, tokens from other issuers are rejected
    pub authority: String,
    /// Hosted UI domain, e.g. `https://example.auth.us-east-1.amazoncognito.com`
    pub domain: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub post_logout_redirect_uri: String,
    pub response_type: String,
    pub scope: String,
    /// Where a previously issued ID token is read from
    pub token_file: Option<PathBuf>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            authority: String::new(),
            domain: String::new(),
            client_id: String::new(),
            redirect_uri: String::new(),
            post_logout_redirect_uri: String::new(),
            response_type: "code".to_string(),
            scope: "email openid phone".to_string(),
            token_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub poll_interval_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load_from(&default_config_path()?),
        }
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.notifications.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    /// Configured token file, falling back to `<config_dir>/infrapilot/token`
    pub fn token_path(&self) -> Option<PathBuf> {
        self.identity
            .token_file
            .clone()
            .or_else(|| config_dir().ok().map(|dir| dir.join("token")))
    }
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory for log files: `<data_local_dir>/infrapilot/logs` unless configured
pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging.directory.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("logs")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.api.chat_path, "/chat");
        assert_eq!(config.api.deployments_path, "/get");
        assert_eq!(config.notifications.poll_interval_secs, 30);
        assert_eq!(config.identity.scope, "email openid phone");
        assert!(config.ui.show_timestamps);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.example.com/prod\"\n\n[notifications]\npoll_interval_secs = 5"
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/prod");
        assert_eq!(config.api.chat_path, "/chat");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.identity.response_type, "code");
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_poll_interval_has_floor() {
        let mut config = AppConfig::default();
        config.notifications.poll_interval_secs = 0;
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_explicit_token_file_wins() {
        let mut config = AppConfig::default();
        config.identity.token_file = Some(PathBuf::from("/tmp/my-token"));
        assert_eq!(config.token_path(), Some(PathBuf::from("/tmp/my-token")));
    }
}
