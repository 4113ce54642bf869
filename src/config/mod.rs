use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Connection settings for the identity service and data store.
#[derive(Clone, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the project, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,
    /// Privileged service-role key, sent as both `apikey` and bearer token
    #[serde(default)]
    pub service_role_key: String,
    /// Table that receives the profile row (default: profiles)
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
    /// Optional per-request timeout in seconds; unset keeps the HTTP client default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl PlatformConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_role_key: String::new(),
            profiles_table: default_profiles_table(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("url", &self.url)
            .field("service_role_key", &"[redacted]")
            .field("profiles_table", &self.profiles_table)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse configuration file")
    }

    /// Apply values given on the command line or through the environment.
    pub fn with_overrides(mut self, url: Option<String>, service_role_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.platform.url = url;
        }
        if let Some(key) = service_role_key {
            self.platform.service_role_key = key;
        }
        self
    }

    /// Check that the platform credentials are present before serving.
    pub fn validate(&self) -> Result<()> {
        if self.platform.url.trim().is_empty() {
            bail!("platform.url is not set (use the config file, --platform-url or SUPABASE_URL)");
        }
        if !self.platform.url.starts_with("http://") && !self.platform.url.starts_with("https://") {
            bail!("platform.url must start with http:// or https://");
        }
        if self.platform.service_role_key.trim().is_empty() {
            bail!(
                "platform.service_role_key is not set (use the config file, --service-role-key or SUPABASE_SERVICE_ROLE_KEY)"
            );
        }
        if self.platform.profiles_table.trim().is_empty() {
            bail!("platform.profiles_table must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.platform.profiles_table, "profiles");
        assert_eq!(config.platform.request_timeout(), None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [platform]
            url = "https://abc.supabase.co"
            service_role_key = "secret"
            request_timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.platform.url, "https://abc.supabase.co");
        assert_eq!(config.platform.profiles_table, "profiles");
        assert_eq!(config.platform.request_timeout(), Some(Duration::from_secs(15)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = Config::parse("[platform]\nurl = \"https://file.example\"\n")
            .unwrap()
            .with_overrides(Some("https://cli.example".to_string()), Some("key".to_string()));

        assert_eq!(config.platform.url, "https://cli.example");
        assert_eq!(config.platform.service_role_key, "key");
    }

    #[test]
    fn test_validate_requires_credentials() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config::default().with_overrides(Some("https://abc.supabase.co".to_string()), None);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("service_role_key"));

        let config = Config::default().with_overrides(Some("abc.supabase.co".to_string()), Some("k".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_service_role_key() {
        let config = Config::default().with_overrides(None, Some("super-secret".to_string()));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
