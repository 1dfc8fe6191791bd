//! Application settings configuration
//!
//! Defines audit, fetch, probe and notifier settings. Settings are built
//! once at startup and handed to each component's constructor.

use crate::models::TlsProtocol;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAX_THRESHOLD_DAYS: i64 = 36_500;

/// Host list and scheduling settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    pub hosts_file: Option<PathBuf>,
    pub expiry_threshold_days: i64,
    pub port: u16,
    /// Hosts audited at the same time
    pub parallel: usize,
    /// Upper bound on a whole host audit (all stages)
    pub host_timeout_secs: u64,
    /// Run protocol probes even when the HTTPS request failed
    pub probe_on_fetch_failure: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            hosts_file: None,
            expiry_threshold_days: 7,
            port: 443,
            parallel: 4,
            host_timeout_secs: 60,
            probe_on_fetch_failure: false,
        }
    }
}

impl AuditSettings {
    pub fn host_timeout(&self) -> Duration {
        Duration::from_secs(self.host_timeout_secs)
    }

    pub fn expiry_threshold(&self) -> chrono::Duration {
        chrono::Duration::days(self.expiry_threshold_days.clamp(0, MAX_THRESHOLD_DAYS))
    }
}

/// Settings for the initial HTTPS request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            accept_invalid_certs: false,
            user_agent: format!("tls-auditor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for per-version handshake probes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub timeout_secs: u64,
    /// Probes in flight at once against a single host
    pub concurrency: usize,
    pub protocols: Vec<TlsProtocol>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            concurrency: 5,
            protocols: TlsProtocol::ALL.to_vec(),
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Chat webhook settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
        }
    }
}

impl NotifySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub notify: NotifySettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Reject values the auditor cannot run with.
    ///
    /// Notifier credentials are only required when notifications are really sent.
    pub fn validate(&self, require_notifier: bool) -> Result<(), ConfigError> {
        if self.audit.parallel == 0 {
            return Err(invalid("audit.parallel", "must be at least 1"));
        }
        if self.audit.host_timeout_secs == 0 {
            return Err(invalid("audit.host_timeout_secs", "must be at least 1"));
        }
        if !(0..=MAX_THRESHOLD_DAYS).contains(&self.audit.expiry_threshold_days) {
            return Err(invalid(
                "audit.expiry_threshold_days",
                "must be between 0 and 36500",
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs", "must be at least 1"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(invalid("probe.timeout_secs", "must be at least 1"));
        }
        if self.probe.concurrency == 0 {
            return Err(invalid("probe.concurrency", "must be at least 1"));
        }
        if self.probe.protocols.is_empty() {
            return Err(invalid("probe.protocols", "must name at least one protocol"));
        }

        if require_notifier {
            if is_blank(&self.notify.bot_token) {
                return Err(ConfigError::MissingRequired {
                    key: "notify.bot_token".to_string(),
                });
            }
            if is_blank(&self.notify.chat_id) {
                return Err(ConfigError::MissingRequired {
                    key: "notify.chat_id".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.audit.expiry_threshold_days, 7);
        assert_eq!(settings.audit.port, 443);
        assert_eq!(settings.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(settings.probe.timeout(), Duration::from_secs(5));
        assert_eq!(settings.probe.concurrency, 5);
        assert_eq!(settings.probe.protocols, TlsProtocol::ALL.to_vec());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [audit]
            expiry_threshold_days = 14

            [probe]
            protocols = ["TLS1.0", "TLS1.3"]

            [notify]
            bot_token = "123:abc"
            chat_id = "-100"
            "#,
        )
        .unwrap();

        assert_eq!(settings.audit.expiry_threshold_days, 14);
        assert_eq!(settings.audit.parallel, 4);
        assert_eq!(
            settings.probe.protocols,
            vec![TlsProtocol::Tls10, TlsProtocol::Tls13]
        );
        assert_eq!(settings.notify.api_base, "https://api.telegram.org");
        assert!(settings.validate(true).is_ok());
    }

    #[test]
    fn test_unknown_protocol_is_a_parse_error() {
        let result = Settings::from_toml("[probe]\nprotocols = [\"TLS2.0\"]\n");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_validate_requires_credentials_only_when_notifying() {
        let settings = Settings::default();
        assert!(settings.validate(false).is_ok());
        assert!(matches!(
            settings.validate(true),
            Err(ConfigError::MissingRequired { key }) if key == "notify.bot_token"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_protocol_list() {
        let mut settings = Settings::default();
        settings.probe.protocols.clear();
        assert!(matches!(
            settings.validate(false),
            Err(ConfigError::InvalidValue { key, .. }) if key == "probe.protocols"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load_from_file("/nonexistent/tls-auditor.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
