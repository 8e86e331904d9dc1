use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::wizard::DEFAULT_MAX_SESSIONS;

/// Deployment stage the service runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the YenQuit service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub wizard: WizardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("YENQUIT_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("YENQUIT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("YENQUIT_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("YENQUIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_sessions = match env::var("YENQUIT_WIZARD_MAX_SESSIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or(ConfigError::InvalidWizardCapacity)?,
            Err(_) => DEFAULT_MAX_SESSIONS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            wizard: WizardConfig { max_sessions },
        })
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Limits for the in-process onboarding wizard store.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Wizard sessions held before the least recently used one is dropped.
    pub max_sessions: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidWizardCapacity,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "YENQUIT_PORT must be a valid u16"),
            ConfigError::InvalidWizardCapacity => {
                write!(f, "YENQUIT_WIZARD_MAX_SESSIONS must be a positive integer")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "YENQUIT_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidWizardCapacity => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("YENQUIT_ENV");
        env::remove_var("YENQUIT_HOST");
        env::remove_var("YENQUIT_PORT");
        env::remove_var("YENQUIT_LOG_LEVEL");
        env::remove_var("YENQUIT_WIZARD_MAX_SESSIONS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.wizard.max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn wizard_capacity_reads_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("YENQUIT_WIZARD_MAX_SESSIONS", " 250 ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.wizard.max_sessions, 250);

        env::set_var("YENQUIT_WIZARD_MAX_SESSIONS", "0");
        let err = AppConfig::load().expect_err("zero sessions is unusable");
        assert!(matches!(err, ConfigError::InvalidWizardCapacity));
        reset_env();
    }

    #[test]
    fn production_aliases_are_recognized() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("YENQUIT_ENV", " Prod ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("YENQUIT_PORT", "not-a-port");
        let err = AppConfig::load().expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("YENQUIT_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
