use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::booking::domain::Pet;
use crate::workflows::booking::eligibility::{RuleTableError, RuleTables};

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the booking service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub rules: RulesConfig,
    pub pets: PetsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rules_path = optional_path("BOARDING_RULES_PATH");
        let pets_path = optional_path("BOARDING_PETS_PATH");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                show_targets: environment == AppEnvironment::Development,
            },
            rules: RulesConfig { path: rules_path },
            pets: PetsConfig { path: pets_path },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_targets: bool,
}

/// Where the breed and weight rule tables come from.
#[derive(Debug, Clone, Default)]
pub struct RulesConfig {
    pub path: Option<PathBuf>,
}

impl RulesConfig {
    /// Load the tables once; without a path the published house policy applies.
    pub fn load_tables(&self) -> Result<RuleTables, ConfigError> {
        match &self.path {
            Some(path) => RuleTables::from_path(path).map_err(ConfigError::Rules),
            None => Ok(RuleTables::default()),
        }
    }
}

/// Registered pets the standalone service starts with.
#[derive(Debug, Clone, Default)]
pub struct PetsConfig {
    pub path: Option<PathBuf>,
}

impl PetsConfig {
    /// Read the JSON array of pets on file; no path means an empty roster.
    pub fn load_roster(&self) -> Result<Vec<Pet>, ConfigError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PetsRead {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::PetsParse {
            path: path.clone(),
            source,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Rules(RuleTableError),
    PetsRead { path: PathBuf, source: std::io::Error },
    PetsParse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Rules(err) => write!(f, "BOARDING_RULES_PATH rejected: {err}"),
            ConfigError::PetsRead { path, source } => {
                write!(f, "BOARDING_PETS_PATH {path:?} could not be read: {source}")
            }
            ConfigError::PetsParse { path, source } => {
                write!(f, "BOARDING_PETS_PATH {path:?} is not a JSON list of pets: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Rules(err) => Some(err),
            ConfigError::PetsRead { source, .. } => Some(source),
            ConfigError::PetsParse { source, .. } => Some(source),
        }
    }
}
