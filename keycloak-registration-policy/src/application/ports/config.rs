use crate::domain::errors::{ConfigError, DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Configuration port for accessing application configuration
pub trait ConfigurationPort: Send + Sync {
    fn get_keycloak_config(&self) -> &KeycloakConfig;

    fn get_http_config(&self) -> &HttpConfig;

    fn get_logging_config(&self) -> &LoggingConfig;

    /// Deployment environment the configuration was loaded for
    fn environment(&self) -> Environment;

    fn validate(&self) -> DomainResult<()>;
}

/// How the admin client obtains its bearer token
#[derive(Clone, PartialEq, Eq)]
pub enum AdminCredentials {
    /// Pre-issued token, sent as is
    AccessToken(String),
    /// Password grant against `realm` through `client_id`
    Password {
        username: String,
        password: String,
        realm: String,
        client_id: String,
    },
}

impl AdminCredentials {
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        AdminCredentials::Password {
            username: username.into(),
            password: password.into(),
            realm: "master".to_string(),
            client_id: "admin-cli".to_string(),
        }
    }
}

// Secrets stay out of logs
impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminCredentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            AdminCredentials::Password {
                username,
                realm,
                client_id,
                ..
            } => f
                .debug_struct("Password")
                .field("username", username)
                .field("realm", realm)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Keycloak server configuration
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Server base URL, without the `/admin` suffix
    pub url: String,
    pub credentials: Option<AdminCredentials>,
    pub verify_ssl: bool,
}

impl KeycloakConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            verify_ssl: true,
        }
    }

    pub fn with_credentials(mut self, credentials: AdminCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_URL".to_string(),
            }
            .into());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_URL".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.credentials.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_ACCESS_TOKEN or KEYCLOAK_USERNAME/KEYCLOAK_PASSWORD".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Base URL handed to the admin client
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: concat!("keycloak-registration-policy/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        for (key, value) in [
            ("HTTP_TIMEOUT_SECONDS", self.timeout_seconds),
            ("HTTP_CONNECT_TIMEOUT_SECONDS", self.connect_timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "Must be greater than 0".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Deployment environment. Picks the log format default and gates
/// settings that are only acceptable outside production.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    /// Log format used when `LOG_FORMAT` is not set
    pub fn default_log_format(&self) -> LogFormat {
        match self {
            Environment::Development => LogFormat::Pretty,
            Environment::Test => LogFormat::Compact,
            Environment::Production => LogFormat::Json,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub keycloak: KeycloakConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.keycloak.validate()?;
        self.http.validate()?;

        if self.is_production() && !self.keycloak.verify_ssl {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_VERIFY_SSL".to_string(),
                message: "TLS verification cannot be disabled in production".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = parse_var(&lookup, "ENVIRONMENT")?.unwrap_or_default();

        let keycloak = KeycloakConfig {
            url: lookup("KEYCLOAK_URL").ok_or_else(|| ConfigError::MissingRequired {
                key: "KEYCLOAK_URL".to_string(),
            })?,
            credentials: credentials_from(&lookup)?,
            verify_ssl: parse_var(&lookup, "KEYCLOAK_VERIFY_SSL")?.unwrap_or(true),
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout_seconds: parse_var(&lookup, "HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.timeout_seconds),
            connect_timeout_seconds: parse_var(&lookup, "HTTP_CONNECT_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.connect_timeout_seconds),
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: parse_var(&lookup, "LOG_LEVEL")?.unwrap_or(LogLevel::Info),
            format: parse_var(&lookup, "LOG_FORMAT")?
                .unwrap_or_else(|| environment.default_log_format()),
        };

        let config = AppConfig {
            environment,
            keycloak,
            http,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

/// A token wins over a username; a username needs a password
fn credentials_from<F>(lookup: &F) -> DomainResult<Option<AdminCredentials>>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(token) = non_empty("KEYCLOAK_ACCESS_TOKEN") {
        return Ok(Some(AdminCredentials::AccessToken(token)));
    }

    let Some(username) = non_empty("KEYCLOAK_USERNAME") else {
        return Ok(None);
    };
    let password = non_empty("KEYCLOAK_PASSWORD").ok_or_else(|| ConfigError::MissingRequired {
        key: "KEYCLOAK_PASSWORD".to_string(),
    })?;

    Ok(Some(AdminCredentials::Password {
        username,
        password,
        realm: non_empty("KEYCLOAK_REALM").unwrap_or_else(|| "master".to_string()),
        client_id: non_empty("KEYCLOAK_CLIENT_ID").unwrap_or_else(|| "admin-cli".to_string()),
    }))
}

fn parse_var<T, F>(lookup: &F, key: &str) -> DomainResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                DomainError::from(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{e} (got '{raw}')"),
                })
            })
        })
        .transpose()
}

macro_rules! lowercase_choice {
    ($ty:ident { $($text:literal $(| $alias:literal)* => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($text $(| $alias)* => Ok($ty::$variant),)+
                    _ => Err(format!(
                        "expected one of {}",
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

lowercase_choice!(Environment {
    "development" | "dev" => Development,
    "test" => Test,
    "production" | "prod" => Production,
});

lowercase_choice!(LogLevel {
    "trace" => Trace,
    "debug" => Debug,
    "info" => Info,
    "warn" => Warn,
    "error" => Error,
});

lowercase_choice!(LogFormat {
    "compact" => Compact,
    "pretty" => Pretty,
    "json" => Json,
});

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
