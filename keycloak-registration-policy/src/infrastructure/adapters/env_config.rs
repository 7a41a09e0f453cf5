use crate::application::ports::{
    AppConfig, ConfigurationPort, Environment, HttpConfig, KeycloakConfig, LoggingConfig,
};
use crate::domain::errors::DomainResult;

/// [`ConfigurationPort`] over configuration read once from process variables
#[derive(Debug, Clone)]
pub struct EnvConfigurationAdapter(AppConfig);

impl EnvConfigurationAdapter {
    /// Read and validate the process environment
    pub fn load() -> DomainResult<Self> {
        AppConfig::from_env().map(Self)
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self(config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.0
    }
}

impl ConfigurationPort for EnvConfigurationAdapter {
    fn get_keycloak_config(&self) -> &KeycloakConfig {
        &self.0.keycloak
    }

    fn get_http_config(&self) -> &HttpConfig {
        &self.0.http
    }

    fn get_logging_config(&self) -> &LoggingConfig {
        &self.0.logging
    }

    fn environment(&self) -> Environment {
        self.0.environment
    }

    fn validate(&self) -> DomainResult<()> {
        self.0.validate()
    }
}
