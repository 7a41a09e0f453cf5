use async_trait::async_trait;
use keycloak::{KeycloakAdmin, KeycloakAdminToken, KeycloakError, KeycloakTokenSupplier};
use tracing::{info, instrument};

use super::keycloak_rest::{keycloak_error, KeycloakRestAdapter};
use crate::application::ports::{AdminCredentials, ConfigurationPort, HttpConfig, KeycloakConfig};
use crate::domain::errors::*;

/// Token supplier for the admin client
#[derive(Clone)]
pub enum AdminToken {
    /// Pre-issued bearer token
    Static(String),
    /// Token acquired through the password grant
    Acquired(KeycloakAdminToken),
}

#[async_trait]
impl KeycloakTokenSupplier for AdminToken {
    async fn get(&self, url: &str) -> Result<String, KeycloakError> {
        match self {
            AdminToken::Static(token) => Ok(token.clone()),
            AdminToken::Acquired(token) => token.get(url).await,
        }
    }
}

/// HTTP client shared by token acquisition and admin calls
pub fn build_http_client(keycloak: &KeycloakConfig, http: &HttpConfig) -> DomainResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(http.get_timeout())
        .connect_timeout(http.get_connect_timeout())
        .user_agent(http.user_agent.as_str())
        .danger_accept_invalid_certs(!keycloak.verify_ssl)
        .build()
        .map_err(TransportError::from)?;

    Ok(client)
}

/// Obtain a token for the configured credentials
#[instrument(skip_all, fields(url = %keycloak.base_url()))]
pub async fn acquire_token(keycloak: &KeycloakConfig, client: &reqwest::Client) -> DomainResult<AdminToken> {
    match &keycloak.credentials {
        Some(AdminCredentials::AccessToken(token)) => Ok(AdminToken::Static(token.clone())),
        Some(AdminCredentials::Password {
            username,
            password,
            realm,
            client_id,
        }) => {
            let token = KeycloakAdminToken::acquire_custom_realm(
                keycloak.base_url(),
                username,
                password,
                realm,
                client_id,
                "password",
                client,
            )
            .await
            .map_err(|e| {
                keycloak_error(
                    "POST",
                    format!("/realms/{realm}/protocol/openid-connect/token"),
                    e,
                )
            })?;

            info!("Acquired admin token for '{}' in realm '{}'", username, realm);
            Ok(AdminToken::Acquired(token))
        }
        None => Err(ConfigError::MissingRequired {
            key: "KEYCLOAK_ACCESS_TOKEN or KEYCLOAK_USERNAME/KEYCLOAK_PASSWORD".to_string(),
        }
        .into()),
    }
}

/// Build the admin client described by the configuration
pub async fn connect_admin(config: &dyn ConfigurationPort) -> DomainResult<KeycloakAdmin<AdminToken>> {
    config.validate()?;

    let keycloak = config.get_keycloak_config();
    let client = build_http_client(keycloak, config.get_http_config())?;
    let token = acquire_token(keycloak, &client).await?;

    Ok(KeycloakAdmin::new(keycloak.base_url(), token, client))
}

/// Policy repository backed by the admin client described by the configuration
pub async fn connect_repository(
    config: &dyn ConfigurationPort,
) -> DomainResult<KeycloakRestAdapter<AdminToken>> {
    Ok(KeycloakRestAdapter::new(connect_admin(config).await?))
}
