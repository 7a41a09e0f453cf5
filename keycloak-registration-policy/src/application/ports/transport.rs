use crate::domain::errors::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Outcome of a creation call
#[derive(Debug, Clone, Default)]
pub struct PostResponse {
    pub body: String,
    /// `Location` header pointing at the created resource, if any
    pub location: Option<String>,
}

/// JSON-over-HTTP transport against the Keycloak admin API.
///
/// Paths are relative to the admin base URL, e.g. `/realms/master/components`.
/// Authentication, retries and status translation belong to implementations.
#[async_trait]
pub trait KeycloakTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, TransportError>;

    async fn post(&self, path: &str, body: Value) -> Result<PostResponse, TransportError>;

    async fn put(&self, path: &str, body: Value) -> Result<(), TransportError>;

    async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<(), TransportError>;
}

/// Trailing path segment of a `Location` header, i.e. the new resource id
pub fn id_from_location(location: &str) -> &str {
    let trimmed = location.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
