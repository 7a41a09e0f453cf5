#![allow(dead_code)]

use async_trait::async_trait;
use keycloak_registration_policy::{
    application::ports::transport::{KeycloakTransport, PostResponse},
    domain::{entities::*, errors::TransportError},
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const LDAP_PROVIDER_TYPE: &str = "org.keycloak.storage.UserStorageProvider";

/// A request seen by the mock transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// In-memory stand-in for the admin components endpoints
pub struct MockKeycloakTransport {
    pub components: Arc<Mutex<HashMap<String, Vec<Component>>>>, // realm -> components
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    pub should_fail: Arc<Mutex<bool>>, // For testing error scenarios
    pub hang: Arc<Mutex<bool>>,        // For testing cancellation
    pub omit_location: Arc<Mutex<bool>>,
}

impl MockKeycloakTransport {
    pub fn new() -> Self {
        Self {
            components: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            hang: Arc::new(Mutex::new(false)),
            omit_location: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_hang(&self, hang: bool) {
        *self.hang.lock().unwrap() = hang;
    }

    pub fn set_omit_location(&self, omit: bool) {
        *self.omit_location.lock().unwrap() = omit;
    }

    /// Store a component directly, returning its id
    pub fn seed(&self, realm: &str, mut component: Component) -> String {
        let id = component
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        component.id = Some(id.clone());
        component.parent_id = Some(realm.to_string());
        self.components
            .lock()
            .unwrap()
            .entry(realm.to_string())
            .or_default()
            .push(component);
        id
    }

    pub fn seed_policy(
        &self,
        realm: &str,
        name: &str,
        provider_id: &str,
        sub_type: &str,
    ) -> String {
        self.seed(
            realm,
            Component {
                name: name.to_string(),
                provider_id: provider_id.to_string(),
                provider_type: CLIENT_REGISTRATION_POLICY_PROVIDER_TYPE.to_string(),
                sub_type: Some(sub_type.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn stored(&self, realm: &str, id: &str) -> Option<Component> {
        self.components
            .lock()
            .unwrap()
            .get(realm)?
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
    }

    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str, query: &[(&str, &str)], body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        });
    }

    async fn check_should_fail(&self, method: &'static str, path: &str) -> Result<(), TransportError> {
        let hang = *self.hang.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }
        let should_fail = *self.should_fail.lock().unwrap();
        if should_fail {
            return Err(TransportError::Status {
                method,
                path: path.to_string(),
                status: 500,
                body: "Mock failure enabled".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(method: &'static str, path: &str) -> TransportError {
        TransportError::Status {
            method,
            path: path.to_string(),
            status: 404,
            body: r#"{"error":"Could not find component"}"#.to_string(),
        }
    }

    /// `/realms/{realm}/components[/{id}]`
    fn parse_path(path: &str) -> Option<(String, Option<String>)> {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["realms", realm, "components"] => Some((realm.to_string(), None)),
            ["realms", realm, "components", id] => Some((realm.to_string(), Some(id.to_string()))),
            _ => None,
        }
    }
}

#[async_trait]
impl KeycloakTransport for MockKeycloakTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        self.record("GET", path, query, None);
        self.check_should_fail("GET", path).await?;

        let (realm, id) = Self::parse_path(path).ok_or_else(|| Self::not_found("GET", path))?;
        let components = self.components.lock().unwrap();
        let realm_components = components.get(&realm).cloned().unwrap_or_default();

        match id {
            Some(id) => {
                let component = realm_components
                    .into_iter()
                    .find(|c| c.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| Self::not_found("GET", path))?;
                Ok(serde_json::to_value(component).unwrap())
            }
            None => {
                let type_filter = query.iter().find(|(k, _)| *k == "type").map(|(_, v)| *v);
                let listed: Vec<Component> = realm_components
                    .into_iter()
                    .filter(|c| type_filter.map_or(true, |t| c.provider_type == t))
                    .collect();
                Ok(serde_json::to_value(listed).unwrap())
            }
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<PostResponse, TransportError> {
        self.record("POST", path, &[], Some(body.clone()));
        self.check_should_fail("POST", path).await?;

        let (realm, _) = Self::parse_path(path).ok_or_else(|| Self::not_found("POST", path))?;
        let component: Component = serde_json::from_value(body).map_err(|e| TransportError::Status {
            method: "POST",
            path: path.to_string(),
            status: 400,
            body: e.to_string(),
        })?;

        let id = self.seed(&realm, Component { id: None, ..component });

        let location = if *self.omit_location.lock().unwrap() {
            None
        } else {
            Some(format!(
                "http://localhost:8080/admin/realms/{realm}/components/{id}"
            ))
        };

        Ok(PostResponse {
            body: String::new(),
            location,
        })
    }

    async fn put(&self, path: &str, body: Value) -> Result<(), TransportError> {
        self.record("PUT", path, &[], Some(body.clone()));
        self.check_should_fail("PUT", path).await?;

        let (realm, id) = Self::parse_path(path).ok_or_else(|| Self::not_found("PUT", path))?;
        let id = id.ok_or_else(|| Self::not_found("PUT", path))?;
        let mut replacement: Component =
            serde_json::from_value(body).map_err(|e| TransportError::Status {
                method: "PUT",
                path: path.to_string(),
                status: 400,
                body: e.to_string(),
            })?;
        replacement.id = Some(id.clone());

        let mut components = self.components.lock().unwrap();
        let existing = components
            .get_mut(&realm)
            .and_then(|list| list.iter_mut().find(|c| c.id.as_deref() == Some(id.as_str())))
            .ok_or_else(|| Self::not_found("PUT", path))?;
        *existing = replacement;
        Ok(())
    }

    async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<(), TransportError> {
        self.record("DELETE", path, query, None);
        self.check_should_fail("DELETE", path).await?;

        let (realm, id) = Self::parse_path(path).ok_or_else(|| Self::not_found("DELETE", path))?;
        let id = id.ok_or_else(|| Self::not_found("DELETE", path))?;

        let mut components = self.components.lock().unwrap();
        let list = components
            .get_mut(&realm)
            .ok_or_else(|| Self::not_found("DELETE", path))?;
        let before = list.len();
        list.retain(|c| c.id.as_deref() != Some(id.as_str()));
        if list.len() == before {
            return Err(Self::not_found("DELETE", path));
        }
        Ok(())
    }
}
