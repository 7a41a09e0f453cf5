use super::common::*;
use super::component::{Component, ComponentModel};
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// `providerType` of client registration policy components
pub const CLIENT_REGISTRATION_POLICY_PROVIDER_TYPE: &str =
    "org.keycloak.services.clientregistration.policy.ClientRegistrationPolicy";

/// Policy implementation a client registration policy configures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderId {
    TrustedHosts,
    AllowedProtocolMappers,
    AllowedClientTemplates,
    ConsentRequired,
    Scope,
    MaxClients,
    /// Provider registered on the server but unknown to this crate
    Other(String),
}

impl ProviderId {
    pub const VALID_VALUES: [&'static str; 6] = [
        "trusted-hosts",
        "allowed-protocol-mappers",
        "allowed-client-templates",
        "consent-required",
        "scope",
        "max-clients",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::TrustedHosts => "trusted-hosts",
            ProviderId::AllowedProtocolMappers => "allowed-protocol-mappers",
            ProviderId::AllowedClientTemplates => "allowed-client-templates",
            ProviderId::ConsentRequired => "consent-required",
            ProviderId::Scope => "scope",
            ProviderId::MaxClients => "max-clients",
            ProviderId::Other(s) => s,
        }
    }
}

impl From<String> for ProviderId {
    fn from(value: String) -> Self {
        match value.as_str() {
            "trusted-hosts" => ProviderId::TrustedHosts,
            "allowed-protocol-mappers" => ProviderId::AllowedProtocolMappers,
            "allowed-client-templates" => ProviderId::AllowedClientTemplates,
            "consent-required" => ProviderId::ConsentRequired,
            "scope" => ProviderId::Scope,
            "max-clients" => ProviderId::MaxClients,
            _ => ProviderId::Other(value),
        }
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        match value {
            ProviderId::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Strict parsing for declarative input; unknown providers are rejected
impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ProviderId::from(s.to_string()) {
            ProviderId::Other(_) => Err(DomainError::Validation {
                field: "provider_id".to_string(),
                message: format!(
                    "expected provider_id to be one of {:?}, got {s}",
                    Self::VALID_VALUES
                ),
            }),
            known => Ok(known),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of client registration request a policy applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubType {
    Anonymous,
    Authenticated,
    Other(String),
}

impl SubType {
    pub const VALID_VALUES: [&'static str; 2] = ["anonymous", "authenticated"];

    pub fn as_str(&self) -> &str {
        match self {
            SubType::Anonymous => "anonymous",
            SubType::Authenticated => "authenticated",
            SubType::Other(s) => s,
        }
    }
}

impl From<String> for SubType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "anonymous" => SubType::Anonymous,
            "authenticated" => SubType::Authenticated,
            _ => SubType::Other(value),
        }
    }
}

impl From<SubType> for String {
    fn from(value: SubType) -> Self {
        match value {
            SubType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for SubType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match SubType::from(s.to_string()) {
            SubType::Other(_) => Err(DomainError::Validation {
                field: "sub_type".to_string(),
                message: format!(
                    "expected sub_type to be one of {:?}, got {s}",
                    Self::VALID_VALUES
                ),
            }),
            known => Ok(known),
        }
    }
}

impl std::fmt::Display for SubType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain entity representing a realm client registration policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealmClientRegistrationPolicy {
    /// Assigned by the server on creation
    pub id: Option<EntityId>,
    pub name: String,
    pub realm_id: String,
    pub provider_id: ProviderId,
    pub sub_type: SubType,
    pub config: ConfigValues,
}

impl RealmClientRegistrationPolicy {
    pub fn new(
        realm_id: impl Into<String>,
        name: impl Into<String>,
        provider_id: ProviderId,
        sub_type: SubType,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            realm_id: realm_id.into(),
            provider_id,
            sub_type,
            config: ConfigValues::new(),
        }
    }

    pub fn with_config(mut self, config: ConfigValues) -> Self {
        self.config = config;
        self
    }

    /// Identifier required by operations addressing an existing policy
    pub fn require_id(&self) -> DomainResult<&EntityId> {
        self.id.as_ref().ok_or_else(|| DomainError::Validation {
            field: "id".to_string(),
            message: "Policy ID is required for this operation".to_string(),
        })
    }

    /// Convert a component fetched by id, rejecting other component kinds
    pub fn from_fetched_component(
        component: Component,
        realm_id: &str,
        requested_id: &str,
    ) -> DomainResult<Self> {
        if !component.is_a::<Self>() {
            return Err(DomainError::NotClientRegistrationPolicy {
                id: requested_id.to_string(),
            });
        }
        Ok(Self::from_component(component, realm_id))
    }

    /// Short description used when several policies share a name
    pub fn describe(&self) -> String {
        format!(
            "{} (providerId={}, subType={})",
            self.id.as_ref().map(EntityId::as_str).unwrap_or_default(),
            self.provider_id,
            self.sub_type
        )
    }
}

impl ComponentModel for RealmClientRegistrationPolicy {
    const PROVIDER_TYPE: &'static str = CLIENT_REGISTRATION_POLICY_PROVIDER_TYPE;

    fn to_component(&self) -> Component {
        Component {
            id: self.id.as_ref().map(|id| id.to_string()),
            name: self.name.clone(),
            parent_id: Some(self.realm_id.clone()),
            provider_id: self.provider_id.to_string(),
            provider_type: Self::PROVIDER_TYPE.to_string(),
            sub_type: Some(self.sub_type.to_string()),
            config: self.config.clone(),
        }
    }

    fn from_component(component: Component, realm_id: &str) -> Self {
        Self {
            id: component.id.map(EntityId::from),
            name: component.name,
            realm_id: realm_id.to_string(),
            provider_id: ProviderId::from(component.provider_id),
            sub_type: SubType::from(component.sub_type.unwrap_or_default()),
            config: component.config,
        }
    }
}

/// Client-side filter emulating a lookup by name.
///
/// The admin API has no name query for components and names are not unique
/// within a realm, so ambiguous matches are reported instead of guessed.
#[derive(Debug, Clone, Default)]
pub struct PolicyFilter {
    pub name: String,
    pub provider_id: Option<ProviderId>,
    pub sub_type: Option<SubType>,
}

impl PolicyFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_provider_id(mut self, provider_id: ProviderId) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn with_sub_type(mut self, sub_type: SubType) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    pub fn matches(&self, policy: &RealmClientRegistrationPolicy) -> bool {
        policy.name == self.name
            && self
                .provider_id
                .as_ref()
                .map_or(true, |p| *p == policy.provider_id)
            && self
                .sub_type
                .as_ref()
                .map_or(true, |s| *s == policy.sub_type)
    }

    /// Pick the single policy matching this filter
    pub fn select(
        &self,
        realm_id: &str,
        policies: Vec<RealmClientRegistrationPolicy>,
    ) -> DomainResult<RealmClientRegistrationPolicy> {
        let mut matching: Vec<_> = policies.into_iter().filter(|p| self.matches(p)).collect();

        match matching.len() {
            0 => Err(DomainError::PolicyNotFound {
                name: self.name.clone(),
                realm: realm_id.to_string(),
            }),
            1 => Ok(matching.remove(0)),
            _ => Err(DomainError::MultiplePoliciesFound {
                name: self.name.clone(),
                candidates: matching.iter().map(|p| p.describe()).collect(),
            }),
        }
    }
}
