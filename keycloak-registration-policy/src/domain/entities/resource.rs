use super::common::*;
use super::coercion::{collapse, expand};
use super::policy::*;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Declarative state of a client registration policy.
///
/// Config is single-valued here; `trusted-hosts` holds a comma separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub realm_id: String,
    pub name: String,
    pub provider_id: String,
    pub sub_type: String,
    #[serde(default)]
    pub config: FlatConfig,
}

impl PolicyResourceData {
    pub fn new(
        realm_id: impl Into<String>,
        name: impl Into<String>,
        provider_id: impl Into<String>,
        sub_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            realm_id: realm_id.into(),
            name: name.into(),
            provider_id: provider_id.into(),
            sub_type: sub_type.into(),
            config: FlatConfig::new(),
        }
    }

    pub fn with_config_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Validate and convert into the domain record
    pub fn to_policy(&self) -> DomainResult<RealmClientRegistrationPolicy> {
        let provider_id: ProviderId = self.provider_id.parse()?;
        let sub_type: SubType = self.sub_type.parse()?;

        let mut policy =
            RealmClientRegistrationPolicy::new(&self.realm_id, &self.name, provider_id, sub_type)
                .with_config(expand(&self.config));
        policy.id = self
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(EntityId::from);
        Ok(policy)
    }

    pub fn from_policy(policy: &RealmClientRegistrationPolicy) -> Self {
        Self {
            id: policy.id.as_ref().map(|id| id.to_string()),
            realm_id: policy.realm_id.clone(),
            name: policy.name.clone(),
            provider_id: policy.provider_id.to_string(),
            sub_type: policy.sub_type.to_string(),
            config: collapse(&policy.config),
        }
    }

    /// Realm, provider and sub type cannot change in place
    pub fn requires_replacement(&self, planned: &PolicyResourceData) -> bool {
        self.realm_id != planned.realm_id
            || self.provider_id != planned.provider_id
            || self.sub_type != planned.sub_type
    }
}

/// Composite identifier accepted on import: `<realmId>/<policyId>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub realm_id: String,
    pub policy_id: String,
}

impl ImportId {
    /// Parse `{realmId}/{policyId}`; both segments must be non-empty
    pub fn parse(id: &str) -> DomainResult<Self> {
        match id.split('/').collect::<Vec<_>>().as_slice() {
            [realm_id, policy_id] if !realm_id.is_empty() && !policy_id.is_empty() => Ok(Self {
                realm_id: realm_id.to_string(),
                policy_id: policy_id.to_string(),
            }),
            _ => Err(DomainError::InvalidImportId { id: id.to_string() }),
        }
    }

    /// Partial state from which a read restores the full resource
    pub fn into_resource_data(self) -> PolicyResourceData {
        PolicyResourceData {
            id: Some(self.policy_id),
            realm_id: self.realm_id,
            ..Default::default()
        }
    }
}

impl std::str::FromStr for ImportId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ImportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.realm_id, self.policy_id)
    }
}

/// Read-only query resolving a policy by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyLookup {
    pub realm_id: String,
    pub name: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
}

impl PolicyLookup {
    pub fn new(realm_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            realm_id: realm_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Empty filters count as absent; provided ones match exactly
    pub fn to_filter(&self) -> PolicyFilter {
        PolicyFilter {
            name: self.name.clone(),
            provider_id: self
                .provider_id
                .clone()
                .filter(|p| !p.is_empty())
                .map(ProviderId::from),
            sub_type: self
                .sub_type
                .clone()
                .filter(|s| !s.is_empty())
                .map(SubType::from),
        }
    }
}
