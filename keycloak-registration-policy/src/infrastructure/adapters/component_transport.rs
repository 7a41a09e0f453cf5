use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::application::ports::{
    id_from_location, ClientRegistrationPolicyRepository, KeycloakTransport, RequestContext,
};
use crate::domain::{entities::*, errors::*};

/// Policy repository over any [`KeycloakTransport`].
///
/// Talks to the realm's generic component collection in raw JSON. Useful when
/// the caller already owns an HTTP stack and only needs the policy mapping.
pub struct ComponentTransportAdapter {
    transport: Arc<dyn KeycloakTransport>,
}

impl ComponentTransportAdapter {
    pub fn new(transport: Arc<dyn KeycloakTransport>) -> Self {
        Self { transport }
    }

    fn components_path(realm: &str) -> String {
        format!("/realms/{realm}/components")
    }

    fn component_path(realm: &str, id: &str) -> String {
        format!("/realms/{realm}/components/{id}")
    }

    fn encode_component<T: ComponentModel>(model: &T) -> DomainResult<Value> {
        serde_json::to_value(model.to_component()).map_err(|e| {
            TransportError::Encode {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn decode<T: DeserializeOwned>(path: &str, value: Value) -> DomainResult<T> {
        serde_json::from_value(value).map_err(|e| {
            TransportError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ClientRegistrationPolicyRepository for ComponentTransportAdapter {
    #[instrument(skip(self, ctx, policy), fields(realm = %policy.realm_id, name = %policy.name))]
    async fn create_policy(
        &self,
        ctx: &RequestContext,
        policy: &mut RealmClientRegistrationPolicy,
    ) -> DomainResult<()> {
        let path = Self::components_path(&policy.realm_id);
        let body = Self::encode_component(&*policy)?;

        let response = ctx.run(self.transport.post(&path, body)).await?;

        let location = response
            .location
            .ok_or_else(|| DomainError::MissingLocation { path: path.clone() })?;
        let id = id_from_location(&location);
        policy.id = Some(EntityId::from(id));

        info!("Created client registration policy '{}' with ID '{}'", policy.name, id);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm, id = %id))]
    async fn find_policy_by_id(
        &self,
        ctx: &RequestContext,
        realm: &str,
        id: &str,
    ) -> DomainResult<RealmClientRegistrationPolicy> {
        let path = Self::component_path(realm, id);
        let value = ctx.run(self.transport.get(&path, &[])).await?;
        let component: Component = Self::decode(&path, value)?;

        RealmClientRegistrationPolicy::from_fetched_component(component, realm, id)
    }

    #[instrument(skip(self, ctx, policy), fields(realm = %policy.realm_id, name = %policy.name))]
    async fn update_policy(
        &self,
        ctx: &RequestContext,
        policy: &RealmClientRegistrationPolicy,
    ) -> DomainResult<()> {
        let id = policy.require_id()?;
        let path = Self::component_path(&policy.realm_id, id.as_str());
        let body = Self::encode_component(policy)?;

        ctx.run(self.transport.put(&path, body)).await?;

        info!("Updated client registration policy '{}'", id);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm, id = %id))]
    async fn delete_policy(&self, ctx: &RequestContext, realm: &str, id: &str) -> DomainResult<()> {
        let path = Self::component_path(realm, id);

        ctx.run(self.transport.delete(&path, &[])).await?;

        info!("Deleted client registration policy '{}'", id);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm))]
    async fn list_policies(
        &self,
        ctx: &RequestContext,
        realm: &str,
    ) -> DomainResult<Vec<RealmClientRegistrationPolicy>> {
        let path = Self::components_path(realm);
        let query = [("type", RealmClientRegistrationPolicy::PROVIDER_TYPE)];

        let value = ctx.run(self.transport.get(&path, &query)).await?;
        let components: Vec<Component> = Self::decode(&path, value)?;

        let policies: Vec<_> = components
            .into_iter()
            .map(|c| RealmClientRegistrationPolicy::from_component(c, realm))
            .collect();

        debug!("Found {} client registration policies", policies.len());
        Ok(policies)
    }
}
