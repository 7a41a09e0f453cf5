use async_trait::async_trait;
use keycloak::types::ComponentRepresentation;
use keycloak::{KeycloakAdmin, KeycloakError, KeycloakTokenSupplier};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::application::ports::{ClientRegistrationPolicyRepository, RequestContext};
use crate::domain::{entities::*, errors::*};

/// Keycloak REST API adapter implementing the policy repository port.
///
/// Policies live in the realm's generic component collection, so every read
/// checks the component's provider type before converting it.
pub struct KeycloakRestAdapter<TS: KeycloakTokenSupplier> {
    admin: Arc<KeycloakAdmin<TS>>,
}

impl<TS: KeycloakTokenSupplier + Send + Sync> KeycloakRestAdapter<TS> {
    pub fn new(admin: KeycloakAdmin<TS>) -> Self {
        Self {
            admin: Arc::new(admin),
        }
    }

    pub fn from_shared(admin: Arc<KeycloakAdmin<TS>>) -> Self {
        Self { admin }
    }

    fn convert_component_to_keycloak(component: Component) -> ComponentRepresentation {
        let mut keycloak_component = ComponentRepresentation::default();

        keycloak_component.id = component.id.map(Into::into);
        keycloak_component.name = Some(component.name.into());
        keycloak_component.parent_id = component.parent_id.map(Into::into);
        keycloak_component.provider_id = Some(component.provider_id.into());
        keycloak_component.provider_type = Some(component.provider_type.into());
        keycloak_component.sub_type = component.sub_type.map(Into::into);
        keycloak_component.config = Some(
            component
                .config
                .into_iter()
                .map(|(key, values)| (key, values.into_iter().map(Into::into).collect()))
                .collect(),
        );

        keycloak_component
    }

    fn convert_component_from_keycloak(representation: ComponentRepresentation) -> Component {
        Component {
            id: representation.id.map(|id| id.to_string()),
            name: representation
                .name
                .map(|n| n.to_string())
                .unwrap_or_default(),
            parent_id: representation.parent_id.map(|p| p.to_string()),
            provider_id: representation
                .provider_id
                .map(|p| p.to_string())
                .unwrap_or_default(),
            provider_type: representation
                .provider_type
                .map(|p| p.to_string())
                .unwrap_or_default(),
            sub_type: representation.sub_type.map(|s| s.to_string()),
            config: representation
                .config
                .map(|config| {
                    config
                        .iter()
                        .map(|(key, values)| {
                            (
                                key.to_string(),
                                values.iter().map(|v| v.to_string()).collect(),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Translate a client failure into the transport error of the request that caused it
pub(crate) fn keycloak_error(method: &'static str, path: String, err: KeycloakError) -> TransportError {
    match err {
        KeycloakError::HttpFailure { status, text, .. } => TransportError::Status {
            method,
            path,
            status,
            body: text,
        },
        other => TransportError::Network {
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl<TS: KeycloakTokenSupplier + Send + Sync> ClientRegistrationPolicyRepository
    for KeycloakRestAdapter<TS>
{
    #[instrument(skip(self, ctx, policy), fields(realm = %policy.realm_id, name = %policy.name))]
    async fn create_policy(
        &self,
        ctx: &RequestContext,
        policy: &mut RealmClientRegistrationPolicy,
    ) -> DomainResult<()> {
        let realm = policy.realm_id.clone();
        let path = format!("/realms/{realm}/components");
        let representation = Self::convert_component_to_keycloak(policy.to_component());

        let response = ctx
            .run(async {
                self.admin
                    .realm_components_post(&realm, representation)
                    .await
                    .map_err(|e| keycloak_error("POST", path.clone(), e))
            })
            .await?;

        let id = response
            .to_id()
            .ok_or_else(|| DomainError::MissingLocation { path: path.clone() })?
            .to_string();
        info!("Created client registration policy '{}' with ID '{}'", policy.name, id);

        policy.id = Some(EntityId::from_string(id));
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm, id = %id))]
    async fn find_policy_by_id(
        &self,
        ctx: &RequestContext,
        realm: &str,
        id: &str,
    ) -> DomainResult<RealmClientRegistrationPolicy> {
        let representation = ctx
            .run(async {
                self.admin
                    .realm_components_with_id_get(realm, id)
                    .await
                    .map_err(|e| keycloak_error("GET", format!("/realms/{realm}/components/{id}"), e))
            })
            .await?;

        let component = Self::convert_component_from_keycloak(representation);
        debug!("Fetched component of type '{}'", component.provider_type);

        RealmClientRegistrationPolicy::from_fetched_component(component, realm, id)
    }

    #[instrument(skip(self, ctx, policy), fields(realm = %policy.realm_id, name = %policy.name))]
    async fn update_policy(
        &self,
        ctx: &RequestContext,
        policy: &RealmClientRegistrationPolicy,
    ) -> DomainResult<()> {
        let id = policy.require_id()?.as_str();
        let realm = policy.realm_id.as_str();
        let representation = Self::convert_component_to_keycloak(policy.to_component());

        ctx.run(async {
            self.admin
                .realm_components_with_id_put(realm, id, representation)
                .await
                .map_err(|e| keycloak_error("PUT", format!("/realms/{realm}/components/{id}"), e))
        })
        .await?;

        info!("Updated client registration policy '{}'", id);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm, id = %id))]
    async fn delete_policy(&self, ctx: &RequestContext, realm: &str, id: &str) -> DomainResult<()> {
        ctx.run(async {
            self.admin
                .realm_components_with_id_delete(realm, id)
                .await
                .map_err(|e| keycloak_error("DELETE", format!("/realms/{realm}/components/{id}"), e))
        })
        .await?;

        info!("Deleted client registration policy '{}'", id);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(realm = %realm))]
    async fn list_policies(
        &self,
        ctx: &RequestContext,
        realm: &str,
    ) -> DomainResult<Vec<RealmClientRegistrationPolicy>> {
        let representations = ctx
            .run(async {
                self.admin
                    .realm_components_get(
                        realm,
                        None,
                        None,
                        Some(RealmClientRegistrationPolicy::PROVIDER_TYPE.to_string()),
                    )
                    .await
                    .map_err(|e| keycloak_error("GET", format!("/realms/{realm}/components"), e))
            })
            .await?;

        let policies: Vec<_> = representations
            .into_iter()
            .map(Self::convert_component_from_keycloak)
            .map(|c| RealmClientRegistrationPolicy::from_component(c, realm))
            .collect();

        debug!("Found {} client registration policies", policies.len());
        Ok(policies)
    }
}
