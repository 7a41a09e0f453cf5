use crate::{
    application::ports::*,
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Declarative binding for client registration policies.
///
/// Works on [`PolicyResourceData`], the single-valued state form, and converts
/// to and from the domain record at its boundary.
#[derive(Clone)]
pub struct PolicyManagementService {
    repository: Arc<dyn ClientRegistrationPolicyRepository>,
}

impl PolicyManagementService {
    pub fn new(repository: Arc<dyn ClientRegistrationPolicyRepository>) -> Self {
        Self { repository }
    }

    /// Create the policy, then read it back so the state reflects the server
    #[instrument(skip(self, ctx, data), fields(realm = %data.realm_id, name = %data.name))]
    pub async fn create_policy(
        &self,
        ctx: &RequestContext,
        data: &PolicyResourceData,
    ) -> DomainResult<PolicyResourceData> {
        let mut policy = data.to_policy()?;

        self.repository.create_policy(ctx, &mut policy).await?;

        let id = policy.require_id()?.to_string();
        let created = self
            .repository
            .find_policy_by_id(ctx, &policy.realm_id, &id)
            .await?;

        info!("Created policy '{}' ({})", created.name, id);
        Ok(PolicyResourceData::from_policy(&created))
    }

    /// Refresh state from the server. `None` means the policy is gone.
    #[instrument(skip(self, ctx, data), fields(realm = %data.realm_id, id = ?data.id))]
    pub async fn read_policy(
        &self,
        ctx: &RequestContext,
        data: &PolicyResourceData,
    ) -> DomainResult<Option<PolicyResourceData>> {
        let id = Self::state_id(data)?;

        match self
            .repository
            .find_policy_by_id(ctx, &data.realm_id, id)
            .await
        {
            Ok(policy) => Ok(Some(PolicyResourceData::from_policy(&policy))),
            Err(e) if e.is_not_found() => {
                warn!("Policy '{}' no longer exists, removing from state", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, ctx, data), fields(realm = %data.realm_id, id = ?data.id))]
    pub async fn update_policy(
        &self,
        ctx: &RequestContext,
        data: &PolicyResourceData,
    ) -> DomainResult<PolicyResourceData> {
        let policy = data.to_policy()?;

        self.repository.update_policy(ctx, &policy).await?;

        Ok(PolicyResourceData::from_policy(&policy))
    }

    #[instrument(skip(self, ctx, data), fields(realm = %data.realm_id, id = ?data.id))]
    pub async fn delete_policy(
        &self,
        ctx: &RequestContext,
        data: &PolicyResourceData,
    ) -> DomainResult<()> {
        let id = Self::state_id(data)?;
        self.repository
            .delete_policy(ctx, &data.realm_id, id)
            .await
    }

    /// Adopt an existing policy given `<realmId>/<policyId>`
    #[instrument(skip(self, ctx))]
    pub async fn import_policy(
        &self,
        ctx: &RequestContext,
        import_id: &str,
    ) -> DomainResult<PolicyResourceData> {
        let import_id = ImportId::parse(import_id)?;

        let policy = self
            .repository
            .find_policy_by_id(ctx, &import_id.realm_id, &import_id.policy_id)
            .await?;

        info!("Imported policy '{}' from realm '{}'", policy.name, import_id.realm_id);
        Ok(PolicyResourceData::from_policy(&policy))
    }

    /// Resolve a policy by name for read-only queries
    #[instrument(skip(self, ctx), fields(realm = %query.realm_id, name = %query.name))]
    pub async fn lookup_policy(
        &self,
        ctx: &RequestContext,
        query: &PolicyLookup,
    ) -> DomainResult<PolicyResourceData> {
        let filter = query.to_filter();
        let policy = self
            .repository
            .find_policy_by_name(ctx, &query.realm_id, &filter)
            .await?;

        Ok(PolicyResourceData::from_policy(&policy))
    }

    fn state_id(data: &PolicyResourceData) -> DomainResult<&str> {
        data.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::Validation {
                field: "id".to_string(),
                message: "Policy ID is required for this operation".to_string(),
            })
    }
}
