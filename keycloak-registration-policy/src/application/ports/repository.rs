use super::context::RequestContext;
use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// Repository port for client registration policies of a realm
#[async_trait]
pub trait ClientRegistrationPolicyRepository: Send + Sync {
    /// Create the policy and store the server-assigned id into it
    async fn create_policy(
        &self,
        ctx: &RequestContext,
        policy: &mut RealmClientRegistrationPolicy,
    ) -> DomainResult<()>;

    async fn find_policy_by_id(
        &self,
        ctx: &RequestContext,
        realm: &str,
        id: &str,
    ) -> DomainResult<RealmClientRegistrationPolicy>;

    /// Full replacement of an existing policy
    async fn update_policy(
        &self,
        ctx: &RequestContext,
        policy: &RealmClientRegistrationPolicy,
    ) -> DomainResult<()>;

    async fn delete_policy(&self, ctx: &RequestContext, realm: &str, id: &str)
        -> DomainResult<()>;

    async fn list_policies(
        &self,
        ctx: &RequestContext,
        realm: &str,
    ) -> DomainResult<Vec<RealmClientRegistrationPolicy>>;

    /// Resolve exactly one policy by name, narrowed by the optional filters
    async fn find_policy_by_name(
        &self,
        ctx: &RequestContext,
        realm: &str,
        filter: &PolicyFilter,
    ) -> DomainResult<RealmClientRegistrationPolicy> {
        let policies = self.list_policies(ctx, realm).await?;
        filter.select(realm, policies)
    }
}
