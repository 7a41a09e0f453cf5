/*!
# Keycloak Registration Policy

Realm client-registration policies managed through the Keycloak admin REST API,
laid out along hexagonal architecture lines.

Keycloak has no dedicated endpoint for these policies. They are stored as
generic *components* under the realm, tagged with the provider type
`org.keycloak.services.clientregistration.policy.ClientRegistrationPolicy`.
This crate provides:

- The domain record and its mapping onto the component envelope
- Conversion between single-valued declarative config and the API's
  multi-valued config
- A repository port, implemented over the `keycloak` admin client and,
  alternatively, over a pluggable JSON transport
- A declarative binding service (create / read / update / delete / import /
  lookup by name)

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • PolicyManagementService  (flat config, import, lookup)   │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • ClientRegistrationPolicyRepository                       │
│  • KeycloakTransport        • ConfigurationPort             │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • KeycloakRestAdapter      • ComponentTransportAdapter     │
│  • EnvConfigurationAdapter  • connect_admin                 │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use keycloak_registration_policy::{
    infrastructure::adapters::{connect_admin, EnvConfigurationAdapter, KeycloakRestAdapter},
    PolicyLookup, PolicyManagementService, RequestContext,
};

let config = EnvConfigurationAdapter::load()?;
let admin = connect_admin(&config).await?;
let service = PolicyManagementService::new(Arc::new(KeycloakRestAdapter::new(admin)));

let ctx = RequestContext::new();
let policy = service
    .lookup_policy(&ctx, &PolicyLookup::new("my-realm", "Trusted Hosts"))
    .await?;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
