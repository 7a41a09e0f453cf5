pub mod admin_client;
pub mod component_transport;
pub mod env_config;
pub mod keycloak_rest;

pub use admin_client::*;
pub use component_transport::*;
pub use env_config::*;
pub use keycloak_rest::*;
