pub mod common;
pub mod component;
pub mod coercion;
pub mod policy;
pub mod resource;

pub use common::*;
pub use component::*;
pub use coercion::{collapse, expand, TRUSTED_HOSTS_KEY};
pub use policy::*;
pub use resource::*;
