pub mod policy_management;

pub use policy_management::*;
