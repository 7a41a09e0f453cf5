use super::common::ConfigValues;
use serde::{Deserialize, Serialize};

/// Generic component record of the Keycloak admin API.
///
/// Many unrelated realm settings travel as components. The only thing telling
/// them apart is `provider_type`, so every typed read must check it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub provider_id: String,
    #[serde(default)]
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub config: ConfigValues,
}

impl Component {
    /// Whether this component carries the discriminant of `T`
    pub fn is_a<T: ComponentModel>(&self) -> bool {
        self.provider_type == T::PROVIDER_TYPE
    }
}

/// A domain record stored as a [`Component`] under a realm
pub trait ComponentModel: Sized {
    /// Value of `providerType` identifying this record kind
    const PROVIDER_TYPE: &'static str;

    fn to_component(&self) -> Component;

    /// Build the record from a component already known to be of this kind.
    /// The realm is supplied by the caller since lookups are realm scoped.
    fn from_component(component: Component, realm_id: &str) -> Self;
}
