use keycloak_registration_policy::domain::entities::*;
use serde_json::json;

fn trusted_hosts_policy() -> RealmClientRegistrationPolicy {
    let mut config = ConfigValues::new();
    config.insert(
        "trusted-hosts".to_string(),
        vec!["a.com".to_string(), "b.com".to_string()],
    );
    RealmClientRegistrationPolicy::new(
        "test-realm",
        "Trusted Hosts",
        ProviderId::TrustedHosts,
        SubType::Anonymous,
    )
    .with_config(config)
}

#[test]
fn test_to_component_sets_provider_type_and_parent() {
    let policy = trusted_hosts_policy();

    let component = policy.to_component();

    assert_eq!(component.id, None);
    assert_eq!(component.name, "Trusted Hosts");
    assert_eq!(component.parent_id.as_deref(), Some("test-realm"));
    assert_eq!(component.provider_id, "trusted-hosts");
    assert_eq!(
        component.provider_type,
        "org.keycloak.services.clientregistration.policy.ClientRegistrationPolicy"
    );
    assert_eq!(component.sub_type.as_deref(), Some("anonymous"));
    assert_eq!(component.config, policy.config);
    assert!(component.is_a::<RealmClientRegistrationPolicy>());
}

#[test]
fn test_from_component_uses_supplied_realm() {
    let component = Component {
        id: Some("abc".to_string()),
        name: "Max Clients Limit".to_string(),
        parent_id: Some("some-internal-realm-uuid".to_string()),
        provider_id: "max-clients".to_string(),
        provider_type: CLIENT_REGISTRATION_POLICY_PROVIDER_TYPE.to_string(),
        sub_type: Some("authenticated".to_string()),
        config: ConfigValues::new(),
    };

    let policy = RealmClientRegistrationPolicy::from_component(component, "test-realm");

    assert_eq!(policy.id, Some(EntityId::from("abc")));
    assert_eq!(policy.realm_id, "test-realm");
    assert_eq!(policy.provider_id, ProviderId::MaxClients);
    assert_eq!(policy.sub_type, SubType::Authenticated);
}

#[test]
fn test_component_round_trip_preserves_policy() {
    let mut policy = trusted_hosts_policy();
    policy.id = Some(EntityId::from("policy-1"));

    let restored =
        RealmClientRegistrationPolicy::from_component(policy.to_component(), &policy.realm_id);

    assert_eq!(restored, policy);
}

#[test]
fn test_unknown_provider_from_server_is_preserved() {
    let component = Component {
        id: Some("custom".to_string()),
        name: "Custom".to_string(),
        provider_id: "my-custom-policy".to_string(),
        provider_type: CLIENT_REGISTRATION_POLICY_PROVIDER_TYPE.to_string(),
        sub_type: Some("anonymous".to_string()),
        ..Default::default()
    };

    let policy = RealmClientRegistrationPolicy::from_component(component, "test-realm");

    assert_eq!(
        policy.provider_id,
        ProviderId::Other("my-custom-policy".to_string())
    );
    assert_eq!(policy.to_component().provider_id, "my-custom-policy");
}

#[test]
fn test_component_wire_shape() {
    let mut policy = trusted_hosts_policy();
    policy.id = Some(EntityId::from("policy-1"));

    let value = serde_json::to_value(policy.to_component()).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "policy-1",
            "name": "Trusted Hosts",
            "parentId": "test-realm",
            "providerId": "trusted-hosts",
            "providerType": "org.keycloak.services.clientregistration.policy.ClientRegistrationPolicy",
            "subType": "anonymous",
            "config": { "trusted-hosts": ["a.com", "b.com"] }
        })
    );
}

#[test]
fn test_new_component_omits_id() {
    let value = serde_json::to_value(trusted_hosts_policy().to_component()).unwrap();

    assert!(value.get("id").is_none());
}

#[test]
fn test_component_decodes_keycloak_response() {
    let component: Component = serde_json::from_value(json!({
        "id": "2d3c1a",
        "name": "Consent Required",
        "providerId": "consent-required",
        "providerType": "org.keycloak.services.clientregistration.policy.ClientRegistrationPolicy",
        "parentId": "test-realm",
        "subType": "anonymous",
        "config": {}
    }))
    .unwrap();

    assert!(component.is_a::<RealmClientRegistrationPolicy>());
    assert_eq!(component.provider_id, "consent-required");
    assert!(component.config.is_empty());
}

#[test]
fn test_component_of_other_kind_is_not_a_policy() {
    let component: Component = serde_json::from_value(json!({
        "id": "ldap-1",
        "name": "ldap",
        "providerId": "ldap",
        "providerType": "org.keycloak.storage.UserStorageProvider",
        "parentId": "test-realm"
    }))
    .unwrap();

    assert!(!component.is_a::<RealmClientRegistrationPolicy>());
}

#[test]
fn test_provider_id_parsing_is_strict() {
    for value in ProviderId::VALID_VALUES {
        let parsed: ProviderId = value.parse().unwrap();
        assert_eq!(parsed.as_str(), value);
    }

    let err = "invalid-provider".parse::<ProviderId>().unwrap_err();
    assert!(err
        .to_string()
        .contains("expected provider_id to be one of"));
    assert!(err.to_string().contains("got invalid-provider"));
}

#[test]
fn test_sub_type_parsing_is_strict() {
    assert_eq!("anonymous".parse::<SubType>().unwrap(), SubType::Anonymous);
    assert_eq!(
        "authenticated".parse::<SubType>().unwrap(),
        SubType::Authenticated
    );

    let err = "invalid-subtype".parse::<SubType>().unwrap_err();
    assert!(err.to_string().contains("got invalid-subtype"));
}
