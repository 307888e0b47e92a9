// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end exercise of provider creation against the in-memory store.

use fedreg_common::api::external::{
    DataPageParams, Error, PaginationOrder,
};
use fedreg_registry::config::RegistryConfig;
use fedreg_registry::datastore::InMemoryGraphStore;
use fedreg_registry::Registry;
use fedreg_types::external_api::params;
use fedreg_types::external_api::views;
use fedreg_types::validation::ValidationPolicy;
use slog::o;
use std::io::Write;
use std::num::NonZeroU32;
use std::sync::Arc;

const P1: &str = "11111111-1111-4111-8111-111111111111";
const P2: &str = "22222222-2222-4222-8222-222222222222";

fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, o!())
}

fn test_registry(policy: ValidationPolicy) -> (Registry, Arc<InMemoryGraphStore>) {
    let store = Arc::new(InMemoryGraphStore::new());
    let registry = Registry::new(test_logger(), store.clone(), policy);
    (registry, store)
}

/// A payload touching every branch of the tree: two projects, one region
/// with all five service kinds, private and public resources, a
/// service-level quota, and one identity provider chain.
fn full_payload() -> params::ProviderCreate {
    serde_json::from_value(serde_json::json!({
        "name": "example-site",
        "type": "openstack",
        "description": "an openstack deployment",
        "support_emails": ["ops@example.org"],
        "projects": [
            {"name": "astro", "uuid": P1},
            {"name": "bio", "uuid": P2},
        ],
        "identity_providers": [{
            "endpoint": "https://idp.example.org",
            "group_claim": "groups",
            "relationship": {"idp_name": "egi", "protocol": "openid"},
            "user_groups": [{
                "name": "ops",
                "sla": {
                    "doc_uuid": "55555555-5555-4555-8555-555555555555",
                    "start_date": "2024-01-01",
                    "end_date": "2025-01-01",
                    "project": P1,
                },
            }],
        }],
        "regions": [{
            "name": "east",
            "location": {"site": "garching", "country": "DE"},
            "block_storage_services": [{
                "endpoint": "https://cinder.example.org:8776",
                "name": "org.openstack.cinder",
                "quotas": [
                    {"gigabytes": 1000, "volumes": 10, "project": P2},
                ],
            }],
            "compute_services": [{
                "endpoint": "https://nova.example.org:8774",
                "name": "org.openstack.nova",
                "flavors": [{
                    "name": "m1.private",
                    "uuid": "33333333-3333-4333-8333-333333333333",
                    "is_public": false,
                    "vcpus": 4,
                    "ram": 8192,
                    "projects": [P1, P2],
                }],
                "images": [{
                    "name": "ubuntu-24.04",
                    "uuid": "44444444-4444-4444-8444-444444444444",
                    "os_type": "linux",
                }],
                "quotas": [
                    {"cores": 64, "project": P1},
                    {"cores": 8, "per_user": true, "project": P1},
                ],
            }],
            "identity_services": [{
                "endpoint": "https://keystone.example.org:5000",
                "name": "org.openstack.keystone",
            }],
            "network_services": [{
                "endpoint": "https://neutron.example.org:9696",
                "name": "org.openstack.neutron",
                "networks": [{
                    "name": "public-net",
                    "uuid": "66666666-6666-4666-8666-666666666666",
                }],
                "quotas": [
                    {"public_ips": 5, "project": P1},
                ],
            }],
            "object_store_services": [{
                "endpoint": "https://swift.example.org:8080",
                "name": "org.openstack.swift",
                // Service-level quota: accepted by the default policy.
                "quotas": [{"bytes": 100000}],
            }],
        }],
    }))
    .unwrap()
}

#[tokio::test]
async fn test_provider_create_persists_whole_tree() {
    let (registry, store) = test_registry(ValidationPolicy::default());
    let created = registry.provider_create(&full_payload()).await.unwrap();

    // The returned view mirrors the payload, with store-assigned uids.
    assert_eq!(created.provider.name, "example-site");
    assert_eq!(created.projects.len(), 2);
    assert_eq!(created.identity_providers.len(), 1);
    assert_eq!(created.identity_providers[0].user_groups.len(), 1);
    assert_eq!(created.regions.len(), 1);
    let region = &created.regions[0];
    assert_eq!(region.region.name, "east");
    assert_eq!(region.location.as_ref().unwrap().country, "DE");
    assert_eq!(region.services.len(), 5);
    match &region.services[1] {
        views::ServiceRead::Compute(compute) => {
            assert_eq!(compute.flavors.len(), 1);
            assert_eq!(compute.images.len(), 1);
            assert_eq!(compute.quotas.len(), 2);
        }
        other => panic!("expected a compute service, got {:?}", other),
    }

    // Nodes: provider, 2 projects, identity provider, user group, SLA,
    // region, location, 5 services, 5 quotas, flavor, image, network.
    assert_eq!(store.node_count(), 21);
    // Relationships: 2 project links, the identity-provider chain (auth
    // method, user group, SLA, SLA target), region and location links, 5
    // service links, 5 quota links, 4 quota targets (the service-level
    // quota has none), flavor/image/network links, 2 flavor access grants.
    assert_eq!(store.relationship_count(), 27);

    // The stored provider reads back as the same view.
    let fetched =
        registry.provider_fetch(created.provider.metadata.uid).await.unwrap();
    assert_eq!(fetched, created.provider);

    // Projects come back through the traversal interface.
    let mut projects = registry
        .provider_projects_list(created.provider.metadata.uid)
        .await
        .unwrap();
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "astro");
    assert_eq!(projects[1].name, "bio");
}

#[tokio::test]
async fn test_provider_create_rejects_duplicate_name() {
    let (registry, _store) = test_registry(ValidationPolicy::default());
    registry.provider_create(&full_payload()).await.unwrap();
    let error =
        registry.provider_create(&full_payload()).await.unwrap_err();
    assert!(matches!(error, Error::ObjectAlreadyExists { .. }));
}

#[tokio::test]
async fn test_invalid_payload_leaves_store_untouched() {
    let (registry, store) = test_registry(ValidationPolicy::default());

    let mut payload = full_payload();
    // A third quota for a project that already has its pair.
    payload.regions[0].compute_services[0].quotas.push(
        serde_json::from_value(serde_json::json!({
            "cores": 1,
            "project": P1,
        }))
        .unwrap(),
    );

    let error = registry.provider_create(&payload).await.unwrap_err();
    match error {
        Error::InvalidValue { message, .. } => {
            assert_eq!(
                message,
                format!("Multiple quotas on same project {}", P1)
            );
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }

    // Validation failed before anything was written.
    assert_eq!(store.node_count(), 0);
    assert_eq!(store.relationship_count(), 0);
}

#[tokio::test]
async fn test_policy_rejects_service_level_quota() {
    let (registry, store) = test_registry(ValidationPolicy {
        allow_service_level_quotas: false,
        ..Default::default()
    });
    let error =
        registry.provider_create(&full_payload()).await.unwrap_err();
    match error {
        Error::InvalidValue { message, .. } => {
            assert!(message.contains("service-level quotas are disabled"));
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
    assert_eq!(store.node_count(), 0);
}

#[tokio::test]
async fn test_provider_list_pagination() {
    let (registry, _store) = test_registry(ValidationPolicy::default());
    for i in 0..3 {
        let mut payload = full_payload();
        payload.name = format!("site-{}", i);
        registry.provider_create(&payload).await.unwrap();
    }

    let page = registry
        .provider_list(&DataPageParams {
            marker: None,
            direction: PaginationOrder::Ascending,
            limit: NonZeroU32::new(2).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    let marker = page.last().unwrap().metadata.uid;
    let rest = registry
        .provider_list(&DataPageParams {
            marker: Some(&marker),
            direction: PaginationOrder::Ascending,
            limit: NonZeroU32::new(2).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn test_extended_view_projects_to_public() {
    let (registry, _store) = test_registry(ValidationPolicy::default());
    let created = registry.provider_create(&full_payload()).await.unwrap();

    let public: views::ProviderReadExtendedPublic = created.into();
    let value = serde_json::to_value(&public).unwrap();
    // Restricted provider fields are gone from the public projection.
    assert!(value.get("support_emails").is_none());
    assert!(value.get("is_public").is_none());
    assert_eq!(value["name"], serde_json::json!("example-site"));
}

#[test]
fn test_config_drives_registry_policy() {
    let mut config_file = camino_tempfile::NamedUtf8TempFile::new().unwrap();
    write!(
        config_file,
        r#"
        [log]
        mode = "stderr-terminal"
        level = "error"

        [validation]
        require_user_groups = true
        allow_service_level_quotas = false
        "#
    )
    .unwrap();

    let config = RegistryConfig::from_file(config_file.path()).unwrap();
    assert!(config.validation.require_user_groups);
    assert!(!config.validation.allow_service_level_quotas);

    let log = config.log.to_logger("fedreg-registry").unwrap();
    let store = Arc::new(InMemoryGraphStore::new());
    let _registry = Registry::new(log, store, config.validation);
}
