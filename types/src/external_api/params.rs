// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Params define the request bodies of API endpoints for creating or updating
//! resources.
//!
//! The create structs below compose into one nested tree rooted at
//! [`ProviderCreate`]: a provider submits its whole world (projects, regions,
//! services, quotas, flavors, images, networks, identity providers, user
//! groups, SLAs) in a single request.  Cross-field and cross-object
//! consistency of that tree is checked by [`crate::validation`], not here;
//! these types only pin down field shapes.

use crate::external_api::shared;
use chrono::NaiveDate;
use fedreg_common::api::external::{
    EmailAddress, NodeMetadataCreateParams, NodeMetadataUpdateParams,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

fn default_true() -> bool {
    true
}

// PROJECTS

/// Create-time parameters for a `Project`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProjectCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// project name inside the provider
    pub name: String,
    /// project unique ID inside the provider
    pub uuid: Uuid,
}

/// Updateable properties of a `Project`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ProjectUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
    pub uuid: Option<Uuid>,
}

// LOCATIONS

/// Create-time parameters for a `Location`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LocationCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// name of the hosting site
    pub site: String,
    /// country of the hosting site
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Updateable properties of a `Location`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct LocationUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub site: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// FLAVORS

/// Create-time parameters for a `Flavor`
///
/// A private flavor (`is_public: false`) must name the projects that can see
/// it in `projects`; a public flavor must leave that list empty.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct FlavorCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// flavor name inside the provider
    pub name: String,
    /// flavor unique ID inside the provider
    pub uuid: Uuid,
    /// reserved disk size (GiB)
    #[serde(default)]
    pub disk: u32,
    #[serde(default = "default_true")]
    pub is_public: bool,
    /// reserved RAM (MiB)
    #[serde(default)]
    pub ram: u32,
    /// number of virtual CPUs
    #[serde(default)]
    pub vcpus: u32,
    /// swap size (GiB)
    #[serde(default)]
    pub swap: u32,
    /// ephemeral disk size (GiB)
    #[serde(default)]
    pub ephemeral: u32,
    /// MPI parallel multi-process support
    #[serde(default)]
    pub infiniband: bool,
    #[serde(default)]
    pub gpus: u32,
    /// GPU model name; requires `gpus` > 0
    pub gpu_model: Option<String>,
    /// GPU vendor name; requires `gpus` > 0
    pub gpu_vendor: Option<String>,
    /// kind of local storage backing the flavor
    pub local_storage: Option<String>,
    /// UUIDs of the projects with access to the flavor
    #[serde(default)]
    pub projects: Vec<Uuid>,
}

/// Updateable properties of a `Flavor`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct FlavorUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
    pub uuid: Option<Uuid>,
    pub disk: Option<u32>,
    pub is_public: Option<bool>,
    pub ram: Option<u32>,
    pub vcpus: Option<u32>,
    pub swap: Option<u32>,
    pub ephemeral: Option<u32>,
    pub infiniband: Option<bool>,
    pub gpus: Option<u32>,
    pub gpu_model: Option<String>,
    pub gpu_vendor: Option<String>,
    pub local_storage: Option<String>,
}

// IMAGES

/// Create-time parameters for an `Image`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ImageCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// image name inside the provider
    pub name: String,
    /// image unique ID inside the provider
    pub uuid: Uuid,
    pub os_type: Option<String>,
    pub os_distro: Option<String>,
    pub os_version: Option<String>,
    pub architecture: Option<String>,
    pub kernel_id: Option<String>,
    /// CUDA support enabled in the image
    #[serde(default)]
    pub cuda_support: bool,
    /// GPU drivers preinstalled in the image
    #[serde(default)]
    pub gpu_driver: bool,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// UUIDs of the projects with access to the image
    #[serde(default)]
    pub projects: Vec<Uuid>,
}

/// Updateable properties of an `Image`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ImageUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
    pub uuid: Option<Uuid>,
    pub os_type: Option<String>,
    pub os_distro: Option<String>,
    pub os_version: Option<String>,
    pub architecture: Option<String>,
    pub kernel_id: Option<String>,
    pub cuda_support: Option<bool>,
    pub gpu_driver: Option<bool>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

// NETWORKS

/// Create-time parameters for a `Network`
///
/// Like flavors and images, a non-shared network names the projects that can
/// use it and a shared network must not.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// network name inside the provider
    pub name: String,
    /// network unique ID inside the provider
    pub uuid: Uuid,
    #[serde(default = "default_true")]
    pub is_shared: bool,
    /// network with access to outside networks
    #[serde(default)]
    pub is_router_external: bool,
    /// network to use when none is specified
    #[serde(default)]
    pub is_default: bool,
    /// maximum transmission unit (B)
    pub mtu: Option<u32>,
    /// proxy IP address for instances without a public IP
    pub proxy_host: Option<String>,
    /// username to use with `proxy_host`
    pub proxy_user: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// UUIDs of the projects with access to the network
    #[serde(default)]
    pub projects: Vec<Uuid>,
}

/// Updateable properties of a `Network`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct NetworkUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
    pub uuid: Option<Uuid>,
    pub is_shared: Option<bool>,
    pub is_router_external: Option<bool>,
    pub is_default: Option<bool>,
    pub mtu: Option<u32>,
    pub proxy_host: Option<String>,
    pub proxy_user: Option<String>,
    pub tags: Option<Vec<String>>,
}

// QUOTAS
//
// Every quota kind shares the `per_user`/`usage`/`project` triple and adds
// its own limit fields.  Limits of -1 mean "unlimited" where the upstream
// catalogs use that convention.  A quota without a target project applies to
// the service as a whole; whether those are accepted is a validation policy
// decision.

/// Create-time parameters for a `BlockStorageQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageQuotaCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// the limitation applies to each user rather than to the project
    #[serde(default)]
    pub per_user: bool,
    /// this record reports current usage rather than a limit
    #[serde(default)]
    pub usage: bool,
    /// max usable gigabytes (GiB)
    pub gigabytes: Option<i64>,
    /// max usable gigabytes per volume (GiB)
    pub per_volume_gigabytes: Option<i64>,
    /// max number of volumes
    pub volumes: Option<i64>,
    /// UUID of the target project inside the provider
    pub project: Option<Uuid>,
}

/// Updateable properties of a `BlockStorageQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct BlockStorageQuotaUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub per_user: Option<bool>,
    pub usage: Option<bool>,
    pub gigabytes: Option<i64>,
    pub per_volume_gigabytes: Option<i64>,
    pub volumes: Option<i64>,
}

/// Create-time parameters for a `ComputeQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeQuotaCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    #[serde(default)]
    pub per_user: bool,
    #[serde(default)]
    pub usage: bool,
    /// max usable cores
    pub cores: Option<i64>,
    /// max number of VM instances
    pub instances: Option<i64>,
    /// max usable RAM (MiB)
    pub ram: Option<i64>,
    /// UUID of the target project inside the provider
    pub project: Option<Uuid>,
}

/// Updateable properties of a `ComputeQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ComputeQuotaUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub per_user: Option<bool>,
    pub usage: Option<bool>,
    pub cores: Option<i64>,
    pub instances: Option<i64>,
    pub ram: Option<i64>,
}

/// Create-time parameters for a `NetworkQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkQuotaCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    #[serde(default)]
    pub per_user: bool,
    #[serde(default)]
    pub usage: bool,
    /// floating IP addresses allowed for each project
    pub public_ips: Option<i64>,
    /// networks allowed for each project
    pub networks: Option<i64>,
    /// ports allowed for each project
    pub ports: Option<i64>,
    /// security groups allowed for each project
    pub security_groups: Option<i64>,
    /// security group rules allowed for each project
    pub security_group_rules: Option<i64>,
    /// UUID of the target project inside the provider
    pub project: Option<Uuid>,
}

/// Updateable properties of a `NetworkQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct NetworkQuotaUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub per_user: Option<bool>,
    pub usage: Option<bool>,
    pub public_ips: Option<i64>,
    pub networks: Option<i64>,
    pub ports: Option<i64>,
    pub security_groups: Option<i64>,
    pub security_group_rules: Option<i64>,
}

fn default_containers() -> i64 {
    1000
}

fn default_unlimited() -> i64 {
    -1
}

/// Create-time parameters for an `ObjectStoreQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreQuotaCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    #[serde(default)]
    pub per_user: bool,
    #[serde(default)]
    pub usage: bool,
    /// max number of bytes
    #[serde(default = "default_unlimited")]
    pub bytes: i64,
    /// max number of containers
    #[serde(default = "default_containers")]
    pub containers: i64,
    /// max number of objects
    #[serde(default = "default_unlimited")]
    pub objects: i64,
    /// UUID of the target project inside the provider
    pub project: Option<Uuid>,
}

/// Updateable properties of an `ObjectStoreQuota`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ObjectStoreQuotaUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub per_user: Option<bool>,
    pub usage: Option<bool>,
    pub bytes: Option<i64>,
    pub containers: Option<i64>,
    pub objects: Option<i64>,
}

// SERVICES
//
// The service kind is implied by which list of a `RegionCreate` the record
// sits in, so there is no discriminator field on the create bodies; read
// bodies reintroduce one where heterogeneous lists exist (see
// `views::ServiceRead`).

/// Create-time parameters for a `BlockStorageService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageServiceCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the service inside its region
    pub endpoint: Url,
    pub name: shared::BlockStorageServiceName,
    /// quotas enforced by this service
    #[serde(default)]
    pub quotas: Vec<BlockStorageQuotaCreate>,
}

/// Updateable properties of a `BlockStorageService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct BlockStorageServiceUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub name: Option<shared::BlockStorageServiceName>,
}

/// Create-time parameters for a `ComputeService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeServiceCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the service inside its region
    pub endpoint: Url,
    pub name: shared::ComputeServiceName,
    /// flavors supplied by this service
    #[serde(default)]
    pub flavors: Vec<FlavorCreate>,
    /// images supplied by this service
    #[serde(default)]
    pub images: Vec<ImageCreate>,
    /// quotas enforced by this service
    #[serde(default)]
    pub quotas: Vec<ComputeQuotaCreate>,
}

/// Updateable properties of a `ComputeService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ComputeServiceUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub name: Option<shared::ComputeServiceName>,
}

/// Create-time parameters for an `IdentityService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityServiceCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the service inside its region
    pub endpoint: Url,
    pub name: shared::IdentityServiceName,
}

/// Updateable properties of an `IdentityService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct IdentityServiceUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub name: Option<shared::IdentityServiceName>,
}

/// Create-time parameters for a `NetworkService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkServiceCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the service inside its region
    pub endpoint: Url,
    pub name: shared::NetworkServiceName,
    /// networks supplied by this service
    #[serde(default)]
    pub networks: Vec<NetworkCreate>,
    /// quotas enforced by this service
    #[serde(default)]
    pub quotas: Vec<NetworkQuotaCreate>,
}

/// Updateable properties of a `NetworkService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct NetworkServiceUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub name: Option<shared::NetworkServiceName>,
}

/// Create-time parameters for an `ObjectStoreService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreServiceCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the service inside its region
    pub endpoint: Url,
    pub name: shared::ObjectStoreServiceName,
    /// quotas enforced by this service
    #[serde(default)]
    pub quotas: Vec<ObjectStoreQuotaCreate>,
}

/// Updateable properties of an `ObjectStoreService`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ObjectStoreServiceUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub name: Option<shared::ObjectStoreServiceName>,
}

// REGIONS

/// Create-time parameters for a `Region`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RegionCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// region name inside the provider
    pub name: String,
    /// geographical location hosting the region
    pub location: Option<LocationCreate>,
    #[serde(default)]
    pub block_storage_services: Vec<BlockStorageServiceCreate>,
    #[serde(default)]
    pub compute_services: Vec<ComputeServiceCreate>,
    #[serde(default)]
    pub identity_services: Vec<IdentityServiceCreate>,
    #[serde(default)]
    pub network_services: Vec<NetworkServiceCreate>,
    #[serde(default)]
    pub object_store_services: Vec<ObjectStoreServiceCreate>,
}

/// Updateable properties of a `Region`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct RegionUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
}

// SLAS

/// Create-time parameters for an `SLA`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SlaCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// unique ID of the document with the SLA details
    pub doc_uuid: Uuid,
    /// validity start date
    pub start_date: NaiveDate,
    /// validity end date; must fall after `start_date`
    pub end_date: NaiveDate,
    /// UUID of the target project inside the provider
    pub project: Uuid,
}

/// Updateable properties of an `SLA`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct SlaUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub doc_uuid: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// USER GROUPS

/// Create-time parameters for a `UserGroup`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct UserGroupCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// user group name inside the identity provider
    pub name: String,
    /// agreement granting this group access to one of the provider's
    /// projects
    pub sla: SlaCreate,
}

/// Updateable properties of a `UserGroup`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct UserGroupUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
}

// IDENTITY PROVIDERS

/// Create-time parameters for an `IdentityProvider`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityProviderCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    /// URL of the identity provider
    pub endpoint: Url,
    /// token claim from which the user group name is read
    pub group_claim: String,
    /// how the submitting provider authenticates against this identity
    /// provider
    pub relationship: shared::AuthMethod,
    #[serde(default)]
    pub user_groups: Vec<UserGroupCreate>,
}

/// Updateable properties of an `IdentityProvider`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct IdentityProviderUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub endpoint: Option<Url>,
    pub group_claim: Option<String>,
}

// PROVIDERS

/// Create-time parameters for a `Provider`
///
/// This is the root of the bulk-creation tree: everything the provider owns
/// arrives in this single body and is validated as a whole before any of it
/// is persisted.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderCreate {
    #[serde(flatten)]
    pub metadata: NodeMetadataCreateParams,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: shared::ProviderType,
    #[serde(default)]
    pub status: shared::ProviderStatus,
    /// whether the provider accepts workloads from outside its own
    /// federation
    #[serde(default)]
    pub is_public: bool,
    /// maintainer contact addresses
    #[serde(default)]
    pub support_emails: Vec<EmailAddress>,
    #[serde(default)]
    pub projects: Vec<ProjectCreate>,
    #[serde(default)]
    pub identity_providers: Vec<IdentityProviderCreate>,
    #[serde(default)]
    pub regions: Vec<RegionCreate>,
}

/// Updateable properties of a `Provider`
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ProviderUpdate {
    #[serde(flatten)]
    pub metadata: NodeMetadataUpdateParams,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<shared::ProviderType>,
    pub status: Option<shared::ProviderStatus>,
    pub is_public: Option<bool>,
    pub support_emails: Option<Vec<EmailAddress>>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_provider_create_defaults() {
        // A minimal body relies on every serde default.
        let provider: ProviderCreate = serde_json::from_value(
            serde_json::json!({
                "name": "example-site",
                "type": "openstack",
            }),
        )
        .unwrap();
        assert_eq!(provider.status, shared::ProviderStatus::Active);
        assert!(!provider.is_public);
        assert!(provider.projects.is_empty());
        assert!(provider.regions.is_empty());
        assert!(provider.identity_providers.is_empty());
        assert_eq!(provider.metadata.description, "");
    }

    #[test]
    fn test_leaf_defaults() {
        let flavor: FlavorCreate = serde_json::from_value(serde_json::json!({
            "name": "m1.small",
            "uuid": "8f705994-b363-4e17-8b67-47cc6f17c461",
        }))
        .unwrap();
        assert!(flavor.is_public);
        assert_eq!(flavor.disk, 0);
        assert!(flavor.projects.is_empty());

        let quota: ObjectStoreQuotaCreate =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(quota.bytes, -1);
        assert_eq!(quota.containers, 1000);
        assert_eq!(quota.objects, -1);
        assert!(quota.project.is_none());
    }

    #[test]
    fn test_bad_uuid_rejected() {
        let result: Result<ProjectCreate, _> =
            serde_json::from_value(serde_json::json!({
                "name": "astro",
                "uuid": "not-a-uuid",
            }));
        assert!(result.is_err());
    }
}
