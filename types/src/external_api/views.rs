// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Views are response bodies, most of which are lenses onto stored graph
//! nodes.
//!
//! Every entity has a full view (for authenticated readers) and, where the
//! two differ, a `*Public` view holding only the fields unauthenticated
//! readers may see.  The `From` conversions between them are the whole
//! "project to public" transformation: pure field drops, no I/O.  The
//! `*Extended` views re-attach the relationship tree around a node and
//! exist in the same two flavors.

use crate::external_api::shared;
use chrono::NaiveDate;
use fedreg_common::api::external::{EmailAddress, NodeMetadata};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

// PROJECTS

/// View of a Project
///
/// Projects have no restricted fields, so this doubles as the public view.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProjectRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
}

// LOCATIONS

/// View of a Location
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LocationRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub site: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Public view of a Location
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct LocationReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub site: String,
    pub country: String,
}

impl From<LocationRead> for LocationReadPublic {
    fn from(location: LocationRead) -> Self {
        LocationReadPublic {
            metadata: location.metadata,
            site: location.site,
            country: location.country,
        }
    }
}

// FLAVORS

/// View of a Flavor
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct FlavorRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
    pub disk: u32,
    pub is_public: bool,
    pub ram: u32,
    pub vcpus: u32,
    pub swap: u32,
    pub ephemeral: u32,
    pub infiniband: bool,
    pub gpus: u32,
    pub gpu_model: Option<String>,
    pub gpu_vendor: Option<String>,
    pub local_storage: Option<String>,
}

/// Public view of a Flavor: just enough to recognize it.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct FlavorReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
}

impl From<FlavorRead> for FlavorReadPublic {
    fn from(flavor: FlavorRead) -> Self {
        FlavorReadPublic {
            metadata: flavor.metadata,
            name: flavor.name,
            uuid: flavor.uuid,
        }
    }
}

// IMAGES

/// View of an Image
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ImageRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
    pub os_type: Option<String>,
    pub os_distro: Option<String>,
    pub os_version: Option<String>,
    pub architecture: Option<String>,
    pub kernel_id: Option<String>,
    pub cuda_support: bool,
    pub gpu_driver: bool,
    pub is_public: bool,
    pub tags: Vec<String>,
}

/// Public view of an Image
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ImageReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
}

impl From<ImageRead> for ImageReadPublic {
    fn from(image: ImageRead) -> Self {
        ImageReadPublic {
            metadata: image.metadata,
            name: image.name,
            uuid: image.uuid,
        }
    }
}

// NETWORKS

/// View of a Network
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
    pub is_shared: bool,
    pub is_router_external: bool,
    pub is_default: bool,
    pub mtu: Option<u32>,
    pub proxy_host: Option<String>,
    pub proxy_user: Option<String>,
    pub tags: Vec<String>,
}

/// Public view of a Network
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    pub uuid: Uuid,
}

impl From<NetworkRead> for NetworkReadPublic {
    fn from(network: NetworkRead) -> Self {
        NetworkReadPublic {
            metadata: network.metadata,
            name: network.name,
            uuid: network.uuid,
        }
    }
}

// QUOTAS
//
// Public quota views keep the flags but hide the actual limit figures.

/// View of a BlockStorageQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageQuotaRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
    pub gigabytes: Option<i64>,
    pub per_volume_gigabytes: Option<i64>,
    pub volumes: Option<i64>,
}

/// Public view of a BlockStorageQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageQuotaReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
}

impl From<BlockStorageQuotaRead> for BlockStorageQuotaReadPublic {
    fn from(quota: BlockStorageQuotaRead) -> Self {
        BlockStorageQuotaReadPublic {
            metadata: quota.metadata,
            per_user: quota.per_user,
            usage: quota.usage,
        }
    }
}

/// View of a ComputeQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeQuotaRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
    pub cores: Option<i64>,
    pub instances: Option<i64>,
    pub ram: Option<i64>,
}

/// Public view of a ComputeQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeQuotaReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
}

impl From<ComputeQuotaRead> for ComputeQuotaReadPublic {
    fn from(quota: ComputeQuotaRead) -> Self {
        ComputeQuotaReadPublic {
            metadata: quota.metadata,
            per_user: quota.per_user,
            usage: quota.usage,
        }
    }
}

/// View of a NetworkQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkQuotaRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
    pub public_ips: Option<i64>,
    pub networks: Option<i64>,
    pub ports: Option<i64>,
    pub security_groups: Option<i64>,
    pub security_group_rules: Option<i64>,
}

/// Public view of a NetworkQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkQuotaReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
}

impl From<NetworkQuotaRead> for NetworkQuotaReadPublic {
    fn from(quota: NetworkQuotaRead) -> Self {
        NetworkQuotaReadPublic {
            metadata: quota.metadata,
            per_user: quota.per_user,
            usage: quota.usage,
        }
    }
}

/// View of an ObjectStoreQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreQuotaRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
    pub bytes: i64,
    pub containers: i64,
    pub objects: i64,
}

/// Public view of an ObjectStoreQuota
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreQuotaReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub per_user: bool,
    pub usage: bool,
}

impl From<ObjectStoreQuotaRead> for ObjectStoreQuotaReadPublic {
    fn from(quota: ObjectStoreQuotaRead) -> Self {
        ObjectStoreQuotaReadPublic {
            metadata: quota.metadata,
            per_user: quota.per_user,
            usage: quota.usage,
        }
    }
}

// SERVICES
//
// A service's public view keeps the endpoint and drops the implementation
// name.  The `type` discriminator only exists where services of different
// kinds share a list: see `ServiceRead`.

/// View of a BlockStorageService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageServiceRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub name: shared::BlockStorageServiceName,
}

/// Public view of a BlockStorageService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageServiceReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<BlockStorageServiceRead> for BlockStorageServiceReadPublic {
    fn from(service: BlockStorageServiceRead) -> Self {
        BlockStorageServiceReadPublic {
            metadata: service.metadata,
            endpoint: service.endpoint,
        }
    }
}

/// View of a ComputeService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeServiceRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub name: shared::ComputeServiceName,
}

/// Public view of a ComputeService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeServiceReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<ComputeServiceRead> for ComputeServiceReadPublic {
    fn from(service: ComputeServiceRead) -> Self {
        ComputeServiceReadPublic {
            metadata: service.metadata,
            endpoint: service.endpoint,
        }
    }
}

/// View of an IdentityService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityServiceRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub name: shared::IdentityServiceName,
}

/// Public view of an IdentityService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityServiceReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<IdentityServiceRead> for IdentityServiceReadPublic {
    fn from(service: IdentityServiceRead) -> Self {
        IdentityServiceReadPublic {
            metadata: service.metadata,
            endpoint: service.endpoint,
        }
    }
}

/// View of a NetworkService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkServiceRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub name: shared::NetworkServiceName,
}

/// Public view of a NetworkService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkServiceReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<NetworkServiceRead> for NetworkServiceReadPublic {
    fn from(service: NetworkServiceRead) -> Self {
        NetworkServiceReadPublic {
            metadata: service.metadata,
            endpoint: service.endpoint,
        }
    }
}

/// View of an ObjectStoreService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreServiceRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub name: shared::ObjectStoreServiceName,
}

/// Public view of an ObjectStoreService
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreServiceReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<ObjectStoreServiceRead> for ObjectStoreServiceReadPublic {
    fn from(service: ObjectStoreServiceRead) -> Self {
        ObjectStoreServiceReadPublic {
            metadata: service.metadata,
            endpoint: service.endpoint,
        }
    }
}

// EXTENDED SERVICE VIEWS

/// View of a BlockStorageService with its quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageServiceReadExtended {
    #[serde(flatten)]
    pub service: BlockStorageServiceRead,
    pub quotas: Vec<BlockStorageQuotaRead>,
}

/// Public view of a BlockStorageService with its quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BlockStorageServiceReadExtendedPublic {
    #[serde(flatten)]
    pub service: BlockStorageServiceReadPublic,
    pub quotas: Vec<BlockStorageQuotaReadPublic>,
}

impl From<BlockStorageServiceReadExtended>
    for BlockStorageServiceReadExtendedPublic
{
    fn from(extended: BlockStorageServiceReadExtended) -> Self {
        BlockStorageServiceReadExtendedPublic {
            service: extended.service.into(),
            quotas: extended.quotas.into_iter().map(Into::into).collect(),
        }
    }
}

/// View of a ComputeService with its flavors, images and quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeServiceReadExtended {
    #[serde(flatten)]
    pub service: ComputeServiceRead,
    pub flavors: Vec<FlavorRead>,
    pub images: Vec<ImageRead>,
    pub quotas: Vec<ComputeQuotaRead>,
}

/// Public view of a ComputeService with its flavors, images and quotas
/// attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ComputeServiceReadExtendedPublic {
    #[serde(flatten)]
    pub service: ComputeServiceReadPublic,
    pub flavors: Vec<FlavorReadPublic>,
    pub images: Vec<ImageReadPublic>,
    pub quotas: Vec<ComputeQuotaReadPublic>,
}

impl From<ComputeServiceReadExtended> for ComputeServiceReadExtendedPublic {
    fn from(extended: ComputeServiceReadExtended) -> Self {
        ComputeServiceReadExtendedPublic {
            service: extended.service.into(),
            flavors: extended.flavors.into_iter().map(Into::into).collect(),
            images: extended.images.into_iter().map(Into::into).collect(),
            quotas: extended.quotas.into_iter().map(Into::into).collect(),
        }
    }
}

/// View of a NetworkService with its networks and quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkServiceReadExtended {
    #[serde(flatten)]
    pub service: NetworkServiceRead,
    pub networks: Vec<NetworkRead>,
    pub quotas: Vec<NetworkQuotaRead>,
}

/// Public view of a NetworkService with its networks and quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct NetworkServiceReadExtendedPublic {
    #[serde(flatten)]
    pub service: NetworkServiceReadPublic,
    pub networks: Vec<NetworkReadPublic>,
    pub quotas: Vec<NetworkQuotaReadPublic>,
}

impl From<NetworkServiceReadExtended> for NetworkServiceReadExtendedPublic {
    fn from(extended: NetworkServiceReadExtended) -> Self {
        NetworkServiceReadExtendedPublic {
            service: extended.service.into(),
            networks: extended.networks.into_iter().map(Into::into).collect(),
            quotas: extended.quotas.into_iter().map(Into::into).collect(),
        }
    }
}

/// View of an ObjectStoreService with its quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreServiceReadExtended {
    #[serde(flatten)]
    pub service: ObjectStoreServiceRead,
    pub quotas: Vec<ObjectStoreQuotaRead>,
}

/// Public view of an ObjectStoreService with its quotas attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ObjectStoreServiceReadExtendedPublic {
    #[serde(flatten)]
    pub service: ObjectStoreServiceReadPublic,
    pub quotas: Vec<ObjectStoreQuotaReadPublic>,
}

impl From<ObjectStoreServiceReadExtended>
    for ObjectStoreServiceReadExtendedPublic
{
    fn from(extended: ObjectStoreServiceReadExtended) -> Self {
        ObjectStoreServiceReadExtendedPublic {
            service: extended.service.into(),
            quotas: extended.quotas.into_iter().map(Into::into).collect(),
        }
    }
}

/// One service of any kind, as it appears in a region's heterogeneous
/// service list
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServiceRead {
    BlockStorage(BlockStorageServiceReadExtended),
    Compute(ComputeServiceReadExtended),
    Identity(IdentityServiceRead),
    Network(NetworkServiceReadExtended),
    ObjectStore(ObjectStoreServiceReadExtended),
}

/// Public counterpart of [`ServiceRead`]
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServiceReadPublic {
    BlockStorage(BlockStorageServiceReadExtendedPublic),
    Compute(ComputeServiceReadExtendedPublic),
    Identity(IdentityServiceReadPublic),
    Network(NetworkServiceReadExtendedPublic),
    ObjectStore(ObjectStoreServiceReadExtendedPublic),
}

impl From<ServiceRead> for ServiceReadPublic {
    fn from(service: ServiceRead) -> Self {
        match service {
            ServiceRead::BlockStorage(s) => {
                ServiceReadPublic::BlockStorage(s.into())
            }
            ServiceRead::Compute(s) => ServiceReadPublic::Compute(s.into()),
            ServiceRead::Identity(s) => ServiceReadPublic::Identity(s.into()),
            ServiceRead::Network(s) => ServiceReadPublic::Network(s.into()),
            ServiceRead::ObjectStore(s) => {
                ServiceReadPublic::ObjectStore(s.into())
            }
        }
    }
}

// REGIONS

/// View of a Region
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RegionRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
}

/// View of a Region with its location and services attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RegionReadExtended {
    #[serde(flatten)]
    pub region: RegionRead,
    pub location: Option<LocationRead>,
    pub services: Vec<ServiceRead>,
}

/// Public view of a Region with its location and services attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RegionReadExtendedPublic {
    #[serde(flatten)]
    pub region: RegionRead,
    pub location: Option<LocationReadPublic>,
    pub services: Vec<ServiceReadPublic>,
}

impl From<RegionReadExtended> for RegionReadExtendedPublic {
    fn from(extended: RegionReadExtended) -> Self {
        RegionReadExtendedPublic {
            region: extended.region,
            location: extended.location.map(Into::into),
            services: extended.services.into_iter().map(Into::into).collect(),
        }
    }
}

// SLAS

/// View of an SLA
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SlaRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub doc_uuid: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Public view of an SLA: the validity window stays private.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SlaReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub doc_uuid: Uuid,
}

impl From<SlaRead> for SlaReadPublic {
    fn from(sla: SlaRead) -> Self {
        SlaReadPublic { metadata: sla.metadata, doc_uuid: sla.doc_uuid }
    }
}

// USER GROUPS

/// View of a UserGroup
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct UserGroupRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
}

/// View of a UserGroup with its SLAs attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct UserGroupReadExtended {
    #[serde(flatten)]
    pub group: UserGroupRead,
    pub slas: Vec<SlaRead>,
}

/// Public view of a UserGroup with its SLAs attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct UserGroupReadExtendedPublic {
    #[serde(flatten)]
    pub group: UserGroupRead,
    pub slas: Vec<SlaReadPublic>,
}

impl From<UserGroupReadExtended> for UserGroupReadExtendedPublic {
    fn from(extended: UserGroupReadExtended) -> Self {
        UserGroupReadExtendedPublic {
            group: extended.group,
            slas: extended.slas.into_iter().map(Into::into).collect(),
        }
    }
}

// IDENTITY PROVIDERS

/// View of an IdentityProvider
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityProviderRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
    pub group_claim: String,
}

/// Public view of an IdentityProvider
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityProviderReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub endpoint: Url,
}

impl From<IdentityProviderRead> for IdentityProviderReadPublic {
    fn from(idp: IdentityProviderRead) -> Self {
        IdentityProviderReadPublic {
            metadata: idp.metadata,
            endpoint: idp.endpoint,
        }
    }
}

/// View of an IdentityProvider with its user groups and the authentication
/// method the provider uses against it
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityProviderReadExtended {
    #[serde(flatten)]
    pub identity_provider: IdentityProviderRead,
    pub relationship: shared::AuthMethod,
    pub user_groups: Vec<UserGroupReadExtended>,
}

/// Public view of an IdentityProvider with its user groups attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct IdentityProviderReadExtendedPublic {
    #[serde(flatten)]
    pub identity_provider: IdentityProviderReadPublic,
    pub relationship: shared::AuthMethod,
    pub user_groups: Vec<UserGroupReadExtendedPublic>,
}

impl From<IdentityProviderReadExtended>
    for IdentityProviderReadExtendedPublic
{
    fn from(extended: IdentityProviderReadExtended) -> Self {
        IdentityProviderReadExtendedPublic {
            identity_provider: extended.identity_provider.into(),
            relationship: extended.relationship,
            user_groups: extended
                .user_groups
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

// PROVIDERS

/// View of a Provider
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderRead {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: shared::ProviderType,
    pub status: shared::ProviderStatus,
    pub is_public: bool,
    pub support_emails: Vec<EmailAddress>,
}

/// Public view of a Provider
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderReadPublic {
    #[serde(flatten)]
    pub metadata: NodeMetadata,
    pub name: String,
}

impl From<ProviderRead> for ProviderReadPublic {
    fn from(provider: ProviderRead) -> Self {
        ProviderReadPublic {
            metadata: provider.metadata,
            name: provider.name,
        }
    }
}

/// View of a Provider with its whole relationship tree attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderReadExtended {
    #[serde(flatten)]
    pub provider: ProviderRead,
    pub identity_providers: Vec<IdentityProviderReadExtended>,
    pub projects: Vec<ProjectRead>,
    pub regions: Vec<RegionReadExtended>,
}

/// Public view of a Provider with its whole relationship tree attached
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ProviderReadExtendedPublic {
    #[serde(flatten)]
    pub provider: ProviderReadPublic,
    pub identity_providers: Vec<IdentityProviderReadExtendedPublic>,
    pub projects: Vec<ProjectRead>,
    pub regions: Vec<RegionReadExtendedPublic>,
}

impl From<ProviderReadExtended> for ProviderReadExtendedPublic {
    fn from(extended: ProviderReadExtended) -> Self {
        ProviderReadExtendedPublic {
            provider: extended.provider.into(),
            identity_providers: extended
                .identity_providers
                .into_iter()
                .map(Into::into)
                .collect(),
            projects: extended.projects,
            regions: extended.regions.into_iter().map(Into::into).collect(),
        }
    }
}
