// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manages a federation catalog -- the heart of the registry

use crate::datastore::{
    GraphStore, NewNode, NewRelationship, NodeRecord, RelationshipKind,
    TraversalQuery,
};
use fedreg_common::api::external::{
    CreateResult, DataPageParams, Error, ListResultVec, LookupResult,
    NodeMetadata, NodeMetadataCreateParams, PaginationOrder, ResourceType,
};
use fedreg_types::external_api::params;
use fedreg_types::external_api::views;
use fedreg_types::validation::{validate_provider_create, ValidationPolicy};
use serde::de::DeserializeOwned;
use serde_json::json;
use slog::{debug, info, Logger};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use uuid::Uuid;

/// Page size used when the registry scans its own catalog.
const SCAN_BATCH_SIZE: u32 = 100;

/// Manages a federation catalog backed by a [`GraphStore`]
///
/// A `Registry` owns no state of its own beyond its store handle: every
/// operation validates its input, persists through the store, and returns
/// the view assembled from what was written.
pub struct Registry {
    /// general server log
    log: Logger,
    /// persistent storage for the catalog graph
    datastore: Arc<dyn GraphStore>,
    /// payload validation knobs
    policy: ValidationPolicy,
}

/// Rebuild a view from a stored node by grafting the store-assigned uid
/// back onto the node's scalar properties.
fn node_view<T: DeserializeOwned>(record: NodeRecord) -> Result<T, Error> {
    let mut properties = record.properties;
    if let Some(map) = properties.as_object_mut() {
        map.insert("uid".to_string(), json!(record.uid));
    }
    serde_json::from_value(properties).map_err(Error::from)
}

fn view_metadata(
    uid: Uuid,
    create_metadata: &NodeMetadataCreateParams,
) -> NodeMetadata {
    NodeMetadata { uid, description: create_metadata.description.clone() }
}

impl Registry {
    pub fn new(
        log: Logger,
        datastore: Arc<dyn GraphStore>,
        policy: ValidationPolicy,
    ) -> Registry {
        Registry { log, datastore, policy }
    }

    /*
     * Providers
     */

    /// Validate and persist a whole provider tree.
    ///
    /// Nothing is written until the payload has validated as a whole, so a
    /// rejected request leaves the catalog untouched.
    pub async fn provider_create(
        &self,
        new_provider: &params::ProviderCreate,
    ) -> CreateResult<views::ProviderReadExtended> {
        validate_provider_create(new_provider, &self.policy)?;

        if self.provider_find_by_name(&new_provider.name).await?.is_some() {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Provider,
                object_name: new_provider.name.clone(),
            });
        }

        info!(self.log, "creating provider";
            "provider_name" => %new_provider.name);

        let provider_record = self
            .create_node(
                ResourceType::Provider,
                json!({
                    "description": new_provider.metadata.description,
                    "name": new_provider.name,
                    "type": new_provider.provider_type,
                    "status": new_provider.status,
                    "is_public": new_provider.is_public,
                    "support_emails": new_provider.support_emails,
                }),
            )
            .await?;
        let provider_uid = provider_record.uid;

        // Projects go in first: quotas, private resources and SLAs all
        // point at them.
        let mut project_nodes: HashMap<Uuid, Uuid> = HashMap::new();
        let mut projects = Vec::new();
        for project in &new_provider.projects {
            let record = self
                .create_node(
                    ResourceType::Project,
                    json!({
                        "description": project.metadata.description,
                        "name": project.name,
                        "uuid": project.uuid,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::OwnsProject,
                provider_uid,
                record.uid,
                None,
            )
            .await?;
            project_nodes.insert(project.uuid, record.uid);
            projects.push(views::ProjectRead {
                metadata: view_metadata(record.uid, &project.metadata),
                name: project.name.clone(),
                uuid: project.uuid,
            });
        }

        let mut identity_providers = Vec::new();
        for identity_provider in &new_provider.identity_providers {
            identity_providers.push(
                self.identity_provider_create(
                    provider_uid,
                    identity_provider,
                    &project_nodes,
                )
                .await?,
            );
        }

        let mut regions = Vec::new();
        for region in &new_provider.regions {
            regions.push(
                self.region_create(provider_uid, region, &project_nodes)
                    .await?,
            );
        }

        Ok(views::ProviderReadExtended {
            provider: views::ProviderRead {
                metadata: view_metadata(
                    provider_uid,
                    &new_provider.metadata,
                ),
                name: new_provider.name.clone(),
                provider_type: new_provider.provider_type,
                status: new_provider.status,
                is_public: new_provider.is_public,
                support_emails: new_provider.support_emails.clone(),
            },
            identity_providers,
            projects,
            regions,
        })
    }

    pub async fn provider_fetch(
        &self,
        uid: Uuid,
    ) -> LookupResult<views::ProviderRead> {
        let record =
            self.datastore.node_fetch(ResourceType::Provider, uid).await?;
        node_view(record)
    }

    pub async fn provider_list(
        &self,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<views::ProviderRead> {
        let records = self
            .datastore
            .nodes_list(ResourceType::Provider, pagparams)
            .await?;
        records.into_iter().map(node_view).collect()
    }

    /// List the projects a provider declared, through the store's traversal
    /// interface.
    pub async fn provider_projects_list(
        &self,
        provider_uid: Uuid,
    ) -> ListResultVec<views::ProjectRead> {
        self.datastore
            .node_fetch(ResourceType::Provider, provider_uid)
            .await?;
        let records = self
            .datastore
            .traverse(&TraversalQuery {
                start: provider_uid,
                path: vec![RelationshipKind::OwnsProject],
            })
            .await?;
        records.into_iter().map(node_view).collect()
    }

    async fn provider_find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Uuid>, Error> {
        let mut marker: Option<Uuid> = None;
        loop {
            let page = self
                .datastore
                .nodes_list(
                    ResourceType::Provider,
                    &DataPageParams {
                        marker: marker.as_ref(),
                        direction: PaginationOrder::Ascending,
                        limit: NonZeroU32::new(SCAN_BATCH_SIZE).unwrap(),
                    },
                )
                .await?;
            for record in &page {
                if record.properties["name"] == json!(name) {
                    return Ok(Some(record.uid));
                }
            }
            if page.len() < SCAN_BATCH_SIZE as usize {
                return Ok(None);
            }
            marker = page.last().map(|record| record.uid);
        }
    }

    /*
     * Identity providers
     */

    async fn identity_provider_create(
        &self,
        provider_uid: Uuid,
        new_identity_provider: &params::IdentityProviderCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::IdentityProviderReadExtended> {
        let record = self
            .create_node(
                ResourceType::IdentityProvider,
                json!({
                    "description":
                        new_identity_provider.metadata.description,
                    "endpoint": new_identity_provider.endpoint,
                    "group_claim": new_identity_provider.group_claim,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::AuthenticatesThrough,
            provider_uid,
            record.uid,
            Some(serde_json::to_value(&new_identity_provider.relationship)?),
        )
        .await?;

        let mut user_groups = Vec::new();
        for group in &new_identity_provider.user_groups {
            let group_record = self
                .create_node(
                    ResourceType::UserGroup,
                    json!({
                        "description": group.metadata.description,
                        "name": group.name,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::OwnsUserGroup,
                record.uid,
                group_record.uid,
                None,
            )
            .await?;

            let sla_record = self
                .create_node(
                    ResourceType::Sla,
                    json!({
                        "description": group.sla.metadata.description,
                        "doc_uuid": group.sla.doc_uuid,
                        "start_date": group.sla.start_date,
                        "end_date": group.sla.end_date,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::OwnsSla,
                group_record.uid,
                sla_record.uid,
                None,
            )
            .await?;
            self.create_relationship(
                RelationshipKind::PointsTo,
                sla_record.uid,
                self.project_node(project_nodes, group.sla.project)?,
                None,
            )
            .await?;

            user_groups.push(views::UserGroupReadExtended {
                group: views::UserGroupRead {
                    metadata: view_metadata(
                        group_record.uid,
                        &group.metadata,
                    ),
                    name: group.name.clone(),
                },
                slas: vec![views::SlaRead {
                    metadata: view_metadata(
                        sla_record.uid,
                        &group.sla.metadata,
                    ),
                    doc_uuid: group.sla.doc_uuid,
                    start_date: group.sla.start_date,
                    end_date: group.sla.end_date,
                }],
            });
        }

        Ok(views::IdentityProviderReadExtended {
            identity_provider: views::IdentityProviderRead {
                metadata: view_metadata(
                    record.uid,
                    &new_identity_provider.metadata,
                ),
                endpoint: new_identity_provider.endpoint.clone(),
                group_claim: new_identity_provider.group_claim.clone(),
            },
            relationship: new_identity_provider.relationship.clone(),
            user_groups,
        })
    }

    /*
     * Regions and services
     */

    async fn region_create(
        &self,
        provider_uid: Uuid,
        new_region: &params::RegionCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::RegionReadExtended> {
        let record = self
            .create_node(
                ResourceType::Region,
                json!({
                    "description": new_region.metadata.description,
                    "name": new_region.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::OwnsRegion,
            provider_uid,
            record.uid,
            None,
        )
        .await?;

        let location = match &new_region.location {
            None => None,
            Some(new_location) => {
                let location_record = self
                    .create_node(
                        ResourceType::Location,
                        json!({
                            "description": new_location.metadata.description,
                            "site": new_location.site,
                            "country": new_location.country,
                            "latitude": new_location.latitude,
                            "longitude": new_location.longitude,
                        }),
                    )
                    .await?;
                self.create_relationship(
                    RelationshipKind::LocatedAt,
                    record.uid,
                    location_record.uid,
                    None,
                )
                .await?;
                Some(views::LocationRead {
                    metadata: view_metadata(
                        location_record.uid,
                        &new_location.metadata,
                    ),
                    site: new_location.site.clone(),
                    country: new_location.country.clone(),
                    latitude: new_location.latitude,
                    longitude: new_location.longitude,
                })
            }
        };

        let mut services = Vec::new();
        for service in &new_region.block_storage_services {
            services.push(views::ServiceRead::BlockStorage(
                self.block_storage_service_create(
                    record.uid,
                    service,
                    project_nodes,
                )
                .await?,
            ));
        }
        for service in &new_region.compute_services {
            services.push(views::ServiceRead::Compute(
                self.compute_service_create(
                    record.uid,
                    service,
                    project_nodes,
                )
                .await?,
            ));
        }
        for service in &new_region.identity_services {
            services.push(views::ServiceRead::Identity(
                self.identity_service_create(record.uid, service).await?,
            ));
        }
        for service in &new_region.network_services {
            services.push(views::ServiceRead::Network(
                self.network_service_create(
                    record.uid,
                    service,
                    project_nodes,
                )
                .await?,
            ));
        }
        for service in &new_region.object_store_services {
            services.push(views::ServiceRead::ObjectStore(
                self.object_store_service_create(
                    record.uid,
                    service,
                    project_nodes,
                )
                .await?,
            ));
        }

        Ok(views::RegionReadExtended {
            region: views::RegionRead {
                metadata: view_metadata(record.uid, &new_region.metadata),
                name: new_region.name.clone(),
            },
            location,
            services,
        })
    }

    async fn block_storage_service_create(
        &self,
        region_uid: Uuid,
        new_service: &params::BlockStorageServiceCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::BlockStorageServiceReadExtended> {
        let record = self
            .create_node(
                ResourceType::BlockStorageService,
                json!({
                    "description": new_service.metadata.description,
                    "endpoint": new_service.endpoint,
                    "name": new_service.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::SuppliesService,
            region_uid,
            record.uid,
            None,
        )
        .await?;

        let mut quotas = Vec::new();
        for quota in &new_service.quotas {
            let quota_record = self
                .quota_create(
                    ResourceType::BlockStorageQuota,
                    record.uid,
                    json!({
                        "description": quota.metadata.description,
                        "per_user": quota.per_user,
                        "usage": quota.usage,
                        "gigabytes": quota.gigabytes,
                        "per_volume_gigabytes": quota.per_volume_gigabytes,
                        "volumes": quota.volumes,
                    }),
                    quota.project,
                    project_nodes,
                )
                .await?;
            quotas.push(views::BlockStorageQuotaRead {
                metadata: view_metadata(quota_record.uid, &quota.metadata),
                per_user: quota.per_user,
                usage: quota.usage,
                gigabytes: quota.gigabytes,
                per_volume_gigabytes: quota.per_volume_gigabytes,
                volumes: quota.volumes,
            });
        }

        Ok(views::BlockStorageServiceReadExtended {
            service: views::BlockStorageServiceRead {
                metadata: view_metadata(record.uid, &new_service.metadata),
                endpoint: new_service.endpoint.clone(),
                name: new_service.name,
            },
            quotas,
        })
    }

    async fn compute_service_create(
        &self,
        region_uid: Uuid,
        new_service: &params::ComputeServiceCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::ComputeServiceReadExtended> {
        let record = self
            .create_node(
                ResourceType::ComputeService,
                json!({
                    "description": new_service.metadata.description,
                    "endpoint": new_service.endpoint,
                    "name": new_service.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::SuppliesService,
            region_uid,
            record.uid,
            None,
        )
        .await?;

        let mut flavors = Vec::new();
        for flavor in &new_service.flavors {
            let flavor_record = self
                .create_node(
                    ResourceType::Flavor,
                    json!({
                        "description": flavor.metadata.description,
                        "name": flavor.name,
                        "uuid": flavor.uuid,
                        "disk": flavor.disk,
                        "is_public": flavor.is_public,
                        "ram": flavor.ram,
                        "vcpus": flavor.vcpus,
                        "swap": flavor.swap,
                        "ephemeral": flavor.ephemeral,
                        "infiniband": flavor.infiniband,
                        "gpus": flavor.gpus,
                        "gpu_model": flavor.gpu_model,
                        "gpu_vendor": flavor.gpu_vendor,
                        "local_storage": flavor.local_storage,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::SuppliesFlavor,
                record.uid,
                flavor_record.uid,
                None,
            )
            .await?;
            for project in &flavor.projects {
                self.create_relationship(
                    RelationshipKind::AccessibleTo,
                    flavor_record.uid,
                    self.project_node(project_nodes, *project)?,
                    None,
                )
                .await?;
            }
            flavors.push(views::FlavorRead {
                metadata: view_metadata(flavor_record.uid, &flavor.metadata),
                name: flavor.name.clone(),
                uuid: flavor.uuid,
                disk: flavor.disk,
                is_public: flavor.is_public,
                ram: flavor.ram,
                vcpus: flavor.vcpus,
                swap: flavor.swap,
                ephemeral: flavor.ephemeral,
                infiniband: flavor.infiniband,
                gpus: flavor.gpus,
                gpu_model: flavor.gpu_model.clone(),
                gpu_vendor: flavor.gpu_vendor.clone(),
                local_storage: flavor.local_storage.clone(),
            });
        }

        let mut images = Vec::new();
        for image in &new_service.images {
            let image_record = self
                .create_node(
                    ResourceType::Image,
                    json!({
                        "description": image.metadata.description,
                        "name": image.name,
                        "uuid": image.uuid,
                        "os_type": image.os_type,
                        "os_distro": image.os_distro,
                        "os_version": image.os_version,
                        "architecture": image.architecture,
                        "kernel_id": image.kernel_id,
                        "cuda_support": image.cuda_support,
                        "gpu_driver": image.gpu_driver,
                        "is_public": image.is_public,
                        "tags": image.tags,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::SuppliesImage,
                record.uid,
                image_record.uid,
                None,
            )
            .await?;
            for project in &image.projects {
                self.create_relationship(
                    RelationshipKind::AccessibleTo,
                    image_record.uid,
                    self.project_node(project_nodes, *project)?,
                    None,
                )
                .await?;
            }
            images.push(views::ImageRead {
                metadata: view_metadata(image_record.uid, &image.metadata),
                name: image.name.clone(),
                uuid: image.uuid,
                os_type: image.os_type.clone(),
                os_distro: image.os_distro.clone(),
                os_version: image.os_version.clone(),
                architecture: image.architecture.clone(),
                kernel_id: image.kernel_id.clone(),
                cuda_support: image.cuda_support,
                gpu_driver: image.gpu_driver,
                is_public: image.is_public,
                tags: image.tags.clone(),
            });
        }

        let mut quotas = Vec::new();
        for quota in &new_service.quotas {
            let quota_record = self
                .quota_create(
                    ResourceType::ComputeQuota,
                    record.uid,
                    json!({
                        "description": quota.metadata.description,
                        "per_user": quota.per_user,
                        "usage": quota.usage,
                        "cores": quota.cores,
                        "instances": quota.instances,
                        "ram": quota.ram,
                    }),
                    quota.project,
                    project_nodes,
                )
                .await?;
            quotas.push(views::ComputeQuotaRead {
                metadata: view_metadata(quota_record.uid, &quota.metadata),
                per_user: quota.per_user,
                usage: quota.usage,
                cores: quota.cores,
                instances: quota.instances,
                ram: quota.ram,
            });
        }

        Ok(views::ComputeServiceReadExtended {
            service: views::ComputeServiceRead {
                metadata: view_metadata(record.uid, &new_service.metadata),
                endpoint: new_service.endpoint.clone(),
                name: new_service.name,
            },
            flavors,
            images,
            quotas,
        })
    }

    async fn identity_service_create(
        &self,
        region_uid: Uuid,
        new_service: &params::IdentityServiceCreate,
    ) -> CreateResult<views::IdentityServiceRead> {
        let record = self
            .create_node(
                ResourceType::IdentityService,
                json!({
                    "description": new_service.metadata.description,
                    "endpoint": new_service.endpoint,
                    "name": new_service.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::SuppliesService,
            region_uid,
            record.uid,
            None,
        )
        .await?;
        Ok(views::IdentityServiceRead {
            metadata: view_metadata(record.uid, &new_service.metadata),
            endpoint: new_service.endpoint.clone(),
            name: new_service.name,
        })
    }

    async fn network_service_create(
        &self,
        region_uid: Uuid,
        new_service: &params::NetworkServiceCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::NetworkServiceReadExtended> {
        let record = self
            .create_node(
                ResourceType::NetworkService,
                json!({
                    "description": new_service.metadata.description,
                    "endpoint": new_service.endpoint,
                    "name": new_service.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::SuppliesService,
            region_uid,
            record.uid,
            None,
        )
        .await?;

        let mut networks = Vec::new();
        for network in &new_service.networks {
            let network_record = self
                .create_node(
                    ResourceType::Network,
                    json!({
                        "description": network.metadata.description,
                        "name": network.name,
                        "uuid": network.uuid,
                        "is_shared": network.is_shared,
                        "is_router_external": network.is_router_external,
                        "is_default": network.is_default,
                        "mtu": network.mtu,
                        "proxy_host": network.proxy_host,
                        "proxy_user": network.proxy_user,
                        "tags": network.tags,
                    }),
                )
                .await?;
            self.create_relationship(
                RelationshipKind::SuppliesNetwork,
                record.uid,
                network_record.uid,
                None,
            )
            .await?;
            for project in &network.projects {
                self.create_relationship(
                    RelationshipKind::AccessibleTo,
                    network_record.uid,
                    self.project_node(project_nodes, *project)?,
                    None,
                )
                .await?;
            }
            networks.push(views::NetworkRead {
                metadata: view_metadata(
                    network_record.uid,
                    &network.metadata,
                ),
                name: network.name.clone(),
                uuid: network.uuid,
                is_shared: network.is_shared,
                is_router_external: network.is_router_external,
                is_default: network.is_default,
                mtu: network.mtu,
                proxy_host: network.proxy_host.clone(),
                proxy_user: network.proxy_user.clone(),
                tags: network.tags.clone(),
            });
        }

        let mut quotas = Vec::new();
        for quota in &new_service.quotas {
            let quota_record = self
                .quota_create(
                    ResourceType::NetworkQuota,
                    record.uid,
                    json!({
                        "description": quota.metadata.description,
                        "per_user": quota.per_user,
                        "usage": quota.usage,
                        "public_ips": quota.public_ips,
                        "networks": quota.networks,
                        "ports": quota.ports,
                        "security_groups": quota.security_groups,
                        "security_group_rules": quota.security_group_rules,
                    }),
                    quota.project,
                    project_nodes,
                )
                .await?;
            quotas.push(views::NetworkQuotaRead {
                metadata: view_metadata(quota_record.uid, &quota.metadata),
                per_user: quota.per_user,
                usage: quota.usage,
                public_ips: quota.public_ips,
                networks: quota.networks,
                ports: quota.ports,
                security_groups: quota.security_groups,
                security_group_rules: quota.security_group_rules,
            });
        }

        Ok(views::NetworkServiceReadExtended {
            service: views::NetworkServiceRead {
                metadata: view_metadata(record.uid, &new_service.metadata),
                endpoint: new_service.endpoint.clone(),
                name: new_service.name,
            },
            networks,
            quotas,
        })
    }

    async fn object_store_service_create(
        &self,
        region_uid: Uuid,
        new_service: &params::ObjectStoreServiceCreate,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<views::ObjectStoreServiceReadExtended> {
        let record = self
            .create_node(
                ResourceType::ObjectStoreService,
                json!({
                    "description": new_service.metadata.description,
                    "endpoint": new_service.endpoint,
                    "name": new_service.name,
                }),
            )
            .await?;
        self.create_relationship(
            RelationshipKind::SuppliesService,
            region_uid,
            record.uid,
            None,
        )
        .await?;

        let mut quotas = Vec::new();
        for quota in &new_service.quotas {
            let quota_record = self
                .quota_create(
                    ResourceType::ObjectStoreQuota,
                    record.uid,
                    json!({
                        "description": quota.metadata.description,
                        "per_user": quota.per_user,
                        "usage": quota.usage,
                        "bytes": quota.bytes,
                        "containers": quota.containers,
                        "objects": quota.objects,
                    }),
                    quota.project,
                    project_nodes,
                )
                .await?;
            quotas.push(views::ObjectStoreQuotaRead {
                metadata: view_metadata(quota_record.uid, &quota.metadata),
                per_user: quota.per_user,
                usage: quota.usage,
                bytes: quota.bytes,
                containers: quota.containers,
                objects: quota.objects,
            });
        }

        Ok(views::ObjectStoreServiceReadExtended {
            service: views::ObjectStoreServiceRead {
                metadata: view_metadata(record.uid, &new_service.metadata),
                endpoint: new_service.endpoint.clone(),
                name: new_service.name,
            },
            quotas,
        })
    }

    /*
     * Shared plumbing
     */

    /// Create one quota node, hang it off its service and, when
    /// project-scoped, link it to its target project.
    async fn quota_create(
        &self,
        label: ResourceType,
        service_uid: Uuid,
        properties: serde_json::Value,
        project: Option<Uuid>,
        project_nodes: &HashMap<Uuid, Uuid>,
    ) -> CreateResult<NodeRecord> {
        let record = self.create_node(label, properties).await?;
        self.create_relationship(
            RelationshipKind::OwnsQuota,
            service_uid,
            record.uid,
            None,
        )
        .await?;
        if let Some(project) = project {
            self.create_relationship(
                RelationshipKind::AppliesTo,
                record.uid,
                self.project_node(project_nodes, project)?,
                None,
            )
            .await?;
        }
        Ok(record)
    }

    async fn create_node(
        &self,
        label: ResourceType,
        properties: serde_json::Value,
    ) -> CreateResult<NodeRecord> {
        let record = self
            .datastore
            .node_create(NewNode { label, properties })
            .await?;
        debug!(self.log, "created node";
            "label" => %record.label,
            "uid" => %record.uid);
        Ok(record)
    }

    async fn create_relationship(
        &self,
        kind: RelationshipKind,
        from: Uuid,
        to: Uuid,
        properties: Option<serde_json::Value>,
    ) -> CreateResult<()> {
        self.datastore
            .relationship_create(NewRelationship {
                kind,
                from,
                to,
                properties,
            })
            .await
    }

    /// Map a payload-level project UUID to the uid of the node just created
    /// for it.  Validation has already proven membership, so a miss here is
    /// an internal invariant violation.
    fn project_node(
        &self,
        project_nodes: &HashMap<Uuid, Uuid>,
        project: Uuid,
    ) -> Result<Uuid, Error> {
        project_nodes.get(&project).copied().ok_or_else(|| {
            Error::internal_error(&format!(
                "project {} missing from created node map",
                project
            ))
        })
    }
}
