// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Create-time validation of the nested provider payload.
//!
//! A [`ProviderCreate`] body arrives as one tree: the provider's
//! projects, its regions with their services, the resources and quotas
//! hanging off those services, and its identity providers with their user
//! groups and SLAs.  Nothing is persisted until the whole tree has been
//! found internally consistent, so validation is a pure function of the
//! payload.
//!
//! It runs in two phases:
//!
//! 1. local checks, leaf to root: sibling lists must not repeat names,
//!    UUIDs or endpoints; private resources must name their projects and
//!    public ones must not; a service gets at most one project-wide and one
//!    per-user quota per project; SLA documents and SLA target projects may
//!    appear once across the whole payload.
//!
//! 2. a single cross-reference pass: the provider's declared project UUID
//!    set is collected once and threaded through the walk as explicit
//!    context, and every project reference found anywhere in the tree must
//!    be a member.
//!
//! Every check reports through [`Error::InvalidValue`] naming the failing
//! field and the offending value; the first violation encountered wins.

use crate::external_api::params::{
    BlockStorageQuotaCreate, BlockStorageServiceCreate, ComputeQuotaCreate,
    ComputeServiceCreate, FlavorCreate, IdentityProviderCreate,
    IdentityServiceCreate, ImageCreate, NetworkCreate, NetworkQuotaCreate,
    NetworkServiceCreate, ObjectStoreQuotaCreate, ObjectStoreServiceCreate,
    ProjectCreate, ProviderCreate, RegionCreate, SlaCreate,
};
use fedreg_common::api::external::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use uuid::Uuid;

fn default_true() -> bool {
    true
}

/// Knobs deciding payload shapes the catalog generations disagree on
///
/// These deserialize from the `[validation]` table of the registry
/// configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ValidationPolicy {
    /// Reject identity providers whose user group list is empty.
    #[serde(default)]
    pub require_user_groups: bool,
    /// Accept quotas with no target project.  Such quotas describe
    /// service-wide policy and are skipped by the per-project cardinality
    /// check.
    #[serde(default = "default_true")]
    pub allow_service_level_quotas: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            require_user_groups: false,
            allow_service_level_quotas: true,
        }
    }
}

/// Validate a whole `ProviderCreate` tree.
///
/// On success the payload is safe to hand to the persistence layer as-is.
/// On failure the returned error names the first violated constraint; later
/// violations are not aggregated.
pub fn validate_provider_create(
    provider: &ProviderCreate,
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    // Phase 1: every node and sibling list is checked locally.
    validate_projects(&provider.projects)?;
    validate_regions(&provider.regions, policy)?;
    validate_identity_providers(&provider.identity_providers, policy)?;

    // Phase 2: one pass over the tree with the declared project set as
    // context.
    let projects = ProjectSet::new(&provider.projects);
    check_project_references(provider, &projects)
}

/// Fails when two items in `items` share a value for the attribute
/// extracted by `key`.  Order-insensitive: only the duplicated value is
/// reported, never its position.
fn find_duplicates<'a, T, K, F>(
    items: &'a [T],
    attr: &str,
    key: F,
) -> Result<(), Error>
where
    F: Fn(&'a T) -> K,
    K: Eq + Hash + Display,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let value = key(item);
        if seen.contains(&value) {
            return Err(Error::invalid_value(
                attr,
                format!(
                    "There are multiple items with identical {}: {}",
                    attr, value
                ),
            ));
        }
        seen.insert(value);
    }
    Ok(())
}

/// Like [`find_duplicates`], for lists of plain values.
fn find_duplicate_values<K>(values: &[K], attr: &str) -> Result<(), Error>
where
    K: Eq + Hash + Display,
{
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        if !seen.insert(value) {
            return Err(Error::invalid_value(
                attr,
                format!("There are multiple identical items: {}", value),
            ));
        }
    }
    Ok(())
}

fn limit_at_least(
    field: &'static str,
    value: Option<i64>,
    min: i64,
) -> Result<(), Error> {
    match value {
        Some(v) if v < min => Err(Error::invalid_value(
            field,
            format!("{} must be at least {}, got {}", field, min, v),
        )),
        _ => Ok(()),
    }
}

/// Field access shared by the four quota kinds so the per-project
/// cardinality check can stay generic.
trait ProjectScopedQuota {
    /// How this quota kind is named in error messages.
    const KIND: &'static str;

    fn per_user(&self) -> bool;
    fn project(&self) -> Option<Uuid>;
    fn check_limits(&self) -> Result<(), Error>;
}

impl ProjectScopedQuota for BlockStorageQuotaCreate {
    const KIND: &'static str = "Block Storage quota";

    fn per_user(&self) -> bool {
        self.per_user
    }
    fn project(&self) -> Option<Uuid> {
        self.project
    }
    fn check_limits(&self) -> Result<(), Error> {
        limit_at_least("gigabytes", self.gigabytes, -1)?;
        limit_at_least("per_volume_gigabytes", self.per_volume_gigabytes, -1)?;
        limit_at_least("volumes", self.volumes, -1)
    }
}

impl ProjectScopedQuota for ComputeQuotaCreate {
    const KIND: &'static str = "Compute quota";

    fn per_user(&self) -> bool {
        self.per_user
    }
    fn project(&self) -> Option<Uuid> {
        self.project
    }
    fn check_limits(&self) -> Result<(), Error> {
        limit_at_least("cores", self.cores, 0)?;
        limit_at_least("instances", self.instances, 0)?;
        limit_at_least("ram", self.ram, 0)
    }
}

impl ProjectScopedQuota for NetworkQuotaCreate {
    const KIND: &'static str = "Network quota";

    fn per_user(&self) -> bool {
        self.per_user
    }
    fn project(&self) -> Option<Uuid> {
        self.project
    }
    fn check_limits(&self) -> Result<(), Error> {
        limit_at_least("public_ips", self.public_ips, -1)?;
        limit_at_least("networks", self.networks, -1)?;
        limit_at_least("ports", self.ports, -1)?;
        limit_at_least("security_groups", self.security_groups, -1)?;
        limit_at_least("security_group_rules", self.security_group_rules, -1)
    }
}

impl ProjectScopedQuota for ObjectStoreQuotaCreate {
    const KIND: &'static str = "Object Storage quota";

    fn per_user(&self) -> bool {
        self.per_user
    }
    fn project(&self) -> Option<Uuid> {
        self.project
    }
    fn check_limits(&self) -> Result<(), Error> {
        limit_at_least("bytes", Some(self.bytes), -1)?;
        limit_at_least("containers", Some(self.containers), -1)?;
        limit_at_least("objects", Some(self.objects), -1)
    }
}

/// Enforce "at most one project-wide and one per-user quota per project" on
/// the quota list of a single service.
///
/// A project may carry one quota with `per_user` unset and one with it set;
/// a second quota with the same flag (which also covers any third quota) is
/// rejected.  Quotas without a target project are skipped, or rejected
/// outright when the policy disables them.
fn check_quota_list<Q: ProjectScopedQuota>(
    quotas: &[Q],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    let mut seen: HashSet<(Uuid, bool)> = HashSet::new();
    for quota in quotas {
        quota.check_limits()?;
        let Some(project) = quota.project() else {
            if !policy.allow_service_level_quotas {
                return Err(Error::invalid_value(
                    "project",
                    format!(
                        "{} has no target project and service-level quotas \
                         are disabled",
                        Q::KIND
                    ),
                ));
            }
            continue;
        };
        if !seen.insert((project, quota.per_user())) {
            return Err(Error::invalid_value(
                "quotas",
                format!("Multiple quotas on same project {}", project),
            ));
        }
    }
    Ok(())
}

/// Check a flavor's own consistency: distinct project references, GPU
/// attributes only on GPU flavors, and project visibility matching
/// `is_public`.
fn validate_flavor(flavor: &FlavorCreate) -> Result<(), Error> {
    find_duplicate_values(&flavor.projects, "projects")?;
    if flavor.gpus == 0 {
        if flavor.gpu_model.is_some() {
            return Err(Error::invalid_value(
                "gpu_model",
                "'GPU model' must be None if 'Num GPUs' is 0".to_string(),
            ));
        }
        if flavor.gpu_vendor.is_some() {
            return Err(Error::invalid_value(
                "gpu_vendor",
                "'GPU vendor' must be None if 'Num GPUs' is 0".to_string(),
            ));
        }
    }
    if !flavor.is_public {
        if flavor.projects.is_empty() {
            return Err(Error::invalid_value(
                "projects",
                "Projects are mandatory for private flavors".to_string(),
            ));
        }
    } else if !flavor.projects.is_empty() {
        return Err(Error::invalid_value(
            "projects",
            "Public flavors do not have linked projects".to_string(),
        ));
    }
    Ok(())
}

fn validate_image(image: &ImageCreate) -> Result<(), Error> {
    find_duplicate_values(&image.projects, "projects")?;
    if !image.is_public {
        if image.projects.is_empty() {
            return Err(Error::invalid_value(
                "projects",
                "Projects are mandatory for private images".to_string(),
            ));
        }
    } else if !image.projects.is_empty() {
        return Err(Error::invalid_value(
            "projects",
            "Public images do not have linked projects".to_string(),
        ));
    }
    Ok(())
}

fn validate_network(network: &NetworkCreate) -> Result<(), Error> {
    find_duplicate_values(&network.projects, "projects")?;
    if !network.is_shared {
        if network.projects.is_empty() {
            return Err(Error::invalid_value(
                "projects",
                "Projects are mandatory for private networks".to_string(),
            ));
        }
    } else if !network.projects.is_empty() {
        return Err(Error::invalid_value(
            "projects",
            "Shared networks do not have linked projects".to_string(),
        ));
    }
    Ok(())
}

fn validate_block_storage_services(
    services: &[BlockStorageServiceCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(services, "endpoint", |s| &s.endpoint)?;
    for service in services {
        check_quota_list(&service.quotas, policy)?;
    }
    Ok(())
}

fn validate_compute_services(
    services: &[ComputeServiceCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(services, "endpoint", |s| &s.endpoint)?;
    for service in services {
        find_duplicates(&service.flavors, "uuid", |f| f.uuid)?;
        find_duplicates(&service.flavors, "name", |f| &f.name)?;
        for flavor in &service.flavors {
            validate_flavor(flavor)?;
        }
        find_duplicates(&service.images, "uuid", |i| i.uuid)?;
        find_duplicates(&service.images, "name", |i| &i.name)?;
        for image in &service.images {
            validate_image(image)?;
        }
        check_quota_list(&service.quotas, policy)?;
    }
    Ok(())
}

fn validate_identity_services(
    services: &[IdentityServiceCreate],
) -> Result<(), Error> {
    find_duplicates(services, "endpoint", |s| &s.endpoint)
}

fn validate_network_services(
    services: &[NetworkServiceCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(services, "endpoint", |s| &s.endpoint)?;
    for service in services {
        find_duplicates(&service.networks, "uuid", |n| n.uuid)?;
        for network in &service.networks {
            validate_network(network)?;
        }
        check_quota_list(&service.quotas, policy)?;
    }
    Ok(())
}

fn validate_object_store_services(
    services: &[ObjectStoreServiceCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(services, "endpoint", |s| &s.endpoint)?;
    for service in services {
        check_quota_list(&service.quotas, policy)?;
    }
    Ok(())
}

fn validate_regions(
    regions: &[RegionCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(regions, "name", |r| &r.name)?;
    for region in regions {
        validate_block_storage_services(
            &region.block_storage_services,
            policy,
        )?;
        validate_compute_services(&region.compute_services, policy)?;
        validate_identity_services(&region.identity_services)?;
        validate_network_services(&region.network_services, policy)?;
        validate_object_store_services(
            &region.object_store_services,
            policy,
        )?;
    }
    Ok(())
}

fn validate_projects(projects: &[ProjectCreate]) -> Result<(), Error> {
    find_duplicates(projects, "uuid", |p| p.uuid)?;
    find_duplicates(projects, "name", |p| &p.name)
}

fn validate_sla(sla: &SlaCreate) -> Result<(), Error> {
    if sla.start_date >= sla.end_date {
        return Err(Error::invalid_value(
            "end_date",
            format!(
                "Start date {} greater or equal than end date {}",
                sla.start_date, sla.end_date
            ),
        ));
    }
    Ok(())
}

/// Validate the identity providers of one payload, including the checks
/// that span all of them: an SLA document may back only one user group and
/// a project may be the target of only one SLA, across the whole payload.
fn validate_identity_providers(
    identity_providers: &[IdentityProviderCreate],
    policy: &ValidationPolicy,
) -> Result<(), Error> {
    find_duplicates(identity_providers, "endpoint", |i| &i.endpoint)?;
    for identity_provider in identity_providers {
        if policy.require_user_groups
            && identity_provider.user_groups.is_empty()
        {
            return Err(Error::invalid_value(
                "user_groups",
                "Identity provider's user group list can't be empty"
                    .to_string(),
            ));
        }
        find_duplicates(&identity_provider.user_groups, "name", |g| &g.name)?;
        for user_group in &identity_provider.user_groups {
            validate_sla(&user_group.sla)?;
        }
    }

    // One left-to-right pass in payload declaration order; the first
    // occurrence always wins and any repeat fails immediately.
    let mut seen_slas = HashSet::new();
    let mut seen_projects = HashSet::new();
    for identity_provider in identity_providers {
        for user_group in &identity_provider.user_groups {
            if !seen_slas.insert(user_group.sla.doc_uuid) {
                return Err(Error::invalid_value(
                    "doc_uuid",
                    format!(
                        "SLA {} already used by another user group",
                        user_group.sla.doc_uuid
                    ),
                ));
            }
            if !seen_projects.insert(user_group.sla.project) {
                return Err(Error::invalid_value(
                    "project",
                    format!(
                        "Project {} already used by another SLA",
                        user_group.sla.project
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// The provider's declared project UUIDs: a membership set for the checks
/// and the declaration-ordered list for error messages.
struct ProjectSet {
    ordered: Vec<String>,
    members: HashSet<Uuid>,
}

impl ProjectSet {
    fn new(projects: &[ProjectCreate]) -> ProjectSet {
        ProjectSet {
            ordered: projects.iter().map(|p| p.uuid.to_string()).collect(),
            members: projects.iter().map(|p| p.uuid).collect(),
        }
    }

    fn check_member(&self, project: Uuid, parent: &str) -> Result<(), Error> {
        if !self.members.contains(&project) {
            return Err(Error::invalid_value(
                "project",
                format!(
                    "{}'s project {} not in this provider: {:?}",
                    parent, project, self.ordered
                ),
            ));
        }
        Ok(())
    }
}

/// Phase 2: walk every project reference in the tree and require it to be a
/// member of the provider's declared project set.
fn check_project_references(
    provider: &ProviderCreate,
    projects: &ProjectSet,
) -> Result<(), Error> {
    for identity_provider in &provider.identity_providers {
        for user_group in &identity_provider.user_groups {
            projects.check_member(
                user_group.sla.project,
                &format!("SLA {}", user_group.sla.doc_uuid),
            )?;
        }
    }
    for region in &provider.regions {
        for service in &region.block_storage_services {
            for quota in &service.quotas {
                if let Some(project) = quota.project {
                    projects
                        .check_member(project, BlockStorageQuotaCreate::KIND)?;
                }
            }
        }
        for service in &region.compute_services {
            for flavor in &service.flavors {
                for project in &flavor.projects {
                    projects.check_member(
                        *project,
                        &format!("Flavor {}", flavor.name),
                    )?;
                }
            }
            for image in &service.images {
                for project in &image.projects {
                    projects.check_member(
                        *project,
                        &format!("Image {}", image.name),
                    )?;
                }
            }
            for quota in &service.quotas {
                if let Some(project) = quota.project {
                    projects.check_member(project, ComputeQuotaCreate::KIND)?;
                }
            }
        }
        for service in &region.network_services {
            for network in &service.networks {
                for project in &network.projects {
                    projects.check_member(
                        *project,
                        &format!("Network {}", network.name),
                    )?;
                }
            }
            for quota in &service.quotas {
                if let Some(project) = quota.project {
                    projects.check_member(project, NetworkQuotaCreate::KIND)?;
                }
            }
        }
        for service in &region.object_store_services {
            for quota in &service.quotas {
                if let Some(project) = quota.project {
                    projects
                        .check_member(project, ObjectStoreQuotaCreate::KIND)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::external_api::params::{
        IdentityProviderCreate, ProjectCreate, UserGroupCreate,
    };
    use crate::external_api::shared;
    use chrono::NaiveDate;
    use fedreg_common::api::external::NodeMetadataCreateParams;
    use url::Url;

    fn project(name: &str, uuid: Uuid) -> ProjectCreate {
        ProjectCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            uuid,
        }
    }

    fn compute_quota(project: Option<Uuid>, per_user: bool) -> ComputeQuotaCreate {
        ComputeQuotaCreate {
            metadata: NodeMetadataCreateParams::default(),
            per_user,
            usage: false,
            cores: Some(8),
            instances: Some(10),
            ram: Some(16384),
            project,
        }
    }

    fn flavor(name: &str, uuid: Uuid) -> FlavorCreate {
        FlavorCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            uuid,
            disk: 20,
            is_public: true,
            ram: 4096,
            vcpus: 2,
            swap: 0,
            ephemeral: 0,
            infiniband: false,
            gpus: 0,
            gpu_model: None,
            gpu_vendor: None,
            local_storage: None,
            projects: vec![],
        }
    }

    fn image(name: &str, uuid: Uuid) -> ImageCreate {
        ImageCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            uuid,
            os_type: Some("linux".to_string()),
            os_distro: None,
            os_version: None,
            architecture: None,
            kernel_id: None,
            cuda_support: false,
            gpu_driver: false,
            is_public: true,
            tags: vec![],
            projects: vec![],
        }
    }

    fn network(name: &str, uuid: Uuid) -> NetworkCreate {
        NetworkCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            uuid,
            is_shared: true,
            is_router_external: false,
            is_default: false,
            mtu: Some(1500),
            proxy_host: None,
            proxy_user: None,
            tags: vec![],
            projects: vec![],
        }
    }

    fn compute_service(endpoint: &str) -> ComputeServiceCreate {
        ComputeServiceCreate {
            metadata: NodeMetadataCreateParams::default(),
            endpoint: Url::parse(endpoint).unwrap(),
            name: shared::ComputeServiceName::OpenstackNova,
            flavors: vec![],
            images: vec![],
            quotas: vec![],
        }
    }

    fn region(name: &str) -> RegionCreate {
        RegionCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            location: None,
            block_storage_services: vec![],
            compute_services: vec![],
            identity_services: vec![],
            network_services: vec![],
            object_store_services: vec![],
        }
    }

    fn sla(doc_uuid: Uuid, project: Uuid) -> SlaCreate {
        SlaCreate {
            metadata: NodeMetadataCreateParams::default(),
            doc_uuid,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            project,
        }
    }

    fn user_group(name: &str, sla: SlaCreate) -> UserGroupCreate {
        UserGroupCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: name.to_string(),
            sla,
        }
    }

    fn identity_provider(
        endpoint: &str,
        user_groups: Vec<UserGroupCreate>,
    ) -> IdentityProviderCreate {
        IdentityProviderCreate {
            metadata: NodeMetadataCreateParams::default(),
            endpoint: Url::parse(endpoint).unwrap(),
            group_claim: "groups".to_string(),
            relationship: shared::AuthMethod {
                idp_name: "egi".to_string(),
                protocol: "openid".to_string(),
            },
            user_groups,
        }
    }

    fn provider(
        projects: Vec<ProjectCreate>,
        identity_providers: Vec<IdentityProviderCreate>,
        regions: Vec<RegionCreate>,
    ) -> ProviderCreate {
        ProviderCreate {
            metadata: NodeMetadataCreateParams::default(),
            name: "example-site".to_string(),
            provider_type: shared::ProviderType::Openstack,
            status: shared::ProviderStatus::Active,
            is_public: false,
            support_emails: vec![],
            projects,
            identity_providers,
            regions,
        }
    }

    fn message(error: Error) -> String {
        match error {
            Error::InvalidValue { message, .. } => message,
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    const P1: Uuid = Uuid::from_u128(0xa1);
    const P2: Uuid = Uuid::from_u128(0xa2);

    #[test]
    fn test_quota_pair_on_same_project_accepted() {
        // Exactly the allowed pair: one project-wide, one per-user.
        let quotas =
            vec![compute_quota(Some(P1), false), compute_quota(Some(P1), true)];
        check_quota_list(&quotas, &ValidationPolicy::default()).unwrap();
    }

    #[test]
    fn test_third_quota_on_same_project_rejected() {
        // Any combination of three per_user flags repeats one of them.
        for flags in [
            [false, true, false],
            [false, true, true],
            [false, false, false],
            [true, true, true],
        ] {
            let quotas: Vec<_> = flags
                .iter()
                .map(|per_user| compute_quota(Some(P1), *per_user))
                .collect();
            let error =
                check_quota_list(&quotas, &ValidationPolicy::default())
                    .unwrap_err();
            assert_eq!(
                message(error),
                format!("Multiple quotas on same project {}", P1)
            );
        }
    }

    #[test]
    fn test_quotas_on_distinct_projects_never_conflict() {
        // With unique target projects the cardinality check cannot fire,
        // regardless of the per_user/usage settings.
        let mut quotas = vec![];
        for (i, per_user) in [true, false, true, false].iter().enumerate() {
            let mut quota =
                compute_quota(Some(Uuid::from_u128(0xb0 + i as u128)), *per_user);
            quota.usage = i % 2 == 0;
            quotas.push(quota);
        }
        check_quota_list(&quotas, &ValidationPolicy::default()).unwrap();
    }

    #[test]
    fn test_service_level_quota_policy() {
        let quotas = vec![compute_quota(None, false), compute_quota(None, true)];
        // Default policy: accepted and exempt from the per-project rule.
        check_quota_list(&quotas, &ValidationPolicy::default()).unwrap();
        // Strict policy: rejected outright.
        let policy = ValidationPolicy {
            allow_service_level_quotas: false,
            ..Default::default()
        };
        let error = check_quota_list(&quotas, &policy).unwrap_err();
        assert_eq!(
            message(error),
            "Compute quota has no target project and service-level quotas \
             are disabled"
        );
    }

    #[test]
    fn test_quota_limit_range() {
        let mut quota = compute_quota(Some(P1), false);
        quota.cores = Some(-1);
        let error = check_quota_list(&[quota], &ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(message(error), "cores must be at least 0, got -1");
    }

    #[test]
    fn test_duplicate_region_names() {
        let error =
            validate_regions(&[region("east"), region("east")], &Default::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical name: east"
        );
    }

    #[test]
    fn test_duplicate_detection_is_order_insensitive() {
        let items =
            vec![region("east"), region("west"), region("north"), region("east")];
        let mut reversed: Vec<RegionCreate> = items.clone();
        reversed.reverse();
        for list in [items, reversed] {
            let error = find_duplicates(&list, "name", |r| &r.name).unwrap_err();
            assert_eq!(
                message(error),
                "There are multiple items with identical name: east"
            );
        }
    }

    #[test]
    fn test_flavor_visibility_round_trip() {
        // Private with projects: fine.
        let mut flavor = flavor("m1.small", Uuid::from_u128(0xf1));
        flavor.is_public = false;
        flavor.projects = vec![P1];
        validate_flavor(&flavor).unwrap();

        // Flipping to public without clearing the list must fail.
        flavor.is_public = true;
        assert_eq!(
            message(validate_flavor(&flavor).unwrap_err()),
            "Public flavors do not have linked projects"
        );

        // Clearing the list makes it pass again.
        flavor.projects = vec![];
        validate_flavor(&flavor).unwrap();

        // And a private flavor without projects is the mirror failure.
        flavor.is_public = false;
        assert_eq!(
            message(validate_flavor(&flavor).unwrap_err()),
            "Projects are mandatory for private flavors"
        );
    }

    #[test]
    fn test_network_visibility() {
        let mut net = network("tenant-net", Uuid::from_u128(0xe1));
        net.is_shared = false;
        assert_eq!(
            message(validate_network(&net).unwrap_err()),
            "Projects are mandatory for private networks"
        );
        net.projects = vec![P1];
        validate_network(&net).unwrap();
        net.is_shared = true;
        assert_eq!(
            message(validate_network(&net).unwrap_err()),
            "Shared networks do not have linked projects"
        );
    }

    #[test]
    fn test_flavor_gpu_consistency() {
        let mut f = flavor("gpu.small", Uuid::from_u128(0xf2));
        f.gpu_model = Some("a100".to_string());
        assert_eq!(
            message(validate_flavor(&f).unwrap_err()),
            "'GPU model' must be None if 'Num GPUs' is 0"
        );
        f.gpus = 2;
        validate_flavor(&f).unwrap();
    }

    #[test]
    fn test_image_visibility_and_duplicates() {
        let mut img = image("rocky-9", Uuid::from_u128(0x91));
        img.is_public = false;
        assert_eq!(
            message(validate_image(&img).unwrap_err()),
            "Projects are mandatory for private images"
        );
        img.projects = vec![P1, P1];
        assert_eq!(
            message(validate_image(&img).unwrap_err()),
            format!("There are multiple identical items: {}", P1)
        );
        img.projects = vec![P1];
        validate_image(&img).unwrap();

        let mut service = compute_service("https://nova.example.org:8774");
        service.images = vec![
            image("rocky-9", Uuid::from_u128(0x91)),
            image("rocky-9", Uuid::from_u128(0x92)),
        ];
        let error =
            validate_compute_services(&[service], &Default::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical name: rocky-9"
        );
    }

    #[test]
    fn test_duplicate_flavor_uuid_in_service() {
        let mut service = compute_service("https://nova.example.org:8774");
        service.flavors = vec![
            flavor("m1.small", Uuid::from_u128(0xf1)),
            flavor("m1.large", Uuid::from_u128(0xf1)),
        ];
        let error =
            validate_compute_services(&[service], &Default::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            format!(
                "There are multiple items with identical uuid: {}",
                Uuid::from_u128(0xf1)
            )
        );
    }

    #[test]
    fn test_duplicate_service_endpoints() {
        let services = vec![
            compute_service("https://nova.example.org:8774/"),
            compute_service("https://nova.example.org:8774/"),
        ];
        let error =
            validate_compute_services(&services, &Default::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical endpoint: \
             https://nova.example.org:8774/"
        );
    }

    #[test]
    fn test_cross_reference_outside_project_set() {
        // A private flavor pointing at a project the provider never
        // declared.
        let mut service = compute_service("https://nova.example.org:8774");
        let mut f = flavor("m1.private", Uuid::from_u128(0xf3));
        f.is_public = false;
        f.projects = vec![P2];
        service.flavors = vec![f];
        let mut r = region("east");
        r.compute_services = vec![service];
        let p = provider(vec![project("astro", P1)], vec![], vec![r]);

        let error = validate_provider_create(&p, &ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(
            message(error),
            format!(
                "Flavor m1.private's project {} not in this provider: {:?}",
                P2,
                vec![P1.to_string()]
            )
        );
    }

    #[test]
    fn test_cross_reference_closure_under_declared_set() {
        // Every reference drawn from the declared set: validation passes.
        // Mutating any single reference to an undeclared UUID makes it
        // fail.
        let mut service = compute_service("https://nova.example.org:8774");
        let mut f = flavor("m1.private", Uuid::from_u128(0xf3));
        f.is_public = false;
        f.projects = vec![P1];
        service.flavors = vec![f];
        service.quotas = vec![compute_quota(Some(P2), false)];
        let mut r = region("east");
        r.compute_services = vec![service];
        let idp = identity_provider(
            "https://idp.example.org",
            vec![user_group("ops", sla(Uuid::from_u128(0x51), P1))],
        );
        let p = provider(
            vec![project("astro", P1), project("bio", P2)],
            vec![idp],
            vec![r],
        );
        validate_provider_create(&p, &ValidationPolicy::default()).unwrap();

        let mut broken = p.clone();
        broken.regions[0].compute_services[0].quotas[0].project =
            Some(Uuid::from_u128(0xdead));
        let error =
            validate_provider_create(&broken, &ValidationPolicy::default())
                .unwrap_err();
        assert!(message(error).contains("not in this provider"));
    }

    #[test]
    fn test_sla_reused_across_identity_providers() {
        let doc = Uuid::from_u128(0x51);
        let idps = vec![
            identity_provider(
                "https://idp-one.example.org",
                vec![user_group("ops", sla(doc, P1))],
            ),
            identity_provider(
                "https://idp-two.example.org",
                vec![user_group("devs", sla(doc, P2))],
            ),
        ];
        let p = provider(
            vec![project("astro", P1), project("bio", P2)],
            idps,
            vec![],
        );
        let error = validate_provider_create(&p, &ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(
            message(error),
            format!("SLA {} already used by another user group", doc)
        );
    }

    #[test]
    fn test_sla_target_project_reused() {
        let idps = vec![
            identity_provider(
                "https://idp-one.example.org",
                vec![user_group("ops", sla(Uuid::from_u128(0x51), P1))],
            ),
            identity_provider(
                "https://idp-two.example.org",
                vec![user_group("devs", sla(Uuid::from_u128(0x52), P1))],
            ),
        ];
        let p = provider(vec![project("astro", P1)], idps, vec![]);
        let error = validate_provider_create(&p, &ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(
            message(error),
            format!("Project {} already used by another SLA", P1)
        );
    }

    #[test]
    fn test_duplicate_identity_provider_endpoints() {
        let idps = vec![
            identity_provider("https://idp.example.org/", vec![]),
            identity_provider("https://idp.example.org/", vec![]),
        ];
        let error =
            validate_identity_providers(&idps, &ValidationPolicy::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical endpoint: \
             https://idp.example.org/"
        );
    }

    #[test]
    fn test_user_group_emptiness_policy() {
        let idps = vec![identity_provider("https://idp.example.org", vec![])];
        // Default policy tolerates an empty list.
        validate_identity_providers(&idps, &ValidationPolicy::default())
            .unwrap();
        // The stricter generation does not.
        let policy = ValidationPolicy {
            require_user_groups: true,
            ..Default::default()
        };
        let error =
            validate_identity_providers(&idps, &policy).unwrap_err();
        assert_eq!(
            message(error),
            "Identity provider's user group list can't be empty"
        );
    }

    #[test]
    fn test_duplicate_user_group_names_within_identity_provider() {
        let idps = vec![identity_provider(
            "https://idp.example.org",
            vec![
                user_group("ops", sla(Uuid::from_u128(0x51), P1)),
                user_group("ops", sla(Uuid::from_u128(0x52), P2)),
            ],
        )];
        let error =
            validate_identity_providers(&idps, &ValidationPolicy::default())
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical name: ops"
        );
    }

    #[test]
    fn test_sla_date_window() {
        let mut bad = sla(Uuid::from_u128(0x51), P1);
        bad.end_date = bad.start_date;
        let error = validate_sla(&bad).unwrap_err();
        assert_eq!(
            message(error),
            "Start date 2024-01-01 greater or equal than end date 2024-01-01"
        );
    }

    #[test]
    fn test_duplicate_project_uuid_and_name() {
        let error =
            validate_projects(&[project("astro", P1), project("bio", P1)])
                .unwrap_err();
        assert_eq!(
            message(error),
            format!("There are multiple items with identical uuid: {}", P1)
        );

        let error =
            validate_projects(&[project("astro", P1), project("astro", P2)])
                .unwrap_err();
        assert_eq!(
            message(error),
            "There are multiple items with identical name: astro"
        );
    }
}
