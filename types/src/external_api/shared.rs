// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Types that are used as both request and response bodies.

use parse_display::Display;
use parse_display::FromStr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of infrastructure a provider runs
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    FromStr,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Openstack,
    Kubernetes,
}

/// Operational status of a provider
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    #[default]
    Active,
    Maintenance,
    Deprecated,
    Limited,
}

/// Category of IaaS capability exposed at an endpoint within a region
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    FromStr,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[display(style = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    BlockStorage,
    Compute,
    Identity,
    Network,
    ObjectStore,
}

// The per-kind service name enumerations below carry the reverse-DNS
// spellings the upstream catalogs advertise.

/// Recognized block storage service implementations
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum BlockStorageServiceName {
    #[display("org.openstack.cinder")]
    #[serde(rename = "org.openstack.cinder")]
    OpenstackCinder,
}

/// Recognized compute service implementations
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum ComputeServiceName {
    #[display("org.openstack.nova")]
    #[serde(rename = "org.openstack.nova")]
    OpenstackNova,
}

/// Recognized identity service implementations
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum IdentityServiceName {
    #[display("org.openstack.keystone")]
    #[serde(rename = "org.openstack.keystone")]
    OpenstackKeystone,
}

/// Recognized network service implementations
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum NetworkServiceName {
    #[display("org.openstack.neutron")]
    #[serde(rename = "org.openstack.neutron")]
    OpenstackNeutron,
}

/// Recognized object store service implementations
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum ObjectStoreServiceName {
    #[display("org.openstack.swift")]
    #[serde(rename = "org.openstack.swift")]
    OpenstackSwift,
    #[display("org.openstack.swift-s3")]
    #[serde(rename = "org.openstack.swift-s3")]
    OpenstackSwiftS3,
}

/// How a provider authenticates against an identity provider
///
/// These are the attributes carried on the relationship linking the two
/// nodes, not a node of their own.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct AuthMethod {
    /// name the identity provider is advertised with inside the provider's
    /// own configuration
    pub idp_name: String,
    /// authentication protocol spoken on the link (e.g. "openid")
    pub protocol: String,
}
