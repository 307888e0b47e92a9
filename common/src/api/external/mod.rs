// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*!
 * Data structures and related facilities for representing resources in the
 * registry API
 *
 * The contents here are all HTTP-agnostic: they are shared by the schema
 * layer, the storage seam, and whatever controller layer is bolted on top.
 */

mod error;
pub use error::*;

pub use dropshot::PaginationOrder;
use parse_display::Display;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

/*
 * The type aliases below exist primarily to ensure consistency among return
 * types for functions in `fedreg_registry::Registry` and the `GraphStore`
 * contract.
 */

/// Result of a create operation for the specified type
pub type CreateResult<T> = Result<T, Error>;
/// Result of a delete operation for the specified type
pub type DeleteResult = Result<(), Error>;
/// Result of a list operation that returns a vector
pub type ListResultVec<T> = Result<Vec<T>, Error>;
/// Result of a lookup operation for the specified type
pub type LookupResult<T> = Result<T, Error>;
/// Result of an update operation for the specified type
pub type UpdateResult<T> = Result<T, Error>;

/**
 * Parameters used to request a specific page of results when listing a
 * collection of objects
 *
 * This is HTTP-agnostic: by the time this struct is constructed, we know the
 * type of the sort field and we can specialize `DataPageParams` to that type,
 * which makes it considerably simpler to implement the backend for paginated
 * listings.
 */
#[derive(Debug)]
pub struct DataPageParams<'a, NameType> {
    /// If present, this is the value of the sort field for the last object
    /// seen
    pub marker: Option<&'a NameType>,

    /// Whether the sort is in ascending order
    pub direction: PaginationOrder,

    /// This identifies how many results should be returned on this page.
    /// Backends must provide this many results unless we're at the end of
    /// the scan.
    pub limit: NonZeroU32,
}

impl<'a, NameType> DataPageParams<'a, NameType> {
    /// Maps the marker type to a new type.
    ///
    /// Equivalent to [std::option::Option::map], because that's what it
    /// calls.
    pub fn map_name<OtherName, F>(&self, f: F) -> DataPageParams<'a, OtherName>
    where
        F: FnOnce(&'a NameType) -> &'a OtherName,
    {
        DataPageParams {
            marker: self.marker.map(f),
            direction: self.direction,
            limit: self.limit,
        }
    }
}

/**
 * An email address for a provider's support contact
 *
 * An `EmailAddress` can only be constructed from a string that has a single
 * `@` separating a non-empty mailbox from a dotted domain.  This is
 * deliberately a shallow syntactic check; deliverability is not our problem.
 */
#[derive(
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("{0}")]
#[serde(try_from = "String")]
pub struct EmailAddress(String);

impl TryFrom<String> for EmailAddress {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.chars().any(char::is_whitespace) {
            return Err(String::from(
                "email address cannot contain whitespace",
            ));
        }
        let (mailbox, domain) = value
            .split_once('@')
            .ok_or_else(|| String::from("email address requires an \"@\""))?;
        if mailbox.is_empty() {
            return Err(String::from(
                "email address requires a mailbox before the \"@\"",
            ));
        }
        if domain.contains('@') {
            return Err(String::from(
                "email address may contain at most one \"@\"",
            ));
        }
        if domain.split('.').any(str::is_empty) || !domain.contains('.') {
            return Err(format!(
                "email address has an invalid domain: \"{}\"",
                domain
            ));
        }
        Ok(EmailAddress(value))
    }
}

impl FromStr for EmailAddress {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        EmailAddress::try_from(String::from(value))
    }
}

impl EmailAddress {
    /// Parse an `EmailAddress`.  This is a convenience wrapper around
    /// `EmailAddress::try_from(String)` that marshals any error into an
    /// appropriate `Error`.
    pub fn from_param(value: String, label: &str) -> Result<EmailAddress, Error> {
        value.parse().map_err(|e| Error::InvalidValue {
            label: String::from(label),
            message: e,
        })
    }

    /// Return the `&str` representing the address itself.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/**
 * Custom JsonSchema implementation to encode the constraints on EmailAddress
 */
impl JsonSchema for EmailAddress {
    fn schema_name() -> String {
        "EmailAddress".to_string()
    }
    fn json_schema(
        _gen: &mut schemars::gen::SchemaGenerator,
    ) -> schemars::schema::Schema {
        schemars::schema::Schema::Object(schemars::schema::SchemaObject {
            metadata: Some(Box::new(schemars::schema::Metadata {
                title: Some("An email address".to_string()),
                description: Some(
                    "Email addresses are a mailbox, an \"@\", and a dotted \
                     domain."
                        .to_string(),
                ),
                ..Default::default()
            })),
            instance_type: Some(schemars::schema::SingleOrVec::Single(
                Box::new(schemars::schema::InstanceType::String),
            )),
            string: Some(Box::new(schemars::schema::StringValidation {
                max_length: None,
                min_length: Some(3),
                pattern: Some("^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$".to_string()),
            })),
            extensions: BTreeMap::new(),
            ..Default::default()
        })
    }
}

/*
 * General types used to implement API resources
 */

/**
 * Identifies a type of registry resource
 */
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResourceType {
    Provider,
    Project,
    Region,
    Location,
    BlockStorageService,
    ComputeService,
    IdentityService,
    NetworkService,
    ObjectStoreService,
    BlockStorageQuota,
    ComputeQuota,
    NetworkQuota,
    ObjectStoreQuota,
    Flavor,
    Image,
    Network,
    IdentityProvider,
    UserGroup,
    Sla,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResourceType::Provider => "provider",
                ResourceType::Project => "project",
                ResourceType::Region => "region",
                ResourceType::Location => "location",
                ResourceType::BlockStorageService => "block storage service",
                ResourceType::ComputeService => "compute service",
                ResourceType::IdentityService => "identity service",
                ResourceType::NetworkService => "network service",
                ResourceType::ObjectStoreService => "object store service",
                ResourceType::BlockStorageQuota => "block storage quota",
                ResourceType::ComputeQuota => "compute quota",
                ResourceType::NetworkQuota => "network quota",
                ResourceType::ObjectStoreQuota => "object store quota",
                ResourceType::Flavor => "flavor",
                ResourceType::Image => "image",
                ResourceType::Network => "network",
                ResourceType::IdentityProvider => "identity provider",
                ResourceType::UserGroup => "user group",
                ResourceType::Sla => "SLA",
            }
        )
    }
}

/*
 * NODE METADATA
 *
 * The registry models its catalog as a property graph; every node shares the
 * metadata below, flattened into the entity-specific views and params.
 */

/**
 * Metadata shared by all graph nodes read back from the store
 */
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, JsonSchema)]
pub struct NodeMetadata {
    /// unique, immutable, store-controlled identifier for each resource
    pub uid: Uuid,
    /// human-readable free-form text about a resource
    pub description: String,
}

/**
 * Create-time metadata shared by all graph nodes
 */
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, JsonSchema)]
pub struct NodeMetadataCreateParams {
    #[serde(default)]
    pub description: String,
}

/**
 * Updateable metadata shared by all graph nodes
 */
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct NodeMetadataUpdateParams {
    pub description: Option<String>,
}
