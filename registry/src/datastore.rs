// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The persistence seam: what the registry requires of a graph database.
//!
//! The registry itself never speaks a query language.  It needs exactly
//! three capabilities from its store: create a labeled node, create a typed
//! (optionally attributed) relationship between two existing nodes, and
//! follow a fixed relationship path outward from a node.  Any graph
//! database can sit behind this trait; [`InMemoryGraphStore`] is the
//! process-local implementation used by tests and development deployments.

use async_trait::async_trait;
use fedreg_common::api::external::{
    CreateResult, DataPageParams, Error, ListResultVec, LookupResult,
    PaginationOrder, ResourceType,
};
use parse_display::Display;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Kind of typed relationship between two graph nodes
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display(style = "SNAKE_CASE")]
pub enum RelationshipKind {
    /// provider → project
    OwnsProject,
    /// provider → region
    OwnsRegion,
    /// provider → identity provider; carries the auth-method attributes
    AuthenticatesThrough,
    /// region → location
    LocatedAt,
    /// region → service (any kind)
    SuppliesService,
    /// service → quota (any kind)
    OwnsQuota,
    /// quota → project it constrains
    AppliesTo,
    /// compute service → flavor
    SuppliesFlavor,
    /// compute service → image
    SuppliesImage,
    /// network service → network
    SuppliesNetwork,
    /// private flavor/image/network → project that can see it
    AccessibleTo,
    /// identity provider → user group
    OwnsUserGroup,
    /// user group → SLA
    OwnsSla,
    /// SLA → project it grants access to
    PointsTo,
}

/// A node to be written to the store
#[derive(Clone, Debug)]
pub struct NewNode {
    pub label: ResourceType,
    /// Scalar attributes of the node.  Relationship state never goes in
    /// here.
    pub properties: Value,
}

/// A node as stored, with its store-assigned uid
#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub uid: Uuid,
    pub label: ResourceType,
    pub properties: Value,
}

/// A typed relationship between two existing nodes
#[derive(Clone, Debug)]
pub struct NewRelationship {
    pub kind: RelationshipKind,
    pub from: Uuid,
    pub to: Uuid,
    /// Attributes carried on the relationship itself (e.g. the auth-method
    /// record on a provider↔identity-provider link).
    pub properties: Option<Value>,
}

/// A traversal: start at a node and follow a fixed path of relationship
/// kinds outward, returning the nodes at the end of the walk.
#[derive(Clone, Debug)]
pub struct TraversalQuery {
    pub start: Uuid,
    pub path: Vec<RelationshipKind>,
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create a node, assigning it a fresh uid.
    async fn node_create(&self, node: NewNode) -> CreateResult<NodeRecord>;

    /// Fetch one node by uid.
    async fn node_fetch(
        &self,
        label: ResourceType,
        uid: Uuid,
    ) -> LookupResult<NodeRecord>;

    /// Create a typed relationship between two existing nodes.
    async fn relationship_create(
        &self,
        relationship: NewRelationship,
    ) -> CreateResult<()>;

    /// Run a traversal query.
    async fn traverse(
        &self,
        query: &TraversalQuery,
    ) -> ListResultVec<NodeRecord>;

    /// List nodes carrying `label`, paginated by uid.
    async fn nodes_list(
        &self,
        label: ResourceType,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<NodeRecord>;
}

/// A process-local [`GraphStore`]
///
/// Everything lives under one mutex; this store backs tests and small
/// development deployments, not production catalogs.
pub struct InMemoryGraphStore {
    inner: Mutex<Inner>,
}

struct Inner {
    nodes: BTreeMap<Uuid, NodeRecord>,
    relationships: Vec<NewRelationship>,
}

impl InMemoryGraphStore {
    pub fn new() -> InMemoryGraphStore {
        InMemoryGraphStore {
            inner: Mutex::new(Inner {
                nodes: BTreeMap::new(),
                relationships: Vec::new(),
            }),
        }
    }

    /// Number of stored nodes, across all labels.
    pub fn node_count(&self) -> usize {
        self.inner.lock().unwrap().nodes.len()
    }

    /// Number of stored relationships, across all kinds.
    pub fn relationship_count(&self) -> usize {
        self.inner.lock().unwrap().relationships.len()
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        InMemoryGraphStore::new()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn node_create(&self, node: NewNode) -> CreateResult<NodeRecord> {
        let mut inner = self.inner.lock().unwrap();
        let record = NodeRecord {
            uid: Uuid::new_v4(),
            label: node.label,
            properties: node.properties,
        };
        inner.nodes.insert(record.uid, record.clone());
        Ok(record)
    }

    async fn node_fetch(
        &self,
        label: ResourceType,
        uid: Uuid,
    ) -> LookupResult<NodeRecord> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&uid)
            .filter(|record| record.label == label)
            .cloned()
            .ok_or_else(|| Error::not_found_by_uid(label, &uid))
    }

    async fn relationship_create(
        &self,
        relationship: NewRelationship,
    ) -> CreateResult<()> {
        let mut inner = self.inner.lock().unwrap();
        // Relationships are only ever created toward nodes the caller just
        // created, so a dangling endpoint is a caller bug, not a client
        // error.
        for endpoint in [relationship.from, relationship.to] {
            if !inner.nodes.contains_key(&endpoint) {
                return Err(Error::internal_error(&format!(
                    "relationship endpoint {} does not exist",
                    endpoint
                )));
            }
        }
        inner.relationships.push(relationship);
        Ok(())
    }

    async fn traverse(
        &self,
        query: &TraversalQuery,
    ) -> ListResultVec<NodeRecord> {
        let inner = self.inner.lock().unwrap();
        let mut frontier = vec![query.start];
        for kind in &query.path {
            frontier = inner
                .relationships
                .iter()
                .filter(|r| r.kind == *kind && frontier.contains(&r.from))
                .map(|r| r.to)
                .collect();
        }
        Ok(frontier
            .into_iter()
            .filter_map(|uid| inner.nodes.get(&uid).cloned())
            .collect())
    }

    async fn nodes_list(
        &self,
        label: ResourceType,
        pagparams: &DataPageParams<'_, Uuid>,
    ) -> ListResultVec<NodeRecord> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<NodeRecord> = inner
            .nodes
            .values()
            .filter(|record| record.label == label)
            .cloned()
            .collect();
        if let PaginationOrder::Descending = pagparams.direction {
            records.reverse();
        }
        if let Some(marker) = pagparams.marker {
            let position =
                records.iter().position(|record| record.uid == *marker);
            records = match position {
                Some(i) => records.split_off(i + 1),
                None => Vec::new(),
            };
        }
        records.truncate(pagparams.limit.get() as usize);
        Ok(records)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::num::NonZeroU32;

    #[tokio::test]
    async fn test_node_round_trip() {
        let store = InMemoryGraphStore::new();
        let created = store
            .node_create(NewNode {
                label: ResourceType::Project,
                properties: json!({"name": "astro"}),
            })
            .await
            .unwrap();
        let fetched = store
            .node_fetch(ResourceType::Project, created.uid)
            .await
            .unwrap();
        assert_eq!(fetched.properties["name"], json!("astro"));

        // A lookup under the wrong label must not leak the node.
        let error = store
            .node_fetch(ResourceType::Provider, created.uid)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::ObjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_relationship_requires_existing_endpoints() {
        let store = InMemoryGraphStore::new();
        let node = store
            .node_create(NewNode {
                label: ResourceType::Provider,
                properties: json!({}),
            })
            .await
            .unwrap();
        let error = store
            .relationship_create(NewRelationship {
                kind: RelationshipKind::OwnsProject,
                from: node.uid,
                to: Uuid::new_v4(),
                properties: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InternalError { .. }));
    }

    #[tokio::test]
    async fn test_traverse_follows_path() {
        let store = InMemoryGraphStore::new();
        let provider = store
            .node_create(NewNode {
                label: ResourceType::Provider,
                properties: json!({}),
            })
            .await
            .unwrap();
        let region = store
            .node_create(NewNode {
                label: ResourceType::Region,
                properties: json!({"name": "east"}),
            })
            .await
            .unwrap();
        let service = store
            .node_create(NewNode {
                label: ResourceType::ComputeService,
                properties: json!({}),
            })
            .await
            .unwrap();
        store
            .relationship_create(NewRelationship {
                kind: RelationshipKind::OwnsRegion,
                from: provider.uid,
                to: region.uid,
                properties: None,
            })
            .await
            .unwrap();
        store
            .relationship_create(NewRelationship {
                kind: RelationshipKind::SuppliesService,
                from: region.uid,
                to: service.uid,
                properties: None,
            })
            .await
            .unwrap();

        let reached = store
            .traverse(&TraversalQuery {
                start: provider.uid,
                path: vec![
                    RelationshipKind::OwnsRegion,
                    RelationshipKind::SuppliesService,
                ],
            })
            .await
            .unwrap();
        assert_eq!(reached.len(), 1);
        assert_eq!(reached[0].uid, service.uid);
    }

    #[tokio::test]
    async fn test_nodes_list_pagination() {
        let store = InMemoryGraphStore::new();
        for i in 0..5 {
            store
                .node_create(NewNode {
                    label: ResourceType::Project,
                    properties: json!({"name": format!("p{}", i)}),
                })
                .await
                .unwrap();
        }
        let first_page = store
            .nodes_list(
                ResourceType::Project,
                &DataPageParams {
                    marker: None,
                    direction: PaginationOrder::Ascending,
                    limit: NonZeroU32::new(3).unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(first_page.len(), 3);

        let marker = first_page.last().unwrap().uid;
        let second_page = store
            .nodes_list(
                ResourceType::Project,
                &DataPageParams {
                    marker: Some(&marker),
                    direction: PaginationOrder::Ascending,
                    limit: NonZeroU32::new(3).unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(second_page.len(), 2);
        assert!(second_page.iter().all(|r| r.uid > marker));
    }

    #[test]
    fn test_relationship_kind_display() {
        assert_eq!(
            RelationshipKind::AuthenticatesThrough.to_string(),
            "AUTHENTICATES_THROUGH"
        );
        assert_eq!(RelationshipKind::OwnsSla.to_string(), "OWNS_SLA");
    }
}
