//! Document link graph for forward-link / backlink tracking.
//!
//! Tracks internal links between documents:
//! - `forward`: documents this document links to (outgoing)
//! - `backward`: documents that link to this document (incoming/backlinks)
//!
//! A graph is assembled once by the builder and never mutated after it is
//! published, so readers share it through an `Arc` without locking.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::core::Route;
use crate::error::{GraphError, Result};
use crate::page::{DocId, Document};

type IdSet = FxHashSet<DocId>;
type IdSetMap = FxHashMap<DocId, IdSet>;

/// A document together with its resolved route.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedDocument {
    pub route: Route,
    #[serde(flatten)]
    pub document: Arc<Document>,
}

impl LinkedDocument {
    #[inline]
    pub fn id(&self) -> &DocId {
        &self.document.id
    }
}

/// Bidirectional document link graph.
///
/// Invariant: `b ∈ forward[a] ⇔ a ∈ backward[b]`.
#[derive(Debug, Default)]
pub struct LinkGraph {
    /// Every indexed document, keyed by id.
    nodes: FxHashMap<DocId, LinkedDocument>,
    /// Route table: route -> document.
    known_routes: FxHashMap<Route, DocId>,
    /// Forward: document -> documents it links to (outgoing links)
    forward: IdSetMap,
    /// Reverse: document -> documents that link to it (backlinks)
    backward: IdSetMap,
}

impl LinkGraph {
    pub(crate) fn with_capacity(documents: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(documents, Default::default()),
            known_routes: FxHashMap::with_capacity_and_hasher(documents, Default::default()),
            forward: IdSetMap::with_capacity_and_hasher(documents, Default::default()),
            backward: IdSetMap::with_capacity_and_hasher(documents, Default::default()),
        }
    }

    /// Register a document under its route, with empty neighbor sets.
    pub(crate) fn insert_node(&mut self, route: Route, document: Arc<Document>) {
        let id = document.id.clone();
        self.known_routes.insert(route.clone(), id.clone());
        self.forward.entry(id.clone()).or_default();
        self.backward.entry(id.clone()).or_default();
        self.nodes.insert(id, LinkedDocument { route, document });
    }

    /// Record one resolved link. Repeated links collapse into one edge.
    pub(crate) fn record(&mut self, from: &DocId, to: &DocId) {
        self.forward
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.backward
            .entry(to.clone())
            .or_default()
            .insert(from.clone());
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(FxHashSet::len).sum()
    }

    /// Check whether a document is part of this graph.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a document and its route.
    pub fn get(&self, id: &str) -> Option<&LinkedDocument> {
        self.nodes.get(id)
    }

    /// Get the canonical route of a document.
    pub fn route(&self, id: &str) -> Result<&Route> {
        self.nodes
            .get(id)
            .map(|node| &node.route)
            .ok_or_else(|| GraphError::UnknownDocument(id.to_string()))
    }

    /// Look up the document owning a route.
    ///
    /// `route` is matched as-is; normalize it first when it comes from a link.
    pub fn resolve(&self, route: &str) -> Option<&DocId> {
        self.known_routes.get(route)
    }

    /// Documents this document links to, sorted by route.
    pub fn forward_links(&self, id: &str) -> Result<Vec<LinkedDocument>> {
        self.neighbors(&self.forward, id)
    }

    /// Documents linking to this document, sorted by route.
    pub fn back_links(&self, id: &str) -> Result<Vec<LinkedDocument>> {
        self.neighbors(&self.backward, id)
    }

    fn neighbors(&self, side: &IdSetMap, id: &str) -> Result<Vec<LinkedDocument>> {
        let set = side
            .get(id)
            .ok_or_else(|| GraphError::UnknownDocument(id.to_string()))?;
        let mut linked: Vec<_> = set
            .iter()
            .filter_map(|neighbor| self.nodes.get(neighbor))
            .cloned()
            .collect();
        linked.sort_by(|a, b| a.route.cmp(&b.route));
        Ok(linked)
    }

    /// All documents, sorted by route.
    pub fn documents(&self) -> Vec<&LinkedDocument> {
        let mut documents: Vec<_> = self.nodes.values().collect();
        documents.sort_by(|a, b| a.route.cmp(&b.route));
        documents
    }

    /// All edges as `(source, target)`, sorted by source route then target route.
    pub fn edges(&self) -> Vec<(&LinkedDocument, &LinkedDocument)> {
        let mut edges: Vec<_> = self
            .forward
            .iter()
            .filter_map(|(from, targets)| self.nodes.get(from).map(|node| (node, targets)))
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .filter_map(|to| self.nodes.get(to))
                    .map(move |to| (from, to))
            })
            .collect();
        edges.sort_by(|a, b| (&a.0.route, &a.1.route).cmp(&(&b.0.route, &b.1.route)));
        edges
    }

    /// Verify `b ∈ forward[a] ⇔ a ∈ backward[b]` for every edge.
    pub fn is_symmetric(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(from, targets)| {
            targets
                .iter()
                .all(|to| self.backward.get(to).is_some_and(|s| s.contains(from)))
        });
        let backward_ok = self.backward.iter().all(|(to, sources)| {
            sources
                .iter()
                .all(|from| self.forward.get(from).is_some_and(|s| s.contains(to)))
        });
        forward_ok && backward_ok
    }
}
