//! Link graph construction.
//!
//! Two passes over the corpus:
//!
//! 1. Route pass: resolve every document to a route and fill the route
//!    table, rejecting routes claimed by more than one document.
//! 2. Link pass: extract each document's internal links, normalize them,
//!    and look them up in the route table. Any miss aborts the build.
//!
//! Only when both passes succeed are the resolved pairs written into a
//! fresh [`LinkGraph`]. A failed build produces nothing.

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::adjacency::LinkGraph;
use super::conflict::{RouteClaims, RouteCollision, detect_collisions};
use super::resolver::{RouteResolver, SlugResolver};
use crate::config::Config;
use crate::core::Route;
use crate::error::{BrokenLink, GraphError, Result};
use crate::page::{DocId, Document, internal_links};

/// Extensions stripped from routes when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Builds [`LinkGraph`]s from document snapshots.
///
/// Cheap to clone; holds no per-build state.
#[derive(Clone)]
pub struct GraphBuilder {
    resolver: Arc<dyn RouteResolver>,
    extensions: Arc<[String]>,
    self_links: bool,
}

/// Outcome of checking a corpus without building a graph.
#[derive(Debug, Default)]
pub struct Audit {
    /// Number of documents checked.
    pub documents: usize,
    /// Number of internal links checked.
    pub links: usize,
    /// Every id listed by more than one document.
    pub duplicates: Vec<DocId>,
    /// Every route claimed by more than one document.
    pub collisions: Vec<RouteCollision>,
    /// Every internal link that matched no route, in document order.
    pub broken: Vec<BrokenLink>,
}

impl Audit {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.collisions.is_empty() && self.broken.is_empty()
    }
}

/// Result of the route pass.
struct RouteTable {
    /// Route of each document, parallel to the sorted document list.
    routes: Vec<Route>,
    /// Route -> owning document (first claimant on collision).
    known: FxHashMap<Route, DocId>,
    /// Ids listed more than once; only the first document with an id claims a route.
    duplicates: Vec<DocId>,
    collisions: Vec<RouteCollision>,
}

/// Internal links of one document, split by resolution.
#[derive(Default)]
struct ResolvedLinks {
    targets: Vec<DocId>,
    broken: Vec<BrokenLink>,
    scanned: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        let extensions: Arc<[String]> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        Self {
            resolver: Arc::new(SlugResolver::new(Arc::clone(&extensions))),
            extensions,
            self_links: true,
        }
    }
}

impl std::fmt::Debug for GraphBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("extensions", &self.extensions)
            .field("self_links", &self.self_links)
            .finish_non_exhaustive()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder configured from `[content]` and `[links]`.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_extensions(config.content.extensions.iter().cloned())
            .with_self_links(config.links.self_links)
    }

    /// Set the extensions stripped from slugs and link targets.
    ///
    /// Also resets the resolver to a [`SlugResolver`] using these extensions;
    /// call [`with_resolver`](Self::with_resolver) afterwards to override it.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self.resolver = Arc::new(SlugResolver::new(Arc::clone(&self.extensions)));
        self
    }

    /// Inject the document -> route mapping.
    pub fn with_resolver(mut self, resolver: impl RouteResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Keep links from a document to itself (kept by default).
    pub fn with_self_links(mut self, self_links: bool) -> Self {
        self.self_links = self_links;
        self
    }

    /// Normalize a link target or slug the way this builder does.
    pub fn normalize(&self, raw: &str) -> Route {
        Route::normalize(raw, &self.extensions)
    }

    /// Build the link graph, failing on the first structural problem.
    ///
    /// Duplicate ids and route collisions are reported exhaustively,
    /// in that order. For broken links the
    /// first one in document-id order, then body order, is reported.
    pub fn build(&self, documents: Vec<Document>) -> Result<LinkGraph> {
        let documents = sort_documents(documents);

        let table = self.route_pass(&documents);
        if !table.duplicates.is_empty() {
            return Err(GraphError::DuplicateDocument(table.duplicates));
        }
        if !table.collisions.is_empty() {
            return Err(GraphError::RouteCollision(table.collisions));
        }

        let resolved = self.link_pass(&documents, &table.known);
        if let Some(broken) = resolved.iter().find_map(|r| r.broken.first()) {
            return Err(GraphError::BrokenLink(broken.clone()));
        }

        let sources: Vec<DocId> = documents.iter().map(|d| d.id.clone()).collect();
        let mut graph = LinkGraph::with_capacity(documents.len());
        for (route, document) in table.routes.into_iter().zip(documents) {
            graph.insert_node(route, Arc::new(document));
        }
        for (source, links) in sources.iter().zip(&resolved) {
            for target in &links.targets {
                graph.record(source, target);
            }
        }

        crate::debug!("graph"; "built graph: {} documents, {} edges", graph.len(), graph.edge_count());
        Ok(graph)
    }

    /// Run both passes and report every problem instead of failing.
    pub fn audit(&self, documents: Vec<Document>) -> Audit {
        let documents = sort_documents(documents);
        let table = self.route_pass(&documents);
        let resolved = self.link_pass(&documents, &table.known);

        Audit {
            documents: documents.len(),
            links: resolved.iter().map(|r| r.scanned).sum(),
            duplicates: table.duplicates,
            collisions: table.collisions,
            broken: resolved.into_iter().flat_map(|r| r.broken).collect(),
        }
    }

    fn route_pass(&self, documents: &[Document]) -> RouteTable {
        let mut claims = RouteClaims::default();
        let mut known = FxHashMap::with_capacity_and_hasher(documents.len(), Default::default());
        let mut routes = Vec::with_capacity(documents.len());
        let mut duplicates: Vec<DocId> = Vec::new();

        // Sorted by id, so repeated ids are adjacent
        let mut previous: Option<&DocId> = None;
        for document in documents {
            let route = self.resolver.resolve(document);
            if previous == Some(&document.id) {
                if duplicates.last() != Some(&document.id) {
                    duplicates.push(document.id.clone());
                }
                routes.push(route);
                continue;
            }
            previous = Some(&document.id);
            claims
                .entry(route.clone())
                .or_default()
                .push(document.id.clone());
            known
                .entry(route.clone())
                .or_insert_with(|| document.id.clone());
            routes.push(route);
        }

        RouteTable {
            routes,
            known,
            duplicates,
            collisions: detect_collisions(&claims),
        }
    }

    /// Resolve every document's links in parallel; output is in document order.
    fn link_pass(
        &self,
        documents: &[Document],
        known: &FxHashMap<Route, DocId>,
    ) -> Vec<ResolvedLinks> {
        documents
            .par_iter()
            .map(|document| self.resolve_links(document, known))
            .collect()
    }

    fn resolve_links(
        &self,
        document: &Document,
        known: &FxHashMap<Route, DocId>,
    ) -> ResolvedLinks {
        let mut resolved = ResolvedLinks::default();
        for target in internal_links(&document.body) {
            resolved.scanned += 1;
            let route = self.normalize(target);
            match known.get(&route) {
                Some(id) if !self.self_links && *id == document.id => {}
                Some(id) => resolved.targets.push(id.clone()),
                None => resolved.broken.push(BrokenLink {
                    document: document.id.clone(),
                    target: target.to_string(),
                    route,
                }),
            }
        }
        resolved
    }
}

/// Order documents by id so results never depend on listing order.
fn sort_documents(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    documents
}
