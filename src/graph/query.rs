//! Query facade over the graph cache.
//!
//! Every query reads the current graph, waiting for a rebuild when the
//! cache is stale.

use std::sync::Arc;

use super::adjacency::{LinkGraph, LinkedDocument};
use super::builder::GraphBuilder;
use super::cache::{CacheState, GraphCache};
use super::export::GraphExport;
use crate::core::Route;
use crate::error::{GraphError, Result};
use crate::page::{DocId, Document};
use crate::source::ContentSource;

/// Forward-link and backlink index over a content source.
pub struct LinkIndex<S> {
    cache: GraphCache<S>,
}

impl<S> Clone for LinkIndex<S> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<S: ContentSource> LinkIndex<S> {
    pub fn new(source: S, builder: GraphBuilder) -> Self {
        Self {
            cache: GraphCache::new(source, builder),
        }
    }

    pub fn cache(&self) -> &GraphCache<S> {
        &self.cache
    }

    pub fn state(&self) -> CacheState {
        self.cache.state()
    }

    /// Mark the graph stale; the next query rebuilds it.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// The current graph.
    pub async fn graph(&self) -> Result<Arc<LinkGraph>> {
        self.cache.get_graph().await
    }

    /// Canonical route of a document.
    pub async fn get_route(&self, id: &str) -> Result<Route> {
        let graph = self.graph().await?;
        graph.route(id).cloned()
    }

    /// Documents `id` links to, sorted by route.
    pub async fn forward_links(&self, id: &str) -> Result<Vec<LinkedDocument>> {
        self.graph().await?.forward_links(id)
    }

    /// Documents linking to `id`, sorted by route.
    pub async fn back_links(&self, id: &str) -> Result<Vec<LinkedDocument>> {
        self.graph().await?.back_links(id)
    }

    /// Map a route, written with either separator, back to its document.
    pub async fn resolve_route(&self, route: &str) -> Result<Option<DocId>> {
        let route = self.cache.builder().normalize(route);
        let graph = self.graph().await?;
        Ok(graph.resolve(route.as_str()).cloned())
    }

    /// Fetch a document straight from the source, bypassing the graph.
    pub async fn document(&self, id: &str) -> Result<Document> {
        self.cache
            .source()
            .get_document(&DocId::new(id))
            .await
            .map_err(|e| GraphError::Source(format!("{e:#}")))?
            .ok_or_else(|| GraphError::UnknownDocument(id.to_string()))
    }

    /// Node and edge listing of the current graph.
    pub async fn export(&self) -> Result<GraphExport> {
        let graph = self.graph().await?;
        Ok(GraphExport::from_graph(&graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn index(documents: impl IntoIterator<Item = Document>) -> LinkIndex<MemorySource> {
        LinkIndex::new(MemorySource::from_documents(documents), GraphBuilder::new())
    }

    fn ids(linked: &[LinkedDocument]) -> Vec<&str> {
        linked.iter().map(|l| l.id().as_str()).collect()
    }

    #[tokio::test]
    async fn test_forward_and_back_links() {
        let index = index([
            Document::new("A", "a", "see [x](/b)"),
            Document::new("B", "b", "no links"),
        ]);

        assert_eq!(ids(&index.forward_links("A").await.unwrap()), ["B"]);
        assert_eq!(ids(&index.back_links("B").await.unwrap()), ["A"]);
        assert!(index.forward_links("B").await.unwrap().is_empty());
        assert!(index.back_links("A").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_both_separator_styles() {
        let index = index([
            Document::new("A", "a", "see [x](/b)"),
            Document::new("B", "b", "see [y](\\a)"),
        ]);

        assert_eq!(ids(&index.forward_links("A").await.unwrap()), ["B"]);
        assert_eq!(ids(&index.forward_links("B").await.unwrap()), ["A"]);
    }

    #[tokio::test]
    async fn test_unknown_document() {
        let index = index([Document::new("A", "a", "")]);
        assert_eq!(
            index.back_links("nope").await.unwrap_err(),
            GraphError::UnknownDocument("nope".into())
        );
        assert!(index.get_route("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_get_and_resolve_route() {
        let index = index([Document::new("A", "notes/a", "")]);

        assert_eq!(index.get_route("A").await.unwrap().as_str(), "/notes/a");
        assert_eq!(
            index.resolve_route("notes\\a").await.unwrap(),
            Some(DocId::new("A"))
        );
        assert_eq!(index.resolve_route("/notes/b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalidate_picks_up_new_document() {
        let index = index([Document::new("A", "a", "")]);
        assert!(index.back_links("A").await.unwrap().is_empty());

        index
            .cache()
            .source()
            .insert(Document::new("B", "b", "[a](/a)"));
        // Still the old graph until invalidated
        assert!(index.back_links("A").await.unwrap().is_empty());

        index.invalidate();
        assert_eq!(ids(&index.back_links("A").await.unwrap()), ["B"]);
    }

    #[tokio::test]
    async fn test_document_lookup() {
        let index = index([Document::new("A", "a", "body").with_title("Alpha")]);
        let document = index.document("A").await.unwrap();
        assert_eq!(document.title(), "Alpha");
        assert!(matches!(
            index.document("Z").await,
            Err(GraphError::UnknownDocument(_))
        ));
    }

    #[tokio::test]
    async fn test_export_current_graph() {
        let index = index([
            Document::new("A", "a", "see [x](/b)"),
            Document::new("B", "b", "").with_title("Bee"),
        ]);

        let export = index.export().await.unwrap();
        let nodes: Vec<_> = export
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.route.as_str(), n.title.as_str()))
            .collect();
        assert_eq!(nodes, [("A", "/a", "a"), ("B", "/b", "Bee")]);
        assert_eq!(export.links.len(), 1);
        assert_eq!(export.links[0].source, DocId::new("A"));
        assert_eq!(export.links[0].target, DocId::new("B"));
    }
}
