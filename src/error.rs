//! Link graph errors.

use std::fmt;

use thiserror::Error;

use crate::core::Route;
use crate::graph::{RouteCollision, format_collisions};
use crate::page::DocId;

/// Errors raised while building or querying the link graph.
///
/// `Clone` so a single build outcome can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two or more documents share an id.
    #[error("duplicate document id{}: {}", crate::utils::plural_s(.0.len()), format_ids(.0))]
    DuplicateDocument(Vec<DocId>),

    /// Two or more documents resolve to the same route.
    #[error("route collision ({} route{}):\n{}", .0.len(), crate::utils::plural_s(.0.len()), format_collisions(.0))]
    RouteCollision(Vec<RouteCollision>),

    /// An internal link does not resolve to any known route.
    #[error("{0}")]
    BrokenLink(BrokenLink),

    /// The queried document is not part of the current graph.
    #[error("unknown document `{0}`")]
    UnknownDocument(String),

    /// The content source failed to list documents.
    #[error("failed to load documents: {0}")]
    Source(String),

    /// The build task ended without producing an outcome.
    #[error("graph build aborted")]
    Aborted,
}

/// An internal link whose target matches no document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// The document containing the link.
    pub document: DocId,
    /// The link target as written.
    pub target: String,
    /// The route the target normalized to.
    pub route: Route,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "document `{}` includes a broken link to `{}` (resolved to {})",
            self.document, self.target, self.route
        )
    }
}

fn format_ids(ids: &[DocId]) -> String {
    ids.iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for link graph operations.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
