//! Notegraph - forward links and backlinks for a corpus of markdown notes.
//!
//! Documents come from a [`ContentSource`]. A [`GraphBuilder`] resolves every
//! document to a route, extracts its internal links and checks that each one
//! points at a known route. The resulting [`LinkGraph`] is owned by a
//! [`GraphCache`], which rebuilds it lazily after [`GraphCache::invalidate`]
//! and never runs more than one build at a time. [`LinkIndex`] wraps the cache
//! with the per-document queries.
//!
//! ```ignore
//! let index = LinkIndex::new(MemorySource::from_documents(docs), GraphBuilder::new());
//! let backlinks = index.back_links("notes/rust").await?;
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod logger;
pub mod page;
pub mod source;
pub mod utils;

pub use config::Config;
pub use core::Route;
pub use error::{BrokenLink, GraphError, Result};
pub use graph::{
    Audit, CacheState, GraphBuilder, GraphCache, GraphExport, LinkGraph, LinkIndex,
    LinkedDocument, RouteCollision, RouteResolver, SlugResolver,
};
pub use page::{DocId, Document};
pub use source::{ContentSource, FsSource, MemorySource};
