//! Link graph: route resolution, building, caching and queries.
//!
//! ```text
//! ContentSource ──► GraphBuilder ──► LinkGraph ──► GraphCache ──► LinkIndex
//!   (documents)     (routes+links)    (adjacency)   (single-flight)  (queries)
//! ```

mod adjacency;
mod builder;
mod cache;
mod conflict;
mod export;
mod query;
mod resolver;

pub use adjacency::{LinkGraph, LinkedDocument};
pub use builder::{Audit, DEFAULT_EXTENSIONS, GraphBuilder};
pub use cache::{CacheState, GraphCache};
pub use conflict::{RouteCollision, format_collisions};
pub use export::{ExportLink, ExportNode, GraphExport};
pub use query::LinkIndex;
pub use resolver::{RouteResolver, SlugResolver};
