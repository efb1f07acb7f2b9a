//! Content sources: where documents come from.
//!
//! The graph only ever needs two things from storage: a snapshot of every
//! document, and a single document by id. Both are async and fail only on
//! storage errors; a missing document is `Ok(None)`.

mod fs;
mod memory;

use std::future::Future;

use crate::page::{DocId, Document};

pub use fs::FsSource;
pub use memory::MemorySource;

/// Document storage consumed by the graph cache.
pub trait ContentSource: Send + Sync + 'static {
    /// Snapshot of every document.
    fn list_documents(&self) -> impl Future<Output = anyhow::Result<Vec<Document>>> + Send;

    /// A single document, `None` when no document has this id.
    fn get_document(
        &self,
        id: &DocId,
    ) -> impl Future<Output = anyhow::Result<Option<Document>>> + Send;
}
