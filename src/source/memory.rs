//! In-memory document store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::ContentSource;
use crate::page::{DocId, Document};

/// Documents held in memory, keyed by id.
///
/// Mutations are not seen by the graph until it is invalidated.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: RwLock<BTreeMap<DocId, Document>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Insert or replace a document, returning the previous version.
    pub fn insert(&self, document: Document) -> Option<Document> {
        self.documents.write().insert(document.id.clone(), document)
    }

    pub fn remove(&self, id: &str) -> Option<Document> {
        self.documents.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl ContentSource for MemorySource {
    async fn list_documents(&self) -> anyhow::Result<Vec<Document>> {
        Ok(self.documents.read().values().cloned().collect())
    }

    async fn get_document(&self, id: &DocId) -> anyhow::Result<Option<Document>> {
        Ok(self.documents.read().get(id).cloned())
    }
}
