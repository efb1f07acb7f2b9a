//! Document snapshot handed over by a content source.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Stable identity of a document, assigned by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(Arc<str>);

impl DocId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for DocId {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for DocId {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for DocId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

/// A document as observed during one build.
///
/// Immutable once handed to the builder. The body is not serialized:
/// consumers only need identity and display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocId,
    /// Content-relative identity (e.g., `notes/hello`), turned into a route.
    pub slug: String,
    /// Title from front matter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw document text scanned for links.
    #[serde(skip)]
    pub body: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, slug: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: None,
            body: body.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Get title, falling back to slug if not set.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fallback() {
        let doc = Document::new("a", "notes/a", "");
        assert_eq!(doc.title(), "notes/a");

        let doc = doc.with_title("Hello");
        assert_eq!(doc.title(), "Hello");
    }

    #[test]
    fn test_doc_id_borrow_lookup() {
        let mut map = rustc_hash::FxHashMap::default();
        map.insert(DocId::new("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_serialize_skips_body() {
        let doc = Document::new("a", "notes/a", "see [x](/b)").with_title("A");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["title"], "A");
        assert!(json.get("body").is_none());
    }
}
