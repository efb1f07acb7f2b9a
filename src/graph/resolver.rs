//! Document -> route mapping.

use std::sync::Arc;

use crate::core::Route;
use crate::page::Document;

/// Maps a document to its canonical route.
///
/// Must be pure: the same document always yields the same route, so routes
/// stay stable across rebuilds. Plain closures implement this trait, which
/// lets a content source inject its own slug rules.
pub trait RouteResolver: Send + Sync {
    fn resolve(&self, document: &Document) -> Route;
}

impl<F> RouteResolver for F
where
    F: Fn(&Document) -> Route + Send + Sync,
{
    fn resolve(&self, document: &Document) -> Route {
        self(document)
    }
}

/// Default resolver: the slug under a single leading `/`.
///
/// Uses the same normalization as link targets, so a slug and a link
/// written for it always meet on one route.
#[derive(Debug, Clone, Default)]
pub struct SlugResolver {
    extensions: Arc<[String]>,
}

impl SlugResolver {
    pub fn new(extensions: Arc<[String]>) -> Self {
        Self { extensions }
    }
}

impl RouteResolver for SlugResolver {
    fn resolve(&self, document: &Document) -> Route {
        Route::normalize(&document.slug, &self.extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(slug: &str) -> Document {
        Document::new(slug, slug, "")
    }

    #[test]
    fn test_slug_resolver_prepends_separator() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve(&doc("notes/a")).as_str(), "/notes/a");
        assert_eq!(resolver.resolve(&doc("/notes/a")).as_str(), "/notes/a");
    }

    #[test]
    fn test_slug_resolver_strips_extensions() {
        let resolver = SlugResolver::new(Arc::from(vec!["mdx".to_string()]));
        assert_eq!(resolver.resolve(&doc("notes/a.mdx")).as_str(), "/notes/a");
    }

    #[test]
    fn test_slug_resolver_is_stable() {
        let resolver = SlugResolver::default();
        let document = doc("notes\\a");
        assert_eq!(resolver.resolve(&document), resolver.resolve(&document));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |d: &Document| Route::normalize(&format!("blog/{}", d.slug), &[]);
        assert_eq!(resolver.resolve(&doc("a")).as_str(), "/blog/a");
    }
}
