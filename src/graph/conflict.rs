//! Route collision detection.

use rustc_hash::FxHashMap;

use crate::core::Route;
use crate::page::DocId;

/// Route claims map: route -> documents claiming that route, in claim order.
pub type RouteClaims = FxHashMap<Route, Vec<DocId>>;

/// A route collision: multiple documents resolve to the same route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    /// The contested route
    pub route: Route,
    /// All documents claiming this route, sorted by id
    pub documents: Vec<DocId>,
}

/// Detect every route claimed by more than one document.
///
/// Exhaustive: all colliding routes are reported, each with all of its
/// claimants. Output is sorted by route so reports are stable.
pub fn detect_collisions(claims: &RouteClaims) -> Vec<RouteCollision> {
    let mut collisions: Vec<_> = claims
        .iter()
        .filter(|(_, documents)| documents.len() > 1)
        .map(|(route, documents)| {
            let mut documents = documents.clone();
            documents.sort();
            RouteCollision {
                route: route.clone(),
                documents,
            }
        })
        .collect();
    collisions.sort_by(|a, b| a.route.cmp(&b.route));
    collisions
}

/// Format collisions as a string (for error messages).
pub fn format_collisions(collisions: &[RouteCollision]) -> String {
    collisions
        .iter()
        .map(format_single_collision)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single collision for display.
fn format_single_collision(collision: &RouteCollision) -> String {
    let mut lines = vec![format!(
        "{} ({} documents)",
        collision.route,
        collision.documents.len()
    )];
    for document in &collision.documents {
        lines.push(format!("  - {}", document));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> Route {
        Route::normalize(s, &[])
    }

    fn claims(pairs: &[(&str, &str)]) -> RouteClaims {
        let mut claims = RouteClaims::default();
        for (r, id) in pairs {
            claims.entry(route(r)).or_default().push(DocId::new(id));
        }
        claims
    }

    #[test]
    fn test_no_collisions() {
        let claims = claims(&[("/a", "a"), ("/b", "b"), ("/c", "c")]);
        assert!(detect_collisions(&claims).is_empty());
    }

    #[test]
    fn test_two_way_collision() {
        let claims = claims(&[("/foo", "b"), ("/foo", "a")]);
        let collisions = detect_collisions(&claims);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].route, route("/foo"));
        assert_eq!(collisions[0].documents, [DocId::new("a"), DocId::new("b")]);
    }

    #[test]
    fn test_three_way_collision() {
        let claims = claims(&[("/foo", "a"), ("/foo", "b"), ("/foo", "c")]);
        let collisions = detect_collisions(&claims);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].documents.len(), 3);
    }

    #[test]
    fn test_multiple_collisions_sorted() {
        let claims = claims(&[
            ("/foo", "a"),
            ("/foo", "b"),
            ("/bar", "c"),
            ("/bar", "d"),
            ("/baz", "e"),
        ]);
        let collisions = detect_collisions(&claims);
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].route, route("/bar"));
        assert_eq!(collisions[1].route, route("/foo"));
    }

    #[test]
    fn test_format_collisions() {
        let collisions = vec![RouteCollision {
            route: route("/foo"),
            documents: vec![DocId::new("foo.md"), DocId::new("foo.mdx")],
        }];

        let formatted = format_collisions(&collisions);
        assert!(formatted.contains("/foo (2 documents)"));
        assert!(formatted.contains("  - foo.md"));
        assert!(formatted.contains("  - foo.mdx"));
    }
}
