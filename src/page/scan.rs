//! Link extraction from raw document text.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::LinkKind;

/// `[label](target)`, with an optional leading `!` captured to tell images apart.
///
/// The label is lazy rather than bracket-free, so `[[wiki]](/b)` and
/// `[a [nested] label](/c)` still yield their targets.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\n]*?)\]\(([^)\n]*)\)").unwrap());

/// A link extracted from a document body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLink<'a> {
    /// Link destination as written.
    pub target: &'a str,
}

impl<'a> ScannedLink<'a> {
    /// Classify this link.
    #[inline]
    pub fn kind(&self) -> LinkKind<'a> {
        LinkKind::parse(self.target)
    }

    /// Internal path to resolve, `None` for external and same-document links.
    #[inline]
    pub fn internal(&self) -> Option<&'a str> {
        self.kind().internal()
    }
}

/// Lazily yield every link target in `body`, in order of appearance.
///
/// Image embeds (`![alt](src)`) are skipped. The iterator borrows `body`
/// and can be recreated at any time to scan again.
pub fn extract_links(body: &str) -> impl Iterator<Item = ScannedLink<'_>> {
    LINK_PATTERN
        .captures_iter(body)
        .filter(|caps| caps[1].is_empty())
        .filter_map(|caps| caps.get(3))
        .map(|dest| ScannedLink {
            target: destination(dest.as_str()),
        })
}

/// Lazily yield the internal paths referenced by `body`.
pub fn internal_links(body: &str) -> impl Iterator<Item = &str> {
    extract_links(body).filter_map(|link| link.internal())
}

/// Reduce `<dest>` or `dest "title"` to the destination itself.
fn destination(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.split_once('>'))
        .map(|(inner, _)| inner)
    {
        return inner.trim();
    }
    trimmed
        .split_once([' ', '\t'])
        .map_or(trimmed, |(dest, _)| dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(body: &str) -> Vec<&str> {
        extract_links(body).map(|l| l.target).collect()
    }

    #[test]
    fn test_extracts_in_order() {
        assert_eq!(
            targets("see [x](/b) and [y](/c), then [z](/b)"),
            ["/b", "/c", "/b"]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(targets("no links here").is_empty());
        assert!(targets("").is_empty());
        // Brackets without a destination are not links
        assert!(targets("[label] (not a link)").is_empty());
    }

    #[test]
    fn test_skips_images() {
        assert_eq!(targets("![diagram](/img.png) and [doc](/doc)"), ["/doc"]);
    }

    #[test]
    fn test_title_and_angle_brackets() {
        assert_eq!(targets(r#"[x](/b "The B note")"#), ["/b"]);
        assert_eq!(targets("[x](</my note>)"), ["/my note"]);
        assert_eq!(targets("[x](  /b  )"), ["/b"]);
    }

    #[test]
    fn test_stray_bracket_before_link() {
        assert_eq!(targets("[a] then [b](/b)"), ["/b"]);
    }

    #[test]
    fn test_bracketed_labels() {
        let internal: Vec<_> =
            internal_links("see [[wiki]](/b) and [a [nested] label](/c)").collect();
        assert_eq!(internal, ["/b", "/c"]);
        assert_eq!(targets("![[diagram]](/img.png) [[doc]](/doc)"), ["/doc"]);
    }

    #[test]
    fn test_link_does_not_span_lines() {
        assert!(targets("[a](/b\n)").is_empty());
    }

    #[test]
    fn test_restartable() {
        let body = "[x](/a) [y](/b)";
        let first: Vec<_> = extract_links(body).collect();
        let second: Vec<_> = extract_links(body).collect();
        assert_eq!(first, second);
        assert_eq!(extract_links(body).count(), 2);
    }

    #[test]
    fn test_lazy_take() {
        let body = "[x](/a) [y](/b) [z](/c)";
        let first: Vec<_> = extract_links(body).take(1).map(|l| l.target).collect();
        assert_eq!(first, ["/a"]);
    }

    #[test]
    fn test_internal_links_drop_external_and_fragments() {
        let body = "[w](https://example.com) [m](mailto:a@b.c) [s](#top) [n](/notes/a#intro) [e]()";
        let internal: Vec<_> = internal_links(body).collect();
        assert_eq!(internal, ["/notes/a"]);
    }

    #[test]
    fn test_both_separators() {
        let internal: Vec<_> = internal_links(r"[x](/b) [y](\a)").collect();
        assert_eq!(internal, ["/b", "\\a"]);
    }
}
