//! Link classification utilities.

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Link with a scheme delimiter (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Same-document anchor (#section) or empty target. Value is anchor without `#`.
    Fragment(&'a str),
    /// Reference to another document. Value is the path without query or fragment.
    Internal(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link target into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        let link = link.trim();
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            // ./#fragment is semantically equivalent to #fragment (current document anchor)
            Self::Fragment(anchor)
        } else {
            let path = strip_query_fragment(link);
            if path.is_empty() {
                Self::Fragment("")
            } else {
                Self::Internal(path)
            }
        }
    }

    /// The internal path, if this link references another document.
    #[inline]
    pub fn internal(self) -> Option<&'a str> {
        match self {
            Self::Internal(path) => Some(path),
            _ => None,
        }
    }
}

/// Check if a link points outside the corpus.
///
/// Any scheme delimiter (`:`) marks a link as external.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.contains(':')
}

/// Strip `?query` and `#fragment` from a link path.
#[inline]
fn strip_query_fragment(link: &str) -> &str {
    link.split(['?', '#']).next().unwrap_or(link)
}
