//! Route type for cross-referencing documents.
//!
//! - Both `/` and `\` separate segments
//! - Always starts with exactly one `/`
//! - Never ends with `/`, except for the root route itself

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;

/// Canonical route of a document.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - No empty, `.` or `..` segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(Arc<str>);

impl Route {
    /// The root route (`/`).
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Normalize a slug or link path into a route.
    ///
    /// `extensions` lists the file extensions stripped from the last segment,
    /// so `notes/a.md` and `/notes/a` name the same route.
    ///
    /// ```text
    /// notes/a        -> /notes/a
    /// \notes\a.mdx   -> /notes/a
    /// /notes/./b/../a/ -> /notes/a
    /// ../../a        -> /a
    /// ```
    pub fn normalize(raw: &str, extensions: &[String]) -> Self {
        let trimmed = raw.trim();
        let decoded = percent_decode_str(trimmed)
            .decode_utf8()
            .unwrap_or(Cow::Borrowed(trimmed));

        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        if let Some(last) = segments.last_mut() {
            *last = strip_extension(*last, extensions);
        }

        if segments.is_empty() {
            return Self::root();
        }

        let mut route = String::with_capacity(decoded.len() + 1);
        for segment in &segments {
            route.push('/');
            route.push_str(segment);
        }
        Self(Arc::from(route))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the root route.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }
}

/// Strip a known extension (case-insensitive) from a path segment.
///
/// Dotfiles like `.md` are left alone: there is no stem to keep.
fn strip_extension<'a>(segment: &'a str, extensions: &[String]) -> &'a str {
    match segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => segment,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Route {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Route {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for Route {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for Route {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}
