//! Pluralization for report lines.

/// `""` for exactly one, `"s"` otherwise.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `3 documents`, `1 link`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "document"), "0 documents");
        assert_eq!(plural_count(1, "link"), "1 link");
        assert_eq!(plural_count(7, "route"), "7 routes");
    }
}
