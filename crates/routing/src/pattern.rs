//! Path patterns for the route table.

/// A route path pattern. Segments starting with `:` match any single
/// non-empty segment (`/products/:id` matches `/products/6723ab`).
///
/// Patterns are build-time constants, so this stays `&'static` and
/// const-constructible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePattern(&'static str);

impl RoutePattern {
    pub const fn new(pattern: &'static str) -> Self {
        Self(pattern)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Match a concrete path against this pattern.
    ///
    /// Trailing slashes are ignored on both sides; matching is otherwise
    /// exact and case-sensitive.
    pub fn matches(&self, path: &str) -> bool {
        let mut expected = segments(self.0);
        let mut actual = segments(path);

        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(pattern), Some(segment)) => {
                    if !pattern.starts_with(':') && pattern != segment {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl core::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_matches('/').split('/').filter(|s| !s.is_empty())
}
