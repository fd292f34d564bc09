//! Request path normalization.
//!
//! The backend mounts every collection at `/<name>/`. Paths that address a
//! whole collection are rewritten to carry the trailing slash before
//! dispatch. Item paths (`/classes/42`) and the auth endpoints, which are
//! mounted without a slash, go out untouched.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::collections::BTreeSet;

/// Auth endpoints served at their bare path.
pub const DEFAULT_EXEMPT_SEGMENTS: [&str; 4] = ["me", "login", "register", "verify-token"];

/// Substrings that disable the rewrite wherever they appear in the path.
pub const DEFAULT_EXEMPT_SUBSTRINGS: [&str; 1] = ["balance"];

/// Which single-segment paths keep their bare form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeRules {
    exempt_segments: BTreeSet<String>,
    exempt_substrings: Vec<String>,
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self {
            exempt_segments: DEFAULT_EXEMPT_SEGMENTS.iter().map(|s| (*s).to_owned()).collect(),
            exempt_substrings: DEFAULT_EXEMPT_SUBSTRINGS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl NormalizeRules {
    /// Rules with no exemptions at all.
    pub fn none() -> Self {
        Self { exempt_segments: BTreeSet::new(), exempt_substrings: Vec::new() }
    }

    #[must_use]
    pub fn exempt_segment(mut self, segment: impl Into<String>) -> Self {
        self.exempt_segments.insert(segment.into());
        self
    }

    #[must_use]
    pub fn exempt_substring(mut self, needle: impl Into<String>) -> Self {
        self.exempt_substrings.push(needle.into());
        self
    }

    fn is_exempt(&self, full_path: &str, segment: &str) -> bool {
        self.exempt_segments.contains(segment)
            || self.exempt_substrings.iter().any(|needle| full_path.contains(needle.as_str()))
    }

    /// Normalize `path` for dispatch.
    ///
    /// The segment ends at the first `?` or `#`; everything from there on is
    /// reattached verbatim after the trailing slash, except a bare `?`.
    /// The substring check runs against the slash-prefixed path including its
    /// query, so `/payments?note=balance` is left alone too.
    pub fn normalize(&self, path: &str) -> String {
        let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
        let (route, tail) = path.split_at(path.find(['?', '#']).unwrap_or(path.len()));

        let mut segments = route.split('/').filter(|s| !s.is_empty());
        let (Some(segment), None) = (segments.next(), segments.next()) else {
            return path;
        };
        if self.is_exempt(&path, segment) {
            return path;
        }

        let tail = if tail == "?" { "" } else { tail };
        format!("/{segment}/{tail}")
    }
}

/// Normalize with the default exemptions.
pub fn normalize_path(path: &str) -> String {
    NormalizeRules::default().normalize(path)
}
