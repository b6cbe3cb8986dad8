//! Field fallback chains.
//!
//! Each output field of [`NormalizedContent`](crate::NormalizedContent) is
//! read through a [`FieldChain`]: an ordered list of key paths into the field
//! container. The first path that lands on a non-empty string wins. A missing
//! key, a `null`, or a non-object anywhere along a path only disqualifies that
//! one candidate.

use serde_json::Value;

/// A key path into a JSON object, e.g. `["author", "data", "attributes", "name"]`.
pub type KeyPath = &'static [&'static str];

/// An ordered list of candidate key paths for one output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChain {
    name: &'static str,
    candidates: &'static [KeyPath],
}

impl FieldChain {
    pub const fn new(name: &'static str, candidates: &'static [KeyPath]) -> Self {
        Self { name, candidates }
    }

    /// Name of the output field this chain feeds.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Candidate paths in evaluation order.
    pub fn candidates(&self) -> &'static [KeyPath] {
        self.candidates
    }

    /// First candidate that resolves to a non-empty string.
    pub fn resolve<'a>(&self, container: &'a Value) -> Option<&'a str> {
        self.resolve_with(container, |s| Some(s))
    }

    /// First candidate that resolves to a non-empty string *and* is accepted
    /// by `accept`. Rejected values advance the chain like absent ones.
    pub fn resolve_with<'a, T>(
        &self,
        container: &'a Value,
        mut accept: impl FnMut(&'a str) -> Option<T>,
    ) -> Option<T> {
        self.candidates
            .iter()
            .filter_map(|path| lookup_str(container, path))
            .find_map(|s| accept(s))
    }

    /// Index of the candidate that [`resolve`](Self::resolve) would pick.
    pub fn winning_candidate(&self, container: &Value) -> Option<usize> {
        self.candidates
            .iter()
            .position(|path| lookup_str(container, path).is_some())
    }
}

/// Walk `path` through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Walk `path` and return the string there, if it is a non-empty string.
pub fn lookup_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path)?.as_str().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Chains
// ---------------------------------------------------------------------------

pub const TITLE: FieldChain = FieldChain::new("title", &[&["title"]]);

pub const SLUG: FieldChain = FieldChain::new("slug", &[&["slug"]]);

pub const EXCERPT: FieldChain = FieldChain::new("excerpt", &[&["excerpt"]]);

/// Cover image only: nested media envelope first, then the flattened form.
/// Other media relations never stand in for a missing cover.
pub const IMAGE: FieldChain = FieldChain::new(
    "image",
    &[
        &["coverImage", "data", "attributes", "url"],
        &["coverImage", "url"],
    ],
);

/// Category name, then the post's own slug.
pub const CATEGORY: FieldChain = FieldChain::new(
    "category",
    &[
        &["category", "data", "attributes", "name"],
        &["category", "name"],
        &["slug"],
    ],
);

pub const AUTHOR_NAME: FieldChain = FieldChain::new(
    "author.name",
    &[
        &["author", "data", "attributes", "name"],
        &["author", "name"],
        &["createdBy", "firstname"],
    ],
);

pub const AUTHOR_AVATAR: FieldChain = FieldChain::new(
    "author.avatar",
    &[
        &["author", "data", "attributes", "avatar", "data", "attributes", "url"],
        &["author", "avatar", "data", "attributes", "url"],
        &["author", "avatar", "url"],
        &["createdBy", "avatar", "data", "attributes", "url"],
    ],
);

/// Used for the human-readable date: publish time, then creation time.
pub const DATE: FieldChain = FieldChain::new("date", &[&["publishedAt"], &["createdAt"]]);

pub const CATEGORY_NAME: FieldChain = FieldChain::new("name", &[&["name"]]);

pub const CATEGORY_SLUG: FieldChain = FieldChain::new("slug", &[&["slug"]]);

pub const CATEGORY_DESCRIPTION: FieldChain =
    FieldChain::new("description", &[&["description"]]);
