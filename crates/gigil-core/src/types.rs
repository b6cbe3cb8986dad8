//! Core types for gigil-core.
//!
//! This module defines the stable output of the normaliser
//! ([`NormalizedContent`]), the CMS response envelope it is unwrapped from,
//! and the query parameters used to request blog collections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A blog post flattened out of a raw CMS record.
///
/// Every field has a defined value; the normaliser fills gaps with defaults
/// rather than leaving them empty. Built fresh on every fetch and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContent {
    /// Record id as reported by the CMS.
    pub id: i64,
    pub title: String,
    /// Always addressable: `post-{id}` when the CMS omits one.
    pub slug: String,
    pub excerpt: String,
    /// Plain text, either passed through or extracted from rich-text blocks.
    pub content: String,
    /// Absolute cover image URL, or the placeholder path.
    pub image: String,
    pub category: String,
    pub author: Author,
    /// Human-readable date, e.g. `Feb 8, 2020`.
    pub date: String,
    /// Raw publish (or creation) timestamp exactly as the CMS sent it.
    pub published_at: Option<String>,
}

/// Author byline attached to a [`NormalizedContent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Absolute avatar URL, or the placeholder path.
    pub avatar: String,
}

/// A blog category flattened out of a raw CMS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// The `{ data, meta }` wrapper every CMS collection response arrives in.
///
/// `data` is `None` both when the member is missing and when it is `null`;
/// the endpoint resolver treats either as "this collection does not exist".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmsEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<CmsMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsMeta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block from `meta.pagination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// One page of normalised posts plus whatever pagination the CMS reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    pub items: Vec<NormalizedContent>,
    pub pagination: Option<Pagination>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Sort applied when a query does not name one: newest first.
pub const DEFAULT_SORT: &str = "publishedAt:desc";

/// Which relations the CMS should expand in its response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Populate {
    /// `populate=*`
    #[default]
    All,
    /// `populate[<relation>]=*` for each named relation.
    Relations(Vec<String>),
}

/// Page request; unset members fall back to page 1 and a page size of 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Parameters for a blog collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostQuery {
    pub populate: Populate,
    /// Sort keys, joined with `,`. Empty means [`DEFAULT_SORT`].
    pub sort: Vec<String>,
    /// Filter pairs, in insertion order. A dotted key such as
    /// `category.slug.$eq` becomes `filters[category][slug][$eq]`.
    pub filters: Vec<(String, String)>,
    pub pagination: Option<PageRequest>,
}

impl BlogPostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(mut self, relations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.populate = Populate::Relations(relations.into_iter().map(Into::into).collect());
        self
    }

    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.sort.push(key.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.pagination = Some(PageRequest {
            page: Some(page),
            page_size: Some(page_size),
        });
        self
    }

    /// Unencoded query pairs in the order the CMS expects them: populate,
    /// sort, pagination, filters.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        match &self.populate {
            Populate::All => pairs.push(("populate".to_string(), "*".to_string())),
            Populate::Relations(relations) => {
                for relation in relations {
                    pairs.push((format!("populate[{relation}]"), "*".to_string()));
                }
            }
        }

        let sort = if self.sort.is_empty() {
            DEFAULT_SORT.to_string()
        } else {
            self.sort.join(",")
        };
        pairs.push(("sort".to_string(), sort));

        if let Some(page) = self.pagination {
            pairs.push((
                "pagination[page]".to_string(),
                page.page.unwrap_or(1).to_string(),
            ));
            pairs.push((
                "pagination[pageSize]".to_string(),
                page.page_size.unwrap_or(10).to_string(),
            ));
        }

        for (key, value) in &self.filters {
            let path: String = key.split('.').map(|part| format!("[{part}]")).collect();
            pairs.push((format!("filters{path}"), value.clone()));
        }

        pairs
    }
}

/// Raw record alias used at API boundaries.
pub type RawContentRecord = Value;
