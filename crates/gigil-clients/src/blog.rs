//! Blog client — fetches posts from the CMS and normalises them.
//!
//! Every request path is built from the collection name handed out by the
//! shared [`EndpointResolver`], and every record in the response goes through
//! the [`Normalizer`] before it is returned.

use crate::error::Result;
use crate::resolver::EndpointResolver;
use crate::transport::{encode_query, Transport};
use gigil_core::normalizer::normalize_category;
use gigil_core::{BlogPostQuery, Category, CmsEnvelope, ContentPage, NormalizedContent, Normalizer};
use serde_json::Value;
use std::sync::Arc;

/// Collection that serves blog categories.
pub const CATEGORIES_PATH: &str = "/categories";

pub struct BlogClient<T> {
    transport: Arc<T>,
    resolver: Arc<EndpointResolver<T>>,
    normalizer: Normalizer,
}

impl<T: Transport> BlogClient<T> {
    pub fn new(transport: Arc<T>, resolver: Arc<EndpointResolver<T>>, normalizer: Normalizer) -> Self {
        Self {
            transport,
            resolver,
            normalizer,
        }
    }

    pub fn resolver(&self) -> &Arc<EndpointResolver<T>> {
        &self.resolver
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Posts matching `query`, normalised. A response whose `data` is not an
    /// array yields an empty list.
    pub async fn fetch_posts(&self, query: &BlogPostQuery) -> Result<Vec<NormalizedContent>> {
        Ok(self.fetch_posts_page(query).await?.items)
    }

    /// Like [`fetch_posts`](Self::fetch_posts), keeping the pagination block.
    pub async fn fetch_posts_page(&self, query: &BlogPostQuery) -> Result<ContentPage> {
        let endpoint = self.resolver.resolve().await;
        let path = format!("/{endpoint}?{}", encode_query(query.to_pairs()));

        let envelope: CmsEnvelope<Value> = self
            .transport
            .get(&path)
            .await
            .and_then(|resp| resp.into_json())
            .inspect_err(|e| tracing::error!(endpoint, error = %e, "error fetching blog posts"))?;

        let items = envelope
            .data
            .as_ref()
            .map(|data| self.normalizer.normalize_all(data))
            .unwrap_or_default();

        Ok(ContentPage {
            items,
            pagination: envelope.meta.and_then(|m| m.pagination),
        })
    }

    /// One post by numeric id. `None` when the CMS reports no such record.
    pub async fn fetch_post_by_id(&self, id: i64) -> Result<Option<NormalizedContent>> {
        let endpoint = self.resolver.resolve().await;
        let path = format!("/{endpoint}/{id}?{}", encode_query([("populate", "*")]));

        let resp = self.transport.get(&path).await.inspect_err(|e| {
            tracing::error!(endpoint, id, error = %e, "error fetching blog post");
        })?;
        if resp.status == 404 {
            tracing::debug!(endpoint, id, "blog post not found");
            return Ok(None);
        }

        let envelope: CmsEnvelope<Value> = resp.into_json().inspect_err(|e| {
            tracing::error!(endpoint, id, error = %e, "error fetching blog post");
        })?;

        Ok(envelope
            .data
            .filter(Value::is_object)
            .map(|record| self.normalizer.normalize(&record)))
    }

    /// One post by slug: the first record the CMS returns for an exact-match
    /// slug filter.
    pub async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<NormalizedContent>> {
        let endpoint = self.resolver.resolve().await;
        let path = format!(
            "/{endpoint}?{}",
            encode_query([("filters[slug][$eq]", slug), ("populate", "*")])
        );

        let envelope: CmsEnvelope<Value> = self
            .transport
            .get(&path)
            .await
            .and_then(|resp| resp.into_json())
            .inspect_err(|e| {
                tracing::error!(endpoint, slug, error = %e, "error fetching blog post by slug");
            })?;

        Ok(envelope
            .data
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .map(|record| self.normalizer.normalize(record)))
    }

    /// All blog categories.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let envelope: CmsEnvelope<Value> = self
            .transport
            .get(CATEGORIES_PATH)
            .await
            .and_then(|resp| resp.into_json())
            .inspect_err(|e| tracing::error!(error = %e, "error fetching categories"))?;

        Ok(envelope
            .data
            .as_ref()
            .and_then(Value::as_array)
            .map(|records| records.iter().map(normalize_category).collect())
            .unwrap_or_default())
    }
}
