//! Normalizer — maps raw CMS records into [`NormalizedContent`] values.
//!
//! Steps, in order:
//!
//! 1. **Attribute extraction.** Pick the field container once: the
//!    `attributes` envelope if the record has one, otherwise the record itself
//!    without its `id`.
//! 2. **Field chains.** Read every output field through its [`FieldChain`],
//!    falling back to a literal default when no candidate is present.
//! 3. **Derivations.** Rich text → plain text, excerpt from content, media
//!    paths → absolute URLs, timestamps → display dates.
//!
//! Nothing here can fail: a malformed record produces a record made of
//! defaults, never an error, so one bad item cannot take down a whole list.

pub mod chain;
pub mod date;
pub mod media;
pub mod rich_text;

use crate::config::CmsConfig;
use crate::types::{Author, Category, NormalizedContent};
use chain::FieldChain;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::borrow::Cow;

pub const UNTITLED: &str = "Untitled Post";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const ANONYMOUS: &str = "Anonymous";

/// Characters of content text used when a record has no explicit excerpt.
pub const EXCERPT_CHARS: usize = 180;

/// Converts raw CMS records into [`NormalizedContent`].
///
/// Holds only the deployment-specific bits (media origin and placeholder
/// paths); safe to share across tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    media_origin: String,
    image_placeholder: String,
    avatar_placeholder: String,
}

impl Normalizer {
    /// A normaliser resolving relative media against `media_origin`, with the
    /// default placeholder paths.
    pub fn new(media_origin: impl Into<String>) -> Self {
        let defaults = CmsConfig::default();
        Self {
            media_origin: media_origin.into(),
            image_placeholder: defaults.image_placeholder,
            avatar_placeholder: defaults.avatar_placeholder,
        }
    }

    pub fn from_config(cms: &CmsConfig) -> Self {
        Self {
            media_origin: cms.media_origin(),
            image_placeholder: cms.image_placeholder.clone(),
            avatar_placeholder: cms.avatar_placeholder.clone(),
        }
    }

    pub fn with_placeholders(
        mut self,
        image: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        self.image_placeholder = image.into();
        self.avatar_placeholder = avatar.into();
        self
    }

    pub fn media_origin(&self) -> &str {
        &self.media_origin
    }

    /// Normalise one record, using the current time when it carries no usable
    /// date.
    pub fn normalize(&self, raw: &Value) -> NormalizedContent {
        self.normalize_at(raw, Utc::now())
    }

    /// Normalise one record with an explicit clock.
    pub fn normalize_at(&self, raw: &Value, now: DateTime<Utc>) -> NormalizedContent {
        let id = record_id(raw);
        let attrs = extract_attributes(raw);
        let attrs = attrs.as_ref();

        let content = rich_text::content_text(attrs.get("content"));
        let excerpt = match chain::EXCERPT.resolve(attrs) {
            Some(explicit) => explicit.to_string(),
            None => content.chars().take(EXCERPT_CHARS).collect(),
        };

        let image = media::resolve_media_url(
            chain::IMAGE.resolve(attrs),
            &self.media_origin,
            &self.image_placeholder,
        );
        let avatar = media::resolve_media_url(
            chain::AUTHOR_AVATAR.resolve(attrs),
            &self.media_origin,
            &self.avatar_placeholder,
        );

        let date = chain::DATE
            .resolve_with(attrs, date::parse_timestamp)
            .unwrap_or(now);

        NormalizedContent {
            id,
            title: or_default(chain::TITLE, attrs, UNTITLED),
            slug: chain::SLUG
                .resolve(attrs)
                .map(str::to_string)
                .unwrap_or_else(|| format!("post-{id}")),
            excerpt,
            content,
            image,
            category: or_default(chain::CATEGORY, attrs, UNCATEGORIZED),
            author: Author {
                name: or_default(chain::AUTHOR_NAME, attrs, ANONYMOUS),
                avatar,
            },
            date: date::format_display(date),
            published_at: chain::DATE.resolve(attrs).map(str::to_string),
        }
    }

    /// Normalise every element of a `data` array. Anything other than an
    /// array yields no records.
    pub fn normalize_all(&self, data: &Value) -> Vec<NormalizedContent> {
        let now = Utc::now();
        data.as_array()
            .map(|records| records.iter().map(|r| self.normalize_at(r, now)).collect())
            .unwrap_or_default()
    }
}

/// Flatten a raw category record. A category without a name falls back to its
/// slug, and vice versa.
pub fn normalize_category(raw: &Value) -> Category {
    let id = record_id(raw);
    let attrs = extract_attributes(raw);
    let attrs = attrs.as_ref();

    let name = chain::CATEGORY_NAME.resolve(attrs);
    let slug = chain::CATEGORY_SLUG.resolve(attrs);

    Category {
        id,
        name: name.or(slug).unwrap_or(UNCATEGORIZED).to_string(),
        slug: slug
            .map(str::to_string)
            .unwrap_or_else(|| format!("category-{id}")),
        description: chain::CATEGORY_DESCRIPTION.resolve(attrs).map(str::to_string),
    }
}

/// Select the field container of a raw record.
///
/// An object-valued `attributes` member is the container. Otherwise the record
/// itself is, minus its `id`. Records that are not objects have no fields.
pub fn extract_attributes(raw: &Value) -> Cow<'_, Value> {
    let Some(record) = raw.as_object() else {
        return Cow::Owned(Value::Object(Map::new()));
    };

    match record.get("attributes") {
        Some(attrs @ Value::Object(_)) => Cow::Borrowed(attrs),
        _ if !record.contains_key("id") => Cow::Borrowed(raw),
        _ => {
            let mut fields = record.clone();
            fields.remove("id");
            Cow::Owned(Value::Object(fields))
        }
    }
}

/// Top-level `id` as an integer. Numeric strings and whole floats are
/// accepted; anything else, including values outside `i64`, is `0`.
pub fn record_id(raw: &Value) -> i64 {
    match raw.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(whole_f64))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

fn whole_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn or_default(chain: FieldChain, attrs: &Value, default: &str) -> String {
    chain.resolve(attrs).unwrap_or(default).to_string()
}
