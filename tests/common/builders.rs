//! Test builders: ergonomic constructors for raw CMS records and envelopes.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. The same builder renders either the nested
//! `{ id, attributes: { ... } }` shape or the flat `{ id, ... }` shape, so one
//! test can check that both normalise identically.

use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Record layout emitted by [`RawRecordBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Fields under `attributes`, relations wrapped in `data.attributes`.
    Nested,
    /// Fields at the top level, relations inlined.
    Flat,
}

/// Fluent builder for raw blog records.
///
/// # Example
///
/// ```rust
/// let record = RawRecordBuilder::new(7)
///     .title("Hello")
///     .slug("hello")
///     .cover("/uploads/a.jpg")
///     .category("News")
///     .author("Jane", Some("/uploads/jane.png"))
///     .published_at("2024-03-05T10:00:00.000Z")
///     .build(Shape::Nested);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRecordBuilder {
    id: Option<Value>,
    fields: Map<String, Value>,
    cover: Option<String>,
    category: Option<String>,
    author: Option<(String, Option<String>)>,
}

impl RawRecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(json!(id)),
            ..Self::default()
        }
    }

    /// A record with no `id` at all.
    pub fn without_id() -> Self {
        Self::default()
    }

    pub fn raw_id(mut self, id: Value) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(self, title: &str) -> Self {
        self.field("title", title)
    }

    pub fn slug(self, slug: &str) -> Self {
        self.field("slug", slug)
    }

    pub fn excerpt(self, excerpt: &str) -> Self {
        self.field("excerpt", excerpt)
    }

    /// Plain-string content.
    pub fn content(self, content: &str) -> Self {
        self.field("content", content)
    }

    /// Rich-text content: one paragraph block per entry.
    pub fn paragraphs(self, paragraphs: &[&str]) -> Self {
        let blocks: Vec<Value> = paragraphs
            .iter()
            .map(|p| json!({"type": "paragraph", "children": [{"type": "text", "text": p}]}))
            .collect();
        self.field("content", Value::Array(blocks))
    }

    pub fn published_at(self, ts: &str) -> Self {
        self.field("publishedAt", ts)
    }

    pub fn created_at(self, ts: &str) -> Self {
        self.field("createdAt", ts)
    }

    pub fn cover(mut self, url: &str) -> Self {
        self.cover = Some(url.to_string());
        self
    }

    pub fn category(mut self, name: &str) -> Self {
        self.category = Some(name.to_string());
        self
    }

    pub fn author(mut self, name: &str, avatar: Option<&str>) -> Self {
        self.author = Some((name.to_string(), avatar.map(str::to_string)));
        self
    }

    /// Set any other attribute verbatim.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self, shape: Shape) -> Value {
        let mut attrs = self.fields;

        let media = |url: &str| match shape {
            Shape::Nested => json!({"data": {"id": 1, "attributes": {"url": url}}}),
            Shape::Flat => json!({"id": 1, "url": url}),
        };
        let relation = |attributes: Value| match shape {
            Shape::Nested => json!({"data": {"id": 1, "attributes": attributes}}),
            Shape::Flat => {
                let mut inline = attributes;
                inline["id"] = json!(1);
                inline
            }
        };

        if let Some(url) = &self.cover {
            attrs.insert("coverImage".into(), media(url.as_str()));
        }
        if let Some(name) = &self.category {
            attrs.insert("category".into(), relation(json!({"name": name})));
        }
        if let Some((name, avatar)) = &self.author {
            let mut author = json!({"name": name});
            if let Some(url) = avatar {
                author["avatar"] = media(url.as_str());
            }
            attrs.insert("author".into(), relation(author));
        }

        let mut record = Map::new();
        if let Some(id) = self.id {
            record.insert("id".into(), id);
        }
        match shape {
            Shape::Nested => {
                record.insert("attributes".into(), Value::Object(attrs));
            }
            Shape::Flat => record.extend(attrs),
        }
        Value::Object(record)
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{ data: [...], meta: { pagination } }` as the CMS returns for a list.
pub fn list_envelope(records: Vec<Value>, page: u32, page_size: u32, total: u64) -> Value {
    let page_count = total.div_ceil(u64::from(page_size.max(1)));
    json!({
        "data": records,
        "meta": {
            "pagination": {
                "page": page,
                "pageSize": page_size,
                "pageCount": page_count,
                "total": total
            }
        }
    })
}

/// `{ data: record, meta: {} }` as the CMS returns for a single item.
pub fn item_envelope(record: Value) -> Value {
    json!({ "data": record, "meta": {} })
}

/// `{ success: true, data }` as the gifting API returns.
pub fn express_ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn express_err(message: &str) -> Value {
    json!({ "success": false, "error": { "message": message } })
}

/// A gift body with every required member set.
pub fn gift_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": 25.0,
        "category": "books",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}
