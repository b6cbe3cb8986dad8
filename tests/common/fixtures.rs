//! Static CMS payloads used across harnesses.
//!
//! The two canonical records describe the same post, once in the nested
//! `attributes` layout and once flattened, exactly as two CMS major versions
//! would serve it.

use chrono::{DateTime, TimeZone, Utc};

/// A post in the nested layout, with relations wrapped in `data.attributes`.
pub const NESTED_POST: &str = r#"{
  "id": 42,
  "attributes": {
    "title": "Gift Ideas for Coffee Lovers",
    "slug": "gift-ideas-coffee",
    "excerpt": "Beans, grinders and more.",
    "content": [
      {"type": "heading", "children": [{"type": "text", "text": "Intro"}]},
      {"type": "paragraph", "children": [{"type": "text", "text": "Start with "}, {"type": "text", "text": "good beans."}]},
      {"type": "paragraph", "children": [{"type": "text", "text": "Then a grinder."}]}
    ],
    "publishedAt": "2024-03-05T10:00:00.000Z",
    "createdAt": "2024-03-01T08:00:00.000Z",
    "coverImage": {"data": {"id": 3, "attributes": {"url": "/uploads/coffee.jpg"}}},
    "category": {"data": {"id": 2, "attributes": {"name": "Guides", "slug": "guides"}}},
    "author": {"data": {"id": 9, "attributes": {
      "name": "Ana",
      "avatar": {"data": {"id": 4, "attributes": {"url": "https://cdn.example.com/ana.png"}}}
    }}}
  }
}"#;

/// The same post in the flat layout.
pub const FLAT_POST: &str = r#"{
  "id": 42,
  "documentId": "abc123",
  "title": "Gift Ideas for Coffee Lovers",
  "slug": "gift-ideas-coffee",
  "excerpt": "Beans, grinders and more.",
  "content": [
    {"type": "heading", "children": [{"type": "text", "text": "Intro"}]},
    {"type": "paragraph", "children": [{"type": "text", "text": "Start with "}, {"type": "text", "text": "good beans."}]},
    {"type": "paragraph", "children": [{"type": "text", "text": "Then a grinder."}]}
  ],
  "publishedAt": "2024-03-05T10:00:00.000Z",
  "createdAt": "2024-03-01T08:00:00.000Z",
  "coverImage": {"id": 3, "url": "/uploads/coffee.jpg"},
  "category": {"id": 2, "name": "Guides", "slug": "guides"},
  "author": {"id": 9, "name": "Ana", "avatar": {"id": 4, "url": "https://cdn.example.com/ana.png"}}
}"#;

/// Records the normaliser must survive without panicking.
pub const MALFORMED_RECORDS: &[&str] = &[
    "null",
    "17",
    r#""just a string""#,
    "[]",
    "{}",
    r#"{"id": null}"#,
    r#"{"id": "abc", "attributes": null}"#,
    r#"{"id": 1, "attributes": []}"#,
    r#"{"id": 2, "attributes": {"title": 5, "slug": null, "content": {"weird": true}}}"#,
    r#"{"id": 3, "attributes": {"coverImage": {"data": null}, "author": {"data": null}}}"#,
    r#"{"id": 4, "attributes": {"publishedAt": "not a date", "createdAt": ""}}"#,
];

/// Media origin the harnesses normalise against.
pub const ORIGIN: &str = "http://cms.test";

/// A fixed "now" for normalisations that fall back to the current time.
pub fn frozen_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
}

pub fn parse(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).expect("fixture must be valid JSON")
}
