//! Domain-specific assertion macros for gigil harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! normalisation guarantee was broken and for *which* record.

// ---------------------------------------------------------------------------
// Shape assertions
// ---------------------------------------------------------------------------

/// Assert that a `NormalizedContent` is fully populated: every display string
/// non-empty and every URL usable as an `<img src>`.
///
/// ```rust
/// assert_flat_shape!(post);
/// ```
#[macro_export]
macro_rules! assert_flat_shape {
    ($content:expr) => {{
        let c: &gigil_core::NormalizedContent = &$content;
        for (name, value) in [
            ("title", &c.title),
            ("slug", &c.slug),
            ("image", &c.image),
            ("category", &c.category),
            ("author.name", &c.author.name),
            ("author.avatar", &c.author.avatar),
            ("date", &c.date),
        ] {
            if value.is_empty() {
                panic!("assert_flat_shape! failed: `{}` is empty in {:#?}", name, c);
            }
        }
        for (name, url) in [("image", &c.image), ("author.avatar", &c.author.avatar)] {
            if !(url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")) {
                panic!(
                    "assert_flat_shape! failed: `{}` = {:?} is neither absolute nor root-relative",
                    name, url
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Request assertions
// ---------------------------------------------------------------------------

/// Assert how many requests the fake server has seen for a path.
///
/// ```rust
/// assert_hits!(api, "/api/articles", 1);
/// ```
#[macro_export]
macro_rules! assert_hits {
    ($api:expr, $path:expr, $expected:expr) => {{
        let path: &str = $path;
        let expected: usize = $expected;
        let actual = $api.hits(path).await;
        if actual != expected {
            panic!(
                "assert_hits! failed for {:?}\n  expected: {}\n  actual:   {}\n  all requests: {:#?}",
                path,
                expected,
                actual,
                $api.requests().await
            );
        }
    }};
}

/// Assert that the last request carried a query pair, comparing decoded
/// values.
#[macro_export]
macro_rules! assert_query_has {
    ($request:expr, $key:expr, $value:expr) => {{
        let request = &$request;
        let key: &str = $key;
        let value: &str = $value;
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(request.query.as_bytes())
            .into_owned()
            .collect();
        if !pairs.iter().any(|(k, v)| k == key && v == value) {
            panic!(
                "assert_query_has! failed: {}={} not in query {:?}\n  decoded: {:?}",
                key, value, request.query, pairs
            );
        }
    }};
}
