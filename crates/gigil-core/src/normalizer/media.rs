//! Media URL resolution.
//!
//! The CMS reports uploads as CMS-local paths (`/uploads/x.png`) unless an
//! external upload provider is configured, in which case it reports absolute
//! URLs. Either way the result handed to the UI must be loadable as-is.

/// Fallback for a media reference with no path at all.
pub const MEDIA_PLACEHOLDER: &str = "/placeholder-image.jpg";

/// `true` for `http://` and `https://` URLs (scheme matched case-insensitively).
pub fn is_absolute(url: &str) -> bool {
    let lower = |n: usize| url.get(..n).map(str::to_ascii_lowercase);
    lower(7).as_deref() == Some("http://") || lower(8).as_deref() == Some("https://")
}

/// Turn a CMS media path into a loadable URL.
///
/// Absolute URLs pass through. Relative paths are joined onto `origin` with
/// exactly one `/` between them. A missing or blank path yields `placeholder`.
pub fn resolve_media_url(path: Option<&str>, origin: &str, placeholder: &str) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return placeholder.to_string();
    };

    if is_absolute(path) {
        return path.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
