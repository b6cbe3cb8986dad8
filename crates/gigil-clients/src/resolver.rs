//! Endpoint resolver — works out which collection name serves blog content.
//!
//! The collection name differs between CMS deployments, so unless one is
//! configured explicitly it is discovered by probing a fixed list of likely
//! names with a one-item read. The first name that answers with a non-null
//! `data` member wins and is kept for the rest of the process.
//!
//! ```text
//! Unresolved ──resolve()──► Resolving ──first hit / exhausted──► Resolved(path)
//! ```
//!
//! Resolution never fails. If every candidate misses, [`DEFAULT_ENDPOINT`] is
//! committed and downstream fetches simply come back empty.

use crate::transport::{encode_query, Transport};
use gigil_core::CmsEnvelope;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Collection names tried, in order, when none is configured.
pub const CANDIDATE_ENDPOINTS: &[&str] = &[
    "blog-posts",
    "posts",
    "articles",
    "blogs",
    "blog-post",
    "content",
    "entries",
    "blogposts",
    "blog_posts",
];

/// Committed when no candidate answers.
pub const DEFAULT_ENDPOINT: &str = "blog-posts";

/// Observable lifecycle of an [`EndpointResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverState {
    Unresolved,
    Resolving,
    Resolved(String),
}

/// Resolves and memoises the blog collection name.
///
/// Construct one per process and share it behind an [`Arc`]. Concurrent
/// callers that arrive while a probe round is in flight wait for that round
/// instead of starting their own.
pub struct EndpointResolver<T> {
    transport: Arc<T>,
    explicit: Option<String>,
    candidates: Vec<String>,
    resolved: OnceCell<String>,
    probing: AtomicBool,
}

impl<T: Transport> EndpointResolver<T> {
    /// A resolver probing [`CANDIDATE_ENDPOINTS`], or returning `explicit`
    /// without probing when it is set and non-blank.
    pub fn new(transport: Arc<T>, explicit: Option<&str>) -> Self {
        Self::with_candidates(transport, explicit, CANDIDATE_ENDPOINTS.iter().copied())
    }

    pub fn with_candidates<S: Into<String>>(
        transport: Arc<T>,
        explicit: Option<&str>,
        candidates: impl IntoIterator<Item = S>,
    ) -> Self {
        let explicit = explicit
            .map(|e| e.trim().trim_matches('/'))
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Self {
            transport,
            explicit,
            candidates: candidates.into_iter().map(Into::into).collect(),
            resolved: OnceCell::new(),
            probing: AtomicBool::new(false),
        }
    }

    /// The collection name to use for blog requests.
    ///
    /// Explicit configuration wins outright. Otherwise the first call probes
    /// the candidates (sequentially, stopping at the first hit) and every later
    /// call returns the memoised answer without touching the network.
    pub async fn resolve(&self) -> &str {
        if let Some(explicit) = &self.explicit {
            return explicit;
        }

        self.resolved
            .get_or_init(|| async move {
                let _probing = ProbingFlag::raise(&self.probing);
                self.probe_all().await
            })
            .await
    }

    /// Current lifecycle state. An explicitly configured resolver is always
    /// [`ResolverState::Resolved`].
    pub fn state(&self) -> ResolverState {
        if let Some(explicit) = &self.explicit {
            return ResolverState::Resolved(explicit.clone());
        }
        match self.resolved.get() {
            Some(path) => ResolverState::Resolved(path.clone()),
            None if self.probing.load(Ordering::Acquire) => ResolverState::Resolving,
            None => ResolverState::Unresolved,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Does `candidate` answer a one-item read with non-null `data`?
    ///
    /// Transport failures, non-2xx statuses, and undecodable bodies all count
    /// as "no".
    pub async fn probe(&self, candidate: &str) -> bool {
        let path = format!(
            "/{candidate}?{}",
            encode_query([("pagination[pageSize]", "1")])
        );

        match self.transport.get(&path).await {
            Ok(resp) if resp.is_success() => match resp.json::<CmsEnvelope<Value>>() {
                Ok(envelope) => envelope.data.is_some(),
                Err(e) => {
                    tracing::debug!(candidate, error = %e, "probe body was not a CMS envelope");
                    false
                }
            },
            Ok(resp) => {
                tracing::debug!(candidate, status = resp.status, "probe rejected");
                false
            }
            Err(e) => {
                tracing::debug!(candidate, error = %e, "probe failed");
                false
            }
        }
    }

    async fn probe_all(&self) -> String {
        for candidate in &self.candidates {
            if self.probe(candidate).await {
                tracing::info!(endpoint = %candidate, "found working blog endpoint");
                return candidate.clone();
            }
        }

        tracing::warn!(
            tried = self.candidates.len(),
            fallback = DEFAULT_ENDPOINT,
            "no blog endpoint answered; falling back to default"
        );
        DEFAULT_ENDPOINT.to_string()
    }
}

/// Holds `Resolving` visible for as long as a probe round is alive, including
/// when the round is abandoned mid-flight.
struct ProbingFlag<'a>(&'a AtomicBool);

impl<'a> ProbingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for ProbingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
