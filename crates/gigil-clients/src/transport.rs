//! HTTP transport.
//!
//! [`Transport`] is the seam between the clients and the network: the
//! resolver and the API clients only ever see status codes and raw bodies.
//! [`HyperTransport`] is the production implementation over
//! `hyper_util`'s pooled client; tests substitute scripted transports.
//!
//! No retries happen here. A failed request is reported once and the caller
//! decides what to do about it.

use crate::error::{ClientError, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Decode a 2xx body as JSON; turn anything else into an
    /// [`ApiError`](crate::error::ApiError).
    pub fn into_json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(self.into_api_error());
        }
        self.json()
    }

    pub fn into_api_error(self) -> ClientError {
        ClientError::Api(crate::error::ApiError::from_response(self.status, &self.body))
    }
}

/// Issues requests relative to a fixed base URL.
pub trait Transport: Send + Sync {
    /// Send `method` to `path_and_query` (which starts with `/`), with an
    /// optional JSON body. Any received response is `Ok`, whatever its status.
    fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;

    fn get(&self, path_and_query: &str) -> impl Future<Output = Result<TransportResponse>> + Send {
        self.send(Method::GET, path_and_query, None)
    }
}

/// [`Transport`] over plain HTTP using hyper's pooled legacy client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    timeout: Duration,
}

impl HyperTransport {
    /// `base_url` is the API root, e.g. `http://localhost:1337/api`.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn uri_for(&self, path_and_query: &str) -> Result<Uri> {
        let full = format!("{}{}", self.base_url, path_and_query);
        full.parse::<Uri>()
            .map_err(|source| ClientError::InvalidUri { uri: full, source })
    }

    async fn execute(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse> {
        let uri = self.uri_for(path_and_query)?;
        let payload = match body {
            Some(value) => Bytes::from(serde_json::to_vec(&value)?),
            None => Bytes::new(),
        };

        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(Full::new(payload))?;

        tracing::debug!(%method, path = path_and_query, "sending request");

        let response = self.client.request(request).await?;
        let status = response.status().as_u16();
        let body = response.into_body().collect().await?.to_bytes();

        tracing::debug!(%method, path = path_and_query, status, bytes = body.len(), "received response");

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HyperTransport {
    fn send(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        let timeout = self.timeout;
        async move {
            match tokio::time::timeout(timeout, self.execute(method, path_and_query, body)).await {
                Ok(result) => result,
                Err(_) => Err(ClientError::Timeout(timeout.as_millis() as u64)),
            }
        }
    }
}

/// Percent-encode `pairs` as a query string, without the leading `?`.
pub fn encode_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
