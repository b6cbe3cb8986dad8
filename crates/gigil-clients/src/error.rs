//! Client errors.
//!
//! [`ClientError`] covers everything that can go wrong between issuing a
//! request and decoding its body. Non-2xx responses become
//! [`ClientError::Api`] carrying an [`ApiError`] built from the response body.

use serde_json::Value;

/// Error reported by an upstream API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}{}", status_suffix(.status))]
pub struct ApiError {
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Application error code from the body, if any.
    pub code: Option<String>,
    /// The whole decoded body, for diagnostics.
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
            details: None,
        }
    }

    /// Build from a non-2xx response.
    ///
    /// The message is taken from `message`, then `error.message`, then a
    /// generic status line. The code comes from `error.code`.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let details = serde_json::from_slice::<Value>(body).ok();

        let text_at = |path: &[&str]| -> Option<String> {
            let mut v = details.as_ref()?;
            for key in path {
                v = v.get(key)?;
            }
            v.as_str().filter(|s| !s.is_empty()).map(str::to_string)
        };

        let message = text_at(&["message"])
            .or_else(|| text_at(&["error", "message"]))
            .unwrap_or_else(|| format!("request failed with status {status}"));
        let code = text_at(&["error", "code"]);

        Self {
            message,
            status: Some(status),
            code,
            details,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid request URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("request timed out after {0}ms")]
    Timeout(u64),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// `true` when no response was received at all.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Timeout(_) | ClientError::Body(_)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(api) => api.status,
            _ => None,
        }
    }

    /// Flatten into the [`ApiError`] shape UI layers display.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            ClientError::Api(api) => api.clone(),
            other => ApiError::new(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
