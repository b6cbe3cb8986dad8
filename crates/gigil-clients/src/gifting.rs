//! Gifting client: CRUD pass-through for gifts and gift lists.
//!
//! Every response arrives as `{ success, data?, error? }`. A successful
//! envelope with data is unwrapped; anything else becomes an
//! [`ApiError`] carrying the service's message, or a fixed message naming the
//! operation when the service gave none.

use crate::error::{ApiError, ClientError, Result};
use crate::transport::{encode_query, encode_segment, Transport, TransportResponse};
use gigil_core::gifting::{
    AddItemToListRequest, CreateGiftListRequest, CreateGiftRequest, ExpressApiResponse, Gift,
    GiftItem, GiftList, GiftQuery, UpdateGiftRequest,
};
use hyper::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub struct GiftingClient<T> {
    transport: Arc<T>,
}

impl<T: Transport> GiftingClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn fetch_gifts(&self, query: &GiftQuery) -> Result<Vec<Gift>> {
        let path = format!("/gifts?{}", encode_query(query.to_pairs()));
        self.required(Method::GET, &path, None, "Failed to fetch gifts").await
    }

    pub async fn fetch_gift_by_id(&self, id: &str) -> Result<Option<Gift>> {
        let path = format!("/gifts/{}", encode_segment(id));
        self.optional(&path, "Failed to fetch gift").await
    }

    pub async fn create_gift(&self, gift: &CreateGiftRequest) -> Result<Gift> {
        let body = to_body(gift)?;
        self.required(Method::POST, "/gifts", Some(body), "Failed to create gift").await
    }

    pub async fn update_gift(&self, id: &str, changes: &UpdateGiftRequest) -> Result<Gift> {
        let path = format!("/gifts/{}", encode_segment(id));
        let body = to_body(changes)?;
        self.required(Method::PUT, &path, Some(body), "Failed to update gift").await
    }

    pub async fn delete_gift(&self, id: &str) -> Result<()> {
        let path = format!("/gifts/{}", encode_segment(id));
        self.acknowledged(Method::DELETE, &path, "Failed to delete gift").await
    }

    pub async fn fetch_gift_lists(&self) -> Result<Vec<GiftList>> {
        self.required(Method::GET, "/gift-lists", None, "Failed to fetch gift lists").await
    }

    pub async fn fetch_gift_list_by_id(&self, id: &str) -> Result<Option<GiftList>> {
        let path = format!("/gift-lists/{}", encode_segment(id));
        self.optional(&path, "Failed to fetch gift list").await
    }

    pub async fn create_gift_list(&self, list: &CreateGiftListRequest) -> Result<GiftList> {
        let body = to_body(list)?;
        self.required(Method::POST, "/gift-lists", Some(body), "Failed to create gift list")
            .await
    }

    pub async fn add_item_to_list(
        &self,
        list_id: &str,
        item: &AddItemToListRequest,
    ) -> Result<GiftItem> {
        let path = format!("/gift-lists/{}/items", encode_segment(list_id));
        let body = to_body(item)?;
        self.required(Method::POST, &path, Some(body), "Failed to add item to list").await
    }

    pub async fn remove_item_from_list(&self, list_id: &str, item_id: &str) -> Result<()> {
        let path = format!(
            "/gift-lists/{}/items/{}",
            encode_segment(list_id),
            encode_segment(item_id)
        );
        self.acknowledged(Method::DELETE, &path, "Failed to remove item from list")
            .await
    }

    /// `true` when `GET /health` answers 200. Never errors.
    pub async fn check_health(&self) -> bool {
        match self.transport.get("/health").await {
            Ok(resp) => resp.status == 200,
            Err(e) => {
                tracing::error!(error = %e, "health check failed");
                false
            }
        }
    }

    /// The operation must yield data.
    async fn required<D: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        fallback: &str,
    ) -> Result<D> {
        let envelope = self.call::<D>(method, path, body, fallback).await?;
        match envelope {
            ExpressApiResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            other => Err(envelope_error(other.error.map(|e| e.message), fallback, path)),
        }
    }

    /// A lookup: an unsuccessful or empty envelope means "not found".
    async fn optional<D: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<Option<D>> {
        let envelope = self.call::<D>(Method::GET, path, None, fallback).await?;
        Ok(if envelope.success { envelope.data } else { None })
    }

    /// The operation only needs `success: true`.
    async fn acknowledged(&self, method: Method, path: &str, fallback: &str) -> Result<()> {
        let envelope = self.call::<Value>(method, path, None, fallback).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(envelope_error(envelope.error.map(|e| e.message), fallback, path))
        }
    }

    async fn call<D: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        fallback: &str,
    ) -> Result<ExpressApiResponse<D>> {
        let resp = self
            .transport
            .send(method.clone(), path, body)
            .await
            .inspect_err(|e| tracing::error!(%method, path, error = %e, "{fallback}"))?;
        decode(resp).inspect_err(|e| tracing::error!(%method, path, error = %e, "{fallback}"))
    }
}

fn decode<D: DeserializeOwned>(resp: TransportResponse) -> Result<ExpressApiResponse<D>> {
    if !resp.is_success() {
        return Err(resp.into_api_error());
    }
    resp.json()
}

fn envelope_error(message: Option<String>, fallback: &str, path: &str) -> ClientError {
    let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_string());
    tracing::error!(path, %message, "gifting request rejected");
    ClientError::Api(ApiError::new(message))
}

fn to_body<S: Serialize>(value: &S) -> Result<Value> {
    serde_json::to_value(value).map_err(Into::into)
}
