//! REST API Client
//!
//! Thin fetch wrapper over the Zai Toon backend: bearer auth, JSON or
//! multipart bodies, and envelope decoding into `ApiResult`.

mod auth;
mod envelope;
mod payload;
mod query;
mod resource_api;

use reqwasm::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::Page;

pub use auth::*;
pub use envelope::{check_envelope, parse_ack, parse_list};
pub use payload::{Encoding, Payload};
pub use query::{parse_date_input, ListParams};
pub use resource_api::HttpResourceApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request body variants
pub enum Body {
    Empty,
    Json(String),
    Multipart(web_sys::FormData),
}

/// Client bound to one base URL and (optionally) one bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request and return `(status, parsed body)`.
    ///
    /// An empty or non-JSON body decodes to `Value::Null` so error statuses
    /// still surface as `ApiError::Server`.
    pub async fn send(&self, method: HttpMethod, path: &str, body: Body) -> ApiResult<(u16, Value)> {
        let url = self.url(path);
        log::debug!("[api] {} {}", method.as_str(), url);

        let mut req = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        req = req.header("Accept", "application/json");
        if let Some(token) = &self.token {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }
        req = match body {
            Body::Empty => req,
            Body::Json(json) => req.header("Content-Type", "application/json").body(json),
            // The browser sets the multipart boundary itself
            Body::Multipart(form) => req.body(form),
        };

        let resp = req.send().await.map_err(|e| {
            log::warn!("[api] {} {} failed: {}", method.as_str(), url, e);
            ApiError::Network(e.to_string())
        })?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        if !(200..300).contains(&status) {
            log::warn!("[api] {} {} -> {}", method.as_str(), url, status);
        }
        Ok((status, body))
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, params: &ListParams) -> ApiResult<Page<T>> {
        let path = format!("{}{}", path, params.to_query_string());
        let (status, body) = self.send(HttpMethod::Get, &path, Body::Empty).await?;
        parse_list(status, body)
    }

    /// POST/PUT a serializable body; returns the raw envelope
    pub async fn send_json<B: Serialize>(&self, method: HttpMethod, path: &str, body: &B) -> ApiResult<Value> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let (status, body) = self.send(method, path, Body::Json(json)).await?;
        check_envelope(status, body)
    }

    /// POST/PUT form values, choosing JSON or multipart by content
    pub async fn send_payload(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &Payload<web_sys::File>,
    ) -> ApiResult<Option<String>> {
        let body = match payload.encoding() {
            Encoding::Json => Body::Json(payload.to_json().to_string()),
            Encoding::Multipart => Body::Multipart(payload.to_form_data()?),
        };
        let (status, body) = self.send(method, path, body).await?;
        parse_ack(status, body)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Option<String>> {
        let (status, body) = self.send(HttpMethod::Delete, path, Body::Empty).await?;
        parse_ack(status, body)
    }
}
