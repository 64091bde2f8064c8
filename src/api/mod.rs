//! Backend API Bindings
//!
//! REST bindings to the classroom backend, organized by domain.
//! Every request goes through a [`Transport`]; the browser build uses
//! [`HttpTransport`], tests use a recording mock.

mod auth;
mod chat;
mod http;
mod resources;
mod settings;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::storage::TokenStore;

pub use http::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request as handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API origin, e.g. `/api/students/3`
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Moves one request over the wire.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// Authenticated JSON client
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, tokens: Rc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authenticated: bool,
    ) -> ApiResult<ApiResponse> {
        let bearer = if authenticated { self.tokens.get() } else { None };
        debug!("[API] {} {}", method, path);

        let response = self
            .transport
            .send(ApiRequest { method, path: path.to_string(), body, bearer })
            .await?;

        match response.status {
            200..=299 => Ok(response),
            401 => Err(ApiError::Unauthorized),
            status => Err(ApiError::Status { status, body: response.body }),
        }
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ApiResult<T> {
        Ok(serde_json::from_str(&response.body)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(Method::Get, path, None, true).await?;
        Self::decode(&response)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::Post, path, Some(body), true).await?;
        Self::decode(&response)
    }

    /// POST without a request body (action endpoints such as `/use`)
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(Method::Post, path, None, true).await?;
        Self::decode(&response)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::Put, path, Some(body), true).await?;
        Self::decode(&response)
    }

    /// DELETE; the body (usually empty, 204) is ignored.
    pub(crate) async fn delete_path(&self, path: &str) -> ApiResult<()> {
        self.execute(Method::Delete, path, None, true).await?;
        Ok(())
    }
}
