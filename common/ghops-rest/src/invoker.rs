//! Request/response types and the invoker seam
//!
//! Every operation is expressed as a [`RestRequest`] against a URI fragment
//! relative to the API root (e.g. `repos/octocat/hello/git/refs`). The
//! [`RestInvoker`] trait issues it, either as a single call or as a
//! paginated sequence of calls.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Default media type for REST v3 requests
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub uri_fragment: String,
    pub method: Method,
    pub body: Option<Value>,
    /// Overrides [`DEFAULT_ACCEPT`]
    pub accept: Option<String>,
    /// Human readable summary used in log output
    pub description: String,
}

impl RestRequest {
    pub fn new(method: Method, uri_fragment: impl Into<String>) -> Self {
        let uri_fragment = uri_fragment.into();
        Self {
            description: format!("{} {}", method, uri_fragment),
            uri_fragment,
            method,
            body: None,
            accept: None,
        }
    }

    pub fn get(uri_fragment: impl Into<String>) -> Self {
        Self::new(Method::GET, uri_fragment)
    }

    pub fn post(uri_fragment: impl Into<String>) -> Self {
        Self::new(Method::POST, uri_fragment)
    }

    pub fn patch(uri_fragment: impl Into<String>) -> Self {
        Self::new(Method::PATCH, uri_fragment)
    }

    pub fn put(uri_fragment: impl Into<String>) -> Self {
        Self::new(Method::PUT, uri_fragment)
    }

    pub fn delete(uri_fragment: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri_fragment)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn accept_header(&self) -> &str {
        self.accept.as_deref().unwrap_or(DEFAULT_ACCEPT)
    }
}

/// A successful response
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    pub status: u16,
    /// `Value::Null` for empty bodies, `Value::String` for non-JSON bodies
    pub body: Value,
}

impl RestResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn no_content() -> Self {
        Self::new(204, Value::Null)
    }
}

/// Issues REST calls on behalf of the operations
///
/// Implementations return [`crate::GitHubError::Api`] for non-success
/// statuses so callers see HTTP failures unchanged.
#[async_trait]
pub trait RestInvoker: Send + Sync {
    /// Issue a single call
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse>;

    /// Issue a GET and follow pagination, returning every element of every page
    async fn invoke_multi(&self, request: RestRequest) -> Result<Vec<Value>>;
}
