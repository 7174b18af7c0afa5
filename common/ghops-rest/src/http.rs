//! reqwest-backed [`RestInvoker`]
//!
//! Resolves URI fragments against the API root of the configured host, adds
//! the standard headers, retries `202 Accepted` responses while GitHub is
//! still computing a result, and follows `Link: rel="next"` headers for
//! paginated calls.

use crate::auth::GitHubAuth;
use crate::error::{GitHubError, Result};
use crate::invoker::{RestInvoker, RestRequest, RestResponse};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use std::time::Duration;

/// Host of public GitHub
pub const DEFAULT_API_HOST: &str = "github.com";

/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("ghops/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HttpInvoker`]
#[derive(Debug, Clone)]
pub struct InvokerSettings {
    pub api_host_name: String,
    pub auth: Option<GitHubAuth>,
    pub timeout: Duration,
    pub maximum_retries_when_result_not_ready: u32,
    pub retry_delay: Duration,
    /// Log pagination progress at `info` instead of `debug`
    pub show_progress: bool,
    pub user_agent: String,
}

impl Default for InvokerSettings {
    fn default() -> Self {
        Self {
            api_host_name: DEFAULT_API_HOST.to_string(),
            auth: None,
            timeout: Duration::from_secs(30),
            maximum_retries_when_result_not_ready: 30,
            retry_delay: Duration::from_secs(30),
            show_progress: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Invoker that talks to the GitHub REST API over HTTPS
pub struct HttpInvoker {
    client: Client,
    api_base: String,
    settings: InvokerSettings,
}

impl HttpInvoker {
    pub fn new(settings: InvokerSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_base: api_base_url(&settings.api_host_name),
            settings,
        })
    }

    /// Send requests to `api_base` instead of the root derived from the host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn build_url(&self, uri_fragment: &str) -> String {
        if uri_fragment.starts_with("https://") || uri_fragment.starts_with("http://") {
            return uri_fragment.to_string();
        }
        format!("{}/{}", self.api_base, uri_fragment.trim_start_matches('/'))
    }

    async fn send(&self, request: &RestRequest, url: &str) -> Result<reqwest::Response> {
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(header::ACCEPT, request.accept_header());

        if let Some(auth) = &self.settings.auth {
            builder = builder.header(header::AUTHORIZATION, auth.get_auth_header());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Send `request` to `url`, waiting out `202 Accepted` responses
    ///
    /// Only GET requests are repeated. A write answered with 202 has been
    /// accepted and is returned as is.
    async fn send_until_ready(
        &self,
        request: &RestRequest,
        url: &str,
    ) -> Result<reqwest::Response> {
        let max_retries = self.settings.maximum_retries_when_result_not_ready;
        let mut attempt = 0;

        loop {
            tracing::debug!(method = %request.method, %url, attempt, "{}", request.description);
            let response = self.send(request, url).await?;
            tracing::debug!(status = response.status().as_u16(), %url, "response received");

            if response.status() != StatusCode::ACCEPTED || request.method != Method::GET {
                return Ok(response);
            }
            if attempt >= max_retries {
                return Err(GitHubError::ResultNotReady {
                    attempts: attempt + 1,
                });
            }

            attempt += 1;
            tracing::warn!(
                %url,
                attempt,
                delay_secs = self.settings.retry_delay.as_secs(),
                "result not ready yet, retrying"
            );
            tokio::time::sleep(self.settings.retry_delay).await;
        }
    }
}

#[async_trait]
impl RestInvoker for HttpInvoker {
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse> {
        let url = self.build_url(&request.uri_fragment);
        let response = self.send_until_ready(&request, &url).await?;
        into_rest_response(response).await
    }

    async fn invoke_multi(&self, request: RestRequest) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut next_url = Some(self.build_url(&request.uri_fragment));
        let mut page = 0u32;

        while let Some(url) = next_url.take() {
            page += 1;
            if self.settings.show_progress {
                tracing::info!(page, "{}", request.description);
            } else {
                tracing::debug!(page, "{}", request.description);
            }

            let response = self.send_until_ready(&request, &url).await?;
            next_url = parse_link_next(response.headers());

            match into_rest_response(response).await?.body {
                Value::Array(values) => items.extend(values),
                Value::Null => {}
                other => items.push(other),
            }
        }

        Ok(items)
    }
}

/// API root for a host: `api.github.com` for public GitHub, `/api/v3` otherwise
pub fn api_base_url(api_host_name: &str) -> String {
    let host = api_host_name.trim().trim_end_matches('/');
    if host.eq_ignore_ascii_case(DEFAULT_API_HOST) {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", host)
    }
}

async fn into_rest_response(response: reqwest::Response) -> Result<RestResponse> {
    let status = response.status();
    let headers = response.headers().clone();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(parse_error_response(status.as_u16(), &headers, &text));
    }

    Ok(RestResponse::new(status.as_u16(), parse_body(&text)))
}

/// Decode a success body: empty → null, JSON → value, anything else → string
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Map a failed response onto [`GitHubError`]
pub fn parse_error_response(status: u16, headers: &header::HeaderMap, text: &str) -> GitHubError {
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if (status == 403 || status == 429) && remaining == Some(0) {
        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return GitHubError::RateLimited { reset_at };
    }

    let parsed: Option<Value> = serde_json::from_str(text).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                text.to_string()
            }
        });
    let documentation_url = parsed
        .as_ref()
        .and_then(|v| v["documentation_url"].as_str())
        .map(str::to_string);

    GitHubError::Api {
        status,
        message,
        documentation_url,
    }
}

/// Find the `rel="next"` target of a `Link` header
pub fn parse_link_next(headers: &header::HeaderMap) -> Option<String> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    link.split(',')
        .map(str::trim)
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| {
            let (_, rest) = part.split_once('<')?;
            let (target, _) = rest.split_once('>')?;
            Some(target.to_string())
        })
}
