//! Meta information about the GitHub service

use super::client::GitHubClient;
use super::types::{Meta, RateLimitStatus, ResponseContext};
use ghops_rest::{RestRequest, Result};
use serde_json::Value;
use std::collections::BTreeMap;

impl GitHubClient {
    /// Service addresses and capabilities
    pub async fn get_meta(&self) -> Result<Meta> {
        self.record_event("get_meta");
        let request = RestRequest::get("meta").with_description("Getting GitHub meta information");
        self.fetch(request, &ResponseContext::none()).await
    }

    /// Current rate limit status for the authenticated caller
    pub async fn get_rate_limit(&self) -> Result<RateLimitStatus> {
        self.record_event("get_rate_limit");
        let request = RestRequest::get("rate_limit").with_description("Getting rate limit status");
        self.fetch(request, &ResponseContext::none()).await
    }

    /// Emoji names mapped to image URLs
    pub async fn get_emojis(&self) -> Result<BTreeMap<String, String>> {
        self.record_event("get_emojis");
        let request = RestRequest::get("emojis").with_description("Getting emojis");
        let response = self.send(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// A random piece of GitHub wisdom
    pub async fn get_zen(&self) -> Result<String> {
        self.record_event("get_zen");
        let request = RestRequest::get("zen").with_description("Getting zen");
        let response = self.send(request).await?;
        Ok(match response.body {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}
