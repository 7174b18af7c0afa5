//! Repository URI splitting and joining, plus URI fragment encoding

use crate::error::{GitHubError, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;
use url::form_urlencoded;

// Characters that end or alter a path segment, plus `%` itself
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Host used when composing repository URIs
pub const GITHUB_WEB_BASE: &str = "https://github.com";

// https://api.github.com/repos/owner/name/... or https://ghe.host/api/v3/repos/owner/name/...
static API_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:api\.[^/?#]+|[^/?#]+/api/v3)/repos/([^/?#]+)/([^/?#]+)")
        .expect("valid API url pattern")
});

// https://github.com/owner/name[.git][/anything]
static WEB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/?#]+/([^/?#]+)/([^/?#]+?)(?:\.git)?/?(?:[/?#].*)?$")
        .expect("valid web url pattern")
});

/// Split a repository URI into `(owner, name)`
///
/// Accepts the web form `https://github.com/owner/name` (any host, optional
/// `.git` suffix, trailing path, query or fragment) as well as API resource
/// URLs such as `https://api.github.com/repos/owner/name/pulls/1`.
///
/// # Errors
/// Returns [`GitHubError::InvalidFormat`] if the URI has neither shape
pub fn split_repository_uri(uri: &str) -> Result<(String, String)> {
    let uri = uri.trim();

    if let Some(captures) = API_URL.captures(uri) {
        return Ok((captures[1].to_string(), captures[2].to_string()));
    }

    if let Some(captures) = WEB_URL.captures(uri) {
        return Ok((captures[1].to_string(), captures[2].to_string()));
    }

    Err(GitHubError::InvalidFormat(format!(
        "Unable to split repository URI '{}' into owner and name. Expected https://github.com/<owner>/<name>",
        uri
    )))
}

/// Compose the canonical repository URI for `owner/name`
pub fn join_repository_uri(owner: &str, name: &str) -> String {
    format!("{}/{}/{}", GITHUB_WEB_BASE, owner, name)
}

/// Extract `(owner, name)` from an API resource URL, if it is one
pub fn repository_from_api_url(url: &str) -> Option<(String, String)> {
    API_URL
        .captures(url.trim())
        .map(|captures| (captures[1].to_string(), captures[2].to_string()))
}

/// Percent-encode a single path segment, including any `/`
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Percent-encode each segment of a `/`-separated path such as `heads/feature/x`
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_path_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Append form-encoded query parameters to a URI fragment
pub fn with_query<K, V>(uri_fragment: impl Into<String>, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut uri_fragment = uri_fragment.into();
    if params.is_empty() {
        return uri_fragment;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    uri_fragment.push('?');
    uri_fragment.push_str(&serializer.finish());
    uri_fragment
}
