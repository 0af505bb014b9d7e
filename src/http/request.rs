//! Request building.
//!
//! Turns a verb, a path relative to the versioned API root and a payload into
//! an addressed [`HttpRequest`]. No I/O happens here.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, Url};
use serde_json::Value;
use std::borrow::Cow;

use crate::config::ClientConfig;
use crate::error::{ConfigError, Result, TfeError};

use super::document::{self, EncodeResource, MEDIA_TYPE};
use super::transport::HttpRequest;

/// Pagination options shared by every list operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page to return.
    pub page_number: Option<u32>,
    /// Number of items per page.
    pub page_size: Option<u32>,
}

impl ListOptions {
    /// Requests a specific page.
    #[must_use]
    pub const fn page(number: u32, size: u32) -> Self {
        Self {
            page_number: Some(number),
            page_size: Some(size),
        }
    }

    /// Returns the `page[...]` query parameters for the fields that are set.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(number) = self.page_number {
            pairs.push((String::from("page[number]"), number.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push((String::from("page[size]"), size.to_string()));
        }
        pairs
    }
}

/// What a request carries besides its path.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// Nothing.
    #[default]
    None,
    /// Query parameters, in order.
    Query(Vec<(String, String)>),
    /// A JSON-API document body.
    Document(Value),
    /// A plain JSON body.
    Json(Value),
}

impl Payload {
    /// Query payload for list options.
    #[must_use]
    pub fn list(options: &ListOptions) -> Self {
        Self::Query(options.query_pairs())
    }

    /// Document payload for an options struct.
    ///
    /// # Errors
    ///
    /// Returns an encode error if an attribute cannot be serialized.
    pub fn document<T: EncodeResource>(options: &T) -> Result<Self> {
        document::encode(options).map(Self::Document)
    }

    /// Plain JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value cannot be serialized.
    pub fn json<T: serde::Serialize>(body: &T) -> Result<Self> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| TfeError::encode(e.to_string()))
    }
}

/// Percent-encodes a caller-supplied path segment.
#[must_use]
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Builds requests against `address + base_path`.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    headers: HeaderMap,
}

impl RequestBuilder {
    /// Creates a builder from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address cannot serve as a base
    /// URL or the token or user agent is not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = base_url(&config.address, &config.base_path)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        if !config.token.is_empty() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
                .map_err(|_| ConfigError::validation("API token is not a valid header value", "token"))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            ConfigError::validation("User agent is not a valid header value", "user_agent")
        })?;
        headers.insert(USER_AGENT, agent);

        Ok(Self { base_url, headers })
    }

    /// Returns the versioned API root every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a request for `path` relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the path does not form a valid URL or the
    /// body cannot be serialized.
    pub fn build(&self, method: Method, path: &str, payload: Payload) -> Result<HttpRequest> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TfeError::encode(format!("invalid request path '{path}': {e}")))?;

        let mut headers = self.headers.clone();
        let body = match payload {
            Payload::None => None,
            Payload::Query(pairs) => {
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
                None
            }
            Payload::Document(value) | Payload::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| TfeError::encode(e.to_string()))?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
                Some(bytes)
            }
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

/// Joins address and base path, making sure the result ends with `/`.
fn base_url(address: &str, base_path: &str) -> Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidAddress {
        address: address.to_owned(),
        reason,
    };

    let address_url = Url::parse(address).map_err(|e| invalid(e.to_string()))?;
    if address_url.cannot_be_a_base() {
        return Err(invalid(String::from("not a base URL")).into());
    }

    let mut root = base_path.trim_start_matches('/').to_owned();
    if !root.is_empty() && !root.ends_with('/') {
        root.push('/');
    }

    let mut url = address_url;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(&root)
        .map_err(|e| invalid(format!("invalid base path '{base_path}': {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(&ClientConfig::new("https://tfe.example.com", "secret"))
            .expect("builder from valid config")
    }

    #[test]
    fn test_base_url_variants() {
        for address in [
            "https://tfe.example.com",
            "https://tfe.example.com/",
        ] {
            let b = RequestBuilder::new(&ClientConfig::new(address, "t")).expect("valid");
            assert_eq!(b.base_url().as_str(), "https://tfe.example.com/api/v2/");
        }

        let b = RequestBuilder::new(
            &ClientConfig::new("https://proxy.example.com/tfe", "t").with_base_path("/api/v2"),
        )
        .expect("valid");
        assert_eq!(b.base_url().as_str(), "https://proxy.example.com/tfe/api/v2/");
    }

    #[test]
    fn test_bad_address_is_config_error() {
        let err = RequestBuilder::new(&ClientConfig::new("::nope::", "t")).unwrap_err();
        assert!(matches!(
            err,
            TfeError::Config(ConfigError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_get_with_query_and_headers() {
        let request = builder()
            .build(
                Method::GET,
                "organizations/my-org/ssh-keys",
                Payload::list(&ListOptions::page(2, 50)),
            )
            .expect("request builds");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.path(), "/api/v2/organizations/my-org/ssh-keys");
        let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                (String::from("page[number]"), String::from("2")),
                (String::from("page[size]"), String::from("50")),
            ]
        );
        assert_eq!(request.headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(request.headers[ACCEPT], MEDIA_TYPE);
        assert!(request.headers.get(CONTENT_TYPE).is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_empty_list_options_add_no_query() {
        let request = builder()
            .build(Method::GET, "runs", Payload::list(&ListOptions::default()))
            .expect("request builds");
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_body_sets_content_type() {
        let request = builder()
            .build(
                Method::POST,
                "runs/run-1/actions/apply",
                Payload::Json(json!({ "comment": "ship it" })),
            )
            .expect("request builds");

        assert_eq!(request.headers[CONTENT_TYPE], MEDIA_TYPE);
        let body: Value =
            serde_json::from_slice(request.body.as_deref().expect("body present")).expect("json");
        assert_eq!(body, json!({ "comment": "ship it" }));
    }

    #[test]
    fn test_segment_encoding_stays_in_path() {
        let path = format!("ssh-keys/{}", segment("a/../b?x=1"));
        let request = builder()
            .build(Method::GET, &path, Payload::None)
            .expect("request builds");
        assert_eq!(request.url.path(), "/api/v2/ssh-keys/a%2F..%2Fb%3Fx%3D1");
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_anonymous_has_no_authorization() {
        let b = RequestBuilder::new(&ClientConfig::new("https://tfe.example.com", ""))
            .expect("valid");
        let request = b.build(Method::GET, "ping", Payload::None).expect("builds");
        assert!(request.headers.get(AUTHORIZATION).is_none());
    }
}
