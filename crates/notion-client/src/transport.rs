//! HTTP transport to the Notion REST API.
//!
//! A transport sends exactly one request per call and returns the parsed JSON body.
//! Non-2xx responses become [`NotionError::Remote`]; nothing is retried.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;

use crate::config::NotionClientConfig;
use crate::error::{NotionError, NotionResult};

const NOTION_VERSION_HEADER: &str = "notion-version";

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path beginning with `/`, e.g. `/pages/{id}`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Sends [`ApiRequest`]s to the remote service.
#[async_trait]
pub trait NotionTransport: Send + Sync + fmt::Debug {
    async fn execute(&self, request: ApiRequest) -> NotionResult<Value>;
}

/// `reqwest`-backed transport with the auth and version headers preset.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &NotionClientConfig) -> NotionResult<Self> {
        let mut auth = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.api_key.expose_secret()
        ))
        .map_err(|_| NotionError::config("API key contains characters not valid in a header"))?;
        auth.set_sensitive(true);

        let version = HeaderValue::from_str(&config.api_version)
            .map_err(|_| NotionError::config("API version is not a valid header value"))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(HeaderName::from_static(NOTION_VERSION_HEADER), version);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| NotionError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl NotionTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> NotionResult<Value> {
        debug!(method = %request.method, path = %request.path, "Sending Notion API request");

        let mut builder = self.client.request(request.method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Notion API returned error status");
            return Err(NotionError::remote(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| NotionError::decode("response", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let get = ApiRequest::get("/blocks/abc/children")
            .with_query("page_size", 10)
            .with_query("start_cursor", "c1");
        assert_eq!(get.method, Method::GET);
        assert!(get.body.is_none());
        assert_eq!(
            get.query,
            vec![
                ("page_size".to_string(), "10".to_string()),
                ("start_cursor".to_string(), "c1".to_string())
            ]
        );

        let patch = ApiRequest::patch("/pages/p", json!({}));
        assert_eq!(patch.method, Method::PATCH);
        assert_eq!(patch.body, Some(json!({})));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = NotionClientConfig::new("secret").with_base_url("http://localhost:1234/v1/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:1234/v1");
        assert_eq!(transport.url("/search"), "http://localhost:1234/v1/search");
    }

    #[test]
    fn test_invalid_api_key_is_config_error() {
        let config = NotionClientConfig::new("bad\nkey");
        let err = HttpTransport::new(&config).unwrap_err();
        assert!(matches!(err, NotionError::Config(_)));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let transport = HttpTransport::new(&NotionClientConfig::new("secret_value")).unwrap();
        assert!(!format!("{transport:?}").contains("secret_value"));
    }
}
