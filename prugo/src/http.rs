use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::{fmt, time::Duration};
use tracing::{debug, error, instrument};

use crate::{headers, ClientConfig, Error, Result, StdResult};

/// Timeout used when a client is built with a zero duration.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Responses are handed back exactly as the platform client produced them.
pub type Response = reqwest::Response;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Method(reqwest::Method);

impl Method {
    pub const GET: Method = Method(reqwest::Method::GET);
    pub const POST: Method = Method(reqwest::Method::POST);
    pub const PUT: Method = Method(reqwest::Method::PUT);
    pub const PATCH: Method = Method(reqwest::Method::PATCH);
    pub const DELETE: Method = Method(reqwest::Method::DELETE);

    pub fn from_bytes(s: &[u8]) -> Result<Self> {
        reqwest::Method::from_bytes(s)
            .map(Method)
            .map_err(|_| Error::RequestBuildError(format!("invalid method: {:?}", s)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn into_inner(self) -> reqwest::Method {
        self.0
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call headers. They take precedence over the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOverride {
    pub headers: HeaderMap,
}

impl RequestOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Appends one header value, keeping any value already set under `name`.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::RequestBuildError(format!("{} for header name {:?}", e, name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::RequestBuildError(format!("{} for header {}", e, name)))?;
        self.headers.append(header_name, header_value);
        Ok(self)
    }
}

/// The verb-named surface of a client.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn get(&self, path: &str, request_override: Option<RequestOverride>) -> Result<Response>;

    async fn post(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response>;

    async fn put(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response>;

    async fn patch(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response>;

    async fn delete(
        &self,
        path: &str,
        request_override: Option<RequestOverride>,
    ) -> Result<Response>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client backed by a fresh `reqwest::Client`.
    ///
    /// `headers` replaces the `Content-Type: application/json` default
    /// entirely when given. A zero `timeout` becomes [`DEFAULT_TIMEOUT`].
    /// A non-empty `base_url` must be an absolute URL.
    pub fn new(base_url: &str, headers: Option<HeaderMap>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ConfigError(format!("failed to build http client: {}", e)))?;
        Self::with_client(client, base_url, headers, timeout)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        headers: Option<HeaderMap>,
        timeout: Duration,
    ) -> Result<Self> {
        if !base_url.is_empty() {
            parse_http_url(base_url)
                .map_err(|e| Error::ConfigError(format!("{} for base url {}", e, base_url)))?;
        }
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            headers: headers.unwrap_or_else(headers::default_headers),
            timeout: if timeout.is_zero() {
                DEFAULT_TIMEOUT
            } else {
                timeout
            },
        })
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let timeout = config.timeout();
        let headers = config
            .headers
            .map(|source| source.into_header_map())
            .transpose()?;
        Self::new(&config.base_url, headers, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request to `base_url + path`.
    ///
    /// An empty `body` sends no body. Any status code counts as success.
    #[instrument(skip(self, body, request_override))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response> {
        let request = self.build(method, path, body, request_override)?;
        debug!("sending request to {}", request.url());
        let response = self.client.execute(request).await.map_err(|e| {
            error!("request failed: {}", e);
            Error::from(e)
        })?;
        debug!("received response: {}", response.status());
        Ok(response)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<reqwest::Request> {
        let request_url = format!("{}{}", self.base_url, path);
        let url = parse_http_url(&request_url)
            .map_err(|e| Error::RequestBuildError(format!("{} for {}", e, request_url)))?;
        let headers = match request_override {
            Some(request_override) => headers::merge(&self.headers, request_override.headers),
            None => self.headers.clone(),
        };
        let mut builder = self.client.request(method.into_inner(), url).timeout(self.timeout);
        if !body.is_empty() {
            builder = builder.body(body);
        }
        let mut request = builder.build()?;
        *request.headers_mut() = headers;
        Ok(request)
    }
}

/// Only absolute `http`/`https` URLs with a host can be sent.
fn parse_http_url(input: &str) -> StdResult<url::Url, String> {
    let url = url::Url::parse(input).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if !url.has_host() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

#[async_trait]
impl RestClient for HttpClient {
    async fn get(&self, path: &str, request_override: Option<RequestOverride>) -> Result<Response> {
        self.request(Method::GET, path, Bytes::new(), request_override).await
    }

    async fn post(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response> {
        self.request(Method::POST, path, body, request_override).await
    }

    async fn put(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response> {
        self.request(Method::PUT, path, body, request_override).await
    }

    async fn patch(
        &self,
        path: &str,
        body: Bytes,
        request_override: Option<RequestOverride>,
    ) -> Result<Response> {
        self.request(Method::PATCH, path, body, request_override).await
    }

    async fn delete(
        &self,
        path: &str,
        request_override: Option<RequestOverride>,
    ) -> Result<Response> {
        self.request(Method::DELETE, path, Bytes::new(), request_override).await
    }
}
