//! HTTP client and REST gateway for the storefront API.
//!
//! [`FetchClient`] is a small builder API over `reqwest` with a base URL,
//! default headers and a request timeout. [`HttpGateway`] maps every
//! storefront operation onto it and is the production implementation of
//! [`StoreGateway`].
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_data::{FetchClient, HttpGateway, StoreGateway};
//! use storefront_commerce::search::{CatalogQuery, FilterState, RouteParams};
//!
//! # async fn run() -> Result<(), storefront_data::FetchError> {
//! let client = FetchClient::new()?.with_base_url("http://localhost:5000");
//! let gateway = HttpGateway::new(client);
//!
//! let query = CatalogQuery::build(&FilterState::default(), &RouteParams::category("jeans"));
//! let page = gateway.list_products(&query).await?;
//! println!("{} of {} products", page.products.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;
mod request;
mod response;

pub use error::FetchError;
pub use gateway::{HttpGateway, StoreGateway};
pub use request::{FilePart, Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests fail with [`FetchError::Timeout`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url).accept("application/json");
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder { client: self, builder }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send a file as a multipart form.
    pub fn multipart_file(mut self, file: FilePart) -> Self {
        self.builder = self.builder.multipart_file(file);
        self
    }

    /// Add a bearer token when one is given.
    pub fn bearer_auth_opt(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token {
            self.builder = self.builder.bearer_auth(token);
        }
        self
    }

    /// Inspect the request that would be sent.
    pub fn build(self) -> RequestBuilder {
        self.builder
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            query,
            headers,
            body,
            file,
        } = self.builder;

        debug!(method = method.as_str(), url = %url, params = query.len(), "sending request");

        let mut request = self.client.http.request(method.to_reqwest(), &url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(file) = file {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            request = request.multipart(reqwest::multipart::Form::new().part(file.field, part));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, HttpGateway, Method, Response, StoreGateway};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_prepended() {
        let client = FetchClient::new().unwrap().with_base_url("http://localhost:5000/");
        let req = client.get("/api/products").build();
        assert_eq!(req.url(), "http://localhost:5000/api/products");
        assert_eq!(req.header_value("accept"), Some("application/json"));
    }

    #[test]
    fn test_absolute_url_is_kept() {
        let client = FetchClient::new().unwrap().with_base_url("http://localhost:5000");
        let req = client.get("https://cdn.example.com/x").build();
        assert_eq!(req.url(), "https://cdn.example.com/x");
    }

    #[test]
    fn test_default_headers_and_optional_bearer() {
        let client = FetchClient::new().unwrap().with_default_header("X-Client", "cli");
        let req = client.get("/api/users/profile").bearer_auth_opt(Some("t0k")).build();
        assert_eq!(req.header_value("x-client"), Some("cli"));
        assert_eq!(req.header_value("authorization"), Some("Bearer t0k"));

        let req = client.get("/api/products").bearer_auth_opt(None).build();
        assert_eq!(req.header_value("authorization"), None);
    }
}
