//! HTTP client and remote pricing source for Tienda.
//!
//! [`FetchClient`] builds requests against an optional base URL and hands
//! them to a [`Transport`]. On `wasm32` the transport is Spin outbound HTTP;
//! native builds use `reqwest`.
//!
//! [`PriceApiSource`] implements `ProductSource` over a public pricing API.
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_commerce::catalog::Catalog;
//! use tienda_data::{PriceApiConfig, PriceApiSource};
//!
//! let catalog = Catalog::new(PriceApiSource::new(PriceApiConfig::default()));
//! let products = catalog.search("yerba").await?;
//! ```

mod error;
mod precios;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use precios::{PriceApiConfig, PriceApiSource, DEFAULT_API_URL, DEFAULT_BRANCHES, DEFAULT_LIMIT};
pub use request::{Method, Request};
pub use response::Response;
pub use transport::{default_transport, Transport};

#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;

use std::collections::BTreeMap;

/// HTTP client for outbound requests.
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    transport: Box<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client on the target's default transport.
    pub fn new() -> Self {
        Self::with_transport(default_transport())
    }

    /// Create a client on an explicit transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: BTreeMap::new(),
            transport,
        }
    }

    /// Prepend `base_url` to relative request paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Start a GET request for `url` (absolute, or relative to the base URL).
    pub fn get(&self, url: &str) -> Request {
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url.to_string(),
        };

        let mut request = Request::get(full_url);
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }
        request
    }

    /// Send a request and return the response, whatever its status.
    pub async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "outbound request");
        self.transport.send(request).await
    }

    /// Send a request, require a 2xx status and parse the JSON body.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: &Request,
    ) -> Result<T, FetchError> {
        self.send(request).await?.error_for_status()?.json()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, PriceApiConfig, PriceApiSource, Request, Response, Transport};
}
