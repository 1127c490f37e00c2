//! Pluggable HTTP transports.

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends a [`Request`] and returns the raw [`Response`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Outbound HTTP through the Spin host.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        use spin_sdk::http::Method as SpinMethod;

        let method = match request.method {
            crate::Method::Get => SpinMethod::Get,
            crate::Method::Head => SpinMethod::Head,
        };

        let mut builder = spin_sdk::http::Request::builder();
        builder.method(method).uri(request.to_url()?.to_string());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.to_string(), v.to_string())))
            .collect();

        Ok(Response::new(status, headers, response.into_body()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// Outbound HTTP through a `reqwest` client.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to a default HTTP client");
                reqwest::Client::new()
            });
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        let method = match request.method {
            crate::Method::Get => reqwest::Method::GET,
            crate::Method::Head => reqwest::Method::HEAD,
        };

        let mut builder = self.client.request(method, request.to_url()?);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

/// The transport for the current target.
pub fn default_transport() -> Box<dyn Transport> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(SpinTransport)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(ReqwestTransport::new())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the request head.
    async fn serve_once(status_line: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let reply = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_reqwest_transport_maps_success() {
        let (base, server) = serve_once("200 OK", r#"{"productos":[]}"#).await;
        let request = Request::get(format!("{}/prod/productos", base))
            .query("string", "yerba mate")
            .query("limit", "50")
            .header("Accept", "application/json");

        let response = transport().send(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.text().unwrap(), r#"{"productos":[]}"#);

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /prod/productos?string=yerba+mate&limit=50 HTTP/1.1\r\n"));
        assert!(head.to_ascii_lowercase().contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_reqwest_transport_keeps_error_status_and_body() {
        let (base, server) = serve_once("503 Service Unavailable", r#"{"error":"down"}"#).await;

        let response = transport()
            .send(&Request::get(format!("{}/prod/producto", base)))
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(response.status, 503);
        match response.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, r#"{"error":"down"}"#);
            }
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reqwest_transport_reports_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .send(&Request::get(format!("http://{}/prod/productos", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
    }
}
