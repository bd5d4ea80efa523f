use std::future::Future;

use bytes::Bytes;

/// A fully buffered HTTP exchange result.
///
/// Non-2xx statuses are data, not transport errors — the pipeline decides
/// what a rejection means for the phase it is in.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body:   Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// Response body as text for error reporting, lossy on purpose.
    pub fn body_text(&self) -> String { String::from_utf8_lossy(&self.body).into_owned() }
}

/// Asynchronous buffered HTTP transport.
///
/// The minimal interface the pipeline needs: one request in, one buffered
/// response out. Implementations own their redirect handling, socket
/// timeouts, and TLS configuration.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait Transport: Send + Sync {
    /// Error type for transport operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue one HTTP request and buffer the full response.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures (DNS, connect,
    /// socket timeout, TLS). An HTTP error status is a successful exchange.
    fn send(
        &self,
        method: &str,
        url: &str,
        headers: &[(String, String)],
        body: Bytes,
    ) -> impl Future<Output = std::result::Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Timeouts;
    use crate::error::{Result, UploadError};

    /// Production HTTP transport using reqwest.
    ///
    /// Carries explicit connect and read deadlines so a stalled socket fails
    /// on its own, independent of any caller-side budget.
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(timeouts: Timeouts) -> Result<Self> {
            let client = reqwest::Client::builder()
                .connect_timeout(timeouts.connect)
                .timeout(timeouts.read)
                .build()
                .map_err(|e| UploadError::ClientBuild(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn send(
            &self,
            method: &str,
            url: &str,
            headers: &[(String, String)],
            body: Bytes,
        ) -> std::result::Result<HttpResponse, Self::Error> {
            let mut request = match method {
                "POST" => self.client.post(url),
                _ => self.client.get(url),
            };
            for (name, value) in headers {
                request = request.header(name, value);
            }
            if !body.is_empty() {
                request = request.body(body);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;
