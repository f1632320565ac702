// HelloFace HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and error-body decoding.
// Endpoint methods live in sibling modules (`recognition`, `users`,
// `system`) as inherent impls to keep this file about transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::ErrorResponse;

/// Raw HTTP client for the HelloFace service.
///
/// Every request is a single request/response pair: no retries, no
/// caching. Non-success responses become [`Error::Api`] or
/// [`Error::NotFound`] carrying the server's `detail` when present, else
/// the caller-supplied fallback message.
#[derive(Debug, Clone)]
pub struct FaceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FaceClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    /// The service root, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"users/7"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp, fallback).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp, fallback).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_response(resp, fallback).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<T, Error> {
    let status = resp.status();

    if status.is_success() {
        let body = resp.text().await?;
        trace!(%status, bytes = body.len(), "response body received");
        return serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        });
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.message())
        .unwrap_or_else(|| fallback.to_owned());
    debug!(%status, %message, "request failed");

    if status == reqwest::StatusCode::NOT_FOUND {
        Err(Error::NotFound { message })
    } else {
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Ensure the base URL path ends with `/` so relative joins append rather
/// than replace the last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
