//! Request assembly: URL, default headers and JSON body.

use http::header::{CONTENT_TYPE, InvalidHeaderValue, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

use super::{Endpoint, HttpClient, HttpError, HttpRequest, HttpResponse};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Content type sent with every JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Product token sent as `User-Agent`.
pub const SDK_USER_AGENT: &str = concat!("Huefy-Rust-SDK/", env!("CARGO_PKG_VERSION"));

/// Turns `(method, path, body)` into an [`HttpRequest`] and sends it.
///
/// Every request carries `User-Agent` and `X-API-Key`; requests with a
/// body also carry a JSON `Content-Type`. The wrapped client decides what
/// happens on the wire (retry, I/O).
#[derive(Debug)]
pub struct ApiTransport<H> {
    client: H,
    endpoint: Endpoint,
    headers: HeaderMap,
}

impl<H> ApiTransport<H> {
    /// Creates a transport for `endpoint` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderValue`] if the key contains characters that
    /// cannot appear in a header.
    pub fn new(client: H, endpoint: Endpoint, api_key: &str) -> Result<Self, InvalidHeaderValue> {
        let mut key = HeaderValue::from_str(api_key)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(API_KEY_HEADER, key);

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Swaps the wrapped client, keeping endpoint and headers.
    #[must_use]
    pub fn map_client<C>(self, f: impl FnOnce(H) -> C) -> ApiTransport<C> {
        ApiTransport {
            client: f(self.client),
            endpoint: self.endpoint,
            headers: self.headers,
        }
    }

    /// Builds the request for one operation without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] or [`HttpError::Serialize`].
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, HttpError> {
        let mut request = HttpRequest::new(method, self.endpoint.join(path)?);
        request.headers.clone_from(&self.headers);

        if let Some(body) = body {
            let encoded = serde_json::to_vec(body)?;
            request = request
                .with_header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .with_body(encoded);
        }

        Ok(request)
    }
}

impl<H: HttpClient> ApiTransport<H> {
    /// Sends a GET request with no body.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from request assembly or the client.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.execute::<()>(Method::GET, path, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from request assembly or the client.
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, HttpError> {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Assembles and sends one request.
    ///
    /// # Errors
    ///
    /// Propagates [`HttpError`] from request assembly or the client.
    pub async fn execute<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse, HttpError> {
        let request = self.build(method, path, body)?;
        tracing::debug!("{} {}", request.method, request.url);
        self.client.request(request).await
    }
}
