//! QKart REST API client.
//!
//! # Endpoints
//!
//! All paths are relative to the configured API endpoint:
//!
//! - `GET /products` - Full catalog
//! - `GET /products/search?value=<text>` - Catalog search (404 when nothing matches)
//! - `GET /cart` - The user's cart (Bearer token)
//! - `POST /cart` - Set a product's quantity, returns the updated cart (Bearer token)
//! - `POST /auth/login` - Exchange credentials for a token
//! - `POST /auth/register` - Create an account
//!
//! Failed requests carry a `{ "success": false, "message": "..." }` body; the
//! message is kept on [`ApiError::Status`] when present.
//!
//! # Example
//!
//! ```rust,ignore
//! use qkart_storefront::client::ApiClient;
//!
//! let client = ApiClient::new(&config)?;
//! let catalog = client.list_products().await?;
//! let cart = client.fetch_cart(session.token()).await?;
//! let items = qkart_core::reconcile(Some(&cart), &catalog);
//! ```

mod types;

pub use types::{LoginResponse, RegisterResponse};

use std::sync::Arc;
use std::time::Duration;

use qkart_core::{CartEntry, CartUpdate, Credentials, Product, ProductId};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StorefrontConfig;
use types::ErrorBody;

/// Errors that can occur when talking to the QKart backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("(no message)"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if the body had one.
        message: Option<String>,
    },

    /// The response body did not match the expected record shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of the failed response, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message from the error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Canonical reason phrase for the status (e.g. "Not Found").
    #[must_use]
    pub fn status_text(&self) -> Option<&'static str> {
        self.status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .and_then(|code| code.canonical_reason())
    }
}

/// Client for the QKart REST backend.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from the storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_endpoint(config.api_endpoint.clone(), config.http_timeout)
    }

    /// Create a client for an explicit endpoint.
    ///
    /// `endpoint` should end with `/`; paths like `products` are joined
    /// beneath it.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_endpoint(endpoint: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, endpoint }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.endpoint.join(path)?)
    }

    /// Send a request and decode a typed body from a success response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            debug!(
                status = %status,
                message = message.as_deref().unwrap_or_default(),
                "QKart API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode QKart API response"
            );
            ApiError::Decode(e)
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.url("products")?;
        let products: Vec<Product> = self.send(self.inner.client.get(url)).await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Search the catalog by name or category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 404 when nothing matches, or
    /// another error if the request fails.
    #[instrument(skip(self, text), fields(query = %text))]
    pub async fn search_products(&self, text: &str) -> Result<Vec<Product>, ApiError> {
        let mut url = self.url("products/search")?;
        url.query_pairs_mut().append_pair("value", text);
        let products: Vec<Product> = self.send(self.inner.client.get(url)).await?;
        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Fetch the cart of the user owning `token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 401 for a missing or invalid
    /// token, or another error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn fetch_cart(&self, token: &SecretString) -> Result<Vec<CartEntry>, ApiError> {
        let url = self.url("cart")?;
        let request = self
            .inner
            .client
            .get(url)
            .bearer_auth(token.expose_secret());
        self.send(request).await
    }

    /// Set the quantity of a product in the cart. A quantity of zero removes it.
    ///
    /// Returns the full cart after the update.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 404 for an unknown product, or
    /// another error if the request fails.
    #[instrument(skip(self, token, product_id), fields(product_id = %product_id))]
    pub async fn update_cart(
        &self,
        token: &SecretString,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartEntry>, ApiError> {
        let url = self.url("cart")?;
        let body = CartUpdate {
            product_id: product_id.clone(),
            qty,
        };
        let request = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(&body);
        self.send(request).await
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in and obtain a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 400 for bad credentials, or
    /// another error if the request fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.url("auth/login")?;
        self.send(self.inner.client.post(url).json(credentials)).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 400 when the username is taken,
    /// or another error if the request fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, ApiError> {
        let url = self.url("auth/register")?;
        self.send(self.inner.client.post(url).json(credentials)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Password is incorrect".to_string()),
        };
        assert_eq!(err.to_string(), "API error: 400 - Password is incorrect");

        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "API error: 500 - (no message)");
    }

    #[test]
    fn test_status_accessors() {
        let err = ApiError::Status {
            status: 404,
            message: None,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.status_text(), Some("Not Found"));
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = ApiError::from(serde_json::from_str::<Vec<Product>>("{").unwrap_err());
        assert_eq!(err.status(), None);
        assert_eq!(err.status_text(), None);
    }

    #[test]
    fn test_endpoint_paths_join_under_base() {
        let endpoint = Url::parse("http://localhost:8082/api/v1/").unwrap();
        let client = ApiClient::with_endpoint(endpoint, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.url("products/search").unwrap().as_str(),
            "http://localhost:8082/api/v1/products/search"
        );
        assert_eq!(
            client.url("auth/login").unwrap().as_str(),
            "http://localhost:8082/api/v1/auth/login"
        );
    }
}
