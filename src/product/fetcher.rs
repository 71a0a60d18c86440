//! Fetching product definitions from the management API.
//!
//! # Responsibilities
//! - Define the fetch capability the refresh loop depends on
//! - Provide the HTTP implementation (`GET {base}/products`)
//!
//! # Design Decisions
//! - One request per fetch; retries are paced by the refresh loop
//! - Every request carries a timeout so a hung server cannot stall refreshes
//! - Non-2xx responses are errors, the previous snapshot stays in place

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::product::types::{ApiProduct, ApiProductsResponse};

/// Errors returned by a catalog fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport, timeout or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Unexpected status {0} from product catalog")]
    Status(u16),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Source of API product definitions.
pub trait ProductFetcher: Send + Sync + 'static {
    /// Fetch the complete current product list.
    fn fetch(&self) -> impl Future<Output = Result<Vec<ApiProduct>, FetchError>> + Send;
}

/// Fetches products from `{base_url}/products` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductFetcher {
    client: reqwest::Client,
    products_url: Url,
}

impl HttpProductFetcher {
    /// Create a fetcher for the given management API base URL.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let products_url = products_url(&base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            products_url,
        })
    }

    /// Create a fetcher that sends requests through an existing client.
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            products_url: products_url(&base_url)?,
        })
    }

    /// Create a fetcher from a base URL string.
    pub fn from_base(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| FetchError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        Self::new(base_url, timeout)
    }

    pub fn products_url(&self) -> &Url {
        &self.products_url
    }
}

impl ProductFetcher for HttpProductFetcher {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ApiProduct>, FetchError>> + Send {
        async move {
            let response = self
                .client
                .get(self.products_url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body: ApiProductsResponse = response.json().await?;
            tracing::debug!(
                url = %self.products_url,
                products = body.api_product.len(),
                "Fetched API products"
            );
            Ok(body.api_product)
        }
    }
}

fn products_url(base_url: &Url) -> Result<Url, FetchError> {
    if base_url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(base_url.to_string()));
    }

    let mut url = base_url.clone();
    let path = format!("{}/products", base_url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}
