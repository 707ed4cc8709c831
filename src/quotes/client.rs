use crate::quotes::models::{Quote, UpstreamItem};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by the quote client
///
/// Every failure mode of an upstream fetch maps to one of these variants;
/// the client never panics on bad upstream behavior.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed upstream response for '{symbol}': {reason}")]
    Malformed { symbol: String, reason: String },
}

/// Quote client trait - fetches one quote per symbol from the upstream provider
#[async_trait::async_trait]
pub trait QuoteClient: Send + Sync {
    async fn fetch(&self, symbol: &str) -> Result<Quote, FetchError>;
}

/// HTTP implementation of the quote client
///
/// Issues one GET per symbol against
/// `<base-url>/api/v1/item?q=<symbol>&x-api-key=<key>` with a bounded
/// timeout, and maps the first element of the JSON array response into a
/// normalized quote.
pub struct HttpQuoteClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpQuoteClient {
    /// Create a new HTTP quote client
    ///
    /// `timeout` bounds every fetch end to end; on expiry the request fails
    /// with a transport error instead of hanging the synchronization run.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn item_url(&self, symbol: &str, key: &str) -> String {
        format!(
            "{}/api/v1/item?q={}&x-api-key={}",
            self.base_url.trim_end_matches('/'),
            symbol,
            key
        )
    }

    /// Request URL with the API key redacted, safe for log output
    fn redacted_url(&self, symbol: &str) -> String {
        self.item_url(symbol, "***")
    }
}

#[async_trait::async_trait]
impl QuoteClient for HttpQuoteClient {
    async fn fetch(&self, symbol: &str) -> Result<Quote, FetchError> {
        let url = self.item_url(symbol, &self.api_key);
        let log_url = self.redacted_url(symbol);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Quote fetch failed for {}: {}", log_url, e);
                return Err(FetchError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Quote fetch for {} returned {}: {}",
                log_url,
                status,
                body
            );
            return Err(FetchError::Status {
                url: log_url,
                status: status.as_u16(),
                body,
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read quote response body for {}: {}", log_url, e);
                return Err(FetchError::Transport(e));
            }
        };

        let items: Vec<UpstreamItem> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Malformed quote response for {}: {} ({})", log_url, e, body);
            FetchError::Malformed {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            }
        })?;

        let first = items.into_iter().next().ok_or_else(|| {
            tracing::error!("Empty quote response for {}", log_url);
            FetchError::Malformed {
                symbol: symbol.to_string(),
                reason: "response array is empty".to_string(),
            }
        })?;

        Ok(first.into_quote(symbol))
    }
}
