use std::time::Duration;

/// Default polling interval between synchronization runs (10 minutes)
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 600;

/// Default timeout for a single upstream fetch
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Configuration for the price synchronization engine
///
/// Assembled from environment variables at startup. The tracked symbol set is
/// fixed for the lifetime of the process; symbols are reconciled in the
/// configured order.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the upstream quote provider
    pub upstream_base_url: String,

    /// API key credential passed to the upstream provider
    pub upstream_api_key: String,

    /// Interval between continuous-mode synchronization runs
    pub interval: Duration,

    /// Timeout applied to each upstream fetch
    pub fetch_timeout: Duration,

    /// Symbols to keep in sync, in reconciliation order
    pub tracked_symbols: Vec<String>,
}

impl SyncConfig {
    /// Build sync configuration from environment variables
    ///
    /// Returns `None` when `UPSTREAM_API_KEY` is not set, in which case the
    /// server runs without synchronization (read-only API).
    pub fn from_env() -> Option<Self> {
        let upstream_api_key = std::env::var("UPSTREAM_API_KEY").ok()?;

        let upstream_base_url = std::env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| "https://api.tarkov-market.app".to_string());

        let interval_secs = std::env::var("SYNC_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS);

        let fetch_timeout_secs = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        let tracked_symbols = std::env::var("TRACKED_SYMBOLS")
            .map(|s| parse_symbol_list(&s))
            .unwrap_or_else(|_| default_symbols());

        Some(Self {
            upstream_base_url,
            upstream_api_key,
            interval: Duration::from_secs(interval_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            tracked_symbols,
        })
    }
}

fn default_symbols() -> Vec<String> {
    vec!["euro".to_string(), "dollar".to_string()]
}

fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
