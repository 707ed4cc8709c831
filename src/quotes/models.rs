use serde::Deserialize;

/// Normalized quote for one tracked symbol
///
/// Transient value derived from one upstream response; never persisted
/// directly, only used to propose a price record mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub symbol: String,
    pub price: i64,
    pub base_price: i64,
}

/// One element of the upstream provider's item response
///
/// The upstream schema names the baseline value `basePrice`; mapping it to
/// local naming is the client's responsibility.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamItem {
    pub price: i64,
    #[serde(rename = "basePrice")]
    pub base_price: i64,
}

impl UpstreamItem {
    /// Map this upstream element into a normalized quote for `symbol`
    pub fn into_quote(self, symbol: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price: self.price,
            base_price: self.base_price,
        }
    }
}
