use thiserror::Error;

/// Failure of a single market-data request. Always scoped to one symbol;
/// the caller decides whether to drop that symbol or abort.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned retCode {code}: {message}")]
    Api {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    #[error("no market data for symbol {0}")]
    NoData(String),

    #[error("malformed {field} in response: {value:?}")]
    Malformed {
        field: &'static str,
        value: String,
    },
}
