use std::env;

pub mod bybit_client;
pub mod kline_response;
pub mod ticker_response;

pub use bybit_client::BybitClient;
pub use kline_response::KlineResponse;
pub use ticker_response::TickerResponse;

use crate::error::MarketDataError;

pub fn get_rest_base_url() -> String {
    env::var("BYBIT_BASE_URL").unwrap_or_else(|_| "https://api.bybit.com".to_string())
}

pub(crate) fn parse_price(field: &'static str, value: &str) -> Result<f64, MarketDataError> {
    value
        .parse::<f64>()
        .map_err(|_| MarketDataError::Malformed {
            field,
            value: value.to_string(),
        })
}
