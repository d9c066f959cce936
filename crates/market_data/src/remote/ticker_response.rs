use chrono::Utc;
use serde::Deserialize;

use common::models::Quote;

use crate::error::MarketDataError;
use crate::remote::parse_price;

#[derive(Deserialize, Debug)]
pub struct TickerResponse {
    #[serde(rename(deserialize = "retCode"))]
    pub ret_code: i64,
    #[serde(rename(deserialize = "retMsg"))]
    pub ret_msg: String,
    pub result: TickerResult,
}

#[derive(Deserialize, Debug)]
pub struct TickerResult {
    #[serde(default)]
    pub list: Vec<TickerItem>,
}

#[derive(Deserialize, Debug)]
pub struct TickerItem {
    pub symbol: String,
    #[serde(rename(deserialize = "lastPrice"))]
    pub last_price: String,
    #[serde(rename(deserialize = "bid1Price"))]
    pub bid1_price: Option<String>,
    #[serde(rename(deserialize = "ask1Price"))]
    pub ask1_price: Option<String>,
}

impl TickerResponse {
    /// First matching entry as a domain quote. Bid/ask can be absent or
    /// blank on thin books; both fall back to the last traded price.
    pub fn into_quote(self, symbol: &str) -> Result<Quote, MarketDataError> {
        let item = self
            .result
            .list
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))?;

        let last = parse_price("lastPrice", &item.last_price)?;
        let bid = opt_price(item.bid1_price.as_deref()).unwrap_or(last);
        let ask = opt_price(item.ask1_price.as_deref()).unwrap_or(last);

        Ok(Quote {
            symbol: item.symbol,
            last_price: last,
            bid_price: bid,
            ask_price: ask,
            observed_at: Utc::now(),
        })
    }
}

fn opt_price(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.parse::<f64>().ok())
}
