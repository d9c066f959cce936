use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use common::models::Quote;

use crate::error::MarketDataError;
use crate::remote::{KlineResponse, TickerResponse, get_rest_base_url};
use crate::traits::MarketData;

/// All market reads target the linear-perp category of the v5 API.
const CATEGORY: &str = "linear";

pub struct BybitClient {
    client: Client,
    base_url: String,
}

impl BybitClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("bybit_signal_engine/0.1.0")
                .timeout(Duration::from_secs(5))
                .build()
                .expect("Failed to build HTTP client."),
            base_url: get_rest_base_url(),
        }
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<TickerResponse, MarketDataError> {
        let url = format!("{}/v5/market/tickers", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("category", CATEGORY), ("symbol", symbol)])
            .send()
            .await?
            .error_for_status()?;

        let data = response.json::<TickerResponse>().await?;
        if data.ret_code != 0 {
            return Err(MarketDataError::Api {
                endpoint: "tickers",
                code: data.ret_code,
                message: data.ret_msg,
            });
        }
        debug!("Fetched ticker for {}", symbol);
        Ok(data)
    }

    async fn fetch_kline(
        &self,
        symbol: &str,
        interval_minutes: u32,
        limit: u32,
    ) -> Result<KlineResponse, MarketDataError> {
        let url = format!("{}/v5/market/kline", self.base_url);
        let interval = interval_minutes.to_string();
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", CATEGORY),
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data = response.json::<KlineResponse>().await?;
        if data.ret_code != 0 {
            return Err(MarketDataError::Api {
                endpoint: "kline",
                code: data.ret_code,
                message: data.ret_msg,
            });
        }
        debug!("Fetched {} klines for {}", data.result.list.len(), symbol);
        Ok(data)
    }
}

#[async_trait]
impl MarketData for BybitClient {
    async fn ticker(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.fetch_ticker(symbol).await?.into_quote(symbol)
    }

    async fn recent_closes(
        &self,
        symbol: &str,
        interval_minutes: u32,
        limit: u32,
    ) -> Result<Vec<f64>, MarketDataError> {
        self.fetch_kline(symbol, interval_minutes, limit)
            .await?
            .into_closes(symbol)
    }
}

impl Default for BybitClient {
    fn default() -> Self {
        Self::new()
    }
}
