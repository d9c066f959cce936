use async_trait::async_trait;

use common::models::Quote;

use crate::error::MarketDataError;

/// Read-only market data source for linear perpetual symbols. One
/// implementation talks to Bybit; tests substitute a mock.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Current best bid/ask/last prices for one symbol.
    async fn ticker(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Up to `limit` most recent candle closes at `interval_minutes`,
    /// oldest first.
    async fn recent_closes(
        &self,
        symbol: &str,
        interval_minutes: u32,
        limit: u32,
    ) -> Result<Vec<f64>, MarketDataError>;
}
