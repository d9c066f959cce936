use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time price snapshot for one symbol. Built fresh on every
/// fetch and discarded with the cycle that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub last_price: f64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub observed_at: DateTime<Utc>,
}
