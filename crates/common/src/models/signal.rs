use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

/// One trade recommendation. Invariants: `entry` equals the quote price
/// at build time; `take_profit` lies beyond `entry` in the trade
/// direction and `stop_loss` against it; `risk_usdt` never exceeds half
/// the deployed capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub entry: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    pub amount_usdt: f64,
    pub leverage: f64,
    pub profit_target_usdt: f64,
    pub risk_usdt: f64,
    pub reason: String,
    pub score: f64,
}
