use serde::Deserialize;

use crate::error::MarketDataError;
use crate::remote::parse_price;

#[derive(Deserialize, Debug)]
pub struct KlineResponse {
    #[serde(rename(deserialize = "retCode"))]
    pub ret_code: i64,
    #[serde(rename(deserialize = "retMsg"))]
    pub ret_msg: String,
    pub result: KlineResult,
}

#[derive(Deserialize, Debug)]
pub struct KlineResult {
    /// Rows of [start, open, high, low, close, volume, turnover],
    /// newest first.
    #[serde(default)]
    pub list: Vec<Vec<String>>,
}

const CLOSE_IDX: usize = 4;

impl KlineResponse {
    /// Close prices in chronological order. The provider sends rows
    /// newest-first; everything downstream expects oldest-first, so the
    /// reversal happens here and nowhere else.
    pub fn into_closes(self, symbol: &str) -> Result<Vec<f64>, MarketDataError> {
        if self.result.list.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }

        let mut closes = Vec::with_capacity(self.result.list.len());
        for row in &self.result.list {
            let raw = row
                .get(CLOSE_IDX)
                .ok_or_else(|| MarketDataError::Malformed {
                    field: "kline row",
                    value: format!("{row:?}"),
                })?;
            closes.push(parse_price("kline close", raw)?);
        }
        closes.reverse();
        Ok(closes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_are_reversed_to_chronological_order() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "symbol": "BTCUSDT",
                "list": [
                    ["1700000120000", "50.0", "51.0", "49.0", "50.5", "10", "505"],
                    ["1700000060000", "49.0", "50.0", "48.0", "50.0", "12", "600"],
                    ["1700000000000", "48.0", "49.5", "47.5", "49.0", "9", "441"]
                ]
            }
        }"#;
        let response: KlineResponse = serde_json::from_str(raw).unwrap();
        let closes = response.into_closes("BTCUSDT").unwrap();

        assert_eq!(closes, vec![49.0, 50.0, 50.5]);
    }

    #[test]
    fn empty_list_is_no_data() {
        let raw = r#"{"retCode": 0, "retMsg": "OK", "result": {"list": []}}"#;
        let response: KlineResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            response.into_closes("BTCUSDT"),
            Err(MarketDataError::NoData(_))
        ));
    }

    #[test]
    fn short_row_is_malformed() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {"list": [["1700000000000", "48.0"]]}
        }"#;
        let response: KlineResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            response.into_closes("BTCUSDT"),
            Err(MarketDataError::Malformed { .. })
        ));
    }

    #[test]
    fn unparseable_close_is_malformed() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {"list": [["1700000000000", "48.0", "49.5", "47.5", "oops", "9", "441"]]}
        }"#;
        let response: KlineResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            response.into_closes("BTCUSDT"),
            Err(MarketDataError::Malformed { .. })
        ));
    }
}
