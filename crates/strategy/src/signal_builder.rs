use common::models::{Side, Signal};
use common::settings::RiskParameters;

use crate::indicators::IndicatorSnapshot;

const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

/// Leverage policy table. The two largest-cap pairs trade at lower
/// leverage; everything else defaults higher.
pub fn leverage_for(symbol: &str) -> f64 {
    match symbol {
        "BTCUSDT" | "ETHUSDT" => 20.0,
        _ => 30.0,
    }
}

/// Builds one recommendation for `symbol` at the quoted `price`.
///
/// Deterministic and infallible: missing indicator history degrades to
/// the default scalp setup. Rules are checked in order, first match
/// wins — the oscillator extremes take precedence over the moving-average
/// crossover.
pub fn build_signal(symbol: &str, price: f64, risk: RiskParameters, closes: &[f64]) -> Signal {
    let leverage = leverage_for(symbol);
    let ind = IndicatorSnapshot::compute(closes);

    let (side, reason) = match ind {
        IndicatorSnapshot { rsi: Some(r), .. } if r < OVERSOLD => (Side::Long, "oversold bounce"),
        IndicatorSnapshot { rsi: Some(r), .. } if r > OVERBOUGHT => {
            (Side::Short, "overbought fade")
        }
        IndicatorSnapshot {
            sma_fast: Some(fast),
            sma_slow: Some(slow),
            ..
        } => {
            if fast > slow {
                (Side::Long, "momentum up")
            } else {
                (Side::Short, "momentum down")
            }
        }
        _ => (Side::Long, "default scalp setup"),
    };

    // Target recaptures the full deployed capital. The fraction keeps
    // profit target and capital as independent inputs even though it
    // reduces to 1/leverage today.
    let profit_target_usdt = risk.capital_used;
    let take_profit_fraction = profit_target_usdt / risk.capital_used / leverage;
    let risk_usdt = risk.risk_amount.min(risk.capital_used * 0.5);
    let stop_loss_fraction = risk_usdt / risk.capital_used / leverage;

    let entry = price;
    let (take_profit, stop_loss) = match side {
        Side::Long => (
            entry * (1.0 + take_profit_fraction),
            entry * (1.0 - stop_loss_fraction),
        ),
        Side::Short => (
            entry * (1.0 - take_profit_fraction),
            entry * (1.0 + stop_loss_fraction),
        ),
    };

    let amount_usdt = risk.capital_used;
    let score = reward_risk_score(take_profit, entry, risk_usdt, amount_usdt);

    Signal {
        symbol: symbol.to_string(),
        side,
        price,
        entry,
        take_profit,
        stop_loss,
        amount_usdt,
        leverage,
        profit_target_usdt,
        risk_usdt,
        reason: reason.to_string(),
        score,
    }
}

/// Price-relative target distance over capital-relative risk fraction.
/// Higher ranks first.
pub fn reward_risk_score(take_profit: f64, entry: f64, risk_usdt: f64, amount_usdt: f64) -> f64 {
    (take_profit - entry).abs() / entry / (risk_usdt / amount_usdt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(capital: f64, amount: f64) -> RiskParameters {
        RiskParameters {
            capital_used: capital,
            risk_amount: amount,
        }
    }

    /// 20 closes whose last 14 deltas all fall while the fast average
    /// still sits above the slow one.
    fn oversold_with_fast_above_slow() -> Vec<f64> {
        let mut closes = vec![50.0, 200.0, 200.0, 200.0, 200.0];
        closes.extend((0..15).map(|i| 199.0 - i as f64));
        closes
    }

    fn drifting(len: usize, drift: f64) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + drift * i as f64 + (i % 2) as f64)
            .collect()
    }

    #[test]
    fn leverage_table_favors_large_caps() {
        assert_eq!(leverage_for("BTCUSDT"), 20.0);
        assert_eq!(leverage_for("ETHUSDT"), 20.0);
        assert_eq!(leverage_for("DOGEUSDT"), 30.0);
        assert_eq!(leverage_for("TONUSDT"), 30.0);
    }

    #[test]
    fn oversold_rule_precedes_moving_average_rule() {
        let closes = oversold_with_fast_above_slow();
        let snapshot = crate::indicators::IndicatorSnapshot::compute(&closes);
        assert!(snapshot.rsi.unwrap() < 30.0);
        assert!(snapshot.sma_fast.unwrap() > snapshot.sma_slow.unwrap());

        let signal = build_signal("SOLUSDT", 100.0, risk(20.0, 5.0), &closes);
        assert_eq!(signal.side, Side::Long);
        assert_eq!(signal.reason, "oversold bounce");
    }

    #[test]
    fn overbought_series_fades_short() {
        let rising: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let signal = build_signal("SOLUSDT", 130.0, risk(20.0, 5.0), &rising);
        assert_eq!(signal.side, Side::Short);
        assert_eq!(signal.reason, "overbought fade");
    }

    #[test]
    fn neutral_oscillator_follows_moving_averages() {
        let up = build_signal("SOLUSDT", 103.0, risk(20.0, 5.0), &drifting(25, 0.1));
        assert_eq!(up.side, Side::Long);
        assert_eq!(up.reason, "momentum up");

        let down = build_signal("SOLUSDT", 97.0, risk(20.0, 5.0), &drifting(25, -0.1));
        assert_eq!(down.side, Side::Short);
        assert_eq!(down.reason, "momentum down");
    }

    #[test]
    fn missing_history_falls_back_to_default_setup() {
        let signal = build_signal("SOLUSDT", 100.0, risk(20.0, 5.0), &[100.0, 101.0, 99.0]);
        assert_eq!(signal.side, Side::Long);
        assert_eq!(signal.reason, "default scalp setup");

        // Oscillator defined but the slow average is not: still the
        // fallback, both averages are required for the crossover rule.
        let alternating: Vec<f64> = (0..16).map(|i| 100.0 + (i % 2) as f64).collect();
        let signal = build_signal("SOLUSDT", 100.0, risk(20.0, 5.0), &alternating);
        assert_eq!(signal.reason, "default scalp setup");
    }

    #[test]
    fn long_targets_bracket_entry() {
        let closes: Vec<f64> = (0..25).map(|i| 200.0 - i as f64).collect();
        let signal = build_signal("BTCUSDT", 50_000.0, risk(20.0, 5.0), &closes);
        assert_eq!(signal.side, Side::Long);
        assert!(signal.take_profit > signal.entry);
        assert!(signal.entry > signal.stop_loss);
    }

    #[test]
    fn short_targets_bracket_entry() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let signal = build_signal("BTCUSDT", 50_000.0, risk(20.0, 5.0), &closes);
        assert_eq!(signal.side, Side::Short);
        assert!(signal.stop_loss > signal.entry);
        assert!(signal.entry > signal.take_profit);
    }

    #[test]
    fn risk_is_capped_at_half_the_capital() {
        let signal = build_signal("BTCUSDT", 50_000.0, risk(20.0, 100.0), &[]);
        assert_eq!(signal.risk_usdt, 10.0);

        let signal = build_signal("BTCUSDT", 50_000.0, risk(20.0, 5.0), &[]);
        assert_eq!(signal.risk_usdt, 5.0);
    }

    #[test]
    fn btcusdt_example_produces_expected_levels() {
        let oversold: Vec<f64> = (0..60).map(|i| 60_000.0 - 100.0 * i as f64).collect();
        let signal = build_signal("BTCUSDT", 50_000.0, risk(20.0, 5.0), &oversold);

        assert_eq!(signal.side, Side::Long);
        assert_eq!(signal.reason, "oversold bounce");
        assert_eq!(signal.leverage, 20.0);
        assert_eq!(signal.entry, 50_000.0);
        assert_eq!(signal.risk_usdt, 5.0);
        assert_eq!(signal.profit_target_usdt, 20.0);
        assert_eq!(signal.amount_usdt, 20.0);
        // tp = 50000 * (1 + 20/20/20), sl = 50000 * (1 - 5/20/20)
        assert!((signal.take_profit - 52_500.0).abs() < 1e-6);
        assert!((signal.stop_loss - 49_375.0).abs() < 1e-6);
    }

    #[test]
    fn score_doubles_with_target_distance() {
        let near = reward_risk_score(105.0, 100.0, 5.0, 20.0);
        let far = reward_risk_score(110.0, 100.0, 5.0, 20.0);
        assert!((far - near * 2.0).abs() < 1e-12);
    }
}
