//! Pure indicator math over close-price series.
//!
//! No I/O, no state. Insufficient history yields `None` instead of an
//! error; the signal builder falls back to a default rule.

/// Fast/slow moving-average windows and the oscillator period used by
/// the signal builder.
pub const SMA_FAST: usize = 5;
pub const SMA_SLOW: usize = 20;
pub const RSI_PERIOD: usize = 14;

/// Simple moving average of the last `window` values.
pub fn sma(series: &[f64], window: usize) -> Option<f64> {
    if window == 0 || series.len() < window {
        return None;
    }
    let sum: f64 = series[series.len() - window..].iter().sum();
    Some(sum / window as f64)
}

/// RSI-style momentum oscillator over the last `period` deltas.
///
/// Gains and losses are plain averages over the window, no smoothing.
/// A window with no losing delta saturates at 100.
pub fn rsi(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period + 1 {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in series.len() - period..series.len() {
        let diff = series[i] - series[i - 1];
        if diff >= 0.0 {
            gains += diff;
        } else {
            losses -= diff;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Indicator state derived from one price series. Recomputed from
/// scratch every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(series: &[f64]) -> Self {
        Self {
            sma_fast: sma(series, SMA_FAST),
            sma_slow: sma(series, SMA_SLOW),
            rsi: rsi(series, RSI_PERIOD),
        }
    }
}
