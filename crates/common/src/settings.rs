use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("capital used must be a positive amount, got {0}")]
    NonPositiveCapital(f64),
    #[error("risk amount must be a positive amount, got {0}")]
    NonPositiveRisk(f64),
    #[error("symbol list is empty")]
    NoSymbols,
}

/// User risk inputs, constant for the duration of a generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    pub capital_used: f64,
    pub risk_amount: f64,
}

/// Validated engine configuration. Construction fails fast, before any
/// network call is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub risk: RiskParameters,
    pub symbols: Vec<String>,
}

impl Settings {
    pub fn new(
        capital_used: f64,
        risk_amount: f64,
        symbols: Vec<String>,
    ) -> Result<Self, SettingsError> {
        if !capital_used.is_finite() || capital_used <= 0.0 {
            return Err(SettingsError::NonPositiveCapital(capital_used));
        }
        if !risk_amount.is_finite() || risk_amount <= 0.0 {
            return Err(SettingsError::NonPositiveRisk(risk_amount));
        }
        if symbols.is_empty() {
            return Err(SettingsError::NoSymbols);
        }
        Ok(Self {
            risk: RiskParameters {
                capital_used,
                risk_amount,
            },
            symbols,
        })
    }
}
