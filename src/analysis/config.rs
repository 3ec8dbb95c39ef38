//! Configuration for positioning analysis

use serde::{Deserialize, Serialize};

use crate::core::{PositioningError, PositioningResult};
use crate::models::DEFAULT_RISK_FREE_RATE;

/// Tunable constants shared by the analyzers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Annualized risk-free rate for delta/gamma estimation
    /// Default: 0.05
    pub risk_free_rate: f64,

    /// Quotes with implied volatility below this are treated as stale and
    /// left out of skew computation (a quote exactly at the threshold is kept)
    /// Default: 0.001
    pub min_implied_vol: f64,

    /// Day count for time to expiry in the Greeks
    /// Default: 365
    pub days_per_year: f64,

    /// Day count used to annualize anticipated price ranges
    /// Default: 252
    pub trading_days_per_year: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            min_implied_vol: 0.001,
            days_per_year: 365.0,
            trading_days_per_year: 252.0,
        }
    }
}

impl AnalysisConfig {
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn validate(&self) -> PositioningResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(PositioningError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if !(self.min_implied_vol >= 0.0) {
            return Err(PositioningError::invalid_input(format!(
                "minimum implied volatility must be non-negative, got {}",
                self.min_implied_vol
            )));
        }
        if !(self.days_per_year > 0.0) || !(self.trading_days_per_year > 0.0) {
            return Err(PositioningError::invalid_input("day counts must be positive"));
        }
        Ok(())
    }
}
