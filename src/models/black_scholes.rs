//! Black-Scholes Greeks
//!
//! Provides:
//! - Standard normal CDF / PDF
//! - The d1 term
//! - `GreeksEstimator`: delta and gamma per contract, using the contract's own
//!   implied volatility and a fixed risk-free rate
//!
//! No pricing, calibration or dividend handling is done here; the estimates
//! exist only to weight open interest into exposure figures.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::function::erf::erfc;

use crate::core::{GreekedContract, Greeks, OptionContract, OptionType};

/// Default annualized risk-free rate
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter (no dividend yield)
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Delta for one side; zero when vol or time is degenerate
pub fn delta(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> f64 {
    if vol <= 0.0 || time <= 0.0 {
        return 0.0;
    }

    let cdf = norm_cdf(d1(spot, strike, rate, vol, time));
    match option_type {
        OptionType::Call => cdf,
        OptionType::Put => cdf - 1.0,
    }
}

/// Gamma (same for call and put); zero when vol or time is degenerate
pub fn gamma(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    if vol <= 0.0 || time <= 0.0 {
        return 0.0;
    }

    let sqrt_t = time.sqrt();
    norm_pdf(d1(spot, strike, rate, vol, time)) / (spot * vol * sqrt_t)
}

/// Estimates delta and gamma from each contract's own implied volatility
#[derive(Debug, Clone, Copy)]
pub struct GreeksEstimator {
    risk_free_rate: f64,
    days_per_year: f64,
}

impl GreeksEstimator {
    /// Estimator with the default 5% rate and a 365-day year
    pub fn new() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            days_per_year: 365.0,
        }
    }

    pub fn with_rate(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..Self::new()
        }
    }

    pub fn with_day_count(mut self, days_per_year: f64) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Time to expiry in years
    pub fn time_to_expiry(&self, days_to_expiration: i64) -> f64 {
        days_to_expiration as f64 / self.days_per_year
    }

    /// Delta and gamma for one contract
    pub fn estimate(
        &self,
        contract: &OptionContract,
        spot: f64,
        days_to_expiration: i64,
    ) -> Greeks {
        let time = self.time_to_expiry(days_to_expiration);
        let vol = contract.implied_volatility;

        Greeks::new(
            delta(spot, contract.strike, self.risk_free_rate, vol, time, contract.option_type),
            gamma(spot, contract.strike, self.risk_free_rate, vol, time),
        )
    }

    /// Pair a contract with its estimated Greeks
    pub fn annotate<'a>(
        &self,
        contract: &'a OptionContract,
        spot: f64,
        days_to_expiration: i64,
    ) -> GreekedContract<'a> {
        GreekedContract::new(contract, self.estimate(contract, spot, days_to_expiration))
    }
}

impl Default for GreeksEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
    }

    #[test]
    fn test_norm_pdf() {
        assert!((norm_pdf(0.0) - 0.398_942_28).abs() < 1e-8);
        assert!((norm_pdf(1.0) - norm_pdf(-1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_atm_greeks() {
        let estimator = GreeksEstimator::new();
        let call = OptionContract::call(100.0, expiry(), 0.20, 0, 0);
        let g = estimator.estimate(&call, 100.0, 365);

        // d1 = (0.05 + 0.02) / 0.2 = 0.35
        assert!((g.delta - norm_cdf(0.35)).abs() < 1e-12);
        assert!(g.delta > 0.6 && g.delta < 0.65);
        assert!((g.gamma - norm_pdf(0.35) / 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_call_put_delta_parity() {
        let estimator = GreeksEstimator::with_rate(0.03);
        for &(strike, vol, days) in &[(80.0, 0.25, 7), (100.0, 0.4, 30), (130.0, 0.9, 400)] {
            let call = OptionContract::call(strike, expiry(), vol, 0, 0);
            let put = OptionContract::put(strike, expiry(), vol, 0, 0);

            let gc = estimator.estimate(&call, 100.0, days);
            let gp = estimator.estimate(&put, 100.0, days);

            assert!((gc.delta - gp.delta - 1.0).abs() < 1e-12);
            assert!((gc.gamma - gp.gamma).abs() < 1e-15);
            assert!(gp.delta <= 0.0);
            assert!(gc.gamma >= 0.0);
        }
    }

    #[test]
    fn test_zero_vol_short_circuits() {
        let estimator = GreeksEstimator::new();
        for &strike in &[50.0, 100.0, 150.0] {
            for &days in &[1, 30, 720] {
                let call = OptionContract::call(strike, expiry(), 0.0, 10, 10);
                let put = OptionContract::put(strike, expiry(), 0.0, 10, 10);
                assert_eq!(estimator.estimate(&call, 100.0, days), Greeks::new(0.0, 0.0));
                assert_eq!(estimator.estimate(&put, 100.0, days), Greeks::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn test_zero_time_guarded() {
        assert_eq!(delta(100.0, 90.0, 0.05, 0.3, 0.0, OptionType::Call), 0.0);
        assert_eq!(gamma(100.0, 90.0, 0.05, 0.3, 0.0), 0.0);
    }

    #[test]
    fn test_rate_is_injectable() {
        let call = OptionContract::call(100.0, expiry(), 0.3, 0, 0);
        let low = GreeksEstimator::with_rate(0.0).estimate(&call, 100.0, 180);
        let high = GreeksEstimator::with_rate(0.10).estimate(&call, 100.0, 180);
        assert!(high.delta > low.delta);
    }
}
