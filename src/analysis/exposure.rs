//! Delta and gamma exposure bias
//!
//! Per-contract Greeks come from [`GreeksEstimator`] and are weighted by open
//! interest (and spot, for gamma), then summed per side:
//!
//! - delta: `(call + put) / (|call| + |put|)`; put delta is already negative,
//!   so this is net directional exposure over gross exposure.
//! - gamma: `(call - put) / (call + put)`; both sums are non-negative.

use serde::{Deserialize, Serialize};

use crate::core::{ExpirationGroup, GreekedContract, OptionType};
use crate::models::GreeksEstimator;

use super::{normalized_difference, AnalysisConfig};

/// Per-side exposure sums for one expiration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureSums {
    pub call_delta: f64,
    pub put_delta: f64,
    pub call_gamma: f64,
    pub put_gamma: f64,
}

impl ExposureSums {
    pub fn delta_ratio(&self) -> f64 {
        let gross = self.call_delta.abs() + self.put_delta.abs();
        if gross == 0.0 {
            0.0
        } else {
            (self.call_delta + self.put_delta) / gross
        }
    }

    pub fn gamma_ratio(&self) -> f64 {
        normalized_difference(self.call_gamma, self.put_gamma)
    }
}

/// Computes delta/gamma exposure ratios per expiration
#[derive(Debug, Clone, Copy, Default)]
pub struct ExposureAnalyzer {
    estimator: GreeksEstimator,
}

impl ExposureAnalyzer {
    pub fn new(estimator: GreeksEstimator) -> Self {
        Self { estimator }
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self::new(
            GreeksEstimator::with_rate(config.risk_free_rate).with_day_count(config.days_per_year),
        )
    }

    pub fn estimator(&self) -> &GreeksEstimator {
        &self.estimator
    }

    /// Every contract of the group paired with its Greeks
    pub fn greeks<'a>(&self, group: &ExpirationGroup<'a>) -> Vec<GreekedContract<'a>> {
        group
            .contracts()
            .map(|c| self.estimator.annotate(c, group.spot, group.days_to_expiration))
            .collect()
    }

    /// Open-interest weighted exposure per side
    pub fn exposure_sums(&self, group: &ExpirationGroup<'_>) -> ExposureSums {
        self.greeks(group)
            .iter()
            .fold(ExposureSums::default(), |mut sums, g| {
                let delta = g.delta_exposure();
                let gamma = g.gamma_exposure(group.spot);
                match g.option_type() {
                    OptionType::Call => {
                        sums.call_delta += delta;
                        sums.call_gamma += gamma;
                    }
                    OptionType::Put => {
                        sums.put_delta += delta;
                        sums.put_gamma += gamma;
                    }
                }
                sums
            })
    }

    pub fn delta_exposure_ratio(&self, group: &ExpirationGroup<'_>) -> f64 {
        self.exposure_sums(group).delta_ratio()
    }

    pub fn gamma_exposure_ratio(&self, group: &ExpirationGroup<'_>) -> f64 {
        self.exposure_sums(group).gamma_ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChainSnapshot, OptionContract};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    fn snapshot(contracts: Vec<OptionContract>) -> ChainSnapshot {
        let as_of = Utc.with_ymd_and_hms(2025, 5, 22, 0, 0, 0).unwrap();
        ChainSnapshot::new("TEST", 100.0, as_of, contracts).unwrap()
    }

    fn scenario() -> ChainSnapshot {
        let e = expiry();
        snapshot(vec![
            OptionContract::call(90.0, e, 0.40, 100, 200),
            OptionContract::call(110.0, e, 0.30, 50, 100),
            OptionContract::put(90.0, e, 0.45, 200, 300),
            OptionContract::put(110.0, e, 0.25, 20, 50),
        ])
    }

    #[test]
    fn test_scenario_exposure() {
        let snap = scenario();
        let group = snap.group(expiry());
        let analyzer = ExposureAnalyzer::default();
        let sums = analyzer.exposure_sums(&group);

        assert!(sums.call_delta > 0.0);
        assert!(sums.put_delta < 0.0);
        assert!(sums.call_gamma > 0.0 && sums.put_gamma > 0.0);

        // 30 days at r = 0.05
        let delta = analyzer.delta_exposure_ratio(&group);
        assert!((delta - 0.302_096_329).abs() < 1e-6, "delta ratio {}", delta);

        let gamma = analyzer.gamma_exposure_ratio(&group);
        assert!((gamma - (-0.033_196_317)).abs() < 1e-6, "gamma ratio {}", gamma);
    }

    #[test]
    fn test_swapping_sides_negates() {
        let snap = scenario();
        let sums = ExposureAnalyzer::default().exposure_sums(&snap.group(expiry()));

        // Call roles become put roles; put delta keeps its negative sign
        let swapped = ExposureSums {
            call_delta: -sums.put_delta,
            put_delta: -sums.call_delta,
            call_gamma: sums.put_gamma,
            put_gamma: sums.call_gamma,
        };

        assert_eq!(swapped.delta_ratio(), -sums.delta_ratio());
        assert_eq!(swapped.gamma_ratio(), -sums.gamma_ratio());
    }

    #[test]
    fn test_greeks_do_not_touch_snapshot() {
        let snap = scenario();
        let before = snap.clone();
        let group = snap.group(expiry());
        let greeked = ExposureAnalyzer::default().greeks(&group);

        assert_eq!(greeked.len(), 4);
        assert!(greeked
            .iter()
            .filter(|g| g.option_type() == OptionType::Call)
            .all(|g| g.greeks.delta > 0.0));
        assert_eq!(snap, before);
    }

    #[test]
    fn test_no_open_interest_is_neutral() {
        let e = expiry();
        let snap = snapshot(vec![
            OptionContract::call(95.0, e, 0.3, 10, 0),
            OptionContract::put(105.0, e, 0.3, 10, 0),
        ]);
        let group = snap.group(e);
        let analyzer = ExposureAnalyzer::default();

        assert_eq!(analyzer.delta_exposure_ratio(&group), 0.0);
        assert_eq!(analyzer.gamma_exposure_ratio(&group), 0.0);
    }

    #[test]
    fn test_zero_vol_contracts_contribute_nothing() {
        let e = expiry();
        let snap = snapshot(vec![
            OptionContract::call(95.0, e, 0.3, 0, 100),
            OptionContract::put(105.0, e, 0.0, 0, 1_000_000),
        ]);
        let group = snap.group(e);
        let sums = ExposureAnalyzer::default().exposure_sums(&group);

        assert_eq!(sums.put_delta, 0.0);
        assert_eq!(sums.put_gamma, 0.0);
        assert_eq!(sums.delta_ratio(), 1.0);
        assert_eq!(sums.gamma_ratio(), 1.0);
    }

    #[test]
    fn test_ratio_bounds() {
        let e = expiry();
        let mut contracts = Vec::new();
        for (i, strike) in [60.0, 80.0, 95.0, 100.0, 105.0, 120.0, 150.0].iter().enumerate() {
            let oi = (i as u64 + 1) * 37;
            contracts.push(OptionContract::call(*strike, e, 0.2 + 0.05 * i as f64, 0, oi));
            contracts.push(OptionContract::put(*strike, e, 0.6 - 0.05 * i as f64, 0, oi * 3));
        }
        let snap = snapshot(contracts);
        let group = snap.group(e);
        let sums = ExposureAnalyzer::default().exposure_sums(&group);

        assert!((-1.0..=1.0).contains(&sums.delta_ratio()));
        assert!((-1.0..=1.0).contains(&sums.gamma_ratio()));
    }

    #[test]
    fn test_config_rate_reaches_estimator() {
        let config = AnalysisConfig::default().with_risk_free_rate(0.02);
        let analyzer = ExposureAnalyzer::with_config(&config);
        assert_eq!(analyzer.estimator().risk_free_rate(), 0.02);
    }
}
