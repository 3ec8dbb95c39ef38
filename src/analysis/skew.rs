//! Implied-volatility skew
//!
//! For each side of an expiration (calls, puts) the average IV of strikes
//! below spot is compared with the average IV of strikes above spot:
//!
//! ```text
//! skew = (left_iv - right_iv) / (left_iv + right_iv)      in [-1, 1]
//! ```
//!
//! Positive skew means downside IV is richer (hedging demand below spot).
//! The two sides are then blended, weighting each by how far its mean IV
//! sits from the mean of all four one-sided averages.

use serde::{Deserialize, Serialize};

use crate::core::{ExpirationGroup, OptionContract};

use super::{normalized_difference, AnalysisConfig};

/// Skew of one side (calls or puts) of an expiration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSkew {
    /// Mean IV of strikes below spot (0 if none)
    pub left_avg_iv: f64,
    /// Mean IV of strikes above spot (0 if none)
    pub right_avg_iv: f64,
    /// Normalized left/right difference
    pub ratio: f64,
    /// spot * exp(left_avg_iv * sqrt(trading_days / days))
    pub left_price_range: f64,
    /// spot * exp(right_avg_iv * sqrt(trading_days / days))
    pub right_price_range: f64,
    /// Quotes that survived the stale-IV filter
    pub quotes_used: usize,
}

impl SideSkew {
    /// Mean of the two one-sided averages
    pub fn mean_iv(&self) -> f64 {
        (self.left_avg_iv + self.right_avg_iv) / 2.0
    }
}

/// Call and put skews with the deviation weights that combine them
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkewBreakdown {
    pub call: SideSkew,
    pub put: SideSkew,
    pub call_weight: f64,
    pub put_weight: f64,
    /// call_weight * call.ratio + put_weight * put.ratio
    pub weighted_ratio: f64,
}

/// Computes skew ratios per expiration
#[derive(Debug, Clone, Copy)]
pub struct SkewAnalyzer {
    min_implied_vol: f64,
    trading_days_per_year: f64,
}

impl SkewAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&AnalysisConfig::default())
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self {
            min_implied_vol: config.min_implied_vol,
            trading_days_per_year: config.trading_days_per_year,
        }
    }

    /// Whether a quote's IV is usable (at or above the stale threshold)
    pub fn retains(&self, implied_volatility: f64) -> bool {
        implied_volatility >= self.min_implied_vol
    }

    /// One-sided skew over already-filtered contracts
    pub fn side_skew(
        &self,
        contracts: &[&OptionContract],
        spot: f64,
        days_to_expiration: i64,
    ) -> SideSkew {
        let left_avg_iv = mean_iv(contracts.iter().filter(|c| c.strike < spot));
        let right_avg_iv = mean_iv(contracts.iter().filter(|c| c.strike > spot));

        let annual_factor = (self.trading_days_per_year / days_to_expiration.max(1) as f64).sqrt();

        SideSkew {
            left_avg_iv,
            right_avg_iv,
            ratio: normalized_difference(left_avg_iv, right_avg_iv),
            left_price_range: spot * (left_avg_iv * annual_factor).exp(),
            right_price_range: spot * (right_avg_iv * annual_factor).exp(),
            quotes_used: contracts.len(),
        }
    }

    /// Call/put skews for one expiration and their deviation-weighted blend
    pub fn analyze(&self, group: &ExpirationGroup<'_>) -> SkewBreakdown {
        let calls = self.filter(&group.calls);
        let puts = self.filter(&group.puts);

        let call = self.side_skew(&calls, group.spot, group.days_to_expiration);
        let put = self.side_skew(&puts, group.spot, group.days_to_expiration);

        let (call_weight, put_weight) = deviation_weights(&call, &put);

        tracing::debug!(
            expiry = %group.expiry,
            calls_used = call.quotes_used,
            calls_dropped = group.calls.len() - call.quotes_used,
            puts_used = put.quotes_used,
            puts_dropped = group.puts.len() - put.quotes_used,
            "skew inputs"
        );

        SkewBreakdown {
            call,
            put,
            call_weight,
            put_weight,
            weighted_ratio: call_weight * call.ratio + put_weight * put.ratio,
        }
    }

    /// Weighted skew ratio for one expiration
    pub fn skew_ratio(&self, group: &ExpirationGroup<'_>) -> f64 {
        self.analyze(group).weighted_ratio
    }

    fn filter<'a>(&self, contracts: &[&'a OptionContract]) -> Vec<&'a OptionContract> {
        contracts
            .iter()
            .copied()
            .filter(|c| self.retains(c.implied_volatility))
            .collect()
    }
}

impl Default for SkewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Weights favouring the side whose mean IV deviates more from the overall
/// norm. Both deviations zero gives 0.5 / 0.5.
pub fn deviation_weights(call: &SideSkew, put: &SideSkew) -> (f64, f64) {
    let norm = (call.left_avg_iv + call.right_avg_iv + put.left_avg_iv + put.right_avg_iv) / 4.0;
    let call_deviation = (call.mean_iv() - norm).abs();
    let put_deviation = (put.mean_iv() - norm).abs();

    let total = call_deviation + put_deviation;
    if total == 0.0 {
        (0.5, 0.5)
    } else {
        (call_deviation / total, put_deviation / total)
    }
}

fn mean_iv<'a, 'b: 'a>(contracts: impl Iterator<Item = &'a &'b OptionContract>) -> f64 {
    let (sum, count) = contracts.fold((0.0, 0usize), |(sum, n), c| {
        (sum + c.implied_volatility, n + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
