//! Per-expiration ratio collection and aggregation
//!
//! `ReportAggregator` walks a snapshot's expirations in first-seen order,
//! runs every analyzer on each group and appends the results to one
//! `RatioSeries` per indicator. The means of those series are the headline
//! numbers.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChainSnapshot, ExpirationGroup, PositioningResult};

use super::{
    open_interest_ratio, volume_ratio, AnalysisConfig, ExposureAnalyzer, SkewAnalyzer,
    SkewBreakdown,
};

/// The five indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKind {
    Skew,
    Volume,
    OpenInterest,
    DeltaExposure,
    GammaExposure,
}

impl RatioKind {
    /// Report order
    pub const ALL: [RatioKind; 5] = [
        RatioKind::Skew,
        RatioKind::Volume,
        RatioKind::OpenInterest,
        RatioKind::DeltaExposure,
        RatioKind::GammaExposure,
    ];

    /// Label for a single value
    pub fn label(&self) -> &'static str {
        match self {
            RatioKind::Skew => "Skew Shift Ratio",
            RatioKind::Volume => "Put/Call Volume Ratio",
            RatioKind::OpenInterest => "Open Interest Ratio",
            RatioKind::DeltaExposure => "Delta Exposure Ratio",
            RatioKind::GammaExposure => "Gamma Exposure Ratio",
        }
    }
}

/// Ordered values of one indicator, one per expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    pub kind: RatioKind,
    values: Vec<f64>,
}

impl RatioSeries {
    pub fn new(kind: RatioKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean; None for an empty series
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }
}

/// All indicators for one expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationRatios {
    pub expiration: NaiveDate,
    pub days_to_expiration: i64,
    pub skew: SkewBreakdown,
    pub skew_ratio: f64,
    pub volume_ratio: f64,
    pub open_interest_ratio: f64,
    pub delta_exposure_ratio: f64,
    pub gamma_exposure_ratio: f64,
}

impl ExpirationRatios {
    pub fn get(&self, kind: RatioKind) -> f64 {
        match kind {
            RatioKind::Skew => self.skew_ratio,
            RatioKind::Volume => self.volume_ratio,
            RatioKind::OpenInterest => self.open_interest_ratio,
            RatioKind::DeltaExposure => self.delta_exposure_ratio,
            RatioKind::GammaExposure => self.gamma_exposure_ratio,
        }
    }
}

/// Mean of each indicator across expirations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSummary {
    pub skew: f64,
    pub volume: f64,
    pub open_interest: f64,
    pub delta_exposure: f64,
    pub gamma_exposure: f64,
}

impl RatioSummary {
    pub fn get(&self, kind: RatioKind) -> f64 {
        match kind {
            RatioKind::Skew => self.skew,
            RatioKind::Volume => self.volume,
            RatioKind::OpenInterest => self.open_interest,
            RatioKind::DeltaExposure => self.delta_exposure,
            RatioKind::GammaExposure => self.gamma_exposure,
        }
    }
}

/// Result of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositioningReport {
    pub underlying: String,
    pub spot: f64,
    pub as_of: DateTime<Utc>,
    /// One record per expiration, provider order
    pub expirations: Vec<ExpirationRatios>,
    pub averages: RatioSummary,
    series: Vec<RatioSeries>,
}

impl PositioningReport {
    /// Series for one indicator
    pub fn series(&self, kind: RatioKind) -> Option<&RatioSeries> {
        self.series.iter().find(|s| s.kind == kind)
    }

    /// Expiration dates in report order
    pub fn expiration_dates(&self) -> Vec<NaiveDate> {
        self.expirations.iter().map(|e| e.expiration).collect()
    }

    pub fn to_json(&self) -> PositioningResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::core::PositioningError::Serialization(e.to_string()))
    }
}

impl fmt::Display for PositioningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock Price: {:.2}", self.spot)?;

        for kind in RatioKind::ALL {
            writeln!(f)?;
            writeln!(f, "{}s:", kind.label())?;
            for record in &self.expirations {
                writeln!(
                    f,
                    "Expiration: {}, {}: {:.2}",
                    record.expiration.format("%Y-%m-%d"),
                    kind.label(),
                    record.get(kind)
                )?;
            }
            writeln!(f, "Average {}: {:.2}", kind.label(), self.averages.get(kind))?;
        }

        Ok(())
    }
}

/// Drives the per-expiration loop over a snapshot
#[derive(Debug, Clone, Copy)]
pub struct ReportAggregator {
    skew: SkewAnalyzer,
    exposure: ExposureAnalyzer,
}

impl ReportAggregator {
    pub fn new() -> Self {
        let config = AnalysisConfig::default();
        Self {
            skew: SkewAnalyzer::with_config(&config),
            exposure: ExposureAnalyzer::with_config(&config),
        }
    }

    pub fn with_config(config: &AnalysisConfig) -> PositioningResult<Self> {
        config.validate()?;
        Ok(Self {
            skew: SkewAnalyzer::with_config(config),
            exposure: ExposureAnalyzer::with_config(config),
        })
    }

    /// All five indicators for one expiration
    pub fn evaluate(&self, group: &ExpirationGroup<'_>) -> ExpirationRatios {
        let skew = self.skew.analyze(group);
        let sums = self.exposure.exposure_sums(group);

        ExpirationRatios {
            expiration: group.expiry,
            days_to_expiration: group.days_to_expiration,
            skew_ratio: skew.weighted_ratio,
            skew,
            volume_ratio: volume_ratio(group),
            open_interest_ratio: open_interest_ratio(group),
            delta_exposure_ratio: sums.delta_ratio(),
            gamma_exposure_ratio: sums.gamma_ratio(),
        }
    }

    /// Evaluate every expiration and average each indicator
    pub fn run(&self, snapshot: &ChainSnapshot) -> PositioningReport {
        let mut series: Vec<RatioSeries> =
            RatioKind::ALL.iter().map(|&k| RatioSeries::new(k)).collect();
        let mut expirations = Vec::new();

        for group in snapshot.groups() {
            let record = self.evaluate(&group);

            tracing::debug!(
                expiry = %record.expiration,
                days = record.days_to_expiration,
                skew = record.skew_ratio,
                volume = record.volume_ratio,
                open_interest = record.open_interest_ratio,
                delta = record.delta_exposure_ratio,
                gamma = record.gamma_exposure_ratio,
                "expiration evaluated"
            );

            for s in series.iter_mut() {
                s.push(record.get(s.kind));
            }
            expirations.push(record);
        }

        let mean = |kind: RatioKind| {
            series
                .iter()
                .find(|s| s.kind == kind)
                .and_then(RatioSeries::mean)
                .unwrap_or(0.0)
        };
        let averages = RatioSummary {
            skew: mean(RatioKind::Skew),
            volume: mean(RatioKind::Volume),
            open_interest: mean(RatioKind::OpenInterest),
            delta_exposure: mean(RatioKind::DeltaExposure),
            gamma_exposure: mean(RatioKind::GammaExposure),
        };

        tracing::info!(
            underlying = snapshot.underlying(),
            expirations = expirations.len(),
            contracts = snapshot.len(),
            "positioning report built"
        );

        PositioningReport {
            underlying: snapshot.underlying().to_string(),
            spot: snapshot.spot(),
            as_of: snapshot.as_of(),
            expirations,
            averages,
            series,
        }
    }
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}
