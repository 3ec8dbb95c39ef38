//! # Option Positioning - Sentiment Ratios from Listed Option Chains
//!
//! Computes market-positioning indicators for a single underlying from its
//! full option chain, per expiration and averaged across expirations.
//!
//! ## Overview
//!
//! Five ratios, each normalized to roughly [-1, 1]:
//! - **Skew shift**: downside vs upside implied volatility (positive = fear)
//! - **Put/call volume**: call vs put contracts traded (positive = calls)
//! - **Open interest**: call vs put contracts outstanding
//! - **Delta exposure**: net vs gross open-interest weighted delta
//! - **Gamma exposure**: call vs put open-interest weighted gamma
//!
//! Delta and gamma are Black-Scholes estimates using each contract's own
//! implied volatility and a fixed risk-free rate (5% by default).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use option_positioning::prelude::*;
//!
//! // Fetch the full chain from Yahoo Finance
//! let snapshot = YahooClient::new()?.fetch_snapshot("RKLB")?;
//!
//! // Evaluate every expiration
//! let report = ReportAggregator::new().run(&snapshot);
//! println!("{}", report);
//! # Ok::<(), option_positioning::PositioningError>(())
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Fit or calibrate a volatility surface
//! - Store snapshots or history
//! - Aggregate across underlyings
//! - Handle dividends or American early exercise

pub mod analysis;
pub mod core;
pub mod data;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        ChainSnapshot, ExpirationGroup, GreekedContract, Greeks, OptionContract, OptionType,
        PositioningError, PositioningResult,
    };

    // Providers
    pub use crate::data::{load_snapshot, ChainProvider, SnapshotFile, YahooClient};

    // Greeks
    pub use crate::models::{norm_cdf, norm_pdf, GreeksEstimator, DEFAULT_RISK_FREE_RATE};

    // Analysis
    pub use crate::analysis::{
        open_interest_ratio, volume_ratio, AnalysisConfig, ExpirationRatios, ExposureAnalyzer,
        PositioningReport, RatioKind, RatioSeries, RatioSummary, ReportAggregator, SideSkew,
        SkewAnalyzer, SkewBreakdown,
    };
}

// Re-export main types at crate root
pub use crate::analysis::{PositioningReport, ReportAggregator};
pub use crate::core::{ChainSnapshot, PositioningError, PositioningResult};
