//! Positioning ratios from a listed option chain
//!
//! Five per-expiration indicators, each normalized to roughly [-1, 1]:
//! - **Skew**: downside vs upside implied volatility, calls and puts blended
//! - **Volume**: call vs put contracts traded
//! - **Open interest**: call vs put contracts outstanding
//! - **Delta exposure**: net vs gross open-interest weighted delta
//! - **Gamma exposure**: call vs put open-interest weighted gamma
//!
//! A zero denominator is never an error: the ratio is reported as 0.

mod config;
mod exposure;
mod flow;
mod report;
mod skew;

pub use config::*;
pub use exposure::*;
pub use flow::*;
pub use report::*;
pub use skew::*;

/// `(a - b) / (a + b)`, or 0 when the sum is zero
pub fn normalized_difference(a: f64, b: f64) -> f64 {
    let total = a + b;
    if total == 0.0 {
        0.0
    } else {
        (a - b) / total
    }
}
