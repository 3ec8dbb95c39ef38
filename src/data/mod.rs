//! Chain snapshot providers
//!
//! Handles:
//! - Yahoo Finance API for live chains (free, delayed)
//! - JSON snapshot files for offline runs

pub mod yahoo;
pub mod file;

pub use yahoo::*;
pub use file::*;

use crate::core::{ChainSnapshot, PositioningResult};

/// Source of a full option chain plus spot for one underlying
pub trait ChainProvider {
    fn fetch_snapshot(&self, symbol: &str) -> PositioningResult<ChainSnapshot>;
}
