//! Option Greeks
//!
//! The two sensitivities needed for exposure weighting, and contracts
//! annotated with them.

use serde::{Deserialize, Serialize};

use super::option::{OptionContract, OptionType};

/// First and second order spot sensitivities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64) -> Self {
        Self { delta, gamma }
    }
}

/// A contract paired with its estimated Greeks.
///
/// Produced fresh per contract; the snapshot the contract came from is
/// never modified.
#[derive(Debug, Clone, Copy)]
pub struct GreekedContract<'a> {
    pub contract: &'a OptionContract,
    pub greeks: Greeks,
}

impl<'a> GreekedContract<'a> {
    pub fn new(contract: &'a OptionContract, greeks: Greeks) -> Self {
        Self { contract, greeks }
    }

    pub fn option_type(&self) -> OptionType {
        self.contract.option_type
    }

    /// Delta weighted by open interest
    pub fn delta_exposure(&self) -> f64 {
        self.greeks.delta * self.contract.open_interest as f64
    }

    /// Gamma weighted by open interest and spot
    pub fn gamma_exposure(&self, spot: f64) -> f64 {
        self.greeks.gamma * self.contract.open_interest as f64 * spot
    }
}
