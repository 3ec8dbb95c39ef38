//! Pricing models
//!
//! Implements:
//! - Black-Scholes delta/gamma estimation

pub mod black_scholes;

pub use black_scholes::*;
