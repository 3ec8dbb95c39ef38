//! Core data types for positioning analysis
//!
//! Defines fundamental types:
//! - OptionContract: Strike, expiry, type (call/put), IV, volume, open interest
//! - ChainSnapshot: Immutable full chain plus spot at an evaluation instant
//! - ExpirationGroup: Per-expiry call/put view of a snapshot
//! - Greeks: Delta and gamma estimates

pub mod option;
pub mod snapshot;
pub mod greeks;
pub mod error;

pub use option::*;
pub use snapshot::*;
pub use greeks::*;
pub use error::*;
