//! Option contract definitions
//!
//! A listed option as seen in a chain snapshot: strike, side, implied
//! volatility and the two activity figures (volume, open interest).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Lowercase label used in snapshots and logs
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// The opposite side of the chain
    pub fn opposite(&self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }
}

/// One listed option contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Strike price
    pub strike: f64,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Listed expiration date
    pub expiry: NaiveDate,
    /// Implied volatility, annualized decimal (0.35 = 35%)
    #[serde(default)]
    pub implied_volatility: f64,
    /// Contracts traded
    #[serde(default)]
    pub volume: u64,
    /// Contracts outstanding
    #[serde(default)]
    pub open_interest: u64,
    /// Contract symbol (exchange-specific)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl OptionContract {
    pub fn new(
        strike: f64,
        option_type: OptionType,
        expiry: NaiveDate,
        implied_volatility: f64,
        volume: u64,
        open_interest: u64,
    ) -> Self {
        Self {
            strike,
            option_type,
            expiry,
            implied_volatility,
            volume,
            open_interest,
            symbol: None,
        }
    }

    pub fn call(strike: f64, expiry: NaiveDate, iv: f64, volume: u64, open_interest: u64) -> Self {
        Self::new(strike, OptionType::Call, expiry, iv, volume, open_interest)
    }

    pub fn put(strike: f64, expiry: NaiveDate, iv: f64, volume: u64, open_interest: u64) -> Self {
        Self::new(strike, OptionType::Put, expiry, iv, volume, open_interest)
    }

    /// Expiration instant: end of day (23:59:59 UTC) on the listed date
    pub fn expiration_instant(&self) -> DateTime<Utc> {
        expiration_instant(self.expiry)
    }

    /// Days to expiration as seen from `as_of`, never less than 1
    pub fn days_to_expiration(&self, as_of: DateTime<Utc>) -> i64 {
        days_to_expiration(self.expiry, as_of)
    }

    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    pub fn is_put(&self) -> bool {
        self.option_type == OptionType::Put
    }
}

/// End of the listed expiration day
pub fn expiration_instant(expiry: NaiveDate) -> DateTime<Utc> {
    expiry.and_time(end_of_day()).and_utc()
}

/// Whole days from `as_of` to the end of `expiry`, counting the final
/// partial day as a full one. Floored at 1 so time-to-expiry is never zero.
pub fn days_to_expiration(expiry: NaiveDate, as_of: DateTime<Utc>) -> i64 {
    let days = (expiration_instant(expiry) - as_of).num_days() + 1;
    days.max(1)
}

fn end_of_day() -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(chrono::NaiveTime::MIN)
}
