//! Option chain snapshot
//!
//! Immutable capture of one underlying's full chain at an evaluation instant,
//! and the per-expiration views derived from it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::{PositioningError, PositioningResult};
use super::option::{days_to_expiration, OptionContract, OptionType};

/// Full chain for one underlying at one evaluation instant.
///
/// Constructed once (validated), read-only afterwards. Contract order is the
/// provider's enumeration order and is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData")]
pub struct ChainSnapshot {
    underlying: String,
    spot: f64,
    as_of: DateTime<Utc>,
    contracts: Vec<OptionContract>,
}

impl ChainSnapshot {
    /// Build a snapshot, rejecting empty chains and malformed quotes
    pub fn new(
        underlying: impl Into<String>,
        spot: f64,
        as_of: DateTime<Utc>,
        contracts: Vec<OptionContract>,
    ) -> PositioningResult<Self> {
        let underlying = underlying.into();

        if !spot.is_finite() || spot <= 0.0 {
            return Err(PositioningError::invalid_input(format!(
                "spot price for {} must be positive, got {}",
                underlying, spot
            )));
        }
        if contracts.is_empty() {
            return Err(PositioningError::empty_chain(underlying));
        }

        for c in &contracts {
            if !c.strike.is_finite() || c.strike <= 0.0 {
                return Err(PositioningError::invalid_input(format!(
                    "{} {} expiring {} has non-positive strike {}",
                    underlying,
                    c.option_type.label(),
                    c.expiry,
                    c.strike
                )));
            }
            if !c.implied_volatility.is_finite() || c.implied_volatility < 0.0 {
                return Err(PositioningError::invalid_input(format!(
                    "{} {} {} expiring {} has invalid implied volatility {}",
                    underlying,
                    c.strike,
                    c.option_type.label(),
                    c.expiry,
                    c.implied_volatility
                )));
            }
        }

        Ok(Self {
            underlying,
            spot,
            as_of,
            contracts,
        })
    }

    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Evaluation instant used for every time-to-expiry computation
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    /// Distinct expirations in first-seen order
    pub fn expirations(&self) -> Vec<NaiveDate> {
        let mut seen: Vec<NaiveDate> = Vec::new();
        for c in &self.contracts {
            if !seen.contains(&c.expiry) {
                seen.push(c.expiry);
            }
        }
        seen
    }

    /// View of all contracts sharing one expiration
    pub fn group(&self, expiry: NaiveDate) -> ExpirationGroup<'_> {
        let mut calls = Vec::new();
        let mut puts = Vec::new();

        for c in self.contracts.iter().filter(|c| c.expiry == expiry) {
            match c.option_type {
                OptionType::Call => calls.push(c),
                OptionType::Put => puts.push(c),
            }
        }

        ExpirationGroup {
            expiry,
            spot: self.spot,
            days_to_expiration: days_to_expiration(expiry, self.as_of),
            calls,
            puts,
        }
    }

    /// One group per expiration, in first-seen order
    pub fn groups(&self) -> Vec<ExpirationGroup<'_>> {
        self.expirations()
            .into_iter()
            .map(|expiry| self.group(expiry))
            .collect()
    }

    /// Total number of contracts
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Unvalidated wire form of a snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotData {
    pub underlying: String,
    pub spot: f64,
    pub as_of: DateTime<Utc>,
    pub contracts: Vec<OptionContract>,
}

impl TryFrom<SnapshotData> for ChainSnapshot {
    type Error = PositioningError;

    fn try_from(raw: SnapshotData) -> PositioningResult<Self> {
        ChainSnapshot::new(raw.underlying, raw.spot, raw.as_of, raw.contracts)
    }
}

/// All contracts of one expiration, split by side
#[derive(Debug, Clone)]
pub struct ExpirationGroup<'a> {
    /// Listed expiration date
    pub expiry: NaiveDate,
    /// Underlying spot price
    pub spot: f64,
    /// Days to expiration, floored at 1
    pub days_to_expiration: i64,
    /// Call contracts in snapshot order
    pub calls: Vec<&'a OptionContract>,
    /// Put contracts in snapshot order
    pub puts: Vec<&'a OptionContract>,
}

impl<'a> ExpirationGroup<'a> {
    /// Contracts of one side
    pub fn side(&self, option_type: OptionType) -> &[&'a OptionContract] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Every contract in the group, calls first
    pub fn contracts(&self) -> impl Iterator<Item = &'a OptionContract> + '_ {
        self.calls.iter().chain(self.puts.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 22, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_empty_chain() {
        let err = ChainSnapshot::new("RKLB", 20.0, as_of(), Vec::new()).unwrap_err();
        assert!(matches!(err, PositioningError::EmptyChain { ref symbol } if symbol == "RKLB"));
    }

    #[test]
    fn test_rejects_bad_spot_and_strike() {
        let exp = date(2025, 6, 20);
        let contracts = vec![OptionContract::call(100.0, exp, 0.3, 1, 1)];
        assert!(ChainSnapshot::new("X", 0.0, as_of(), contracts.clone()).is_err());
        assert!(ChainSnapshot::new("X", f64::NAN, as_of(), contracts).is_err());

        let bad_strike = vec![OptionContract::call(-5.0, exp, 0.3, 1, 1)];
        assert!(matches!(
            ChainSnapshot::new("X", 100.0, as_of(), bad_strike),
            Err(PositioningError::InvalidInput(_))
        ));

        let bad_iv = vec![OptionContract::put(95.0, exp, -0.1, 1, 1)];
        assert!(ChainSnapshot::new("X", 100.0, as_of(), bad_iv).is_err());
    }

    #[test]
    fn test_expirations_first_seen_order() {
        let late = date(2025, 9, 19);
        let early = date(2025, 6, 20);
        let contracts = vec![
            OptionContract::call(100.0, late, 0.3, 1, 1),
            OptionContract::put(100.0, early, 0.3, 1, 1),
            OptionContract::put(100.0, late, 0.3, 1, 1),
            OptionContract::call(105.0, early, 0.3, 1, 1),
        ];
        let snapshot = ChainSnapshot::new("X", 100.0, as_of(), contracts).unwrap();

        assert_eq!(snapshot.expirations(), vec![late, early]);

        let groups = snapshot.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].expiry, late);
        assert_eq!(groups[0].calls.len(), 1);
        assert_eq!(groups[0].puts.len(), 1);
        assert_eq!(groups[1].calls[0].strike, 105.0);

        // Every contract lands in exactly one group
        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, snapshot.len());
    }

    #[test]
    fn test_group_days_to_expiration() {
        let exp = date(2025, 6, 20);
        let contracts = vec![OptionContract::call(100.0, exp, 0.3, 1, 1)];
        let snapshot = ChainSnapshot::new("X", 100.0, as_of(), contracts).unwrap();
        let group = snapshot.group(exp);

        assert_eq!(group.days_to_expiration, 30);
        assert_eq!(group.side(OptionType::Call).len(), 1);
        assert!(group.side(OptionType::Put).is_empty());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "underlying": "X",
            "spot": 100.0,
            "as_of": "2025-05-22T00:00:00Z",
            "contracts": []
        }"#;
        assert!(serde_json::from_str::<ChainSnapshot>(json).is_err());

        let json = r#"{
            "underlying": "X",
            "spot": 100.0,
            "as_of": "2025-05-22T00:00:00Z",
            "contracts": [
                {"strike": 90.0, "option_type": "call", "expiry": "2025-06-20",
                 "implied_volatility": 0.4, "volume": 100, "open_interest": 200}
            ]
        }"#;
        let snapshot: ChainSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.underlying(), "X");
        assert_eq!(snapshot.contracts()[0].open_interest, 200);
    }
}
