//! Put/call volume and open-interest bias
//!
//! `(call - put) / (call + put)`, positive when calls dominate. Zero when
//! neither side has any activity.

use crate::core::{ExpirationGroup, OptionContract, OptionType};

use super::normalized_difference;

/// Normalized call-minus-put volume for one expiration
pub fn volume_ratio(group: &ExpirationGroup<'_>) -> f64 {
    side_ratio(group, |c| c.volume)
}

/// Normalized call-minus-put open interest for one expiration
pub fn open_interest_ratio(group: &ExpirationGroup<'_>) -> f64 {
    side_ratio(group, |c| c.open_interest)
}

fn side_ratio(group: &ExpirationGroup<'_>, field: impl Fn(&OptionContract) -> u64) -> f64 {
    let total = |side: OptionType| group.side(side).iter().map(|c| field(*c)).sum::<u64>() as f64;
    normalized_difference(total(OptionType::Call), total(OptionType::Put))
}
