//! Nearest out-of-the-money selection

use ordered_float::OrderedFloat;

use crate::types::{OptionContract, OptionType};

/// Closest strictly-OTM contract of the given type
///
/// Ranking is by distance from spot; ties go to the lower strike, then the
/// earlier expiration, then chain order.
pub fn select_nearest_otm(
    contracts: &[OptionContract],
    option_type: OptionType,
    spot: f64,
) -> Option<OptionContract> {
    contracts
        .iter()
        .enumerate()
        .filter(|(_, c)| c.option_type == option_type && c.is_otm(spot))
        .min_by_key(|(index, c)| {
            (
                OrderedFloat(c.distance_from_spot(spot)),
                OrderedFloat(c.strike),
                c.expiration,
                *index,
            )
        })
        .map(|(_, c)| c.clone())
}

/// Best OTM call and put; either leg may be absent
pub fn select_otm(
    calls: &[OptionContract],
    puts: &[OptionContract],
    spot: f64,
) -> (Option<OptionContract>, Option<OptionContract>) {
    (
        select_nearest_otm(calls, OptionType::Call, spot),
        select_nearest_otm(puts, OptionType::Put, spot),
    )
}
