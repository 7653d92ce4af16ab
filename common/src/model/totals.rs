//! Category subtotals.
//!
//! Plain categories sum the stored `amount`; fuel has no stored amount and
//! derives each entry's cost from the formula in [`FuelItem::cost`].
//! Intermediate sums are kept unrounded — rounding happens once, at the
//! point a total is persisted or displayed.

use super::item::{CostItem, FuelItem, ReferralItem};
use super::money::round_to_cents;

/// When to round fuel costs while summing.
///
/// Production data was written by two generations of the editor: one rounded
/// each entry before summing, the other summed raw and rounded once. The two
/// differ by up to a cent per entry, so both behaviours are kept selectable;
/// [`FuelRounding::Deferred`] is the default used by the aggregation path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FuelRounding {
    /// Sum raw costs, round only at persistence/display time.
    #[default]
    Deferred,
    /// Round each entry to cents before summing.
    PerItem,
}

pub fn total_costs(items: &[CostItem]) -> f64 {
    items.iter().map(|i| i.amount).sum()
}

pub fn total_referrals(items: &[ReferralItem]) -> f64 {
    items.iter().map(|i| i.amount).sum()
}

pub fn total_fuel(items: &[FuelItem], rounding: FuelRounding) -> f64 {
    items
        .iter()
        .map(|i| match rounding {
            FuelRounding::Deferred => i.cost(),
            FuelRounding::PerItem => round_to_cents(i.cost()),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::FuelUse;

    fn sale(distance_km: f64, price: f64) -> FuelItem {
        FuelItem {
            id: 0,
            user: None,
            date: None,
            description: String::new(),
            usage: FuelUse::Sale {
                distance_km,
                price_per_liter: price,
            },
        }
    }

    #[test]
    fn plain_sums_are_unrounded() {
        let items = vec![
            CostItem {
                id: 1,
                user: None,
                date: None,
                description: "a".into(),
                amount: 0.105,
            },
            CostItem {
                id: 2,
                user: None,
                date: None,
                description: "b".into(),
                amount: 0.105,
            },
        ];
        assert!((total_costs(&items) - 0.21).abs() < 1e-12);
    }

    #[test]
    fn fuel_rounding_modes_can_differ() {
        // Each entry costs (1 * 2 / 10.6) * 5 = 0.9433…; per-item rounding
        // turns that into 0.94 before summing.
        let items = vec![sale(1.0, 5.0), sale(1.0, 5.0), sale(1.0, 5.0)];
        let deferred = total_fuel(&items, FuelRounding::Deferred);
        let per_item = total_fuel(&items, FuelRounding::PerItem);
        assert!((deferred - 2.830_188).abs() < 1e-4);
        assert!((per_item - 2.82).abs() < 1e-12);
        assert!(round_to_cents(deferred) != per_item);
    }
}
