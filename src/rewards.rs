//! Rewards
//!
//! Bonus catalogue entries and the percentage arithmetic shared by checkout
//! and the direct-purchase fast path. An active discount simultaneously
//! lowers the amount paid and raises the miles earned; both directions live
//! here so the two flows cannot drift apart.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

/// What redeeming a bonus grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// A percentage discount on the next purchase or checkout.
    Discount,
    /// Reserved; never exercised by the store logic.
    FreeItem,
}

/// A redeemable reward definition.
///
/// The bonus catalogue is static seed data; the store never creates,
/// mutates or deletes entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    /// Identifier within the bonus catalogue.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Miles deducted from the balance on redemption.
    pub miles_required: u64,

    /// Percentage discount granted, `0..=100`.
    pub discount: Decimal,

    /// What the bonus grants.
    pub kind: BonusKind,
}

/// Apply a percentage discount to an amount: `amount × (1 − percent/100)`.
#[must_use]
pub fn discounted_amount(amount: Decimal, percent: Decimal) -> Decimal {
    amount * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED
}

/// Boost a miles total by the discount percentage:
/// `floor(miles × (1 + percent/100))`.
///
/// Floor, not round: 10 miles at 25% is 12, never 13. Saturates at
/// `u64::MAX` if the product leaves the representable range.
#[must_use]
pub fn boosted_miles(miles: u64, percent: Decimal) -> u64 {
    let boosted =
        Decimal::from(miles) * (Decimal::ONE_HUNDRED + percent) / Decimal::ONE_HUNDRED;

    boosted.floor().to_u64().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discounted_amount_scales_down() {
        let amount = discounted_amount(Decimal::from(100), Decimal::from(20));

        assert_eq!(amount, Decimal::from(80));
    }

    #[test]
    fn discounted_amount_with_zero_percent_is_identity() {
        let amount = discounted_amount(Decimal::new(12_345, 2), Decimal::ZERO);

        assert_eq!(amount, Decimal::new(12_345, 2));
    }

    #[test]
    fn discounted_amount_with_full_percent_is_zero() {
        let amount = discounted_amount(Decimal::from(250), Decimal::ONE_HUNDRED);

        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn boosted_miles_floors_the_result() {
        // 10 × 1.25 = 12.5 -> 12
        assert_eq!(boosted_miles(10, Decimal::from(25)), 12);
        // 10 × 1.2 = 12 exactly
        assert_eq!(boosted_miles(10, Decimal::from(20)), 12);
        // 7 × 1.15 = 8.05 -> 8
        assert_eq!(boosted_miles(7, Decimal::from(15)), 8);
    }

    #[test]
    fn boosted_miles_with_zero_percent_is_identity() {
        assert_eq!(boosted_miles(42, Decimal::ZERO), 42);
    }

    #[test]
    fn boosted_miles_of_zero_is_zero() {
        assert_eq!(boosted_miles(0, Decimal::from(50)), 0);
    }
}
