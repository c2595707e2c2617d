//! Orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Lifecycle state of an order.
///
/// Checkout only ever produces [`OrderStatus::Completed`]; the other
/// variants are reserved for flows outside this store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Paid and finished.
    Completed,
    /// Reserved.
    Pending,
    /// Reserved.
    Cancelled,
}

/// Immutable record of one completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Generated identifier.
    pub id: String,

    /// Deep copy of the cart lines at checkout time.
    pub items: Vec<CartItem>,

    /// Amount paid, after any active discount.
    pub total_amount: Decimal,

    /// Miles awarded, after any discount bonus, floored to an integer.
    pub total_miles: u64,

    /// When the checkout happened.
    pub created_at: DateTime<Utc>,

    /// Always [`OrderStatus::Completed`] in this flow.
    pub status: OrderStatus,
}

impl Order {
    /// Truncated identifier for user-facing notices: the trailing part of
    /// the id, or the whole id when it is already short.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(6);

        self.id.get(start..).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str) -> Order {
        Order {
            id: id.into(),
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            total_miles: 0,
            created_at: Utc::now(),
            status: OrderStatus::Completed,
        }
    }

    #[test]
    fn short_id_takes_the_trailing_six_characters() {
        assert_eq!(order("18c2a9f3e1-04d7").short_id(), "1-04d7");
    }

    #[test]
    fn short_id_of_a_short_id_is_the_whole_id() {
        assert_eq!(order("ord1").short_id(), "ord1");
    }
}
