//! Profile

use serde::{Deserialize, Serialize};

/// The current session's shopper profile.
///
/// The miles balance is a `u64`, so it can never go negative; redemption is
/// the only operation that decreases it and refuses to overdraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identifier of the profile.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Current miles balance.
    pub miles: u64,
}

impl Profile {
    /// Credit miles to the balance, saturating at `u64::MAX`.
    pub fn add_miles(&mut self, amount: u64) {
        self.miles = self.miles.saturating_add(amount);
    }

    /// Debit `cost` miles. Returns `false` and leaves the balance untouched
    /// when it would overdraw.
    pub fn redeem(&mut self, cost: u64) -> bool {
        match self.miles.checked_sub(cost) {
            Some(remaining) => {
                self.miles = remaining;
                true
            }
            None => false,
        }
    }
}
