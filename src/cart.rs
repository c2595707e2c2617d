//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Category, Product};

/// One aggregated line in the active cart.
///
/// Name, unit price, image, category and the per-unit miles award are
/// captured from the catalogue at add time and never re-synced; later
/// catalogue edits do not touch existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Id of the catalogue product this line refers to.
    pub product_id: String,

    /// Product name as of add time.
    pub name: String,

    /// Unit price as of add time.
    pub amount: Decimal,

    /// Image reference as of add time.
    pub image: Option<String>,

    /// Category as of add time.
    pub category: Category,

    /// Units of the product in the cart; always positive.
    pub quantity: u32,

    /// Line total, `quantity × amount`.
    pub total: Decimal,

    /// Line miles, `quantity ×` the per-unit award captured at add time.
    pub miles: u64,
}

impl CartItem {
    /// Build a line by capturing the product's current attributes.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            amount: product.amount,
            image: product.image.clone(),
            category: product.category,
            quantity,
            total: product.amount * Decimal::from(quantity),
            miles: product.miles.saturating_mul(u64::from(quantity)),
        }
    }

    /// The per-unit miles rate captured at add time.
    ///
    /// `miles` is always `rate × quantity`, so the division is exact.
    #[must_use]
    pub fn miles_per_unit(&self) -> u64 {
        self.miles / u64::from(self.quantity)
    }

    /// Set a new quantity, recomputing the line total from the captured unit
    /// price and the line miles from the captured per-unit rate.
    fn rescale(&mut self, quantity: u32) {
        let per_unit = self.miles_per_unit();

        self.quantity = quantity;
        self.total = self.amount * Decimal::from(quantity);
        self.miles = per_unit.saturating_mul(u64::from(quantity));
    }
}

/// Sums over the whole cart, derived fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of all line totals.
    pub amount: Decimal,

    /// Sum of all line miles.
    pub miles: u64,

    /// Sum of all line quantities.
    pub quantity: u64,
}

/// The active cart: at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from previously captured lines.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add units of a product, merging into the existing line if one exists.
    ///
    /// On a merge the unit price and per-unit miles rate come from the
    /// existing line, not from the catalogue. Adding zero units is a no-op;
    /// a line never exists with zero quantity.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(position) = self.position(&product.id) {
            if let Some(line) = self.items.get_mut(position) {
                let merged = line.quantity.saturating_add(quantity);
                line.rescale(merged);
            }
        } else {
            self.items.push(CartItem::from_product(product, quantity));
        }
    }

    /// Set the quantity of an existing line, rescaling total and miles from
    /// the rates captured at add time. Returns the updated line, or `None`
    /// if no line matches.
    ///
    /// A quantity of zero removes the line, exactly like [`Cart::remove`];
    /// a line never exists with zero quantity.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Option<&CartItem> {
        if quantity == 0 {
            self.remove(product_id);
            return None;
        }

        let position = self.position(product_id)?;
        let line = self.items.get_mut(position)?;

        line.rescale(quantity);

        self.items.get(position)
    }

    /// Remove the line for a product, returning it if it was present.
    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let position = self.position(product_id)?;

        Some(self.items.remove(position))
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get the line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    /// Sum amount, miles and quantity across all lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::default(), |acc, line| CartTotals {
                amount: acc.amount + line.total,
                miles: acc.miles.saturating_add(line.miles),
                quantity: acc.quantity.saturating_add(u64::from(line.quantity)),
            })
    }

    /// The lines currently in the cart, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|line| line.product_id == product_id)
    }
}
