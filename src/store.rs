//! Store
//!
//! The commerce state store. It exclusively owns all state — catalogue,
//! cart, orders, profile, bonuses and the active discount — and exposes it
//! only through the operations below. Every operation is a synchronous,
//! all-or-nothing transition: preconditions are checked before any field is
//! touched, so a rejected operation leaves the state byte-for-byte intact.
//!
//! Feedback is returned, not rendered: successes yield a [`Notice`] and
//! failures a [`StoreError`], both carrying the user-facing message for the
//! host to display however it likes. After every successful mutation the
//! full snapshot is written to the registered storage, fire-and-forget.

use std::fmt;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartTotals},
    ids,
    orders::{Order, OrderStatus},
    products::{Availability, NewProduct, Product, ProductPatch},
    profile::Profile,
    rewards::{Bonus, boosted_miles, discounted_amount},
    seed::Seed,
    storage::{STORAGE_KEY, Snapshot, SnapshotStorage},
};

/// Illustrative admin password; a stand-in, not a security boundary.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Precondition failures surfaced to the user.
///
/// Every variant is deterministic — there are no transient faults in this
/// store — and none of them leaves any state mutated. The `Display` text is
/// the toast message the host shows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No catalogue product matches the given id.
    #[error("product {0} not found")]
    ProductNotFound(String),

    /// The product exists but cannot be bought right now.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// No bonus matches the given id.
    #[error("bonus {0} not found")]
    BonusNotFound(String),

    /// The miles balance does not cover the bonus cost.
    #[error("not enough miles: {required} required, {available} available")]
    InsufficientMiles {
        /// Miles the bonus costs.
        required: u64,
        /// Miles currently on the balance.
        available: u64,
    },

    /// Only one discount may be active at a time.
    #[error("a discount is already active")]
    DiscountAlreadyActive,

    /// Checkout needs at least one cart line.
    #[error("your cart is empty")]
    EmptyCart,

    /// Cart quantities must be positive whole numbers.
    #[error("quantity must be a positive whole number, got {0}")]
    InvalidQuantity(i64),

    /// Wrong admin password.
    #[error("incorrect admin password")]
    IncorrectPassword,
}

/// Success feedback from a store operation.
///
/// The store never renders anything; hosts turn these into toasts using the
/// `Display` impl or by matching on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A product was added to the catalogue.
    ProductAdded {
        /// Name of the new product.
        name: String,
    },

    /// A product was partially updated.
    ProductUpdated {
        /// Name of the product after the update.
        name: String,
    },

    /// A product was deleted from the catalogue.
    ProductDeleted {
        /// Name of the removed product.
        name: String,
    },

    /// Units were added to the cart.
    AddedToCart {
        /// Product name as captured on the cart line.
        name: String,
        /// Units added by this call.
        quantity: u32,
    },

    /// A cart line's quantity was changed.
    CartUpdated {
        /// Product name on the line.
        name: String,
        /// New quantity.
        quantity: u32,
    },

    /// A cart line was removed.
    RemovedFromCart {
        /// Product name on the removed line.
        name: String,
    },

    /// The cart was emptied.
    CartCleared,

    /// Checkout succeeded.
    CheckoutComplete {
        /// Truncated order identifier for display.
        order_ref: String,
        /// Miles credited to the balance.
        miles_earned: u64,
    },

    /// A direct purchase succeeded.
    PurchaseComplete {
        /// Product name.
        name: String,
        /// Discounted unit price, for display only.
        amount: Decimal,
        /// Miles credited to the balance (undiscounted).
        miles_earned: u64,
    },

    /// A bonus was redeemed.
    BonusRedeemed {
        /// Bonus name.
        name: String,
        /// Discount percentage now active.
        discount: Decimal,
    },

    /// The active discount was cleared.
    DiscountCleared,

    /// Miles were credited directly.
    MilesAdded {
        /// Miles credited.
        amount: u64,
    },

    /// The admin panel was unlocked.
    AdminUnlocked,

    /// The admin panel was locked.
    AdminLocked,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductAdded { name } => write!(f, "Added {name} to the catalogue"),
            Self::ProductUpdated { name } => write!(f, "Updated {name}"),
            Self::ProductDeleted { name } => write!(f, "Removed {name} from the catalogue"),
            Self::AddedToCart { name, quantity } => {
                write!(f, "Added {quantity} x {name} to the cart")
            }
            Self::CartUpdated { name, quantity } => {
                write!(f, "Set {name} to {quantity} in the cart")
            }
            Self::RemovedFromCart { name } => write!(f, "Removed {name} from the cart"),
            Self::CartCleared => write!(f, "Cart cleared"),
            Self::CheckoutComplete {
                order_ref,
                miles_earned,
            } => write!(f, "Order {order_ref} placed; earned {miles_earned} miles"),
            Self::PurchaseComplete {
                name,
                amount,
                miles_earned,
            } => write!(f, "Purchased {name} for {amount}; earned {miles_earned} miles"),
            Self::BonusRedeemed { name, discount } => {
                write!(f, "Redeemed {name}: {discount}% off your next purchase")
            }
            Self::DiscountCleared => write!(f, "Discount cleared"),
            Self::MilesAdded { amount } => write!(f, "Added {amount} miles"),
            Self::AdminUnlocked => write!(f, "Admin panel unlocked"),
            Self::AdminLocked => write!(f, "Admin panel locked"),
        }
    }
}

/// The commerce state store.
#[derive(Debug)]
pub struct Store {
    products: Vec<Product>,
    bonuses: Vec<Bonus>,
    profile: Profile,
    cart: Cart,
    orders: Vec<Order>,
    active_discount: Decimal,
    admin_authenticated: bool,
    storage: Option<Box<dyn SnapshotStorage>>,
}

impl Store {
    /// Create a store from seed data, with no persistence registered.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            products: seed.products,
            bonuses: seed.bonuses,
            profile: seed.profile,
            cart: Cart::new(),
            orders: Vec::new(),
            active_discount: Decimal::ZERO,
            admin_authenticated: false,
            storage: None,
        }
    }

    /// Create a store backed by a storage medium.
    ///
    /// If a snapshot exists under [`STORAGE_KEY`] the store rehydrates from
    /// it; otherwise it starts from the seed. Bonuses always come from the
    /// seed — they are not part of the snapshot. An unreadable snapshot is
    /// logged and treated as absent.
    #[must_use]
    pub fn with_storage<S: SnapshotStorage + 'static>(storage: S, seed: Seed) -> Self {
        let restored = match storage.load(STORAGE_KEY) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to load snapshot; starting from seed");
                None
            }
        };

        let mut store = match restored {
            Some(snapshot) => Self {
                products: snapshot.products,
                bonuses: seed.bonuses,
                profile: snapshot.profile,
                cart: snapshot.cart,
                orders: snapshot.orders,
                active_discount: snapshot.active_discount,
                admin_authenticated: snapshot.admin_authenticated,
                storage: None,
            },
            None => Self::new(seed),
        };

        store.storage = Some(Box::new(storage));
        store
    }

    /// The full persisted-state snapshot, as it would be written to storage.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            products: self.products.clone(),
            profile: self.profile.clone(),
            admin_authenticated: self.admin_authenticated,
            cart: self.cart.clone(),
            orders: self.orders.clone(),
            active_discount: self.active_discount,
        }
    }

    /// The product catalogue, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a catalogue product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// The static bonus catalogue.
    #[must_use]
    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    /// The shopper profile.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The active cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Order history, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The active discount percentage; zero when none is active.
    #[must_use]
    pub fn active_discount(&self) -> Decimal {
        self.active_discount
    }

    /// Whether the admin panel is unlocked.
    #[must_use]
    pub fn is_admin_authenticated(&self) -> bool {
        self.admin_authenticated
    }

    /// Add a product to the catalogue under a freshly generated id.
    ///
    /// Fields are trusted as supplied; range validation is the caller's
    /// concern.
    pub fn add_product(&mut self, product: NewProduct) -> Notice {
        let product = product.into_product(ids::generate());
        let name = product.name.clone();

        debug!(product_id = %product.id, %name, "product added");
        self.products.push(product);
        self.persist();

        Notice::ProductAdded { name }
    }

    /// Merge a partial update into the product matching `id`.
    ///
    /// Silent no-op (returns `None`) when no product matches.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> Option<Notice> {
        let product = self.products.iter_mut().find(|product| product.id == id)?;

        product.apply(patch);
        let name = product.name.clone();

        debug!(product_id = %id, "product updated");
        self.persist();

        Some(Notice::ProductUpdated { name })
    }

    /// Delete the product matching `id` from the catalogue.
    ///
    /// Silent no-op (returns `None`) when no product matches. Existing cart
    /// lines and orders keep their captured copies.
    pub fn delete_product(&mut self, id: &str) -> Option<Notice> {
        let position = self.products.iter().position(|product| product.id == id)?;
        let removed = self.products.remove(position);

        debug!(product_id = %id, "product deleted");
        self.persist();

        Some(Notice::ProductDeleted { name: removed.name })
    }

    /// Add units of a product to the cart, merging into an existing line.
    ///
    /// On a merge the unit price and miles rate captured at first add are
    /// kept, even if the catalogue has changed since.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidQuantity`] for non-positive quantities,
    /// [`StoreError::ProductNotFound`] for unknown ids, and
    /// [`StoreError::OutOfStock`] when the product cannot be bought.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> Result<Notice, StoreError> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(StoreError::InvalidQuantity(quantity))?;

        let product = self
            .products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| StoreError::ProductNotFound(product_id.to_owned()))?;

        if product.status == Availability::OutOfStock {
            return Err(StoreError::OutOfStock(product.name.clone()));
        }

        let name = product.name.clone();
        self.cart.add(product, quantity);

        debug!(%product_id, quantity, "added to cart");
        self.persist();

        Ok(Notice::AddedToCart { name, quantity })
    }

    /// Set the quantity of an existing cart line.
    ///
    /// A quantity of zero or below removes the line, exactly like
    /// [`Store::remove_from_cart`]. Silent no-op (returns `None`) when no
    /// line matches, or when the quantity does not fit the line's `u32`
    /// range — like the other misses here, and unlike
    /// [`Store::add_to_cart`], which rejects with an error. The line total
    /// and miles are rescaled from the rates captured at add time, never
    /// re-read from the catalogue.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: i64) -> Option<Notice> {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let quantity = u32::try_from(quantity).ok()?;
        let line = self.cart.set_quantity(product_id, quantity)?;
        let name = line.name.clone();

        self.persist();

        Some(Notice::CartUpdated { name, quantity })
    }

    /// Remove the cart line for a product.
    ///
    /// Silent no-op (returns `None`) when no line matches.
    pub fn remove_from_cart(&mut self, product_id: &str) -> Option<Notice> {
        let removed = self.cart.remove(product_id)?;

        self.persist();

        Some(Notice::RemovedFromCart { name: removed.name })
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&mut self) -> Notice {
        self.cart.clear();
        self.persist();

        Notice::CartCleared
    }

    /// Current cart sums: amount, miles and unit count.
    ///
    /// Pure derivation over the live cart; never cached.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Convert the cart into an immutable order.
    ///
    /// The active discount cuts the amount paid and simultaneously boosts
    /// the miles earned, floored to a whole number — both directions at
    /// once, by design. The order is prepended to history, every purchased
    /// product's order counter is bumped by the quantity bought, the miles
    /// are credited, and the cart and discount are reset.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyCart`] when there is nothing to check out; no
    /// state changes in that case.
    pub fn checkout(&mut self) -> Result<Notice, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let totals = self.cart.totals();
        let total_amount = discounted_amount(totals.amount, self.active_discount);
        let total_miles = boosted_miles(totals.miles, self.active_discount);

        let order = Order {
            id: ids::generate(),
            items: self.cart.items().to_vec(),
            total_amount,
            total_miles,
            created_at: Utc::now(),
            status: OrderStatus::Completed,
        };
        let order_ref = order.short_id().to_owned();

        for line in self.cart.items() {
            if let Some(product) = self
                .products
                .iter_mut()
                .find(|product| product.id == line.product_id)
            {
                product.order_count = product.order_count.saturating_add(u64::from(line.quantity));
            }
        }

        debug!(
            order_id = %order.id,
            %total_amount,
            total_miles,
            "checkout complete"
        );

        self.orders.insert(0, order);
        self.profile.add_miles(total_miles);
        self.cart.clear();
        self.active_discount = Decimal::ZERO;
        self.persist();

        Ok(Notice::CheckoutComplete {
            order_ref,
            miles_earned: total_miles,
        })
    }

    /// Buy a single unit of a product directly, bypassing the cart.
    ///
    /// A deliberate asymmetry with [`Store::checkout`]: no order record is
    /// created, the miles credited are the full undiscounted per-unit
    /// award, the discounted price is computed for the notice only, and the
    /// active discount is cleared whether or not one was set.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProductNotFound`] for unknown ids and
    /// [`StoreError::OutOfStock`] when the product cannot be bought.
    pub fn purchase_product(&mut self, product_id: &str) -> Result<Notice, StoreError> {
        let active_discount = self.active_discount;
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
            .ok_or_else(|| StoreError::ProductNotFound(product_id.to_owned()))?;

        if product.status == Availability::OutOfStock {
            return Err(StoreError::OutOfStock(product.name.clone()));
        }

        let amount = discounted_amount(product.amount, active_discount);
        let miles_earned = product.miles;
        let name = product.name.clone();

        product.order_count = product.order_count.saturating_add(1);
        self.profile.add_miles(miles_earned);
        self.active_discount = Decimal::ZERO;

        debug!(%product_id, %amount, miles_earned, "direct purchase complete");
        self.persist();

        Ok(Notice::PurchaseComplete {
            name,
            amount,
            miles_earned,
        })
    }

    /// Spend miles on a bonus, activating its discount.
    ///
    /// # Errors
    ///
    /// [`StoreError::BonusNotFound`] for unknown ids,
    /// [`StoreError::InsufficientMiles`] when the balance does not cover the
    /// cost, and [`StoreError::DiscountAlreadyActive`] when a discount is
    /// already in place — only one may be active at a time.
    pub fn redeem_bonus(&mut self, bonus_id: &str) -> Result<Notice, StoreError> {
        let bonus = self
            .bonuses
            .iter()
            .find(|bonus| bonus.id == bonus_id)
            .ok_or_else(|| StoreError::BonusNotFound(bonus_id.to_owned()))?;

        if self.profile.miles < bonus.miles_required {
            return Err(StoreError::InsufficientMiles {
                required: bonus.miles_required,
                available: self.profile.miles,
            });
        }

        if self.active_discount > Decimal::ZERO {
            return Err(StoreError::DiscountAlreadyActive);
        }

        let name = bonus.name.clone();
        let discount = bonus.discount;
        let cost = bonus.miles_required;

        let redeemed = self.profile.redeem(cost);
        debug_assert!(redeemed, "balance was checked above");

        self.active_discount = discount;

        debug!(%bonus_id, %discount, cost, "bonus redeemed");
        self.persist();

        Ok(Notice::BonusRedeemed { name, discount })
    }

    /// Reset the active discount to zero, whether or not one was active.
    pub fn clear_discount(&mut self) -> Notice {
        self.active_discount = Decimal::ZERO;
        self.persist();

        Notice::DiscountCleared
    }

    /// Credit miles directly to the balance. The amount is trusted; there
    /// is no upper bound beyond saturation.
    pub fn add_miles(&mut self, amount: u64) -> Notice {
        self.profile.add_miles(amount);
        self.persist();

        Notice::MilesAdded { amount }
    }

    /// Unlock the admin panel.
    ///
    /// # Errors
    ///
    /// [`StoreError::IncorrectPassword`] when the password does not match
    /// the illustrative constant.
    pub fn admin_login(&mut self, password: &str) -> Result<Notice, StoreError> {
        if password != ADMIN_PASSWORD {
            return Err(StoreError::IncorrectPassword);
        }

        self.admin_authenticated = true;
        self.persist();

        Ok(Notice::AdminUnlocked)
    }

    /// Lock the admin panel.
    pub fn admin_logout(&mut self) -> Notice {
        self.admin_authenticated = false;
        self.persist();

        Notice::AdminLocked
    }

    /// Write the current snapshot to the registered storage, if any.
    ///
    /// Fire-and-forget: a failed write is logged and never surfaced or
    /// rolled back; the in-memory state stays authoritative.
    fn persist(&mut self) {
        if self.storage.is_none() {
            return;
        }

        let snapshot = self.snapshot();

        if let Some(storage) = self.storage.as_mut() {
            if let Err(err) = storage.save(STORAGE_KEY, &snapshot) {
                warn!(error = %err, "snapshot save failed; in-memory state remains authoritative");
            }
        }
    }
}
