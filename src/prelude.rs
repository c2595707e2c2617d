//! SkyShop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartItem, CartTotals},
    orders::{Order, OrderStatus},
    products::{Availability, Category, NewProduct, Product, ProductPatch, SubCategory},
    profile::Profile,
    rewards::{Bonus, BonusKind, boosted_miles, discounted_amount},
    seed::{Seed, SeedError},
    storage::{FileStorage, MemoryStorage, STORAGE_KEY, Snapshot, SnapshotStorage, StorageError},
    store::{ADMIN_PASSWORD, Notice, Store, StoreError},
};
