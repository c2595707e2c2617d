//! SkyShop
//!
//! SkyShop is a client-rendered storefront's commerce state store: product
//! catalogue, cart, checkout and order history, and a miles-based loyalty
//! programme, all held in one exclusively owned state object and persisted
//! as a whole snapshot to a pluggable key-value medium.

pub mod cart;
pub mod ids;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod profile;
pub mod rewards;
pub mod seed;
pub mod storage;
pub mod store;
