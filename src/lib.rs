//! Cartwheel
//!
//! Cartwheel is the cart core of a small storefront: an ordered list of line
//! items kept in a local key-value store, a product configurator for pack
//! sizes and flavors, and the projections each page renders from the cart.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod configurator;
pub mod items;
pub mod names;
pub mod packs;
pub mod prelude;
pub mod pricing;
pub mod session;
pub mod store;
pub mod views;
