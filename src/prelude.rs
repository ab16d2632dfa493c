//! Cartwheel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogDescriptor, CatalogError, ProductDescriptor},
    config::{CartConfig, ConfigError},
    configurator::{Configurator, ConfiguratorError, ConfiguratorState, FlavorToggle},
    items::LineItem,
    names::{LineName, VARIANT_SEPARATOR},
    packs::{PackRule, PackSize, rule_for},
    pricing::{display_amount, format_money, parse_price},
    session::Session,
    store::{CartStore, DirectoryStore, KeyValueStore, MemoryStore, StoreError},
    views::{Badge, CartObserver, CartPage, CartRow, PageSurfaces, RenderedViews},
};
