//! Catalog
//!
//! Product metadata is owned by the presentation layer. The cart and the
//! configurator only see it through [`CatalogDescriptor`].

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{packs::PackSize, pricing::parse_price};

pub mod fixtures;

pub use fixtures::{CatalogError, CatalogFixture, ProductFixture};

/// Product metadata supplied by the presentation layer.
pub trait CatalogDescriptor {
    /// Product name, as shown on the menu.
    fn name(&self) -> &str;

    /// Current price for a pack size, if the product lists one.
    fn price_for(&self, pack: PackSize) -> Option<Decimal>;
}

/// A product and its per-pack prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescriptor {
    name: String,
    prices: FxHashMap<PackSize, Decimal>,
}

impl ProductDescriptor {
    /// Creates a product with no prices.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prices: FxHashMap::default(),
        }
    }

    /// Sets the price for a pack size.
    #[must_use]
    pub fn with_price(mut self, pack: PackSize, price: Decimal) -> Self {
        self.prices.insert(pack, price.max(Decimal::ZERO));
        self
    }

    /// Builds a product from raw price attributes (e.g. `data-price-6`).
    ///
    /// Attributes that are present but invalid are priced at zero; absent
    /// attributes leave the pack unpriced.
    pub fn from_attributes<'s, I>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (PackSize, Option<&'s str>)>,
    {
        attributes
            .into_iter()
            .filter(|(_pack, raw)| raw.is_some())
            .fold(Self::new(name), |product, (pack, raw)| {
                product.with_price(pack, parse_price(raw))
            })
    }
}

impl CatalogDescriptor for ProductDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn price_for(&self, pack: PackSize) -> Option<Decimal> {
        self.prices.get(&pack).copied()
    }
}

/// The products currently on the menu, in menu order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductDescriptor>,
    by_name: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product. A product with the same name replaces the earlier entry.
    pub fn insert(&mut self, product: ProductDescriptor) {
        match self.by_name.get(product.name()).copied() {
            Some(idx) => {
                if let Some(existing) = self.products.get_mut(idx) {
                    *existing = product;
                }
            }
            None => {
                self.by_name
                    .insert(product.name().to_string(), self.products.len());
                self.products.push(product);
            }
        }
    }

    /// Look up a product by its exact name.
    pub fn get(&self, name: &str) -> Option<&ProductDescriptor> {
        self.by_name
            .get(name)
            .and_then(|idx| self.products.get(*idx))
    }

    /// Iterate over the products in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductDescriptor> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<ProductDescriptor> for Catalog {
    fn from_iter<I: IntoIterator<Item = ProductDescriptor>>(iter: I) -> Self {
        let mut catalog = Catalog::new();

        for product in iter {
            catalog.insert(product);
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attributes_prices_invalid_values_at_zero() {
        let product = ProductDescriptor::from_attributes(
            "Muffins",
            [
                (PackSize::Single, Some("3.50")),
                (PackSize::Three, Some("n/a")),
                (PackSize::HalfDozen, None),
            ],
        );

        assert_eq!(product.price_for(PackSize::Single), Some(Decimal::new(350, 2)));
        assert_eq!(product.price_for(PackSize::Three), Some(Decimal::ZERO));
        assert_eq!(product.price_for(PackSize::HalfDozen), None);
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut catalog = Catalog::new();

        catalog.insert(
            ProductDescriptor::new("Muffins").with_price(PackSize::Single, Decimal::ONE),
        );
        catalog.insert(ProductDescriptor::new("Scones"));
        catalog.insert(
            ProductDescriptor::new("Muffins").with_price(PackSize::Single, Decimal::TWO),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Muffins").and_then(|p| p.price_for(PackSize::Single)),
            Some(Decimal::TWO)
        );

        let names: Vec<&str> = catalog.iter().map(CatalogDescriptor::name).collect();
        assert_eq!(names, vec!["Muffins", "Scones"]);
    }

    #[test]
    fn get_requires_exact_name() {
        let catalog: Catalog = [ProductDescriptor::new("Cookies")].into_iter().collect();

        assert!(catalog.get("Cookies").is_some());
        assert!(catalog.get("cookies").is_none());
        assert!(catalog.get("Cookie").is_none());
    }
}
