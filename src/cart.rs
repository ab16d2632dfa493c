//! Cart
//!
//! An ordered list of [`LineItem`]s keyed by name. Every mutating method keeps
//! two invariants: names are unique, and no item is ever held at quantity zero.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogDescriptor},
    items::LineItem,
    names::LineName,
    pricing::{checked_total_price, display_amount, total_price},
};

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from stored items.
    ///
    /// Items sharing a name are merged into the first occurrence and items
    /// with a zero quantity are dropped.
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            cart.add_or_merge(item.name(), item.price(), item.quantity());
        }

        cart
    }

    /// Add `quantity` units of `name`, or bump the quantity of an existing line.
    ///
    /// The price of an existing line is left untouched. Returns `false` when
    /// `quantity` is zero.
    pub fn add_or_merge(&mut self, name: &str, unit_price: Decimal, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        if let Some(item) = self.get_mut(name) {
            item.add_quantity(quantity);
            debug!(name, quantity, total = item.quantity(), "merged cart line");
        } else {
            self.items.push(LineItem::new(name, unit_price, quantity));
            debug!(name, quantity, %unit_price, "added cart line");
        }

        true
    }

    /// Increase the quantity of a line by one.
    pub fn increment_quantity(&mut self, name: &str) -> bool {
        let Some(item) = self.get_mut(name) else {
            return false;
        };

        item.add_quantity(1);

        true
    }

    /// Decrease the quantity of a line by one, removing it at zero.
    pub fn decrement_quantity(&mut self, name: &str) -> bool {
        let Some(item) = self.get_mut(name) else {
            return false;
        };

        if item.take_one() == 0 {
            self.remove_by_name(name);
        }

        true
    }

    /// Remove a line entirely.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.name() != name);

        before != self.items.len()
    }

    /// Sum of unit price times quantity over every line, unrounded.
    ///
    /// Saturates at [`Decimal::MAX`].
    pub fn total(&self) -> Decimal {
        total_price(&self.items)
    }

    /// [`Cart::total`], or `None` if it overflows.
    pub fn checked_total(&self) -> Option<Decimal> {
        checked_total_price(&self.items)
    }

    /// [`Cart::total`] rounded to two places, for display.
    pub fn display_total(&self) -> String {
        display_amount(self.total())
    }

    /// Sum of quantities over every line.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Bring stored lines in line with the current catalog.
    ///
    /// A line matches a product when its base name (the part before the
    /// variant separator) equals the product name exactly. Matching lines take
    /// the catalog's current price for their pack size and are renamed to the
    /// canonical composite form. Lines whose pack the product doesn't price
    /// are left alone. Returns the number of lines that changed.
    pub fn resync_names_and_prices(&mut self, catalog: &Catalog) -> usize {
        let mut changed = 0;

        for item in &mut self.items {
            let parsed = LineName::parse(item.name());

            let Some(product) = catalog.get(parsed.base()) else {
                continue;
            };

            let Some(price) = parsed.pack().and_then(|pack| product.price_for(pack)) else {
                continue;
            };

            let canonical = parsed.with_base(product.name()).to_string();

            if item.price() != price || item.name() != canonical {
                debug!(from = item.name(), to = %canonical, %price, "resynced cart line");

                item.set_price(price);
                item.set_name(canonical);
                changed += 1;
            }
        }

        if changed > 0 {
            self.merge_duplicates();
        }

        changed
    }

    /// Get a line by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    fn merge_duplicates(&mut self) {
        let items = std::mem::take(&mut self.items);

        for item in items {
            self.add_or_merge(item.name(), item.price(), item.quantity());
        }
    }
}
