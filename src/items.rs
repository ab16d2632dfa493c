//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One distinct cart entry.
///
/// Serializes as `{ "name": .., "price": .., "qty": .. }` with the price as a
/// plain JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,

    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,

    qty: u32,
}

impl LineItem {
    /// Creates a new line item. Negative prices are clamped to zero.
    pub fn new(name: impl Into<String>, price: Decimal, qty: u32) -> Self {
        Self {
            name: name.into(),
            price: price.max(Decimal::ZERO),
            qty,
        }
    }

    /// Returns the name of the item, unique within a cart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.qty
    }

    /// Unit price multiplied by quantity, unrounded.
    ///
    /// Saturates at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// Unit price multiplied by quantity, or `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.qty))
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_price(&mut self, price: Decimal) {
        self.price = price.max(Decimal::ZERO);
    }

    pub(crate) fn add_quantity(&mut self, qty: u32) {
        self.qty = self.qty.saturating_add(qty);
    }

    /// Decrease the quantity by one, returning the new quantity.
    pub(crate) fn take_one(&mut self) -> u32 {
        self.qty = self.qty.saturating_sub(1);
        self.qty
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn negative_price_is_clamped() {
        let item = LineItem::new("Scone", Decimal::new(-150, 2), 1);

        assert_eq!(item.price(), Decimal::ZERO);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = LineItem::new("Scone", Decimal::new(250, 2), 3);

        assert_eq!(item.line_total(), Decimal::new(750, 2));
    }

    #[test]
    fn line_total_saturates_on_overflow() {
        let item = LineItem::new("Scone", Decimal::MAX, 2);

        assert_eq!(item.checked_line_total(), None);
        assert_eq!(item.line_total(), Decimal::MAX);
    }

    #[test]
    fn serializes_price_as_number() -> TestResult {
        let item = LineItem::new("Scone", Decimal::new(25, 1), 2);

        let json = serde_json::to_string(&item)?;

        assert_eq!(json, r#"{"name":"Scone","price":2.5,"qty":2}"#);

        Ok(())
    }

    #[test]
    fn deserializes_stored_layout() -> TestResult {
        let item: LineItem = serde_json::from_str(r#"{"name":"Scone","price":3,"qty":4}"#)?;

        assert_eq!(item, LineItem::new("Scone", Decimal::new(3, 0), 4));

        Ok(())
    }
}
