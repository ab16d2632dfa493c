//! Cart Page View

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{cart::Cart, items::LineItem, pricing::format_money};

/// One row of the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Line name, also the key passed back by the quantity steppers.
    pub name: String,

    /// Units of this line.
    pub quantity: u32,

    /// Unit price times quantity, unrounded.
    pub line_total: Decimal,

    /// Line total formatted in the page currency (e.g. `$5.00`).
    pub line_total_display: String,
}

impl CartRow {
    fn project(item: &LineItem, currency: &'static Currency) -> Self {
        Self {
            name: item.name().to_string(),
            quantity: item.quantity(),
            line_total: item.line_total(),
            line_total_display: format_money(item.line_total(), currency),
        }
    }
}

/// Cart page: one row per line and a grand total footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartPage {
    /// Rows in cart order.
    pub rows: Vec<CartRow>,

    /// Grand total, two decimal places.
    pub total: String,
}

impl CartPage {
    /// Project the cart page from the cart.
    pub fn project(cart: &Cart, currency: &'static Currency) -> Self {
        Self {
            rows: cart
                .iter()
                .map(|item| CartRow::project(item, currency))
                .collect(),
            total: cart.display_total(),
        }
    }

    /// Row for a line name.
    pub fn row(&self, name: &str) -> Option<&CartRow> {
        self.rows.iter().find(|row| row.name == name)
    }
}
