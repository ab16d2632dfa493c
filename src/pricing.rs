//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::items::LineItem;

/// Calculates the total price of a list of items, unrounded.
///
/// Saturates at [`Decimal::MAX`].
pub fn total_price(items: &[LineItem]) -> Decimal {
    checked_total_price(items).unwrap_or(Decimal::MAX)
}

/// Calculates the total price of a list of items, or `None` on overflow.
pub fn checked_total_price(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.checked_line_total()?))
}

/// Parse a price attribute, as supplied by the presentation layer.
///
/// Missing, unparseable or negative values become zero.
pub fn parse_price(raw: Option<&str>) -> Decimal {
    raw.and_then(|value| value.trim().parse::<Decimal>().ok())
        .filter(|value| !value.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

/// Round an amount to cents, halves away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with two decimal places (e.g. `8.00`).
pub fn display_amount(amount: Decimal) -> String {
    format!("{:.2}", round_to_cents(amount))
}

/// Render an amount in the given currency (e.g. `$8.00`).
///
/// Amounts too large for minor units fall back to the plain two-place format.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        });

    match minor_units {
        Some(minor) => {
            let money = Money::from_minor(minor, currency);

            format!("{money}")
        }
        None => display_amount(amount),
    }
}
