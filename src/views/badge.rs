//! Badge View

use std::fmt;

use crate::cart::Cart;

/// Cart counter shown in the page header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badge {
    /// Total number of units in the cart.
    pub count: u64,
}

impl Badge {
    /// Project the badge from the cart.
    pub fn project(cart: &Cart) -> Self {
        Self {
            count: cart.total_quantity(),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}
