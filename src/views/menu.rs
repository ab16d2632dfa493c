//! Menu Price Sync

use tracing::info;

use crate::{cart::Cart, catalog::Catalog, views::PageSurfaces};

/// Reconcile the cart against current menu prices.
///
/// Only runs on pages showing the cart; returns `None` when skipped, otherwise
/// the number of lines that changed.
pub fn sync_with_menu(cart: &mut Cart, catalog: &Catalog, surfaces: PageSurfaces) -> Option<usize> {
    if !surfaces.cart_page {
        return None;
    }

    let changed = cart.resync_names_and_prices(catalog);

    if changed > 0 {
        info!(changed, "synced cart with menu prices");
    }

    Some(changed)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{catalog::ProductDescriptor, packs::PackSize};

    use super::*;

    fn catalog() -> Catalog {
        [ProductDescriptor::new("Scone").with_price(PackSize::Single, Decimal::TWO)]
            .into_iter()
            .collect()
    }

    #[test]
    fn skipped_without_cart_page() {
        let mut cart = Cart::new();
        cart.add_or_merge("Scone", Decimal::ONE, 1);

        assert_eq!(sync_with_menu(&mut cart, &catalog(), PageSurfaces::MENU), None);
        assert_eq!(cart.total(), Decimal::ONE);
    }

    #[test]
    fn updates_prices_on_cart_page() {
        let mut cart = Cart::new();
        cart.add_or_merge("Scone", Decimal::ONE, 3);

        assert_eq!(sync_with_menu(&mut cart, &catalog(), PageSurfaces::CART), Some(1));
        assert_eq!(cart.total(), Decimal::new(6, 0));
    }
}
