//! Views
//!
//! Pure projections of the cart for each surface a page can show. A view whose
//! surface isn't on the current page is skipped.

use rusty_money::iso::Currency;

use crate::cart::Cart;

pub mod badge;
pub mod cart_page;
pub mod menu;

pub use badge::Badge;
pub use cart_page::{CartPage, CartRow};

/// Which cart surfaces the current page includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSurfaces {
    /// Header badge with the unit count.
    pub badge: bool,

    /// Cart page item list and total.
    pub cart_page: bool,

    /// Product configuration modal.
    pub configurator: bool,
}

impl PageSurfaces {
    /// Menu page: badge and product modal.
    pub const MENU: PageSurfaces = PageSurfaces {
        badge: true,
        cart_page: false,
        configurator: true,
    };

    /// Cart page: badge and item list.
    pub const CART: PageSurfaces = PageSurfaces {
        badge: true,
        cart_page: true,
        configurator: false,
    };
}

/// Projections for the surfaces present on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedViews {
    /// Badge, if the page shows one.
    pub badge: Option<Badge>,

    /// Cart page, if the page shows one.
    pub cart_page: Option<CartPage>,
}

/// Project every present surface from the cart.
pub fn render(cart: &Cart, surfaces: PageSurfaces, currency: &'static Currency) -> RenderedViews {
    RenderedViews {
        badge: surfaces.badge.then(|| Badge::project(cart)),
        cart_page: surfaces
            .cart_page
            .then(|| CartPage::project(cart, currency)),
    }
}

/// Subscriber notified after every cart mutation.
pub trait CartObserver {
    /// Called with the cart and the freshly rendered views.
    fn on_cart_changed(&mut self, cart: &Cart, views: &RenderedViews);
}

impl<F> CartObserver for F
where
    F: FnMut(&Cart, &RenderedViews),
{
    fn on_cart_changed(&mut self, cart: &Cart, views: &RenderedViews) {
        self(cart, views);
    }
}
