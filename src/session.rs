//! Session
//!
//! A page session owns the cart for its lifetime. The cart is read from the
//! store once, and every mutation made through the session is saved, rendered
//! to the page's surfaces and handed to subscribed observers.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tracing::{debug, error, info};

use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogDescriptor},
    config::{CartConfig, ConfigError},
    configurator::{Configurator, ConfiguratorState},
    items::LineItem,
    store::{CartStore, KeyValueStore, StoreError},
    views::{CartObserver, PageSurfaces, RenderedViews, menu, render},
};

/// Cart session for one page load.
pub struct Session<S> {
    cart: Cart,
    store: CartStore<S>,
    configurator: Configurator,
    surfaces: PageSurfaces,
    currency: &'static Currency,
    views: RenderedViews,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cart", &self.cart)
            .field("configurator", &self.configurator)
            .field("surfaces", &self.surfaces)
            .field("currency", &self.currency.iso_alpha_code)
            .field("views", &self.views)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session: load the stored cart and render the page's surfaces.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configured currency is unknown.
    pub fn start(
        store: S,
        config: &CartConfig,
        surfaces: PageSurfaces,
    ) -> Result<Self, ConfigError> {
        let currency = config.resolve_currency()?;
        let store = CartStore::new(store, config.storage_key.as_str());
        let cart = store.load();

        info!(key = store.key(), lines = cart.len(), "started cart session");

        let views = render(&cart, surfaces, currency);

        Ok(Self {
            cart,
            store,
            configurator: Configurator::new(),
            surfaces,
            currency,
            views,
            observers: Vec::new(),
        })
    }

    /// Start a session and, on the cart page, reconcile it with the menu.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configured currency is unknown. A failed
    /// save after the menu sync is logged and otherwise ignored.
    pub fn start_with_menu(
        store: S,
        config: &CartConfig,
        surfaces: PageSurfaces,
        catalog: &Catalog,
    ) -> Result<Self, ConfigError> {
        let mut session = Self::start(store, config, surfaces)?;

        if let Err(err) = session.sync_with_menu(catalog) {
            error!(error = %err, "failed to save cart after menu sync");
        }

        Ok(session)
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The most recently rendered views.
    pub fn views(&self) -> &RenderedViews {
        &self.views
    }

    /// Surfaces present on this page.
    pub fn surfaces(&self) -> PageSurfaces {
        self.surfaces
    }

    /// The backing cart store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Returns whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved. The in-memory
    /// cart and the views are updated regardless.
    #[tracing::instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        name: &str,
        price: Decimal,
        quantity: u32,
    ) -> Result<bool, StoreError> {
        let changed = self.cart.add_or_merge(name, price, quantity);

        self.commit_change(changed)
    }

    /// Increase a line's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved.
    #[tracing::instrument(skip(self))]
    pub fn increment(&mut self, name: &str) -> Result<bool, StoreError> {
        let changed = self.cart.increment_quantity(name);

        self.commit_change(changed)
    }

    /// Decrease a line's quantity by one, removing the line at zero.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved.
    #[tracing::instrument(skip(self))]
    pub fn decrement(&mut self, name: &str) -> Result<bool, StoreError> {
        let changed = self.cart.decrement_quantity(name);

        self.commit_change(changed)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        let changed = self.cart.remove_by_name(name);

        self.commit_change(changed)
    }

    /// Reconcile the cart with current menu prices.
    ///
    /// Skipped (returning `Ok(None)`) when the page doesn't show the cart.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved.
    pub fn sync_with_menu(&mut self, catalog: &Catalog) -> Result<Option<usize>, StoreError> {
        let Some(changed) = menu::sync_with_menu(&mut self.cart, catalog, self.surfaces) else {
            return Ok(None);
        };

        self.commit_change(true)?;

        Ok(Some(changed))
    }

    /// Open the product modal for a product, resetting any previous selection.
    ///
    /// Skipped (returning `None`) when the page has no product modal.
    pub fn open_configurator(
        &mut self,
        product: &dyn CatalogDescriptor,
    ) -> Option<&mut ConfiguratorState> {
        if !self.surfaces.configurator {
            debug!(product = product.name(), "no product modal on this page");
            return None;
        }

        Some(self.configurator.open_for(product))
    }

    /// The product modal.
    pub fn configurator(&self) -> &Configurator {
        &self.configurator
    }

    /// The product modal, mutably. Selection changes don't touch the cart.
    pub fn configurator_mut(&mut self) -> &mut Configurator {
        &mut self.configurator
    }

    /// Add the modal's selection to the cart and close it.
    ///
    /// Returns the committed line, or `None` if the modal was closed or the
    /// page has no product modal.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart couldn't be saved.
    pub fn commit_configurator(&mut self) -> Result<Option<LineItem>, StoreError> {
        let item = self.configurator.commit(&mut self.cart);

        self.commit_change(item.is_some())?;

        Ok(item)
    }

    /// Close the product modal without touching the cart.
    pub fn close_configurator(&mut self) {
        self.configurator.cancel();
    }

    fn commit_change(&mut self, changed: bool) -> Result<bool, StoreError> {
        if !changed {
            return Ok(false);
        }

        let saved = self.store.save(&self.cart);

        if let Err(err) = &saved {
            error!(key = self.store.key(), error = %err, "failed to save cart");
        }

        self.views = render(&self.cart, self.surfaces, self.currency);

        for observer in &mut self.observers {
            observer.on_cart_changed(&self.cart, &self.views);
        }

        saved.map(|()| true)
    }
}
