//! Configurator
//!
//! Transient selection state for the product modal: pack size, number of packs
//! and, for the assorted cookie box, flavor picks. Nothing touches the cart
//! until [`Configurator::commit`].

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    catalog::CatalogDescriptor,
    items::LineItem,
    names::LineName,
    packs::{PackOptions, PackSize, rule_for},
    pricing::display_amount,
};

/// Errors raised by configurator transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfiguratorError {
    /// No product is being configured.
    #[error("Configurator is closed")]
    Closed,

    /// The product isn't sold in the requested pack size.
    #[error("{product} is not offered as {pack}")]
    PackSizeNotOffered {
        /// Product being configured
        product: String,

        /// Requested pack size
        pack: PackSize,
    },
}

/// Outcome of toggling a flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorToggle {
    /// The flavor was added to the selection.
    Selected,

    /// The flavor was removed from the selection.
    Deselected,

    /// The selection was already full; the new pick was dropped.
    LimitReached,

    /// The picker isn't shown for this product, or the flavor isn't offered.
    Unavailable,
}

/// Selection state for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorState {
    product_name: String,
    price_by_pack: FxHashMap<PackSize, Decimal>,
    pack_options: PackOptions,
    flavor_options: &'static [&'static str],
    selected_pack: PackSize,
    quantity: u32,
    selected_flavors: SmallVec<[&'static str; 12]>,
    limit_reached: bool,
}

impl ConfiguratorState {
    /// Fresh state for a product: first pack option, one pack, no flavors.
    pub fn new(product: &dyn CatalogDescriptor) -> Self {
        let rule = rule_for(product.name());
        let pack_options = rule.options();

        let price_by_pack = pack_options
            .iter()
            .map(|pack| (*pack, product.price_for(*pack).unwrap_or(Decimal::ZERO)))
            .collect();

        Self {
            product_name: product.name().to_string(),
            price_by_pack,
            pack_options,
            flavor_options: rule.flavors(),
            selected_pack: rule.default_pack(),
            quantity: 1,
            selected_flavors: SmallVec::new(),
            limit_reached: false,
        }
    }

    /// Name of the product being configured.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Pack sizes offered for this product.
    pub fn pack_options(&self) -> &[PackSize] {
        &self.pack_options
    }

    /// Currently selected pack size.
    pub fn selected_pack(&self) -> PackSize {
        self.selected_pack
    }

    /// Number of packs.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of one pack of the selected size.
    pub fn unit_price(&self) -> Decimal {
        self.price_by_pack
            .get(&self.selected_pack)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Unit price times quantity, as shown in the modal.
    ///
    /// Saturates at [`Decimal::MAX`].
    pub fn displayed_price(&self) -> Decimal {
        self.unit_price()
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }

    /// [`ConfiguratorState::displayed_price`] rounded to two places.
    pub fn display_price(&self) -> String {
        display_amount(self.displayed_price())
    }

    /// Whether the flavor picker is shown.
    pub fn has_flavor_picker(&self) -> bool {
        !self.flavor_options.is_empty()
    }

    /// Flavors offered, in menu order.
    pub fn flavor_options(&self) -> &'static [&'static str] {
        self.flavor_options
    }

    /// Selected flavors, oldest pick first.
    pub fn selected_flavors(&self) -> &[&'static str] {
        &self.selected_flavors
    }

    /// Maximum number of flavors for the selected pack size.
    pub fn flavor_limit(&self) -> usize {
        usize::from(self.selected_pack.pieces())
    }

    /// Note shown under the flavor picker.
    pub fn flavor_note(&self) -> String {
        let limit = self.flavor_limit();

        if self.limit_reached {
            format!("You can select up to {limit} flavors. Limit reached!")
        } else {
            format!(
                "You can select up to {limit} flavors. ({}/{limit} chosen)",
                self.selected_flavors.len()
            )
        }
    }

    /// Select a pack size offered for this product.
    ///
    /// If the current flavor picks exceed the new limit, the most recent picks
    /// are dropped until they fit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfiguratorError::PackSizeNotOffered`] and leaves the state
    /// untouched if the pack size isn't offered.
    pub fn set_pack_size(&mut self, pack: PackSize) -> Result<(), ConfiguratorError> {
        if !self.pack_options.contains(&pack) {
            return Err(ConfiguratorError::PackSizeNotOffered {
                product: self.product_name.clone(),
                pack,
            });
        }

        self.selected_pack = pack;

        let limit = self.flavor_limit();
        self.limit_reached = self.selected_flavors.len() > limit;
        self.selected_flavors.truncate(limit);

        Ok(())
    }

    /// Add one pack.
    pub fn increment_qty(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Remove one pack, never going below one.
    pub fn decrement_qty(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Toggle a flavor pick.
    ///
    /// A pick that would take the selection past the limit is rejected, so the
    /// newest pick is always the one dropped.
    pub fn toggle_flavor(&mut self, flavor: &str) -> FlavorToggle {
        let Some(offered) = self
            .flavor_options
            .iter()
            .copied()
            .find(|option| *option == flavor)
        else {
            return FlavorToggle::Unavailable;
        };

        if let Some(idx) = self.selected_flavors.iter().position(|f| *f == offered) {
            self.selected_flavors.remove(idx);
            self.limit_reached = false;

            return FlavorToggle::Deselected;
        }

        if self.selected_flavors.len() >= self.flavor_limit() {
            self.limit_reached = true;

            return FlavorToggle::LimitReached;
        }

        self.selected_flavors.push(offered);
        self.limit_reached = false;

        FlavorToggle::Selected
    }

    /// Composite cart line name for the current selection.
    ///
    /// Flavors are listed in menu order so that the same picks always produce
    /// the same line.
    pub fn line_name(&self) -> String {
        let flavors = self
            .flavor_options
            .iter()
            .filter(|option| self.selected_flavors.contains(*option));

        LineName::configured(self.product_name.as_str(), self.selected_pack, flavors.copied())
            .to_string()
    }

    /// The line item this selection commits as.
    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(self.line_name(), self.unit_price(), self.quantity)
    }
}

/// The product modal: closed, or open with a [`ConfiguratorState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configurator {
    state: Option<ConfiguratorState>,
}

impl Configurator {
    /// Create a closed configurator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for a product, discarding any previous selection.
    pub fn open_for(&mut self, product: &dyn CatalogDescriptor) -> &mut ConfiguratorState {
        debug!(product = product.name(), "opened configurator");

        self.state.insert(ConfiguratorState::new(product))
    }

    /// Whether a product is being configured.
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Current selection, if open.
    pub fn state(&self) -> Option<&ConfiguratorState> {
        self.state.as_ref()
    }

    /// Current selection, mutably, if open.
    pub fn state_mut(&mut self) -> Option<&mut ConfiguratorState> {
        self.state.as_mut()
    }

    /// Select a pack size.
    ///
    /// # Errors
    ///
    /// Returns an error if the configurator is closed or the pack size isn't
    /// offered.
    pub fn set_pack_size(&mut self, pack: PackSize) -> Result<(), ConfiguratorError> {
        self.state
            .as_mut()
            .ok_or(ConfiguratorError::Closed)?
            .set_pack_size(pack)
    }

    /// Add one pack. No-op when closed.
    pub fn increment_qty(&mut self) {
        if let Some(state) = &mut self.state {
            state.increment_qty();
        }
    }

    /// Remove one pack. No-op when closed.
    pub fn decrement_qty(&mut self) {
        if let Some(state) = &mut self.state {
            state.decrement_qty();
        }
    }

    /// Toggle a flavor pick.
    pub fn toggle_flavor(&mut self, flavor: &str) -> FlavorToggle {
        self.state
            .as_mut()
            .map_or(FlavorToggle::Unavailable, |state| state.toggle_flavor(flavor))
    }

    /// Add the selection to the cart and close.
    ///
    /// Returns the committed line, or `None` if the configurator was closed.
    pub fn commit(&mut self, cart: &mut Cart) -> Option<LineItem> {
        let state = self.state.take()?;
        let item = state.to_line_item();

        cart.add_or_merge(item.name(), item.price(), item.quantity());

        debug!(line = item.name(), qty = item.quantity(), "committed configurator");

        Some(item)
    }

    /// Close without touching the cart.
    pub fn cancel(&mut self) {
        if self.state.take().is_some() {
            debug!("cancelled configurator");
        }
    }
}
