//! Session Example
//!
//! Drives a cart session against a directory store, the way a menu page and
//! then a cart page would.
//!
//! Use `-s` to choose the storage directory
//! Use `-c` to load a catalog fixture
//! Use `--config` to load cart settings from YAML

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cartwheel::prelude::*;

/// Arguments for the session example
#[derive(Debug, Parser)]
struct SessionArgs {
    /// Directory the cart is stored in
    #[clap(short, long, default_value = "target/cart-storage")]
    storage: PathBuf,

    /// Catalog fixture
    #[clap(short, long, default_value = "fixtures/catalogs/bakery.yml")]
    catalog: PathBuf,

    /// Cart settings (YAML)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[clap(short, long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

/// Session Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = SessionArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => CartConfig::from_path(path)?,
        None => CartConfig::default(),
    };

    let catalog = Catalog::from_path(&args.catalog)?;

    // Menu page: add a plain item and configure a cookie box.
    let mut menu = Session::start(
        DirectoryStore::new(&args.storage),
        &config,
        PageSurfaces::MENU,
    )?;

    menu.subscribe(|_cart: &Cart, views: &RenderedViews| {
        if let Some(badge) = views.badge {
            println!("badge: {badge}");
        }
    });

    menu.add_to_cart("Brownies", parse_price(Some("3.50")), 1)?;

    if let Some(cookies) = catalog.get("Assorted cookies")
        && let Some(modal) = menu.open_configurator(cookies)
    {
        modal.set_pack_size(PackSize::Dozen)?;
        modal.toggle_flavor("Grinch cookie");
        modal.toggle_flavor("S'mores cookie");

        menu.commit_configurator()?;
    }

    // Cart page: reload from storage and reconcile with the menu.
    let cart_page = Session::start_with_menu(
        DirectoryStore::new(&args.storage),
        &config,
        PageSurfaces::CART,
        &catalog,
    )?;

    if let Some(page) = &cart_page.views().cart_page {
        for row in &page.rows {
            println!("{:>3} x {:<60} {}", row.quantity, row.name, row.line_total_display);
        }

        println!("total: {}", page.total);
    }

    println!(
        "{} lines stored in {}",
        cart_page.cart().len(),
        args.storage.display()
    );

    Ok(())
}
