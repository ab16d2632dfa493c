//! Integration tests for the product modal driving a cart session.
//!
//! Covers pack options per product family, flavor limits for the assorted
//! cookie box, and the composite line names committed to the cart.

use rust_decimal::Decimal;
use testresult::TestResult;

use cartwheel::{packs::COOKIE_FLAVORS, prelude::*};

fn menu_session() -> TestResult<(Session<MemoryStore>, Catalog)> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalogs/bakery.yml");
    let catalog = Catalog::from_path(path)?;
    let session = Session::start(
        MemoryStore::new(),
        &CartConfig::default(),
        PageSurfaces::MENU,
    )?;

    Ok((session, catalog))
}

#[test]
fn pack_options_follow_product_family() -> TestResult {
    let (mut session, catalog) = menu_session()?;

    let expected = [
        ("Assorted cookies", vec![PackSize::HalfDozen, PackSize::Dozen]),
        (
            "Assorted cupcakes",
            vec![PackSize::Four, PackSize::HalfDozen, PackSize::Dozen],
        ),
        (
            "Brownies",
            vec![
                PackSize::Single,
                PackSize::Three,
                PackSize::HalfDozen,
                PackSize::Dozen,
            ],
        ),
    ];

    for (name, options) in expected {
        let product = catalog.get(name).ok_or(name)?;
        let state = session.open_configurator(product).ok_or("no product modal")?;
        let first = options.first().copied().ok_or("no pack options")?;

        assert_eq!(state.pack_options(), options.as_slice(), "options for {name}");
        assert_eq!(state.selected_pack(), first);
        assert_eq!(state.has_flavor_picker(), name == "Assorted cookies");
    }

    Ok(())
}

#[test]
fn flavor_selection_never_exceeds_limit() -> TestResult {
    let (mut session, catalog) = menu_session()?;
    let cookies = catalog.get("Assorted cookies").ok_or("missing cookies")?;

    let state = session.open_configurator(cookies).ok_or("no product modal")?;

    for flavor in COOKIE_FLAVORS.iter().chain(COOKIE_FLAVORS.iter()) {
        state.toggle_flavor(flavor);
        assert!(state.selected_flavors().len() <= state.flavor_limit());
    }

    state.set_pack_size(PackSize::Dozen)?;

    for flavor in COOKIE_FLAVORS {
        state.toggle_flavor(flavor);
        assert!(state.selected_flavors().len() <= state.flavor_limit());
    }

    Ok(())
}

#[test]
fn reopening_resets_quantity_and_flavors() -> TestResult {
    let (mut session, catalog) = menu_session()?;
    let cookies = catalog.get("Assorted cookies").ok_or("missing cookies")?;

    let state = session.open_configurator(cookies).ok_or("no product modal")?;
    state.increment_qty();
    state.increment_qty();
    state.toggle_flavor("Grinch cookie");

    let brownies = catalog.get("Brownies").ok_or("missing brownies")?;
    session.open_configurator(brownies).ok_or("no product modal")?;

    let state = session.open_configurator(cookies).ok_or("no product modal")?;

    assert_eq!(state.quantity(), 1);
    assert!(state.selected_flavors().is_empty());
    assert_eq!(state.flavor_note(), "You can select up to 6 flavors. (0/6 chosen)");

    Ok(())
}

#[test]
fn committed_cookie_box_lands_in_cart() -> TestResult {
    let (mut session, catalog) = menu_session()?;
    let cookies = catalog.get("Assorted cookies").ok_or("missing cookies")?;

    let state = session.open_configurator(cookies).ok_or("no product modal")?;
    state.set_pack_size(PackSize::Dozen)?;
    state.increment_qty();
    state.toggle_flavor("Strawberry crunch cookie");
    state.toggle_flavor("Chocolate chip cookie");

    assert_eq!(state.display_price(), "44.00");

    session.commit_configurator()?;

    let line = session
        .cart()
        .get("Assorted cookies – Dozen (12) [Chocolate chip cookie, Strawberry crunch cookie]")
        .ok_or("missing committed line")?;

    assert_eq!(line.price(), Decimal::new(22, 0));
    assert_eq!(line.quantity(), 2);
    assert_eq!(session.views().badge, Some(Badge { count: 2 }));

    Ok(())
}

#[test]
fn invalid_pack_size_is_rejected_without_change() -> TestResult {
    let (mut session, catalog) = menu_session()?;
    let cupcakes = catalog.get("Assorted cupcakes").ok_or("missing cupcakes")?;

    session.open_configurator(cupcakes).ok_or("no product modal")?;

    let result = session.configurator_mut().set_pack_size(PackSize::Single);

    assert!(matches!(
        result,
        Err(ConfiguratorError::PackSizeNotOffered { pack: PackSize::Single, .. })
    ));
    assert_eq!(
        session.configurator().state().map(ConfiguratorState::selected_pack),
        Some(PackSize::Four)
    );

    Ok(())
}

#[test]
fn three_piece_pack_has_its_own_label() -> TestResult {
    let (mut session, catalog) = menu_session()?;
    let brownies = catalog.get("Brownies").ok_or("missing brownies")?;

    session
        .open_configurator(brownies)
        .ok_or("no product modal")?
        .set_pack_size(PackSize::Three)?;

    let item = session.commit_configurator()?.ok_or("nothing committed")?;

    assert_eq!(item.name(), "Brownies – Three pieces (3)");
    assert_eq!(item.price(), Decimal::new(975, 2));

    Ok(())
}
