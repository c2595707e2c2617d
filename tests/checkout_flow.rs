//! Integration tests for the checkout flow, following the worked example:
//! a 100-unit product awarding 10 miles, a 1250-mile balance, and a
//! 500-mile bonus granting 20% off. Redeeming then checking out must charge
//! 80, award floor(10 × 1.2) = 12 miles, and leave a 762-mile balance.

use rust_decimal::Decimal;
use testresult::TestResult;

use skyshop::prelude::*;

fn scenario_seed() -> Seed {
    Seed {
        products: vec![Product {
            id: "p1".into(),
            name: "Skyline Headphones".into(),
            amount: Decimal::from(100),
            rating: 4.5,
            status: Availability::Available,
            miles: 10,
            description: "Reference over-ears".into(),
            order_count: 0,
            kind: "standard".into(),
            category: Category::Electronics,
            subcategory: Some(SubCategory::Audio),
            image: None,
        }],
        bonuses: vec![Bonus {
            id: "b-20".into(),
            name: "Long Haul".into(),
            description: "20% off the next purchase or checkout".into(),
            miles_required: 500,
            discount: Decimal::from(20),
            kind: BonusKind::Discount,
        }],
        profile: Profile {
            id: "u1".into(),
            name: "Alex Carter".into(),
            miles: 1250,
        },
    }
}

#[test]
fn redeem_then_checkout_matches_the_worked_example() -> TestResult {
    let mut store = Store::new(scenario_seed());

    store.add_to_cart("p1", 1)?;

    let line = store.cart().get("p1");
    assert_eq!(line.map(|l| l.quantity), Some(1));
    assert_eq!(line.map(|l| l.total), Some(Decimal::from(100)));
    assert_eq!(line.map(|l| l.miles), Some(10));

    store.redeem_bonus("b-20")?;
    assert_eq!(store.profile().miles, 750);
    assert_eq!(store.active_discount(), Decimal::from(20));

    let notice = store.checkout()?;

    let order = store.orders().first();
    assert_eq!(order.map(|o| o.total_amount), Some(Decimal::from(80)));
    assert_eq!(order.map(|o| o.total_miles), Some(12));
    assert_eq!(store.profile().miles, 762);
    assert!(store.cart().is_empty());
    assert_eq!(store.active_discount(), Decimal::ZERO);

    assert_eq!(
        notice,
        Notice::CheckoutComplete {
            order_ref: order.map(|o| o.short_id().to_owned()).unwrap_or_default(),
            miles_earned: 12,
        }
    );

    Ok(())
}

#[test]
fn checkout_without_discount_charges_the_full_subtotal() -> TestResult {
    let mut store = Store::new(scenario_seed());

    store.add_to_cart("p1", 3)?;
    store.checkout()?;

    let order = store.orders().first();
    assert_eq!(order.map(|o| o.total_amount), Some(Decimal::from(300)));
    assert_eq!(order.map(|o| o.total_miles), Some(30));
    assert_eq!(store.profile().miles, 1250 + 30);

    Ok(())
}

#[test]
fn discount_cuts_the_amount_and_boosts_the_miles() -> TestResult {
    // (percent, expected amount, expected miles) for a 100/10-mile cart.
    let cases = [
        (Decimal::from(10), Decimal::from(90), 11),
        (Decimal::from(25), Decimal::from(75), 12), // floor(10 × 1.25)
        (Decimal::from(50), Decimal::from(50), 15),
    ];

    for (percent, expected_amount, expected_miles) in cases {
        let mut seed = scenario_seed();
        if let Some(bonus) = seed.bonuses.first_mut() {
            bonus.discount = percent;
        }

        let mut store = Store::new(seed);
        store.add_to_cart("p1", 1)?;
        store.redeem_bonus("b-20")?;
        store.checkout()?;

        let order = store.orders().first();
        assert_eq!(
            order.map(|o| o.total_amount),
            Some(expected_amount),
            "amount at {percent}%"
        );
        assert_eq!(
            order.map(|o| o.total_miles),
            Some(expected_miles),
            "miles at {percent}%"
        );
    }

    Ok(())
}

#[test]
fn checkout_increments_order_count_by_quantity() -> TestResult {
    let mut store = Store::new(scenario_seed());

    store.add_to_cart("p1", 4)?;
    store.checkout()?;

    assert_eq!(store.product("p1").map(|p| p.order_count), Some(4));

    store.add_to_cart("p1", 2)?;
    store.checkout()?;

    assert_eq!(store.product("p1").map(|p| p.order_count), Some(6));

    Ok(())
}

#[test]
fn empty_cart_checkout_changes_nothing() {
    let mut store = Store::new(scenario_seed());
    let before = store.snapshot();

    let result = store.checkout();

    assert_eq!(result, Err(StoreError::EmptyCart));
    assert!(store.orders().is_empty());
    assert_eq!(store.profile().miles, 1250);
    assert_eq!(store.snapshot(), before, "no mutation at all");
}

#[test]
fn order_items_are_a_deep_copy_immune_to_catalogue_edits() -> TestResult {
    let mut store = Store::new(scenario_seed());

    store.add_to_cart("p1", 2)?;
    store.checkout()?;

    store.update_product(
        "p1",
        ProductPatch {
            name: Some("Renamed".into()),
            amount: Some(Decimal::from(999)),
            ..ProductPatch::default()
        },
    );

    let recorded = store.orders().first().and_then(|o| o.items.first());
    assert_eq!(
        recorded.map(|l| l.name.as_str()),
        Some("Skyline Headphones"),
        "order keeps the checkout-time name"
    );
    assert_eq!(recorded.map(|l| l.amount), Some(Decimal::from(100)));

    Ok(())
}

#[test]
fn every_checkout_is_a_completed_order() -> TestResult {
    let mut store = Store::new(scenario_seed());

    for _ in 0..3 {
        store.add_to_cart("p1", 1)?;
        store.checkout()?;
    }

    assert_eq!(store.orders().len(), 3);
    assert!(
        store
            .orders()
            .iter()
            .all(|o| o.status == OrderStatus::Completed),
        "checkout only produces completed orders"
    );

    Ok(())
}
