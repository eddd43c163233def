//! Integration tests for the tiered subtotal discount, driven through input documents.

use serde_json::{Value as Json, json};
use testresult::TestResult;

use volume_discount::{discounts::EMPTY_DISCOUNT, functions::DiscountVariant};

fn input(configuration: &Json, subtotal: &str, allow_discount: bool) -> String {
    json!({
        "discountNode": { "metafield": { "value": configuration.to_string() } },
        "cart": {
            "lines": [],
            "cost": { "subtotalAmount": { "amount": subtotal } },
            "buyerIdentity": { "customer": { "allowDiscount": allow_discount } }
        }
    })
    .to_string()
}

fn run(configuration: &Json, subtotal: &str) -> Result<Json, serde_json::Error> {
    serde_json::to_value(DiscountVariant::TieredSubtotal.run_json(&input(
        configuration,
        subtotal,
        true,
    )))
}

#[test]
fn configured_order_decides_between_reached_tiers() -> TestResult {
    let configuration = json!({ "tiersDiscount": [100, 50], "percentagesDiscount": [10, 20] });

    let result = run(&configuration, "120")?;

    // Both tiers are reached; the one listed last wins.
    assert_eq!(
        result["discounts"][0]["value"],
        json!({ "percentage": { "value": "20" } })
    );

    Ok(())
}

#[test]
fn last_reached_threshold_without_percentage_yields_no_discount() -> TestResult {
    let configuration = json!({ "tiersDiscount": [50, 100], "percentagesDiscount": [10] });

    assert_eq!(run(&configuration, "120")?, serde_json::to_value(EMPTY_DISCOUNT)?);
    assert_eq!(
        run(&configuration, "75")?["discounts"][0]["value"],
        json!({ "percentage": { "value": "10" } })
    );

    Ok(())
}

#[test]
fn reached_tier_targets_the_order_subtotal() -> TestResult {
    let configuration = json!({
        "tiersDiscount": [50, 100],
        "percentagesDiscount": [5, 10],
        "message": "Spend more, save more"
    });

    let result = run(&configuration, "120.00")?;

    assert_eq!(
        result,
        json!({
            "discountApplicationStrategy": "FIRST",
            "discounts": [{
                "targets": [{ "orderSubtotal": { "excludedVariantIds": [] } }],
                "value": { "percentage": { "value": "10" } },
                "message": "Spend more, save more"
            }]
        })
    );

    Ok(())
}

#[test]
fn threshold_equal_to_subtotal_is_reached() -> TestResult {
    let configuration = json!({ "tiersDiscount": [100], "percentagesDiscount": [10] });

    let result = run(&configuration, "100")?;

    assert_eq!(
        result["discounts"][0]["value"],
        json!({ "percentage": { "value": "10" } })
    );

    Ok(())
}

#[test]
fn buyer_gate_blocks_any_tier() {
    let configuration = json!({ "tiersDiscount": [0], "percentagesDiscount": [50] });

    assert_eq!(
        DiscountVariant::TieredSubtotal.run_json(&input(&configuration, "1000", false)),
        EMPTY_DISCOUNT
    );
}

#[test]
fn missing_buyer_identity_blocks_any_tier() {
    let raw = json!({
        "discountNode": { "metafield": { "value": "{\"tiersDiscount\": [0], \"percentagesDiscount\": [50]}" } },
        "cart": { "lines": [], "cost": { "subtotalAmount": { "amount": "10" } } }
    })
    .to_string();

    assert_eq!(DiscountVariant::TieredSubtotal.run_json(&raw), EMPTY_DISCOUNT);
}

#[test]
fn unreached_tiers_apply_no_default() {
    let configuration = json!({ "tiersDiscount": [100], "percentagesDiscount": [10], "percentage": 25 });

    assert_eq!(
        DiscountVariant::TieredSubtotal.run_json(&input(&configuration, "99.99", true)),
        EMPTY_DISCOUNT
    );
}

#[test]
fn empty_configuration_applies_nothing() {
    assert_eq!(
        DiscountVariant::TieredSubtotal.run_json(&input(&json!({}), "500", true)),
        EMPTY_DISCOUNT
    );
}
