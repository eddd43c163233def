//! Tiered Subtotal Discount
//!
//! Discounts the whole order once its subtotal reaches a configured tier. Buyers who are not
//! allowed discounts are skipped before any tier is considered.

use tracing::debug;

use crate::{
    cart::CartSnapshot,
    configuration::Configuration,
    discounts::{DiscountResult, Target},
    functions::DiscountFunction,
    selector, tiers,
};

/// Whole-order discount unlocked by subtotal tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredSubtotalDiscount;

impl DiscountFunction for TieredSubtotalDiscount {
    fn evaluate(&self, configuration: &Configuration, cart: &CartSnapshot) -> DiscountResult {
        if !cart.buyer_discount_eligible() {
            debug!("buyer is not eligible for discounts");

            return DiscountResult::empty();
        }

        let subtotal = cart.subtotal();

        let Some(percentage) = tiers::resolve(configuration, subtotal) else {
            debug!(%subtotal, "subtotal reaches no tier");

            return DiscountResult::empty();
        };

        debug!(%subtotal, %percentage, "tier reached");

        selector::select(configuration, percentage, vec![Target::order_subtotal()])
    }
}
