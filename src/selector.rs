//! Value Selection
//!
//! Turns resolved targets into the final [`DiscountResult`], choosing between a percentage
//! and a fixed amount according to the configuration.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    configuration::{Configuration, DiscountKind},
    discounts::{DiscountBlock, DiscountResult, Target, Value},
};

/// Largest percentage the checkout accepts.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Choose the value for `targets` and render the result.
///
/// `rate` is the percentage used when the configuration asks for a percentage discount;
/// fixed-amount discounts always take their amount from the configuration. Empty targets and
/// non-positive values yield the empty result.
pub fn select(configuration: &Configuration, rate: Decimal, targets: Vec<Target>) -> DiscountResult {
    if targets.is_empty() {
        return DiscountResult::empty();
    }

    let value = match configuration.kind() {
        DiscountKind::Percentage => {
            if rate > MAX_PERCENTAGE {
                debug!(%rate, "percentage above 100 clamped");
            }

            Value::percentage(rate.min(MAX_PERCENTAGE))
        }
        DiscountKind::FixedAmount => Value::FixedAmount {
            amount: configuration.fixed_amount().normalize(),
            applies_to_each_item: configuration.applies_to_each_item(),
        },
    };

    if !value.is_positive() {
        debug!(?value, "discount value is not positive");

        return DiscountResult::empty();
    }

    DiscountResult::single(
        DiscountBlock::new(targets, value)
            .with_message(configuration.message().map(ToString::to_string)),
    )
}
