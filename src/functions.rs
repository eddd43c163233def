//! Discount Functions
//!
//! A discount function evaluates one configuration against one cart snapshot. Evaluation is
//! pure: no I/O, no shared state, and the same input always yields the same result.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::{
    cart::CartSnapshot, configuration::Configuration, discounts::DiscountResult,
    input::FunctionInput,
};

pub mod tiered_subtotal;
pub mod vendor_volume;

pub use tiered_subtotal::TieredSubtotalDiscount;
pub use vendor_volume::VendorVolumeDiscount;

/// Trait for evaluating a discount against a cart
pub trait DiscountFunction {
    /// Evaluate the discount for the given configuration and cart.
    ///
    /// Never fails: anything that does not produce a discount yields
    /// [`DiscountResult::empty`].
    fn evaluate(&self, configuration: &Configuration, cart: &CartSnapshot) -> DiscountResult;
}

/// The discount functions this crate provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscountVariant {
    /// Per-line discount filtered by vendor and quantity.
    #[default]
    VendorVolume,

    /// Whole-order discount unlocked by subtotal tiers.
    TieredSubtotal,
}

impl DiscountVariant {
    /// Evaluate this variant.
    pub fn evaluate(self, configuration: &Configuration, cart: &CartSnapshot) -> DiscountResult {
        let span = debug_span!("evaluate", variant = %self, lines = cart.len());
        let _entered = span.enter();

        let result = match self {
            Self::VendorVolume => VendorVolumeDiscount.evaluate(configuration, cart),
            Self::TieredSubtotal => TieredSubtotalDiscount.evaluate(configuration, cart),
        };

        debug!(discounted = !result.is_empty(), "evaluation finished");

        result
    }

    /// Evaluate this variant against a parsed input document.
    pub fn run(self, input: &FunctionInput) -> DiscountResult {
        self.evaluate(&input.configuration(), &input.cart())
    }

    /// Evaluate this variant against a raw JSON input document.
    ///
    /// A document that cannot be parsed yields the empty result.
    pub fn run_json(self, raw: &str) -> DiscountResult {
        match FunctionInput::from_json(raw) {
            Ok(input) => self.run(&input),
            Err(error) => {
                warn!(%error, "unreadable function input; no discount applied");

                DiscountResult::empty()
            }
        }
    }
}

impl fmt::Display for DiscountVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VendorVolume => "vendor-volume",
            Self::TieredSubtotal => "tiered-subtotal",
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::discounts::EMPTY_DISCOUNT;

    use super::*;

    #[test]
    fn unreadable_input_yields_empty_result() {
        assert_eq!(DiscountVariant::VendorVolume.run_json("{"), EMPTY_DISCOUNT);
        assert_eq!(DiscountVariant::TieredSubtotal.run_json("[]"), EMPTY_DISCOUNT);
    }

    #[test]
    fn variant_names_round_trip() -> testresult::TestResult {
        for variant in DiscountVariant::value_variants() {
            let name = variant.to_string();

            assert_eq!(DiscountVariant::from_str(&name, false).ok(), Some(*variant));
            assert_eq!(
                serde_json::to_string(variant)?,
                format!("\"{name}\"")
            );
        }

        Ok(())
    }
}
