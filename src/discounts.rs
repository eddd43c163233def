//! Discounts
//!
//! The result contract handed back to the checkout: an application strategy and at most one
//! discount block of targets and value. Field names and enum values serialize exactly as the
//! settlement layer expects them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::VariantId;

/// The canonical "no discount" result.
pub const EMPTY_DISCOUNT: DiscountResult = DiscountResult {
    strategy: ApplicationStrategy::First,
    discounts: Vec::new(),
};

/// How the checkout applies the returned discount blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStrategy {
    /// Apply only the first discount block.
    #[default]
    First,

    /// Apply every discount block.
    All,
}

/// What a discount block applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    /// A single cart line, by variant.
    ProductVariant {
        /// Variant identifier.
        id: VariantId,
    },

    /// The whole order subtotal.
    OrderSubtotal {
        /// Variants left out of the subtotal.
        #[serde(rename = "excludedVariantIds", default)]
        excluded_variant_ids: Vec<VariantId>,
    },
}

impl Target {
    /// Whole-order target with no exclusions.
    pub fn order_subtotal() -> Self {
        Self::OrderSubtotal {
            excluded_variant_ids: Vec::new(),
        }
    }
}

/// The discount value. Percentage and fixed amount are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ValueRepr", from = "ValueRepr")]
pub enum Value {
    /// Percentage off, e.g. `15` for 15%.
    Percentage(Decimal),

    /// Fixed amount off, in the checkout's currency.
    FixedAmount {
        /// Amount off.
        amount: Decimal,

        /// Apply the amount to each targeted item instead of once.
        applies_to_each_item: bool,
    },
}

impl Value {
    /// Percentage value.
    pub fn percentage(value: Decimal) -> Self {
        Self::Percentage(value.normalize())
    }

    /// Fixed amount value applied once across the targets.
    pub fn fixed_amount(amount: Decimal) -> Self {
        Self::FixedAmount {
            amount: amount.normalize(),
            applies_to_each_item: false,
        }
    }

    /// Whether this value discounts anything at all.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Percentage(value) | Self::FixedAmount { amount: value, .. } => {
                value.is_sign_positive() && !value.is_zero()
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ValueRepr {
    Percentage {
        #[serde(with = "rust_decimal::serde::str")]
        value: Decimal,
    },
    FixedAmount {
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,

        #[serde(
            rename = "appliesToEachItem",
            default,
            skip_serializing_if = "std::ops::Not::not"
        )]
        applies_to_each_item: bool,
    },
}

impl From<Value> for ValueRepr {
    fn from(value: Value) -> Self {
        match value {
            Value::Percentage(value) => Self::Percentage {
                value: value.normalize(),
            },
            Value::FixedAmount {
                amount,
                applies_to_each_item,
            } => Self::FixedAmount {
                amount: amount.normalize(),
                applies_to_each_item,
            },
        }
    }
}

impl From<ValueRepr> for Value {
    fn from(repr: ValueRepr) -> Self {
        match repr {
            ValueRepr::Percentage { value } => Self::Percentage(value),
            ValueRepr::FixedAmount {
                amount,
                applies_to_each_item,
            } => Self::FixedAmount {
                amount,
                applies_to_each_item,
            },
        }
    }
}

/// One unit of targets, value and optional message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountBlock {
    targets: Vec<Target>,
    value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl DiscountBlock {
    /// Create a discount block without a message.
    pub fn new(targets: Vec<Target>, value: Value) -> Self {
        Self {
            targets,
            value,
            message: None,
        }
    }

    /// Attach a message shown to the buyer.
    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Return the targets.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Return the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Return the message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The outcome of one discount evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResult {
    #[serde(rename = "discountApplicationStrategy")]
    strategy: ApplicationStrategy,

    discounts: Vec<DiscountBlock>,
}

impl DiscountResult {
    /// The canonical empty result.
    pub fn empty() -> Self {
        EMPTY_DISCOUNT
    }

    /// Result carrying exactly one discount block, applied with [`ApplicationStrategy::First`].
    ///
    /// A block without targets collapses to the empty result.
    pub fn single(block: DiscountBlock) -> Self {
        if block.targets.is_empty() {
            return Self::empty();
        }

        Self {
            strategy: ApplicationStrategy::First,
            discounts: vec![block],
        }
    }

    /// Return the application strategy.
    pub fn strategy(&self) -> ApplicationStrategy {
        self.strategy
    }

    /// Return the discount blocks.
    pub fn discounts(&self) -> &[DiscountBlock] {
        &self.discounts
    }

    /// Check if no discount is applied.
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

impl Default for DiscountResult {
    fn default() -> Self {
        Self::empty()
    }
}
