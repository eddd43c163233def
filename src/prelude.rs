//! Volume Discount prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartLine, CartSnapshot, Merchandise, VariantId},
    configuration::{
        Configuration, ConfigurationError, DiscountKind, METAFIELD_KEY, METAFIELD_NAMESPACE,
    },
    discounts::{ApplicationStrategy, DiscountBlock, DiscountResult, EMPTY_DISCOUNT, Target, Value},
    eligibility::{QuantityBound, QuantityFilter, VendorFilter},
    fixtures::{Fixture, FixtureError, Scenario},
    functions::{DiscountFunction, DiscountVariant, TieredSubtotalDiscount, VendorVolumeDiscount},
    input::{FunctionInput, InputError},
    tiers::Tier,
};
