//! Vendor/Volume Discount
//!
//! Discounts each cart line that passes the vendor filter and, when active, the quantity
//! bounds. The value is the configured percentage or fixed amount.

use tracing::debug;

use crate::{
    cart::CartSnapshot, configuration::Configuration, discounts::DiscountResult, eligibility,
    functions::DiscountFunction, selector,
};

/// Per-line discount filtered by vendor and quantity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorVolumeDiscount;

impl DiscountFunction for VendorVolumeDiscount {
    fn evaluate(&self, configuration: &Configuration, cart: &CartSnapshot) -> DiscountResult {
        let targets = eligibility::filter(configuration, cart);

        if targets.is_empty() {
            debug!("no cart lines qualify for volume discount");

            return DiscountResult::empty();
        }

        debug!(targets = targets.len(), kind = ?configuration.kind(), "cart lines qualify");

        selector::select(configuration, configuration.percentage(), targets)
    }
}
