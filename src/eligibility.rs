//! Eligibility
//!
//! Line-level qualification for the vendor/volume discount. A cart line qualifies when it
//! references a product variant, passes the vendor filter and, when active, the quantity
//! bounds. Qualifying lines become [`Target::ProductVariant`] targets in cart order.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::trace;

use crate::{
    cart::{CartLine, CartSnapshot, Merchandise},
    configuration::Configuration,
    discounts::Target,
};

/// Which quantity bound(s) a line's quantity is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityBound {
    /// `quantity >= minimum`
    Minimum,

    /// `quantity <= maximum`
    Maximum,

    /// `minimum <= quantity <= maximum`
    Both,
}

/// Error returned when a quantity bound mode name is not recognised.
#[derive(Debug, Error)]
#[error("unknown quantity bound mode: {0}")]
pub struct UnknownQuantityBound(String);

impl FromStr for QuantityBound {
    type Err = UnknownQuantityBound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimum" => Ok(Self::Minimum),
            "maximum" => Ok(Self::Maximum),
            "both" => Ok(Self::Both),
            _ => Err(UnknownQuantityBound(s.to_string())),
        }
    }
}

impl fmt::Display for QuantityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Both => "both",
        })
    }
}

/// Vendor allow-list or block-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFilter {
    vendors: FxHashSet<String>,
    include: bool,
}

impl VendorFilter {
    /// Create a vendor filter. With `include` set the vendors form an allow-list, otherwise a
    /// block-list.
    pub fn new(vendors: FxHashSet<String>, include: bool) -> Self {
        Self { vendors, include }
    }

    /// Only lines from these vendors qualify.
    pub fn include<I, S>(vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vendors.into_iter().map(Into::into).collect(), true)
    }

    /// Lines from these vendors never qualify.
    pub fn exclude<I, S>(vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vendors.into_iter().map(Into::into).collect(), false)
    }

    /// Return the configured vendor names.
    pub fn vendors(&self) -> &FxHashSet<String> {
        &self.vendors
    }

    /// Whether the vendors form an allow-list.
    pub fn is_include(&self) -> bool {
        self.include
    }

    /// Check a vendor name against the filter.
    pub fn matches(&self, vendor: &str) -> bool {
        self.vendors.contains(vendor) == self.include
    }
}

/// Inclusive quantity bounds applied to each cart line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityFilter {
    active: bool,
    bound: Option<QuantityBound>,
    minimum: i64,
    maximum: i64,
}

impl QuantityFilter {
    /// Create a quantity filter.
    pub fn new(active: bool, bound: Option<QuantityBound>, minimum: i64, maximum: i64) -> Self {
        Self {
            active,
            bound,
            minimum,
            maximum,
        }
    }

    /// A filter every quantity passes.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Quantities of at least `minimum` pass.
    pub fn at_least(minimum: i64) -> Self {
        Self::new(true, Some(QuantityBound::Minimum), minimum, 0)
    }

    /// Quantities of at most `maximum` pass.
    pub fn at_most(maximum: i64) -> Self {
        Self::new(true, Some(QuantityBound::Maximum), 0, maximum)
    }

    /// Quantities within `minimum..=maximum` pass.
    pub fn between(minimum: i64, maximum: i64) -> Self {
        Self::new(true, Some(QuantityBound::Both), minimum, maximum)
    }

    /// Whether the filter is applied at all.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Return the bound mode, if one was configured.
    pub fn bound(&self) -> Option<QuantityBound> {
        self.bound
    }

    /// Return the inclusive lower bound.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// Return the inclusive upper bound.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Check a line quantity against the filter.
    ///
    /// An active filter without a bound mode rejects every quantity.
    pub fn matches(&self, quantity: i64) -> bool {
        if !self.active {
            return true;
        }

        match self.bound {
            Some(QuantityBound::Minimum) => quantity >= self.minimum,
            Some(QuantityBound::Maximum) => quantity <= self.maximum,
            Some(QuantityBound::Both) => (self.minimum..=self.maximum).contains(&quantity),
            None => false,
        }
    }
}

/// Check whether a single cart line qualifies under the configuration.
pub fn qualifies(configuration: &Configuration, line: &CartLine) -> bool {
    let Merchandise::ProductVariant { vendor, .. } = line.merchandise() else {
        return false;
    };

    configuration
        .vendor_filter()
        .matches(vendor.as_deref().unwrap_or_default())
        && configuration.quantity_filter().matches(line.quantity())
}

/// Collect the targets for every qualifying cart line, preserving cart order.
pub fn filter(configuration: &Configuration, cart: &CartSnapshot) -> Vec<Target> {
    cart.lines()
        .iter()
        .filter(|line| {
            let qualified = qualifies(configuration, line);

            trace!(
                quantity = line.quantity(),
                vendor = line.vendor().unwrap_or_default(),
                qualified,
                "checked cart line"
            );

            qualified
        })
        .filter_map(|line| line.variant_id().cloned())
        .map(|id| Target::ProductVariant { id })
        .collect()
}
