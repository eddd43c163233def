//! Configuration
//!
//! The merchant-authored discount configuration. It is persisted by the admin app as a JSON
//! string in a metafield and decoded here once, field by field: a missing, malformed or
//! mistyped field falls back to its empty/zero default instead of rejecting the document.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    eligibility::{QuantityBound, QuantityFilter, VendorFilter},
    lenient,
    tiers::{Tier, zip_tiers},
};

/// Metafield namespace the admin app stores the configuration under.
pub const METAFIELD_NAMESPACE: &str = "$app:volume-discount";

/// Metafield key the admin app stores the configuration under.
pub const METAFIELD_KEY: &str = "function-configuration";

/// Errors raised while decoding a configuration document.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The document is not valid JSON.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object.
    #[error("configuration must be a JSON object")]
    NotAnObject,
}

/// Descriptive field names accepted alongside the persisted ones. When a document carries
/// both, the persisted name wins.
const FIELD_ALIASES: [(&str, &str); 7] = [
    ("amount", "fixedAmount"),
    ("includeVendors", "option"),
    ("quantityBoundActive", "optionQuantity"),
    ("quantityBoundMode", "subOptionQuantity"),
    ("useFixedAmount", "optionDiscount"),
    ("tierThresholds", "tiersDiscount"),
    ("tierPercentages", "percentagesDiscount"),
];

/// Which kind of value the discount carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountKind {
    /// Percentage off.
    #[default]
    Percentage,

    /// Fixed amount off.
    FixedAmount,
}

/// Decoded discount configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    percentage: Decimal,
    fixed_amount: Decimal,
    applies_to_each_item: bool,
    kind: DiscountKind,
    vendor_filter: VendorFilter,
    quantity_filter: QuantityFilter,
    tiers: SmallVec<[Tier; 4]>,
    message: Option<String>,
}

impl Configuration {
    /// Decode a configuration document.
    ///
    /// A blank document or JSON `null` decodes to the default configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the document is not JSON or not a JSON object.
    pub fn try_from_json(raw: &str) -> Result<Self, ConfigurationError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: serde_json::Value = serde_json::from_str(raw)?;

        match value {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Object(mut fields) => {
                for (alias, name) in FIELD_ALIASES {
                    if let Some(value) = fields.remove(alias) {
                        fields.entry(name).or_insert(value);
                    }
                }

                let document: ConfigurationDocument =
                    serde_json::from_value(serde_json::Value::Object(fields))?;

                Ok(document.into())
            }
            _ => Err(ConfigurationError::NotAnObject),
        }
    }

    /// Decode the configuration from a metafield value, falling back to the default
    /// configuration when the metafield is absent or cannot be decoded.
    pub fn from_metafield(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            debug!("no configuration metafield; using defaults");

            return Self::default();
        };

        Self::try_from_json(raw).unwrap_or_else(|error| {
            warn!(%error, "unreadable configuration metafield; using defaults");

            Self::default()
        })
    }

    /// Set the percentage.
    #[must_use]
    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = percentage;
        self
    }

    /// Set the fixed amount and switch to fixed-amount discounts.
    #[must_use]
    pub fn with_fixed_amount(mut self, amount: Decimal) -> Self {
        self.fixed_amount = amount;
        self.kind = DiscountKind::FixedAmount;
        self
    }

    /// Set the discount kind.
    #[must_use]
    pub fn with_kind(mut self, kind: DiscountKind) -> Self {
        self.kind = kind;
        self
    }

    /// Apply fixed amounts to each targeted item.
    #[must_use]
    pub fn applying_to_each_item(mut self, applies_to_each_item: bool) -> Self {
        self.applies_to_each_item = applies_to_each_item;
        self
    }

    /// Set the vendor filter.
    #[must_use]
    pub fn with_vendor_filter(mut self, vendor_filter: VendorFilter) -> Self {
        self.vendor_filter = vendor_filter;
        self
    }

    /// Set the quantity filter.
    #[must_use]
    pub fn with_quantity_filter(mut self, quantity_filter: QuantityFilter) -> Self {
        self.quantity_filter = quantity_filter;
        self
    }

    /// Set the spend tiers.
    #[must_use]
    pub fn with_tiers(mut self, tiers: SmallVec<[Tier; 4]>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Set the buyer-facing message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Return the configured percentage.
    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    /// Return the fixed amount.
    pub fn fixed_amount(&self) -> Decimal {
        self.fixed_amount
    }

    /// Whether fixed amounts apply to each targeted item.
    pub fn applies_to_each_item(&self) -> bool {
        self.applies_to_each_item
    }

    /// Return the discount kind.
    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    /// Return the vendor filter.
    pub fn vendor_filter(&self) -> &VendorFilter {
        &self.vendor_filter
    }

    /// Return the quantity filter.
    pub fn quantity_filter(&self) -> &QuantityFilter {
        &self.quantity_filter
    }

    /// Return the spend tiers in configured order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Return the buyer-facing message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Persisted shape of the configuration, as written by the admin forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigurationDocument {
    #[serde(deserialize_with = "lenient::decimal")]
    percentage: Decimal,

    #[serde(deserialize_with = "lenient::optional_decimal")]
    fixed_amount: Option<Decimal>,

    #[serde(deserialize_with = "lenient::boolean")]
    applies_to_each_item: bool,

    #[serde(deserialize_with = "lenient::strings")]
    vendors: FxHashSet<String>,

    #[serde(rename = "option", deserialize_with = "lenient::boolean")]
    include_vendors: bool,

    #[serde(rename = "optionQuantity", deserialize_with = "lenient::boolean")]
    quantity_bound_active: bool,

    #[serde(rename = "subOptionQuantity", deserialize_with = "lenient::quantity_bound")]
    quantity_bound_mode: Option<QuantityBound>,

    #[serde(deserialize_with = "lenient::lower_bound")]
    minimum_quantity: i64,

    #[serde(deserialize_with = "lenient::upper_bound")]
    maximum_quantity: i64,

    #[serde(rename = "optionDiscount", deserialize_with = "lenient::boolean")]
    use_fixed_amount: bool,

    #[serde(rename = "tiersDiscount", deserialize_with = "lenient::decimals")]
    tier_thresholds: SmallVec<[Decimal; 4]>,

    #[serde(rename = "percentagesDiscount", deserialize_with = "lenient::decimals")]
    tier_percentages: SmallVec<[Decimal; 4]>,

    #[serde(deserialize_with = "lenient::optional_string")]
    message: Option<String>,
}

impl From<ConfigurationDocument> for Configuration {
    fn from(document: ConfigurationDocument) -> Self {
        if document.tier_thresholds.len() != document.tier_percentages.len() {
            warn!(
                thresholds = document.tier_thresholds.len(),
                percentages = document.tier_percentages.len(),
                "tier thresholds and percentages differ in length"
            );
        }

        Self {
            percentage: document.percentage,
            // Older documents only carry `percentage`, which doubled as the amount.
            fixed_amount: document.fixed_amount.unwrap_or(document.percentage),
            applies_to_each_item: document.applies_to_each_item,
            kind: if document.use_fixed_amount {
                DiscountKind::FixedAmount
            } else {
                DiscountKind::Percentage
            },
            vendor_filter: VendorFilter::new(document.vendors, document.include_vendors),
            quantity_filter: QuantityFilter::new(
                document.quantity_bound_active,
                document.quantity_bound_mode,
                document.minimum_quantity,
                document.maximum_quantity,
            ),
            tiers: zip_tiers(&document.tier_thresholds, &document.tier_percentages),
            message: document.message,
        }
    }
}
