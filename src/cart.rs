//! Cart

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque product variant identifier, e.g. `gid://shopify/ProductVariant/1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Create a variant id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a cart line refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merchandise {
    /// A purchasable product variant.
    ProductVariant {
        /// Variant identifier.
        id: VariantId,

        /// Vendor of the variant's product, when known.
        vendor: Option<String>,
    },

    /// Any other merchandise (gift cards, custom items, ...).
    Other,
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    quantity: i64,
    merchandise: Merchandise,
}

impl CartLine {
    /// Create a cart line.
    pub fn new(quantity: i64, merchandise: Merchandise) -> Self {
        Self {
            quantity,
            merchandise,
        }
    }

    /// Create a product variant line.
    pub fn variant<S: Into<String>>(
        id: impl Into<VariantId>,
        vendor: Option<S>,
        quantity: i64,
    ) -> Self {
        Self::new(
            quantity,
            Merchandise::ProductVariant {
                id: id.into(),
                vendor: vendor.map(Into::into),
            },
        )
    }

    /// Create a line for non-variant merchandise.
    pub fn other(quantity: i64) -> Self {
        Self::new(quantity, Merchandise::Other)
    }

    /// Return the line quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Return the merchandise.
    pub fn merchandise(&self) -> &Merchandise {
        &self.merchandise
    }

    /// Return the variant id, if the line is a product variant.
    pub fn variant_id(&self) -> Option<&VariantId> {
        match &self.merchandise {
            Merchandise::ProductVariant { id, .. } => Some(id),
            Merchandise::Other => None,
        }
    }

    /// Return the vendor, if the line is a product variant with a known vendor.
    pub fn vendor(&self) -> Option<&str> {
        match &self.merchandise {
            Merchandise::ProductVariant { vendor, .. } => vendor.as_deref(),
            Merchandise::Other => None,
        }
    }
}

/// Read-only view of the cart a discount is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
    subtotal: Decimal,
    buyer_discount_eligible: bool,
}

impl CartSnapshot {
    /// Create a snapshot with the given lines, a zero subtotal and an ineligible buyer.
    pub fn new(lines: impl Into<Vec<CartLine>>) -> Self {
        Self {
            lines: lines.into(),
            subtotal: Decimal::ZERO,
            buyer_discount_eligible: false,
        }
    }

    /// Set the cart subtotal.
    #[must_use]
    pub fn with_subtotal(mut self, subtotal: Decimal) -> Self {
        self.subtotal = subtotal;
        self
    }

    /// Set whether the buyer may receive discounts.
    #[must_use]
    pub fn with_buyer_discount_eligible(mut self, eligible: bool) -> Self {
        self.buyer_discount_eligible = eligible;
        self
    }

    /// Return the cart lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Return the cart subtotal.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Whether the buyer may receive discounts.
    pub fn buyer_discount_eligible(&self) -> bool {
        self.buyer_discount_eligible
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
