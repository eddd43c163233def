//! Function Input
//!
//! The document the checkout hands to a discount function: the discount's configuration
//! metafield and a snapshot of the cart.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{CartLine, CartSnapshot, Merchandise, VariantId},
    configuration::Configuration,
    lenient,
};

/// Errors raised while reading a function input document.
#[derive(Debug, Error)]
pub enum InputError {
    /// The document could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid function input.
    #[error("invalid input document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A function input document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInput {
    #[serde(default)]
    discount_node: DiscountNode,

    cart: CartInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DiscountNode {
    #[serde(default)]
    metafield: Option<Metafield>,
}

#[derive(Debug, Clone, Deserialize)]
struct Metafield {
    value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartInput {
    #[serde(default)]
    lines: Vec<LineInput>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    cost: Option<CostInput>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    buyer_identity: Option<BuyerIdentityInput>,
}

#[derive(Debug, Clone, Deserialize)]
struct LineInput {
    #[serde(default, deserialize_with = "lenient::integer")]
    quantity: i64,

    merchandise: MerchandiseInput,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
enum MerchandiseInput {
    ProductVariant {
        id: VariantId,

        #[serde(default)]
        product: Option<ProductInput>,
    },

    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
struct ProductInput {
    #[serde(default)]
    vendor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CostInput {
    #[serde(default, deserialize_with = "lenient::or_default")]
    subtotal_amount: Option<MoneyInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MoneyInput {
    #[serde(default, deserialize_with = "lenient::decimal")]
    amount: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BuyerIdentityInput {
    #[serde(default, deserialize_with = "lenient::or_default")]
    customer: Option<CustomerInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerInput {
    #[serde(default, deserialize_with = "lenient::boolean")]
    allow_discount: bool,
}

impl FunctionInput {
    /// Parse an input document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the document is not a valid function input.
    pub fn from_json(raw: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse an input document.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if reading fails or the document is not a valid function
    /// input.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, InputError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        Self::from_json(&raw)
    }

    /// Return the raw configuration metafield value, if any.
    pub fn metafield_value(&self) -> Option<&str> {
        self.discount_node
            .metafield
            .as_ref()
            .map(|metafield| metafield.value.as_str())
    }

    /// Decode the configuration, falling back to defaults.
    pub fn configuration(&self) -> Configuration {
        Configuration::from_metafield(self.metafield_value())
    }

    /// Build the cart snapshot.
    pub fn cart(&self) -> CartSnapshot {
        let lines: Vec<CartLine> = self
            .cart
            .lines
            .iter()
            .map(|line| CartLine::new(line.quantity, line.merchandise.to_merchandise()))
            .collect();

        let subtotal = self
            .cart
            .cost
            .as_ref()
            .and_then(|cost| cost.subtotal_amount.as_ref())
            .map_or(Decimal::ZERO, |money| money.amount);

        let buyer_discount_eligible = self
            .cart
            .buyer_identity
            .as_ref()
            .and_then(|identity| identity.customer.as_ref())
            .is_some_and(|customer| customer.allow_discount);

        CartSnapshot::new(lines)
            .with_subtotal(subtotal)
            .with_buyer_discount_eligible(buyer_discount_eligible)
    }
}

impl MerchandiseInput {
    fn to_merchandise(&self) -> Merchandise {
        match self {
            Self::ProductVariant { id, product } => Merchandise::ProductVariant {
                id: id.clone(),
                vendor: product.as_ref().and_then(|product| product.vendor.clone()),
            },
            Self::Other => Merchandise::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const INPUT: &str = r#"{
        "discountNode": {
            "metafield": { "value": "{\"percentage\": 15, \"vendors\": [\"Acme\"], \"option\": true}" }
        },
        "cart": {
            "lines": [
                {
                    "quantity": 3,
                    "merchandise": {
                        "__typename": "ProductVariant",
                        "id": "gid://shopify/ProductVariant/1",
                        "product": { "vendor": "Acme" }
                    }
                },
                {
                    "quantity": 1,
                    "merchandise": { "__typename": "CustomProduct" }
                }
            ],
            "cost": { "subtotalAmount": { "amount": "120.50" } },
            "buyerIdentity": { "customer": { "allowDiscount": true } }
        }
    }"#;

    #[test]
    fn parses_cart_lines_and_metafield() -> TestResult {
        let input = FunctionInput::from_json(INPUT)?;
        let cart = input.cart();

        assert_eq!(
            cart.lines(),
            &[
                CartLine::variant("gid://shopify/ProductVariant/1", Some("Acme"), 3),
                CartLine::other(1),
            ]
        );
        assert_eq!(cart.subtotal(), Decimal::new(12050, 2));
        assert!(cart.buyer_discount_eligible());
        assert_eq!(input.configuration().percentage(), Decimal::from(15));

        Ok(())
    }

    #[test]
    fn missing_optional_sections_use_safe_defaults() -> TestResult {
        let input = FunctionInput::from_json(r#"{ "cart": { "lines": [] } }"#)?;
        let cart = input.cart();

        assert_eq!(input.metafield_value(), None);
        assert_eq!(input.configuration(), Configuration::default());
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert!(!cart.buyer_discount_eligible());

        Ok(())
    }

    #[test]
    fn anonymous_buyer_is_not_eligible() -> TestResult {
        let input = FunctionInput::from_json(
            r#"{ "cart": { "lines": [], "buyerIdentity": { "customer": null } } }"#,
        )?;

        assert!(!input.cart().buyer_discount_eligible());

        Ok(())
    }

    #[test]
    fn malformed_cost_and_buyer_sections_do_not_reject_the_document() -> TestResult {
        let input = FunctionInput::from_json(
            r#"{
                "cart": {
                    "lines": [
                        {
                            "quantity": "3",
                            "merchandise": {
                                "__typename": "ProductVariant",
                                "id": "gid://shopify/ProductVariant/1"
                            }
                        },
                        {
                            "quantity": 2.0,
                            "merchandise": { "__typename": "ProductVariant", "id": "gid://shopify/ProductVariant/2" }
                        }
                    ],
                    "cost": { "subtotalAmount": null },
                    "buyerIdentity": { "customer": "anonymous" }
                }
            }"#,
        )?;
        let cart = input.cart();

        assert_eq!(
            cart.lines()
                .iter()
                .map(CartLine::quantity)
                .collect::<Vec<_>>(),
            vec![3, 2]
        );
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert!(!cart.buyer_discount_eligible());

        let input = FunctionInput::from_json(r#"{ "cart": { "lines": [], "cost": "free" } }"#)?;

        assert_eq!(input.cart().subtotal(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn reads_from_reader() -> TestResult {
        let input = FunctionInput::from_reader(INPUT.as_bytes())?;

        assert_eq!(input.cart().len(), 2);

        Ok(())
    }

    #[test]
    fn invalid_documents_are_errors() {
        assert!(matches!(
            FunctionInput::from_json("{}"),
            Err(InputError::Json(_))
        ));
        assert!(matches!(
            FunctionInput::from_json("not json"),
            Err(InputError::Json(_))
        ));
    }
}
