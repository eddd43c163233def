//! Volume Discount
//!
//! Discount functions evaluated once per checkout: a per-line discount filtered by vendor and
//! quantity, and a whole-order discount unlocked by subtotal tiers. Evaluation is pure and
//! total; anything that does not yield a discount produces the canonical empty result.

pub mod cart;
pub mod configuration;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod functions;
pub mod input;
pub mod prelude;
pub mod selector;
pub mod tiers;

mod lenient;
