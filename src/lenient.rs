//! Lenient Field Decoding
//!
//! Decoders used with `#[serde(deserialize_with = ...)]` on documents the engine does not
//! control. Each one accepts any JSON value and coerces it to a safe default rather than
//! failing the whole document.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use smallvec::SmallVec;

use crate::eligibility::QuantityBound;

/// Decode a decimal, treating anything unparsable as zero.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_decimal(&value))
}

/// Decode an optional decimal; `null` stays `None`.
pub(crate) fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Null => None,
        other => Some(to_decimal(&other)),
    })
}

/// Decode a list of decimals. Non-array values decode as an empty list.
pub(crate) fn decimals<'de, D>(deserializer: D) -> Result<SmallVec<[Decimal; 4]>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Array(values) => values.iter().map(to_decimal).collect(),
        _ => SmallVec::new(),
    })
}

/// Decode a boolean flag. Numbers are truthy when nonzero.
pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| to_bool(&value))
}

/// Decode a count, dropping any fractional part.
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| saturating_i64(to_decimal(&value).trunc()))
}

/// Decode a nested section, treating a malformed one as its default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Value::deserialize(deserializer).map(|value| serde_json::from_value(value).unwrap_or_default())
}

/// Decode a lower bound, rounding fractional values up.
pub(crate) fn lower_bound<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| saturating_i64(to_decimal(&value).ceil()))
}

/// Decode an upper bound, rounding fractional values down.
pub(crate) fn upper_bound<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| saturating_i64(to_decimal(&value).floor()))
}

/// Decode a set of strings, skipping non-string members.
pub(crate) fn strings<'de, D>(deserializer: D) -> Result<FxHashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => std::iter::once(s).collect(),
        _ => FxHashSet::default(),
    })
}

/// Decode an optional, non-empty string.
pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Decode a quantity bound mode. Unknown modes decode as `None`.
pub(crate) fn quantity_bound<'de, D>(deserializer: D) -> Result<Option<QuantityBound>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::String(s) => QuantityBound::from_str(&s).ok(),
        _ => None,
    })
}

pub(crate) fn to_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => Decimal::ZERO,
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(_) => !to_decimal(value).is_zero(),
        Value::String(s) => match s.trim() {
            "true" => true,
            "false" => false,
            _ => !to_decimal(value).is_zero(),
        },
        _ => false,
    }
}

fn parse_decimal(s: &str) -> Decimal {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or(Decimal::ZERO)
}

fn saturating_i64(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
