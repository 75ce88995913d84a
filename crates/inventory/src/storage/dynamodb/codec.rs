//! Typed extraction of values from DynamoDB attribute maps.
//!
//! [`get_value`] is the single entry point: an absent attribute yields the
//! caller's default without any type check, while a present attribute must
//! carry the kind its target type expects. A wrong kind is a
//! `TypeMismatch`; a numeric string that does not parse is a
//! `MalformedValue`. The two are never folded into the default.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use inventory_core::storage::{RepositoryError, Result};

/// A raw DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

/// A type that can be decoded from a single present attribute value.
pub trait FromAttribute: Sized {
    /// Human readable name of the expected kind, used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self>;
}

/// Reads `name` from `item`, returning `default` when the attribute is absent.
pub fn get_value<T: FromAttribute>(item: &Item, name: &str, default: T) -> Result<T> {
    match item.get(name) {
        Some(value) => T::from_attribute(name, value),
        None => Ok(default),
    }
}

/// Reads a key attribute that must be present.
pub fn required_string(item: &Item, name: &'static str) -> Result<String> {
    match item.get(name) {
        Some(value) => String::from_attribute(name, value),
        None => Err(RepositoryError::MissingKey(name)),
    }
}

fn mismatch<T: FromAttribute>(name: &str) -> RepositoryError {
    RepositoryError::TypeMismatch {
        attribute: name.to_string(),
        expected: T::EXPECTED,
    }
}

fn parse_number<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| RepositoryError::MalformedValue {
        attribute: name.to_string(),
        value: raw.to_string(),
    })
}

// ============================================================================
// Scalars
// ============================================================================

impl FromAttribute for String {
    const EXPECTED: &'static str = "string";

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::S(s) => Ok(s.clone()),
            _ => Err(mismatch::<Self>(name)),
        }
    }
}

macro_rules! numeric_attribute {
    ($ty:ty, $expected:literal) => {
        impl FromAttribute for $ty {
            const EXPECTED: &'static str = $expected;

            fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
                match value {
                    AttributeValue::N(n) => parse_number(name, n),
                    _ => Err(mismatch::<Self>(name)),
                }
            }
        }
    };
}

numeric_attribute!(i32, "integer");
numeric_attribute!(i64, "long");
numeric_attribute!(f64, "double");

impl FromAttribute for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::Bool(b) => Ok(*b),
            _ => Err(mismatch::<Self>(name)),
        }
    }
}

/// Nullable values: an explicit `NULL` decodes to `None`, which differs from
/// an absent attribute (that returns the caller's default).
impl<T: FromAttribute> FromAttribute for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::Null(true) => Ok(None),
            other => T::from_attribute(name, other).map(Some),
        }
    }
}

// ============================================================================
// Sets
// ============================================================================

impl FromAttribute for Vec<String> {
    const EXPECTED: &'static str = "string set";

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::Ss(values) => Ok(values.clone()),
            _ => Err(mismatch::<Self>(name)),
        }
    }
}

impl FromAttribute for Vec<i32> {
    const EXPECTED: &'static str = "number set";

    fn from_attribute(name: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::Ns(values) => values.iter().map(|n| parse_number(name, n)).collect(),
            _ => Err(mismatch::<Self>(name)),
        }
    }
}
