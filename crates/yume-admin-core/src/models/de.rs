//! Lenient field deserializers.
//!
//! The backend is not consistent about JSON types: flags arrive as `true`
//! or `1`, prices as numbers or strings, ids as numbers or strings. These
//! helpers accept every shape seen in practice.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn bool_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    })
}

pub fn f64_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value_as_f64(&value).unwrap_or(0.0))
}

pub fn opt_f64_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value_as_f64(&value))
}

pub fn i64_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    value_as_i64(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", value)))
}

pub fn opt_i64_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value_as_i64(&value))
}

/// Quantities of zero or garbage count as one, like the order form does.
pub fn quantity_from_any<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value_as_i64(&value)
        .filter(|q| *q > 0)
        .map(|q| q.min(u32::MAX as i64) as u32)
        .unwrap_or(1))
}

/// List endpoints sometimes return a bare object instead of an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(deserialize_with = "bool_from_any")]
        paid: bool,
        #[serde(deserialize_with = "f64_from_any")]
        price: f64,
        #[serde(deserialize_with = "quantity_from_any")]
        quantity: u32,
        #[serde(deserialize_with = "i64_from_any")]
        id: i64,
    }

    #[test]
    fn test_numbers_and_strings() {
        let f: Flags =
            serde_json::from_str(r#"{"paid": 1, "price": "12.50", "quantity": "2", "id": "7"}"#)
                .unwrap();
        assert!(f.paid);
        assert_eq!(f.price, 12.5);
        assert_eq!(f.quantity, 2);
        assert_eq!(f.id, 7);
    }

    #[test]
    fn test_falsy_values() {
        let f: Flags =
            serde_json::from_str(r#"{"paid": 0, "price": null, "quantity": 0, "id": 3}"#).unwrap();
        assert!(!f.paid);
        assert_eq!(f.price, 0.0);
        assert_eq!(f.quantity, 1);
    }

    #[test]
    fn test_bad_id_is_an_error() {
        let result: Result<Flags, _> =
            serde_json::from_str(r#"{"paid": true, "price": 1, "quantity": 1, "id": "abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_one_or_many() {
        let many: OneOrMany<i64> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(many.into_vec(), vec![1, 2]);
        let one: OneOrMany<i64> = serde_json::from_str("5").unwrap();
        assert_eq!(one.into_vec(), vec![5]);
    }
}
