// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed default values of option members.

use crate::descriptor::DataType;
use serde_json::{Number, Value};

/// `{ val, min, max, step }` of an integer range. Unset bounds fall back to
/// the full `int32_t` range with step 1.
#[derive(Debug, Clone, PartialEq)]
pub struct IntRange {
    pub val: i64,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub step: Option<i64>,
}

/// Floating point counterpart of [`IntRange`]. Numbers keep their JSON
/// spelling so the emitted literal matches the description.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatRange {
    pub val: Number,
    pub min: Option<Number>,
    pub max: Option<Number>,
    pub step: Option<Number>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rgb {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub red_max: u32,
    pub green_max: u32,
    pub blue_max: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Byte(u8),
    Int(IntRange),
    Float(FloatRange),
    Rgb(Rgb),
    /// `None` for an explicit `null`, emitted as `NULL`
    String(Option<String>),
}

impl DefaultValue {
    /// Interpret `value` as a default for an option of type `data_type`.
    pub fn from_json(data_type: &DataType, value: &Value) -> Result<Self, String> {
        match data_type {
            DataType::Boolean => value
                .as_bool()
                .map(DefaultValue::Boolean)
                .ok_or_else(|| expected("a boolean", value)),
            DataType::Byte => value
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .map(DefaultValue::Byte)
                .ok_or_else(|| expected("an integer between 0 and 255", value)),
            DataType::String => match value {
                Value::Null => Ok(DefaultValue::String(None)),
                Value::String(s) => Ok(DefaultValue::String(Some(s.clone()))),
                other => Err(expected("a string or null", other)),
            },
            DataType::Int => int_range(value).map(DefaultValue::Int),
            DataType::Float => float_range(value).map(DefaultValue::Float),
            DataType::Rgb => rgb(value).map(DefaultValue::Rgb),
            other => Err(format!("options of type '{}' cannot have defaults", other)),
        }
    }
}

fn expected(what: &str, value: &Value) -> String {
    format!("expected {}, found {}", what, value)
}

fn check_keys(value: &Value, allowed: &[&str]) -> Result<(), String> {
    if let Some(map) = value.as_object() {
        if let Some(key) = map.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(format!(
                "unexpected key '{}' (allowed: {})",
                key,
                allowed.join(", ")
            ));
        }
    }
    Ok(())
}

fn int_field(map: &serde_json::Map<String, Value>, key: &str) -> Result<Option<i64>, String> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("'{}' {}", key, expected("an integer", v))),
    }
}

fn number_field(map: &serde_json::Map<String, Value>, key: &str) -> Result<Option<Number>, String> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(v) => Err(format!("'{}' {}", key, expected("a number", v))),
    }
}

fn int_range(value: &Value) -> Result<IntRange, String> {
    if let Some(val) = value.as_i64() {
        return Ok(IntRange {
            val,
            min: None,
            max: None,
            step: None,
        });
    }
    let map = value
        .as_object()
        .ok_or_else(|| expected("an integer or a {val, min, max, step} object", value))?;
    check_keys(value, &["val", "min", "max", "step"])?;
    Ok(IntRange {
        val: int_field(map, "val")?.unwrap_or(0),
        min: int_field(map, "min")?,
        max: int_field(map, "max")?,
        step: int_field(map, "step")?,
    })
}

fn float_range(value: &Value) -> Result<FloatRange, String> {
    if let Value::Number(n) = value {
        return Ok(FloatRange {
            val: n.clone(),
            min: None,
            max: None,
            step: None,
        });
    }
    let map = value
        .as_object()
        .ok_or_else(|| expected("a number or a {val, min, max, step} object", value))?;
    check_keys(value, &["val", "min", "max", "step"])?;
    Ok(FloatRange {
        val: number_field(map, "val")?.unwrap_or_else(|| Number::from(0)),
        min: number_field(map, "min")?,
        max: number_field(map, "max")?,
        step: number_field(map, "step")?,
    })
}

fn rgb(value: &Value) -> Result<Rgb, String> {
    let map = value
        .as_object()
        .ok_or_else(|| expected("an object with red, green and blue", value))?;
    check_keys(
        value,
        &["red", "green", "blue", "red_max", "green_max", "blue_max"],
    )?;
    let component = |key: &str, fallback: u32| -> Result<u32, String> {
        match map.get(key) {
            None => Ok(fallback),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| format!("'{}' {}", key, expected("a non-negative integer", v))),
        }
    };
    Ok(Rgb {
        red: component("red", 0)?,
        green: component("green", 0)?,
        blue: component("blue", 0)?,
        red_max: component("red_max", 255)?,
        green_max: component("green_max", 255)?,
        blue_max: component("blue_max", 255)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_int_uses_full_range() {
        let value = DefaultValue::from_json(&DataType::Int, &json!(5)).unwrap();
        assert_eq!(
            value,
            DefaultValue::Int(IntRange {
                val: 5,
                min: None,
                max: None,
                step: None
            })
        );
    }

    #[test]
    fn int_object_keeps_bounds() {
        let value =
            DefaultValue::from_json(&DataType::Int, &json!({"val": 2, "min": 0, "step": 2})).unwrap();
        match value {
            DefaultValue::Int(range) => {
                assert_eq!(range.val, 2);
                assert_eq!(range.min, Some(0));
                assert_eq!(range.max, None);
                assert_eq!(range.step, Some(2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_mismatched_shapes() {
        assert!(DefaultValue::from_json(&DataType::Boolean, &json!("yes")).is_err());
        assert!(DefaultValue::from_json(&DataType::Byte, &json!(300)).is_err());
        assert!(DefaultValue::from_json(&DataType::Int, &json!({"value": 1})).is_err());
        assert!(DefaultValue::from_json(&DataType::Float, &json!("1.0")).is_err());
        assert!(DefaultValue::from_json(&DataType::Rgb, &json!([1, 2, 3])).is_err());
        assert!(DefaultValue::from_json(&DataType::Blob, &json!(null)).is_err());
    }

    #[test]
    fn rgb_fills_missing_components() {
        let value = DefaultValue::from_json(&DataType::Rgb, &json!({"red": 10})).unwrap();
        assert_eq!(
            value,
            DefaultValue::Rgb(Rgb {
                red: 10,
                green: 0,
                blue: 0,
                red_max: 255,
                green_max: 255,
                blue_max: 255
            })
        );
    }

    #[test]
    fn null_string_default_is_kept() {
        assert_eq!(
            DefaultValue::from_json(&DataType::String, &json!(null)).unwrap(),
            DefaultValue::String(None)
        );
        assert_eq!(
            DefaultValue::from_json(&DataType::String, &json!("on")).unwrap(),
            DefaultValue::String(Some("on".into()))
        );
        assert!(DefaultValue::from_json(&DataType::String, &json!(1)).is_err());
    }
}
