// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Spelling Rust values as C literals.

use crate::descriptor::repr::repr;
use crate::descriptor::value::{FloatRange, IntRange, Rgb};
use crate::descriptor::DefaultValue;
use serde_json::{Number, Value};

/// Quote `s` as a C string literal.
pub fn str_to_c(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

pub fn str_to_c_or_null(s: Option<&str>) -> String {
    s.map(str_to_c).unwrap_or_else(|| "NULL".to_string())
}

pub fn bool_to_c(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Keep text from closing the surrounding `/* */` comment.
pub fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

/// Initializer for an option member's default value.
pub fn default_to_c(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Boolean(b) => bool_to_c(*b).to_string(),
        DefaultValue::Byte(b) => b.to_string(),
        DefaultValue::String(s) => str_to_c_or_null(s.as_deref()),
        DefaultValue::Int(range) => int_range_to_c(range),
        DefaultValue::Float(range) => float_range_to_c(range),
        DefaultValue::Rgb(rgb) => rgb_to_c(rgb),
    }
}

fn int_range_to_c(range: &IntRange) -> String {
    format!(
        "{{ {}, {}, {}, {} }}",
        range.val,
        range.min.map_or("INT32_MIN".to_string(), |v| v.to_string()),
        range.max.map_or("INT32_MAX".to_string(), |v| v.to_string()),
        range.step.map_or("1".to_string(), |v| v.to_string()),
    )
}

fn float_range_to_c(range: &FloatRange) -> String {
    let or = |n: &Option<Number>, fallback: &str| {
        n.as_ref()
            .map_or(fallback.to_string(), |v| v.to_string())
    };
    format!(
        "{{ {}, {}, {}, {} }}",
        range.val,
        or(&range.min, "-DBL_MAX"),
        or(&range.max, "DBL_MAX"),
        or(&range.step, "DBL_MIN"),
    )
}

fn rgb_to_c(rgb: &Rgb) -> String {
    format!(
        "{{ {}, {}, {}, {}, {}, {} }}",
        rgb.red, rgb.green, rgb.blue, rgb.red_max, rgb.green_max, rgb.blue_max
    )
}

/// Default as shown in header documentation, e.g. `{'val': 1000, 'min': 1}`.
pub fn default_doc(value: &Value) -> String {
    comment_safe(&repr(value))
}
