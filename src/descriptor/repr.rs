// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Literal spelling of JSON values for diagnostics and header comments:
//! `{'val': 1000, 'min': 1}`, `True`, `None`.

use serde_json::Value;

/// Render `value` as a literal. Object keys keep document order.
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", entries.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), repr(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Single quoted unless the text holds a `'` and no `"`.
pub fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_scalars() {
        assert_eq!(repr(&json!(null)), "None");
        assert_eq!(repr(&json!(true)), "True");
        assert_eq!(repr(&json!(false)), "False");
        assert_eq!(repr(&json!(1000)), "1000");
        assert_eq!(repr(&json!(0.5)), "0.5");
        assert_eq!(repr(&json!("timer")), "'timer'");
    }

    #[test]
    fn renders_containers_in_document_order() {
        assert_eq!(
            repr(&json!({"val": 1000, "min": 1})),
            "{'val': 1000, 'min': 1}"
        );
        assert_eq!(repr(&json!([1, "a", [], {}])), "[1, 'a', [], {}]");
    }

    #[test]
    fn quotes_like_a_literal() {
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("say \"it's\""), "'say \"it\\'s\"'");
        assert_eq!(quote("a\\b\nc"), "'a\\\\b\\nc'");
    }
}
