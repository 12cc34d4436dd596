// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Editor friendly rendering of parse and schema errors.
//!
//! Every line follows the `file:line:column: message` convention (or
//! `file: message` when no position applies) so editors and build logs can
//! jump to the offending spot.

use crate::descriptor::repr::{quote, repr};
use crate::descriptor::JsonPath;
use crate::errors::SchemaViolation;
use serde_json::{Map, Value};

/// Longest rendering of a single value in a faulty object dump.
const MAX_VALUE_WIDTH: usize = 50;
/// Shortest prefix kept when a key is long enough to eat the whole budget.
const MIN_VALUE_PREFIX: usize = 10;

const DANGLING_COMMA_HINT: &str = "maybe trailing ',' is dangling prior to closing braces?";

/// Render a JSON syntax error with `context_lines` lines of the preceding
/// source, a caret under the failing column and the error itself.
pub fn syntax_report(
    file: &str,
    contents: &str,
    error: &serde_json::Error,
    context_lines: usize,
) -> Vec<String> {
    let line = error.line();
    let column = error.column();
    let message = syntax_message(error);
    if line == 0 {
        return vec![format!("{}: error: {}", file, message)];
    }

    let lines: Vec<&str> = contents.split('\n').collect();
    let width = line.to_string().len();
    let mut report = Vec::new();
    for number in line.saturating_sub(context_lines)..line {
        let text = lines.get(number).copied().unwrap_or_default();
        report.push(format!("{}:{:0width$}: {}", file, number + 1, text, width = width));
    }
    report.push(format!(
        "{}:{:0width$}: {}^",
        file,
        line,
        "-".repeat(column.saturating_sub(1)),
        width = width
    ));

    let location = format!("{}:{}:{}", file, line, column);
    report.push(format!("{}: error: {}", location, message));

    let offending = lines
        .get(line - 1)
        .and_then(|text| text.chars().nth(column.saturating_sub(1)));
    if looks_like_dangling_comma(&message, offending) {
        report.push(format!("{}: error: {}", location, DANGLING_COMMA_HINT));
    }
    report
}

/// The parser's message without its ` at line L column C` suffix.
pub fn syntax_message(error: &serde_json::Error) -> String {
    let message = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    match message.strip_suffix(suffix.as_str()) {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}

fn looks_like_dangling_comma(message: &str, offending: Option<char>) -> bool {
    message == "trailing comma"
        || (offending == Some('}') && message == "key must be a string")
        || (offending == Some(']') && message == "expected value")
}

/// Render schema violations: the faulty object around each violation, the
/// schema rule it broke and the error line.
///
/// `max_depth` bounds how many levels of the rule are spelled out; 0 leaves
/// the rule out and -1 renders all of it.
pub fn schema_report(
    file: &str,
    document: &Value,
    violations: &[SchemaViolation],
    max_depth: i32,
) -> Vec<String> {
    let mut report = Vec::new();
    for violation in violations {
        dump_object(&mut report, file, document, "faulty object", &violation.path);
        if let Some(rule) = violation.rule.as_ref().filter(|_| max_depth != 0) {
            dump_rule(&mut report, file, &violation.path, rule, max_depth);
        }
        report.push(format!("{}: error: {}", file, violation));
    }
    report
}

fn dump_object(
    report: &mut Vec<String>,
    file: &str,
    document: &Value,
    label: &str,
    path: &JsonPath,
) {
    match path.resolve(document) {
        Some(Value::Object(map)) => {
            report.push(format!("{}: {} at {} = {{", file, label, path));
            for key in sorted_keys(map) {
                let rendered = render_value(&map[key.as_str()]);
                let budget = MAX_VALUE_WIDTH
                    .saturating_sub(key.len())
                    .max(MIN_VALUE_PREFIX);
                let shown = if rendered.chars().count() + key.len() > MAX_VALUE_WIDTH {
                    truncate(&rendered, budget)
                } else {
                    rendered
                };
                report.push(format!("{}:    {}: {}", file, quote(key), shown));
            }
            report.push(format!("{}: }}", file));
        }
        Some(Value::Array(items)) => {
            report.push(format!("{}: {} at {} = [", file, label, path));
            let width = items.len().to_string().len();
            for (i, item) in items.iter().enumerate() {
                let rendered = render_value(item);
                let shown = if rendered.chars().count() > MAX_VALUE_WIDTH {
                    truncate(&rendered, MAX_VALUE_WIDTH)
                } else {
                    rendered
                };
                report.push(format!("{}:   {:0width$}: {}", file, i, shown, width = width));
            }
            report.push(format!("{}: ]", file));
        }
        _ => {
            if let Some(parent) = path.parent() {
                dump_object(report, file, document, &format!("parent of {}", label), &parent);
            }
        }
    }
}

/// Top level keys sit at depth 0; nested containers stop once they would
/// pass `max_depth`.
fn dump_rule(report: &mut Vec<String>, file: &str, path: &JsonPath, rule: &Value, max_depth: i32) {
    report.push(format!("{}: schema for {}:", file, path));
    let Value::Object(map) = rule else {
        report.push(format!("{}:   {}", file, repr(rule)));
        return;
    };
    for key in sorted_keys(map) {
        match &map[key.as_str()] {
            Value::Object(inner) => {
                report.push(format!("{}:   {}:", file, key));
                dump_rule_map(report, file, inner, 1, max_depth);
            }
            Value::Array(items) => {
                report.push(format!("{}:   {}:", file, key));
                dump_rule_list(report, file, items, 1, max_depth);
            }
            Value::String(text) => report.push(format!("{}:   {}: {}", file, key, text)),
            scalar => report.push(format!("{}:   {}: {}", file, key, repr(scalar))),
        }
    }
}

fn past_depth(indent: i32, max_depth: i32) -> bool {
    max_depth > 0 && indent > max_depth
}

fn dump_rule_map(
    report: &mut Vec<String>,
    file: &str,
    map: &Map<String, Value>,
    indent: i32,
    max_depth: i32,
) {
    if past_depth(indent, max_depth) {
        return;
    }
    let pad = "  ".repeat(indent as usize);
    for key in sorted_keys(map) {
        match &map[key.as_str()] {
            Value::Object(inner) => {
                report.push(format!("{}: {}{}:", file, pad, key));
                dump_rule_map(report, file, inner, indent + 1, max_depth);
            }
            Value::Array(items) => {
                report.push(format!("{}: {}{}:", file, pad, key));
                dump_rule_list(report, file, items, indent + 1, max_depth);
            }
            scalar => report.push(format!("{}: {}{}: {}", file, pad, key, repr(scalar))),
        }
    }
}

fn dump_rule_list(report: &mut Vec<String>, file: &str, items: &[Value], indent: i32, max_depth: i32) {
    if past_depth(indent, max_depth) {
        return;
    }
    let pad = "  ".repeat(indent as usize);
    for item in items {
        match item {
            Value::Object(inner) => dump_rule_map(report, file, inner, indent + 1, max_depth),
            Value::Array(nested) => dump_rule_list(report, file, nested, indent + 1, max_depth),
            scalar => report.push(format!("{}: {}{}", file, pad, repr(scalar))),
        }
    }
}

fn sorted_keys(map: &Map<String, Value>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys
}

/// `prefix...last_char`
fn truncate(rendered: &str, keep: usize) -> String {
    let prefix: String = rendered.chars().take(keep).collect();
    let last = rendered.chars().last().map(String::from).unwrap_or_default();
    format!("{}...{}", prefix, last)
}

/// Compact JSON with sorted keys.
fn render_value(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let entries: Vec<String> = sorted_keys(map)
                .into_iter()
                .map(|key| {
                    format!(
                        "{}: {}",
                        Value::String(key.clone()),
                        render_value(&map[key.as_str()])
                    )
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", entries.join(", "))
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_error(text: &str) -> serde_json::Error {
        serde_json::from_str::<Value>(text).unwrap_err()
    }

    #[test]
    fn syntax_report_points_at_column() {
        let text = "{\n  \"name\": \"a\",\n  \"category\" \"b\"\n}\n";
        let error = parse_error(text);
        let report = syntax_report("x.json", text, &error, 3);
        assert_eq!(report[0], "x.json:1: {");
        assert_eq!(report[1], "x.json:2:   \"name\": \"a\",");
        assert_eq!(report[2], "x.json:3:   \"category\" \"b\"");
        assert!(report[3].starts_with("x.json:3: ---"));
        assert!(report[3].ends_with('^'));
        assert!(report[4].starts_with(&format!("x.json:3:{}: error: ", error.column())));
        assert_eq!(report.len(), 5);
    }

    #[test]
    fn syntax_report_hints_at_trailing_comma() {
        let text = "{\n  \"name\": \"a\",\n}\n";
        let error = parse_error(text);
        let report = syntax_report("x.json", text, &error, 1);
        let last = report.last().unwrap();
        assert!(last.ends_with(DANGLING_COMMA_HINT), "{:?}", report);
        assert!(report.iter().all(|l| !l.contains(" at line ")));
    }

    #[test]
    fn syntax_report_limits_context() {
        let text = "[\n1,\n2,\n3\n4]";
        let error = parse_error(text);
        let report = syntax_report("x.json", text, &error, 1);
        assert_eq!(report[0], "x.json:5: 4]");
        assert!(report[1].starts_with("x.json:5: "));
        assert!(report[1].ends_with('^'));
    }

    #[test]
    fn schema_report_dumps_faulty_object() {
        let doc = json!({
            "name": "a",
            "in_ports": [{"name": "in", "data_type": "int", "description": "x".repeat(80)}]
        });
        let violation = SchemaViolation::new(
            JsonPath::root().key("in_ports").index(0).key("name"),
            "bad name",
        );
        let report = schema_report("x.json", &doc, &[violation], 2);
        assert_eq!(report[0], "x.json: parent of faulty object at json['in_ports'][0] = {");
        assert_eq!(report[1], "x.json:    'data_type': \"int\"");
        assert!(report[2].starts_with("x.json:    'description': \"xxxx"));
        assert!(report[2].ends_with("...\""));
        assert_eq!(report[3], "x.json:    'name': \"in\"");
        assert_eq!(report[4], "x.json: }");
        assert_eq!(report[5], "x.json: error: json['in_ports'][0]['name']: bad name");
    }

    #[test]
    fn schema_report_depth_bounds_rule_dump() {
        let doc = json!({"options": {"members": [{"name": "x"}], "version": 0}});
        let violation = SchemaViolation::new(JsonPath::root().key("options"), "oops").with_rule(json!({
            "type": "object",
            "anyOf": [{"required": ["members"]}, {"not": {"required": ["x"]}}]
        }));

        let none = schema_report("f", &doc, std::slice::from_ref(&violation), 0);
        assert_eq!(none[0], "f: faulty object at json['options'] = {");
        assert_eq!(none[1], "f:    'members': [{\"name\": \"x\"}]");
        assert!(!none.iter().any(|l| l.contains("schema for")));
        assert_eq!(none.last().unwrap(), "f: error: json['options']: oops");

        let shallow = schema_report("f", &doc, std::slice::from_ref(&violation), 1);
        let rule: Vec<&str> = shallow[4..shallow.len() - 1].iter().map(String::as_str).collect();
        assert_eq!(rule, vec!["f: schema for json['options']:", "f:   anyOf:", "f:   type: object"]);

        let full = schema_report("f", &doc, &[violation], -1);
        let rule: Vec<&str> = full[4..full.len() - 1].iter().map(String::as_str).collect();
        assert_eq!(
            rule,
            vec![
                "f: schema for json['options']:",
                "f:   anyOf:",
                "f:     required:",
                "f:       'members'",
                "f:     not:",
                "f:       required:",
                "f:         'x'",
                "f:   type: object",
            ]
        );
    }
}
