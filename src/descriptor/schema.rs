// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of description documents.
//!
//! The walker visits the whole document and accumulates every violation it
//! finds, so a single run reports all problems of a file. Only documents that
//! pass are handed to serde for decoding.

use crate::descriptor::model::Document;
use crate::descriptor::naming::{is_c_identifier, is_port_name, port_name_and_size};
use crate::descriptor::{DataType, DefaultValue, JsonPath};
use crate::errors::SchemaViolation;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

const SCHEMA_KEY: &str = "$schema";

const NODE_TYPE_KEYS: &[&str] = &[
    "name",
    "category",
    "description",
    "author",
    "url",
    "license",
    "version",
    "options",
    "in_ports",
    "out_ports",
    "methods",
    "private_data_type",
    "node_type",
];
const BUNDLE_KEYS: &[&str] = &["name", "meta", "types"];
const META_KEYS: &[&str] = &["author", "license", "version"];
const NODE_METHOD_KEYS: &[&str] = &["open", "close", "init_type"];
const OPTIONS_KEYS: &[&str] = &["version", "members", "methods"];
const OPTIONS_METHOD_KEYS: &[&str] = &["new", "free"];
const MEMBER_KEYS: &[&str] = &["name", "data_type", "description", "default"];
const IN_PORT_KEYS: &[&str] = &["name", "data_type", "description", "required", "methods", "type"];
const OUT_PORT_KEYS: &[&str] = &[
    "name",
    "data_type",
    "description",
    "required",
    "flags",
    "methods",
    "type",
];
const IN_PORT_METHOD_KEYS: &[&str] = &["process", "connect", "disconnect"];
const OUT_PORT_METHOD_KEYS: &[&str] = &["connect", "disconnect"];
const EXTENSION_KEYS: &[&str] = &["data_type", "access", "extra_methods"];

const C_IDENTIFIER_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";
const PORT_NAME_PATTERN: &str = "^[A-Z0-9_]+(\\[[0-9]+\\])?$";

fn c_identifier_rule() -> Value {
    json!({"type": "string", "pattern": C_IDENTIFIER_PATTERN})
}

fn data_type_rule() -> Value {
    json!({"anyOf": [
        {"enum": DataType::simple_names()},
        {"pattern": "^custom:.+$"},
        {"pattern": "^composed:[^,]+(,[^,]+)+$"}
    ]})
}

/// Check `document` against the node-type description schema.
///
/// Single descriptions and bundles (objects with a `types` list) are both
/// accepted. On failure every violation found is returned, in document order.
pub fn validate_document(document: &Value) -> Result<(), Vec<SchemaViolation>> {
    let mut walker = SchemaWalker::default();
    let root = JsonPath::root();
    if Document::is_bundle(document) {
        walker.bundle(document, &root);
    } else {
        walker.node_type(document, &root, true);
    }
    walker.finish()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct SchemaWalker {
    violations: Vec<SchemaViolation>,
}

impl SchemaWalker {
    fn finish(self) -> Result<(), Vec<SchemaViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }

    fn report(&mut self, path: JsonPath, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(path, message));
    }

    fn violate(&mut self, path: JsonPath, message: impl Into<String>, rule: Value) {
        self.violations
            .push(SchemaViolation::new(path, message).with_rule(rule));
    }

    fn object<'a>(&mut self, value: &'a Value, path: &JsonPath) -> Option<&'a Map<String, Value>> {
        match value.as_object() {
            Some(map) => Some(map),
            None => {
                self.violate(
                    path.clone(),
                    format!("expected an object, found {}", kind_of(value)),
                    json!({"type": "object"}),
                );
                None
            }
        }
    }

    fn array<'a>(&mut self, value: &'a Value, path: &JsonPath) -> Option<&'a Vec<Value>> {
        match value.as_array() {
            Some(items) => Some(items),
            None => {
                self.violate(
                    path.clone(),
                    format!("expected an array, found {}", kind_of(value)),
                    json!({"type": "array"}),
                );
                None
            }
        }
    }

    fn allowed_keys(
        &mut self,
        map: &Map<String, Value>,
        path: &JsonPath,
        allowed: &[&str],
        allow_schema: bool,
    ) {
        for key in map.keys() {
            if allowed.contains(&key.as_str()) || (allow_schema && key == SCHEMA_KEY) {
                continue;
            }
            self.violate(
                path.clone(),
                format!("additional properties are not allowed ('{}' was unexpected)", key),
                json!({"additionalProperties": false, "properties": allowed}),
            );
        }
    }

    fn required<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        path: &JsonPath,
        key: &str,
    ) -> Option<&'a Value> {
        let found = map.get(key);
        if found.is_none() {
            self.violate(
                path.clone(),
                format!("'{}' is a required property", key),
                json!({"required": [key]}),
            );
        }
        found
    }

    fn string<'a>(&mut self, value: &'a Value, path: &JsonPath) -> Option<&'a str> {
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.violate(
                    path.clone(),
                    format!("expected a string, found {}", kind_of(value)),
                    json!({"type": "string"}),
                );
                None
            }
        }
    }

    fn required_string<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        path: &JsonPath,
        key: &str,
    ) -> Option<&'a str> {
        let value = self.required(map, path, key)?;
        self.string(value, &path.key(key))
    }

    fn optional_strings(&mut self, map: &Map<String, Value>, path: &JsonPath, keys: &[&str]) {
        for key in keys {
            if let Some(value) = map.get(*key) {
                self.string(value, &path.key(key));
            }
        }
    }

    fn data_type(&mut self, value: &Value, path: &JsonPath) -> Option<DataType> {
        let name = self.string(value, path)?;
        match name.parse::<DataType>() {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.violate(path.clone(), message, data_type_rule());
                None
            }
        }
    }

    fn bundle(&mut self, value: &Value, path: &JsonPath) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, BUNDLE_KEYS, true);
        self.required_string(map, path, "name");

        if let Some(meta) = map.get("meta") {
            let meta_path = path.key("meta");
            if let Some(meta_map) = self.object(meta, &meta_path) {
                self.allowed_keys(meta_map, &meta_path, META_KEYS, false);
                self.optional_strings(meta_map, &meta_path, META_KEYS);
            }
        }

        let Some(types) = self.required(map, path, "types") else {
            return;
        };
        let types_path = path.key("types");
        let Some(items) = self.array(types, &types_path) else {
            return;
        };
        if items.is_empty() {
            self.violate(
                types_path.clone(),
                "a bundle needs at least one type",
                json!({"type": "array", "minItems": 1}),
            );
        }
        let mut seen = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            let item_path = types_path.index(i);
            self.node_type(item, &item_path, false);
            if let Some(name) = item.get("name").and_then(Value::as_str) {
                if !seen.insert(name) {
                    self.report(
                        item_path.key("name"),
                        format!("node type '{}' is declared more than once", name),
                    );
                }
            }
        }
    }

    fn node_type(&mut self, value: &Value, path: &JsonPath, top_level: bool) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, NODE_TYPE_KEYS, top_level);
        self.required_string(map, path, "name");
        self.required_string(map, path, "category");
        self.optional_strings(
            map,
            path,
            &["description", "author", "url", "license", "version"],
        );

        if let Some(private) = map.get("private_data_type") {
            let private_path = path.key("private_data_type");
            if let Some(name) = self.string(private, &private_path) {
                if !is_c_identifier(name) {
                    self.violate(
                        private_path,
                        format!("'{}' is not a C identifier", name),
                        c_identifier_rule(),
                    );
                }
            }
        }
        if let Some(methods) = map.get("methods") {
            self.symbol_table(methods, &path.key("methods"), NODE_METHOD_KEYS);
        }
        if let Some(options) = map.get("options") {
            self.options(options, &path.key("options"));
        }
        if let Some(ports) = map.get("in_ports") {
            self.ports(ports, &path.key("in_ports"), IN_PORT_KEYS, IN_PORT_METHOD_KEYS);
        }
        if let Some(ports) = map.get("out_ports") {
            self.ports(ports, &path.key("out_ports"), OUT_PORT_KEYS, OUT_PORT_METHOD_KEYS);
        }
        if let Some(extension) = map.get("node_type") {
            self.extension(extension, &path.key("node_type"));
        }
    }

    /// Object whose values all name C symbols.
    fn symbol_table(&mut self, value: &Value, path: &JsonPath, allowed: &[&str]) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, allowed, false);
        for (key, symbol) in map {
            let symbol_path = path.key(key);
            if let Some(name) = self.string(symbol, &symbol_path) {
                if !is_c_identifier(name) {
                    self.violate(
                        symbol_path,
                        format!("'{}' is not a C identifier", name),
                        c_identifier_rule(),
                    );
                }
            }
        }
    }

    fn options(&mut self, value: &Value, path: &JsonPath) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, OPTIONS_KEYS, false);

        if let Some(version) = self.required(map, path, "version") {
            if !version.as_u64().is_some_and(|v| (1..=u64::from(u32::MAX)).contains(&v)) {
                self.violate(
                    path.key("version"),
                    format!("{} is not a valid options version (integer >= 1)", version),
                    json!({"type": "integer", "minimum": 1}),
                );
            }
        }
        if let Some(methods) = map.get("methods") {
            self.symbol_table(methods, &path.key("methods"), OPTIONS_METHOD_KEYS);
        }

        let Some(members) = map.get("members") else {
            return;
        };
        let members_path = path.key("members");
        let Some(items) = self.array(members, &members_path) else {
            return;
        };
        let mut seen = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            let member_path = members_path.index(i);
            self.option_member(item, &member_path);
            if let Some(name) = item.get("name").and_then(Value::as_str) {
                if !seen.insert(name) {
                    self.report(
                        member_path.key("name"),
                        format!("option member '{}' is declared more than once", name),
                    );
                }
            }
        }
    }

    fn option_member(&mut self, value: &Value, path: &JsonPath) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, MEMBER_KEYS, false);
        self.optional_strings(map, path, &["description"]);

        if let Some(name) = self.required_string(map, path, "name") {
            if !is_c_identifier(name) {
                self.violate(
                    path.key("name"),
                    format!("'{}' is not a C identifier", name),
                    c_identifier_rule(),
                );
            }
        }

        let Some(raw_type) = self.required(map, path, "data_type") else {
            return;
        };
        let type_path = path.key("data_type");
        let Some(data_type) = self.data_type(raw_type, &type_path) else {
            return;
        };
        if data_type.option_c_type().is_none() {
            self.violate(
                type_path,
                format!(
                    "'{}' is not one of {}",
                    data_type,
                    DataType::OPTION_TYPES.join(", ")
                ),
                json!({"enum": DataType::OPTION_TYPES}),
            );
            return;
        }
        if let Some(default) = map.get("default") {
            if let Err(message) = DefaultValue::from_json(&data_type, default) {
                self.report(path.key("default"), message);
            }
        }
    }

    fn ports(&mut self, value: &Value, path: &JsonPath, keys: &[&str], method_keys: &[&str]) {
        let Some(items) = self.array(value, path) else {
            return;
        };
        let mut seen = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            let port_path = path.index(i);
            let Some(map) = self.object(item, &port_path) else {
                continue;
            };
            self.allowed_keys(map, &port_path, keys, false);
            self.optional_strings(map, &port_path, &["description", "flags"]);

            if let Some(name) = self.required_string(map, &port_path, "name") {
                if !is_port_name(name) {
                    self.violate(
                        port_path.key("name"),
                        format!("'{}' does not match '{}'", name, PORT_NAME_PATTERN),
                        json!({"type": "string", "pattern": PORT_NAME_PATTERN}),
                    );
                } else if !seen.insert(port_name_and_size(name).0) {
                    self.report(
                        port_path.key("name"),
                        format!("port '{}' is declared more than once", name),
                    );
                }
            }
            if let Some(raw_type) = map.get("data_type") {
                self.data_type(raw_type, &port_path.key("data_type"));
            }
            if let Some(required) = map.get("required") {
                if !required.is_boolean() {
                    self.violate(
                        port_path.key("required"),
                        format!("expected a boolean, found {}", kind_of(required)),
                        json!({"type": "boolean"}),
                    );
                }
            }
            if let Some(methods) = map.get("methods") {
                self.symbol_table(methods, &port_path.key("methods"), method_keys);
            }
        }
    }

    fn extension(&mut self, value: &Value, path: &JsonPath) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        self.allowed_keys(map, path, EXTENSION_KEYS, false);
        self.required_string(map, path, "data_type");

        if let Some(access) = map.get("access") {
            let access_path = path.key("access");
            if let Some(items) = self.array(access, &access_path) {
                for (i, item) in items.iter().enumerate() {
                    let item_path = access_path.index(i);
                    if let Some(member) = self.string(item, &item_path) {
                        if !is_c_identifier(member) {
                            self.violate(
                                item_path,
                                format!("'{}' is not a C identifier", member),
                                c_identifier_rule(),
                            );
                        }
                    }
                }
            }
        }
        if let Some(extra) = map.get("extra_methods") {
            self.extra_methods(extra, &path.key("extra_methods"));
        }
    }

    fn extra_methods(&mut self, value: &Value, path: &JsonPath) {
        let Some(map) = self.object(value, path) else {
            return;
        };
        for (key, entry) in map {
            let entry_path = path.key(key);
            if !is_c_identifier(key) {
                self.violate(
                    entry_path.clone(),
                    format!("'{}' is not a C identifier", key),
                    json!({"propertyNames": {"pattern": C_IDENTIFIER_PATTERN}}),
                );
            }
            match entry {
                Value::String(_) => {}
                Value::Object(_) => self.extra_methods(entry, &entry_path),
                other => self.violate(
                    entry_path,
                    format!("expected a string or an object, found {}", kind_of(other)),
                    json!({"type": ["string", "object"]}),
                ),
            }
        }
    }
}
