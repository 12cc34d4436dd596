// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! OIC resource schema loading.
//!
//! Resource schemas are JSON Schema documents whose `definitions` describe
//! resource types. References between files (`$ref` and `allOf` lists of
//! `$ref`s) are resolved by merging the referenced definition into the
//! referencing object, and every property is annotated with the flags the
//! generators need:
//!
//! * `read_only`: the description starts with `ReadOnly,`
//! * `required`: listed in the document's top level `required`
//! * `short_description`: the description without the `ReadOnly,` marker

use crate::errors::OicError;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const JSON_SCHEMA_PREFIX: &str = "http://json-schema.org/";
const READ_ONLY_MARKER: &str = "ReadOnly,";

/// Resource definitions of one schema file, keyed by resource type.
pub type Definitions = Map<String, Value>;

/// Loads schema files, caching each file's processed definitions for the
/// lifetime of the loader.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    cache: HashMap<PathBuf, Definitions>,
    loading: HashSet<PathBuf>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `file` from `dir` with every reference expanded.
    pub fn load(&mut self, dir: &Path, file: &str) -> Result<Definitions, OicError> {
        let path = dir.join(file);
        if let Some(cached) = self.cache.get(&path) {
            return Ok(cached.clone());
        }
        if !self.loading.insert(path.clone()) {
            return Err(OicError::ReferenceCycle { path });
        }
        let result = self.load_uncached(dir, file, &path);
        self.loading.remove(&path);

        let definitions = result?;
        self.cache.insert(path, definitions.clone());
        Ok(definitions)
    }

    fn load_uncached(&mut self, dir: &Path, file: &str, path: &Path) -> Result<Definitions, OicError> {
        let contents = fs::read_to_string(path).map_err(|source| OicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&contents).map_err(|source| OicError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json_schema = document
            .get("$schema")
            .and_then(Value::as_str)
            .is_some_and(|s| s.starts_with(JSON_SCHEMA_PREFIX));
        if !is_json_schema {
            return Err(OicError::NotJsonSchema {
                path: path.to_path_buf(),
            });
        }

        let mut definitions = match document.get("definitions") {
            Some(Value::Object(map)) if !map.is_empty() => map.clone(),
            _ => {
                return Err(OicError::EmptyDefinitions {
                    path: path.to_path_buf(),
                })
            }
        };

        let title = document
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| title_from_file_name(file));
        let required: HashSet<&str> = document
            .get("required")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        for definition in definitions.values_mut() {
            let Value::Object(definition) = definition else {
                continue;
            };
            self.merge_property_reference(dir, definition)?;
            self.expand(dir, definition)?;
            if let Some(Value::Object(properties)) = definition.get_mut("properties") {
                for (field, property) in properties.iter_mut() {
                    if let Value::Object(property) = property {
                        annotate_property(property, required.contains(field.as_str()));
                    }
                }
            }
            definition.insert("title".to_string(), Value::String(title.clone()));
        }
        Ok(definitions)
    }

    /// A `$ref` inside `properties` pulls the referenced definition's
    /// properties in next to the local ones.
    fn merge_property_reference(&mut self, dir: &Path, definition: &mut Map<String, Value>) -> Result<(), OicError> {
        let reference = match definition.get("properties").and_then(|p| p.get("$ref")) {
            Some(Value::String(reference)) => reference.clone(),
            _ => return Ok(()),
        };
        let mut merged = Map::new();
        self.merge_reference(dir, &mut merged, &reference)?;
        if let Some(Value::Object(properties)) = definition.get_mut("properties") {
            properties.remove("$ref");
            if let Some(Value::Object(referenced)) = merged.remove("properties") {
                properties.extend(referenced);
            }
        }
        Ok(())
    }

    /// Resolve `allOf` and `$ref` in `schema` and every nested object except
    /// array schemas.
    fn expand(&mut self, dir: &Path, schema: &mut Map<String, Value>) -> Result<(), OicError> {
        if let Some(all_of) = schema.remove("allOf") {
            for entry in all_of.as_array().map(Vec::as_slice).unwrap_or_default() {
                let reference = entry
                    .get("$ref")
                    .and_then(Value::as_str)
                    .ok_or(OicError::AllOfWithoutRef)?;
                self.merge_reference(dir, schema, reference)?;
            }
        }
        if let Some(reference) = schema.remove("$ref") {
            let reference = reference.as_str().ok_or_else(|| OicError::BadReference {
                reference: reference.to_string(),
            })?;
            self.merge_reference(dir, schema, reference)?;
        }
        for value in schema.values_mut() {
            if let Value::Object(nested) = value {
                if nested.get("type").and_then(Value::as_str) != Some("array") {
                    self.expand(dir, nested)?;
                }
            }
        }
        Ok(())
    }

    /// Merge the definition named by `path#/definitions/name` into `target`.
    fn merge_reference(&mut self, dir: &Path, target: &mut Map<String, Value>, reference: &str) -> Result<(), OicError> {
        let bad_reference = || OicError::BadReference {
            reference: reference.to_string(),
        };
        let (file, link) = reference.split_once('#').ok_or_else(bad_reference)?;
        let name = link.rsplit('/').next().filter(|n| !n.is_empty()).ok_or_else(bad_reference)?;
        if file.is_empty() {
            return Err(bad_reference());
        }

        let definitions = self.load(dir, file)?;
        match definitions.get(name) {
            Some(Value::Object(definition)) => {
                target.extend(definition.clone());
                Ok(())
            }
            _ => Err(OicError::MissingDefinition {
                path: dir.join(file),
                name: name.to_string(),
            }),
        }
    }
}

fn annotate_property(property: &mut Map<String, Value>, required: bool) {
    let description = property.get("description").and_then(Value::as_str).map(str::to_string);
    let read_only = description
        .as_deref()
        .is_some_and(|d| d.starts_with(READ_ONLY_MARKER));
    let short_description = match description {
        Some(d) if read_only => Value::String(d[READ_ONLY_MARKER.len()..].trim().to_string()),
        Some(d) => Value::String(d),
        None => Value::Null,
    };
    property.insert("read_only".to_string(), Value::Bool(read_only));
    property.insert("required".to_string(), Value::Bool(required));
    property.insert("short_description".to_string(), short_description);
}

/// `oic.r.light.brightness.json` becomes `Light Brightness`.
pub fn title_from_file_name(file: &str) -> String {
    let stem = file
        .strip_prefix("oic.r.")
        .or_else(|| file.strip_prefix("core."))
        .unwrap_or(file);
    let stem = stem.strip_suffix(".json").unwrap_or(stem);
    title_case(&stem.replace('.', " "))
}

/// Upper case the first letter of every run of letters, lower case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, value: Value) {
        fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    fn base_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "definitions": {
                "oic.core": {
                    "properties": {
                        "n": {"type": "string", "description": "ReadOnly, Friendly name"}
                    }
                }
            }
        })
    }

    #[test]
    fn derives_title_from_file_name() {
        assert_eq!(title_from_file_name("oic.r.light.brightness.json"), "Light Brightness");
        assert_eq!(title_from_file_name("core.light.json"), "Light");
        assert_eq!(title_from_file_name("oic.r.audio-LEVEL.json"), "Audio-Level");
    }

    #[test]
    fn annotates_properties() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "oic.r.switch.binary.json",
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "required": ["value"],
                "definitions": {
                    "oic.r.switch.binary": {
                        "type": "object",
                        "properties": {
                            "value": {"type": "boolean", "description": "Status of the switch"},
                            "id": {"type": "string", "description": "ReadOnly,   Instance ID"}
                        }
                    }
                }
            }),
        );
        let definitions = SchemaLoader::new().load(dir.path(), "oic.r.switch.binary.json").unwrap();
        let definition = &definitions["oic.r.switch.binary"];
        assert_eq!(definition["title"], "Switch Binary");
        let value = &definition["properties"]["value"];
        assert_eq!(value["read_only"], false);
        assert_eq!(value["required"], true);
        let id = &definition["properties"]["id"];
        assert_eq!(id["read_only"], true);
        assert_eq!(id["short_description"], "Instance ID");
    }

    #[test]
    fn merges_all_of_references() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "oic.core.json", base_schema());
        write(
            dir.path(),
            "oic.r.light.json",
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "title": "Light",
                "definitions": {
                    "oic.r.light": {
                        "type": "object",
                        "allOf": [{"$ref": "oic.core.json#/definitions/oic.core"}]
                    }
                }
            }),
        );
        let definitions = SchemaLoader::new().load(dir.path(), "oic.r.light.json").unwrap();
        let light = definitions["oic.r.light"].as_object().unwrap();
        assert!(!light.contains_key("allOf"));
        assert_eq!(light["type"], "object");
        assert_eq!(light["properties"]["n"]["read_only"], true);
        assert_eq!(light["title"], "Light");
    }

    #[test]
    fn merges_property_references() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "oic.core.json", base_schema());
        write(
            dir.path(),
            "oic.r.fan.json",
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "definitions": {
                    "oic.r.fan": {
                        "type": "object",
                        "properties": {
                            "$ref": "oic.core.json#/definitions/oic.core",
                            "speed": {"type": "integer", "description": "Fan speed"}
                        }
                    }
                }
            }),
        );
        let definitions = SchemaLoader::new().load(dir.path(), "oic.r.fan.json").unwrap();
        let properties = definitions["oic.r.fan"]["properties"].as_object().unwrap();
        assert!(!properties.contains_key("$ref"));
        assert!(properties.contains_key("n"));
        assert!(properties.contains_key("speed"));
    }

    #[test]
    fn rejects_non_schemas_and_bad_references() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", json!({"$schema": "http://example.com/", "definitions": {"x": {}}}));
        write(dir.path(), "b.json", json!({"$schema": "http://json-schema.org/", "definitions": {}}));
        write(
            dir.path(),
            "c.json",
            json!({"$schema": "http://json-schema.org/", "definitions": {"x": {"allOf": [{"type": "object"}]}}}),
        );
        write(
            dir.path(),
            "d.json",
            json!({"$schema": "http://json-schema.org/", "definitions": {"x": {"$ref": "d.json#/definitions/x"}}}),
        );

        let mut loader = SchemaLoader::new();
        assert!(matches!(loader.load(dir.path(), "a.json"), Err(OicError::NotJsonSchema { .. })));
        assert!(matches!(loader.load(dir.path(), "b.json"), Err(OicError::EmptyDefinitions { .. })));
        assert!(matches!(loader.load(dir.path(), "c.json"), Err(OicError::AllOfWithoutRef)));
        assert!(matches!(loader.load(dir.path(), "d.json"), Err(OicError::ReferenceCycle { .. })));
        assert!(matches!(loader.load(dir.path(), "missing.json"), Err(OicError::Io { .. })));
    }
}
