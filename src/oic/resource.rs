// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resource definitions translated into the shapes the emitters consume.

use crate::errors::OicError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

const RESOURCE_PREFIXES: &[&str] = &["oic.r.", "core."];

/// Property value kinds that map onto flow packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Integer,
    Number,
    String,
    Boolean,
    /// String values restricted to a closed set
    Enum(Vec<String>),
}

impl PropertyKind {
    fn from_json_type(property: &str, kind: &str) -> Result<Self, OicError> {
        match kind {
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            other => Err(OicError::UnsupportedProperty {
                property: property.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// C type of the state struct field.
    pub fn c_type(&self, state_struct: &str, field: &str) -> String {
        match self {
            Self::Integer => "int32_t".to_string(),
            Self::Number => "double".to_string(),
            Self::String => "char *".to_string(),
            Self::Boolean => "bool".to_string(),
            Self::Enum(_) => format!("enum {}_{}", state_struct, field),
        }
    }

    /// Initial field value set by `open`.
    pub fn c_initializer(&self, state_struct: &str, field: &str) -> String {
        match self {
            Self::Integer => "0".to_string(),
            Self::Number => "0.0f".to_string(),
            Self::String => "NULL".to_string(),
            Self::Boolean => "false".to_string(),
            Self::Enum(_) => format!("(enum {}_{})0", state_struct, field),
        }
    }

    /// `check_updated_*` helper comparing old and new values.
    pub fn check_updated(&self) -> &'static str {
        match self {
            Self::Integer | Self::Enum(_) => "check_updated_int32",
            Self::Number => "check_updated_number",
            Self::String => "check_updated_string",
            Self::Boolean => "check_updated_boolean",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}

/// One resource property, name already cleaned for C.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    /// Declared JSON type, used for ordering and equivalence
    pub type_key: String,
    /// Flow packet type of the node-type ports
    pub port_data_type: &'static str,
    pub read_only: bool,
    pub required: bool,
    pub short_description: Option<String>,
}

impl Property {
    fn from_schema(raw_name: &str, schema: &Value) -> Result<Self, OicError> {
        let declared = schema.get("type").and_then(Value::as_str);
        let kind = match schema.get("enum") {
            Some(Value::Array(values)) => {
                let values = values
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| OicError::UnsupportedProperty {
                        property: raw_name.to_string(),
                        kind: "enum".to_string(),
                    })?;
                PropertyKind::Enum(values)
            }
            _ => match declared {
                Some(kind) => PropertyKind::from_json_type(raw_name, kind)?,
                None => {
                    return Err(OicError::UnknownPropertyType {
                        property: raw_name.to_string(),
                    })
                }
            },
        };
        let type_key = match (declared, &kind) {
            (Some(declared), _) => declared.to_string(),
            (None, PropertyKind::Enum(values)) => format!("enum:{}", values.join(",")),
            (None, _) => String::new(),
        };
        let port_data_type = match declared {
            Some("integer") => "int",
            Some("number") => "float",
            Some("boolean") => "boolean",
            _ => "string",
        };

        Ok(Self {
            name: clean_name(raw_name),
            kind,
            type_key,
            port_data_type,
            read_only: schema.get("read_only").and_then(Value::as_bool).unwrap_or(false),
            required: schema.get("required").and_then(Value::as_bool).unwrap_or(false),
            short_description: schema
                .get("short_description")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Description used in comments and port docs.
    pub fn doc(&self) -> &str {
        self.short_description.as_deref().unwrap_or("???")
    }

    /// Flow port name, e.g. `targetValue` becomes `TARGET_VALUE`.
    pub fn port_name(&self) -> String {
        port_name(&self.name)
    }
}

/// C and flow names derived from the resource type and the bundle name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub client_node: String,
    pub server_node: String,
    pub client_struct: String,
    pub server_struct: String,
    pub state_struct: String,
}

impl ResourceNames {
    pub fn new(resource_type: &str, json_name: &str) -> Self {
        let short = strip_resource_prefix(resource_type).unwrap_or(resource_type);
        let c_id = short.replace(['.', '-'], "_").to_lowercase();
        let c_json = json_name.replace(['.', '-'], "_").to_lowercase();
        let flow_id = short.replace(['.', '_'], "-").to_lowercase();
        let flow_json = json_name.replace(['.', '_'], "-").to_lowercase();

        Self {
            client_node: format!("{}/client-{}", flow_json, flow_id),
            server_node: format!("{}/server-{}", flow_json, flow_id),
            client_struct: format!("{}_client_{}", c_json, c_id),
            server_struct: format!("{}_server_{}", c_json, c_id),
            state_struct: format!("{}_state_{}", c_json, c_id),
        }
    }
}

/// An object resource ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Full resource type, e.g. `oic.r.light.brightness`
    pub resource_type: String,
    pub title: String,
    /// Sorted by declared type, then name
    pub properties: Vec<Property>,
    pub names: ResourceNames,
}

impl Resource {
    /// Translate one processed definition. Definitions that are not objects
    /// generate nothing.
    pub fn from_definition(resource_type: &str, definition: &Value, json_name: &str) -> Result<Option<Self>, OicError> {
        if strip_resource_prefix(resource_type).is_none() {
            return Err(OicError::NotOicResource {
                name: resource_type.to_string(),
            });
        }
        if definition.get("type").and_then(Value::as_str) != Some("object") {
            return Ok(None);
        }
        let raw_properties = definition
            .get("properties")
            .and_then(Value::as_object)
            .filter(|properties| !properties.is_empty())
            .ok_or_else(|| OicError::NoProperties {
                name: resource_type.to_string(),
            })?;

        let mut sortable: Vec<(&String, &Value)> = raw_properties.iter().collect();
        sortable.sort_by_cached_key(|(name, schema)| format!("{} {}", sort_type(schema), name));
        let properties = sortable
            .into_iter()
            .map(|(name, schema)| Property::from_schema(name, schema))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self {
            resource_type: resource_type.to_string(),
            title: definition
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(resource_type)
                .to_string(),
            properties,
            names: ResourceNames::new(resource_type, json_name),
        }))
    }

    pub fn all_read_only(&self) -> bool {
        self.properties.iter().all(|p| p.read_only)
    }

    /// Properties a client may write.
    pub fn writable(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| !p.read_only)
    }

    /// Property names and type keys, the identity used to share generated
    /// functions between resources.
    pub fn signature(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .map(|p| (p.name.clone(), p.type_key.clone()))
            .collect()
    }
}

/// Resources of one schema file and the error that cut it short, if any.
#[derive(Debug, Default)]
pub struct SchemaResources {
    pub resources: Vec<Resource>,
    pub error: Option<OicError>,
}

/// Translate the definitions of one schema file in order. The first failing
/// definition stops the file; resources translated before it are kept.
pub fn translate_definitions(definitions: &Map<String, Value>, json_name: &str) -> SchemaResources {
    let mut translated = SchemaResources::default();
    for (resource_type, definition) in definitions {
        match Resource::from_definition(resource_type, definition, json_name) {
            Ok(Some(resource)) => translated.resources.push(resource),
            Ok(None) => {}
            Err(error) => {
                translated.error = Some(error);
                break;
            }
        }
    }
    translated
}

fn sort_type(schema: &Value) -> String {
    if let Some(kind) = schema.get("type").and_then(Value::as_str) {
        return kind.to_string();
    }
    match schema.get("enum").and_then(Value::as_array) {
        Some(values) => {
            let values: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
            format!("enum:{}", values.join(","))
        }
        None => String::new(),
    }
}

fn strip_resource_prefix(resource_type: &str) -> Option<&str> {
    RESOURCE_PREFIXES
        .iter()
        .find_map(|prefix| resource_type.strip_prefix(prefix))
}

/// Replace every run of non-word characters with `_`.
pub fn clean_name(name: &str) -> String {
    NON_WORD.replace_all(name, "_").into_owned()
}

/// Insert `_` before each run of capitals (except one at the very start),
/// then upper-case. `portName` becomes `PORT_NAME`, `ID` becomes `I_D`.
pub fn port_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && (i == 1 || !chars[i - 1].is_ascii_uppercase()) {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}
