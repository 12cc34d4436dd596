// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed form of node-type description documents.
//!
//! These structs are only built from documents that already passed
//! [`validate_document`](crate::descriptor::validate_document), so the serde
//! layer stays permissive and the schema walker owns every user facing
//! complaint.

use crate::descriptor::naming::port_name_and_size;
use crate::descriptor::{DataType, DefaultValue};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One node type, as written in a description file.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTypeDescription {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub license: Option<String>,
    pub version: Option<String>,
    pub options: Option<OptionsSpec>,
    pub in_ports: Option<Vec<PortSpec>>,
    pub out_ports: Option<Vec<PortSpec>>,
    #[serde(default)]
    pub methods: NodeMethods,
    pub private_data_type: Option<String>,
    pub node_type: Option<NodeTypeExtension>,
}

impl NodeTypeDescription {
    pub fn in_ports(&self) -> &[PortSpec] {
        self.in_ports.as_deref().unwrap_or_default()
    }

    pub fn out_ports(&self) -> &[PortSpec] {
        self.out_ports.as_deref().unwrap_or_default()
    }

    pub fn option_members(&self) -> &[OptionMember] {
        self.options
            .as_ref()
            .map(|o| o.members.as_slice())
            .unwrap_or_default()
    }

    pub fn uses_float(&self) -> bool {
        self.option_members()
            .iter()
            .any(|m| m.data_type == DataType::Float)
    }
}

/// Node level C callbacks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeMethods {
    pub open: Option<String>,
    pub close: Option<String>,
    pub init_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionsSpec {
    pub version: u32,
    #[serde(default)]
    pub members: Vec<OptionMember>,
    #[serde(default)]
    pub methods: OptionsMethods,
}

/// Custom option constructors. A missing entry makes the generator emit its
/// own implementation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsMethods {
    pub new: Option<String>,
    pub free: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOptionMember {
    name: String,
    data_type: DataType,
    description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
}

/// Keeps `"default": null` apart from a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A member of a node type's options struct. Members without a default are
/// required.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawOptionMember")]
pub struct OptionMember {
    pub name: String,
    pub data_type: DataType,
    pub description: Option<String>,
    pub default: Option<DefaultValue>,
    /// The default as written, used in header documentation. An explicit
    /// `null` is kept as `Some(Value::Null)`.
    pub default_json: Option<Value>,
}

impl OptionMember {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl TryFrom<RawOptionMember> for OptionMember {
    type Error = String;

    fn try_from(raw: RawOptionMember) -> Result<Self, Self::Error> {
        let default = raw
            .default
            .as_ref()
            .map(|value| DefaultValue::from_json(&raw.data_type, value))
            .transpose()
            .map_err(|e| format!("option '{}': {}", raw.name, e))?;
        Ok(Self {
            name: raw.name,
            data_type: raw.data_type,
            description: raw.description,
            default,
            default_json: raw.default,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortMethods {
    pub process: Option<String>,
    pub connect: Option<String>,
    pub disconnect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortSpec {
    pub name: String,
    /// Missing on ports that carry no data; see [`PortSpec::packet_data_type`]
    pub data_type: Option<DataType>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub flags: Option<String>,
    #[serde(default)]
    pub methods: PortMethods,
    /// Marks ports exported from an inner flow; they have no port type of
    /// their own.
    #[serde(rename = "type")]
    pub exported: Option<Value>,
}

static EMPTY_PACKET: DataType = DataType::Empty;

impl PortSpec {
    /// Declared data type, `empty` when the port has none.
    pub fn packet_data_type(&self) -> &DataType {
        self.data_type.as_ref().unwrap_or(&EMPTY_PACKET)
    }

    /// Port name without the array suffix.
    pub fn base_name(&self) -> String {
        port_name_and_size(&self.name).0
    }

    /// Declared array size, 0 for plain ports.
    pub fn array_size(&self) -> usize {
        port_name_and_size(&self.name).1
    }

    /// Number of port indices this port occupies.
    pub fn slots(&self) -> usize {
        self.array_size().max(1)
    }

    pub fn is_exported(&self) -> bool {
        self.exported.is_some()
    }
}

/// Wrapping of the base node type inside a larger C struct.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTypeExtension {
    pub data_type: String,
    #[serde(default)]
    pub access: Vec<String>,
    #[serde(default)]
    pub extra_methods: IndexMap<String, ExtraMethod>,
}

/// Designated initializer value of an extra member: a symbol or a nested
/// struct of further members.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtraMethod {
    Symbol(String),
    Group(IndexMap<String, ExtraMethod>),
}

/// Fallback metadata for every type of a bundle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleMeta {
    pub author: Option<String>,
    pub license: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleSpec {
    pub name: String,
    #[serde(default)]
    pub meta: BundleMeta,
    pub types: Vec<NodeTypeDescription>,
}

/// Top level shape of a description file.
#[derive(Debug, Clone)]
pub enum Document {
    Single(NodeTypeDescription),
    Bundle(BundleSpec),
}

impl Document {
    /// Bundles are recognised by their `types` list.
    pub fn is_bundle(value: &Value) -> bool {
        value.get("types").is_some()
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if Self::is_bundle(&value) {
            serde_json::from_value(value).map(Document::Bundle)
        } else {
            serde_json::from_value(value).map(Document::Single)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_ports_and_options() {
        let doc = json!({
            "name": "timer",
            "category": "timer",
            "options": {
                "version": 1,
                "members": [
                    {"name": "interval", "data_type": "int", "default": 1000},
                    {"name": "label", "data_type": "string"}
                ]
            },
            "in_ports": [
                {"name": "IN[4]", "data_type": "boolean", "methods": {"process": "on_in"}},
                {"name": "EXPORTED", "data_type": "any", "type": "exported"}
            ]
        });
        let node: NodeTypeDescription = serde_json::from_value(doc).unwrap();
        let members = node.option_members();
        assert_eq!(members.len(), 2);
        assert!(!members[0].is_required());
        assert!(members[1].is_required());

        let ports = node.in_ports();
        assert_eq!(ports[0].base_name(), "IN");
        assert_eq!(ports[0].slots(), 4);
        assert_eq!(ports[0].methods.process.as_deref(), Some("on_in"));
        assert!(ports[1].is_exported());
        assert_eq!(ports[1].slots(), 1);
        assert!(node.out_ports().is_empty());
    }

    #[test]
    fn untyped_ports_default_to_empty() {
        let port: PortSpec = serde_json::from_value(json!({"name": "TICK"})).unwrap();
        assert!(port.data_type.is_none());
        assert_eq!(port.packet_data_type(), &DataType::Empty);

        let typed: PortSpec =
            serde_json::from_value(json!({"name": "IN", "data_type": "int"})).unwrap();
        assert_eq!(typed.packet_data_type(), &DataType::Int);
    }

    #[test]
    fn null_default_is_not_a_missing_default() {
        let node: NodeTypeDescription = serde_json::from_value(json!({
            "name": "n",
            "category": "c",
            "options": {"version": 1, "members": [
                {"name": "label", "data_type": "string", "default": null}
            ]}
        }))
        .unwrap();
        let member = &node.option_members()[0];
        assert!(!member.is_required());
        assert_eq!(member.default, Some(DefaultValue::String(None)));
        assert_eq!(member.default_json, Some(Value::Null));
    }

    #[test]
    fn extra_methods_keep_nesting_and_order() {
        let ext: NodeTypeExtension = serde_json::from_value(json!({
            "data_type": "struct my_type",
            "access": ["base"],
            "extra_methods": {
                "zeta": "zeta_fn",
                "group": {"inner": "inner_fn"},
                "alpha": "alpha_fn"
            }
        }))
        .unwrap();
        let keys: Vec<&String> = ext.extra_methods.keys().collect();
        assert_eq!(keys, ["zeta", "group", "alpha"]);
        assert!(matches!(ext.extra_methods["group"], ExtraMethod::Group(_)));
    }

    #[test]
    fn detects_bundles() {
        let bundle = Document::from_value(json!({
            "name": "pack",
            "types": [{"name": "pack/one", "category": "misc"}]
        }))
        .unwrap();
        assert!(matches!(bundle, Document::Bundle(_)));
        let single = Document::from_value(json!({"name": "one", "category": "misc"})).unwrap();
        assert!(matches!(single, Document::Single(_)));
    }

    #[test]
    fn mismatched_default_fails_decoding() {
        let result: Result<OptionMember, _> =
            serde_json::from_value(json!({"name": "on", "data_type": "boolean", "default": 3}));
        assert!(result.is_err());
    }
}
