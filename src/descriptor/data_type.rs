// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Packet data types that ports and options can declare.
//!
//! The set is closed: every name a description may use maps to exactly one
//! variant, and the C spelling of each variant lives here so the emitters
//! never branch on raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CUSTOM_PREFIX: &str = "custom:";
const COMPOSED_PREFIX: &str = "composed:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    Empty,
    Any,
    Boolean,
    Byte,
    Int,
    Float,
    Rgb,
    String,
    Blob,
    Error,
    JsonObject,
    JsonArray,
    Timestamp,
    DirectionVector,
    Location,
    HttpResponse,
    /// `custom:NAME`, a packet type defined by the module itself
    Custom(String),
    /// `composed:a,b,...`, a packet bundling other packets
    Composed(Vec<DataType>),
}

impl DataType {
    const SIMPLE: [(&'static str, DataType); 16] = [
        ("empty", DataType::Empty),
        ("any", DataType::Any),
        ("boolean", DataType::Boolean),
        ("byte", DataType::Byte),
        ("int", DataType::Int),
        ("float", DataType::Float),
        ("rgb", DataType::Rgb),
        ("string", DataType::String),
        ("blob", DataType::Blob),
        ("error", DataType::Error),
        ("json-object", DataType::JsonObject),
        ("json-array", DataType::JsonArray),
        ("timestamp", DataType::Timestamp),
        ("direction-vector", DataType::DirectionVector),
        ("location", DataType::Location),
        ("http-response", DataType::HttpResponse),
    ];

    /// Types allowed for option members.
    pub const OPTION_TYPES: [&'static str; 6] = ["boolean", "byte", "int", "float", "rgb", "string"];

    /// Names of the types that take no `custom:`/`composed:` argument.
    pub fn simple_names() -> Vec<&'static str> {
        Self::SIMPLE.iter().map(|(name, _)| *name).collect()
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, DataType::Custom(_))
    }

    pub fn is_composed(&self) -> bool {
        matches!(self, DataType::Composed(_))
    }

    /// C type of an option member holding this type.
    pub fn option_c_type(&self) -> Option<&'static str> {
        match self {
            DataType::Boolean => Some("bool"),
            DataType::Byte => Some("unsigned char"),
            DataType::Int => Some("struct sol_irange"),
            DataType::Float => Some("struct sol_drange"),
            DataType::Rgb => Some("struct sol_rgb"),
            DataType::String => Some("const char *"),
            _ => None,
        }
    }

    /// Member of the `defvalue` union in option descriptions.
    pub fn default_member(&self) -> &'static str {
        match self {
            DataType::Boolean => "b",
            DataType::Byte => "byte",
            DataType::Int => "i",
            DataType::Float => "f",
            DataType::String => "s",
            DataType::Rgb => "rgb",
            _ => "ptr",
        }
    }

    /// C expression naming the packet type. `owner_c` is the node type
    /// C name, used to reach composed packet type getters.
    pub fn packet_type_c(&self, owner_c: &str) -> String {
        let simple = match self {
            DataType::Empty => "SOL_FLOW_PACKET_TYPE_EMPTY",
            DataType::Any => "SOL_FLOW_PACKET_TYPE_ANY",
            DataType::Boolean => "SOL_FLOW_PACKET_TYPE_BOOLEAN",
            DataType::Byte => "SOL_FLOW_PACKET_TYPE_BYTE",
            DataType::Int => "SOL_FLOW_PACKET_TYPE_IRANGE",
            DataType::Float => "SOL_FLOW_PACKET_TYPE_DRANGE",
            DataType::Rgb => "SOL_FLOW_PACKET_TYPE_RGB",
            DataType::String => "SOL_FLOW_PACKET_TYPE_STRING",
            DataType::Blob => "SOL_FLOW_PACKET_TYPE_BLOB",
            DataType::Error => "SOL_FLOW_PACKET_TYPE_ERROR",
            DataType::JsonObject => "SOL_FLOW_PACKET_TYPE_JSON_OBJECT",
            DataType::JsonArray => "SOL_FLOW_PACKET_TYPE_JSON_ARRAY",
            DataType::Timestamp => "SOL_FLOW_PACKET_TYPE_TIMESTAMP",
            DataType::DirectionVector => "SOL_FLOW_PACKET_TYPE_DIRECTION_VECTOR",
            DataType::Location => "SOL_FLOW_PACKET_TYPE_LOCATION",
            DataType::HttpResponse => "SOL_FLOW_PACKET_TYPE_HTTP_RESPONSE",
            DataType::Custom(name) => return name.clone(),
            DataType::Composed(members) => {
                return format!(
                    "{}_get_composed_{}_packet_type()",
                    owner_c,
                    composed_suffix(members)
                )
            }
        };
        simple.to_string()
    }

    /// C declaration prefix used for local variables receiving a packet
    /// value in generated stubs.
    pub fn stub_c_type(&self) -> String {
        match self {
            DataType::Boolean => "bool ".to_string(),
            DataType::Blob | DataType::JsonObject | DataType::JsonArray => {
                "struct sol_blob *".to_string()
            }
            DataType::Byte => "unsigned char ".to_string(),
            DataType::Timestamp => "struct timespec ".to_string(),
            DataType::Int => "struct sol_irange ".to_string(),
            DataType::Float => "struct sol_drange ".to_string(),
            DataType::Rgb => "struct sol_rgb ".to_string(),
            DataType::DirectionVector => "struct sol_direction_vector ".to_string(),
            DataType::Location => "struct sol_location ".to_string(),
            DataType::String => "const char *".to_string(),
            DataType::Error => "int code_value; const char *".to_string(),
            DataType::HttpResponse => {
                "int response_code; const char *url, *content_type; const struct sol_blob *blob; struct sol_vector cookies, "
                    .to_string()
            }
            DataType::Custom(_) => format!("struct {}_packet_data ", self.custom_c_name()),
            DataType::Empty | DataType::Any | DataType::Composed(_) => String::new(),
        }
    }

    /// Call extracting this type's value from `packet` into `in_value`.
    pub fn stub_packet_getter(&self) -> Option<String> {
        let call = match self {
            DataType::Boolean => "boolean(packet, &in_value)",
            DataType::Blob => "blob(packet, &in_value)",
            DataType::JsonObject => "json_object(packet, &in_value)",
            DataType::JsonArray => "json_array(packet, &in_value)",
            DataType::Timestamp => "timestamp(packet, &in_value)",
            DataType::Int => "irange(packet, &in_value)",
            DataType::Float => "drange(packet, &in_value)",
            DataType::String => "string(packet, &in_value)",
            DataType::Byte => "byte(packet, &in_value)",
            DataType::Error => "error(packet, &code_value, &in_value)",
            DataType::Rgb => "rgb(packet, &in_value)",
            DataType::DirectionVector => "direction_vector(packet, &in_value)",
            DataType::Location => "location(packet, &in_value)",
            DataType::HttpResponse => {
                "http_response(packet, &response_code, &url, &content_type, &blob, &cookies, &in_value)"
            }
            DataType::Custom(_) => {
                return Some(format!(
                    "packet_get_{}(packet /* TODO: add args */)",
                    self.custom_c_name()
                ))
            }
            DataType::Empty | DataType::Any | DataType::Composed(_) => return None,
        };
        Some(format!("sol_flow_packet_get_{}", call))
    }

    /// Lower-cased C identifier of a custom packet type.
    pub fn custom_c_name(&self) -> String {
        match self {
            DataType::Custom(name) => super::naming::c_clean(&name.to_lowercase()),
            _ => String::new(),
        }
    }
}

/// `a_b_c` spelling of a composed type's members, as used in getter names.
pub fn composed_suffix(members: &[DataType]) -> String {
    members
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Custom(name) => write!(f, "{}{}", CUSTOM_PREFIX, name),
            DataType::Composed(members) => {
                let names: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "{}{}", COMPOSED_PREFIX, names.join(","))
            }
            simple => {
                let name = DataType::SIMPLE
                    .iter()
                    .find(|(_, variant)| variant == simple)
                    .map(|(name, _)| *name)
                    .unwrap_or("any");
                write!(f, "{}", name)
            }
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(CUSTOM_PREFIX) {
            if name.is_empty() {
                return Err("custom data type needs a packet type name".to_string());
            }
            return Ok(DataType::Custom(name.to_string()));
        }
        if let Some(list) = s.strip_prefix(COMPOSED_PREFIX) {
            let members = list
                .split(',')
                .map(|member| match member.parse::<DataType>()? {
                    DataType::Composed(_) => Err(format!("nested composed type '{}'", member)),
                    parsed => Ok(parsed),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if members.len() < 2 {
                return Err(format!("composed type '{}' needs at least two members", s));
            }
            return Ok(DataType::Composed(members));
        }
        DataType::SIMPLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, variant)| variant.clone())
            .ok_or_else(|| format!("unknown data type '{}'", s))
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_simple_names() {
        assert_eq!("int".parse::<DataType>(), Ok(DataType::Int));
        assert_eq!("json-object".parse::<DataType>(), Ok(DataType::JsonObject));
        assert!("integer".parse::<DataType>().is_err());
    }

    #[test]
    fn parses_custom_and_composed() {
        assert_eq!(
            "custom:MY_PACKET".parse::<DataType>(),
            Ok(DataType::Custom("MY_PACKET".to_string()))
        );
        let composed: DataType = "composed:int,string".parse().unwrap();
        assert_eq!(
            composed,
            DataType::Composed(vec![DataType::Int, DataType::String])
        );
        assert_eq!(composed.to_string(), "composed:int,string");
        assert!("composed:int".parse::<DataType>().is_err());
        assert!("composed:int,bogus".parse::<DataType>().is_err());
        assert!("custom:".parse::<DataType>().is_err());
    }

    #[test]
    fn maps_packet_types() {
        assert_eq!(DataType::Int.packet_type_c("x"), "SOL_FLOW_PACKET_TYPE_IRANGE");
        assert_eq!(DataType::Float.packet_type_c("x"), "SOL_FLOW_PACKET_TYPE_DRANGE");
        assert_eq!(
            DataType::Custom("MY_PACKET".into()).packet_type_c("x"),
            "MY_PACKET"
        );
        assert_eq!(
            DataType::Composed(vec![DataType::Int, DataType::Boolean]).packet_type_c("node"),
            "node_get_composed_int_boolean_packet_type()"
        );
    }

    #[test]
    fn option_types_have_c_spelling() {
        for name in DataType::OPTION_TYPES {
            let parsed: DataType = name.parse().unwrap();
            assert!(parsed.option_c_type().is_some(), "{}", name);
        }
        assert!(DataType::Blob.option_c_type().is_none());
        assert_eq!(DataType::Blob.default_member(), "ptr");
    }

    #[test]
    fn custom_names_are_cleaned() {
        let custom = DataType::Custom("My-Packet".into());
        assert_eq!(custom.custom_c_name(), "my_packet");
        assert_eq!(custom.stub_c_type(), "struct my_packet_packet_data ");
    }

    #[test]
    fn deserializes_through_string_form() {
        let parsed: DataType = serde_json::from_value(json!("composed:int,blob")).unwrap();
        assert_eq!(parsed, DataType::Composed(vec![DataType::Int, DataType::Blob]));
        assert_eq!(serde_json::from_value::<DataType>(json!("error")).unwrap(), DataType::Error);

        let err = serde_json::from_value::<DataType>(json!("bogus")).unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert_eq!(serde_json::to_value(DataType::Int).unwrap(), json!("int"));
    }
}
