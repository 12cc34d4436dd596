// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node-type descriptions for OIC client and server nodes.

use crate::oic::resource::Resource;
use serde_json::{json, Map, Value};

const MASTER_SCHEMA: &str = "http://solettaproject.github.io/soletta/schemas/node-type-genspec.schema";
const DOC_URL: &str = "http://solettaproject.org/doc/latest/components";

/// Server node: every property is both an input and an output.
pub fn server_node_type(resource: &Resource) -> Value {
    let struct_name = &resource.names.server_struct;
    let in_ports: Vec<Value> = resource
        .properties
        .iter()
        .map(|p| setter_port(struct_name, &p.name, p.port_data_type, p.doc(), &p.port_name()))
        .collect();

    let mut node = header(struct_name, &resource.names.server_node);
    node.insert("category".into(), json!("iot/server"));
    node.insert("description".into(), json!(format!("OIC Server ({})", resource.title)));
    if !in_ports.is_empty() {
        node.insert("in_ports".into(), Value::Array(in_ports));
    }
    let out_ports = property_out_ports(resource);
    if !out_ports.is_empty() {
        node.insert("out_ports".into(), Value::Array(out_ports));
    }
    Value::Object(node)
}

/// Client node: scan and device selection ports, then writable properties
/// in and every property out.
pub fn client_node_type(resource: &Resource) -> Value {
    let struct_name = &resource.names.client_struct;
    let mut in_ports = vec![
        json!({
            "data_type": "any",
            "description": "Scan all reachable resources that matches the interface. Packets with IDs are sent through output port DEVICE_ID.",
            "methods": {"process": "scan"},
            "name": "SCAN"
        }),
        json!({
            "data_type": "string",
            "description": "Set current server device ID to connect to. Override device ID set in device_id option.",
            "methods": {"process": "device_id_process"},
            "name": "DEVICE_ID"
        }),
    ];
    in_ports.extend(
        resource
            .writable()
            .map(|p| setter_port(struct_name, &p.name, p.port_data_type, p.doc(), &p.port_name())),
    );

    let mut out_ports = vec![
        json!({
            "data_type": "boolean",
            "description": "Outputs true if resource was found, false if not, or if unreachable",
            "name": "FOUND"
        }),
        json!({
            "data_type": "string",
            "description": "Send packets with IDs for all servers that respond to scan request. Such IDs can be used to connect to a client to a different server through input port DEVICE_ID",
            "name": "DEVICE_ID"
        }),
    ];
    out_ports.extend(property_out_ports(resource));

    let mut node = header(struct_name, &resource.names.client_node);
    node.insert("category".into(), json!("iot/client"));
    node.insert("description".into(), json!(format!("OIC Client ({})", resource.title)));
    node.insert(
        "options".into(),
        json!({
            "version": 1,
            "members": [{
                "data_type": "string",
                "description": "Unique device ID (UUID, MAC address, etc)",
                "name": "device_id",
                "default": ""
            }]
        }),
    );
    node.insert("in_ports".into(), Value::Array(in_ports));
    node.insert("out_ports".into(), Value::Array(out_ports));
    Value::Object(node)
}

/// The bundle listing every server, then every client.
pub fn master_document(resources: &[Resource], json_name: &str) -> Value {
    let types: Vec<Value> = resources
        .iter()
        .map(server_node_type)
        .chain(resources.iter().map(client_node_type))
        .collect();
    json!({
        "$schema": MASTER_SCHEMA,
        "name": json_name,
        "meta": {
            "author": "Intel Corporation",
            "license": "Apache-2.0",
            "version": "1"
        },
        "types": types
    })
}

/// Pretty print with four space indentation.
pub fn to_pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(value, &mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn header(struct_name: &str, node_name: &str) -> Map<String, Value> {
    let mut node = Map::new();
    node.insert(
        "methods".into(),
        json!({
            "open": format!("{}_open", struct_name),
            "close": format!("{}_close", struct_name)
        }),
    );
    node.insert("private_data_type".into(), json!(struct_name));
    node.insert("name".into(), json!(node_name));
    node.insert(
        "url".into(),
        json!(format!("{}/{}.html", DOC_URL, node_name.replace('/', "-"))),
    );
    node
}

fn setter_port(struct_name: &str, field: &str, data_type: &str, description: &str, port: &str) -> Value {
    json!({
        "data_type": data_type,
        "description": description,
        "methods": {"process": format!("{}_set_{}", struct_name, field)},
        "name": port
    })
}

fn property_out_ports(resource: &Resource) -> Vec<Value> {
    resource
        .properties
        .iter()
        .map(|p| {
            json!({
                "data_type": p.port_data_type,
                "description": p.doc(),
                "name": p.port_name()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::validate_document;

    fn resource() -> Resource {
        let definition = json!({
            "type": "object",
            "title": "Switch Binary",
            "properties": {
                "value": {"type": "boolean", "read_only": false, "short_description": "Switch state"},
                "id": {"type": "string", "read_only": true, "short_description": "Instance ID"}
            }
        });
        Resource::from_definition("oic.r.switch.binary", &definition, "oic")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn client_skips_read_only_inputs() {
        let client = client_node_type(&resource());
        let in_names: Vec<&str> = client["in_ports"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(in_names, vec!["SCAN", "DEVICE_ID", "VALUE"]);
        assert_eq!(client["out_ports"].as_array().unwrap().len(), 4);
        assert_eq!(client["in_ports"][2]["methods"]["process"], "oic_client_switch_binary_set_value");
        assert_eq!(client["options"]["members"][0]["name"], "device_id");
        assert_eq!(client["url"], "http://solettaproject.org/doc/latest/components/oic-client-switch-binary.html");
    }

    #[test]
    fn server_keeps_every_property() {
        let server = server_node_type(&resource());
        assert_eq!(server["category"], "iot/server");
        assert_eq!(server["description"], "OIC Server (Switch Binary)");
        assert_eq!(server["in_ports"].as_array().unwrap().len(), 2);
        assert!(server.get("options").is_none());
        let keys: Vec<&String> = server.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["methods", "private_data_type", "name", "url", "category", "description", "in_ports", "out_ports"]
        );
    }

    #[test]
    fn master_document_is_a_valid_bundle() {
        let master = master_document(&[resource()], "oic");
        assert_eq!(master["types"][0]["name"], "oic/server-switch-binary");
        assert_eq!(master["types"][1]["name"], "oic/client-switch-binary");
        validate_document(&master).unwrap();

        let text = to_pretty_json(&master).unwrap();
        assert!(text.starts_with("{\n    \"$schema\": "));
    }
}
