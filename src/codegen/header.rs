// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Public header (`.h`) emission: options structs, defaults macros and port
//! index macros.

use crate::codegen::c_literal::{comment_safe, default_doc, default_to_c};
use crate::descriptor::{c_clean, NodeType, NodeTypeBundle, OptionsSpec, PortSpec};

/// Generate the header for every type of `bundle`.
pub fn generate_header(bundle: &NodeTypeBundle) -> String {
    let mut output = String::new();
    output.push_str("#pragma once\n");
    output.push_str(&format!(
        "/* this file was auto-generated from {} */\n",
        comment_safe(&bundle.input.display().to_string())
    ));
    output.push_str("#include <stdbool.h>\n");
    output.push_str("#include <stdint.h>\n");
    output.push_str("#include <sol-flow.h>\n");
    if bundle.uses_float() {
        output.push_str("#include <float.h>\n");
    }
    output.push_str("\n\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n");

    for node_type in &bundle.types {
        header_entry(&mut output, node_type);
    }

    output.push_str("\n#ifdef __cplusplus\n}\n#endif\n");
    output
}

fn header_entry(output: &mut String, node_type: &NodeType) {
    let upper = &node_type.names.upper;
    output.push_str(&format!("\n#define {}_DEFINED 1\n", upper));
    output.push_str(&format!(
        "extern const struct sol_flow_node_type *{};\n",
        upper
    ));

    if let Some(options) = &node_type.spec.options {
        options_struct(output, node_type, options);
        options_defaults_macro(output, node_type, options);
    }

    if let Some(ports) = &node_type.spec.in_ports {
        output.push_str("\n/* Input Ports */\n");
        port_index_macros(output, upper, "IN", ports);
    }
    if let Some(ports) = &node_type.spec.out_ports {
        output.push_str("\n/* Output Ports */\n");
        port_index_macros(output, upper, "OUT", ports);
    }
}

fn options_struct(output: &mut String, node_type: &NodeType, options: &OptionsSpec) {
    let names = &node_type.names;
    output.push_str(&format!("\nstruct {}_options {{\n", names.lower));
    output.push_str("    struct sol_flow_node_options base;\n");
    output.push_str(&format!(
        "#define {}_OPTIONS_API_VERSION ({})\n",
        names.upper, options.version
    ));
    for member in &options.members {
        let mut doc = member
            .description
            .as_deref()
            .map(comment_safe)
            .unwrap_or_default();
        match &member.default_json {
            Some(default) if !default.is_null() => {
                doc.push_str(&format!(" (default: {})", default_doc(default)))
            }
            _ => doc.push_str(" (required)"),
        }
        output.push_str(&format!(
            "    {} {}; /**< {} */\n",
            member.data_type.option_c_type().unwrap_or("void *"),
            member.name,
            doc.trim_start()
        ));
    }
    output.push_str("};\n");
}

fn options_defaults_macro(output: &mut String, node_type: &NodeType, options: &OptionsSpec) {
    let upper = &node_type.names.upper;
    output.push_str(&format!("\n#define {}_OPTIONS_DEFAULTS(...) {{ \\\n", upper));
    output.push_str("    .base = { \\\n");
    output.push_str("        .api_version = SOL_FLOW_NODE_OPTIONS_API_VERSION, \\\n");
    output.push_str(&format!("        .sub_api = {}_OPTIONS_API_VERSION \\\n", upper));
    output.push_str("    }, \\\n");
    for member in &options.members {
        if let Some(default) = &member.default {
            output.push_str(&format!(
                "    .{} = {}, \\\n",
                member.name,
                default_to_c(default)
            ));
        }
    }
    output.push_str("    __VA_ARGS__ \\\n}");
}

/// `<NODE>__<DIR>__<PORT>` macros. Array ports take `size` consecutive
/// indices and get one `_<i>` macro per element.
fn port_index_macros(output: &mut String, upper: &str, direction: &str, ports: &[PortSpec]) {
    let mut index = 0;
    for port in ports {
        let port_c = c_clean(&port.base_name()).to_uppercase();
        output.push_str(&format!(
            "#define {}__{}__{} ({})\n",
            upper, direction, port_c, index
        ));
        for element in 0..port.array_size() {
            output.push_str(&format!(
                "#define {}__{}__{}_{} ({})\n",
                upper,
                direction,
                port_c,
                element,
                index + element
            ));
        }
        index += port.slots();
    }
}
