// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Implementation (`.c`) emission. The generated file is meant to be
//! included from hand written code once its callbacks are defined.

use crate::codegen::c_literal::{
    bool_to_c, comment_safe, default_to_c, str_to_c, str_to_c_or_null,
};
use crate::descriptor::{
    c_clean, DataType, ExtraMethod, NodeType, NodeTypeBundle, OptionsSpec, PortSpec,
};
use indexmap::IndexMap;

const FOREACH_CALLBACK: &str =
    "bool (*cb)(void *data, const struct sol_flow_node_type *type), const void *data";

/// Generate the source for every type of `bundle`. `header_include` is the
/// file name written in the `#include` directive.
pub fn generate_source(bundle: &NodeTypeBundle, header_include: &str) -> String {
    let mut output = String::new();
    code_head(&mut output, bundle, header_include);
    for node_type in &bundle.types {
        code_entry(&mut output, node_type);
    }
    code_tail(&mut output, bundle);
    output
}

fn code_head(output: &mut String, bundle: &NodeTypeBundle, header_include: &str) {
    let first_upper = bundle
        .types
        .first()
        .map(|t| t.names.upper.as_str())
        .unwrap_or_default();
    output.push_str(&format!(
        "/* this file was auto-generated from {}.\n",
        comment_safe(&bundle.input.display().to_string())
    ));
    output.push_str(" * include it from your implementation after your methods and\n");
    output.push_str(" * types are defined.\n */\n");
    output.push_str(&format!("#ifndef {}_DEFINED\n", first_upper));
    output.push_str(&format!("#include \"{}\"\n", header_include));
    output.push_str("#endif\n");
    output.push_str("#include <sol-flow-packet.h>\n");
    output.push_str("#include <sol-macros.h>\n");
    output.push_str("#include <errno.h>\n");
    if bundle.uses_float() {
        output.push_str("#include <float.h>\n");
    }
    output.push('\n');
}

/// A port that owns a port type struct in the generated code.
struct EmittedPort<'a> {
    symbol: String,
    spec: &'a PortSpec,
}

fn emitted_ports<'a>(node_type: &NodeType, ports: &'a [PortSpec], dir: &str) -> Vec<EmittedPort<'a>> {
    ports
        .iter()
        .filter(|port| !port.is_exported())
        .map(|spec| EmittedPort {
            symbol: format!("{}__{}__{}", node_type.names.lower, dir, c_clean(&spec.base_name())),
            spec,
        })
        .collect()
}

fn code_entry(output: &mut String, node_type: &NodeType) {
    let name_c = &node_type.names.lower;
    let spec = &node_type.spec;
    let in_ports = emitted_ports(node_type, spec.in_ports(), "in");
    let out_ports = emitted_ports(node_type, spec.out_ports(), "out");

    for port in &in_ports {
        let methods = &port.spec.methods;
        output.push_str(&format!(
            "\nstatic struct sol_flow_port_type_in {} = {{\n",
            port.symbol
        ));
        output.push_str("    .api_version = SOL_FLOW_PORT_TYPE_IN_API_VERSION,\n");
        output.push_str(&format!("    .process = {},\n", symbol_or_null(&methods.process)));
        output.push_str(&format!("    .connect = {},\n", symbol_or_null(&methods.connect)));
        output.push_str(&format!(
            "    .disconnect = {},\n",
            symbol_or_null(&methods.disconnect)
        ));
        output.push_str("};\n");
    }

    for port in &out_ports {
        let methods = &port.spec.methods;
        output.push_str(&format!(
            "\nstatic struct sol_flow_port_type_out {} = {{\n",
            port.symbol
        ));
        output.push_str("    .api_version = SOL_FLOW_PORT_TYPE_OUT_API_VERSION,\n");
        output.push_str(&format!(
            "    .flags = {},\n",
            port.spec.flags.as_deref().unwrap_or("0")
        ));
        output.push_str(&format!("    .connect = {},\n", symbol_or_null(&methods.connect)));
        output.push_str(&format!(
            "    .disconnect = {},\n",
            symbol_or_null(&methods.disconnect)
        ));
        output.push_str("};\n");
    }

    let in_count = port_getter(output, name_c, "in", &in_ports);
    let out_count = port_getter(output, name_c, "out", &out_ports);
    ports_counts(output, name_c, &in_ports, &out_ports, in_count, out_count);

    output.push_str(&format!(
        "\nstatic void\n{}_init_type_internal(void)\n{{\n",
        name_c
    ));
    if let Some(init_type) = &spec.methods.init_type {
        output.push_str(&format!("    {}();\n", init_type));
    }
    output.push_str("}\n");

    let (new_options, free_options) = match &spec.options {
        Some(options) => options_functions(output, node_type, options),
        None => ("NULL".to_string(), "NULL".to_string()),
    };

    description_table(output, node_type);
    node_type_struct(output, node_type, &in_ports, &out_ports, &new_options, &free_options);
}

fn symbol_or_null(symbol: &Option<String>) -> &str {
    symbol.as_deref().unwrap_or("NULL")
}

/// Emits `<name_c>_get_port_<dir>_internal` and returns the number of port
/// indices it answers for.
fn port_getter(output: &mut String, name_c: &str, dir: &str, ports: &[EmittedPort]) -> usize {
    let mut limit = 0;
    if ports.is_empty() {
        return limit;
    }
    output.push_str(&format!(
        "static const struct sol_flow_port_type_{} *\n{}_get_port_{}_internal(const struct sol_flow_node_type *type, uint16_t port)\n{{\n",
        dir, name_c, dir
    ));
    for port in ports {
        limit += port.spec.slots();
        output.push_str(&format!(
            "    if (port < {})\n        return &{};\n",
            limit, port.symbol
        ));
    }
    output.push_str("\n    return NULL; /* shouldn't happen, but compiler complains otherwise */\n}\n");
    limit
}

fn ports_counts(
    output: &mut String,
    name_c: &str,
    in_ports: &[EmittedPort],
    out_ports: &[EmittedPort],
    in_count: usize,
    out_count: usize,
) {
    output.push_str(&format!(
        "static void\n{}_get_ports_counts_internal(const struct sol_flow_node_type *type, uint16_t *ports_in_count, uint16_t *ports_out_count)\n{{\n",
        name_c
    ));
    if let Some(first) = in_ports.first().or_else(|| out_ports.first()) {
        output.push_str(&format!("    if ({}.packet_type == NULL) {{\n", first.symbol));
        for port in in_ports.iter().chain(out_ports) {
            output.push_str(&format!(
                "        {}.packet_type = {};\n",
                port.symbol,
                port.spec.packet_data_type().packet_type_c(name_c)
            ));
        }
        output.push_str("    }\n");
    }
    output.push_str(&format!(
        "    if (ports_in_count)\n        *ports_in_count = {};\n    if (ports_out_count)\n        *ports_out_count = {};\n}}\n",
        in_count, out_count
    ));
}

/// Emits the defaults constant and any generated option constructors.
/// Returns the `new_options` and `free_options` symbols.
fn options_functions(
    output: &mut String,
    node_type: &NodeType,
    options: &OptionsSpec,
) -> (String, String) {
    let name_c = &node_type.names.lower;
    let upper = &node_type.names.upper;
    output.push_str(&format!(
        "\nstatic const struct {0}_options {0}_options_defaults = {1}_OPTIONS_DEFAULTS();\n",
        name_c, upper
    ));

    let strings: Vec<&str> = options
        .members
        .iter()
        .filter(|m| m.data_type == DataType::String)
        .map(|m| m.name.as_str())
        .collect();

    let new_options = match &options.methods.new {
        Some(custom) => custom.clone(),
        None => {
            let symbol = format!("{}_new_options_internal", name_c);
            output.push_str(&format!(
                "\nstatic struct sol_flow_node_options *\n{}(const struct sol_flow_node_options *copy_from)\n{{\n",
                symbol
            ));
            output.push_str(&format!("    struct {}_options *opts;\n", name_c));
            output.push_str(&format!("    const struct {}_options *from;\n\n", name_c));
            output.push_str(&format!(
                "    if (!copy_from) from = &{}_options_defaults;\n",
                name_c
            ));
            output.push_str(&format!(
                "    else from = (struct {}_options *)copy_from;\n",
                name_c
            ));
            output.push_str(&format!(
                "    if (from->base.sub_api != {}_OPTIONS_API_VERSION) {{\n",
                upper
            ));
            output.push_str("        errno = -EINVAL;\n        return NULL;\n    }\n\n");
            output.push_str("    opts = malloc(sizeof(*opts));\n");
            output.push_str("    if (!opts) {\n        errno = -ENOMEM;\n        return NULL;\n    }\n");
            output.push_str("    *opts = *from;\n");
            for member in &strings {
                output.push_str(&format!(
                    "\n    if (opts->{0})\n        opts->{0} = strdup(opts->{0});\n",
                    member
                ));
            }
            output.push_str("\n    return &opts->base;\n}\n");
            symbol
        }
    };

    let free_options = match &options.methods.free {
        Some(custom) => custom.clone(),
        None => {
            let symbol = format!("{}_free_options_internal", name_c);
            output.push_str(&format!(
                "\nstatic void\n{}(struct sol_flow_node_options *options)\n{{\n",
                symbol
            ));
            output.push_str(&format!("    struct {}_options *opts;\n", name_c));
            output.push_str("    if (!options) return;\n");
            output.push_str(&format!("    opts = (struct {}_options *)options;\n", name_c));
            for member in &strings {
                output.push_str(&format!("\n    free((void *)opts->{});\n", member));
            }
            output.push_str("\n    free(opts);\n}\n");
            symbol
        }
    };

    (new_options, free_options)
}

fn description_table(output: &mut String, node_type: &NodeType) {
    let name_c = &node_type.names.lower;
    let spec = &node_type.spec;
    output.push_str("\n#ifdef SOL_FLOW_NODE_TYPE_DESCRIPTION_ENABLED\n");
    output.push_str(&format!(
        "static const struct sol_flow_node_type_description {}_description = {{\n",
        name_c
    ));
    output.push_str("    .api_version = SOL_FLOW_NODE_TYPE_DESCRIPTION_API_VERSION,\n");
    output.push_str(&format!("    .name = {},\n", str_to_c(&spec.name)));
    output.push_str(&format!("    .category = {},\n", str_to_c(&spec.category)));
    output.push_str(&format!("    .symbol = {},\n", str_to_c(&node_type.names.upper)));
    output.push_str(&format!("    .options_symbol = \"{}_options\",\n", name_c));
    for (field, value) in [
        ("description", &spec.description),
        ("author", &spec.author),
        ("url", &spec.url),
        ("license", &spec.license),
        ("version", &spec.version),
    ] {
        output.push_str(&format!(
            "    .{} = {},\n",
            field,
            str_to_c_or_null(value.as_deref())
        ));
    }

    if let Some(ports) = &spec.in_ports {
        port_descriptions(output, "ports_in", ports);
    }
    if let Some(ports) = &spec.out_ports {
        port_descriptions(output, "ports_out", ports);
    }
    if let Some(options) = &spec.options {
        options_description(output, node_type, options);
    }
    output.push_str("};\n#endif\n");
}

fn port_descriptions(output: &mut String, field: &str, ports: &[PortSpec]) {
    output.push_str(&format!(
        "    .{} = (const struct sol_flow_port_description * const []){{\n",
        field
    ));
    let mut base = 0;
    for port in ports {
        output.push_str("        &((const struct sol_flow_port_description){\n");
        output.push_str(&format!("            .name = {},\n", str_to_c(&port.base_name())));
        output.push_str(&format!(
            "            .description={},\n",
            str_to_c_or_null(port.description.as_deref())
        ));
        output.push_str(&format!(
            "            .data_type={},\n",
            str_to_c_or_null(port.data_type.as_ref().map(DataType::name).as_deref())
        ));
        output.push_str(&format!("            .array_size={},\n", port.array_size()));
        output.push_str(&format!("            .base_port_idx={},\n", base));
        output.push_str(&format!("            .required={},\n", bool_to_c(port.required)));
        output.push_str("        }),\n");
        base += port.slots();
    }
    output.push_str("        NULL\n    },\n");
}

fn options_description(output: &mut String, node_type: &NodeType, options: &OptionsSpec) {
    let name_c = &node_type.names.lower;
    let any_required = options.members.iter().any(|m| m.is_required());
    output.push_str("    .options = &((const struct sol_flow_node_options_description){\n");
    output.push_str(&format!(
        "        .data_size = sizeof(struct {}_options),\n",
        name_c
    ));
    output.push_str(&format!(
        "        .sub_api = {}_OPTIONS_API_VERSION,\n",
        node_type.names.upper
    ));
    output.push_str(&format!("        .required = {},\n", bool_to_c(any_required)));
    output.push_str(
        "        .members = (const struct sol_flow_node_options_member_description[]){\n",
    );
    for member in &options.members {
        output.push_str("            {\n");
        output.push_str(&format!("                .name=\"{}\",\n", member.name));
        output.push_str(&format!(
            "                .description={},\n",
            str_to_c_or_null(member.description.as_deref())
        ));
        output.push_str(&format!(
            "                .data_type={},\n",
            str_to_c(&member.data_type.name())
        ));
        output.push_str(&format!(
            "                .required={},\n",
            bool_to_c(member.is_required())
        ));
        output.push_str(&format!(
            "                .offset=offsetof(struct {}_options, {}),\n",
            name_c, member.name
        ));
        output.push_str(&format!(
            "                .size=sizeof({}),\n",
            member.data_type.option_c_type().unwrap_or("void *")
        ));
        if let Some(default) = &member.default {
            output.push_str("                .defvalue = {\n");
            output.push_str(&format!(
                "                    .{}={},\n",
                member.data_type.default_member(),
                default_to_c(default)
            ));
            output.push_str("                },\n");
        }
        output.push_str("            },\n");
    }
    output.push_str("            {},\n        },\n    }),\n");
}

fn node_type_struct(
    output: &mut String,
    node_type: &NodeType,
    in_ports: &[EmittedPort],
    out_ports: &[EmittedPort],
    new_options: &str,
    free_options: &str,
) {
    let name_c = &node_type.names.lower;
    let spec = &node_type.spec;
    let (struct_type, access) = match &spec.node_type {
        Some(ext) => (ext.data_type.as_str(), ext.access.as_slice()),
        None => ("struct sol_flow_node_type", &[][..]),
    };
    let access_open: String = access.iter().map(|a| format!(".{} = {{", a)).collect();
    let access_path: String = access.iter().map(|a| format!(".{}", a)).collect();
    let access_close = if spec.node_type.is_some() {
        format!("{},", "}".repeat(access.len()))
    } else {
        String::new()
    };
    let data_size = spec
        .private_data_type
        .as_ref()
        .map_or("0".to_string(), |t| format!("sizeof(struct {})", t));

    output.push_str(&format!(
        "\nstatic const {} {} = {{{}\n",
        struct_type, name_c, access_open
    ));
    output.push_str("    .api_version = SOL_FLOW_NODE_TYPE_API_VERSION,\n");
    output.push_str(&format!("    .data_size = {},\n", data_size));
    output.push_str(&format!("    .init_type = {}_init_type_internal,\n", name_c));
    output.push_str(&format!("    .new_options = {},\n", new_options));
    output.push_str(&format!("    .free_options = {},\n", free_options));
    output.push_str(&format!("    .open = {},\n", symbol_or_null(&spec.methods.open)));
    output.push_str(&format!("    .close = {},\n", symbol_or_null(&spec.methods.close)));
    output.push_str(&format!(
        "    .get_ports_counts = {}_get_ports_counts_internal,\n",
        name_c
    ));
    if !in_ports.is_empty() {
        output.push_str(&format!("    .get_port_in = {}_get_port_in_internal,\n", name_c));
    }
    if !out_ports.is_empty() {
        output.push_str(&format!(
            "    .get_port_out = {}_get_port_out_internal,\n",
            name_c
        ));
    }
    output.push_str("#ifdef SOL_FLOW_NODE_TYPE_DESCRIPTION_ENABLED\n");
    output.push_str(&format!("    .description=&{}_description,\n", name_c));
    output.push_str("#endif\n");
    output.push_str(&access_close);
    output.push('\n');
    if let Some(ext) = &spec.node_type {
        extra_methods(output, &ext.extra_methods, 1);
    }
    output.push_str("};\n\n");
    output.push_str(&format!(
        "SOL_API const struct sol_flow_node_type *{} = &{}{};\n",
        node_type.names.upper, name_c, access_path
    ));
}

/// Designated initializers for extension members, four spaces per level.
fn extra_methods(output: &mut String, methods: &IndexMap<String, ExtraMethod>, level: usize) {
    let indent = "    ".repeat(level);
    for (key, value) in methods {
        output.push_str(&format!("{}.{} = ", indent, key));
        match value {
            ExtraMethod::Symbol(symbol) => output.push_str(symbol),
            ExtraMethod::Group(members) => {
                output.push_str("{\n");
                extra_methods(output, members, level + 1);
                output.push_str(&indent);
                output.push('}');
            }
        }
        output.push_str(",\n");
    }
}

fn code_tail(output: &mut String, bundle: &NodeTypeBundle) {
    output.push_str("\n\n#ifdef SOL_FLOW_NODE_TYPE_DESCRIPTION_ENABLED\n\n");
    output.push_str("#ifdef SOL_FLOW_NODE_TYPE_MODULE_EXTERNAL\n\n");
    output.push_str(&format!(
        "void sol_flow_foreach_module_node_type({});\n\n",
        FOREACH_CALLBACK
    ));
    output.push_str(&format!(
        "SOL_API void\nsol_flow_foreach_module_node_type({})\n\n",
        FOREACH_CALLBACK
    ));
    output.push_str("#else\n\n");
    output.push_str(&format!(
        "const struct sol_flow_node_type *sol_flow_foreach_builtin_node_type_{}({});\n\n",
        bundle.name_c, FOREACH_CALLBACK
    ));
    output.push_str(&format!(
        "SOL_API const struct sol_flow_node_type *\nsol_flow_foreach_builtin_node_type_{}({})\n\n",
        bundle.name_c, FOREACH_CALLBACK
    ));
    output.push_str("#endif // SOL_FLOW_NODE_TYPE_MODULE_EXTERNAL\n");
    output.push_str("{\n    static const struct sol_flow_node_type **types[] = {\n");
    for node_type in &bundle.types {
        output.push_str(&format!("            &{},\n", node_type.names.upper));
    }
    output.push_str(
        "            NULL
    }, ***itr;

    if (!cb)
#ifdef SOL_FLOW_NODE_TYPE_MODULE_EXTERNAL
        return;
#else
        return NULL;
#endif

    for (itr = types; *itr != NULL; itr++) {
        const struct sol_flow_node_type **type = &**itr;
        if ((*type)->init_type)
            (*type)->init_type();
        if (!cb((void *)data, *type))
#ifdef SOL_FLOW_NODE_TYPE_MODULE_EXTERNAL
            break;
#else
            return *type;
#endif
    }
#ifndef SOL_FLOW_NODE_TYPE_MODULE_EXTERNAL
    return NULL;
#endif
}
#else
#define sol_flow_foreach_module_node_type(cb, data)
#endif // SOL_FLOW_NODE_TYPE_DESCRIPTION_ENABLED
",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Document;
    use serde_json::json;
    use std::path::PathBuf;

    fn bundle(doc: serde_json::Value) -> NodeTypeBundle {
        let document = Document::from_value(doc).unwrap();
        NodeTypeBundle::from_document(PathBuf::from("in.json"), document, Some("sol_flow_node_type"))
    }

    fn gate() -> NodeTypeBundle {
        bundle(json!({
            "name": "gate",
            "category": "logic",
            "private_data_type": "gate_data",
            "methods": {"open": "gate_open"},
            "in_ports": [
                {"name": "IN[2]", "data_type": "boolean", "methods": {"process": "gate_process"}},
                {"name": "RESET", "data_type": "empty", "required": true}
            ],
            "out_ports": [
                {"name": "OUT", "data_type": "composed:int,string"},
                {"name": "INNER", "data_type": "any", "type": "exported"}
            ]
        }))
    }

    #[test]
    fn port_getters_use_cumulative_limits() {
        let source = generate_source(&gate(), "gate-gen.h");
        assert!(source.contains(
            "    if (port < 2)\n        return &sol_flow_node_type_gate__in__IN;\n    if (port < 3)\n        return &sol_flow_node_type_gate__in__RESET;\n"
        ));
        assert!(source.contains("        *ports_in_count = 3;\n"));
        assert!(source.contains("        *ports_out_count = 1;\n"));
        assert!(!source.contains("sol_flow_node_type_gate__out__INNER"));
    }

    #[test]
    fn packet_types_are_assigned_lazily() {
        let source = generate_source(&gate(), "gate-gen.h");
        assert!(source.contains("    if (sol_flow_node_type_gate__in__IN.packet_type == NULL) {\n"));
        assert!(source.contains(
            "        sol_flow_node_type_gate__out__OUT.packet_type = sol_flow_node_type_gate_get_composed_int_string_packet_type();\n"
        ));
    }

    #[test]
    fn description_lists_base_indices_including_exported_ports() {
        let source = generate_source(&gate(), "gate-gen.h");
        assert!(source.contains(".name = \"RESET\",\n            .description=NULL,\n            .data_type=\"empty\",\n            .array_size=0,\n            .base_port_idx=2,\n            .required=true,"));
        assert!(source.contains(".name = \"INNER\""));
        assert!(source.contains("    .data_size = sizeof(struct gate_data),\n"));
        assert!(source.contains("    .open = gate_open,\n"));
        assert!(source.contains("    .new_options = NULL,\n"));
        assert!(source.contains(
            "SOL_API const struct sol_flow_node_type *SOL_FLOW_NODE_TYPE_GATE = &sol_flow_node_type_gate;\n"
        ));
    }

    #[test]
    fn untyped_ports_carry_empty_packets() {
        let source = generate_source(
            &bundle(json!({
                "name": "trigger",
                "category": "c",
                "in_ports": [{"name": "PULSE", "methods": {"process": "trigger_pulse"}}]
            })),
            "trigger-gen.h",
        );
        assert!(source.contains(
            "        sol_flow_node_type_trigger__in__PULSE.packet_type = SOL_FLOW_PACKET_TYPE_EMPTY;\n"
        ));
        assert!(source.contains(".name = \"PULSE\",\n            .description=NULL,\n            .data_type=NULL,\n"));
    }

    #[test]
    fn generated_option_helpers_copy_strings() {
        let source = generate_source(
            &bundle(json!({
                "name": "labeler",
                "category": "text",
                "options": {"version": 1, "members": [
                    {"name": "label", "data_type": "string", "default": "x"},
                    {"name": "count", "data_type": "int"}
                ]}
            })),
            "labeler-gen.h",
        );
        assert!(source.contains("        opts->label = strdup(opts->label);\n"));
        assert!(source.contains("    free((void *)opts->label);\n"));
        assert!(!source.contains("opts->count = strdup"));
        assert!(source.contains("        .required = true,\n"));
        assert!(source.contains("                .defvalue = {\n                    .s=\"x\",\n"));
    }

    #[test]
    fn custom_option_helpers_are_used_verbatim() {
        let source = generate_source(
            &bundle(json!({
                "name": "custom",
                "category": "c",
                "options": {"version": 1, "members": [], "methods": {"new": "my_new", "free": "my_free"}}
            })),
            "custom-gen.h",
        );
        assert!(source.contains("    .new_options = my_new,\n"));
        assert!(source.contains("    .free_options = my_free,\n"));
        assert!(!source.contains("_new_options_internal"));
    }

    #[test]
    fn extended_node_types_wrap_the_base_struct() {
        let source = generate_source(
            &bundle(json!({
                "name": "ext",
                "category": "c",
                "node_type": {
                    "data_type": "struct my_node_type",
                    "access": ["base"],
                    "extra_methods": {"send": "ext_send", "ops": {"read": "ext_read"}}
                }
            })),
            "ext-gen.h",
        );
        assert!(source.contains("static const struct my_node_type sol_flow_node_type_ext = {.base = {\n"));
        assert!(source.contains("#endif\n},\n    .send = ext_send,\n    .ops = {\n        .read = ext_read,\n    },\n};\n"));
        assert!(source.contains("= &sol_flow_node_type_ext.base;\n"));
    }

    #[test]
    fn tail_enumerates_bundle_types() {
        let source = generate_source(
            &bundle(json!({
                "name": "Pack",
                "types": [
                    {"name": "pack/a", "category": "x"},
                    {"name": "pack/b", "category": "x"}
                ]
            })),
            "pack-gen.h",
        );
        assert!(source.contains("#ifndef SOL_FLOW_NODE_TYPE_PACK_A_DEFINED\n#include \"pack-gen.h\"\n#endif\n"));
        assert!(source.contains("sol_flow_foreach_builtin_node_type_pack("));
        assert!(source.contains(
            "            &SOL_FLOW_NODE_TYPE_PACK_A,\n            &SOL_FLOW_NODE_TYPE_PACK_B,\n            NULL\n"
        ));
    }
}
