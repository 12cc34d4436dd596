// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Skeleton implementation files for new node types.
//!
//! A stub is written once and then edited by hand, so every symbol is
//! emitted at most once even when several descriptions share it.

use crate::descriptor::{c_clean, composed_suffix, CNames, DataType, NodeType, NodeTypeBundle, PortSpec};
use crate::errors::CodegenError;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::path::Path;

const LICENSE_BANNER: &str = "/*
 * This file is part of the Soletta Project
 *
 * Copyright (C) 2015 Intel Corporation. All rights reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the \"License\");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an \"AS IS\" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

";

/// Runtime structs that already exist and must not be redeclared.
const BUILTIN_STRUCTS: [&str; 7] = [
    "sol_drange",
    "sol_drange_spec",
    "sol_irange",
    "sol_irange_spec",
    "sol_rgb",
    "sol_direction_vector",
    "sol_location",
];

/// One description feeding the stub.
#[derive(Debug, Clone)]
pub struct StubInput {
    /// File name without directory and `.json` suffix
    pub base_name: String,
    pub bundle: NodeTypeBundle,
}

/// File stem of a description input. Inputs must use the `.json` extension.
pub fn stub_base_name(path: &Path) -> Result<String, CodegenError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match file_name.strip_suffix(".json") {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
        _ => Err(CodegenError::NotJsonInput {
            path: path.to_path_buf(),
        }),
    }
}

/// Symbols already written to the stub.
#[derive(Default)]
struct Emitted {
    packets: HashSet<String>,
    composed: HashSet<String>,
    structs: HashSet<String>,
    methods: HashSet<String>,
}

/// Generate a stub implementing every node type of `inputs`. Headers are
/// included as `<namespace>/<base>.h` when a namespace is given.
pub fn generate_stub(inputs: &[StubInput], namespace: Option<&str>) -> String {
    let mut output = String::from(LICENSE_BANNER);
    let namespace = namespace
        .filter(|ns| !ns.is_empty())
        .map(|ns| format!("{}/", ns))
        .unwrap_or_default();
    for input in inputs {
        output.push_str(&format!("#include \"{}{}.h\"\n", namespace, input.base_name));
    }
    output.push_str("#include \"sol-flow-internal.h\"\n\n");
    output.push_str("#include <sol-util.h>\n#include <errno.h>\n\n\n");

    let mut emitted = Emitted::default();
    let types: Vec<(CNames, &NodeType)> = inputs
        .iter()
        .flat_map(|i| {
            i.bundle
                .types
                .iter()
                .map(move |t| (stub_names(&i.bundle, t), t))
        })
        .collect();

    for (names, node_type) in &types {
        for port in node_type.spec.in_ports().iter().chain(node_type.spec.out_ports()) {
            declare_packet(&mut output, &mut emitted, names, port);
        }
    }
    for (_, node_type) in &types {
        declare_struct(&mut output, &mut emitted, node_type);
    }
    for (names, node_type) in &types {
        declare_methods(&mut output, &mut emitted, names, node_type);
    }

    for input in inputs {
        output.push_str(&format!("#include \"{}-gen.c\"\n", input.base_name));
    }
    output
}

/// C names of a node type inside a stub. A bundled type is named after
/// its bundle plus the part of its own name after `/`, which keeps its case.
fn stub_names(bundle: &NodeTypeBundle, node_type: &NodeType) -> CNames {
    if !bundle.bundled {
        return node_type.names.clone();
    }
    let name = &node_type.spec.name;
    let suffix = name.split_once('/').map_or(name.as_str(), |(_, s)| s);
    let lower = format!("{}_{}", bundle.names.lower, c_clean(suffix));
    let upper = lower.to_uppercase();
    CNames { lower, upper }
}

fn declare_packet(output: &mut String, emitted: &mut Emitted, names: &CNames, port: &PortSpec) {
    let data_type = port.packet_data_type();
    match data_type {
        DataType::Custom(_) => {
            let name = data_type.custom_c_name();
            if emitted.packets.insert(name.clone()) {
                custom_packet(output, &name);
            }
        }
        DataType::Composed(members) => {
            let suffix = composed_suffix(members);
            if emitted
                .composed
                .insert(format!("{}_{}", names.lower, suffix))
            {
                composed_send(output, &names.lower, &suffix, members);
            }
        }
        _ => {}
    }
}

fn custom_packet(output: &mut String, name: &str) {
    let upper = name.to_uppercase();
    let data = format!("{}_packet_data", name);
    output.push_str(&format!(
        "struct {data} {{
    /* TODO: add packet struct fields */
}};

static void
{name}_packet_dispose(const struct sol_flow_packet_type *packet_type,
                        void *mem)
{{
    struct {data} *{name} = mem;
    /* TODO: free fields alloced memory */
}}

static int
{name}_packet_init(const struct sol_flow_packet_type *packet_type,
                     void *mem, const void *input)
{{
    const struct {data} *in = input;
    struct {data} *{name} = mem;

    /* TODO: initialize fields with input content */

    return 0;
}}

#define {upper}_PACKET_TYPE_API_VERSION (1)

static const struct sol_flow_packet_type _{upper} = {{
    SOL_SET_API_VERSION(.api_version = {upper}_PACKET_TYPE_API_VERSION, )
    .name = \"{upper}\",
    .data_size = sizeof(struct {data}),
    .init = {name}_packet_init,
    .dispose = {name}_packet_dispose,
}};
static const struct sol_flow_packet_type *{upper} =
    &_{upper};

#undef {upper}_PACKET_TYPE_API_VERSION

static struct sol_flow_packet *
packet_new_{name}(/* TODO: args to fill fields */)
{{
    struct {data} {name};

    /* TODO: check for args validity and fill fields */

    return sol_flow_packet_new({upper}, &{name});
}}

static int
packet_get_{name}(const struct sol_flow_packet *packet
                    /* TODO: args to get fields values */)
{{
    struct {data} {name};
    int ret;

    SOL_NULL_CHECK(packet, -EINVAL);
    if (sol_flow_packet_get_type(packet) != {upper})
        return -EINVAL;

    ret = sol_flow_packet_get(packet, &{name});
    SOL_INT_CHECK(ret, != 0, ret);

    /* TODO: set args with fields values */

    return ret;
}}

static int
send_{name}_packet(struct sol_flow_node *src, uint16_t src_port
                     /* TODO: args to create a new packet */)
{{
    struct sol_flow_packet *packet;

    packet = packet_new_{name}(/* TODO: args */);
    SOL_NULL_CHECK(packet, -ENOMEM);

    return sol_flow_send_packet(src, src_port, packet);
}}

"
    ));
}

/// Strings and blobs are passed as their own pointer, everything else
/// through a pointer to the value.
fn composed_argument(member: &DataType, index: usize) -> String {
    let pointer = match member {
        DataType::String | DataType::Blob => "",
        _ => "*",
    };
    format!("{}{} out_value_{}", member.stub_c_type(), pointer, index)
}

fn packet_constructor(member: &DataType) -> String {
    match member {
        DataType::Int => "irange".to_string(),
        DataType::Float => "drange".to_string(),
        other => other.name().replace('-', "_"),
    }
}

fn composed_send(output: &mut String, owner_c: &str, suffix: &str, members: &[DataType]) {
    let arguments: Vec<String> = members
        .iter()
        .enumerate()
        .map(|(i, m)| composed_argument(m, i))
        .collect();
    output.push_str(&format!(
        "\nstatic int\nsend_{}_packet(struct sol_flow_node *src, uint16_t src_port, {})\n{{\n",
        suffix,
        arguments.join(",")
    ));
    output.push_str("   struct sol_flow_packet **children;\n");
    output.push_str("   const struct sol_flow_packet_type *p_type, **packet_types;\n");
    output.push_str("   uint16_t len, i;\n   int r;\n\n");
    output.push_str(&format!(
        "   p_type = {}_get_composed_{}_packet_type();\n",
        owner_c, suffix
    ));
    output.push_str(
        "   r = sol_flow_packet_get_composed_members_packet_types(p_type, &packet_types, &len);\n",
    );
    output.push_str("   SOL_INT_CHECK(r, < 0, r);\n");
    output.push_str("   children = alloca(len * sizeof(struct sol_flow_packet *));\n");
    output.push_str("   memset(children, 0, len * sizeof(struct sol_flow_packet *));\n\n");
    for (i, member) in members.iter().enumerate() {
        output.push_str(&format!(
            "   children[{0}] = sol_flow_packet_new_{1}(out_value_{0});\n   SOL_NULL_CHECK_GOTO(children[{0}], exit);\n\n",
            i,
            packet_constructor(member)
        ));
    }
    output.push_str("\n   r = sol_flow_send_composed_packet(src, src_port, p_type, children);\n");
    output.push_str(
        "exit:
   for (i = 0; i < len; i++) {
        if (children[i] == NULL && r == 0) {
          r = -ENOMEM;
          break;
        }
        sol_flow_packet_del(children[i]);
   }
   return r;
}
",
    );
}

fn declare_struct(output: &mut String, emitted: &mut Emitted, node_type: &NodeType) {
    let Some(name) = &node_type.spec.private_data_type else {
        return;
    };
    if BUILTIN_STRUCTS.contains(&name.as_str()) || !emitted.structs.insert(name.clone()) {
        return;
    }
    output.push_str(&format!(
        "struct {} {{\n    /* TODO: add struct fields */\n}};\n\n",
        name
    ));
}

fn data_struct_line(node_type: &NodeType) -> String {
    node_type
        .spec
        .private_data_type
        .as_ref()
        .map(|s| format!("    struct {} *mdata = data;\n", s))
        .unwrap_or_default()
}

/// Method symbol to the data types of the ports using it, in first use
/// order.
type MethodUses<'a> = IndexMap<&'a str, IndexSet<&'a DataType>>;

fn collect_method<'a>(uses: &mut MethodUses<'a>, symbol: &'a Option<String>, data_type: &'a DataType) {
    if let Some(symbol) = symbol {
        uses.entry(symbol.as_str()).or_default().insert(data_type);
    }
}

/// The one concrete packet type a process method receives, if any.
fn single_packet_type<'a>(types: &IndexSet<&'a DataType>) -> Option<&'a DataType> {
    if types.len() != 1 {
        return None;
    }
    types
        .first()
        .copied()
        .filter(|t| !matches!(t, DataType::Any | DataType::Empty))
}

fn declare_methods(output: &mut String, emitted: &mut Emitted, names: &CNames, node_type: &NodeType) {
    let spec = &node_type.spec;
    let mdata = data_struct_line(node_type);

    if let Some(open) = &spec.methods.open {
        if emitted.methods.insert(open.clone()) {
            output.push_str(&format!(
                "static int\n{}(struct sol_flow_node *node, void *data, const struct sol_flow_node_options *options)\n{{\n",
                open
            ));
            output.push_str(&mdata);
            if spec.options.is_some() {
                output.push_str(&format!(
                    "    const struct {0}_options *opts;\n\n    SOL_FLOW_NODE_OPTIONS_SUB_API_CHECK(options, {1}_OPTIONS_API_VERSION,\n                                       -EINVAL);\n    opts = (const struct {0}_options *)options;\n\n",
                    names.lower, names.upper
                ));
            }
            output.push_str("    /* TODO: implement open method */\n\n    return 0;\n}\n\n");
        }
    }

    if let Some(close) = &spec.methods.close {
        if emitted.methods.insert(close.clone()) {
            output.push_str(&format!(
                "static void\n{}(struct sol_flow_node *node, void *data)\n{{\n",
                close
            ));
            output.push_str(&mdata);
            output.push_str("    /* TODO: implement close method */\n}\n\n");
        }
    }

    let mut connect = MethodUses::new();
    let mut disconnect = MethodUses::new();
    let mut process = MethodUses::new();
    for port in spec.in_ports() {
        let data_type = port.packet_data_type();
        collect_method(&mut process, &port.methods.process, data_type);
        collect_method(&mut connect, &port.methods.connect, data_type);
        collect_method(&mut disconnect, &port.methods.disconnect, data_type);
    }
    for port in spec.out_ports() {
        let data_type = port.packet_data_type();
        collect_method(&mut connect, &port.methods.connect, data_type);
        collect_method(&mut disconnect, &port.methods.disconnect, data_type);
    }

    for (kind, uses) in [("connect", &connect), ("disconnect", &disconnect)] {
        for symbol in uses.keys() {
            if !emitted.methods.insert(symbol.to_string()) {
                continue;
            }
            output.push_str(&format!(
                "static int\n{}(struct sol_flow_node *node, void *data, uint16_t port, uint16_t conn_id)\n{{\n",
                symbol
            ));
            output.push_str(&mdata);
            output.push_str(&format!(
                "    /* TODO: implement {} method */\n\n    return 0;\n}}\n\n",
                kind
            ));
        }
    }

    for (symbol, types) in &process {
        if !emitted.methods.insert(symbol.to_string()) {
            continue;
        }
        output.push_str(&format!(
            "static int\n{}(struct sol_flow_node *node, void *data, uint16_t port, uint16_t conn_id, const struct sol_flow_packet *packet)\n{{\n",
            symbol
        ));
        output.push_str(&mdata);
        match single_packet_type(types) {
            Some(DataType::Composed(members)) => {
                composed_process_body(output, &names.lower, members)
            }
            Some(single) => {
                if let Some(getter) = single.stub_packet_getter() {
                    output.push_str(&format!(
                        "\n    int r;\n\n    {}in_value;\n\n    r = {};\n    SOL_INT_CHECK(r, < 0, r);\n\n",
                        single.stub_c_type(),
                        getter
                    ));
                }
            }
            None => {}
        }
        output.push_str("\n    /* TODO: implement process method */\n\n    return 0;\n}\n");
    }
}

fn composed_process_body(output: &mut String, owner_c: &str, members: &[DataType]) {
    for (i, member) in members.iter().enumerate() {
        output.push_str(&format!("\n    {}in_value_{};", member.stub_c_type(), i));
    }
    output.push_str(&format!(
        "
    const struct sol_flow_packet_type *p_type;
    struct sol_flow_packet **packets;
    int r;
    uint16_t len;

    p_type = sol_flow_packet_get_type(packet);
    if (p_type != {}_get_composed_{}_packet_type())
       return -EINVAL;

    r = sol_flow_packet_get_composed_members(packet, &packets, &len);
    SOL_INT_CHECK(r, < 0, r);
    SOL_INT_CHECK(len, < {}, -EINVAL);
",
        owner_c,
        composed_suffix(members),
        members.len()
    ));
    for (i, member) in members.iter().enumerate() {
        if let Some(getter) = member.stub_packet_getter() {
            let getter = getter
                .replace("(packet", &format!("(packets[{}]", i))
                .replace("&in_value)", &format!("&in_value_{})", i));
            output.push_str(&format!("\n    r = {};\n    SOL_INT_CHECK(r, < 0, r);", getter));
        }
    }
}
