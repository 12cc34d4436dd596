// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! C glue between OIC resources and flow nodes.
//!
//! Every resource produces three blocks: a common part (enums, string
//! tables, the state struct and its decoder), a client part and a server
//! part. Resources whose properties have the same names and types share
//! their encoder and decoder: later resources forward to the first one
//! emitted. [`CGlue`] remembers what was emitted so forwarding works across
//! every schema of a run.

use crate::oic::resource::{clean_name, Property, PropertyKind, Resource};

/// Runtime support shared by every generated client and server.
const RUNTIME: &str = include_str!("runtime.c");

const SYSTEM_INCLUDES: &[&str] = &["assert.h", "errno.h", "math.h", "stdio.h", "stdlib.h"];
const SOL_INCLUDES: &[&str] = &[
    "sol-coap.h",
    "sol-mainloop.h",
    "sol-oic.h",
    "sol-oic-client.h",
    "sol-oic-server.h",
    "sol-str-slice.h",
    "sol-str-table.h",
    "sol-util.h",
];

type Signature = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Client,
    Server,
}

impl Role {
    fn resource(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Server => "server",
        }
    }
}

/// Generated C for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceGlue {
    pub common: String,
    pub client: String,
    pub server: String,
}

#[derive(Debug, Default)]
pub struct CGlue {
    encoders: Vec<(String, Role, Signature)>,
    decoders: Vec<(String, Signature)>,
}

impl CGlue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the three blocks of `resource`, in the order they are declared.
    pub fn resource(&mut self, resource: &Resource) -> ResourceGlue {
        let common = self.common(resource);
        let client = self.role_block(resource, Role::Client);
        let server = self.role_block(resource, Role::Server);
        ResourceGlue { common, client, server }
    }

    fn common(&mut self, resource: &Resource) -> String {
        let state = &resource.names.state_struct;
        let mut output = String::new();
        output.push_str(&enums(state, &resource.properties));
        output.push_str(&format!("struct {} {{\n", state));
        for p in &resource.properties {
            output.push_str(&format!(
                "    {}; /* {} */\n",
                declaration(&p.kind.c_type(state, &p.name), &p.name),
                p.doc()
            ));
        }
        output.push_str("};\n");
        output.push_str(&self.state_decoder(state, resource));
        output
    }

    fn state_decoder(&mut self, state: &str, resource: &Resource) -> String {
        let signature = resource.signature();
        if let Some((equivalent, _)) = self.decoders.iter().find(|(_, s)| *s == signature) {
            return format!(
                "static int\n\
                 {state}_from_repr_vec(struct {state} *state,\n    \
                 const struct sol_oic_map_reader *repr_map, uint32_t decode_mask)\n\
                 {{\n    \
                 /* {eq} is equivalent to {state} */\n    \
                 return {eq}_from_repr_vec((struct {eq} *)state, repr_map, decode_mask);\n\
                 }}\n",
                state = state,
                eq = equivalent
            );
        }
        self.decoders.push((state.to_string(), signature));

        let props = &resource.properties;
        let mut output = String::new();
        output.push_str(&format!(
            "static int\n{0}_from_repr_vec(struct {0} *state,\n    const struct sol_oic_map_reader *repr_vec, uint32_t decode_mask)\n{{\n",
            state
        ));
        output.push_str("    struct sol_oic_repr_field field;\n");
        output.push_str("    enum sol_oic_map_loop_status end_status;\n");
        output.push_str("    struct sol_oic_map_reader iterator;\n");
        output.push_str(&format!("    struct {} fields = {{\n", state));
        for p in props {
            if p.kind.is_string() {
                output.push_str(&format!("        .{0} = state->{0} ? strdup(state->{0}) : NULL,\n", p.name));
            } else {
                output.push_str(&format!("        .{0} = state->{0},\n", p.name));
            }
        }
        output.push_str("    };\n    bool updated = false;\n    int ret = 0;\n\n");

        output.push_str("    SOL_OIC_MAP_LOOP(repr_vec, &field, &iterator, end_status) {\n");
        for (id, p) in props.iter().enumerate() {
            output.push_str(&field_decoder(state, id, p));
        }
        output.push_str("    }\n    if (end_status != SOL_OIC_MAP_LOOP_OK)\n        goto out;\n\n");

        for p in props {
            output.push_str(&format!(
                "    if ({}(state->{1}, fields.{1})) {{\n",
                p.kind.check_updated(),
                p.name
            ));
            if p.kind.is_string() {
                output.push_str(&format!("        free(state->{});\n", p.name));
            }
            output.push_str(&format!("        state->{0} = fields.{0};\n", p.name));
            if p.kind.is_string() {
                output.push_str(&format!("        fields.{} = NULL;\n", p.name));
            }
            output.push_str("        updated = true;\n    }\n");
        }

        output.push_str("\n    ret = updated ? 1 : 0;\n\nout:\n");
        for p in props.iter().filter(|p| p.kind.is_string()) {
            output.push_str(&format!("    free(fields.{});\n", p.name));
        }
        output.push_str("    return ret;\n}\n");
        output
    }

    fn role_block(&mut self, resource: &Resource, role: Role) -> String {
        let name = match role {
            Role::Client => &resource.names.client_struct,
            Role::Server => &resource.names.server_struct,
        };
        let state = &resource.names.state_struct;

        let mut output = format!(
            "struct {} {{\n    struct {}_resource base;\n    struct {} state;\n}};\n\n",
            name,
            role.resource(),
            state
        );
        output.push_str(&self.encoder(name, resource, role));
        output.push('\n');
        output.push_str(&role_decoder(name, resource, role));
        output.push('\n');
        output.push_str(&inform_flow(name, resource, role));
        output.push('\n');
        output.push_str(&match role {
            Role::Client => client_open(name, resource),
            Role::Server => server_open(name, resource),
        });
        output.push('\n');
        output.push_str(&close(name, resource, role));
        output.push('\n');
        output.push_str(&setters(name, resource, role));
        output.push('\n');
        output
    }

    /// `*_to_repr_vec`: clients only send writable properties.
    fn encoder(&mut self, name: &str, resource: &Resource, role: Role) -> String {
        if role == Role::Client && resource.all_read_only() {
            return String::new();
        }
        let signature = resource.signature();
        if let Some((equivalent, _, _)) = self
            .encoders
            .iter()
            .find(|(_, r, s)| *r == role && *s == signature)
        {
            return format!(
                "static bool\n{name}_to_repr_vec(void *data, struct sol_oic_map_writer *repr_map_encoder)\n{{\n    \
                 return {eq}_to_repr_vec(data, repr_map_encoder); /* {eq} is equivalent to {name} */\n}}\n",
                name = name,
                eq = equivalent
            );
        }
        self.encoders.push((name.to_string(), role, signature));

        let state = &resource.names.state_struct;
        let mut output = format!(
            "static bool\n{0}_to_repr_vec(void *data, struct sol_oic_map_writer *repr_map)\n{{\n    \
             struct {0} *state = (struct {0} *)data;\n    int r;\n\n",
            name
        );
        for p in &resource.properties {
            if role == Role::Client && p.read_only {
                continue;
            }
            let value = format!("state->state.{}", p.name);
            let (repr, args) = match &p.kind {
                PropertyKind::Enum(_) => {
                    let table = format!("{}_{}_tbl", state, p.name);
                    (
                        "SOL_OIC_REPR_TEXT_STRING",
                        format!("{0}[{1}].key, {0}[{1}].len", table, value),
                    )
                }
                PropertyKind::Boolean => ("SOL_OIC_REPR_BOOLEAN", value),
                PropertyKind::String => (
                    "SOL_OIC_REPR_TEXT_STRING",
                    format!("{0}, {0} ? strlen({0}) : 0", value),
                ),
                PropertyKind::Integer => ("SOL_OIC_REPR_INT", value),
                PropertyKind::Number => ("SOL_OIC_REPR_DOUBLE", value),
            };
            output.push_str(&format!(
                "    r = sol_oic_map_append(repr_map, &{}(\"{}\", {}));\n    SOL_INT_CHECK(r, < 0, false);\n",
                repr, p.name, args
            ));
        }
        output.push_str("\n    return true;\n}\n");
        output
    }
}

/// Assemble the implementation file for every generated resource.
pub fn master_c(glue: &[ResourceGlue], gen_c: &str, gen_h: &str) -> String {
    let mut output = String::from("\n");
    for include in SYSTEM_INCLUDES {
        output.push_str(&format!("#include <{}>\n", include));
    }
    output.push_str(&format!("\n#include \"{}\"\n\n", gen_h));
    for include in SOL_INCLUDES {
        output.push_str(&format!("#include \"{}\"\n", include));
    }
    output.push('\n');
    output.push_str(RUNTIME);
    output.push_str("\n#define RETURN_ERROR(errcode) do { ret = errcode; goto out; } while(0)\n\n");

    let blocks = |select: fn(&ResourceGlue) -> &String| {
        glue.iter().map(select).map(String::as_str).collect::<Vec<_>>().join("\n")
    };
    output.push_str(&blocks(|g| &g.common));
    output.push('\n');
    output.push_str(&blocks(|g| &g.client));
    output.push('\n');
    output.push_str(&blocks(|g| &g.server));
    output.push_str(&format!("\n\n#undef RETURN_ERROR\n\n#include \"{}\"\n", gen_c));

    output.replace("\n\n\n", "\n")
}

fn declaration(c_type: &str, name: &str) -> String {
    if c_type.ends_with('*') {
        format!("{}{}", c_type, name)
    } else {
        format!("{} {}", c_type, name)
    }
}

fn enums(state: &str, props: &[Property]) -> String {
    let mut output = String::new();
    for p in props {
        let PropertyKind::Enum(values) = &p.kind else {
            continue;
        };
        let cleaned: Vec<String> = values.iter().map(|v| clean_name(v)).collect();
        let constant = |item: &str| format!("{}_{}_{}", state, p.name, item).to_uppercase();

        if let Some(doc) = &p.short_description {
            output.push_str(&format!("/* {} */\n", doc));
        }
        let items: Vec<String> = cleaned.iter().map(|item| constant(item)).collect();
        output.push_str(&format!("enum {}_{} {{ {} }};\n", state, p.name, items.join(", ")));

        output.push_str(&format!("static const struct sol_str_table {}_{}_tbl[] = {{\n", state, p.name));
        for item in &cleaned {
            output.push_str(&format!("    SOL_STR_TABLE_ITEM(\"{}\", {}),\n", item, constant(item)));
        }
        output.push_str("    { }\n};\n");
    }
    output
}

fn field_decoder(state: &str, id: usize, p: &Property) -> String {
    let mut output = format!(
        "        if (decode_mask & (1<<{}) && streq(field.key, \"{}\")) {{\n",
        id, p.name
    );
    let name = &p.name;
    match &p.kind {
        PropertyKind::Integer => {
            output.push_str("            if (field.type == SOL_OIC_REPR_TYPE_UINT)\n");
            output.push_str(&format!("                fields.{} = field.v_uint;\n", name));
            output.push_str("            else if (field.type == SOL_OIC_REPR_TYPE_INT)\n");
            output.push_str(&format!("                fields.{} = field.v_int;\n", name));
            output.push_str("            else if (field.type == SOL_OIC_REPR_TYPE_SIMPLE)\n");
            output.push_str(&format!("                fields.{} = field.v_simple;\n", name));
            output.push_str("            else\n                RETURN_ERROR(-EINVAL);\n");
        }
        PropertyKind::Number => {
            output.push_str("            if (field.type == SOL_OIC_REPR_TYPE_DOUBLE)\n");
            output.push_str(&format!("                fields.{} = field.v_double;\n", name));
            output.push_str("            else if (field.type == SOL_OIC_REPR_TYPE_FLOAT)\n");
            output.push_str(&format!("                fields.{} = field.v_float;\n", name));
            output.push_str("            else\n                RETURN_ERROR(-EINVAL);\n");
        }
        PropertyKind::String => {
            output.push_str("            if (field.type != SOL_OIC_REPR_TYPE_TEXT_STRING)\n                RETURN_ERROR(-EINVAL);\n");
            output.push_str(&format!(
                "            if (sol_util_replace_str_from_slice_if_changed(&fields.{}, field.v_slice) < 0)\n                RETURN_ERROR(-EINVAL);\n",
                name
            ));
        }
        PropertyKind::Boolean => {
            output.push_str("            if (field.type != SOL_OIC_REPR_TYPE_BOOLEAN)\n                RETURN_ERROR(-EINVAL);\n");
            output.push_str(&format!("            fields.{} = field.v_boolean;\n", name));
        }
        PropertyKind::Enum(_) => {
            output.push_str("            int val;\n\n");
            output.push_str("            if (field.type != SOL_OIC_REPR_TYPE_TEXT_STRING)\n                RETURN_ERROR(-EINVAL);\n\n");
            output.push_str(&format!(
                "            val = sol_str_table_lookup_fallback({}_{}_tbl,\n                field.v_slice, -1);\n",
                state, name
            ));
            output.push_str("            if (val < 0)\n                RETURN_ERROR(-EINVAL);\n");
            output.push_str(&format!("            fields.{0} = (enum {1}_{0})val;\n", name, state));
        }
    }
    output.push_str(&format!("            decode_mask &= ~(1<<{});\n            continue;\n        }}\n", id));
    output
}

/// Clients decode every field; servers only the writable ones.
fn role_decoder(name: &str, resource: &Resource, role: Role) -> String {
    let mask = match role {
        Role::Client => "~0".to_string(),
        Role::Server => {
            let mask = resource
                .properties
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.read_only)
                .fold(0u64, |mask, (id, _)| mask | (1u64 << id));
            if mask == 0 {
                return String::new();
            }
            format!("0x{:x}", mask)
        }
    };
    format!(
        "static int\n{name}_from_repr_vec(struct {role}_resource *resource, const struct sol_oic_map_reader *repr_vec)\n{{\n    \
         struct {name} *res = (struct {name} *)resource;\n    \
         return {state}_from_repr_vec(&res->state, repr_vec, {mask});\n}}\n",
        name = name,
        role = role.resource(),
        state = resource.names.state_struct,
        mask = mask
    )
}

fn inform_flow(name: &str, resource: &Resource, role: Role) -> String {
    if role == Role::Server && resource.all_read_only() {
        return String::new();
    }
    let state = &resource.names.state_struct;
    let mut output = format!(
        "static void\n{0}_inform_flow(struct {1}_resource *resource)\n{{\n    struct {0} *state = (struct {0} *)resource;\n",
        name,
        role.resource()
    );
    for p in &resource.properties {
        let (send, value) = match &p.kind {
            PropertyKind::Enum(_) => (
                "sol_flow_send_string_packet",
                format!("{}_{}_tbl[state->state.{}].key", state, p.name, p.name),
            ),
            PropertyKind::String => ("send_string_packet", format!("state->state.{}", p.name)),
            PropertyKind::Integer => ("sol_flow_send_irange_value_packet", format!("state->state.{}", p.name)),
            PropertyKind::Boolean => ("sol_flow_send_boolean_packet", format!("state->state.{}", p.name)),
            PropertyKind::Number => ("sol_flow_send_drange_value_packet", format!("state->state.{}", p.name)),
        };
        output.push_str(&format!(
            "    {}(resource->node, SOL_FLOW_NODE_TYPE_{}__OUT__{}, {});\n",
            send,
            name.to_uppercase(),
            p.port_name(),
            value
        ));
    }
    output.push_str("}\n");
    output
}

fn field_init(resource: &Resource, indent: &str) -> String {
    let state = &resource.names.state_struct;
    resource
        .properties
        .iter()
        .map(|p| {
            format!(
                "{}resource->state.{} = {};\n",
                indent,
                p.name,
                p.kind.c_initializer(state, &p.name)
            )
        })
        .collect()
}

fn client_open(name: &str, resource: &Resource) -> String {
    let encoder = if resource.all_read_only() {
        "NULL".to_string()
    } else {
        format!("{}_to_repr_vec", name)
    };
    let upper = name.to_uppercase();
    let mut output = format!(
        "static int\n{0}_open(struct sol_flow_node *node, void *data, const struct sol_flow_node_options *options)\n{{\n",
        name
    );
    output.push_str(&format!(
        "    const struct sol_flow_node_type_{0}_options *node_opts =\n        (const struct sol_flow_node_type_{0}_options *)options;\n",
        name
    ));
    output.push_str("    static const struct client_resource_funcs funcs = {\n");
    output.push_str(&format!("        .to_repr_vec = {},\n", encoder));
    output.push_str(&format!("        .from_repr_vec = {}_from_repr_vec,\n", name));
    output.push_str(&format!("        .inform_flow = {}_inform_flow,\n", name));
    output.push_str(&format!("        .found_port = SOL_FLOW_NODE_TYPE_{}__OUT__FOUND,\n", upper));
    output.push_str(&format!("        .device_id_port = SOL_FLOW_NODE_TYPE_{}__OUT__DEVICE_ID\n", upper));
    output.push_str("    };\n");
    output.push_str(&format!("    struct {} *resource = data;\n    int r;\n\n", name));
    output.push_str(&format!(
        "    r = client_resource_init(node, &resource->base, \"{}\", &funcs);\n    SOL_INT_CHECK(r, < 0, r);\n",
        resource.resource_type
    ));
    output.push_str(&field_init(resource, "    "));
    output.push_str("\n    return client_connect(&resource->base, node_opts->device_id);\n}\n");
    output
}

fn server_open(name: &str, resource: &Resource) -> String {
    let (decoder, inform) = if resource.all_read_only() {
        ("NULL".to_string(), "NULL".to_string())
    } else {
        (format!("{}_from_repr_vec", name), format!("{}_inform_flow", name))
    };
    let mut output = format!(
        "static int\n{0}_open(struct sol_flow_node *node, void *data, const struct sol_flow_node_options *options)\n{{\n",
        name
    );
    output.push_str(&format!(
        "    static const struct sol_str_slice rt_slice = SOL_STR_SLICE_LITERAL(\"{}\");\n",
        resource.resource_type
    ));
    output.push_str("    static const struct server_resource_funcs funcs = {\n");
    output.push_str(&format!("        .to_repr_vec = {}_to_repr_vec,\n", name));
    output.push_str(&format!("        .from_repr_vec = {},\n", decoder));
    output.push_str(&format!("        .inform_flow = {}\n", inform));
    output.push_str("    };\n");
    output.push_str(&format!("    struct {} *resource = data;\n    int r;\n\n", name));
    output.push_str("    r = server_resource_init(&resource->base, node, rt_slice, &funcs);\n    if (!r) {\n");
    output.push_str(&field_init(resource, "        "));
    output.push_str("    }\n\n    return r;\n}\n");
    output
}

fn close(name: &str, resource: &Resource, role: Role) -> String {
    let mut output = format!(
        "static void\n{0}_close(struct sol_flow_node *node, void *data)\n{{\n    struct {0} *resource = data;\n",
        name
    );
    for p in resource.properties.iter().filter(|p| p.kind.is_string()) {
        output.push_str(&format!("    free(resource->state.{});\n", p.name));
    }
    output.push_str(&format!("    {}_resource_close(&resource->base);\n}}\n", role.resource()));
    output
}

fn setters(name: &str, resource: &Resource, role: Role) -> String {
    let state = &resource.names.state_struct;
    let kind = role.resource();
    let mut blocks = Vec::new();
    for p in &resource.properties {
        if role == Role::Client && p.read_only {
            continue;
        }
        let field = &p.name;
        let mut output = format!(
            "static int\n{}_set_{}(struct sol_flow_node *node, void *data, uint16_t port,\n    uint16_t conn_id, const struct sol_flow_packet *packet)\n{{\n    struct {} *resource = data;\n",
            name, field, name
        );
        match &p.kind {
            PropertyKind::Enum(_) => {
                output.push_str("    const char *var;\n\n");
                output.push_str("    if (!sol_flow_packet_get_string(packet, &var)) {\n");
                output.push_str(&format!(
                    "        int16_t val = sol_str_table_lookup_fallback({}_{}_tbl,\n            sol_str_slice_from_str(var), -1);\n",
                    state, field
                ));
                output.push_str("        if (val >= 0) {\n");
                output.push_str(&format!(
                    "            resource->state.{0} = (enum {1}_{0})val;\n",
                    field, state
                ));
                output.push_str(&format!(
                    "            {}_resource_schedule_update(&resource->base);\n            return 0;\n        }}\n        return -ENOENT;\n    }}\n    return -EINVAL;\n}}\n",
                    kind
                ));
            }
            PropertyKind::String => {
                output.push_str("    const char *var;\n    int r;\n\n");
                output.push_str("    r = sol_flow_packet_get_string(packet, &var);\n    if (!r) {\n");
                output.push_str(&format!(
                    "        r = sol_util_replace_str_if_changed(&resource->state.{}, var);\n",
                    field
                ));
                output.push_str("        SOL_INT_CHECK(r, < 0, r);\n        if (r > 0) {\n");
                output.push_str(&format!(
                    "            {}_resource_schedule_update(&resource->base);\n            r = 0;\n        }}\n    }}\n    return r;\n}}\n",
                    kind
                ));
            }
            scalar => {
                let (c_type, getter) = match scalar {
                    PropertyKind::Integer => ("int32_t", "sol_flow_packet_get_irange_value"),
                    PropertyKind::Number => ("double", "sol_flow_packet_get_drange_value"),
                    _ => ("bool", "sol_flow_packet_get_boolean"),
                };
                output.push_str(&format!("    {} var;\n    int r;\n\n", c_type));
                output.push_str(&format!("    r = {}(packet, &var);\n    if (!r) {{\n", getter));
                output.push_str(&format!(
                    "        if ({}(resource->state.{}, ({}) var)) {{\n",
                    scalar.check_updated(),
                    field,
                    c_type
                ));
                output.push_str(&format!("            resource->state.{} = ({}) var;\n", field, c_type));
                output.push_str(&format!(
                    "            {}_resource_schedule_update(&resource->base);\n        }}\n    }}\n    return r;\n}}\n",
                    kind
                ));
            }
        }
        blocks.push(output);
    }
    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(rt: &str, props: serde_json::Value) -> Resource {
        let definition = json!({"type": "object", "title": "Test", "properties": props});
        Resource::from_definition(rt, &definition, "oic").unwrap().unwrap()
    }

    fn switch(rt: &str) -> Resource {
        resource(
            rt,
            json!({
                "value": {"type": "boolean", "read_only": false, "short_description": "State"},
                "id": {"type": "string", "read_only": true, "short_description": "Instance ID"}
            }),
        )
    }

    #[test]
    fn state_struct_and_enums() {
        let light = resource(
            "oic.r.light.mode",
            json!({
                "mode": {"enum": ["auto", "on-demand"], "read_only": false, "short_description": "Mode"},
                "level": {"type": "number", "read_only": false}
            }),
        );
        let glue = CGlue::new().resource(&light);
        assert!(glue.common.contains(
            "enum oic_state_light_mode_mode { OIC_STATE_LIGHT_MODE_MODE_AUTO, OIC_STATE_LIGHT_MODE_MODE_ON_DEMAND };\n"
        ));
        assert!(glue
            .common
            .contains("    SOL_STR_TABLE_ITEM(\"on_demand\", OIC_STATE_LIGHT_MODE_MODE_ON_DEMAND),\n"));
        assert!(glue.common.contains("    enum oic_state_light_mode_mode mode; /* Mode */\n"));
        assert!(glue.common.contains("    double level; /* ??? */\n"));
        assert!(glue.common.contains("    if (check_updated_int32(state->mode, fields.mode)) {\n"));
    }

    #[test]
    fn client_skips_read_only_properties() {
        let glue = CGlue::new().resource(&switch("oic.r.switch.binary"));
        assert!(glue.client.contains("oic_client_switch_binary_set_value("));
        assert!(!glue.client.contains("oic_client_switch_binary_set_id("));
        assert!(glue.server.contains("oic_server_switch_binary_set_id("));
        assert!(glue.client.contains("return oic_state_switch_binary_from_repr_vec(&res->state, repr_vec, ~0);"));
        // value sorts first; only it is writable
        assert!(glue.server.contains("repr_vec, 0x1);"));
        assert!(glue
            .client
            .contains("    sol_flow_send_boolean_packet(resource->node, SOL_FLOW_NODE_TYPE_OIC_CLIENT_SWITCH_BINARY__OUT__VALUE, state->state.value);\n"));
        assert!(glue.client.contains("    free(resource->state.id);\n    client_resource_close(&resource->base);\n"));
    }

    #[test]
    fn equivalent_resources_forward() {
        let mut glue = CGlue::new();
        glue.resource(&switch("oic.r.switch.binary"));
        let second = glue.resource(&switch("oic.r.switch.other"));
        assert!(second
            .common
            .contains("return oic_state_switch_binary_from_repr_vec((struct oic_state_switch_binary *)state, repr_map, decode_mask);"));
        assert!(second
            .client
            .contains("return oic_client_switch_binary_to_repr_vec(data, repr_map_encoder);"));
        assert!(second
            .server
            .contains("return oic_server_switch_binary_to_repr_vec(data, repr_map_encoder);"));
    }

    #[test]
    fn read_only_resources_omit_writers() {
        let sensor = resource(
            "oic.r.sensor",
            json!({"value": {"type": "integer", "read_only": true, "short_description": "Reading"}}),
        );
        let glue = CGlue::new().resource(&sensor);
        assert!(!glue.client.contains("_to_repr_vec(void *data"));
        assert!(glue.client.contains("        .to_repr_vec = NULL,\n"));
        assert!(!glue.server.contains("oic_server_sensor_inform_flow(struct"));
        assert!(glue.server.contains("        .from_repr_vec = NULL,\n        .inform_flow = NULL\n"));
        assert!(!glue.server.contains("oic_server_sensor_from_repr_vec(struct server_resource"));
    }

    #[test]
    fn master_wraps_blocks() {
        let glue = CGlue::new().resource(&switch("oic.r.switch.binary"));
        let c = master_c(&[glue], "oic-gen.c", "oic-gen.h");
        assert!(c.starts_with("\n#include <assert.h>\n"));
        assert!(c.contains("#include \"oic-gen.h\"\n"));
        assert!(c.contains("static inline bool\ncheck_updated_string("));
        assert!(c.ends_with("#undef RETURN_ERROR\n\n#include \"oic-gen.c\"\n"));
        let common = c.find("struct oic_state_switch_binary {").unwrap();
        let client = c.find("struct oic_client_switch_binary {").unwrap();
        let server = c.find("struct oic_server_switch_binary {").unwrap();
        assert!(common < client && client < server);
    }
}
