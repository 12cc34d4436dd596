// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::codegen::NodeTypeJob;
    use crate::descriptor::{validate_document, DescriptorLoader};
    use crate::oic::OicJob;
    use crate::traits::Generator;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    fn job(out: &Path) -> OicJob {
        OicJob {
            schema_dirs: vec!["schemas/oic".into()],
            node_type_json: out.join("oic.json"),
            node_type_impl: out.join("oic.c"),
            gen_c: "oic-gen.c".into(),
            gen_h: "oic-gen.h".into(),
        }
    }

    fn type_names(master: &Value) -> Vec<&str> {
        master["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect()
    }

    /// Unsupported schemas are skipped and the rest still generate
    #[test]
    fn test_scan_skips_unsupported_schemas() {
        let dir = tempfile::tempdir().unwrap();
        let report = job(dir.path()).run().unwrap();

        assert_eq!(report.artifacts, vec![dir.path().join("oic.json"), dir.path().join("oic.c")]);
        assert_eq!(report.notes.len(), 1);
        assert!(report.notes[0].contains("oic.r.scenes.json"));
        assert!(report.notes[0].contains("sceneValues"));

        let master: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("oic.json")).unwrap()).unwrap();
        assert_eq!(
            type_names(&master),
            vec![
                "oic/server-light-brightness",
                "oic/server-mode",
                "oic/server-switch-binary",
                "oic/client-light-brightness",
                "oic/client-mode",
                "oic/client-switch-binary",
            ]
        );
        validate_document(&master).unwrap();
    }

    /// References are expanded before translation
    #[test]
    fn test_references_feed_properties() {
        let dir = tempfile::tempdir().unwrap();
        job(dir.path()).run().unwrap();
        let master: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("oic.json")).unwrap()).unwrap();

        let switch_client = &master["types"][5];
        let out_ports: Vec<&str> = switch_client["out_ports"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(out_ports, vec!["FOUND", "DEVICE_ID", "VALUE", "ID", "N"]);
        assert_eq!(switch_client["in_ports"].as_array().unwrap().len(), 3);
        assert_eq!(switch_client["description"], "OIC Client (Binary Switch)");

        let mode_server = &master["types"][1];
        assert_eq!(mode_server["in_ports"][0]["name"], "MODES");
        assert_eq!(mode_server["in_ports"][1]["name"], "TARGET_LEVEL");
        assert_eq!(mode_server["in_ports"][1]["data_type"], "float");
        assert_eq!(master["types"][0]["description"], "OIC Server (Light Brightness)");

        let c = fs::read_to_string(dir.path().join("oic.c")).unwrap();
        assert!(c.contains("enum oic_state_mode_modes { OIC_STATE_MODE_MODES_AUTO, OIC_STATE_MODE_MODES_MANUAL, OIC_STATE_MODE_MODES_ECO_MODE };"));
        assert!(c.contains("SOL_STR_SLICE_LITERAL(\"oic.r.switch.binary\")"));
    }

    /// The bundle compiles into the macros the glue refers to
    #[test]
    fn test_bundle_compiles_with_node_type_generator() {
        let dir = tempfile::tempdir().unwrap();
        job(dir.path()).run().unwrap();

        let header = dir.path().join("oic-gen.h");
        let source = dir.path().join("oic-gen.c");
        NodeTypeJob::new(
            dir.path().join("oic.json"),
            &header,
            &source,
            DescriptorLoader::new(Some("sol_flow_node_type")),
        )
        .run()
        .unwrap();

        let header = fs::read_to_string(&header).unwrap();
        let glue = fs::read_to_string(dir.path().join("oic.c")).unwrap();
        for port in ["__OUT__FOUND", "__OUT__DEVICE_ID", "__OUT__VALUE"] {
            let symbol = format!("SOL_FLOW_NODE_TYPE_OIC_CLIENT_SWITCH_BINARY{}", port);
            assert!(header.contains(&format!("#define {} ", symbol)), "{} missing from header", symbol);
            assert!(glue.contains(&symbol), "{} missing from glue", symbol);
        }
        assert!(header.contains("struct sol_flow_node_type_oic_client_switch_binary_options {"));
        assert!(glue.contains("const struct sol_flow_node_type_oic_client_switch_binary_options *node_opts ="));
    }

    /// Definitions translated before an unsupported one are kept
    #[test]
    fn test_partial_schema_keeps_earlier_resources() {
        let schemas = tempfile::tempdir().unwrap();
        fs::write(
            schemas.path().join("oic.r.pair.json"),
            r#"{
    "$schema": "http://json-schema.org/draft-04/schema#",
    "title": "Pair",
    "definitions": {
        "oic.r.level": {
            "type": "object",
            "title": "Level",
            "properties": {"level": {"type": "integer", "description": "Current level"}}
        },
        "oic.r.history": {
            "type": "object",
            "properties": {"values": {"type": "array", "items": {"type": "integer"}}}
        }
    }
}"#,
        )
        .unwrap();

        let out = tempfile::tempdir().unwrap();
        let mut partial = job(out.path());
        partial.schema_dirs = vec![schemas.path().to_path_buf()];
        let report = partial.run().unwrap();

        assert_eq!(report.notes.len(), 1);
        assert!(report.notes[0].contains("kept 1 resource(s)"));
        let master: Value = serde_json::from_str(&fs::read_to_string(out.path().join("oic.json")).unwrap()).unwrap();
        assert_eq!(type_names(&master), vec!["oic/server-level", "oic/client-level"]);
    }
}
