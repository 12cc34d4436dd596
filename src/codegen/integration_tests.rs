// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::codegen::{generate_header, generate_source, NodeTypeJob, StubJob};
    use crate::descriptor::DescriptorLoader;
    use crate::traits::Generator;
    use std::fs;

    fn loader() -> DescriptorLoader {
        DescriptorLoader::new(Some("sol_flow_node_type"))
    }

    /// Generating twice from the same description gives identical files
    #[test]
    fn test_generation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("timer-gen.h");
        let source = dir.path().join("timer-gen.c");
        let job = NodeTypeJob::new("descriptors/timer.json", &header, &source, loader());

        job.run().unwrap();
        let first = (fs::read(&header).unwrap(), fs::read(&source).unwrap());
        job.run().unwrap();
        let second = (fs::read(&header).unwrap(), fs::read(&source).unwrap());
        assert_eq!(first, second);
    }

    /// Array ports take one index per element everywhere indices appear
    #[test]
    fn test_array_port_indexing_is_consistent() {
        let bundle = loader().load("descriptors/boolean.json").unwrap();
        let header = generate_header(&bundle);
        let source = generate_source(&bundle, "boolean-gen.h");

        assert!(header.contains("#define SOL_FLOW_NODE_TYPE_BOOLEAN_AND__IN__IN (0)\n"));
        assert!(header.contains("#define SOL_FLOW_NODE_TYPE_BOOLEAN_AND__IN__IN_31 (31)\n"));
        assert!(source.contains("    if (port < 32)\n        return &sol_flow_node_type_boolean_and__in__IN;\n"));
        assert!(source.contains("            .array_size=32,\n            .base_port_idx=0,\n"));
        assert!(source.contains("        *ports_in_count = 32;\n"));
    }

    /// Bundle metadata and the per-bundle enumeration function
    #[test]
    fn test_bundle_source_enumerates_types() {
        let bundle = loader().load("descriptors/boolean.json").unwrap();
        let source = generate_source(&bundle, "boolean-gen.h");

        assert!(source.contains("sol_flow_foreach_builtin_node_type_boolean("));
        assert!(source.contains(
            "            &SOL_FLOW_NODE_TYPE_BOOLEAN_AND,\n            &SOL_FLOW_NODE_TYPE_BOOLEAN_NOT,\n            &SOL_FLOW_NODE_TYPE_BOOLEAN_TOGGLE,\n            NULL\n"
        ));
        assert_eq!(source.matches("    .author = \"Intel Corporation\",\n").count(), 3);
        assert!(!source.contains("<float.h>"));
    }

    /// Float options pull in float.h and range defaults render as C initializers
    #[test]
    fn test_timer_options() {
        let bundle = loader().load("descriptors/timer.json").unwrap();
        let header = generate_header(&bundle);

        assert!(header.contains("#include <float.h>\n"));
        assert!(header.contains("    .interval = { 1000, 1, INT32_MAX, 1 }, \\\n"));
        assert!(header.contains("    .jitter = { 0.5, -DBL_MAX, DBL_MAX, DBL_MIN }, \\\n"));
        assert!(header.contains("    .label = \"timer\", \\\n"));
        assert!(header.contains("    .color = { 255, 0, 0, 255, 255, 255 }, \\\n"));
        assert!(header.contains(
            "    struct sol_irange interval; /**< Milliseconds between ticks. (default: {'val': 1000, 'min': 1}) */\n"
        ));
        assert!(header.contains(
            "    const char * label; /**< Name used in log messages. (default: 'timer') */\n"
        ));
    }

    /// A stub for several inputs compiles against every generated source
    #[test]
    fn test_stub_for_multiple_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("impl.c");
        let job = StubJob {
            inputs: vec!["descriptors/boolean.json".into(), "descriptors/timer.json".into()],
            output: output.clone(),
            namespace: Some("sol-flow".to_string()),
            force: false,
            loader: loader(),
        };
        job.run().unwrap();

        let stub = fs::read_to_string(&output).unwrap();
        assert!(stub.contains("#include \"sol-flow/boolean.h\"\n#include \"sol-flow/timer.h\"\n"));
        assert!(stub.contains("struct boolean_data {\n"));
        assert!(stub.contains("struct timer_data {\n"));
        assert!(stub.contains("    struct sol_irange in_value;\n"));
        assert!(stub.ends_with("#include \"boolean-gen.c\"\n#include \"timer-gen.c\"\n"));
    }

    /// Invalid descriptions never produce outputs
    #[test]
    fn test_invalid_description_leaves_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("broken-gen.h");
        let source = dir.path().join("broken-gen.c");
        let job = NodeTypeJob::new("descriptors/invalid-port-name.json", &header, &source, loader());

        let err = job.run().unwrap_err();
        let report = err.report();
        assert!(report.iter().any(|l| l.contains("json['in_ports'][0]['name']")));
        assert!(report.iter().any(|l| l.contains("json['in_ports'][0]['data_type']")));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    /// A `null` string default is optional and initialised to NULL
    #[test]
    fn test_null_string_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("labelled.json");
        fs::write(
            &input,
            r#"{
  "name": "labelled",
  "category": "test",
  "options": {
    "version": 1,
    "members": [
      {"name": "label", "data_type": "string", "default": null}
    ]
  }
}"#,
        )
        .unwrap();

        let bundle = loader().load(&input).unwrap();
        let header = generate_header(&bundle);
        let source = generate_source(&bundle, "labelled-gen.h");

        assert!(header.contains("    const char * label; /**< (required) */\n"));
        assert!(header.contains("    .label = NULL, \\\n"));
        assert!(source.contains("        .required = false,\n"));
        assert!(source.contains("                .required=false,\n"));
        assert!(source.contains("                .defvalue = {\n                    .s=NULL,\n"));
    }
}
