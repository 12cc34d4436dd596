// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! C identifier rules shared by every emitter.

use regex::Regex;
use std::sync::LazyLock;

static PORT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z0-9_]+)(?:\[([0-9]+)\])?$").expect("port name pattern is valid")
});

static C_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Replace every character that cannot appear in a C identifier with `_`.
pub fn c_clean(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

pub fn is_c_identifier(s: &str) -> bool {
    C_IDENTIFIER.is_match(s)
}

pub fn is_port_name(s: &str) -> bool {
    PORT_NAME.is_match(s)
}

/// Split `IN[4]` into `("IN", 4)`. Plain ports have size 0.
///
/// Names that do not follow the port pattern are returned whole with size 0;
/// the schema rejects them before code generation runs.
pub fn port_name_and_size(name: &str) -> (String, usize) {
    match PORT_NAME.captures(name) {
        Some(caps) => {
            let base = caps.get(1).map_or(name, |m| m.as_str()).to_string();
            let size = caps
                .get(2)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .unwrap_or(0);
            (base, size)
        }
        None => (name.to_string(), 0),
    }
}

/// Lower and upper case C names of a node type or bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CNames {
    pub lower: String,
    pub upper: String,
}

impl CNames {
    /// `[prefix_]name`, cleaned and lower-cased.
    pub fn new(prefix: Option<&str>, name: &str) -> Self {
        let base = c_clean(&name.to_lowercase());
        let lower = match prefix.map(c_clean).filter(|p| !p.is_empty()) {
            Some(prefix_c) => format!("{}_{}", prefix_c, base),
            None => base,
        };
        let upper = lower.to_uppercase();
        Self { lower, upper }
    }
}
