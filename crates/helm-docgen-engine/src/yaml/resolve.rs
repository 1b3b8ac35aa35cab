use std::sync::OnceLock;

use regex::Regex;

pub const NULL_TAG: &str = "!!null";
pub const BOOL_TAG: &str = "!!bool";
pub const INT_TAG: &str = "!!int";
pub const FLOAT_TAG: &str = "!!float";
pub const STR_TAG: &str = "!!str";

const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Resolves the tag of an untagged plain scalar using the YAML 1.2 core schema.
pub fn resolve_plain(value: &str) -> &'static str {
    static INT_REGEX: OnceLock<Regex> = OnceLock::new();
    static FLOAT_REGEX: OnceLock<Regex> = OnceLock::new();

    let int_regex = INT_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[-+]?[0-9][0-9_]*|0o[0-7_]+|0x[0-9a-fA-F_]+)$").expect("Invalid int regex")
    });
    let float_regex = FLOAT_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:[-+]?(?:\.[0-9]+|[0-9][0-9_]*(?:\.[0-9_]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        )
        .expect("Invalid float regex")
    });

    match value {
        "" | "~" | "null" | "Null" | "NULL" => NULL_TAG,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => BOOL_TAG,
        _ if int_regex.is_match(value) => INT_TAG,
        _ if float_regex.is_match(value) => FLOAT_TAG,
        _ => STR_TAG,
    }
}

/// Shortens an explicit tag to the `!!name` form for core schema tags.
pub fn short_tag(handle: &str, suffix: &str) -> String {
    if handle == "!!" || handle == CORE_SCHEMA_PREFIX {
        format!("!!{suffix}")
    } else {
        format!("{handle}{suffix}")
    }
}
