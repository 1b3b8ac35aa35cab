//! Markdown rendering of a finished documentation tree.
//!
//! Rendering only reads the tree. Each node becomes one [`DocRecord`] in
//! depth-first pre-order, and the records are joined with blank lines.

use std::fmt;

use crate::parsing::{DocNode, KindTag};

/// Marker authors put in documentation for enterprise-only settings.
pub const ENTERPRISE_SENTINEL: &str = "[Enterprise Only]";
/// What [`ENTERPRISE_SENTINEL`] becomes in the published document.
pub const ENTERPRISE_MARKUP: &str = "<EnterpriseAlert inline />";

/// Everything one output bullet needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRecord {
    pub indent: String,
    pub key: String,
    pub anchor: String,
    /// `None` for containers, maps and recursion-stopped nodes without `@type`.
    pub kind: Option<String>,
    /// Single line; embedded newlines are escaped as `\n`.
    pub default: Option<String>,
    pub documentation: Option<String>,
}

impl DocRecord {
    pub fn from_node(node: &DocNode) -> Self {
        let is_container =
            node.kind_tag.as_ref().is_some_and(KindTag::is_container) && !node.is_leaf();
        Self {
            indent: node.leading_indent(),
            key: node.key.clone(),
            anchor: node.anchor(),
            kind: node.kind().filter(|kind| !is_container && kind != "map"),
            default: node.formatted_default().map(|default| single_line(&default)),
            documentation: node.documentation(),
        }
    }
}

impl fmt::Display for DocRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}- `{}` ((#v{}))", self.indent, self.key, self.anchor)?;
        if let Some(kind) = &self.kind {
            write!(f, " (`{kind}")?;
            if let Some(default) = &self.default {
                write!(f, ": {default}")?;
            }
            f.write_str("`)")?;
        }
        if let Some(documentation) = &self.documentation {
            write!(f, " - {documentation}")?;
        }
        Ok(())
    }
}

/// Keeps a multi-line default inside one inline code span.
fn single_line(default: &str) -> String {
    default.trim_end_matches('\n').replace('\n', "\\n")
}

/// Records for every node below `root`, parents before their children.
pub fn render_records(root: &DocNode) -> Vec<DocRecord> {
    let mut records = Vec::new();
    collect(root, &mut records);
    records
}

fn collect(node: &DocNode, records: &mut Vec<DocRecord>) {
    for child in &node.children {
        records.push(DocRecord::from_node(child));
        collect(child, records);
    }
}

/// The publishable document for the tree below `root`.
pub fn render_document(root: &DocNode) -> String {
    render_records(root)
        .iter()
        .map(DocRecord::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
        .replace(ENTERPRISE_SENTINEL, ENTERPRISE_MARKUP)
}
