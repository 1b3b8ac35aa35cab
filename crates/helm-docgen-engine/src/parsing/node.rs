use super::annotations::{Annotations, documentation_text};
use crate::yaml::resolve::{NULL_TAG, STR_TAG};

/// Shape marker of the value a key documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindTag {
    /// A scalar carrying its resolved YAML tag, e.g. `!!str`.
    Scalar(String),
    Map,
    Seq,
}

impl KindTag {
    pub fn as_str(&self) -> &str {
        match self {
            KindTag::Scalar(tag) => tag,
            KindTag::Map => "!!map",
            KindTag::Seq => "!!seq",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, KindTag::Map | KindTag::Seq)
    }

    /// Reader-facing kind name.
    pub fn kind_name(&self) -> String {
        match self.as_str() {
            "!!str" => "string".to_string(),
            "!!int" => "integer".to_string(),
            "!!bool" => "boolean".to_string(),
            "!!float" => "float".to_string(),
            "!!null" => "null".to_string(),
            "!!map" => "map".to_string(),
            "!!seq" => "array".to_string(),
            other => other.trim_start_matches('!').to_string(),
        }
    }
}

/// One documented configuration entry.
///
/// Built once by the tree builder and only read afterwards. Everything the
/// renderer shows besides `key` is derived from these fields on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocNode {
    pub key: String,
    /// Raw head comment of the key, directives included.
    pub comment: String,
    pub annotations: Annotations,
    /// `None` only when recursion was stopped.
    pub kind_tag: Option<KindTag>,
    pub default: Option<String>,
    /// 1-based source column of the key.
    pub column: usize,
    /// Anchor of the nearest enclosing container.
    pub parent_breadcrumb: String,
    /// The key sits in a map that was unwrapped from a list item.
    pub parent_was_map: bool,
    pub children: Vec<DocNode>,
}

impl DocNode {
    /// Synthetic root holding the top-level entries. Never rendered.
    pub fn root(children: Vec<DocNode>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// URL-safe identifier unique among siblings: breadcrumb, `-`, slugged key.
    pub fn anchor(&self) -> String {
        format!("{}-{}", self.parent_breadcrumb, slug(&self.key))
    }

    pub fn is_recursion_stopped(&self) -> bool {
        self.annotations.stops_recursion()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Kind shown to the reader: `@type` if given, otherwise named after the tag.
    pub fn kind(&self) -> Option<String> {
        self.annotations
            .kind
            .clone()
            .or_else(|| self.kind_tag.as_ref().map(KindTag::kind_name))
    }

    /// Default shown to the reader, if any.
    pub fn formatted_default(&self) -> Option<String> {
        if let Some(default) = &self.annotations.default {
            return Some(default.clone()).filter(|d| !d.is_empty());
        }

        let tag = self.kind_tag.as_ref().map(KindTag::as_str);
        let default = match (tag, self.default.as_deref()) {
            (Some(NULL_TAG), _) => "null".to_string(),
            (Some(STR_TAG), Some("")) => "\"\"".to_string(),
            (_, Some(default)) => default.to_string(),
            (_, None) => return None,
        };
        Some(default).filter(|d| !d.is_empty())
    }

    /// Documentation text with continuation lines indented under the bullet.
    pub fn documentation(&self) -> Option<String> {
        let text = documentation_text(&self.comment);
        if text.is_empty() {
            return None;
        }

        let continuation = format!("{}  ", self.leading_indent());
        let mut out = String::with_capacity(text.len());
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&continuation);
                }
            }
            out.push_str(line);
        }
        Some(out)
    }

    /// Spaces before this node's bullet.
    pub fn leading_indent(&self) -> String {
        let mut width = self.column.saturating_sub(1);
        if self.parent_was_map {
            // The list item's `- ` is not a nesting level of its own.
            width = width.saturating_sub(2);
        }
        " ".repeat(width)
    }
}

/// Lower-cases `key` and collapses every run of non-alphanumeric characters
/// into a single `-`, trimmed at both ends.
pub fn slug(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut pending_separator = false;
    for c in key.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}
