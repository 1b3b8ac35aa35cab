//! # Generic YAML node tree
//!
//! The documentation builder never looks at YAML text directly. It consumes a
//! small, generic node tree in the shape most YAML libraries expose: every
//! node has a kind, a resolved tag, a scalar value, the comment block directly
//! above it, and an ordered list of child nodes.
//!
//! ## Content layout
//!
//! - **Mapping**: `content` alternates key and value nodes
//!   (`[k0, v0, k1, v1, ...]`)
//! - **Sequence**: `content` holds the elements in document order
//! - **Scalar**: `content` is empty
//!
//! ## Modules
//!
//! - **`loader`**: builds the tree from `saphyr-parser` events and attaches
//!   head comments by scanning source lines
//! - **`resolve`**: core-schema tag resolution for plain scalars

pub mod loader;
pub mod resolve;

use std::fmt;

pub use loader::parse;

/// Shape of a YAML node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Mapping,
    Sequence,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => f.write_str("scalar"),
            NodeKind::Mapping => f.write_str("mapping"),
            NodeKind::Sequence => f.write_str("sequence"),
        }
    }
}

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A node of the generic YAML tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Resolved tag in short form, e.g. `!!str`, `!!map`.
    pub tag: String,
    /// Scalar text; empty for collections.
    pub value: String,
    pub style: ScalarStyle,
    /// Raw comment lines directly above the node, each still starting with `#`.
    pub head_comment: String,
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub column: usize,
    pub content: Vec<Node>,
}

impl Node {
    /// A plain scalar with its tag resolved from the text.
    pub fn scalar(value: impl Into<String>) -> Self {
        let value = value.into();
        let tag = resolve::resolve_plain(&value).to_string();
        Self {
            kind: NodeKind::Scalar,
            tag,
            value,
            style: ScalarStyle::Plain,
            head_comment: String::new(),
            line: 0,
            column: 0,
            content: vec![],
        }
    }

    pub fn mapping(content: Vec<Node>) -> Self {
        Self::collection(NodeKind::Mapping, "!!map", content)
    }

    pub fn sequence(content: Vec<Node>) -> Self {
        Self::collection(NodeKind::Sequence, "!!seq", content)
    }

    fn collection(kind: NodeKind, tag: &str, content: Vec<Node>) -> Self {
        Self {
            kind,
            tag: tag.to_string(),
            value: String::new(),
            style: ScalarStyle::Plain,
            head_comment: String::new(),
            line: 0,
            column: 0,
            content,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.head_comment = comment.into();
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping | NodeKind::Sequence)
    }
}
