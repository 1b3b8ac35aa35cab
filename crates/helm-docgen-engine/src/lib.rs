//! # helm-docgen engine
//!
//! Builds reference documentation from an annotated Helm `values.yaml`.
//!
//! ```text
//! source text -> yaml::parse -> Node -> parsing::parse_tree -> DocNode
//!             -> render::render_document -> markdown
//! ```
//!
//! ## Modules
//!
//! - **`yaml`**: generic YAML node tree with head comments
//! - **`parsing`**: annotation-aware builder of the `DocNode` tree
//! - **`render`**: nested markdown bullets for a finished tree
//! - **`io`**: reading values files and writing the output
//! - **`error`**: error types shared across the engine

pub mod error;
pub mod io;
pub mod parsing;
pub mod render;
pub mod yaml;

// Re-export key types for easier usage
pub use error::{DocsError, YamlError};
pub use io::*;
pub use parsing::{Annotations, DocNode, KindTag, parse_tree};
pub use render::{DocRecord, render_document, render_records};

/// Loads `yaml` and builds the validated documentation tree.
///
/// An empty document yields a root without children.
pub fn parse_document(yaml: &str) -> Result<DocNode, DocsError> {
    match yaml::parse(yaml)? {
        Some(root) => parse_tree(&root),
        None => Ok(DocNode::root(vec![])),
    }
}

/// Loads `yaml`, builds the tree and renders it.
pub fn generate_docs(yaml: &str) -> Result<String, DocsError> {
    let tree = parse_document(yaml)?;
    Ok(render_document(&tree))
}
