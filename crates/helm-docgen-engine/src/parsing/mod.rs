//! # Documentation tree builder
//!
//! Turns the generic YAML tree into an immutable [`DocNode`] tree in a single
//! top-down pass. Each subtree is finished and validated before its parent
//! continues; any failure aborts the whole build.
//!
//! ## Modules
//!
//! - **`annotations`**: `@type`, `@default` and `@recurse` directives in head
//!   comments
//! - **`fence`**: code fence tracking for comment blocks
//! - **`node`**: `DocNode` and its derived anchor, kind, default and indent
//! - **`pairing`**: key/value pairing and the array-of-maps unwrap
//! - **`builder`**: dispatch on the value's shape
//! - **`flow`**: inline rendering of scalar-only sequences
//! - **`validate`**: node invariants and per-group anchor uniqueness

pub mod annotations;
pub mod builder;
pub mod fence;
pub mod flow;
pub mod node;
pub mod pairing;
pub mod validate;

pub use annotations::Annotations;
pub use node::{DocNode, KindTag};

use crate::error::DocsError;
use crate::yaml::resolve::NULL_TAG;
use crate::yaml::{Node, NodeKind};
use validate::Siblings;

/// Builds the validated documentation tree below a synthetic root.
pub fn parse_tree(root: &Node) -> Result<DocNode, DocsError> {
    match root.kind {
        NodeKind::Mapping => {
            let mut siblings = Siblings::default();
            pairing::parse_content(&root.content, "", false, &mut siblings)?;
            log::debug!("built documentation tree with {} top-level entries", siblings.len());
            Ok(DocNode::root(siblings.into_nodes()))
        }
        NodeKind::Scalar if root.tag == NULL_TAG => Ok(DocNode::root(vec![])),
        kind => Err(DocsError::Pairing {
            parent_anchor: String::new(),
            key: String::new(),
            message: format!("document root must be a mapping, found {kind}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_root_has_no_children() {
        let root = parse_tree(&Node::scalar("~")).unwrap();
        assert_eq!(root, DocNode::root(vec![]));
    }

    #[test]
    fn sequence_root_is_rejected() {
        let err = parse_tree(&Node::sequence(vec![Node::scalar("a")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error under '' at key '': document root must be a mapping, found sequence"
        );
    }

    #[test]
    fn mapping_root_builds_top_level_entries() {
        let root = Node::mapping(vec![
            Node::scalar("enabled").at(1, 1),
            Node::scalar("true"),
        ]);
        let tree = parse_tree(&root).unwrap();
        assert_eq!(tree.key, "");
        assert_eq!(tree.kind_tag, None);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].anchor(), "-enabled");
    }
}
