use std::collections::HashMap;

use super::node::{DocNode, KindTag, slug};
use crate::error::DocsError;

/// Checks that a freshly built node is internally consistent.
pub fn validate(node: &DocNode) -> Result<(), DocsError> {
    let fail = |message: &str| -> Result<(), DocsError> {
        Err(DocsError::Validation {
            anchor: node.anchor(),
            message: message.to_string(),
        })
    };

    if node.is_recursion_stopped() {
        if node.kind_tag.is_some() || node.default.is_some() || !node.children.is_empty() {
            return fail("node with @recurse: false must not carry a kind, default or children");
        }
        return Ok(());
    }

    if node.key.trim().is_empty() {
        return fail("key is empty");
    }
    if slug(&node.key).is_empty() {
        return fail("key has no letters or digits to build an anchor from");
    }

    match &node.kind_tag {
        None => fail("node has no kind"),
        Some(KindTag::Scalar(_)) if !node.children.is_empty() => {
            fail("scalar node must not have children")
        }
        Some(KindTag::Map) if node.default.is_some() => fail("map node must not carry a default"),
        Some(KindTag::Seq) if !node.children.is_empty() && node.default.is_some() => {
            fail("array node with children must not carry a default")
        }
        Some(KindTag::Scalar(_) | KindTag::Seq) if node.is_leaf() && node.default.is_none() => {
            fail("leaf node has no default")
        }
        Some(_) => Ok(()),
    }
}

/// Nodes accepted under one breadcrumb, in document order.
#[derive(Debug, Default)]
pub struct Siblings {
    nodes: Vec<DocNode>,
    /// anchor -> key of the node that claimed it
    anchors: HashMap<String, String>,
}

impl Siblings {
    /// Validates `node` and appends it unless its anchor is already taken.
    pub fn accept(&mut self, node: DocNode) -> Result<(), DocsError> {
        validate(&node)?;

        let anchor = node.anchor();
        if let Some(existing) = self.anchors.get(&anchor) {
            return Err(DocsError::Validation {
                message: format!(
                    "duplicate anchor: keys '{existing}' and '{}' both resolve to '{anchor}'",
                    node.key
                ),
                anchor,
            });
        }

        self.anchors.insert(anchor, node.key.clone());
        self.nodes.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<DocNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::annotations::Annotations;
    use rstest::rstest;

    fn scalar(key: &str, default: Option<&str>) -> DocNode {
        DocNode {
            key: key.to_string(),
            kind_tag: Some(KindTag::Scalar("!!str".to_string())),
            default: default.map(str::to_string),
            column: 1,
            ..DocNode::default()
        }
    }

    fn stopped(key: &str) -> DocNode {
        DocNode {
            key: key.to_string(),
            comment: "# @recurse: false".to_string(),
            annotations: Annotations::extract("# @recurse: false"),
            column: 1,
            ..DocNode::default()
        }
    }

    fn message(result: Result<(), DocsError>) -> String {
        match result {
            Err(DocsError::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_leaf_passes() {
        assert!(validate(&scalar("name", Some("consul"))).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_key_fails(#[case] key: &str) {
        assert_eq!(message(validate(&scalar(key, Some("x")))), "key is empty");
    }

    #[rstest]
    #[case("~")]
    #[case("--")]
    #[case("*.*")]
    fn key_without_alphanumerics_fails(#[case] key: &str) {
        assert_eq!(
            message(validate(&scalar(key, Some("x")))),
            "key has no letters or digits to build an anchor from"
        );
    }

    #[test]
    fn recursion_stopped_node_may_have_empty_key() {
        assert!(validate(&stopped("")).is_ok());
    }

    #[test]
    fn recursion_stopped_node_with_default_fails() {
        let mut node = stopped("k");
        node.default = Some("x".to_string());
        assert!(validate(&node).is_err());
    }

    #[test]
    fn map_with_default_fails() {
        let node = DocNode {
            key: "global".to_string(),
            kind_tag: Some(KindTag::Map),
            default: Some("x".to_string()),
            ..DocNode::default()
        };
        assert_eq!(message(validate(&node)), "map node must not carry a default");
    }

    #[test]
    fn scalar_with_children_fails() {
        let mut node = scalar("k", Some("v"));
        node.children.push(scalar("child", Some("v")));
        assert_eq!(message(validate(&node)), "scalar node must not have children");
    }

    #[test]
    fn leaf_without_default_fails() {
        assert_eq!(message(validate(&scalar("k", None))), "leaf node has no default");

        let seq = DocNode {
            key: "items".to_string(),
            kind_tag: Some(KindTag::Seq),
            ..DocNode::default()
        };
        assert_eq!(message(validate(&seq)), "leaf node has no default");
    }

    #[test]
    fn siblings_reject_colliding_anchors() {
        let mut siblings = Siblings::default();
        siblings.accept(scalar("foo_bar", Some("1"))).unwrap();

        let err = siblings.accept(scalar("Foo-Bar", Some("2"))).unwrap_err();
        match err {
            DocsError::Validation { anchor, message } => {
                assert_eq!(anchor, "-foo-bar");
                assert!(message.contains("'foo_bar'"), "{message}");
                assert!(message.contains("'Foo-Bar'"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn siblings_keep_document_order() {
        let mut siblings = Siblings::default();
        for key in ["b", "a", "c"] {
            siblings.accept(scalar(key, Some("v"))).unwrap();
        }
        let keys: Vec<_> = siblings.into_nodes().into_iter().map(|n| n.key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
