use super::annotations::Annotations;
use super::flow::{is_uniform_scalar, to_inline_yaml};
use super::node::{DocNode, KindTag};
use super::pairing::{Pair, parse_content, parse_elements};
use super::validate::Siblings;
use crate::error::DocsError;
use crate::yaml::{Node, NodeKind};

/// Builds the node for one key/value pair, descending into containers.
///
/// The result is not validated here; the caller's sibling group does that on
/// acceptance.
pub fn build_node(
    pair: Pair<'_>,
    parent_breadcrumb: &str,
    parent_was_map: bool,
) -> Result<DocNode, DocsError> {
    let Pair { key, value } = pair;
    let mut node = bare_node(key, parent_breadcrumb);
    if node.is_recursion_stopped() {
        return Ok(node);
    }
    node.parent_was_map = parent_was_map;

    match value.kind {
        NodeKind::Scalar => {
            node.kind_tag = Some(KindTag::Scalar(value.tag.clone()));
            node.default = Some(value.value.clone());
        }
        NodeKind::Mapping => {
            node.kind_tag = Some(KindTag::Map);
            let mut children = Siblings::default();
            parse_content(&value.content, &node.anchor(), false, &mut children)?;
            node.children = children.into_nodes();
        }
        NodeKind::Sequence => {
            node.kind_tag = Some(KindTag::Seq);
            if value.content.is_empty() {
                node.default = Some("[]".to_string());
            } else if is_uniform_scalar(&value.content) {
                let inline =
                    to_inline_yaml(&value.content).map_err(|source| DocsError::Serialization {
                        parent_anchor: parent_breadcrumb.to_string(),
                        key: node.key.clone(),
                        source,
                    })?;
                node.default = Some(inline);
            } else {
                let mut children = Siblings::default();
                parse_elements(&value.content, &node.anchor(), &mut children)?;
                node.children = children.into_nodes();
            }
        }
    }

    log::trace!(
        "built {} with {} children",
        node.anchor(),
        node.children.len()
    );
    Ok(node)
}

/// Leaf for a scalar element of a container sequence, keyed by its own text.
pub fn element_leaf(element: &Node, parent_breadcrumb: &str) -> DocNode {
    let mut node = bare_node(element, parent_breadcrumb);
    if node.is_recursion_stopped() {
        return node;
    }
    node.kind_tag = Some(KindTag::Scalar(element.tag.clone()));
    node.default = Some(element.value.clone());
    node.parent_was_map = true;
    node
}

/// The fields every node carries, recursion-stopped ones included.
fn bare_node(key: &Node, parent_breadcrumb: &str) -> DocNode {
    DocNode {
        key: key.value.clone(),
        comment: key.head_comment.clone(),
        annotations: Annotations::extract(&key.head_comment),
        column: key.column,
        parent_breadcrumb: parent_breadcrumb.to_string(),
        ..DocNode::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(name: &str) -> Node {
        Node::scalar(name).at(1, 1)
    }

    fn build(key: &Node, value: &Node) -> Result<DocNode, DocsError> {
        build_node(Pair { key, value }, "", false)
    }

    #[test]
    fn scalar_value_is_a_leaf() {
        let node = build(&key("port"), &Node::scalar("8500")).unwrap();
        assert_eq!(node.kind_tag, Some(KindTag::Scalar("!!int".to_string())));
        assert_eq!(node.default.as_deref(), Some("8500"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn mapping_children_use_the_container_anchor() {
        let value = Node::mapping(vec![
            Node::scalar("name").at(2, 3),
            Node::scalar("consul"),
        ]);
        let node = build(&key("global"), &value).unwrap();

        assert_eq!(node.kind_tag, Some(KindTag::Map));
        assert_eq!(node.default, None);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].parent_breadcrumb, "-global");
        assert_eq!(node.children[0].anchor(), "-global-name");
        assert!(!node.children[0].parent_was_map);
    }

    #[test]
    fn empty_sequence_defaults_to_brackets() {
        let node = build(&key("extraLabels"), &Node::sequence(vec![])).unwrap();
        assert_eq!(node.kind_tag, Some(KindTag::Seq));
        assert_eq!(node.default.as_deref(), Some("[]"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn scalar_sequence_renders_inline() {
        let value = Node::sequence(vec![Node::scalar("a"), Node::scalar("b")]);
        let node = build(&key("args"), &value).unwrap();
        assert_eq!(node.default.as_deref(), Some(r#"["a", "b"]"#));
        assert!(node.children.is_empty());
    }

    #[test]
    fn sequence_of_maps_is_a_container() {
        let item = Node::mapping(vec![
            Node::scalar("name").at(2, 5),
            Node::scalar("ingress"),
            Node::scalar("replicas").at(3, 5),
            Node::scalar("1"),
        ]);
        let node = build(&key("gateways"), &Node::sequence(vec![item])).unwrap();

        assert_eq!(node.kind_tag, Some(KindTag::Seq));
        assert_eq!(node.default, None);
        let children: Vec<_> = node
            .children
            .iter()
            .map(|c| (c.anchor(), c.parent_was_map, c.leading_indent()))
            .collect();
        assert_eq!(
            children,
            vec![
                ("-gateways-name".to_string(), true, "  ".to_string()),
                ("-gateways-replicas".to_string(), true, "  ".to_string()),
            ]
        );
    }

    #[test]
    fn recursion_stop_ignores_the_value() {
        let key = key("server").with_comment("# @recurse: false");
        let value = Node::mapping(vec![Node::scalar("dangling")]);
        let node = build_node(Pair { key: &key, value: &value }, "-x", true).unwrap();

        assert!(node.is_recursion_stopped());
        assert_eq!(node.kind_tag, None);
        assert_eq!(node.default, None);
        assert!(node.children.is_empty());
        assert!(!node.parent_was_map);
        assert_eq!(node.parent_breadcrumb, "-x");
    }

    #[test]
    fn child_errors_abort_the_parent() {
        let value = Node::mapping(vec![Node::scalar("a"), Node::scalar("1"), Node::scalar("b")]);
        let err = build(&key("global"), &value).unwrap_err();
        assert!(matches!(
            err,
            DocsError::Pairing { ref parent_anchor, .. } if parent_anchor == "-global"
        ));
    }

    #[test]
    fn element_leaf_takes_its_own_text() {
        let element = Node::scalar("true").at(3, 5);
        let node = element_leaf(&element, "-flags");
        assert_eq!(node.key, "true");
        assert_eq!(node.kind(), Some("boolean".to_string()));
        assert_eq!(node.formatted_default().as_deref(), Some("true"));
        assert_eq!(node.leading_indent(), "  ");
    }
}
