use std::slice;

use super::builder::{build_node, element_leaf};
use super::validate::Siblings;
use crate::error::DocsError;
use crate::yaml::{Node, NodeKind};

/// A key node and the value node that follows it in mapping content.
#[derive(Debug, Clone, Copy)]
pub struct Pair<'a> {
    pub key: &'a Node,
    pub value: &'a Node,
}

/// Pairs `content[index]` with `content[index + 1]`.
///
/// Returns the pair and the index of the next unconsumed node.
pub fn next_pair<'a>(
    content: &'a [Node],
    index: usize,
    parent_breadcrumb: &str,
) -> Result<(Pair<'a>, usize), DocsError> {
    let length_error = |key: &str| DocsError::Pairing {
        parent_anchor: parent_breadcrumb.to_string(),
        key: key.to_string(),
        message: format!(
            "content length incorrect, expected {} got {}",
            index + 2,
            content.len()
        ),
    };

    let Some(key) = content.get(index) else {
        return Err(length_error(""));
    };
    let Some(value) = content.get(index + 1) else {
        return Err(length_error(&key.value));
    };
    Ok((Pair { key, value }, index + 2))
}

/// Builds every key/value pair of `content` into `siblings`.
///
/// A lone collection is not pairable content but a wrapper around it, and is
/// handed to [`unwrap_wrapper`] instead.
pub fn parse_content(
    content: &[Node],
    parent_breadcrumb: &str,
    parent_was_map: bool,
    siblings: &mut Siblings,
) -> Result<(), DocsError> {
    if let [wrapper] = content
        && wrapper.is_collection()
    {
        return unwrap_wrapper(wrapper, parent_breadcrumb, siblings);
    }

    let mut index = 0;
    while index < content.len() {
        let (pair, next) = next_pair(content, index, parent_breadcrumb)?;
        let node = build_node(pair, parent_breadcrumb, parent_was_map)?;
        siblings.accept(node)?;
        index = next;
    }
    Ok(())
}

/// Array-of-maps unwrap: the entries of a single wrapped collection join the
/// caller's sibling group directly, without a node for the wrapper itself.
pub fn unwrap_wrapper(
    wrapper: &Node,
    parent_breadcrumb: &str,
    siblings: &mut Siblings,
) -> Result<(), DocsError> {
    match wrapper.kind {
        NodeKind::Mapping => parse_content(&wrapper.content, parent_breadcrumb, true, siblings),
        NodeKind::Sequence => parse_elements(&wrapper.content, parent_breadcrumb, siblings),
        NodeKind::Scalar => Err(DocsError::Pairing {
            parent_anchor: parent_breadcrumb.to_string(),
            key: wrapper.value.clone(),
            message: "a scalar cannot be unwrapped".to_string(),
        }),
    }
}

/// Walks the elements of a sequence that is documented as a container.
///
/// Collections go through the dispatcher one at a time, so each is unwrapped
/// into `siblings`. Scalars become leaves keyed by their own text.
pub fn parse_elements(
    elements: &[Node],
    parent_breadcrumb: &str,
    siblings: &mut Siblings,
) -> Result<(), DocsError> {
    for element in elements {
        if element.is_scalar() {
            siblings.accept(element_leaf(element, parent_breadcrumb))?;
        } else {
            parse_content(slice::from_ref(element), parent_breadcrumb, true, siblings)?;
        }
    }
    Ok(())
}
