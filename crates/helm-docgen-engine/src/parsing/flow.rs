use crate::yaml::resolve::{NULL_TAG, STR_TAG};
use crate::yaml::{Node, NodeKind};

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("element {index} is a {kind}, only scalars can be written inline")]
    NotScalar { index: usize, kind: NodeKind },
    #[error("element {index} could not be quoted: {source}")]
    Encode {
        index: usize,
        source: serde_json::Error,
    },
}

/// True when every element is a scalar without content of its own.
pub fn is_uniform_scalar(elements: &[Node]) -> bool {
    elements
        .iter()
        .all(|element| element.is_scalar() && element.content.is_empty())
}

/// Renders scalar elements as a single-line flow sequence, e.g. `["a", 1]`.
pub fn to_inline_yaml(elements: &[Node]) -> Result<String, FlowError> {
    let rendered = elements
        .iter()
        .enumerate()
        .map(|(index, element)| flow_scalar(index, element))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", rendered.join(", ")))
}

fn flow_scalar(index: usize, element: &Node) -> Result<String, FlowError> {
    if !element.is_scalar() {
        return Err(FlowError::NotScalar {
            index,
            kind: element.kind,
        });
    }

    match element.tag.as_str() {
        STR_TAG => serde_json::to_string(&element.value)
            .map_err(|source| FlowError::Encode { index, source }),
        NULL_TAG => Ok("null".to_string()),
        _ => Ok(element.value.clone()),
    }
}
