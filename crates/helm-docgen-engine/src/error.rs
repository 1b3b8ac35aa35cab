use crate::parsing::flow::FlowError;

/// Failure while loading YAML source into the generic node tree.
#[derive(Debug, thiserror::Error)]
pub enum YamlError {
    #[error("YAML syntax error: {0}")]
    Scan(#[from] saphyr_parser::ScanError),
    #[error("alias on line {line} refers to an undefined anchor")]
    UndefinedAlias { line: usize },
    #[error("unexpected event in YAML stream on line {line}")]
    UnexpectedEvent { line: usize },
    #[error("YAML event stream ended unexpectedly")]
    UnexpectedEnd,
}

/// Any failure while building or rendering the documentation tree.
///
/// Every variant is fatal for the current run: the builder never returns a
/// partial tree.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("parse error under '{parent_anchor}' at key '{key}': {message}")]
    Pairing {
        parent_anchor: String,
        key: String,
        message: String,
    },

    #[error("invalid node '{anchor}': {message}")]
    Validation { anchor: String, message: String },

    #[error("cannot render '{key}' under '{parent_anchor}' inline: {source}")]
    Serialization {
        parent_anchor: String,
        key: String,
        source: FlowError,
    },
}
