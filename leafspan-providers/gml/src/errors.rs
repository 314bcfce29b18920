use std::io;

use leafspan_core::GraphError;
use thiserror::Error;

/// Errors raised while loading a GML document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GmlError {
    /// A character that cannot start any GML token.
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedCharacter { offset: usize, found: char },
    /// A string literal ran to the end of the input.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },
    /// A key was not followed by a value, or a value appeared without a key.
    #[error("expected {expected} at byte {offset}")]
    Syntax {
        offset: usize,
        expected: &'static str,
    },
    /// `[` and `]` do not pair up.
    #[error("unbalanced brackets at byte {offset}")]
    UnbalancedBrackets { offset: usize },
    /// A node or edge endpoint id was not an integer.
    #[error("id `{raw}` is not an integer")]
    InvalidId { raw: String },
    /// A node block had no `id` entry.
    #[error("node {node_index} has no id")]
    MissingNodeId { node_index: usize },
    /// An edge block lacked `source` or `target`.
    #[error("edge {edge_index} is missing its source or target")]
    MissingEndpoint { edge_index: usize },
    /// An edge named a node id that no node block declared.
    #[error("edge references undeclared node {id}")]
    UnknownNode { id: i64 },
    /// The document declared no nodes.
    #[error("GML document declares no nodes")]
    EmptyGraph,
    /// Reading the document failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The remapped edges did not form a valid graph.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}
