//! Error types for suffix tree construction.

use thiserror::Error;

use crate::CharType;

/// Problems with the caller-supplied sequence, detected before construction starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input sequence is empty")]
    Empty,
    #[error("sentinel symbol {symbol} also appears at position {position}")]
    SentinelNotUnique { symbol: CharType, position: usize },
}

/// Internal consistency failures of the construction engine. Node values are
/// creation numbers, so they line up with the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("suffix link of node {node} already points to node {existing}, refusing to relink it to node {attempted}")]
    SuffixLinkOverwrite {
        node: u64,
        existing: u64,
        attempted: u64,
    },
    #[error("node {node} has no outgoing edge for symbol {symbol}")]
    MissingEdge { node: u64, symbol: CharType },
    #[error("active point walked past the end of leaf {node}")]
    WalkedIntoLeaf { node: u64 },
    #[error("leaf {node} cannot own transitions or suffix links")]
    LeafTransition { node: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuffixTreeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl SuffixTreeError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, SuffixTreeError>;
