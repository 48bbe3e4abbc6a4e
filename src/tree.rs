use std::str::FromStr;

use crate::builder::{Builder, ConstructionStats};
use crate::error::{InputError, InvariantViolation, Result};
use crate::node::{Branch, Edge, EdgeEnd, Node};
use crate::{CharType, IndexType, NodeID};

/// How the symbols were supplied, which decides how edge labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolKind {
    Text,
    Numeric,
}

/// A suffix tree over a single sequence, built with Ukkonen's algorithm.
///
/// The last symbol of the sequence is the terminal sentinel and must not
/// occur anywhere else, which guarantees every suffix ends in its own leaf.
/// Once returned by a constructor the tree is finished: every public method
/// takes `&self`, so a tree can be shared freely between readers.
///
/// # Examples
///
/// ```
/// use ukkonen_suffix_tree::SuffixTree;
/// let tree = SuffixTree::from_text("abcabx$").unwrap();
/// assert_eq!(tree.deepest_internal_node_depth(), 2);
/// assert!(tree.is_substr(&['c' as u64, 'a' as u64]));
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTree {
    pub(crate) sequence: Vec<CharType>,
    pub(crate) nodes: Vec<Node>,
    /// Shared end marker read by every open edge.
    pub(crate) end: IndexType,
    /// `(from, to)` creation numbers of every suffix link, in the order they were set.
    pub(crate) suffix_links: Vec<(u64, u64)>,
    pub(crate) stats: ConstructionStats,
    pub(crate) symbols: SymbolKind,
}

impl SuffixTree {
    /// Build a tree over `sequence`, whose last symbol is the sentinel.
    pub fn new(sequence: Vec<CharType>) -> Result<Self> {
        Self::build(sequence, SymbolKind::Numeric)
    }

    /// Build a tree over the characters of `text`; the last character is the sentinel.
    pub fn from_text(text: &str) -> Result<Self> {
        let sequence = text.chars().map(|ch| ch as CharType).collect();
        Self::build(sequence, SymbolKind::Text)
    }

    /// Build a tree over `text` followed by `sentinel`.
    pub fn with_sentinel(text: &str, sentinel: char) -> Result<Self> {
        let sequence = text
            .chars()
            .chain(std::iter::once(sentinel))
            .map(|ch| ch as CharType)
            .collect();
        Self::build(sequence, SymbolKind::Text)
    }

    fn build(sequence: Vec<CharType>, symbols: SymbolKind) -> Result<Self> {
        validate_sequence(&sequence)?;
        let tree = Self::empty(sequence, symbols);
        Builder::new(tree).build()
    }

    pub(crate) fn empty(sequence: Vec<CharType>, symbols: SymbolKind) -> Self {
        // Every position opens one leaf; internal nodes are bounded by the leaves.
        let mut nodes = Vec::with_capacity(2 * sequence.len());
        nodes.push(Node::root(1));
        Self {
            sequence,
            nodes,
            end: 0,
            suffix_links: Vec::new(),
            stats: ConstructionStats::default(),
            symbols,
        }
    }

    /// The full symbol sequence, sentinel included.
    pub fn sequence(&self) -> &[CharType] {
        &self.sequence
    }

    /// Number of symbols, sentinel included.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sentinel(&self) -> CharType {
        self.sequence[self.sequence.len() - 1]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Explicit nodes other than the root.
    pub fn internal_node_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Internal(_)))
            .count()
    }

    /// Suffix links as `(from, to)` creation-number pairs, in the order they were set.
    pub fn suffix_links(&self) -> &[(u64, u64)] {
        &self.suffix_links
    }

    pub fn stats(&self) -> &ConstructionStats {
        &self.stats
    }

    pub(crate) fn get_node(&self, node_id: NodeID) -> &Node {
        &self.nodes[node_id]
    }

    pub(crate) fn get_node_mut(&mut self, node_id: NodeID) -> &mut Node {
        &mut self.nodes[node_id]
    }

    pub(crate) fn create_leaf(&mut self) -> NodeID {
        let creation = self.nodes.len() as u64 + 1;
        self.nodes.push(Node::leaf(creation));
        self.stats.leaves += 1;
        self.nodes.len() - 1
    }

    pub(crate) fn create_internal(&mut self) -> NodeID {
        let creation = self.nodes.len() as u64 + 1;
        self.nodes.push(Node::internal(creation));
        self.nodes.len() - 1
    }

    pub(crate) fn creation(&self, node_id: NodeID) -> u64 {
        self.get_node(node_id).creation()
    }

    pub(crate) fn transition(&self, node_id: NodeID, ch: CharType) -> Option<Edge> {
        self.get_node(node_id)
            .branch()
            .and_then(|branch| branch.transitions.get(ch))
            .copied()
    }

    fn branch_mut(&mut self, node_id: NodeID) -> Result<&mut Branch> {
        let creation = self.creation(node_id);
        self.get_node_mut(node_id)
            .branch_mut()
            .ok_or_else(|| InvariantViolation::LeafTransition { node: creation }.into())
    }

    pub(crate) fn set_transition(&mut self, node_id: NodeID, ch: CharType, edge: Edge) -> Result<()> {
        self.branch_mut(node_id)?.transitions.insert(ch, edge);
        Ok(())
    }

    pub(crate) fn suffix_link(&self, node_id: NodeID) -> Option<NodeID> {
        self.get_node(node_id).branch().and_then(|branch| branch.suffix_link)
    }

    /// Point the suffix link of `from` at `to`. Setting the same target twice
    /// is a no-op; replacing an existing target is an invariant violation.
    pub(crate) fn set_suffix_link(&mut self, from: NodeID, to: NodeID) -> Result<()> {
        let current = self.branch_mut(from)?.suffix_link;
        match current {
            Some(existing) if existing == to => Ok(()),
            Some(existing) => Err(InvariantViolation::SuffixLinkOverwrite {
                node: self.creation(from),
                existing: self.creation(existing),
                attempted: self.creation(to),
            }
            .into()),
            None => {
                self.branch_mut(from)?.suffix_link = Some(to);
                let link = (self.creation(from), self.creation(to));
                self.suffix_links.push(link);
                Ok(())
            }
        }
    }

    pub(crate) fn edge_end(&self, edge: &Edge) -> IndexType {
        match edge.end {
            EdgeEnd::Open => self.end,
            EdgeEnd::Fixed(end) => end,
        }
    }

    pub(crate) fn edge_len(&self, edge: &Edge) -> IndexType {
        self.edge_end(edge) - edge.start
    }

    pub(crate) fn edge_label(&self, edge: &Edge) -> &[CharType] {
        &self.sequence[edge.start..self.edge_end(edge)]
    }
}

impl FromStr for SuffixTree {
    type Err = crate::SuffixTreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

/// Reject sequences the construction cannot terminate correctly on.
fn validate_sequence(s: &[CharType]) -> std::result::Result<(), InputError> {
    let Some((&sentinel, body)) = s.split_last() else {
        return Err(InputError::Empty);
    };
    if let Some(position) = body.iter().position(|&ch| ch == sentinel) {
        return Err(InputError::SentinelNotUnique {
            symbol: sentinel,
            position,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SuffixTreeError, ROOT};

    #[test]
    fn rejects_empty_sequence() {
        let err = SuffixTree::new(Vec::new()).unwrap_err();
        assert_eq!(err, SuffixTreeError::InvalidInput(InputError::Empty));
        assert!(err.is_invalid_input());
        assert!(SuffixTree::from_text("").is_err());
    }

    #[test]
    fn rejects_repeated_sentinel() {
        let err = SuffixTree::from_text("ab$c$").unwrap_err();
        assert_eq!(
            err,
            SuffixTreeError::InvalidInput(InputError::SentinelNotUnique {
                symbol: '$' as CharType,
                position: 2,
            })
        );
        assert!(SuffixTree::with_sentinel("a#b", '#').is_err());
    }

    #[test]
    fn with_sentinel_appends_terminator() {
        let tree = SuffixTree::with_sentinel("banana", '$').unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.sentinel(), '$' as CharType);
        let parsed: SuffixTree = "banana$".parse().unwrap();
        assert_eq!(parsed.sequence(), tree.sequence());
    }

    #[test]
    fn suffix_link_relink_policy() {
        let mut tree = SuffixTree::empty(vec![1, 2, 3], SymbolKind::Numeric);
        let a = tree.create_internal();
        let b = tree.create_internal();
        let c = tree.create_internal();
        tree.set_suffix_link(a, b).unwrap();
        tree.set_suffix_link(a, b).unwrap();
        assert_eq!(tree.suffix_links(), &[(2, 3)]);

        let err = tree.set_suffix_link(a, c).unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(
            err,
            SuffixTreeError::InvariantViolation(InvariantViolation::SuffixLinkOverwrite {
                node: 2,
                existing: 3,
                attempted: 4,
            })
        );
    }

    #[test]
    fn leaves_cannot_own_transitions() {
        let mut tree = SuffixTree::empty(vec![1, 2], SymbolKind::Numeric);
        let leaf = tree.create_leaf();
        let err = tree.set_transition(leaf, 1, Edge::open(0, ROOT)).unwrap_err();
        assert_eq!(
            err,
            SuffixTreeError::InvariantViolation(InvariantViolation::LeafTransition { node: 2 })
        );
    }
}
