//! Node and edge data model.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeID`]. Edges are stored on their source node, keyed by the first
//! symbol of their label, and describe the label as a half-open range of
//! indices into the tree's sequence rather than a copied substring.

use indexmap::IndexMap;

use crate::{CharType, IndexType, NodeID};

/// Where an edge label stops.
///
/// Open edges all read the tree's shared end marker, so advancing that marker
/// by one extends every leaf at once. Edges produced by a split keep the end
/// they had at the moment they were cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeEnd {
    Open,
    Fixed(IndexType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) start: IndexType,
    pub(crate) end: EdgeEnd,
    pub(crate) to: NodeID,
}

impl Edge {
    /// A leaf edge that grows with the shared end marker.
    pub(crate) const fn open(start: IndexType, to: NodeID) -> Self {
        Self {
            start,
            end: EdgeEnd::Open,
            to,
        }
    }
}

/// Outgoing edges of a branching node. At most one edge per symbol; iteration
/// follows insertion order so diagnostic output is deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Transitions {
    edges: IndexMap<CharType, Edge>,
}

impl Transitions {
    pub(crate) fn get(&self, ch: CharType) -> Option<&Edge> {
        self.edges.get(&ch)
    }

    /// Replacing the edge for an existing symbol keeps its position.
    pub(crate) fn insert(&mut self, ch: CharType, edge: Edge) {
        self.edges.insert(ch, edge);
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (CharType, &Edge)> + '_ {
        self.edges.iter().map(|(ch, edge)| (*ch, edge))
    }

    pub(crate) fn values(&self) -> impl DoubleEndedIterator<Item = &Edge> + '_ {
        self.edges.values()
    }
}

/// The part shared by the root and every internal node.
#[derive(Debug, Clone)]
pub(crate) struct Branch {
    pub(crate) creation: u64,
    pub(crate) transitions: Transitions,
    pub(crate) suffix_link: Option<NodeID>,
}

impl Branch {
    fn new(creation: u64) -> Self {
        Self {
            creation,
            transitions: Transitions::default(),
            suffix_link: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Root(Branch),
    Internal(Branch),
    Leaf { creation: u64 },
}

impl Node {
    pub(crate) fn root(creation: u64) -> Self {
        Node::Root(Branch::new(creation))
    }

    pub(crate) fn internal(creation: u64) -> Self {
        Node::Internal(Branch::new(creation))
    }

    pub(crate) fn leaf(creation: u64) -> Self {
        Node::Leaf { creation }
    }

    /// Monotonically increasing creation number, only used for diagnostics.
    pub(crate) fn creation(&self) -> u64 {
        match self {
            Node::Root(branch) | Node::Internal(branch) => branch.creation,
            Node::Leaf { creation } => *creation,
        }
    }

    pub(crate) fn is_root(&self) -> bool {
        matches!(self, Node::Root(_))
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub(crate) fn branch(&self) -> Option<&Branch> {
        match self {
            Node::Root(branch) | Node::Internal(branch) => Some(branch),
            Node::Leaf { .. } => None,
        }
    }

    pub(crate) fn branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Root(branch) | Node::Internal(branch) => Some(branch),
            Node::Leaf { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_keep_insertion_order() {
        let mut transitions = Transitions::default();
        transitions.insert(9, Edge::open(0, 1));
        transitions.insert(3, Edge::open(1, 2));
        transitions.insert(5, Edge::open(2, 3));
        // Re-keying an existing symbol replaces the edge in place.
        transitions.insert(
            3,
            Edge {
                start: 1,
                end: EdgeEnd::Fixed(2),
                to: 4,
            },
        );

        let keys: Vec<CharType> = transitions.iter().map(|(ch, _)| ch).collect();
        assert_eq!(keys, vec![9, 3, 5]);
        assert_eq!(transitions.len(), 3);
        assert_eq!(transitions.get(3).map(|e| e.to), Some(4));
        assert!(transitions.get(7).is_none());
    }

    #[test]
    fn leaves_have_no_branch() {
        let mut leaf = Node::leaf(7);
        assert!(leaf.is_leaf());
        assert!(leaf.branch_mut().is_none());
        assert_eq!(leaf.creation(), 7);

        let root = Node::root(1);
        assert!(root.is_root());
        assert_eq!(root.branch().map(|b| b.suffix_link), Some(None));
    }
}
