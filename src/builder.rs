//! Ukkonen's online construction.
//!
//! One phase runs per symbol. Each phase first advances the shared end
//! marker, which extends every leaf by one symbol for free, and then performs
//! explicit extensions from the active point until either every pending suffix
//! has been inserted (`remainder == 0`) or the next symbol is already present
//! below the active point, which means every shorter pending suffix is present
//! too and the phase can stop early.

use log::{debug, trace};

use crate::error::{InvariantViolation, Result};
use crate::node::{Edge, EdgeEnd};
use crate::tree::SuffixTree;
use crate::{CharType, IndexType, NodeID, ROOT};

/// Operation counters recorded while building a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionStats {
    /// One per input symbol.
    pub phases: usize,
    /// Calls of the single-extension step, including the ones that end a phase.
    pub extensions: usize,
    /// Edges split to create an internal node.
    pub splits: usize,
    pub leaves: usize,
    /// Nodes skipped over by the skip/count walk.
    pub canonize_steps: usize,
}

/// Where the next extension starts.
///
/// `edge` names an outgoing edge of `node` and is set exactly when
/// `length > 0`; in that case `length` is strictly smaller than the edge's
/// length once canonized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePoint {
    node: NodeID,
    edge: Option<CharType>,
    length: IndexType,
}

impl ActivePoint {
    const fn new(node: NodeID) -> Self {
        Self {
            node,
            edge: None,
            length: 0,
        }
    }
}

/// Result of one extension.
enum Extension {
    /// The symbol was already present: nothing else to do this phase.
    ShowStopper,
    /// A leaf was inserted. `previous` is the node that should receive a
    /// suffix link during the next extension, if any.
    Inserted { previous: Option<NodeID> },
}

pub(crate) struct Builder {
    tree: SuffixTree,
    active: ActivePoint,
    remainder: usize,
}

impl Builder {
    pub(crate) fn new(tree: SuffixTree) -> Self {
        Self {
            tree,
            active: ActivePoint::new(ROOT),
            remainder: 0,
        }
    }

    /// Run every phase and hand back the finished tree.
    pub(crate) fn build(mut self) -> Result<SuffixTree> {
        let len = self.tree.sequence.len();
        while self.tree.end != len {
            let index = self.tree.end;
            self.tree.end += 1;
            self.remainder += 1;
            self.tree.stats.phases += 1;
            self.phase(index)?;
        }

        let stats = self.tree.stats;
        debug!(
            "built suffix tree over {} symbols: {} nodes, {} leaves, {} extensions, {} splits, {} canonize steps",
            len,
            self.tree.node_count(),
            stats.leaves,
            stats.extensions,
            stats.splits,
            stats.canonize_steps
        );
        Ok(self.tree)
    }

    fn phase(&mut self, index: IndexType) -> Result<()> {
        let ch = self.tree.sequence[index];
        let mut previous: Option<NodeID> = None;
        loop {
            self.tree.stats.extensions += 1;
            trace!(
                "phase {} remainder {}: active node {} edge {:?} length {}",
                index,
                self.remainder,
                self.tree.creation(self.active.node),
                self.active.edge,
                self.active.length
            );
            let extension = match self.active.edge {
                None => self.extend_at_node(index, ch, previous)?,
                Some(edge_ch) => self.extend_in_edge(index, ch, edge_ch, previous)?,
            };
            match extension {
                Extension::ShowStopper => return Ok(()),
                Extension::Inserted { previous: next } => {
                    if self.remainder == 0 {
                        return Ok(());
                    }
                    previous = next;
                }
            }
        }
    }

    /// The active point sits exactly on `self.active.node`.
    fn extend_at_node(
        &mut self,
        index: IndexType,
        ch: CharType,
        previous: Option<NodeID>,
    ) -> Result<Extension> {
        let node = self.active.node;
        if self.tree.transition(node, ch).is_some() {
            trace!("symbol already below node {}", self.tree.creation(node));
            self.link(previous, node)?;
            self.active.length += 1;
            self.active.edge = Some(ch);
            self.canonize(index + 1)?;
            return Ok(Extension::ShowStopper);
        }

        let leaf = self.tree.create_leaf();
        self.tree.set_transition(node, ch, Edge::open(index, leaf))?;
        self.remainder -= 1;
        trace!(
            "new leaf {} below node {}",
            self.tree.creation(leaf),
            self.tree.creation(node)
        );
        self.apply_rules(index, previous, node)?;

        let previous = if node == ROOT { None } else { Some(node) };
        Ok(Extension::Inserted { previous })
    }

    /// The active point sits `self.active.length` symbols down the edge keyed by `edge_ch`.
    fn extend_in_edge(
        &mut self,
        index: IndexType,
        ch: CharType,
        edge_ch: CharType,
        previous: Option<NodeID>,
    ) -> Result<Extension> {
        let node = self.active.node;
        let edge = self.expect_transition(node, edge_ch)?;
        let split_index = edge.start + self.active.length;
        let next_ch = self.tree.sequence[split_index];

        if next_ch == ch {
            trace!(
                "symbol already along edge below node {}",
                self.tree.creation(node)
            );
            self.link(previous, node)?;
            self.active.length += 1;
            self.canonize(index + 1)?;
            return Ok(Extension::ShowStopper);
        }

        // Split the edge at the active point. The lower half keeps the
        // original end so an open leaf edge stays open.
        let internal = self.tree.create_internal();
        let leaf = self.tree.create_leaf();
        self.tree.set_transition(
            internal,
            next_ch,
            Edge {
                start: split_index,
                end: edge.end,
                to: edge.to,
            },
        )?;
        self.tree.set_transition(internal, ch, Edge::open(index, leaf))?;
        self.tree.set_transition(
            node,
            edge_ch,
            Edge {
                start: edge.start,
                end: EdgeEnd::Fixed(split_index),
                to: internal,
            },
        )?;
        self.remainder -= 1;
        self.tree.stats.splits += 1;
        trace!(
            "split edge below node {} into internal node {} with leaf {}",
            self.tree.creation(node),
            self.tree.creation(internal),
            self.tree.creation(leaf)
        );

        self.apply_rules(index, previous, internal)?;
        self.canonize(index)?;
        Ok(Extension::Inserted {
            previous: Some(internal),
        })
    }

    /// Move the active point to the next shorter suffix after an insertion.
    fn apply_rules(&mut self, index: IndexType, previous: Option<NodeID>, inserted_at: NodeID) -> Result<()> {
        // Rule 1: at the root the next suffix is one symbol shorter.
        if self.active.node == ROOT && self.active.length > 0 {
            self.active.length -= 1;
            self.active.edge = if self.active.length > 0 {
                Some(self.tree.sequence[index - self.active.length])
            } else {
                None
            };
        }

        // Rule 2
        self.link(previous, inserted_at)?;

        // Rule 3: follow the suffix link, or restart from the root.
        if self.active.node != ROOT {
            self.active.node = self.tree.suffix_link(self.active.node).unwrap_or(ROOT);
        }
        Ok(())
    }

    /// Skip/count walk: move the active point down while it covers a whole
    /// edge. `end` is one past the last symbol of the string the active point
    /// spells.
    fn canonize(&mut self, end: IndexType) -> Result<()> {
        while let Some(edge_ch) = self.active.edge {
            let edge = self.expect_transition(self.active.node, edge_ch)?;
            let edge_len = self.tree.edge_len(&edge);
            if self.active.length < edge_len {
                break;
            }
            if self.tree.get_node(edge.to).is_leaf() {
                return Err(InvariantViolation::WalkedIntoLeaf {
                    node: self.tree.creation(edge.to),
                }
                .into());
            }

            self.active.node = edge.to;
            self.active.length -= edge_len;
            self.active.edge = if self.active.length > 0 {
                Some(self.tree.sequence[end - self.active.length])
            } else {
                None
            };
            self.tree.stats.canonize_steps += 1;
        }
        Ok(())
    }

    fn link(&mut self, previous: Option<NodeID>, to: NodeID) -> Result<()> {
        match previous {
            Some(from) => self.tree.set_suffix_link(from, to),
            None => Ok(()),
        }
    }

    fn expect_transition(&self, node: NodeID, ch: CharType) -> Result<Edge> {
        self.tree.transition(node, ch).ok_or_else(|| {
            InvariantViolation::MissingEdge {
                node: self.tree.creation(node),
                symbol: ch,
            }
            .into()
        })
    }
}
