//! Read-only traversals over a finished tree.
//!
//! Walks use an explicit stack: a run of one repeated symbol produces a chain
//! of internal nodes as deep as the input is long.

use crate::node::Edge;
use crate::tree::SuffixTree;
use crate::{CharType, IndexType, NodeID, ROOT};

/// Where a walk from the root stopped.
#[derive(Debug, Clone, Copy)]
enum Locus {
    /// Exactly on an explicit node.
    Node(NodeID),
    /// `matched` symbols down `edge`, strictly inside it.
    Edge { edge: Edge, matched: IndexType },
}

impl SuffixTree {
    /// Number of distinct substrings of the whole sequence, sentinel included,
    /// plus one for the empty substring. Every edge contributes its length.
    pub fn count_distinct_substrings(&self) -> usize {
        self.edges().map(|edge| self.edge_len(edge)).sum::<usize>() + 1
    }

    /// Like [`count_distinct_substrings`](Self::count_distinct_substrings), but
    /// only counts substrings that do not contain the sentinel. The sentinel is
    /// always the last symbol of a leaf edge, so each leaf edge gives up one.
    pub fn count_distinct_text_substrings(&self) -> usize {
        self.edges()
            .map(|edge| {
                let len = self.edge_len(edge);
                if self.get_node(edge.to).is_leaf() {
                    len - 1
                } else {
                    len
                }
            })
            .sum::<usize>()
            + 1
    }

    /// String depth of the deepest internal node, or 0 when the root has no
    /// internal descendants.
    pub fn deepest_internal_node_depth(&self) -> usize {
        self.deepest_internal_node()
            .map(|(_, depth, _)| depth)
            .unwrap_or(0)
    }

    /// Longest substring occurring at least twice: the path label of the
    /// deepest internal node. Empty when no symbol repeats.
    pub fn longest_repeated_substring(&self) -> &[CharType] {
        match self.deepest_internal_node() {
            Some((_, depth, end)) => &self.sequence[end - depth..end],
            None => &[],
        }
    }

    /// Checks whether `s` is a substring of the sequence.
    pub fn is_substr(&self, s: &[CharType]) -> bool {
        self.locate(s).is_some()
    }

    /// Checks whether `s` is a suffix of the sequence. `s` may or may not
    /// carry the trailing sentinel.
    pub fn is_suffix(&self, s: &[CharType]) -> bool {
        let sentinel = self.sentinel();
        match self.locate(s) {
            None => false,
            Some(_) if s.last() == Some(&sentinel) => true,
            Some(Locus::Node(node)) => self.transition(node, sentinel).is_some(),
            Some(Locus::Edge { edge, matched }) => self.sequence[edge.start + matched] == sentinel,
        }
    }

    /// Concatenated edge labels of every root-to-leaf path, one entry per
    /// leaf, in depth-first order.
    pub fn suffixes(&self) -> Vec<Vec<CharType>> {
        let mut results = Vec::with_capacity(self.len());
        let mut stack: Vec<(NodeID, Vec<CharType>)> = vec![(ROOT, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            let Some(branch) = self.get_node(node).branch() else {
                results.push(path);
                continue;
            };
            for edge in branch.transitions.values().rev() {
                let mut child_path = path.clone();
                child_path.extend_from_slice(self.edge_label(edge));
                stack.push((edge.to, child_path));
            }
        }
        results
    }

    /// Every edge in the tree, each exactly once.
    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes
            .iter()
            .filter_map(|node| node.branch())
            .flat_map(|branch| branch.transitions.values())
    }

    /// `(node, string depth, end index of its path label)` of the deepest
    /// internal node. Ties keep the first node found.
    fn deepest_internal_node(&self) -> Option<(NodeID, usize, IndexType)> {
        let mut deepest: Option<(NodeID, usize, IndexType)> = None;
        let mut stack: Vec<(NodeID, usize)> = vec![(ROOT, 0)];
        while let Some((node, depth)) = stack.pop() {
            let Some(branch) = self.get_node(node).branch() else {
                continue;
            };
            for edge in branch.transitions.values() {
                if self.get_node(edge.to).is_leaf() {
                    continue;
                }
                let child_depth = depth + self.edge_len(edge);
                if deepest.map_or(true, |(_, best, _)| child_depth > best) {
                    deepest = Some((edge.to, child_depth, self.edge_end(edge)));
                }
                stack.push((edge.to, child_depth));
            }
        }
        deepest
    }

    /// Follow `s` from the root. `None` when `s` is not spelled by any path.
    fn locate(&self, s: &[CharType]) -> Option<Locus> {
        let mut node = ROOT;
        let mut index = 0;
        while index < s.len() {
            let edge = self.transition(node, s[index])?;
            let label = self.edge_label(&edge);
            let matched = label
                .iter()
                .zip(&s[index..])
                .take_while(|(a, b)| a == b)
                .count();
            index += matched;
            if matched < label.len() {
                return if index == s.len() {
                    Some(Locus::Edge { edge, matched })
                } else {
                    None
                };
            }
            node = edge.to;
        }
        Some(Locus::Node(node))
    }
}
