//! A suffix tree over a single sequence, built in linear time with Ukkonen's algorithm.
//!
//! Nodes live in an arena and refer to each other by index, so the forward
//! edges and backward suffix links never fight over ownership. Leaf edges
//! share one end marker, which is what lets a whole phase extend every leaf
//! in constant time.
//!
//! ```
//! use ukkonen_suffix_tree::SuffixTree;
//!
//! let tree = SuffixTree::with_sentinel("mississippi", '$').unwrap();
//! assert_eq!(tree.deepest_internal_node_depth(), 4); // "issi"
//! assert_eq!(tree.leaf_count(), tree.len());
//! println!("{}", tree.render());
//! ```
mod builder;
mod error;
mod node;
mod print;
mod query;
mod tree;

pub use builder::ConstructionStats;
pub use error::{InputError, InvariantViolation, Result, SuffixTreeError};
pub use tree::SuffixTree;

pub(crate) type NodeID = usize;
pub(crate) type IndexType = usize;
/// Symbols are plain integers; text input is stored as Unicode scalar values.
pub type CharType = u64;

// The root is always the first node in the arena.
pub(crate) const ROOT: NodeID = 0;
