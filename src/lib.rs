//! # art-set
//!
//! An in-memory Adaptive Radix Tree (ART) that stores a set of distinct
//! byte-string keys.
//!
//! The tree adapts each interior node's child-indexing structure to its
//! fan-out (4, 16, 48, or 256 children) and compresses shared key prefixes,
//! trading a small amount of bookkeeping for lookup cost close to a direct
//! array index. Unlike a map, it stores only keys; values are the caller's
//! concern.
//!
//! ## Example
//!
//! ```rust
//! use art_set::AdaptiveRadixTree;
//!
//! let mut tree = AdaptiveRadixTree::new();
//! assert_eq!(tree.insert(b"api.foo"), false); // newly inserted
//! assert_eq!(tree.insert(b"api.foo"), true); // already present
//! assert_eq!(tree.size(), 1);
//!
//! tree.insert(b"api.foo.bar");
//! tree.insert(b"api.baz");
//! let matches = tree.for_each_key_prefix(b"api.foo");
//! assert_eq!(matches.len(), 2);
//! ```
//!
//! ## Scope
//!
//! Deletion, value storage, persistence, and thread-safety are out of
//! scope; this is a single-threaded, insert-and-read-only set. Callers
//! needing concurrent access must synchronize externally.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod debug;
pub mod iter;
pub mod node;
mod tree;

pub use iter::{Iter, NoMoreNodes};
pub use node::{Node, NodeType, MAX_INLINE_PREFIX};
pub use tree::AdaptiveRadixTree;

#[cfg(test)]
mod proptests;
