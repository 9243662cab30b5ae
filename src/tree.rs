//! The insert driver and prefix scan, tying the node engine together into
//! a keys-only set over byte strings.

use crate::iter::Iter;
use crate::node::Node;

/// An in-memory adaptive radix tree holding a set of distinct byte-string
/// keys. Supports insertion, prefix scanning, and an external iterator
/// (see [`crate::iter`]). Deletion, value storage, and persistence are not
/// part of this type.
#[derive(Default)]
pub struct AdaptiveRadixTree {
    pub(crate) root: Option<Box<Node>>,
    size: usize,
}

impl AdaptiveRadixTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None, size: 0 }
    }

    /// Number of distinct keys stored.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Inserts `key` if it is not already present.
    ///
    /// Returns `true` if `key` was already present (the tree is
    /// unchanged), `false` if it was newly inserted. This polarity is the
    /// inverse of the usual `HashSet::insert` convention; it is kept
    /// deliberately rather than flipped.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        let existed = insert_at(&mut self.root, key, 0);
        if !existed {
            self.size += 1;
        }
        existed
    }

    /// Returns every stored key that begins with `prefix`. An empty prefix
    /// returns every stored key. The result order follows the recursive
    /// walk of the tree and is not guaranteed to be lexicographic.
    pub fn for_each_key_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            scan(root, prefix, 0, &mut out);
        }
        out
    }

    /// Returns a fresh external iterator positioned at the root, walking
    /// every reachable node (interior and leaf) in depth-first preorder.
    pub fn iterator(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }
}

#[inline]
fn byte_at(key: &[u8], pos: usize) -> u8 {
    key.get(pos).copied().unwrap_or(0)
}

#[inline]
fn valid_at(key: &[u8], pos: usize) -> bool {
    pos < key.len()
}

fn longest_common_prefix(a: &[u8], b: &[u8], depth: usize) -> usize {
    let limit = a.len().min(b.len());
    let mut i = depth;
    while i < limit && a[i] == b[i] {
        i += 1;
    }
    i - depth
}

/// Recursive insert (§4.5). `slot` is the mutable reference through which
/// `cur` can be replaced by its caller on split or growth. Returns `true`
/// if `key` was already present.
fn insert_at(slot: &mut Option<Box<Node>>, key: &[u8], depth: usize) -> bool {
    let Some(cur) = slot else {
        *slot = Some(Box::new(Node::new_leaf(key.to_vec())));
        return false;
    };

    if matches!(cur.as_ref(), Node::Leaf { .. }) {
        let leaf_key = cur.key().unwrap().to_vec();
        if leaf_key == key {
            return true;
        }

        let lcp = longest_common_prefix(&leaf_key, key, depth);
        let split_depth = depth + lcp;

        let mut new_inner = Box::new(Node::new_inner4());
        new_inner.set_prefix(&key[depth..], lcp as u32);

        let leaf_byte = byte_at(&leaf_key, split_depth);
        let leaf_valid = valid_at(&leaf_key, split_depth);
        let new_byte = byte_at(key, split_depth);
        let new_valid = valid_at(key, split_depth);

        let old_leaf = slot.take().unwrap();
        let new_leaf = Box::new(Node::new_leaf(key.to_vec()));

        new_inner.add_child(leaf_byte, leaf_valid, old_leaf);
        new_inner.add_child(new_byte, new_valid, new_leaf);

        *slot = Some(new_inner);
        return false;
    }

    let mut depth = depth;
    let node_prefix_len = cur.prefix_len() as usize;

    if node_prefix_len > 0 {
        let mismatch = cur.match_deep(key, depth);
        if mismatch < node_prefix_len {
            // Prefix split: `cur`'s compressed prefix diverges from `key`
            // partway through, so a new Inner4 takes `cur`'s place holding
            // the shared stem, with `cur` (shortened) and a fresh leaf as
            // its two children.
            let parent_prefix: Vec<u8> = (0..mismatch).map(|i| cur.prefix_byte_at(i, depth)).collect();
            let old_byte = cur.prefix_byte_at(mismatch, depth);
            let remaining_len = node_prefix_len - mismatch - 1;
            let remaining_prefix: Vec<u8> =
                (0..remaining_len).map(|i| cur.prefix_byte_at(mismatch + 1 + i, depth)).collect();

            let mut new_parent = Box::new(Node::new_inner4());
            new_parent.set_prefix(&parent_prefix, mismatch as u32);

            let mut old_node = slot.take().unwrap();
            old_node.set_prefix(&remaining_prefix, remaining_len as u32);
            new_parent.add_child(old_byte, true, old_node);

            let new_key_depth = depth + mismatch;
            let new_byte = byte_at(key, new_key_depth);
            let new_valid = valid_at(key, new_key_depth);
            let new_leaf = Box::new(Node::new_leaf(key.to_vec()));
            new_parent.add_child(new_byte, new_valid, new_leaf);

            *slot = Some(new_parent);
            return false;
        }
        depth += node_prefix_len;
    }

    let byte = byte_at(key, depth);
    let valid = valid_at(key, depth);

    if let Some(child_slot) = cur.child_slot_mut(byte, valid) {
        if child_slot.is_some() {
            return insert_at(child_slot, key, depth + 1);
        }
    }

    let new_leaf = Box::new(Node::new_leaf(key.to_vec()));
    cur.add_child(byte, valid, new_leaf);
    false
}

fn starts_with(key: &[u8], prefix: &[u8]) -> bool {
    key.len() >= prefix.len() && &key[..prefix.len()] == prefix
}

/// Prefix scan (§4.6). Descends one discriminating byte of `prefix` per
/// interior-node hop, falling back to full subtree enumeration once
/// `prefix` is exhausted.
fn scan(node: &Node, prefix: &[u8], mut depth: usize, out: &mut Vec<Vec<u8>>) {
    let mut node = node;
    loop {
        if let Node::Leaf { key } = node {
            if starts_with(key, prefix) {
                out.push(key.clone());
            }
            return;
        }

        if depth == prefix.len() {
            if starts_with(node.minimum_leaf(), prefix) {
                collect_subtree(node, out);
            }
            return;
        }

        let node_prefix_len = node.prefix_len() as usize;
        if node_prefix_len > 0 {
            let remaining = prefix.len() - depth;
            let matched = node.match_deep(prefix, depth);
            if matched == remaining {
                collect_subtree(node, out);
                return;
            } else if matched == node_prefix_len {
                depth += node_prefix_len;
            } else {
                return;
            }
        }

        let next_byte = prefix[depth];
        match node.find_child(next_byte, true) {
            Some(child) => {
                node = child;
                depth += 1;
            }
            None => return,
        }
    }
}

fn collect_subtree(node: &Node, out: &mut Vec<Vec<u8>>) {
    if let Node::Leaf { key } = node {
        out.push(key.clone());
        return;
    }
    if let Some(z) = node.zero_child() {
        collect_subtree(z, out);
    }
    node.visit_children(|c| collect_subtree(c, out));
}
