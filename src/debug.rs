//! Introspection tooling: a recursive pretty-printer and an integrity
//! checker that walks the tree looking for invariant violations (§8).
//!
//! Neither facility is part of the stable contract; `debug_print`'s output
//! format in particular carries no compatibility guarantee.

use crate::node::{Node, NodeType, MAX_INLINE_PREFIX};
use crate::AdaptiveRadixTree;

impl AdaptiveRadixTree {
    /// Prints an indented, human-readable dump of the tree's shape to
    /// stdout: node type, prefix, child count, and leaf keys.
    pub fn debug_print(&self) {
        match &self.root {
            Some(root) => debug_node(root, 0),
            None => println!("(empty tree)"),
        }
    }

    /// Walks the tree looking for invariant violations, returning one
    /// diagnostic string per violation found (empty means healthy).
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(root) = &self.root {
            verify_node(root, &mut problems);
        }
        problems
    }
}

fn debug_node(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Leaf { key } => {
            println!("{indent}Leaf {:?}", String::from_utf8_lossy(key));
        }
        _ => {
            println!(
                "{indent}{} prefix={:?} children={} zero_child={}",
                node.node_type(),
                String::from_utf8_lossy(node.inline_prefix()),
                node.num_children(),
                node.zero_child().is_some(),
            );
            if let Some(z) = node.zero_child() {
                debug_node(z, depth + 1);
            }
            node.visit_children(|c| debug_node(c, depth + 1));
        }
    }
}

fn capacity_for(node_type: NodeType) -> usize {
    match node_type {
        NodeType::Leaf => 0,
        NodeType::Inner4 => 4,
        NodeType::Inner16 => 16,
        NodeType::Inner48 => 48,
        NodeType::Inner256 => 256,
    }
}

fn verify_node(node: &Node, problems: &mut Vec<String>) {
    match node {
        Node::Leaf { .. } => {}
        _ => {
            let node_type = node.node_type();
            let num_children = node.num_children();
            let has_zero = node.zero_child().is_some();

            if num_children > capacity_for(node_type) {
                problems.push(format!(
                    "{node_type} holds {num_children} children, exceeding its capacity of {}",
                    capacity_for(node_type)
                ));
            }
            if num_children + usize::from(has_zero) < 2 {
                problems.push(format!(
                    "{node_type} has only {} discriminating children (including zero_child), need >= 2",
                    num_children + usize::from(has_zero)
                ));
            }
            if node.prefix_len() as usize <= MAX_INLINE_PREFIX && node.inline_prefix().len() != node.prefix_len() as usize {
                problems.push(format!("{node_type} inline prefix length disagrees with prefix_len"));
            }

            verify_index_consistency(node, problems);
            verify_no_duplicate_leaf_keys(node, problems);

            if let Some(z) = node.zero_child() {
                verify_node(z, problems);
            }
            node.visit_children(|c| verify_node(c, problems));
        }
    }
}

/// Collects the keys of every leaf directly reachable one hop below `node`
/// (through `zero_child` and its discriminated children) and flags
/// duplicates. Leaves nested deeper than one hop are checked when recursion
/// reaches their own parent.
fn verify_no_duplicate_leaf_keys(node: &Node, problems: &mut Vec<String>) {
    let mut seen: Vec<&[u8]> = Vec::new();
    let mut note = |key: &[u8], problems: &mut Vec<String>| {
        if seen.contains(&key) {
            problems.push(format!(
                "{} has two direct leaf children with the same key {:?}",
                node.node_type(),
                String::from_utf8_lossy(key)
            ));
        } else {
            seen.push(key);
        }
    };
    if let Some(Node::Leaf { key }) = node.zero_child() {
        note(key, problems);
    }
    node.visit_children(|c| {
        if let Node::Leaf { key } = c {
            note(key, problems);
        }
    });
}

fn verify_index_consistency(node: &Node, problems: &mut Vec<String>) {
    match node {
        Node::Inner48 { present, index, children, .. } => {
            let mut present_count = 0usize;
            for byte in 0..256usize {
                let bit_set = present[byte >> 6] & (1u64 << (byte % 64)) != 0;
                if bit_set {
                    present_count += 1;
                    let slot = index[byte] as usize;
                    if children[slot].is_none() {
                        problems.push(format!(
                            "Inner48 present-bit set for byte {byte} but children[{slot}] is empty"
                        ));
                    }
                }
            }
            if present_count != node.num_children() {
                problems.push(format!(
                    "Inner48 present bitmap has {present_count} bits set but num_children is {}",
                    node.num_children()
                ));
            }
        }
        Node::Inner256 { children, num_children, .. } => {
            let actual = children.iter().filter(|c| c.is_some()).count();
            if actual != *num_children as usize {
                problems.push(format!(
                    "Inner256 has {actual} occupied slots but num_children is {num_children}"
                ));
            }
        }
        _ => {}
    }
}
