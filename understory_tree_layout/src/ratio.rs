// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ratio pass: annotate a tree with leaf-count-derived space shares.

use alloc::vec::Vec;

use crate::source::TreeSource;

/// A copy of an input node annotated with its share of the parent's extent.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode<P> {
    /// The node's record without structural fields.
    pub payload: P,
    /// Share of the parent's cross-axis extent, in `(0, 1]`. Always `1.0` at the root.
    pub ratio: f64,
    /// `true` when the node has no children.
    pub is_leaf: bool,
    /// Annotated children, in input order.
    pub children: Vec<Self>,
    /// Whether the input node carried the children field at all.
    pub(crate) has_children_field: bool,
}

impl<P> LayoutNode<P> {
    /// Whether the input node carried the children field, even if empty.
    pub fn has_children_field(&self) -> bool {
        self.has_children_field
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Counts the leaves below `node`; a node without children counts as one.
pub fn leaf_count<T: TreeSource>(node: &T, children_field: &str) -> usize {
    match node.children(children_field) {
        Some(children) if !children.is_empty() => children
            .iter()
            .map(|child| leaf_count(child, children_field))
            .sum(),
        _ => 1,
    }
}

/// Builds an annotated copy of `root`.
///
/// Each child's ratio is its leaf count over the sum of its siblings' leaf
/// counts, so the ratios of any node's children sum to one. The input is not
/// modified.
pub fn compute_ratios<T: TreeSource>(root: &T, children_field: &str) -> LayoutNode<T::Payload> {
    let (mut node, _) = annotate(root, children_field);
    node.ratio = 1.0;
    node
}

fn annotate<T: TreeSource>(node: &T, children_field: &str) -> (LayoutNode<T::Payload>, usize) {
    let source_children = node.children(children_field);
    let has_children_field = source_children.is_some();
    let source_children = source_children.unwrap_or(&[]);

    let mut children = Vec::with_capacity(source_children.len());
    let mut counts = Vec::with_capacity(source_children.len());
    for child in source_children {
        let (annotated, count) = annotate(child, children_field);
        children.push(annotated);
        counts.push(count);
    }

    let total: usize = counts.iter().sum();
    for (child, count) in children.iter_mut().zip(&counts) {
        child.ratio = if total == 0 {
            1.0
        } else {
            *count as f64 / total as f64
        };
    }

    let is_leaf = children.is_empty();
    let own_count = if is_leaf { 1 } else { total };
    (
        LayoutNode {
            payload: node.payload(children_field),
            // Overwritten by the parent; only the root keeps this.
            ratio: 1.0,
            is_leaf,
            children,
            has_children_field,
        },
        own_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Node;
    use alloc::vec;

    fn sample() -> Node<&'static str> {
        Node::branch(
            "root",
            vec![
                Node::leaf("a"),
                Node::branch("b", vec![]),
                Node::branch("c", vec![Node::leaf("c1"), Node::leaf("c2")]),
            ],
        )
    }

    #[test]
    fn leaf_counts_sum_over_subtrees() {
        let tree = sample();
        assert_eq!(leaf_count(&tree, "children"), 4);
        assert_eq!(leaf_count(&Node::leaf("x"), "children"), 1);
        assert_eq!(leaf_count(&Node::branch("x", vec![]), "children"), 1);
    }

    #[test]
    fn ratios_follow_leaf_counts() {
        let layout = compute_ratios(&sample(), "children");
        assert_eq!(layout.ratio, 1.0);
        let ratios: Vec<f64> = layout.children.iter().map(|c| c.ratio).collect();
        assert_eq!(ratios, vec![0.25, 0.25, 0.5]);
        assert!(layout.children[1].is_leaf);
        assert!(layout.children[1].has_children_field());
        assert!(!layout.children[0].has_children_field());
        assert_eq!(layout.children[2].children[0].ratio, 0.5);
        assert_eq!(layout.node_count(), 6);
    }

    #[test]
    fn single_node_is_a_leaf_with_unit_ratio() {
        let layout = compute_ratios(&Node::branch("solo", vec![]), "children");
        assert_eq!(layout.ratio, 1.0);
        assert!(layout.is_leaf);
        assert!(layout.children.is_empty());
    }
}
