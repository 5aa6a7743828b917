// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout pass: wrapper size directives and per-edge connector specs.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::config::{LayoutConfig, Orientation};
use crate::error::StructureError;
use crate::ratio::LayoutNode;
use crate::style::{Axis, Direction, children_direction, cross_axis, wrapper_direction};

/// Pre-order position of a node in a laid-out tree. The root is `0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub(crate) u32);

impl NodeIndex {
    /// The root node.
    pub const ROOT: Self = Self(0);

    /// Returns the pre-order position as a `usize`.
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// Geometric description of one node's wrapper box.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapperNode<P> {
    /// Pre-order index.
    pub index: NodeIndex,
    /// Node record without structural fields.
    pub payload: P,
    /// Share of the parent's extent along [`WrapperNode::size_axis`].
    pub ratio: f64,
    /// Axis the share applies to: width for vertical trees, height for horizontal ones.
    pub size_axis: Axis,
    /// Direction of this wrapper's own content.
    pub direction: Direction,
    /// Direction of this wrapper's children container.
    pub children_direction: Direction,
    /// `true` when the node has no children; leaves get no link surface.
    pub is_leaf: bool,
    /// Child wrappers, in order.
    pub children: Vec<Self>,
}

impl<P> WrapperNode<P> {
    /// The size share as a CSS percentage.
    pub fn size_percent(&self) -> f64 {
        self.ratio * 100.0
    }

    /// Visits this subtree in pre-order, children left to right.
    pub fn visit_pre_order<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in &self.children {
            child.visit_pre_order(f);
        }
    }
}

/// Geometry inputs for one parent-to-child edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorSpec {
    /// The child end of the edge.
    pub child: NodeIndex,
    /// The child's share of the parent's extent.
    pub ratio: f64,
    /// Sum of the ratios of the child's earlier siblings.
    pub ratio_offset: f64,
    /// Orientation the layout was built with.
    pub orientation: Orientation,
    /// Effective slope-start at build time.
    pub slope_start: f64,
    /// Effective slope-end at build time.
    pub slope_end: f64,
}

/// All connectors drawn on one parent's link surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorGroup {
    /// The parent node owning the link surface.
    pub parent: NodeIndex,
    /// One spec per child, left to right.
    pub specs: SmallVec<[ConnectorSpec; 4]>,
}

/// Output of [`build_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<P> {
    /// Wrapper tree mirroring the input.
    pub root: WrapperNode<P>,
    /// Connector groups in pre-order of their parents.
    pub groups: Vec<ConnectorGroup>,
}

impl<P> Layout<P> {
    /// Iterates over every connector spec in registration order.
    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorSpec> {
        self.groups.iter().flat_map(|group| group.specs.iter())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.visit_pre_order(&mut |_| count += 1);
        count
    }
}

/// Lays out an annotated tree.
///
/// # Errors
///
/// Returns [`StructureError`] when the root lacked the configured children
/// field. A root whose field is present but empty lays out as a single leaf.
pub fn build_layout<P: Clone>(
    tree: &LayoutNode<P>,
    config: &LayoutConfig,
) -> Result<Layout<P>, StructureError> {
    if !tree.has_children_field() {
        return Err(StructureError {
            children_field: config.children_field.clone(),
        });
    }

    let mut builder = Builder {
        config,
        slope_start: config.effective_slope_start(),
        slope_end: config.effective_slope_end(),
        next_index: 0,
        groups: Vec::new(),
    };
    let root = builder.wrap(tree);
    log::debug!(
        "built layout: {} nodes, {} connector groups",
        builder.next_index,
        builder.groups.len()
    );
    Ok(Layout {
        root,
        groups: builder.groups,
    })
}

struct Builder<'a> {
    config: &'a LayoutConfig,
    slope_start: f64,
    slope_end: f64,
    next_index: u32,
    groups: Vec<ConnectorGroup>,
}

impl Builder<'_> {
    fn wrap<P: Clone>(&mut self, node: &LayoutNode<P>) -> WrapperNode<P> {
        let orientation = self.config.orientation;
        let index = NodeIndex(self.next_index);
        self.next_index += 1;

        let mut wrapper = WrapperNode {
            index,
            payload: node.payload.clone(),
            ratio: node.ratio,
            size_axis: cross_axis(orientation),
            direction: wrapper_direction(orientation),
            children_direction: children_direction(orientation),
            is_leaf: node.is_leaf,
            children: Vec::with_capacity(node.children.len()),
        };
        if node.is_leaf {
            return wrapper;
        }

        // Reserve the parent's slot so groups stay in pre-order.
        let slot = self.groups.len();
        self.groups.push(ConnectorGroup {
            parent: index,
            specs: SmallVec::new(),
        });

        let mut specs = SmallVec::with_capacity(node.children.len());
        let mut ratio_offset = 0.0;
        for child in &node.children {
            let child_wrapper = self.wrap(child);
            specs.push(ConnectorSpec {
                child: child_wrapper.index,
                ratio: child.ratio,
                ratio_offset,
                orientation,
                slope_start: self.slope_start,
                slope_end: self.slope_end,
            });
            ratio_offset += child.ratio;
            wrapper.children.push(child_wrapper);
        }
        self.groups[slot].specs = specs;
        wrapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::compute_ratios;
    use crate::source::Node;
    use alloc::vec;

    fn sample() -> Node<u32> {
        Node::branch(
            0,
            vec![
                Node::leaf(1),
                Node::leaf(2),
                Node::branch(3, vec![Node::leaf(4), Node::leaf(5)]),
            ],
        )
    }

    #[test]
    fn offsets_accumulate_left_to_right() {
        let config = LayoutConfig::default();
        let layout = build_layout(&compute_ratios(&sample(), "children"), &config).unwrap();
        assert_eq!(layout.groups.len(), 2);

        let root_group = &layout.groups[0];
        assert_eq!(root_group.parent, NodeIndex::ROOT);
        let offsets: Vec<f64> = root_group.specs.iter().map(|s| s.ratio_offset).collect();
        let ratios: Vec<f64> = root_group.specs.iter().map(|s| s.ratio).collect();
        assert_eq!(offsets, vec![0.0, 0.25, 0.5]);
        assert_eq!(ratios, vec![0.25, 0.25, 0.5]);

        let children: Vec<usize> = root_group.specs.iter().map(|s| s.child.get()).collect();
        assert_eq!(children, vec![1, 2, 3]);
        assert_eq!(layout.groups[1].parent.get(), 3);
    }

    #[test]
    fn wrappers_use_crossed_directions() {
        let config = LayoutConfig {
            orientation: Orientation::Horizontal,
            ..LayoutConfig::default()
        };
        let layout = build_layout(&compute_ratios(&sample(), "children"), &config).unwrap();
        assert_eq!(layout.root.direction, Direction::Row);
        assert_eq!(layout.root.children_direction, Direction::Column);
        assert_eq!(layout.root.size_axis, Axis::Height);
        assert_eq!(layout.root.size_percent(), 100.0);
        assert_eq!(layout.root.children[2].size_percent(), 50.0);
        assert_eq!(layout.node_count(), 6);
    }

    #[test]
    fn missing_children_field_is_a_structure_error() {
        let config = LayoutConfig::default();
        let err = build_layout(&compute_ratios(&Node::leaf(0_u32), "children"), &config)
            .unwrap_err();
        assert_eq!(err.children_field, "children");
    }

    #[test]
    fn empty_root_is_a_single_leaf() {
        let config = LayoutConfig::default();
        let layout =
            build_layout(&compute_ratios(&Node::branch(0_u32, vec![]), "children"), &config)
                .unwrap();
        assert!(layout.root.is_leaf);
        assert!(layout.groups.is_empty());
        assert_eq!(layout.connectors().count(), 0);
    }
}
