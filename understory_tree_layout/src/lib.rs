// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_layout --heading-base-level=0

//! Understory Tree Layout: proportional tree layout and connector geometry.
//!
//! This crate turns an arbitrary tree into a diagram description: every node
//! gets a share of its parent's extent, and every parent-to-child edge gets a
//! cubic Bézier connector. It decides geometry only; creating boxes, painting
//! node content and stroking curves are left to the host.
//!
//! The passes, in order:
//!
//! - [`compute_ratios`]: copies a [`TreeSource`] into a [`LayoutNode`] tree
//!   where each child's [`LayoutNode::ratio`] is its leaf count over the leaf
//!   count of all its siblings. The root's ratio is always `1.0`.
//! - [`build_layout`]: produces a [`WrapperNode`] tree of size directives plus
//!   one [`ConnectorGroup`] per non-leaf node, in pre-order. Each
//!   [`ConnectorSpec`] carries the child's ratio and the running
//!   `ratio_offset` of its earlier siblings.
//! - [`render_connector`]: evaluates a spec against the pixel size of the
//!   parent's link surface, yielding four control points and a
//!   [`StrokeDirective`]. This runs again on every resize, pan, or zoom.
//!
//! ## Orientation
//!
//! A vertical tree grows downward: wrappers stack node, link surface and
//! children container in a column, and children sit side by side in a row.
//! A horizontal tree swaps both, and its connector points are the vertical
//! ones with coordinates transposed.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_tree_layout::{
//!     LayoutConfig, Node, build_layout, compute_ratios, render_connector,
//! };
//!
//! let tree = Node::branch(
//!     "root",
//!     vec![Node::leaf("a"), Node::branch("b", vec![Node::leaf("b1"), Node::leaf("b2")])],
//! );
//! let config = LayoutConfig::default();
//!
//! let annotated = compute_ratios(&tree, &config.children_field);
//! let layout = build_layout(&annotated, &config).unwrap();
//!
//! let root_links = &layout.groups[0];
//! assert_eq!(root_links.specs[1].ratio_offset, 1.0 / 3.0);
//!
//! let curve = render_connector(&root_links.specs[0], Size::new(300.0, 80.0), 1.0, &config);
//! assert_eq!(curve.points[0].x, 150.0);
//! ```
//!
//! With the default `serde_json` feature, [`serde_json::Value`] objects are
//! tree sources too, and the children key is taken from
//! [`LayoutConfig::children_field`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod connector;
mod error;
mod layout;
mod ratio;
mod source;
mod style;

pub use config::{
    DEFAULT_CHILDREN_FIELD, GeometryPolicy, LayoutConfig, LayoutConfigPatch, LinkCap, Orientation,
};
pub use connector::{
    ConnectorCurve, StrokeDirective, connector_points, render_connector, stroke_for,
};
pub use error::{ConfigError, StructureError};
pub use layout::{ConnectorGroup, ConnectorSpec, Layout, NodeIndex, WrapperNode, build_layout};
pub use ratio::{LayoutNode, compute_ratios, leaf_count};
pub use source::{Node, RATIO_KEY, TreeSource};
pub use style::{
    Axis, AxisMargin, Direction, LayoutStyle, children_direction, cross_axis, halve_length,
    main_axis, wrapper_direction,
};
