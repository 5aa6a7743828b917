// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_diagram --heading-base-level=0

//! Understory Tree Diagram: a tree rendered as nested boxes joined by curves.
//!
//! [`TreeDiagram`] is the per-instance state a host widget keeps for one
//! mounted diagram. It ties together:
//!
//! - [`understory_tree_layout`] for ratios, wrapper directives, and
//!   connector geometry,
//! - [`understory_view2d`] for optional drag-to-pan and wheel zoom,
//! - a content callback invoked once per node with
//!   `(payload, target, is_leaf)`, where the payload is the node's record
//!   without its children field.
//!
//! The host implements [`DiagramHost`] to hand out render targets and report
//! measured sizes, and forwards resize, pointer, and wheel events. Every
//! trigger that changes geometry returns a [`Frame`]: the root transform plus
//! one [`LinkFrame`] per parent with its surface size and curves.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_tree_diagram::{DiagramHost, TreeDiagram};
//! use understory_tree_layout::{LayoutConfig, Node, NodeIndex};
//!
//! struct Host {
//!     labels: Vec<String>,
//! }
//!
//! impl DiagramHost<String> for Host {
//!     fn target(&mut self, node: NodeIndex) -> &mut String {
//!         if self.labels.len() <= node.get() {
//!             self.labels.resize(node.get() + 1, String::new());
//!         }
//!         &mut self.labels[node.get()]
//!     }
//!     fn link_surface_size(&self, _parent: NodeIndex) -> Size {
//!         Size::new(200.0, 80.0)
//!     }
//!     fn viewport_size(&self) -> Size {
//!         Size::new(640.0, 480.0)
//!     }
//!     fn content_size(&self) -> Size {
//!         Size::new(200.0, 200.0)
//!     }
//! }
//!
//! let mut diagram: TreeDiagram<Node<&str>, String> = TreeDiagram::new(LayoutConfig::default());
//! diagram.set_content(|name, label, _is_leaf| {
//!     label.push_str(name);
//!     Ok(())
//! });
//!
//! let mut host = Host { labels: Vec::new() };
//! let tree = Node::branch("root", vec![Node::leaf("left"), Node::leaf("right")]);
//! let frame = diagram.render(Some(tree), &mut host).unwrap();
//!
//! assert_eq!(host.labels, ["root", "left", "right"]);
//! assert_eq!(frame.connector_count(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diagram;
mod error;
mod host;

pub use diagram::{ContentFn, TreeDiagram};
pub use error::{ContentError, RenderError};
pub use host::{DiagramHost, Frame, LinkFrame};
