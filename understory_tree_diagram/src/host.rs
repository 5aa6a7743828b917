// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side collaborator and the frames handed back to it.

use alloc::vec::Vec;
use kurbo::{Affine, BezPath, Size};
use understory_tree_layout::{ConnectorCurve, NodeIndex};
use understory_view2d::ViewportState;

/// Everything a diagram needs from the surface it is mounted in.
///
/// Sizes are in CSS pixels, before pixel-ratio and zoom scaling.
pub trait DiagramHost<R> {
    /// The render target for a node's content, handed to the content callback.
    fn target(&mut self, node: NodeIndex) -> &mut R;

    /// Measured size of the link surface below `parent`.
    fn link_surface_size(&self, parent: NodeIndex) -> Size;

    /// Size of the box the diagram is shown in.
    fn viewport_size(&self) -> Size;

    /// Untransformed size of the whole diagram.
    fn content_size(&self) -> Size;

    /// Ratio of physical to CSS pixels.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Connectors for one parent's link surface.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkFrame {
    /// The parent owning the surface.
    pub parent: NodeIndex,
    /// Surface backing size in physical pixels.
    pub surface: Size,
    /// One curve per child, left to right.
    pub curves: Vec<ConnectorCurve>,
}

impl LinkFrame {
    /// All curves of this surface as one path, one subpath per connector.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for curve in &self.curves {
            let [p0, p1, p2, p3] = curve.points;
            path.move_to(p0);
            path.curve_to(p1, p2, p3);
        }
        path
    }
}

/// The result of one render trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Zoom and offset in effect.
    pub viewport: ViewportState,
    /// Transform for the diagram's root box.
    pub transform: Affine,
    /// Link surfaces in pre-order of their parents.
    pub links: Vec<LinkFrame>,
}

impl Frame {
    /// Number of connectors in the frame.
    pub fn connector_count(&self) -> usize {
        self.links.iter().map(|link| link.curves.len()).sum()
    }
}
