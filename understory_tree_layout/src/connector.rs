// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector geometry: one cubic Bézier per parent-to-child edge.
//!
//! A parent's link surface spans the gap between the parent node and its
//! children container. Every connector starts at the middle of the surface's
//! near edge and ends at the far edge, above the center of the child's share
//! of the cross axis.
//!
//! Points are computed in a "vertical frame" where `x` runs along the cross
//! axis and `y` along the main axis. Horizontal trees transpose the frame.

use alloc::string::String;
use kurbo::{CubicBez, Point, Size};

use crate::config::{LayoutConfig, LinkCap, Orientation};
use crate::layout::ConnectorSpec;

/// How a connector is stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDirective {
    /// Stroke width in surface pixels.
    pub width: f64,
    /// Cap style; `None` when the configuration defines no cap styling.
    pub cap: Option<LinkCap>,
    /// Stroke color, passed through from the configuration.
    pub color: String,
}

/// Control points and stroke for one connector.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorCurve {
    /// Start, two control points, and end, in surface pixels.
    pub points: [Point; 4],
    /// Stroke settings.
    pub stroke: StrokeDirective,
}

impl ConnectorCurve {
    /// The curve as a [`CubicBez`].
    pub fn to_cubic(&self) -> CubicBez {
        let [p0, p1, p2, p3] = self.points;
        CubicBez::new(p0, p1, p2, p3)
    }
}

/// Computes the four control points of a connector.
///
/// `surface` is the pixel size of the link surface. `safety` insets both
/// endpoints along the main axis so a stroke cap does not overdraw the
/// surface edge.
pub fn connector_points(spec: &ConnectorSpec, surface: Size, safety: f64) -> [Point; 4] {
    let horizontal = spec.orientation == Orientation::Horizontal;
    let (cross, main) = if horizontal {
        (surface.height, surface.width)
    } else {
        (surface.width, surface.height)
    };

    let start_x = cross / 2.0;
    let end_x = spec.ratio_offset * cross + spec.ratio * cross / 2.0;
    let points = [
        Point::new(start_x, safety),
        Point::new(start_x, main * spec.slope_start + safety),
        Point::new(end_x, main * (1.0 - spec.slope_end) - safety),
        Point::new(end_x, main - safety),
    ];
    if horizontal {
        points.map(transpose)
    } else {
        points
    }
}

/// Stroke width and endpoint inset for a given surface scale.
///
/// `scale` is the factor between CSS pixels and surface pixels.
pub fn stroke_for(config: &LayoutConfig, scale: f64) -> (StrokeDirective, f64) {
    let width = config.link_strength * scale;
    let safety = if config.link_cap.is_some() { width } else { 0.0 };
    (
        StrokeDirective {
            width,
            cap: config.link_cap,
            color: config.link_color.clone(),
        },
        safety,
    )
}

/// Computes one connector against a link surface of `surface` pixels.
pub fn render_connector(
    spec: &ConnectorSpec,
    surface: Size,
    scale: f64,
    config: &LayoutConfig,
) -> ConnectorCurve {
    let (stroke, safety) = stroke_for(config, scale);
    ConnectorCurve {
        points: connector_points(spec, surface, safety),
        stroke,
    }
}

fn transpose(p: Point) -> Point {
    Point::new(p.y, p.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NodeIndex;

    fn spec(orientation: Orientation) -> ConnectorSpec {
        ConnectorSpec {
            child: NodeIndex(2),
            ratio: 0.5,
            ratio_offset: 0.25,
            orientation,
            slope_start: 1.0,
            slope_end: 1.0,
        }
    }

    #[test]
    fn centered_child_gives_straight_line() {
        let points = connector_points(&spec(Orientation::Vertical), Size::new(100.0, 40.0), 0.0);
        assert_eq!(
            points,
            [
                Point::new(50.0, 0.0),
                Point::new(50.0, 40.0),
                Point::new(50.0, 0.0),
                Point::new(50.0, 40.0),
            ]
        );
    }

    #[test]
    fn zero_slopes_go_diagonal() {
        let spec = ConnectorSpec {
            ratio: 0.25,
            ratio_offset: 0.0,
            slope_start: 0.0,
            slope_end: 0.0,
            ..spec(Orientation::Vertical)
        };
        let points = connector_points(&spec, Size::new(80.0, 20.0), 0.0);
        assert_eq!(points[0], Point::new(40.0, 0.0));
        assert_eq!(points[1], Point::new(40.0, 0.0));
        assert_eq!(points[2], Point::new(10.0, 20.0));
        assert_eq!(points[3], Point::new(10.0, 20.0));
    }

    #[test]
    fn horizontal_transposes_vertical() {
        let vertical = connector_points(&spec(Orientation::Vertical), Size::new(100.0, 40.0), 2.0);
        let horizontal =
            connector_points(&spec(Orientation::Horizontal), Size::new(40.0, 100.0), 2.0);
        for (v, h) in vertical.iter().zip(&horizontal) {
            assert_eq!(*h, Point::new(v.y, v.x));
        }
    }

    #[test]
    fn safety_follows_cap_styling() {
        let mut config = LayoutConfig {
            link_strength: 2.0,
            ..LayoutConfig::default()
        };
        let surface = Size::new(100.0, 40.0);
        let curve = render_connector(&spec(Orientation::Vertical), surface, 1.5, &config);
        assert_eq!(curve.stroke.width, 3.0);
        assert_eq!(curve.points[0], Point::new(50.0, 3.0));
        assert_eq!(curve.points[3], Point::new(50.0, 37.0));
        assert_eq!(curve.stroke.color, "#000000");

        config.link_cap = None;
        let curve = render_connector(&spec(Orientation::Vertical), surface, 1.5, &config);
        assert_eq!(curve.points[0], Point::new(50.0, 0.0));
        assert_eq!(curve.stroke.cap, None);
    }

    #[test]
    fn zero_surface_is_degenerate() {
        let curve = render_connector(
            &spec(Orientation::Vertical),
            Size::ZERO,
            1.0,
            &LayoutConfig {
                link_cap: None,
                ..LayoutConfig::default()
            },
        );
        assert!(curve.points.iter().all(|p| *p == Point::ZERO));
        assert_eq!(curve.to_cubic().p0, Point::ZERO);
    }
}
