// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout configuration: orientation, link styling, and geometry policy.

use alloc::string::String;

use crate::error::ConfigError;

/// Default name of the children field.
pub const DEFAULT_CHILDREN_FIELD: &str = "children";

/// Direction in which the tree grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Root at the top, children below.
    #[default]
    Vertical,
    /// Root at the left, children to the right.
    Horizontal,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Horizontal`].
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Line cap applied to connector strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkCap {
    /// Flat cap ending exactly at the endpoint.
    Butt,
    /// Semicircular cap.
    #[default]
    Round,
    /// Square cap extending half the stroke width.
    Square,
}

impl LinkCap {
    /// The CSS/SVG `line-cap` keyword.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Switches for behavior that differs between otherwise equivalent renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryPolicy {
    /// Clamp `link_slope_start`/`link_slope_end` to `[0, 1]` before use.
    pub clamp_slopes: bool,
    /// Multiply link surface sizes and stroke widths by the device pixel ratio.
    pub scale_by_pixel_ratio: bool,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            clamp_slopes: true,
            scale_by_pixel_ratio: true,
        }
    }
}

/// Immutable layout configuration.
///
/// Construct one with [`LayoutConfig::default`] and derive variants with
/// [`LayoutConfig::merged`]. Changing any field requires a fresh layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Name of the field holding a node's children.
    pub children_field: String,
    /// Growth direction.
    pub orientation: Orientation,
    /// Cap style for connector strokes. `None` disables cap styling, which
    /// also removes the stroke-width safety inset from connector endpoints.
    pub link_cap: Option<LinkCap>,
    /// Stroke color, passed through to the paint collaborator untouched.
    pub link_color: String,
    /// CSS length of a link surface along the main axis.
    pub link_length: String,
    /// CSS length of the margin around a link surface on the main axis.
    pub link_margin: String,
    /// How late the curve turns toward the child, in `[0, 1]`.
    pub link_slope_end: f64,
    /// How long the curve keeps leaving the parent straight, in `[0, 1]`.
    pub link_slope_start: f64,
    /// Stroke width in CSS pixels before pixel-ratio and zoom scaling.
    pub link_strength: f64,
    /// CSS length of the gap between sibling nodes.
    pub node_margin: String,
    /// Slope clamping and pixel-ratio scaling.
    pub policy: GeometryPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            children_field: String::from(DEFAULT_CHILDREN_FIELD),
            orientation: Orientation::Vertical,
            link_cap: Some(LinkCap::Round),
            link_color: String::from("#000000"),
            link_length: String::from("5rem"),
            link_margin: String::from("0"),
            link_slope_end: 1.0,
            link_slope_start: 1.0,
            link_strength: 1.0,
            node_margin: String::from("1rem"),
            policy: GeometryPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Returns a copy of `self` with every field set in `patch` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOverride`] when `patch` sets nothing and
    /// [`ConfigError::EmptyChildrenField`] when it names an empty children field.
    pub fn merged(&self, patch: &LayoutConfigPatch) -> Result<Self, ConfigError> {
        if patch.is_empty() {
            return Err(ConfigError::EmptyOverride);
        }
        if patch.children_field.as_deref() == Some("") {
            return Err(ConfigError::EmptyChildrenField);
        }
        let mut next = self.clone();
        if let Some(v) = &patch.children_field {
            next.children_field.clone_from(v);
        }
        if let Some(v) = patch.orientation {
            next.orientation = v;
        }
        if let Some(v) = patch.link_cap {
            next.link_cap = v;
        }
        if let Some(v) = &patch.link_color {
            next.link_color.clone_from(v);
        }
        if let Some(v) = &patch.link_length {
            next.link_length.clone_from(v);
        }
        if let Some(v) = &patch.link_margin {
            next.link_margin.clone_from(v);
        }
        if let Some(v) = patch.link_slope_end {
            next.link_slope_end = v;
        }
        if let Some(v) = patch.link_slope_start {
            next.link_slope_start = v;
        }
        if let Some(v) = patch.link_strength {
            next.link_strength = v;
        }
        if let Some(v) = &patch.node_margin {
            next.node_margin.clone_from(v);
        }
        if let Some(v) = patch.policy {
            next.policy = v;
        }
        Ok(next)
    }

    /// Slope-start as used by the geometry, honoring [`GeometryPolicy::clamp_slopes`].
    pub fn effective_slope_start(&self) -> f64 {
        self.slope(self.link_slope_start)
    }

    /// Slope-end as used by the geometry, honoring [`GeometryPolicy::clamp_slopes`].
    pub fn effective_slope_end(&self) -> f64 {
        self.slope(self.link_slope_end)
    }

    fn slope(&self, value: f64) -> f64 {
        if self.policy.clamp_slopes {
            value.clamp(0.0, 1.0)
        } else {
            value
        }
    }
}

/// A set of overrides for [`LayoutConfig`]; unset fields keep their value.
///
/// `link_cap` is doubly optional: `Some(None)` turns cap styling off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutConfigPatch {
    /// See [`LayoutConfig::children_field`].
    pub children_field: Option<String>,
    /// See [`LayoutConfig::orientation`].
    pub orientation: Option<Orientation>,
    /// See [`LayoutConfig::link_cap`].
    pub link_cap: Option<Option<LinkCap>>,
    /// See [`LayoutConfig::link_color`].
    pub link_color: Option<String>,
    /// See [`LayoutConfig::link_length`].
    pub link_length: Option<String>,
    /// See [`LayoutConfig::link_margin`].
    pub link_margin: Option<String>,
    /// See [`LayoutConfig::link_slope_end`].
    pub link_slope_end: Option<f64>,
    /// See [`LayoutConfig::link_slope_start`].
    pub link_slope_start: Option<f64>,
    /// See [`LayoutConfig::link_strength`].
    pub link_strength: Option<f64>,
    /// See [`LayoutConfig::node_margin`].
    pub node_margin: Option<String>,
    /// See [`LayoutConfig::policy`].
    pub policy: Option<GeometryPolicy>,
}

impl LayoutConfigPatch {
    /// Returns `true` when no override is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
