// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static style directives shared by every node of a diagram.

use alloc::string::{String, ToString};

use crate::config::{LayoutConfig, Orientation};

/// A box axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

/// Flex direction of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Items side by side.
    Row,
    /// Items stacked.
    Column,
}

impl Direction {
    /// The CSS keyword for this direction.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Direction of a node wrapper: node, link surface and children container in sequence.
pub const fn wrapper_direction(orientation: Orientation) -> Direction {
    match orientation {
        Orientation::Horizontal => Direction::Row,
        Orientation::Vertical => Direction::Column,
    }
}

/// Direction of a children container; always the opposite of the wrapper's.
pub const fn children_direction(orientation: Orientation) -> Direction {
    match orientation {
        Orientation::Horizontal => Direction::Column,
        Orientation::Vertical => Direction::Row,
    }
}

/// Axis along which the tree grows.
pub const fn main_axis(orientation: Orientation) -> Axis {
    match orientation {
        Orientation::Horizontal => Axis::Width,
        Orientation::Vertical => Axis::Height,
    }
}

/// Axis along which siblings share their parent's extent.
pub const fn cross_axis(orientation: Orientation) -> Axis {
    match orientation {
        Orientation::Horizontal => Axis::Height,
        Orientation::Vertical => Axis::Width,
    }
}

/// Margin on the main and cross axes of a box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisMargin {
    /// Margin before and after the box along the main axis.
    pub main: String,
    /// Margin before and after the box along the cross axis.
    pub cross: String,
}

/// Style rules applied to every wrapper, node, link surface and children container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutStyle {
    /// Direction of every wrapper.
    pub wrapper_direction: Direction,
    /// Axis on which wrappers size to their content.
    pub wrapper_fit_axis: Axis,
    /// Margin around node content; siblings end up `node_margin` apart.
    pub node_margin: AxisMargin,
    /// Axis along which `link_length` applies.
    pub link_length_axis: Axis,
    /// Length of each link surface.
    pub link_length: String,
    /// Margin around each link surface.
    pub link_margin: AxisMargin,
    /// Direction of every children container.
    pub children_direction: Direction,
}

impl LayoutStyle {
    /// Derives the style rules for `config`.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let orientation = config.orientation;
        Self {
            wrapper_direction: wrapper_direction(orientation),
            wrapper_fit_axis: main_axis(orientation),
            node_margin: AxisMargin {
                main: String::from("0"),
                cross: halve_length(&config.node_margin),
            },
            link_length_axis: main_axis(orientation),
            link_length: config.link_length.clone(),
            link_margin: AxisMargin {
                main: config.link_margin.clone(),
                cross: String::from("0"),
            },
            children_direction: children_direction(orientation),
        }
    }
}

/// Halves the leading number of a CSS length, keeping its unit.
///
/// `"1rem"` becomes `"0.5rem"`. Values without a leading number are returned unchanged.
pub fn halve_length(length: &str) -> String {
    let trimmed = length.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(trimmed.len(), |(i, _)| i);
    let (number, unit) = trimmed.split_at(end);
    match number.parse::<f64>() {
        Ok(value) => {
            let mut out = (value / 2.0).to_string();
            out.push_str(unit);
            out
        }
        Err(_) => length.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_crossed() {
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            assert_ne!(
                wrapper_direction(orientation),
                children_direction(orientation)
            );
            assert_ne!(main_axis(orientation), cross_axis(orientation));
        }
        assert_eq!(wrapper_direction(Orientation::Horizontal).as_css(), "row");
        assert_eq!(children_direction(Orientation::Horizontal).as_css(), "column");
    }

    #[test]
    fn halving_keeps_units() {
        assert_eq!(halve_length("1rem"), "0.5rem");
        assert_eq!(halve_length("3px"), "1.5px");
        assert_eq!(halve_length(".5em"), "0.25em");
        assert_eq!(halve_length("0"), "0");
        assert_eq!(halve_length("auto"), "auto");
    }

    #[test]
    fn vertical_style() {
        let style = LayoutStyle::from_config(&LayoutConfig::default());
        assert_eq!(style.wrapper_direction, Direction::Column);
        assert_eq!(style.wrapper_fit_axis, Axis::Height);
        assert_eq!(style.children_direction, Direction::Row);
        assert_eq!(style.node_margin.cross, "0.5rem");
        assert_eq!(style.link_length, "5rem");
        assert_eq!(style.link_length_axis, Axis::Height);
    }

    #[test]
    fn horizontal_style() {
        let style = LayoutStyle::from_config(&LayoutConfig {
            orientation: Orientation::Horizontal,
            node_margin: String::from("2px"),
            ..LayoutConfig::default()
        });
        assert_eq!(style.wrapper_direction, Direction::Row);
        assert_eq!(style.wrapper_fit_axis, Axis::Width);
        assert_eq!(style.link_length_axis, Axis::Width);
        assert_eq!(style.children_direction, Direction::Column);
        assert_eq!(style.node_margin.main, "0");
        assert_eq!(style.node_margin.cross, "1px");
    }
}
