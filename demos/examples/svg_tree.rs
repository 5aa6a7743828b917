// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render a JSON tree to SVG: boxes from wrapper ratios, curves from connector frames.
//!
//! The host here is a toy: it places every wrapper on a fixed grid of rows,
//! so link surfaces are `width × LINK_HEIGHT` boxes below each parent.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_tree_demos --example svg_tree`

use std::collections::BTreeMap;
use std::fmt::Write as _;

use kurbo::{Affine, Rect, Shape, Size};
use serde_json::{Value, json};
use understory_tree_diagram::{DiagramHost, TreeDiagram};
use understory_tree_layout::{
    LayoutConfig, NodeIndex, WrapperNode, build_layout, compute_ratios,
};

const WIDTH: f64 = 720.0;
const NODE_HEIGHT: f64 = 32.0;
const LINK_HEIGHT: f64 = 64.0;

struct SvgHost {
    /// Wrapper box per node, in diagram coordinates.
    boxes: BTreeMap<NodeIndex, Rect>,
    /// Label text per node, filled by the content callback.
    labels: BTreeMap<NodeIndex, String>,
}

impl SvgHost {
    fn place(&mut self, node: &WrapperNode<Value>, x0: f64, width: f64, depth: usize) {
        let y0 = depth as f64 * (NODE_HEIGHT + LINK_HEIGHT);
        self.boxes
            .insert(node.index, Rect::new(x0, y0, x0 + width, y0 + NODE_HEIGHT));
        let mut x = x0;
        for child in &node.children {
            let child_width = width * child.ratio;
            self.place(child, x, child_width, depth + 1);
            x += child_width;
        }
    }

    fn link_origin(&self, parent: NodeIndex) -> (f64, f64) {
        self.boxes
            .get(&parent)
            .map_or((0.0, 0.0), |rect| (rect.x0, rect.y1))
    }
}

impl DiagramHost<String> for SvgHost {
    fn target(&mut self, node: NodeIndex) -> &mut String {
        self.labels.entry(node).or_default()
    }

    fn link_surface_size(&self, parent: NodeIndex) -> Size {
        self.boxes
            .get(&parent)
            .map_or(Size::ZERO, |rect| Size::new(rect.width(), LINK_HEIGHT))
    }

    fn viewport_size(&self) -> Size {
        Size::new(WIDTH, 480.0)
    }

    fn content_size(&self) -> Size {
        let bottom = self.boxes.values().map(|rect| rect.y1).fold(0.0, f64::max);
        Size::new(WIDTH, bottom)
    }
}

fn main() {
    env_logger::init();

    let tree = json!({
        "name": "understory",
        "children": [
            { "name": "tree_layout", "children": [
                { "name": "ratio" }, { "name": "layout" }, { "name": "connector" },
            ] },
            { "name": "view2d", "children": [{ "name": "viewport" }] },
            { "name": "tree_diagram" },
        ],
    });

    let config = LayoutConfig::default();

    // Layout is deterministic, so the host can pre-compute its boxes from the
    // same tree and config the diagram will use.
    let mut host = SvgHost {
        boxes: BTreeMap::new(),
        labels: BTreeMap::new(),
    };
    match build_layout(&compute_ratios(&tree, &config.children_field), &config) {
        Ok(layout) => host.place(&layout.root, 0.0, WIDTH, 0),
        Err(err) => {
            log::error!("{err}");
            return;
        }
    }

    let mut diagram: TreeDiagram<Value, String> = TreeDiagram::new(config);
    diagram.set_content(|payload, label, is_leaf| {
        let name = payload.get("name").and_then(Value::as_str).unwrap_or("?");
        label.push_str(name);
        if !is_leaf {
            label.push('/');
        }
        Ok(())
    });

    let frame = match diagram.render(Some(tree), &mut host) {
        Ok(frame) => frame,
        Err(err) => {
            log::error!("render failed: {err}");
            return;
        }
    };

    let size = host.content_size();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        size.width, size.height
    );
    for (index, rect) in &host.boxes {
        let label = host.labels.get(index).map_or("", String::as_str);
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" text-anchor="middle">{label}</text>"#,
            rect.center().x,
            rect.center().y
        );
    }
    for link in &frame.links {
        let (x, y) = host.link_origin(link.parent);
        let path = Affine::translate((x, y)) * link.to_path();
        let Some(stroke) = link.curves.first().map(|curve| &curve.stroke) else {
            continue;
        };
        let cap = stroke.cap.map_or(String::new(), |cap| {
            format!(r#" stroke-linecap="{}""#, cap.as_css())
        });
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"{cap}/>"#,
            path.to_svg(),
            stroke.color,
            stroke.width
        );
        log::debug!("{} connectors below node {}", link.curves.len(), link.parent.get());
    }
    svg.push_str("</svg>\n");
    print!("{svg}");

    let bounds = frame
        .links
        .iter()
        .map(|link| link.to_path().bounding_box())
        .fold(Rect::ZERO, |acc, rect| acc.union(rect));
    log::info!("connector bounds in surface space: {bounds:?}");
}
