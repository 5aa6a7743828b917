// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The diagram instance: configuration, content binding, and render triggers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use kurbo::{Point, Size};
use understory_tree_layout::{
    ConfigError, Layout, LayoutConfig, LayoutConfigPatch, LayoutStyle, NodeIndex, TreeSource,
    WrapperNode, build_layout, compute_ratios, render_connector,
};
use understory_view2d::{
    PanZoomConfig, PanZoomConfigError, PointerButtons, ViewportController, ViewportState,
};

use crate::error::{ContentError, RenderError};
use crate::host::{DiagramHost, Frame, LinkFrame};

/// Content callback: `(payload, target, is_leaf)`.
pub type ContentFn<P, R> = Box<dyn FnMut(&P, &mut R, bool) -> Result<(), ContentError>>;

struct LinkSurface {
    parent: NodeIndex,
    /// CSS size, measured on first use and on every resize.
    measured: Option<Size>,
}

/// One mounted tree diagram.
///
/// Holds the configuration, the content callback, the last rendered data,
/// the layout built from it, and, once [`TreeDiagram::enable_transform`] is
/// called, a pan/zoom [`ViewportController`].
///
/// Render triggers are [`TreeDiagram::render`], [`TreeDiagram::on_resize`],
/// and with pan/zoom enabled [`TreeDiagram::on_pointer_move`] and
/// [`TreeDiagram::on_wheel`]. Each returns a [`Frame`] with every connector
/// re-evaluated in pre-order. Calls must not overlap; the host serializes them.
pub struct TreeDiagram<T: TreeSource, R> {
    config: LayoutConfig,
    style: LayoutStyle,
    content: ContentFn<T::Payload, R>,
    data: Option<T>,
    layout: Option<Layout<T::Payload>>,
    surfaces: Vec<LinkSurface>,
    viewport: Option<ViewportController>,
}

impl<T: TreeSource, R> core::fmt::Debug for TreeDiagram<T, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeDiagram")
            .field("config", &self.config)
            .field("has_data", &self.data.is_some())
            .field("rendered", &self.layout.is_some())
            .field("link_surfaces", &self.surfaces.len())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

fn no_content<P: 'static, R: 'static>() -> ContentFn<P, R> {
    Box::new(|_, _, _| Ok(()))
}

impl<T, R> TreeDiagram<T, R>
where
    T: TreeSource + Clone,
    T::Payload: 'static,
    R: 'static,
{
    /// Creates a diagram with a no-op content callback and pan/zoom disabled.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            style: LayoutStyle::from_config(&config),
            config,
            content: no_content(),
            data: None,
            layout: None,
            surfaces: Vec::new(),
            viewport: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Style rules for the current configuration.
    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    /// The layout of the last successful render, if any.
    ///
    /// Reconfiguring discards it until the next render.
    pub fn layout(&self) -> Option<&Layout<T::Payload>> {
        self.layout.as_ref()
    }

    /// Current zoom and offset; identity while pan/zoom is disabled.
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
            .as_ref()
            .map_or_else(ViewportState::default, ViewportController::state)
    }

    /// Applies configuration overrides.
    ///
    /// The current layout is discarded; call [`TreeDiagram::render`] to lay
    /// out the cached data again.
    ///
    /// # Errors
    ///
    /// See [`LayoutConfig::merged`].
    pub fn configure(&mut self, patch: &LayoutConfigPatch) -> Result<&mut Self, ConfigError> {
        self.config = self.config.merged(patch)?;
        self.style = LayoutStyle::from_config(&self.config);
        self.layout = None;
        self.surfaces.clear();
        Ok(self)
    }

    /// Replaces the content callback.
    pub fn set_content(
        &mut self,
        content: impl FnMut(&T::Payload, &mut R, bool) -> Result<(), ContentError> + 'static,
    ) -> &mut Self {
        self.content = Box::new(content);
        self
    }

    /// Runs `content` after the current callback, for every node.
    ///
    /// The new callback is skipped for a node whose earlier callback failed.
    pub fn chain_content(
        &mut self,
        mut content: impl FnMut(&T::Payload, &mut R, bool) -> Result<(), ContentError> + 'static,
    ) -> &mut Self {
        let mut current = core::mem::replace(&mut self.content, no_content());
        self.content = Box::new(move |payload, target, is_leaf| {
            current(payload, &mut *target, is_leaf)?;
            content(payload, target, is_leaf)
        });
        self
    }

    /// Enables drag-to-pan and wheel zoom. Calls after the first are ignored.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config` on the enabling call.
    pub fn enable_transform(
        &mut self,
        config: PanZoomConfig,
    ) -> Result<&mut Self, PanZoomConfigError> {
        if self.viewport.is_none() {
            self.viewport = Some(ViewportController::new(config)?);
            log::debug!("tree diagram: pan/zoom enabled");
        }
        Ok(self)
    }

    /// Returns `true` once [`TreeDiagram::enable_transform`] succeeded.
    pub fn transform_enabled(&self) -> bool {
        self.viewport.is_some()
    }

    /// Lays out `data` (or the cached data when `None`), binds node content,
    /// and draws every connector.
    ///
    /// On error nothing from this call is kept: the previous data, layout
    /// and surfaces stay in place.
    ///
    /// # Errors
    ///
    /// - [`RenderError::MissingData`] when `data` is `None` and nothing is cached.
    /// - [`RenderError::Structure`] when the root lacks the children field.
    /// - [`RenderError::Content`] when the content callback fails.
    pub fn render(
        &mut self,
        data: Option<T>,
        host: &mut impl DiagramHost<R>,
    ) -> Result<Frame, RenderError> {
        let data = match data {
            Some(data) => data,
            None => self.data.clone().ok_or(RenderError::MissingData)?,
        };

        let annotated = compute_ratios(&data, &self.config.children_field);
        let layout = build_layout(&annotated, &self.config)?;
        bind_content(&layout.root, &mut self.content, host).map_err(RenderError::Content)?;

        self.surfaces = layout
            .groups
            .iter()
            .map(|group| LinkSurface {
                parent: group.parent,
                measured: None,
            })
            .collect();
        log::debug!(
            "tree diagram: rendered {} nodes, {} link surfaces",
            layout.node_count(),
            self.surfaces.len()
        );
        self.layout = Some(layout);
        self.data = Some(data);

        if let Some(viewport) = &mut self.viewport {
            viewport.set_metrics(host.viewport_size(), host.content_size());
        }
        Ok(self.redraw(&*host))
    }

    /// Re-evaluates every connector against current sizes, zoom and pixel ratio.
    ///
    /// Returns an empty frame when nothing has been rendered yet.
    pub fn redraw(&mut self, host: &impl DiagramHost<R>) -> Frame {
        let viewport = self.viewport_state();
        let pixel_ratio = if self.config.policy.scale_by_pixel_ratio {
            host.device_pixel_ratio()
        } else {
            1.0
        };
        let scale = pixel_ratio * viewport.zoom;

        let mut links = Vec::with_capacity(self.surfaces.len());
        if let Some(layout) = &self.layout {
            for (group, surface) in layout.groups.iter().zip(&mut self.surfaces) {
                let parent = surface.parent;
                let css = *surface
                    .measured
                    .get_or_insert_with(|| host.link_surface_size(parent));
                if css.width <= 0.0 || css.height <= 0.0 {
                    log::warn!(
                        "tree diagram: link surface of node {} has zero area",
                        parent.get()
                    );
                }
                let pixels = Size::new(css.width * scale, css.height * scale);
                log::trace!(
                    "tree diagram: {} connectors on {pixels:?}",
                    group.specs.len()
                );
                links.push(LinkFrame {
                    parent: group.parent,
                    surface: pixels,
                    curves: group
                        .specs
                        .iter()
                        .map(|spec| render_connector(spec, pixels, scale, &self.config))
                        .collect(),
                });
            }
        }

        Frame {
            viewport,
            transform: viewport.transform(),
            links,
        }
    }

    /// Handles a viewport resize: re-measures link surfaces, re-constrains
    /// the offset, and redraws.
    ///
    /// Returns `None` when nothing has been rendered yet.
    pub fn on_resize(&mut self, host: &impl DiagramHost<R>) -> Option<Frame> {
        self.layout.as_ref()?;
        for surface in &mut self.surfaces {
            surface.measured = Some(host.link_surface_size(surface.parent));
        }
        if let Some(viewport) = &mut self.viewport {
            viewport.set_metrics(host.viewport_size(), host.content_size());
        }
        Some(self.redraw(host))
    }

    /// Handles a press on the diagram's root box. Returns `true` if a drag started.
    pub fn on_pointer_down(&mut self, buttons: PointerButtons, position: Point) -> bool {
        self.viewport
            .as_mut()
            .is_some_and(|viewport| viewport.on_pointer_down(buttons, position))
    }

    /// Handles a pointer move anywhere; pans and redraws while dragging.
    ///
    /// The offset is constrained against the host's current sizes. Moves
    /// before the first render are ignored.
    pub fn on_pointer_move(
        &mut self,
        position: Point,
        host: &impl DiagramHost<R>,
    ) -> Option<Frame> {
        let moved = self.live_viewport(host)?.on_pointer_move(position);
        moved.then(|| self.redraw(host))
    }

    /// Handles a button release anywhere. Returns `true` if a drag ended.
    pub fn on_pointer_up(&mut self, released: PointerButtons) -> bool {
        self.viewport
            .as_mut()
            .is_some_and(|viewport| viewport.on_pointer_up(released))
    }

    /// Handles a wheel event over the diagram; zooms and redraws.
    ///
    /// Like [`TreeDiagram::on_pointer_move`], ignored before the first render.
    pub fn on_wheel(&mut self, delta_y: f64, host: &impl DiagramHost<R>) -> Option<Frame> {
        let zoomed = self.live_viewport(host)?.on_wheel(delta_y);
        zoomed.then(|| self.redraw(host))
    }

    /// The viewport controller with metrics refreshed from `host`, once
    /// something has been rendered and pan/zoom is enabled.
    fn live_viewport(&mut self, host: &impl DiagramHost<R>) -> Option<&mut ViewportController> {
        self.layout.as_ref()?;
        let viewport = self.viewport.as_mut()?;
        viewport.set_metrics(host.viewport_size(), host.content_size());
        Some(viewport)
    }
}

fn bind_content<P, R>(
    node: &WrapperNode<P>,
    content: &mut ContentFn<P, R>,
    host: &mut impl DiagramHost<R>,
) -> Result<(), ContentError> {
    content(&node.payload, host.target(node.index), node.is_leaf)?;
    for child in &node.children {
        bind_content(child, content, host)?;
    }
    Ok(())
}
