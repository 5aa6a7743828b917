// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state machine: drag to pan, wheel to zoom.

use kurbo::{Affine, Point, Size, Vec2};

use crate::config::{PanZoomConfig, PanZoomConfigError, WHEEL_DELTA_SCALE};

bitflags::bitflags! {
    /// Pointer buttons held during an event, using the DOM `buttons` bit layout.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Usually the left button.
        const PRIMARY   = 0b0000_0001;
        /// Usually the right button.
        const SECONDARY = 0b0000_0010;
        /// Usually the wheel button.
        const AUXILIARY = 0b0000_0100;
        /// Browser back button.
        const BACK      = 0b0000_1000;
        /// Browser forward button.
        const FORWARD   = 0b0001_0000;
    }
}

/// Zoom factor and pan offset of a diagram.
///
/// The host applies [`ViewportState::transform`] to the diagram's root box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Scale factor.
    pub zoom: f64,
    /// Translation in unscaled diagram units, applied before scaling.
    pub offset: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewportState {
    /// `scale(zoom)` followed by `translate(offset)`, as a single affine.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.offset)
    }
}

/// Whether a drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    /// No drag.
    Idle,
    /// Primary button held since `pointer`, when the offset was `offset`.
    Dragging {
        /// Pointer position at press time.
        pointer: Point,
        /// Viewport offset at press time.
        offset: Vec2,
    },
}

/// Constrains `offset` so the diagram stays reachable.
///
/// On each axis the offset may not exceed `(viewport - safety_margin) / zoom`,
/// which keeps the diagram's near edge inside the viewport, and may not drop
/// below `zoom - content`, which keeps at least a sliver of its far edge
/// visible. When the two bounds cross, the lower bound wins. The function is
/// idempotent.
pub fn clamp_offset(
    offset: Vec2,
    zoom: f64,
    viewport: Size,
    content: Size,
    safety_margin: f64,
) -> Vec2 {
    let axis = |value: f64, viewport: f64, content: f64| {
        let upper = (viewport - safety_margin) / zoom;
        let lower = -content + zoom;
        value.min(upper).max(lower)
    };
    Vec2::new(
        axis(offset.x, viewport.width, content.width),
        axis(offset.y, viewport.height, content.height),
    )
}

/// Applies one wheel step to `zoom`, keeping the result in `[min_zoom, max_zoom]`.
///
/// Positive `delta_y` (scrolling down) zooms out. Steps grow with the zoom
/// factor once it exceeds `1.0`.
pub fn zoom_step(zoom: f64, delta_y: f64, config: &PanZoomConfig) -> f64 {
    let step = (zoom.max(1.0) / config.max_zoom) * delta_y * WHEEL_DELTA_SCALE * config.zoom_speed;
    (zoom - step).min(config.max_zoom).max(config.min_zoom)
}

/// Owns a [`ViewportState`] and updates it from pointer, wheel, and resize events.
///
/// Every handler returns `true` when the state may have changed and the
/// host should redraw: re-stroke every connector at the new zoom and apply
/// the new transform. Offsets are re-constrained after every pan, zoom, and
/// resize.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Size, Vec2};
/// use understory_view2d::{PanZoomConfig, PointerButtons, ViewportController};
///
/// let mut viewport = ViewportController::new(PanZoomConfig::default()).unwrap();
/// viewport.set_metrics(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
///
/// assert!(viewport.on_pointer_down(PointerButtons::PRIMARY, Point::new(10.0, 10.0)));
/// assert!(viewport.on_pointer_move(Point::new(30.0, 25.0)));
/// assert_eq!(viewport.state().offset, Vec2::new(20.0, 15.0));
/// assert!(viewport.on_pointer_up(PointerButtons::PRIMARY));
/// ```
#[derive(Clone, Debug)]
pub struct ViewportController {
    config: PanZoomConfig,
    state: ViewportState,
    drag: DragState,
    viewport: Size,
    content: Size,
}

impl ViewportController {
    /// Creates an idle controller at zoom `1.0` with no offset.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`; see [`PanZoomConfig::validate`].
    pub fn new(config: PanZoomConfig) -> Result<Self, PanZoomConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ViewportState::default(),
            drag: DragState::Idle,
            viewport: Size::ZERO,
            content: Size::ZERO,
        })
    }

    /// The configuration this controller was created with.
    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// Current zoom and offset.
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Current drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The transform to apply to the diagram's root box.
    pub fn transform(&self) -> Affine {
        self.state.transform()
    }

    /// Records the viewport size and the untransformed diagram size, then re-constrains.
    ///
    /// Returns `true` if the offset moved to fit the new bounds.
    pub fn set_metrics(&mut self, viewport: Size, content: Size) -> bool {
        self.viewport = viewport;
        self.content = content;
        let before = self.state.offset;
        self.constrain();
        self.state.offset != before
    }

    /// Starts a drag when exactly the primary button is held and panning is enabled.
    pub fn on_pointer_down(&mut self, buttons: PointerButtons, position: Point) -> bool {
        if !self.config.panning || buttons != PointerButtons::PRIMARY {
            return false;
        }
        self.drag = DragState::Dragging {
            pointer: position,
            offset: self.state.offset,
        };
        log::trace!("viewport: drag start at {position:?}");
        true
    }

    /// Pans by the pointer's travel since the press, divided by the zoom.
    pub fn on_pointer_move(&mut self, position: Point) -> bool {
        let DragState::Dragging { pointer, offset } = self.drag else {
            return false;
        };
        self.state.offset = offset + (position - pointer) / self.state.zoom;
        self.constrain();
        true
    }

    /// Ends a drag when the primary button is released, wherever the pointer is.
    ///
    /// Ending a drag does not move the view, so no redraw is needed; the
    /// return value only reports whether a drag ended.
    pub fn on_pointer_up(&mut self, released: PointerButtons) -> bool {
        if !released.contains(PointerButtons::PRIMARY) || !self.is_dragging() {
            return false;
        }
        self.drag = DragState::Idle;
        log::trace!("viewport: drag end");
        true
    }

    /// Abandons a drag without moving the view, for example on focus loss.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Zooms by one wheel event.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        self.state.zoom = zoom_step(self.state.zoom, delta_y, &self.config);
        self.constrain();
        log::trace!("viewport: zoom {}", self.state.zoom);
        true
    }

    fn constrain(&mut self) {
        self.state.offset = clamp_offset(
            self.state.offset,
            self.state.zoom,
            self.viewport,
            self.content,
            self.config.safety_margin,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        let mut viewport = ViewportController::new(PanZoomConfig::default()).unwrap();
        viewport.set_metrics(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
        viewport
    }

    #[test]
    fn drag_pans_by_delta_over_zoom() {
        let mut viewport = controller();
        viewport.state.zoom = 2.0;
        assert!(viewport.on_pointer_down(PointerButtons::PRIMARY, Point::new(100.0, 100.0)));
        assert!(viewport.on_pointer_move(Point::new(140.0, 80.0)));
        assert_eq!(viewport.state().offset, Vec2::new(20.0, -10.0));
        // Moves are relative to the press, not the previous move.
        assert!(viewport.on_pointer_move(Point::new(120.0, 100.0)));
        assert_eq!(viewport.state().offset, Vec2::new(10.0, 0.0));
        assert!(viewport.on_pointer_up(PointerButtons::PRIMARY));
        assert_eq!(viewport.drag_state(), DragState::Idle);
        assert!(!viewport.on_pointer_move(Point::new(0.0, 0.0)));
    }

    #[test]
    fn only_lone_primary_starts_a_drag() {
        let mut viewport = controller();
        assert!(!viewport.on_pointer_down(PointerButtons::SECONDARY, Point::ZERO));
        assert!(!viewport.on_pointer_down(
            PointerButtons::PRIMARY | PointerButtons::SECONDARY,
            Point::ZERO
        ));
        assert!(!viewport.is_dragging());

        let mut fixed = ViewportController::new(PanZoomConfig {
            panning: false,
            ..PanZoomConfig::default()
        })
        .unwrap();
        assert!(!fixed.on_pointer_down(PointerButtons::PRIMARY, Point::ZERO));
    }

    #[test]
    fn drag_is_clamped_to_safety_margin() {
        let mut viewport = controller();
        viewport.on_pointer_down(PointerButtons::PRIMARY, Point::ZERO);
        viewport.on_pointer_move(Point::new(5000.0, -5000.0));
        // Upper bound: (800 - 50) / 1; lower bound: -300 + 1.
        assert_eq!(viewport.state().offset, Vec2::new(750.0, -299.0));
    }

    #[test]
    fn wheel_zoom_steps_and_clamps() {
        let mut viewport = controller();
        // 1 - (1 / 3) * 300 / 1000 = 0.9
        viewport.on_wheel(300.0);
        assert!((viewport.state().zoom - 0.9) < 1e-12 && (0.9 - viewport.state().zoom) < 1e-12);
        viewport.on_wheel(1.0e6);
        assert_eq!(viewport.state().zoom, 0.5);
        viewport.on_wheel(-1.0e6);
        assert_eq!(viewport.state().zoom, 3.0);
    }

    #[test]
    fn zoom_reconstrains_offset() {
        let mut viewport = controller();
        viewport.state.offset = Vec2::new(700.0, 0.0);
        viewport.on_wheel(-1.0e6);
        // (800 - 50) / 3
        assert_eq!(viewport.state().offset.x, 250.0);
    }

    #[test]
    fn set_metrics_reports_offset_changes() {
        let mut viewport = controller();
        assert!(!viewport.set_metrics(Size::new(800.0, 600.0), Size::new(400.0, 300.0)));
        viewport.state.offset = Vec2::new(700.0, 0.0);
        // Upper bound drops to (400 - 50) / 1.
        assert!(viewport.set_metrics(Size::new(400.0, 600.0), Size::new(400.0, 300.0)));
        assert_eq!(viewport.state().offset, Vec2::new(350.0, 0.0));
    }

    #[test]
    fn transform_scales_then_translates() {
        let state = ViewportState {
            zoom: 2.0,
            offset: Vec2::new(10.0, 5.0),
        };
        assert_eq!(state.transform() * Point::ZERO, Point::new(20.0, 10.0));
    }
}
