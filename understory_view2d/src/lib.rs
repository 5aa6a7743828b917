// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View2D: pan and zoom for a 2D diagram inside a fixed viewport.
//!
//! [`ViewportController`] is a two-state machine (idle, dragging) over a
//! [`ViewportState`] of zoom factor and offset:
//!
//! - A press with only the primary button held starts a drag and anchors the
//!   pointer position and current offset.
//! - Each move while dragging sets the offset to the anchor offset plus the
//!   pointer travel divided by the zoom.
//! - Releasing the primary button ends the drag.
//! - A wheel event scales the zoom by a step proportional to the wheel delta
//!   and clamps it to `[min_zoom, max_zoom]`.
//!
//! After every change the offset is re-constrained by [`clamp_offset`], so the
//! diagram can neither leave the viewport past its safety margin nor be
//! dragged away until nothing of it remains visible.
//!
//! The controller knows nothing about what is drawn. Handlers return `true`
//! when the host should redraw, and the host reads [`ViewportState::zoom`]
//! to re-rasterize at the new scale.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod viewport;

pub use config::{PanZoomConfig, PanZoomConfigError, WHEEL_DELTA_SCALE};
pub use viewport::{
    DragState, PointerButtons, ViewportController, ViewportState, clamp_offset, zoom_step,
};
