// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for offset and zoom constraints.

use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use understory_view2d::{
    PanZoomConfig, PointerButtons, ViewportController, clamp_offset, zoom_step,
};

fn size() -> impl Strategy<Value = Size> {
    (0.0_f64..4000.0, 0.0_f64..4000.0).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn clamp_is_idempotent(
        x in -1.0e5_f64..1.0e5,
        y in -1.0e5_f64..1.0e5,
        zoom in 0.05_f64..10.0,
        viewport in size(),
        content in size(),
        margin in 0.0_f64..200.0,
    ) {
        let once = clamp_offset(Vec2::new(x, y), zoom, viewport, content, margin);
        let twice = clamp_offset(once, zoom, viewport, content, margin);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn zoom_stays_in_range(deltas in prop::collection::vec(-5000.0_f64..5000.0, 0..64)) {
        let config = PanZoomConfig::default();
        let mut zoom = 1.0;
        for delta in deltas {
            zoom = zoom_step(zoom, delta, &config);
            prop_assert!(zoom >= config.min_zoom && zoom <= config.max_zoom);
        }
    }

    #[test]
    fn controller_offset_is_always_constrained(
        events in prop::collection::vec(
            (any::<bool>(), -3000.0_f64..3000.0, -3000.0_f64..3000.0),
            1..40,
        ),
    ) {
        let config = PanZoomConfig::default();
        let viewport = Size::new(640.0, 480.0);
        let content = Size::new(1200.0, 900.0);
        let mut controller = ViewportController::new(config).unwrap();
        controller.set_metrics(viewport, content);
        controller.on_pointer_down(PointerButtons::PRIMARY, Point::ZERO);
        for (wheel, a, b) in events {
            if wheel {
                controller.on_wheel(a);
            } else {
                controller.on_pointer_move(Point::new(a, b));
            }
            let state = controller.state();
            prop_assert!(state.zoom >= config.min_zoom && state.zoom <= config.max_zoom);
            let expected =
                clamp_offset(state.offset, state.zoom, viewport, content, config.safety_margin);
            prop_assert_eq!(state.offset, expected);
        }
    }
}
