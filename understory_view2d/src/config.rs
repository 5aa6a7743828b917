// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom configuration.

use core::fmt;

/// Wheel deltas arrive in pixels; this maps one pixel to a zoom step at speed `1.0`.
pub const WHEEL_DELTA_SCALE: f64 = 1.0 / 1000.0;

/// Limits and speeds for a [`ViewportController`](crate::ViewportController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomConfig {
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor. Also damps wheel steps: larger values zoom slower.
    pub max_zoom: f64,
    /// Whether dragging with the primary button pans the view.
    pub panning: bool,
    /// Pixels of the viewport that always stay clear on the positive side.
    pub safety_margin: f64,
    /// Multiplier applied to wheel zoom steps.
    pub zoom_speed: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            panning: true,
            safety_margin: 50.0,
            zoom_speed: 1.0,
        }
    }
}

impl PanZoomConfig {
    /// Checks that the limits describe a usable zoom range.
    ///
    /// # Errors
    ///
    /// Returns [`PanZoomConfigError`] when any value is not finite, when
    /// `min_zoom` is not positive, or when `min_zoom > max_zoom`.
    pub fn validate(&self) -> Result<(), PanZoomConfigError> {
        let finite = self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.safety_margin.is_finite()
            && self.zoom_speed.is_finite();
        if !finite {
            return Err(PanZoomConfigError::NotFinite);
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(PanZoomConfigError::InvalidZoomRange {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        Ok(())
    }
}

/// A [`PanZoomConfig`] failed validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanZoomConfigError {
    /// A limit or speed is NaN or infinite.
    NotFinite,
    /// The zoom range is empty or includes zero.
    InvalidZoomRange {
        /// Configured minimum.
        min_zoom: f64,
        /// Configured maximum.
        max_zoom: f64,
    },
}

impl fmt::Display for PanZoomConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => f.write_str("pan/zoom limits must be finite"),
            Self::InvalidZoomRange { min_zoom, max_zoom } => write!(
                f,
                "invalid zoom range [{min_zoom}, {max_zoom}]: need 0 < min_zoom <= max_zoom"
            ),
        }
    }
}

impl core::error::Error for PanZoomConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PanZoomConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_zoom, 0.5);
        assert_eq!(config.max_zoom, 3.0);
        assert!(config.panning);
        assert_eq!(config.safety_margin, 50.0);
        assert_eq!(config.zoom_speed, 1.0);
    }

    #[test]
    fn rejects_bad_ranges() {
        let inverted = PanZoomConfig {
            min_zoom: 2.0,
            max_zoom: 1.0,
            ..PanZoomConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(PanZoomConfigError::InvalidZoomRange { .. })
        ));

        let zero = PanZoomConfig {
            min_zoom: 0.0,
            ..PanZoomConfig::default()
        };
        assert!(zero.validate().is_err());

        let nan = PanZoomConfig {
            zoom_speed: f64::NAN,
            ..PanZoomConfig::default()
        };
        assert_eq!(nan.validate(), Err(PanZoomConfigError::NotFinite));
    }
}
