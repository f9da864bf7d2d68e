use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::complex::Complex;
use crate::error::CoreError;

/// Wheel units per detent, as reported by most platforms.
pub const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;
/// Zoom multiplier applied per wheel notch.
pub const ZOOM_PER_NOTCH: f64 = 1.1;

/// Zoom factor for a raw wheel delta: `1.1^(delta / 120)`.
#[inline]
pub fn wheel_zoom_factor(delta: f64) -> f64 {
    ZOOM_PER_NOTCH.powf(delta / WHEEL_DELTA_PER_NOTCH)
}

/// The mapping parameters placing the complex plane onto the frame.
///
/// A `View` is `Copy`; the renderer takes one snapshot per frame so every
/// worker band sees the same center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub center: Complex,
    /// Magnification. At `1.0` the frame spans `[-1, 1]` around the center
    /// on both axes. Always `> 0`.
    pub zoom: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            center: Complex::ZERO,
            zoom: 1.0,
        }
    }
}

impl View {
    /// Create a view, rejecting non-finite centers and non-positive zoom.
    pub fn new(center: Complex, zoom: f64) -> crate::Result<Self> {
        let view = Self { center, zoom };
        view.validate()?;
        Ok(view)
    }

    fn validate(&self) -> crate::Result<()> {
        if !self.center.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("center must be finite, got {}", self.center),
            });
        }
        if self.zoom <= 0.0 || !self.zoom.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("zoom must be positive and finite, got {}", self.zoom),
            });
        }
        Ok(())
    }

    /// Precompute the pixel → plane transform for a `width × height` frame.
    pub fn mapping(&self, width: u32, height: u32) -> PixelMapping {
        PixelMapping {
            center: self.center,
            half_w: width as f64 / 2.0,
            half_h: height as f64 / 2.0,
            span_x: 0.5 * self.zoom * width as f64,
            span_y: 0.5 * self.zoom * height as f64,
        }
    }

    /// Plane distance covered by one pixel on each axis.
    pub fn units_per_pixel(&self, width: u32, height: u32) -> (f64, f64) {
        (
            2.0 / (self.zoom * width as f64),
            2.0 / (self.zoom * height as f64),
        )
    }
}

/// Pixel-to-plane transform for one frame size and one view.
///
/// Each axis is scaled by `zoom` against its own extent, so the frame center
/// always lands on the view center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    center: Complex,
    half_w: f64,
    half_h: f64,
    span_x: f64,
    span_y: f64,
}

impl PixelMapping {
    /// `(0, 0)` is the first pixel of the buffer; y grows with the row index.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> Complex {
        Complex::new(
            (px as f64 - self.half_w) / self.span_x + self.center.re,
            (py as f64 - self.half_h) / self.span_y + self.center.im,
        )
    }
}

/// Interactive viewport state: the current view plus when it last moved.
///
/// Only the input side mutates it (pan, zoom, reset). Every mutation stamps
/// `last_interaction`, which drives the level-of-detail scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    view: View,
    last_interaction: Instant,
}

impl Viewport {
    /// Viewport at the origin with zoom 1, considered touched at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            view: View::default(),
            last_interaction: now,
        }
    }

    pub fn with_view(view: View, now: Instant) -> crate::Result<Self> {
        view.validate()?;
        Ok(Self {
            view,
            last_interaction: now,
        })
    }

    /// Snapshot of center and zoom for one render pass.
    #[inline]
    pub fn view(&self) -> View {
        self.view
    }

    pub fn center(&self) -> Complex {
        self.view.center
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom
    }

    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    /// Shift the center by a plane-space delta.
    ///
    /// A result that would leave the center non-finite is rejected and the
    /// viewport is left untouched.
    pub fn pan(&mut self, dx: f64, dy: f64, now: Instant) -> crate::Result<()> {
        let candidate = View {
            center: self.view.center + Complex::new(dx, dy),
            ..self.view
        };
        self.apply(candidate, now)
    }

    /// Multiply the zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f64, now: Instant) -> crate::Result<()> {
        let candidate = View {
            zoom: self.view.zoom * factor,
            ..self.view
        };
        self.apply(candidate, now)
    }

    /// Zoom from a raw wheel delta (positive zooms in).
    pub fn zoom_by_wheel(&mut self, delta: f64, now: Instant) -> crate::Result<()> {
        self.zoom_by(wheel_zoom_factor(delta), now)
    }

    /// Jump to an explicit view.
    pub fn set_view(&mut self, view: View, now: Instant) -> crate::Result<()> {
        self.apply(view, now)
    }

    /// Back to the origin at zoom 1.
    pub fn reset(&mut self, now: Instant) {
        self.view = View::default();
        self.last_interaction = now;
    }

    fn apply(&mut self, candidate: View, now: Instant) -> crate::Result<()> {
        if let Err(e) = candidate.validate() {
            warn!("Rejected viewport change: {e}");
            return Err(e);
        }
        self.view = candidate;
        self.last_interaction = now;
        Ok(())
    }
}
