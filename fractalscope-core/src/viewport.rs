//! Animated virtual camera over the complex plane.
//!
//! The viewport holds two copies of the camera state: the live values a frame
//! is rendered with, and the target values user input mutates. A per-frame
//! [`update`](Viewport::update) tick moves live toward target with first-order
//! exponential smoothing and snaps exactly onto the target once every delta is
//! below the settle epsilon. Live fields are written by `update` alone; every
//! external mutation goes through the target.

use crate::quality::MIN_ZOOM;
use crate::transforms::{screen_to_complex_rotated, RenderParams};
use crate::Complex;
use serde::{Deserialize, Serialize};

/// Fraction of the remaining distance covered per animation tick.
pub const DAMPING: f64 = 0.15;

/// Once all four deltas (center re/im, zoom, rotation) are below this, live
/// state snaps exactly onto the target.
pub const SETTLE_EPSILON: f64 = 1e-8;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Viewport {
    center: Complex,
    zoom: f64,
    rotation: f64,
    target_center: Complex,
    target_zoom: f64,
    target_rotation: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Complex::ZERO, 1.0, 0.0)
    }
}

impl Viewport {
    /// Create a settled viewport (live == target).
    pub fn new(center: Complex, zoom: f64, rotation: f64) -> Self {
        let zoom = sanitize_zoom(zoom);
        Self {
            center,
            zoom,
            rotation,
            target_center: center,
            target_zoom: zoom,
            target_rotation: rotation,
        }
    }

    pub fn center(&self) -> Complex {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn target_center(&self) -> Complex {
        self.target_center
    }

    pub fn target_zoom(&self) -> f64 {
        self.target_zoom
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    pub fn is_settled(&self) -> bool {
        (self.target_center.re - self.center.re).abs() < SETTLE_EPSILON
            && (self.target_center.im - self.center.im).abs() < SETTLE_EPSILON
            && (self.target_zoom - self.zoom).abs() < SETTLE_EPSILON
            && (self.target_rotation - self.rotation).abs() < SETTLE_EPSILON
    }

    /// The sole external mutation entry point. Non-finite components are
    /// dropped (the previous target survives); zoom is clamped to
    /// [`MIN_ZOOM`].
    pub fn set_target(&mut self, cx: f64, cy: f64, zoom: f64, rotation: f64) {
        if !cx.is_finite() || !cy.is_finite() || !zoom.is_finite() || !rotation.is_finite() {
            log::warn!(
                "ignoring non-finite viewport target ({}, {}, zoom {}, rot {})",
                cx,
                cy,
                zoom,
                rotation
            );
            return;
        }
        self.target_center = Complex::new(cx, cy);
        self.target_zoom = sanitize_zoom(zoom);
        self.target_rotation = rotation;
    }

    /// Advance live state one tick toward the target. Returns true once
    /// settled (and snaps live exactly onto the target at that point).
    pub fn update(&mut self) -> bool {
        if self.is_settled() {
            self.center = self.target_center;
            self.zoom = self.target_zoom;
            self.rotation = self.target_rotation;
            return true;
        }
        self.center.re += DAMPING * (self.target_center.re - self.center.re);
        self.center.im += DAMPING * (self.target_center.im - self.center.im);
        self.zoom += DAMPING * (self.target_zoom - self.zoom);
        self.rotation += DAMPING * (self.target_rotation - self.rotation);
        false
    }

    /// Convert a screen-space drag delta into a plane-space move of the
    /// target center. Dragging right moves the visible content right, so the
    /// center moves left; the delta is counter-rotated so a drag follows the
    /// screen axes even in a rotated view.
    pub fn pan(&mut self, dx: f64, dy: f64, width: f64, height: f64) {
        let range = 4.0 / self.target_zoom;
        let aspect = width / height;
        let mut delta = Complex::new(-(dx / width) * range * aspect, (dy / height) * range);
        if self.target_rotation != 0.0 {
            delta = delta.rotate(-self.target_rotation);
        }
        self.set_target(
            self.target_center.re + delta.re,
            self.target_center.im + delta.im,
            self.target_zoom,
            self.target_rotation,
        );
    }

    /// Move the target center by a plane-space delta (keyboard pan). The
    /// delta is counter-rotated like a drag so held arrows track the screen
    /// axes.
    pub fn pan_plane(&mut self, d_re: f64, d_im: f64) {
        let mut delta = Complex::new(d_re, d_im);
        if self.target_rotation != 0.0 {
            delta = delta.rotate(-self.target_rotation);
        }
        self.set_target(
            self.target_center.re + delta.re,
            self.target_center.im + delta.im,
            self.target_zoom,
            self.target_rotation,
        );
    }

    /// Scale the target zoom by `factor`, keeping the complex point under
    /// the given screen position fixed: `new_center = p − (p − old) / f`.
    /// If the zoom clamp bites, the effective factor is used so the
    /// invariant still holds.
    pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64, width: f64, height: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring non-positive zoom factor {}", factor);
            return;
        }
        let params = RenderParams::new(
            self.target_center,
            self.target_zoom,
            self.target_rotation,
            width,
            height,
        );
        let point = screen_to_complex_rotated(sx, sy, width, height, &params);
        let new_zoom = sanitize_zoom(self.target_zoom * factor);
        let effective = new_zoom / self.target_zoom;
        let new_center = point - (point - self.target_center) * (1.0 / effective);
        self.set_target(
            new_center.re,
            new_center.im,
            new_zoom,
            self.target_rotation,
        );
    }

    /// Add to the target rotation. No recentering.
    pub fn rotate(&mut self, delta_angle: f64) {
        self.set_target(
            self.target_center.re,
            self.target_center.im,
            self.target_zoom,
            self.target_rotation + delta_angle,
        );
    }

    /// Animate back to the neutral default. Callers override the center per
    /// fractal type afterwards where needed (e.g. Mandelbrot at (−0.5, 0)).
    pub fn reset(&mut self) {
        self.set_target(0.0, 0.0, 1.0, 0.0);
    }

    /// Render-time parameter bundle derived from live state. Read-only.
    pub fn render_params(&self, width: f64, height: f64) -> RenderParams {
        RenderParams::new(self.center, self.zoom, self.rotation, width, height)
    }
}

fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.max(MIN_ZOOM)
    } else {
        MIN_ZOOM
    }
}
