//! Screen-space ↔ complex-plane mapping.
//!
//! The convention throughout: zoom 1 shows a plane range of width 4 at
//! aspect-corrected height, screen Y grows downward while plane Y grows
//! upward, and rotation is applied by the caller — the `_rotated` variants
//! rotate the center-relative offset, the plain variants do not.

use crate::Complex;

/// Render-time camera bundle derived from live viewport state.
///
/// A pure function of (center, zoom, rotation, canvas size); recomputed every
/// frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub center: Complex,
    pub zoom: f64,
    pub rotation: f64,
    pub aspect: f64,
    /// Visible plane-space height: `4.0 / zoom`.
    pub range: f64,
}

impl RenderParams {
    pub fn new(center: Complex, zoom: f64, rotation: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            rotation,
            aspect: aspect_ratio(width, height),
            range: 4.0 / zoom,
        }
    }
}

pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    width / height
}

/// Map a pixel coordinate to a complex-plane point, ignoring rotation.
///
/// `real = (x/w − 0.5) · range · aspect + center.re`
/// `imag = (0.5 − y/h) · range + center.im` (vertical flip).
#[inline]
pub fn screen_to_complex(x: f64, y: f64, width: f64, height: f64, params: &RenderParams) -> Complex {
    Complex::new(
        (x / width - 0.5) * params.range * params.aspect + params.center.re,
        (0.5 - y / height) * params.range + params.center.im,
    )
}

/// Exact inverse of [`screen_to_complex`].
#[inline]
pub fn complex_to_screen(p: Complex, width: f64, height: f64, params: &RenderParams) -> (f64, f64) {
    (
        ((p.re - params.center.re) / (params.range * params.aspect) + 0.5) * width,
        (0.5 - (p.im - params.center.im) / params.range) * height,
    )
}

/// Rotation-aware mapping: the unrotated center-relative offset is rotated by
/// `params.rotation` before being anchored at the center.
#[inline]
pub fn screen_to_complex_rotated(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    params: &RenderParams,
) -> Complex {
    let flat = screen_to_complex(x, y, width, height, params);
    if params.rotation == 0.0 {
        return flat;
    }
    (flat - params.center).rotate(params.rotation) + params.center
}

/// Exact inverse of [`screen_to_complex_rotated`].
#[inline]
pub fn complex_to_screen_rotated(
    p: Complex,
    width: f64,
    height: f64,
    params: &RenderParams,
) -> (f64, f64) {
    let unrotated = if params.rotation == 0.0 {
        p
    } else {
        (p - params.center).rotate(-params.rotation) + params.center
    };
    complex_to_screen(unrotated, width, height, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(center: Complex, zoom: f64, rotation: f64) -> RenderParams {
        RenderParams::new(center, zoom, rotation, 800.0, 600.0)
    }

    #[test]
    fn screen_center_maps_to_viewport_center() {
        let p = params(Complex::new(-0.5, 0.25), 3.0, 0.0);
        let c = screen_to_complex(400.0, 300.0, 800.0, 600.0, &p);
        assert!((c.re - -0.5).abs() < 1e-15);
        assert!((c.im - 0.25).abs() < 1e-15);
    }

    #[test]
    fn vertical_axis_is_flipped() {
        // Screen y = 0 (top) must map above the center in plane space
        let p = params(Complex::ZERO, 1.0, 0.0);
        let top = screen_to_complex(400.0, 0.0, 800.0, 600.0, &p);
        let bottom = screen_to_complex(400.0, 600.0, 800.0, 600.0, &p);
        assert!(top.im > 0.0);
        assert!(bottom.im < 0.0);
        assert!((top.im - 2.0).abs() < 1e-15);
    }

    #[test]
    fn zoom_one_spans_range_four() {
        let p = params(Complex::ZERO, 1.0, 0.0);
        let left = screen_to_complex(0.0, 300.0, 800.0, 600.0, &p);
        let right = screen_to_complex(800.0, 300.0, 800.0, 600.0, &p);
        // Width is aspect-corrected: 4 * (800/600)
        assert!((right.re - left.re - 4.0 * (800.0 / 600.0)).abs() < 1e-12);
    }

    #[test]
    fn round_trip_screen_complex_screen() {
        let p = params(Complex::new(0.3, -0.8), 250.0, 0.0);
        for &(x, y) in &[(0.0, 0.0), (123.0, 456.0), (800.0, 600.0), (401.5, 299.5)] {
            let c = screen_to_complex(x, y, 800.0, 600.0, &p);
            let (bx, by) = complex_to_screen(c, 800.0, 600.0, &p);
            assert!((bx - x).abs() < 1e-9, "x: {} -> {}", x, bx);
            assert!((by - y).abs() < 1e-9, "y: {} -> {}", y, by);
        }
    }

    #[test]
    fn round_trip_with_rotation() {
        let p = params(Complex::new(-1.25, 0.02), 40.0, 0.9);
        for &(x, y) in &[(10.0, 20.0), (790.0, 580.0), (400.0, 300.0)] {
            let c = screen_to_complex_rotated(x, y, 800.0, 600.0, &p);
            let (bx, by) = complex_to_screen_rotated(c, 800.0, 600.0, &p);
            assert!((bx - x).abs() < 1e-9);
            assert!((by - y).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_fixes_the_center() {
        let p0 = params(Complex::new(0.5, 0.5), 10.0, 0.0);
        let p1 = params(Complex::new(0.5, 0.5), 10.0, 2.1);
        let c0 = screen_to_complex_rotated(400.0, 300.0, 800.0, 600.0, &p0);
        let c1 = screen_to_complex_rotated(400.0, 300.0, 800.0, 600.0, &p1);
        assert!((c0.re - c1.re).abs() < 1e-15);
        assert!((c0.im - c1.im).abs() < 1e-15);
    }

    #[test]
    fn render_params_derive_range_and_aspect() {
        let p = RenderParams::new(Complex::ZERO, 8.0, 0.0, 1920.0, 1080.0);
        assert_eq!(p.range, 0.5);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-12);
    }
}
