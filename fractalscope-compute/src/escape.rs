//! Escape-time kernels for the z → z² + c family.
//!
//! Mandelbrot seeds z₀ = 0 with c = pixel; Julia seeds z₀ = pixel with a
//! stored constant. The escape test is strict (`|z|² > r²`) and runs at the
//! top of the loop, so a Julia seed already outside the radius escapes at
//! iteration 0. No cross-pixel or cross-frame state exists here.

use fractalscope_core::{Complex, DdComplex};
use serde::{Deserialize, Serialize};

/// Per-frame iteration parameters shared by every pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EscapeParams {
    pub max_iterations: u32,
    pub escape_radius: f64,
}

impl EscapeParams {
    pub fn new(max_iterations: u32, escape_radius: f64) -> Self {
        Self {
            max_iterations,
            escape_radius,
        }
    }

    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.escape_radius * self.escape_radius
    }
}

/// Outcome of iterating a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointResult {
    /// Iterations completed before escape, or `max_iterations` for interior
    /// points.
    pub iterations: u32,
    pub escaped: bool,
    /// |z|² at the escape check (0.0 for interior points); feeds the smooth
    /// coloring formula.
    pub final_norm_sq: f64,
}

impl PointResult {
    fn interior(max_iterations: u32) -> Self {
        Self {
            iterations: max_iterations,
            escaped: false,
            final_norm_sq: 0.0,
        }
    }

    fn escaped(iterations: u32, norm_sq: f64) -> Self {
        Self {
            iterations,
            escaped: true,
            final_norm_sq: norm_sq,
        }
    }
}

/// Main-cardioid membership in f64 — a rough filter, false negatives are
/// fine.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Period-2 bulb membership in f64 (rough filter).
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

/// Mandelbrot iteration in native f64.
pub fn mandelbrot_f64(c: Complex, params: &EscapeParams) -> PointResult {
    if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
        return PointResult::interior(params.max_iterations);
    }
    iterate_f64(Complex::ZERO, c, params)
}

/// Julia iteration in native f64.
pub fn julia_f64(seed: Complex, c: Complex, params: &EscapeParams) -> PointResult {
    iterate_f64(seed, c, params)
}

fn iterate_f64(mut z: Complex, c: Complex, params: &EscapeParams) -> PointResult {
    let r2 = params.escape_radius_sq();
    for i in 0..params.max_iterations {
        let zx_sq = z.re * z.re;
        let zy_sq = z.im * z.im;
        let norm_sq = zx_sq + zy_sq;
        if norm_sq > r2 {
            return PointResult::escaped(i, norm_sq);
        }
        z = Complex::new(zx_sq - zy_sq + c.re, 2.0 * z.re * z.im + c.im);
    }
    PointResult::interior(params.max_iterations)
}

/// Mandelbrot iteration in compensated double-double arithmetic.
///
/// The pixel arrives as a center plus a small offset; reconstructing
/// `c = center + offset` in double-double keeps sub-ulp pixel detail alive
/// through the whole orbit.
pub fn mandelbrot_dd(center: Complex, offset: Complex, params: &EscapeParams) -> PointResult {
    let c = DdComplex::from_center_offset(center, offset);
    let c_f64 = c.to_complex();
    if in_cardioid(c_f64.re, c_f64.im) || in_period2_bulb(c_f64.re, c_f64.im) {
        return PointResult::interior(params.max_iterations);
    }
    iterate_dd(DdComplex::ZERO, c, params)
}

/// Julia iteration in compensated double-double arithmetic.
pub fn julia_dd(
    center: Complex,
    offset: Complex,
    c: Complex,
    params: &EscapeParams,
) -> PointResult {
    let seed = DdComplex::from_center_offset(center, offset);
    iterate_dd(seed, DdComplex::from_complex(c), params)
}

fn iterate_dd(mut z: DdComplex, c: DdComplex, params: &EscapeParams) -> PointResult {
    let r2 = params.escape_radius_sq();
    for i in 0..params.max_iterations {
        let norm_sq = z.norm_sq();
        if norm_sq.gt_f64(r2) {
            return PointResult::escaped(i, norm_sq.to_f64());
        }
        z = z.sqr().add(c);
    }
    PointResult::interior(params.max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_iterations: u32) -> EscapeParams {
        EscapeParams::new(max_iterations, 2.0)
    }

    #[test]
    fn origin_is_in_set_for_any_cap() {
        for cap in [1, 2, 100, 5000] {
            let r = mandelbrot_f64(Complex::ZERO, &params(cap));
            assert!(!r.escaped, "origin must stay interior at cap {}", cap);
            assert_eq!(r.iterations, cap);
        }
    }

    #[test]
    fn minus_one_is_in_set() {
        // Period-2 orbit {0, -1}
        let r = mandelbrot_f64(Complex::new(-1.0, 0.0), &params(2000));
        assert!(!r.escaped);
    }

    #[test]
    fn two_does_not_escape_on_the_boundary_iteration() {
        // z₁ = 2 gives |z|² = 4, which is NOT strictly greater than r² = 4;
        // the strict test defers escape to the next check.
        let r = mandelbrot_f64(Complex::new(2.0, 0.0), &params(100));
        assert!(r.escaped);
        assert_eq!(r.iterations, 2);
        assert!(r.final_norm_sq > 4.0);
    }

    #[test]
    fn far_point_escapes_immediately_after_first_step() {
        // z₁ = 10, |z₁|² = 100 > 4
        let r = mandelbrot_f64(Complex::new(10.0, 0.0), &params(100));
        assert!(r.escaped);
        assert_eq!(r.iterations, 1);
    }

    #[test]
    fn escape_iteration_is_independent_of_cap() {
        // Monotonicity: raising the cap never changes when a point escapes
        let c = Complex::new(0.4, 0.3);
        let low = mandelbrot_f64(c, &params(50));
        let high = mandelbrot_f64(c, &params(5000));
        assert!(low.escaped && high.escaped);
        assert_eq!(low.iterations, high.iterations);
        assert_eq!(low.final_norm_sq, high.final_norm_sq);
    }

    #[test]
    fn interior_at_cap_stays_interior_at_higher_cap() {
        let c = Complex::new(-0.5, 0.0);
        assert!(!mandelbrot_f64(c, &params(100)).escaped);
        assert!(!mandelbrot_f64(c, &params(4000)).escaped);
    }

    #[test]
    fn cardioid_shortcut_agrees_with_iteration() {
        // Points inside the cardioid must classify interior with or without
        // the filter
        let c = Complex::new(-0.1, 0.1);
        assert!(in_cardioid(c.re, c.im));
        let direct = iterate_f64(Complex::ZERO, c, &params(2000));
        assert!(!direct.escaped);
    }

    #[test]
    fn julia_seed_outside_radius_escapes_at_zero() {
        let r = julia_f64(
            Complex::new(3.0, 0.0),
            Complex::new(-0.8, 0.156),
            &params(100),
        );
        assert!(r.escaped);
        assert_eq!(r.iterations, 0);
        assert_eq!(r.final_norm_sq, 9.0);
    }

    #[test]
    fn julia_origin_with_zero_constant_is_interior() {
        let r = julia_f64(Complex::ZERO, Complex::ZERO, &params(500));
        assert!(!r.escaped);
    }

    #[test]
    fn dd_agrees_with_f64_in_shallow_range() {
        // Interior shortcuts and decisive escapes: classification cannot
        // hinge on the last bits of either arithmetic.
        let centers = [
            Complex::new(-0.5, 0.0),
            Complex::new(2.0, 0.0),
            Complex::new(0.4, 0.3),
        ];
        for c in centers {
            let plain = mandelbrot_f64(c, &params(1000));
            let dd = mandelbrot_dd(c, Complex::ZERO, &params(1000));
            assert_eq!(plain.escaped, dd.escaped, "escape mismatch at {:?}", c);
            assert_eq!(
                plain.iterations, dd.iterations,
                "iteration mismatch at {:?}",
                c
            );
        }
    }

    #[test]
    fn dd_julia_agrees_with_f64_in_shallow_range() {
        let c = Complex::new(0.285, 0.01);
        let seed = Complex::new(1.9, 0.0);
        let plain = julia_f64(seed, c, &params(800));
        let dd = julia_dd(seed, Complex::ZERO, c, &params(800));
        assert_eq!(plain.escaped, dd.escaped);
        assert_eq!(plain.iterations, dd.iterations);
        assert!(plain.escaped && plain.iterations <= 2);
    }

    #[test]
    fn dd_distinguishes_pixels_f64_cannot() {
        // Two offsets below the center's ulp: identical points in f64,
        // distinct orbits in dd. Near the neck at -0.75 the orbit escapes
        // after enough iterations to amplify the 4e-17 separation well above
        // f64 noise.
        let center = Complex::new(-0.75, 0.05);
        let p = EscapeParams::new(3000, 2.0);
        let a = mandelbrot_dd(center, Complex::new(1e-17, 0.0), &p);
        let b = mandelbrot_dd(center, Complex::new(5e-17, 0.0), &p);
        assert!(a.escaped && b.escaped);
        assert!(
            a.iterations != b.iterations || a.final_norm_sq != b.final_norm_sq,
            "dd kernel collapsed distinct deep-zoom pixels"
        );
    }
}
