//! Deep-zoom precision behavior of the double-double types.
//!
//! At zoom 10^15 a pixel spans ~4e-18 plane units: far below the ulp of any
//! center coordinate near magnitude 1. These tests pin down that the
//! compensated representation keeps adjacent pixels distinct where plain f64
//! collapses them.

use fractalscope_core::{Complex, DdComplex, DdFloat};

/// Pixel pitch at zoom 1e15 on a 1000-pixel-wide canvas.
const DEEP_PIXEL: f64 = 4.0e-18;

#[test]
fn f64_collapses_adjacent_deep_pixels() {
    // Sanity baseline: in plain f64 the two pixel coordinates are the same
    // number, which is exactly the artifact the dd path exists to fix.
    let center = -0.74364388703715;
    let a = center + DEEP_PIXEL;
    let b = center + 2.0 * DEEP_PIXEL;
    assert_eq!(a, b);
}

#[test]
fn dd_keeps_adjacent_deep_pixels_distinct() {
    let center = Complex::new(-0.74364388703715, 0.13182590420533);
    let a = DdComplex::from_center_offset(center, Complex::new(DEEP_PIXEL, 0.0));
    let b = DdComplex::from_center_offset(center, Complex::new(2.0 * DEEP_PIXEL, 0.0));
    let diff = b.re.sub(a.re);
    assert!(
        (diff.to_f64() - DEEP_PIXEL).abs() < DEEP_PIXEL * 1e-10,
        "expected pixel pitch {}, got {}",
        DEEP_PIXEL,
        diff.to_f64()
    );
}

#[test]
fn dd_square_preserves_offset_information() {
    // (c + δ)² − c² = 2cδ + δ²; the 2cδ term is ~1e-17, invisible next to
    // c² in f64 but recoverable in dd.
    let c = DdFloat::from_f64(-0.75);
    let delta = DdFloat::from_f64(DEEP_PIXEL);
    let shifted = c.add(delta);
    let diff = shifted.mul(shifted).sub(c.mul(c));
    let expected = 2.0 * -0.75 * DEEP_PIXEL;
    assert!(
        (diff.to_f64() - expected).abs() < expected.abs() * 1e-9,
        "expected {}, got {}",
        expected,
        diff.to_f64()
    );
}

#[test]
fn repeated_dd_iteration_is_deterministic() {
    let c = DdComplex::from_center_offset(
        Complex::new(-0.1011, 0.9563),
        Complex::new(DEEP_PIXEL, -DEEP_PIXEL),
    );
    let run = |_: ()| {
        let mut z = DdComplex::ZERO;
        for _ in 0..64 {
            z = z.sqr().add(c);
        }
        (z.re.hi, z.re.lo, z.im.hi, z.im.lo)
    };
    assert_eq!(run(()), run(()));
}

#[test]
fn dd_orbit_tracks_f64_orbit_in_shallow_range() {
    // Where f64 is adequate the two paths must agree; the dd mode may switch
    // on early (safety margin) without changing what is rendered.
    let c = Complex::new(0.28, 0.008);
    let mut z = Complex::ZERO;
    let mut zdd = DdComplex::ZERO;
    let cdd = DdComplex::from_complex(c);
    for _ in 0..50 {
        z = z * z + c;
        zdd = zdd.sqr().add(cdd);
    }
    let w = zdd.to_complex();
    assert!((z.re - w.re).abs() < 1e-9, "{} vs {}", z.re, w.re);
    assert!((z.im - w.im).abs() < 1e-9, "{} vs {}", z.im, w.im);
}
