use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Immutable complex number over f64.
///
/// All operations return new values; nothing here mutates in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// |z|² — the escape test compares against this to avoid a square root
    /// on the hot path.
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Rotate around the origin by `angle` radians (counter-clockwise).
    #[inline]
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.re * cos - self.im * sin,
            self.re * sin + self.im * cos,
        )
    }

    /// Complex division. When |b|² = 0 this follows IEEE-754 componentwise:
    /// the result carries infinities or NaN rather than panicking. Callers on
    /// the render path validate inputs before any division reaches the color
    /// pipeline.
    #[inline]
    pub fn div(&self, b: Self) -> Self {
        let denom = b.norm_sq();
        Self::new(
            (self.re * b.re + self.im * b.im) / denom,
            (self.im * b.re - self.re * b.im) / denom,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}
