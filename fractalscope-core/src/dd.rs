//! Double-double arithmetic: ~106-bit mantissa precision from paired f64s.
//!
//! Each value is an unevaluated sum `hi + lo` with |lo| ≤ ½ ulp(hi),
//! maintained through Dekker/Knuth error-free transforms. This is the same
//! head/tail compensation scheme as a double-single float, one precision tier
//! up, and it is what keeps `z² + c` stable at deep zoom where plain f64
//! rounding shows up as pixelation.

use crate::Complex;

/// Error-free sum: returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e`
/// exactly (Knuth two-sum, no ordering requirement on the inputs).
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let v = s - a;
    let e = (a - (s - v)) + (b - v);
    (s, e)
}

/// Error-free sum requiring |a| ≥ |b| (Dekker quick-two-sum).
#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let e = b - (s - a);
    (s, e)
}

/// Error-free product via fused multiply-add: `a * b = p + e` exactly.
#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let e = libm::fma(a, b, -p);
    (p, e)
}

/// Compensated double-double scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DdFloat {
    pub hi: f64,
    pub lo: f64,
}

impl DdFloat {
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };

    #[inline]
    pub const fn from_f64(v: f64) -> Self {
        Self { hi: v, lo: 0.0 }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    #[inline]
    pub fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let (s1, s2) = quick_two_sum(s1, s2 + t1);
        let (hi, lo) = quick_two_sum(s1, s2 + t2);
        Self { hi, lo }
    }

    #[inline]
    pub fn sub(self, rhs: Self) -> Self {
        self.add(rhs.neg())
    }

    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs.hi);
        let p2 = p2 + self.hi * rhs.lo + self.lo * rhs.hi;
        let (hi, lo) = quick_two_sum(p1, p2);
        Self { hi, lo }
    }

    #[inline]
    pub fn mul_f64(self, rhs: f64) -> Self {
        let (p1, p2) = two_prod(self.hi, rhs);
        let (hi, lo) = quick_two_sum(p1, p2 + self.lo * rhs);
        Self { hi, lo }
    }

    /// Strict comparison against a plain f64 threshold; this is all the
    /// escape test needs.
    #[inline]
    pub fn gt_f64(self, v: f64) -> bool {
        self.hi > v || (self.hi == v && self.lo > 0.0)
    }
}

/// Complex number with double-double components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DdComplex {
    pub re: DdFloat,
    pub im: DdFloat,
}

impl DdComplex {
    pub const ZERO: Self = Self {
        re: DdFloat::ZERO,
        im: DdFloat::ZERO,
    };

    #[inline]
    pub const fn new(re: DdFloat, im: DdFloat) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn from_complex(c: Complex) -> Self {
        Self::new(DdFloat::from_f64(c.re), DdFloat::from_f64(c.im))
    }

    /// Promote an f64 point that is the sum of a center and a small offset.
    /// Adding in double-double keeps the offset alive in the low word even
    /// when it is far below the center's ulp.
    #[inline]
    pub fn from_center_offset(center: Complex, offset: Complex) -> Self {
        Self::new(
            DdFloat::from_f64(center.re).add(DdFloat::from_f64(offset.re)),
            DdFloat::from_f64(center.im).add(DdFloat::from_f64(offset.im)),
        )
    }

    #[inline]
    pub fn to_complex(self) -> Complex {
        Complex::new(self.re.to_f64(), self.im.to_f64())
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.re.add(rhs.re), self.im.add(rhs.im))
    }

    /// z² — expanded as (re² − im², 2·re·im) with compensated products.
    #[inline]
    pub fn sqr(self) -> Self {
        let re = self.re.mul(self.re).sub(self.im.mul(self.im));
        let im = self.re.mul(self.im).mul_f64(2.0);
        Self::new(re, im)
    }

    #[inline]
    pub fn norm_sq(self) -> DdFloat {
        self.re.mul(self.re).add(self.im.mul(self.im))
    }
}
