//! Closed fractal model.
//!
//! One tagged variant per fractal type, each carrying its own parameter
//! struct; every operation dispatches with a single `match`. Parameter
//! setters clamp instead of failing — this is a live control surface where
//! every slider tick is a potential invalid transient.

use crate::geometry;
use fractalscope_core::{Complex, ITERATION_CAP};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalKind {
    Mandelbrot,
    Julia,
    Koch,
    Sierpinski,
    Tree,
}

impl FractalKind {
    pub const ALL: [FractalKind; 5] = [
        FractalKind::Mandelbrot,
        FractalKind::Julia,
        FractalKind::Koch,
        FractalKind::Sierpinski,
        FractalKind::Tree,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => "mandelbrot",
            FractalKind::Julia => "julia",
            FractalKind::Koch => "koch",
            FractalKind::Sierpinski => "sierpinski",
            FractalKind::Tree => "tree",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => "Mandelbrot",
            FractalKind::Julia => "Julia",
            FractalKind::Koch => "Koch Snowflake",
            FractalKind::Sierpinski => "Sierpinski Triangle",
            FractalKind::Tree => "Fractal Tree",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.id() == id)
    }

    /// Escape-time fractals render per pixel; the rest generate geometry.
    pub fn is_escape_time(&self) -> bool {
        matches!(self, FractalKind::Mandelbrot | FractalKind::Julia)
    }

    /// The geometric fractals historically shipped with inverted drag
    /// semantics and users expect them to stay that way.
    pub fn inverted_pan(&self) -> bool {
        !self.is_escape_time()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MandelbrotParams {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub smooth: bool,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            escape_radius: 2.0,
            smooth: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JuliaParams {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub smooth: bool,
    /// The Julia constant; owned here, mutated only by explicit user action
    /// or preset load.
    pub c: Complex,
}

impl Default for JuliaParams {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            escape_radius: 2.0,
            smooth: true,
            c: Complex::new(-0.8, 0.156),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KochParams {
    pub depth: u32,
}

impl Default for KochParams {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SierpinskiParams {
    pub depth: u32,
}

impl Default for SierpinskiParams {
    fn default() -> Self {
        Self { depth: 5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub depth: u32,
    /// Child branch length as a fraction of the parent's.
    pub length_ratio: f64,
    /// Base half-angle between a parent and each child, in radians.
    pub base_spread: f64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            depth: 9,
            length_ratio: 0.72,
            base_spread: 0.5,
        }
    }
}

/// Active fractal with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fractal {
    Mandelbrot(MandelbrotParams),
    Julia(JuliaParams),
    Koch(KochParams),
    Sierpinski(SierpinskiParams),
    Tree(TreeParams),
}

impl Fractal {
    pub fn default_for(kind: FractalKind) -> Self {
        match kind {
            FractalKind::Mandelbrot => Fractal::Mandelbrot(MandelbrotParams::default()),
            FractalKind::Julia => Fractal::Julia(JuliaParams::default()),
            FractalKind::Koch => Fractal::Koch(KochParams::default()),
            FractalKind::Sierpinski => Fractal::Sierpinski(SierpinskiParams::default()),
            FractalKind::Tree => Fractal::Tree(TreeParams::default()),
        }
    }

    pub fn kind(&self) -> FractalKind {
        match self {
            Fractal::Mandelbrot(_) => FractalKind::Mandelbrot,
            Fractal::Julia(_) => FractalKind::Julia,
            Fractal::Koch(_) => FractalKind::Koch,
            Fractal::Sierpinski(_) => FractalKind::Sierpinski,
            Fractal::Tree(_) => FractalKind::Tree,
        }
    }

    pub fn max_iterations(&self) -> Option<u32> {
        match self {
            Fractal::Mandelbrot(p) => Some(p.max_iterations),
            Fractal::Julia(p) => Some(p.max_iterations),
            _ => None,
        }
    }

    /// Clamped to [1, ITERATION_CAP]. No-op for geometry fractals.
    pub fn set_max_iterations(&mut self, n: u32) {
        let clamped = n.clamp(1, ITERATION_CAP);
        if clamped != n {
            log::debug!("iteration count {} clamped to {}", n, clamped);
        }
        match self {
            Fractal::Mandelbrot(p) => p.max_iterations = clamped,
            Fractal::Julia(p) => p.max_iterations = clamped,
            _ => {}
        }
    }

    pub fn escape_radius(&self) -> Option<f64> {
        match self {
            Fractal::Mandelbrot(p) => Some(p.escape_radius),
            Fractal::Julia(p) => Some(p.escape_radius),
            _ => None,
        }
    }

    /// Clamped to the policy bounds; non-finite input falls to the minimum.
    pub fn set_escape_radius(&mut self, r: f64) {
        use fractalscope_core::quality::{MAX_ESCAPE_RADIUS, MIN_ESCAPE_RADIUS};
        let clamped = if r.is_finite() {
            r.clamp(MIN_ESCAPE_RADIUS, MAX_ESCAPE_RADIUS)
        } else {
            MIN_ESCAPE_RADIUS
        };
        match self {
            Fractal::Mandelbrot(p) => p.escape_radius = clamped,
            Fractal::Julia(p) => p.escape_radius = clamped,
            _ => {}
        }
    }

    pub fn smooth(&self) -> Option<bool> {
        match self {
            Fractal::Mandelbrot(p) => Some(p.smooth),
            Fractal::Julia(p) => Some(p.smooth),
            _ => None,
        }
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        match self {
            Fractal::Mandelbrot(p) => p.smooth = smooth,
            Fractal::Julia(p) => p.smooth = smooth,
            _ => {}
        }
    }

    pub fn julia_constant(&self) -> Option<Complex> {
        match self {
            Fractal::Julia(p) => Some(p.c),
            _ => None,
        }
    }

    pub fn set_julia_constant(&mut self, c: Complex) {
        if let Fractal::Julia(p) = self {
            if c.is_finite() {
                p.c = c;
            } else {
                log::warn!("ignoring non-finite Julia constant {:?}", c);
            }
        }
    }

    pub fn depth(&self) -> Option<u32> {
        match self {
            Fractal::Koch(p) => Some(p.depth),
            Fractal::Sierpinski(p) => Some(p.depth),
            Fractal::Tree(p) => Some(p.depth),
            _ => None,
        }
    }

    /// Recursion depth cap for this fractal's generator, if it has one.
    pub fn max_depth(&self) -> Option<u32> {
        match self {
            Fractal::Koch(_) => Some(geometry::koch::MAX_DEPTH),
            Fractal::Sierpinski(_) => Some(geometry::sierpinski::MAX_DEPTH),
            Fractal::Tree(_) => Some(geometry::tree::MAX_DEPTH),
            _ => None,
        }
    }

    /// Clamped to the per-generator cap; an unvalidated depth must never
    /// reach the generators.
    pub fn set_depth(&mut self, depth: u32) {
        let (slot, cap) = match self {
            Fractal::Koch(p) => (&mut p.depth, geometry::koch::MAX_DEPTH),
            Fractal::Sierpinski(p) => (&mut p.depth, geometry::sierpinski::MAX_DEPTH),
            Fractal::Tree(p) => (&mut p.depth, geometry::tree::MAX_DEPTH),
            _ => return,
        };
        let clamped = depth.min(cap);
        if clamped != depth {
            log::debug!("recursion depth {} clamped to {}", depth, clamped);
        }
        *slot = clamped;
    }

    pub fn statistics(&self) -> FractalStats {
        match self {
            Fractal::Mandelbrot(p) => FractalStats::EscapeTime {
                max_iterations: p.max_iterations,
                escape_radius: p.escape_radius,
            },
            Fractal::Julia(p) => FractalStats::EscapeTime {
                max_iterations: p.max_iterations,
                escape_radius: p.escape_radius,
            },
            // Depth is clamped the same way the generators clamp it, so the
            // counts always describe what would actually be generated.
            Fractal::Koch(p) => {
                let depth = p.depth.min(geometry::koch::MAX_DEPTH);
                FractalStats::Geometry {
                    depth,
                    primitives: 3 * 4usize.pow(depth),
                }
            }
            Fractal::Sierpinski(p) => {
                let depth = p.depth.min(geometry::sierpinski::MAX_DEPTH);
                FractalStats::Geometry {
                    depth,
                    primitives: 3usize.pow(depth),
                }
            }
            Fractal::Tree(p) => {
                let depth = p.depth.min(geometry::tree::MAX_DEPTH);
                FractalStats::Geometry {
                    depth,
                    primitives: 2usize.pow(depth + 1) - 1,
                }
            }
        }
    }
}

/// Per-fractal figures for the metric display collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FractalStats {
    EscapeTime {
        max_iterations: u32,
        escape_radius: f64,
    },
    Geometry {
        depth: u32,
        primitives: usize,
    },
}
