pub mod escape;
pub mod fractal;
pub mod geometry;

pub use escape::{julia_dd, julia_f64, mandelbrot_dd, mandelbrot_f64, EscapeParams, PointResult};
pub use fractal::{
    Fractal, FractalKind, FractalStats, JuliaParams, KochParams, MandelbrotParams,
    SierpinskiParams, TreeParams,
};
pub use geometry::{koch, sierpinski, tree, Segment, Triangle};
