//! Recursive geometry generators.
//!
//! Each generator is a pure recursive subdivision producing a fresh vertex
//! list. Output is regenerated wholesale when depth or shape parameters
//! change — there is no incremental update — and is byte-identical for
//! identical inputs. Depth is capped per generator so an unvalidated input
//! cannot blow up memory or time.

pub mod koch;
pub mod sierpinski;
pub mod tree;

use fractalscope_core::Vec2;

/// Line segment with the recursion depth it was emitted at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub depth: u32,
}

/// Filled triangle with the recursion depth it was emitted at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
    pub depth: u32,
}
