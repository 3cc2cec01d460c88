//! Koch snowflake: recursive segment subdivision over a seed triangle.

use super::Segment;
use fractalscope_core::Vec2;

/// Depth cap: 3 · 4⁹ ≈ 786k segments is already past what any display
/// resolves.
pub const MAX_DEPTH: u32 = 9;

/// Generate the snowflake: the subdivision applied to all three sides of an
/// equilateral seed triangle (circumradius 1, centered at the origin, wound
/// counter-clockwise so the bumps point outward).
pub fn generate(depth: u32) -> Vec<Segment> {
    let depth = depth.min(MAX_DEPTH);
    let vertices = seed_triangle();
    let mut out = Vec::with_capacity(3 * 4usize.pow(depth));
    for i in 0..3 {
        subdivide(vertices[i], vertices[(i + 1) % 3], depth, &mut out);
    }
    out
}

fn seed_triangle() -> [Vec2; 3] {
    // Vertices at 90°, 210°, 330° on the unit circle
    let sqrt3_half = 3.0_f64.sqrt() / 2.0;
    [
        Vec2::new(0.0, 1.0),
        Vec2::new(-sqrt3_half, -0.5),
        Vec2::new(sqrt3_half, -0.5),
    ]
}

/// Replace a segment with the four-segment triangular bump, recursing until
/// depth 0 emits the straight segment.
fn subdivide(a: Vec2, b: Vec2, depth: u32, out: &mut Vec<Segment>) {
    if depth == 0 {
        out.push(Segment { a, b, depth: 0 });
        return;
    }
    let p1 = a.lerp(b, 1.0 / 3.0);
    let p2 = a.lerp(b, 2.0 / 3.0);
    let dir = b - a;
    // Apex: the outward normal of a CCW-wound polygon edge is (dy, -dx);
    // √3/6 of the segment length is the height of the equilateral bump over
    // the middle third.
    let apex = a.lerp(b, 0.5) + Vec2::new(dir.y, -dir.x) * (3.0_f64.sqrt() / 6.0);

    subdivide(a, p1, depth - 1, out);
    subdivide(p1, apex, depth - 1, out);
    subdivide(apex, p2, depth - 1, out);
    subdivide(p2, b, depth - 1, out);
}
