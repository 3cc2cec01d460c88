//! Fractal tree: binary branching with a spread that opens toward the crown.

use super::Segment;
use crate::fractal::TreeParams;
use fractalscope_core::Vec2;

/// Depth cap: 2¹⁶ − 1 ≈ 65k segments.
pub const MAX_DEPTH: u32 = 15;

/// Trunk length in model units; children shrink by the params ratio.
const TRUNK_LENGTH: f64 = 0.55;

/// Spread multiplier range across the tree: narrow at the trunk, opening
/// toward the crown.
const SPREAD_FLOOR: f64 = 0.6;
const SPREAD_GAIN: f64 = 0.8;

/// Generate the tree growing upward from below the origin. Fully
/// deterministic — identical parameters give byte-identical output.
pub fn generate(params: &TreeParams) -> Vec<Segment> {
    let depth = params.depth.min(MAX_DEPTH);
    let mut out = Vec::with_capacity(2usize.pow(depth + 1) - 1);
    branch(
        Vec2::new(0.0, -0.9),
        std::f64::consts::FRAC_PI_2,
        TRUNK_LENGTH,
        depth,
        depth,
        params,
        &mut out,
    );
    out
}

/// Emit one branch segment, then recurse into the two children with the
/// depth-dependent spread. Depth 0 terminates after emitting its segment.
#[allow(clippy::too_many_arguments)]
fn branch(
    start: Vec2,
    angle: f64,
    length: f64,
    depth: u32,
    total_depth: u32,
    params: &TreeParams,
    out: &mut Vec<Segment>,
) {
    let end = start + Vec2::new(angle.cos(), angle.sin()) * length;
    out.push(Segment {
        a: start,
        b: end,
        depth,
    });
    if depth == 0 {
        return;
    }
    // Relative depth runs 0 at the trunk to ~1 at the crown; branches open
    // up as it grows.
    let relative = 1.0 - depth as f64 / total_depth.max(1) as f64;
    let spread = params.base_spread * (SPREAD_FLOOR + SPREAD_GAIN * relative);
    let child_length = length * params.length_ratio;
    branch(
        end,
        angle + spread,
        child_length,
        depth - 1,
        total_depth,
        params,
        out,
    );
    branch(
        end,
        angle - spread,
        child_length,
        depth - 1,
        total_depth,
        params,
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(depth: u32) -> TreeParams {
        TreeParams {
            depth,
            ..TreeParams::default()
        }
    }

    #[test]
    fn segment_count_is_full_binary_tree_edges() {
        for depth in 0..8 {
            let segments = generate(&params(depth));
            assert_eq!(
                segments.len(),
                2usize.pow(depth + 1) - 1,
                "wrong count at depth {}",
                depth
            );
        }
    }

    #[test]
    fn depth_is_capped() {
        let segments = generate(&params(MAX_DEPTH + 10));
        assert_eq!(segments.len(), 2usize.pow(MAX_DEPTH + 1) - 1);
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        assert_eq!(generate(&params(8)), generate(&params(8)));
    }

    #[test]
    fn trunk_grows_straight_up() {
        let segments = generate(&params(3));
        let trunk = segments[0];
        assert_eq!(trunk.a, Vec2::new(0.0, -0.9));
        assert!(trunk.b.x.abs() < 1e-12);
        assert!((trunk.b.y - (-0.9 + TRUNK_LENGTH)).abs() < 1e-12);
    }

    #[test]
    fn depth_tags_descend_from_trunk_to_crown() {
        let depth = 4;
        let segments = generate(&params(depth));
        assert_eq!(segments[0].depth, depth);
        assert!(segments.iter().any(|s| s.depth == 0));
        let tips = segments.iter().filter(|s| s.depth == 0).count();
        assert_eq!(tips, 2usize.pow(depth));
    }

    #[test]
    fn children_shrink_by_the_length_ratio() {
        let p = params(2);
        let segments = generate(&p);
        let trunk_len = (segments[0].b - segments[0].a).length();
        let child_len = (segments[1].b - segments[1].a).length();
        assert!((child_len - trunk_len * p.length_ratio).abs() < 1e-12);
    }

    #[test]
    fn spread_opens_toward_the_crown() {
        // Angle between sibling branches at the crown exceeds the angle
        // near the trunk.
        let p = params(5);
        let segments = generate(&p);
        let angle_of = |s: &Segment| (s.b.y - s.a.y).atan2(s.b.x - s.a.x);
        // Trunk children are emitted right after the trunk (depth-first):
        // segments[1] is the first child subtree root; its sibling is the
        // first segment after that whole subtree.
        let subtree = 2usize.pow(p.depth) - 1;
        let left = &segments[1];
        let right = &segments[1 + subtree];
        assert_eq!(left.depth, p.depth - 1);
        assert_eq!(right.depth, p.depth - 1);
        let trunk_spread = (angle_of(left) - angle_of(right)).abs();

        // Two sibling tips share a parent at the very end of the list
        let tip_a = &segments[segments.len() - 2];
        let tip_b = &segments[segments.len() - 1];
        assert_eq!(tip_a.depth, 0);
        assert_eq!(tip_b.depth, 0);
        let crown_spread = (angle_of(tip_a) - angle_of(tip_b)).abs();
        assert!(
            crown_spread > trunk_spread,
            "crown spread {} should exceed trunk spread {}",
            crown_spread,
            trunk_spread
        );
    }
}
