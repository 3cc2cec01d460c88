//! Adaptive quality policy.
//!
//! Pure functions of zoom level (plus the user-set iteration count and escape
//! radius) deciding effective iterations, escape radius, precision mode and
//! supersampling density. Nothing in here can fail: numeric edge cases are
//! clamped, never signaled.

/// Hard floor for zoom on every write.
pub const MIN_ZOOM: f64 = 1e-4;

/// Hard ceiling on per-pixel iterations regardless of user request.
pub const ITERATION_CAP: u32 = 8000;

/// Zoom level at which evaluation switches to compensated arithmetic.
///
/// Deliberately far earlier than rounding-error analysis requires; the margin
/// is what keeps detail boundaries free of visible artifacts.
pub const DEEP_ZOOM_THRESHOLD: f64 = 20.0;

/// Escape radius bounds reflected back to the parameter UI.
pub const MIN_ESCAPE_RADIUS: f64 = 2.0;
pub const MAX_ESCAPE_RADIUS: f64 = 1e6;

/// Zoom beyond which the escape radius is nudged upward.
const RADIUS_NUDGE_ZOOM: f64 = 1e9;

/// Numeric mode for the escape-time kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// Native f64 evaluation.
    Standard,
    /// Two-f64 compensated (double-double) evaluation for deep zoom.
    DoubleDouble,
}

/// Effective render parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderQuality {
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub precision: Precision,
    /// Samples per pixel axis; total samples are the square of this.
    pub supersample: u32,
}

/// Derive frame quality from zoom and the user-set knobs.
///
/// The iteration count is the user's choice clamped to the cap — zoom never
/// silently changes it; only the user controls iterations. The UI may suggest
/// raising it, this policy will not.
pub fn quality_for_zoom(zoom: f64, user_iterations: u32, user_escape_radius: f64) -> RenderQuality {
    let zoom = sanitize_zoom(zoom);

    let max_iterations = user_iterations.clamp(1, ITERATION_CAP);

    let mut escape_radius = if user_escape_radius.is_finite() {
        user_escape_radius.clamp(MIN_ESCAPE_RADIUS, MAX_ESCAPE_RADIUS)
    } else {
        MIN_ESCAPE_RADIUS
    };
    if zoom > RADIUS_NUDGE_ZOOM {
        escape_radius = (escape_radius * 2.0).min(MAX_ESCAPE_RADIUS);
    }

    RenderQuality {
        max_iterations,
        escape_radius,
        precision: precision_for_zoom(zoom),
        supersample: supersample_for_zoom(zoom),
    }
}

pub fn precision_for_zoom(zoom: f64) -> Precision {
    if sanitize_zoom(zoom) >= DEEP_ZOOM_THRESHOLD {
        Precision::DoubleDouble
    } else {
        Precision::Standard
    }
}

/// Stepwise supersampling grid size. Capped at 12 to bound per-frame cost;
/// beyond that the jittered grid stops being the limiting factor.
pub fn supersample_for_zoom(zoom: f64) -> u32 {
    let zoom = sanitize_zoom(zoom);
    match zoom {
        z if z < 1e2 => 1,
        z if z < 1e3 => 2,
        z if z < 1e6 => 4,
        z if z < 1e9 => 6,
        z if z < 1e12 => 8,
        _ => 12,
    }
}

fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom.max(MIN_ZOOM)
    } else {
        MIN_ZOOM
    }
}
