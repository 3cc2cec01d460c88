//! Fractal registry: per-kind defaults and palette sets.

use crate::color::{escape_time_palettes, geometry_palettes, Palette};
use fractalscope_compute::FractalKind;
use fractalscope_core::Complex;

pub struct FractalConfig {
    pub kind: FractalKind,
    pub default_center: Complex,
    pub default_zoom: f64,
    pub default_palette_id: &'static str,
}

pub static FRACTAL_CONFIGS: &[FractalConfig] = &[
    FractalConfig {
        kind: FractalKind::Mandelbrot,
        default_center: Complex::new(-0.5, 0.0),
        default_zoom: 1.0,
        default_palette_id: "classic",
    },
    FractalConfig {
        kind: FractalKind::Julia,
        default_center: Complex::new(0.0, 0.0),
        default_zoom: 1.0,
        default_palette_id: "ocean",
    },
    FractalConfig {
        kind: FractalKind::Koch,
        default_center: Complex::new(0.0, 0.0),
        default_zoom: 1.0,
        default_palette_id: "neon",
    },
    FractalConfig {
        kind: FractalKind::Sierpinski,
        default_center: Complex::new(0.0, 0.0),
        default_zoom: 1.0,
        default_palette_id: "autumn",
    },
    FractalConfig {
        kind: FractalKind::Tree,
        default_center: Complex::new(0.0, 0.0),
        default_zoom: 1.0,
        default_palette_id: "forest",
    },
];

pub fn config_for(kind: FractalKind) -> &'static FractalConfig {
    // The table covers every variant of the closed enum
    FRACTAL_CONFIGS
        .iter()
        .find(|c| c.kind == kind)
        .unwrap_or(&FRACTAL_CONFIGS[0])
}

/// The palettes offered for a fractal kind.
pub fn palettes_for(kind: FractalKind) -> &'static [Palette] {
    if kind.is_escape_time() {
        escape_time_palettes()
    } else {
        geometry_palettes()
    }
}
