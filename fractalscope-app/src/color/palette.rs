//! Named palettes: a small number of fixed color stops blended
//! piecewise-linearly over equal-width bands.

/// How a palette produces color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaletteKind {
    /// Equal-width gradient stops.
    Gradient(&'static [[u8; 3]]),
    /// Hue sweep through HSV space (the Rainbow palette).
    HueSweep,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PaletteKind,
}

impl Palette {
    /// Sample at `t` in [0, 1]. Out-of-range input is clamped.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self.kind {
            PaletteKind::Gradient(stops) => sample_stops(stops, t),
            PaletteKind::HueSweep => {
                let [r, g, b] = super::hsv_to_rgb(t * 300.0, 1.0, 1.0);
                [
                    (r * 255.0).round() as u8,
                    (g * 255.0).round() as u8,
                    (b * 255.0).round() as u8,
                ]
            }
        }
    }
}

fn sample_stops(stops: &[[u8; 3]], t: f64) -> [u8; 3] {
    if stops.len() == 1 {
        return stops[0];
    }
    let bands = (stops.len() - 1) as f64;
    let scaled = t * bands;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - i as f64;
    let lo = stops[i];
    let hi = stops[i + 1];
    let mut out = [0u8; 3];
    for ch in 0..3 {
        out[ch] = (lo[ch] as f64 + (hi[ch] as f64 - lo[ch] as f64) * frac).round() as u8;
    }
    out
}

/// Palettes offered for the escape-time fractals.
pub fn escape_time_palettes() -> &'static [Palette] {
    ESCAPE_TIME_PALETTES
}

/// Palettes offered for the geometry fractals (depth coloring).
pub fn geometry_palettes() -> &'static [Palette] {
    GEOMETRY_PALETTES
}

pub fn find_palette(id: &str) -> Option<&'static Palette> {
    ESCAPE_TIME_PALETTES
        .iter()
        .chain(GEOMETRY_PALETTES.iter())
        .find(|p| p.id == id)
}

static ESCAPE_TIME_PALETTES: &[Palette] = &[
    Palette {
        id: "classic",
        name: "Classic",
        kind: PaletteKind::Gradient(&[
            [0, 7, 100],
            [32, 107, 203],
            [237, 255, 255],
            [255, 170, 0],
            [0, 2, 0],
        ]),
    },
    Palette {
        id: "fire",
        name: "Fire",
        kind: PaletteKind::Gradient(&[
            [0, 0, 0],
            [120, 20, 0],
            [255, 100, 0],
            [255, 220, 80],
            [255, 255, 255],
        ]),
    },
    Palette {
        id: "ocean",
        name: "Ocean",
        kind: PaletteKind::Gradient(&[
            [0, 10, 40],
            [0, 60, 120],
            [20, 140, 180],
            [120, 220, 230],
            [240, 250, 255],
        ]),
    },
    Palette {
        id: "grayscale",
        name: "Grayscale",
        kind: PaletteKind::Gradient(&[[0, 0, 0], [255, 255, 255]]),
    },
    Palette {
        id: "rainbow",
        name: "Rainbow",
        kind: PaletteKind::HueSweep,
    },
];

static GEOMETRY_PALETTES: &[Palette] = &[
    Palette {
        id: "forest",
        name: "Forest",
        kind: PaletteKind::Gradient(&[[80, 48, 20], [34, 100, 34], [150, 220, 120]]),
    },
    Palette {
        id: "autumn",
        name: "Autumn",
        kind: PaletteKind::Gradient(&[[90, 30, 10], [200, 90, 20], [255, 210, 80]]),
    },
    Palette {
        id: "neon",
        name: "Neon",
        kind: PaletteKind::Gradient(&[[20, 0, 60], [180, 0, 255], [0, 255, 200]]),
    },
];
