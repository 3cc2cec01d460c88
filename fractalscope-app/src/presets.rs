//! Named preset tables: Julia constants and Mandelbrot points of interest.
//!
//! These are data, not behavior; the engine applies them by name.

use fractalscope_core::Complex;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JuliaPreset {
    pub name: &'static str,
    pub c: Complex,
}

pub static JULIA_PRESETS: &[JuliaPreset] = &[
    JuliaPreset {
        name: "Dragon",
        c: Complex::new(-0.8, 0.156),
    },
    JuliaPreset {
        name: "Shimmer",
        c: Complex::new(0.285, 0.01),
    },
    JuliaPreset {
        name: "Douady Rabbit",
        c: Complex::new(-0.123, 0.745),
    },
    JuliaPreset {
        name: "Dendrite",
        c: Complex::new(0.0, 1.0),
    },
    JuliaPreset {
        name: "San Marco",
        c: Complex::new(-0.75, 0.0),
    },
    JuliaPreset {
        name: "Siegel Disk",
        c: Complex::new(-0.391, -0.587),
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfInterest {
    pub name: &'static str,
    pub center: Complex,
    pub zoom: f64,
}

pub static MANDELBROT_POIS: &[PointOfInterest] = &[
    PointOfInterest {
        name: "Home",
        center: Complex::new(-0.5, 0.0),
        zoom: 1.0,
    },
    PointOfInterest {
        name: "Seahorse Valley",
        center: Complex::new(-0.75, 0.1),
        zoom: 60.0,
    },
    PointOfInterest {
        name: "Elephant Valley",
        center: Complex::new(0.275, 0.007),
        zoom: 120.0,
    },
    PointOfInterest {
        name: "Triple Spiral",
        center: Complex::new(-0.743643887037151, 0.13182590420533),
        zoom: 5e8,
    },
    PointOfInterest {
        name: "Mini Mandelbrot",
        center: Complex::new(-1.7686112281, 0.0017086774),
        zoom: 1e6,
    },
];

pub fn julia_preset(name: &str) -> Option<&'static JuliaPreset> {
    JULIA_PRESETS.iter().find(|p| p.name == name)
}

pub fn point_of_interest(name: &str) -> Option<&'static PointOfInterest> {
    MANDELBROT_POIS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            julia_preset("Dragon").map(|p| p.c),
            Some(Complex::new(-0.8, 0.156))
        );
        assert_eq!(julia_preset("nope"), None);
        assert_eq!(
            point_of_interest("Home").map(|p| p.zoom),
            Some(1.0)
        );
    }

    #[test]
    fn preset_names_are_unique() {
        let mut names: Vec<&str> = JULIA_PRESETS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), JULIA_PRESETS.len());

        let mut names: Vec<&str> = MANDELBROT_POIS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MANDELBROT_POIS.len());
    }

    #[test]
    fn poi_zooms_are_positive_and_finite() {
        for poi in MANDELBROT_POIS {
            assert!(poi.zoom.is_finite() && poi.zoom > 0.0, "{}", poi.name);
            assert!(poi.center.is_finite(), "{}", poi.name);
        }
    }
}
