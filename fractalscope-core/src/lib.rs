pub mod complex;
pub mod dd;
pub mod quality;
pub mod transforms;
pub mod vec2;
pub mod viewport;

pub use complex::Complex;
pub use dd::{DdComplex, DdFloat};
pub use quality::{quality_for_zoom, Precision, RenderQuality, ITERATION_CAP, MIN_ZOOM};
pub use transforms::{
    aspect_ratio, complex_to_screen, complex_to_screen_rotated, screen_to_complex,
    screen_to_complex_rotated, RenderParams,
};
pub use vec2::Vec2;
pub use viewport::Viewport;
