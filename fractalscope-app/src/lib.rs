pub mod color;
pub mod config;
pub mod engine;
pub mod input;
pub mod presets;
pub mod render;
pub mod session;

pub use color::{escape_color, geometry_color, hsv_to_rgb, smooth_iteration, Palette};
pub use config::{config_for, FractalConfig, FRACTAL_CONFIGS};
pub use engine::{Engine, EngineError, EngineStats};
pub use input::{InputController, InputEvent, Key};
pub use presets::{julia_preset, point_of_interest, JuliaPreset, PointOfInterest};
pub use render::{
    project_vertex, render, ColoredSegment, ColoredTriangle, PixelBuffer, RenderOutput,
};
pub use session::{export_snapshot, import_snapshot, SessionError, Snapshot};
