//! Iteration-to-color mapping: palettes, the smooth-iteration formula, and
//! the escape/depth colorizers.

mod colorize;
mod palette;

pub use colorize::{escape_color, geometry_color, hsv_to_rgb, smooth_iteration};
pub use palette::{
    escape_time_palettes, find_palette, geometry_palettes, Palette, PaletteKind,
};
