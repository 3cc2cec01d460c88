//! CPU render pipeline.
//!
//! Escape-time fractals produce an RGBA pixel buffer: per pixel, an N×N grid
//! of jittered samples is mapped through the rotation-aware viewport
//! transform, iterated at the policy-selected precision, colorized, and
//! averaged. Rows run data-parallel under rayon — every pixel is independent
//! and deterministic, so the parallel split never changes output.
//!
//! Geometry fractals return colored vertex lists in model space; the display
//! surface projects them with the viewport transform.

use crate::color::{escape_color, geometry_color, Palette};
use fractalscope_compute::geometry::{koch, sierpinski, tree};
use fractalscope_compute::{
    julia_dd, julia_f64, mandelbrot_dd, mandelbrot_f64, EscapeParams, Fractal, PointResult,
    Segment, Triangle,
};
use fractalscope_core::{
    complex_to_screen_rotated, Complex, Precision, RenderParams, RenderQuality, Vec2,
};
use rayon::prelude::*;

/// RGBA8 framebuffer, row-major, top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredSegment {
    pub segment: Segment,
    pub color: [u8; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColoredTriangle {
    pub triangle: Triangle,
    pub color: [u8; 4],
}

/// One frame's output.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutput {
    Pixels(PixelBuffer),
    Segments(Vec<ColoredSegment>),
    Triangles(Vec<ColoredTriangle>),
}

/// Render one frame of the given fractal.
pub fn render(
    fractal: &Fractal,
    params: &RenderParams,
    quality: &RenderQuality,
    palette: &Palette,
    width: u32,
    height: u32,
) -> RenderOutput {
    match fractal {
        Fractal::Mandelbrot(p) => RenderOutput::Pixels(render_escape(
            Kernel::Mandelbrot,
            p.smooth,
            params,
            quality,
            palette,
            width,
            height,
        )),
        Fractal::Julia(p) => RenderOutput::Pixels(render_escape(
            Kernel::Julia(p.c),
            p.smooth,
            params,
            quality,
            palette,
            width,
            height,
        )),
        Fractal::Koch(p) => RenderOutput::Segments(color_by_index(koch::generate(p.depth), palette)),
        Fractal::Sierpinski(p) => {
            RenderOutput::Triangles(color_triangles(sierpinski::generate(p.depth), palette))
        }
        Fractal::Tree(p) => RenderOutput::Segments(color_by_depth(
            tree::generate(p),
            p.depth.min(tree::MAX_DEPTH),
            palette,
        )),
    }
}

#[derive(Clone, Copy)]
enum Kernel {
    Mandelbrot,
    Julia(Complex),
}

impl Kernel {
    #[inline]
    fn evaluate(
        &self,
        center: Complex,
        offset: Complex,
        precision: Precision,
        escape: &EscapeParams,
    ) -> PointResult {
        match (self, precision) {
            (Kernel::Mandelbrot, Precision::Standard) => mandelbrot_f64(center + offset, escape),
            (Kernel::Mandelbrot, Precision::DoubleDouble) => mandelbrot_dd(center, offset, escape),
            (Kernel::Julia(c), Precision::Standard) => julia_f64(center + offset, *c, escape),
            (Kernel::Julia(c), Precision::DoubleDouble) => julia_dd(center, offset, *c, escape),
        }
    }
}

fn render_escape(
    kernel: Kernel,
    smooth: bool,
    params: &RenderParams,
    quality: &RenderQuality,
    palette: &Palette,
    width: u32,
    height: u32,
) -> PixelBuffer {
    let escape = EscapeParams::new(quality.max_iterations, quality.escape_radius);
    let n = quality.supersample.max(1);
    let sample_count = (n * n) as f64;
    let (w, h) = (width as f64, height as f64);
    let row_bytes = (width * 4) as usize;

    let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
    data.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(py, row)| {
            for px in 0..width as usize {
                let mut acc = [0.0f64; 3];
                for s in 0..n * n {
                    let (ox, oy) = sample_position(px as u32, py as u32, s, n);
                    let offset =
                        sample_offset(px as f64 + ox, py as f64 + oy, w, h, params);
                    let result = kernel.evaluate(params.center, offset, quality.precision, &escape);
                    let rgb = escape_color(
                        &result,
                        escape.max_iterations,
                        smooth,
                        escape.escape_radius,
                        palette,
                    );
                    acc[0] += rgb[0];
                    acc[1] += rgb[1];
                    acc[2] += rgb[2];
                }
                let i = px * 4;
                row[i] = (acc[0] / sample_count * 255.0).round() as u8;
                row[i + 1] = (acc[1] / sample_count * 255.0).round() as u8;
                row[i + 2] = (acc[2] / sample_count * 255.0).round() as u8;
                row[i + 3] = 255;
            }
        });

    PixelBuffer {
        width,
        height,
        data,
    }
}

/// Center-relative plane offset for a (sub-pixel) screen position, with the
/// viewport rotation applied. Kept separate from the absolute mapping so the
/// double-double kernels can add the center without losing the offset below
/// its ulp.
#[inline]
fn sample_offset(sx: f64, sy: f64, w: f64, h: f64, params: &RenderParams) -> Complex {
    let offset = Complex::new(
        (sx / w - 0.5) * params.range * params.aspect,
        (0.5 - sy / h) * params.range,
    );
    if params.rotation == 0.0 {
        offset
    } else {
        offset.rotate(params.rotation)
    }
}

/// Sub-pixel sample position inside the pixel: cell `s` of the N×N grid,
/// jittered by a deterministic hash of the pixel and sample indices so the
/// grid itself never shows up as an artifact. A single sample sits at the
/// pixel center.
#[inline]
fn sample_position(px: u32, py: u32, s: u32, n: u32) -> (f64, f64) {
    if n == 1 {
        return (0.5, 0.5);
    }
    let cell_x = (s % n) as f64;
    let cell_y = (s / n) as f64;
    let jx = hash01(px, py, 2 * s);
    let jy = hash01(px, py, 2 * s + 1);
    ((cell_x + jx) / n as f64, (cell_y + jy) / n as f64)
}

/// Integer hash → [0, 1). Wang-style finalizer over the seeded coordinates;
/// no time or RNG dependence anywhere.
#[inline]
fn hash01(x: u32, y: u32, s: u32) -> f64 {
    let mut h = x
        .wrapping_mul(73_856_093)
        .wrapping_add(y.wrapping_mul(19_349_663))
        .wrapping_add(s.wrapping_mul(83_492_791));
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h as f64 / (u32::MAX as f64 + 1.0)
}

/// Project a geometry vertex through the viewport transform to screen space.
/// Geometry lives in model coordinates on the same plane the camera pans and
/// zooms over.
pub fn project_vertex(v: Vec2, width: u32, height: u32, params: &RenderParams) -> (f64, f64) {
    complex_to_screen_rotated(
        Complex::new(v.x, v.y),
        width as f64,
        height as f64,
        params,
    )
}

fn color_by_index(segments: Vec<Segment>, palette: &Palette) -> Vec<ColoredSegment> {
    let denom = segments.len().saturating_sub(1).max(1) as f64;
    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| ColoredSegment {
            segment,
            color: geometry_color(i as f64 / denom, palette),
        })
        .collect()
}

fn color_by_depth(segments: Vec<Segment>, total_depth: u32, palette: &Palette) -> Vec<ColoredSegment> {
    let denom = total_depth.max(1) as f64;
    segments
        .into_iter()
        .map(|segment| ColoredSegment {
            segment,
            color: geometry_color((total_depth - segment.depth) as f64 / denom, palette),
        })
        .collect()
}

fn color_triangles(triangles: Vec<Triangle>, palette: &Palette) -> Vec<ColoredTriangle> {
    let denom = triangles.len().saturating_sub(1).max(1) as f64;
    triangles
        .into_iter()
        .enumerate()
        .map(|(i, triangle)| ColoredTriangle {
            triangle,
            color: geometry_color(i as f64 / denom, palette),
        })
        .collect()
}
