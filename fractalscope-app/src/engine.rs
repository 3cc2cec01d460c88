//! Engine: owns the viewport, the active fractal, and the palette selection.
//!
//! Constructed once and passed by reference to the UI/input layers — there is
//! no ambient global state. Each frame runs in a fixed order: poll held keys
//! (input → targets), advance the viewport animation, derive render
//! parameters and quality, then evaluate. Switching fractal or resizing the
//! surface tears down cached renderer state and validates the replacement
//! before anything is committed, so a partially-initialized renderer never
//! produces a frame.

use crate::color::{find_palette, Palette};
use crate::config::{config_for, palettes_for};
use crate::input::{InputController, InputEvent};
use crate::presets::{julia_preset, point_of_interest};
use crate::render::{render, PixelBuffer, RenderOutput};
use crate::session::Snapshot;
use fractalscope_compute::{Fractal, FractalKind, FractalStats, JuliaParams};
use fractalscope_core::{quality_for_zoom, Complex, Precision, RenderQuality, Viewport};
use thiserror::Error;

const MAX_SURFACE_DIM: u32 = 16_384;
const MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;
const MAX_GEOMETRY_PRIMITIVES: usize = 2_000_000;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
    #[error("renderer initialization failed for {fractal}: {reason}")]
    RendererInit {
        fractal: &'static str,
        reason: String,
    },
}

/// Per-frame figures for the metric display collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineStats {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
    pub settled: bool,
    pub quality: RenderQuality,
    pub fractal: FractalStats,
}

pub struct Engine {
    viewport: Viewport,
    fractal: Fractal,
    input: InputController,
    palette: &'static Palette,
    width: u32,
    height: u32,
    last_output: Option<RenderOutput>,
    last_precision: Precision,
    /// Geometry output cached per (parameters, palette); regenerated
    /// wholesale when either changes.
    cached_geometry: Option<(Fractal, &'static str, RenderOutput)>,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        validate_surface(width, height)?;
        let kind = FractalKind::Mandelbrot;
        let config = config_for(kind);
        Ok(Self {
            viewport: Viewport::new(config.default_center, config.default_zoom, 0.0),
            fractal: Fractal::default_for(kind),
            input: InputController::new(width as f64, height as f64),
            palette: default_palette(kind),
            width,
            height,
            last_output: None,
            last_precision: Precision::Standard,
            cached_geometry: None,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn fractal(&self) -> &Fractal {
        &self.fractal
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Forward a host input event to the controller.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input
            .handle_event(event, &mut self.viewport, self.fractal.kind());
    }

    /// Run one frame: held-key poll → animation step → parameter derivation
    /// → evaluation. This order is load-bearing and must not change.
    pub fn render_frame(&mut self) -> &RenderOutput {
        self.input.poll_held_keys(&mut self.viewport);
        self.viewport.update();

        let params = self
            .viewport
            .render_params(self.width as f64, self.height as f64);
        let quality = self.quality();
        if quality.precision != self.last_precision {
            log::info!(
                "precision mode {:?} at zoom {:.3e}",
                quality.precision,
                self.viewport.zoom()
            );
            self.last_precision = quality.precision;
        }

        let output = match &self.cached_geometry {
            Some((cached_for, palette_id, cached))
                if *cached_for == self.fractal && *palette_id == self.palette.id =>
            {
                cached.clone()
            }
            _ => render(
                &self.fractal,
                &params,
                &quality,
                self.palette,
                self.width,
                self.height,
            ),
        };
        if !self.fractal.kind().is_escape_time() {
            self.cached_geometry = Some((self.fractal, self.palette.id, output.clone()));
        }
        self.last_output.insert(output)
    }

    /// The most recent escape-time framebuffer, for image capture. Encoding
    /// and download are the host's concern.
    pub fn capture(&self) -> Option<&PixelBuffer> {
        match &self.last_output {
            Some(RenderOutput::Pixels(buf)) => Some(buf),
            _ => None,
        }
    }

    pub fn statistics(&self) -> EngineStats {
        EngineStats {
            width: self.width,
            height: self.height,
            zoom: self.viewport.zoom(),
            settled: self.viewport.is_settled(),
            quality: self.quality(),
            fractal: self.fractal.statistics(),
        }
    }

    /// Switch the active fractal. Validation happens on the candidate state
    /// before anything is committed; on failure the previous fractal keeps
    /// rendering and the error names the one that failed.
    pub fn set_fractal(&mut self, kind: FractalKind) -> Result<(), EngineError> {
        let candidate = Fractal::default_for(kind);
        validate_renderer(&candidate, self.width, self.height)?;
        let config = config_for(kind);
        self.fractal = candidate;
        self.palette = default_palette(kind);
        self.viewport = Viewport::new(config.default_center, config.default_zoom, 0.0);
        self.invalidate();
        log::info!("switched fractal to {}", kind.display_name());
        Ok(())
    }

    /// Resize the output surface, invalidating cached renderer state.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        validate_surface(width, height)?;
        self.width = width;
        self.height = height;
        self.input.set_surface_size(width as f64, height as f64);
        self.invalidate();
        log::debug!("surface resized to {}x{}", width, height);
        Ok(())
    }

    // Parameter surface for the UI layer. Everything clamps; nothing errors.

    pub fn set_view_target(&mut self, cx: f64, cy: f64, zoom: f64, rotation: f64) {
        self.viewport.set_target(cx, cy, zoom, rotation);
    }

    pub fn set_max_iterations(&mut self, n: u32) {
        self.fractal.set_max_iterations(n);
    }

    pub fn set_escape_radius(&mut self, r: f64) {
        self.fractal.set_escape_radius(r);
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.fractal.set_smooth(smooth);
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.fractal.set_depth(depth);
    }

    pub fn set_julia_constant(&mut self, c: Complex) {
        self.fractal.set_julia_constant(c);
    }

    /// Select a palette by id; unknown ids and ids from the wrong family are
    /// ignored with a warning.
    pub fn set_palette(&mut self, id: &str) -> bool {
        let kind = self.fractal.kind();
        match palettes_for(kind).iter().find(|p| p.id == id) {
            Some(palette) => {
                self.palette = palette;
                true
            }
            None => {
                log::warn!("palette {:?} not available for {}", id, kind.display_name());
                false
            }
        }
    }

    /// Apply a named Julia constant preset. Only meaningful while the Julia
    /// fractal is active.
    pub fn apply_julia_preset(&mut self, name: &str) -> bool {
        let Some(preset) = julia_preset(name) else {
            log::warn!("unknown Julia preset {:?}", name);
            return false;
        };
        match &mut self.fractal {
            Fractal::Julia(p) => {
                p.c = preset.c;
                true
            }
            _ => false,
        }
    }

    /// Fly the camera to a named Mandelbrot point of interest.
    pub fn apply_point_of_interest(&mut self, name: &str) -> bool {
        let Some(poi) = point_of_interest(name) else {
            log::warn!("unknown point of interest {:?}", name);
            return false;
        };
        self.viewport
            .set_target(poi.center.re, poi.center.im, poi.zoom, 0.0);
        true
    }

    /// Export the complete render-affecting state.
    pub fn snapshot(&self) -> Snapshot {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Snapshot::new(
            self.fractal,
            self.viewport.clone(),
            self.palette.id.to_string(),
            timestamp,
        )
    }

    /// Restore a snapshot. Parameters are re-clamped on the way in (snapshots
    /// can be hand-edited), the viewport is rebuilt through its own
    /// validating constructor, and an unknown palette falls back to the
    /// fractal's default.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), EngineError> {
        let fractal = sanitize_fractal(snapshot.fractal);
        validate_renderer(&fractal, self.width, self.height)?;
        let kind = fractal.kind();

        let vp = &snapshot.viewport;
        let mut viewport = Viewport::new(vp.center(), vp.zoom(), vp.rotation());
        let target = vp.target_center();
        viewport.set_target(target.re, target.im, vp.target_zoom(), vp.target_rotation());

        self.fractal = fractal;
        self.viewport = viewport;
        self.palette = palettes_for(kind)
            .iter()
            .find(|p| p.id == snapshot.palette_id)
            .unwrap_or_else(|| {
                log::warn!(
                    "snapshot palette {:?} unavailable, using default",
                    snapshot.palette_id
                );
                default_palette(kind)
            });
        self.invalidate();
        Ok(())
    }

    fn quality(&self) -> RenderQuality {
        let iterations = self.fractal.max_iterations().unwrap_or(1);
        let radius = self.fractal.escape_radius().unwrap_or(2.0);
        quality_for_zoom(self.viewport.zoom(), iterations, radius)
    }

    fn invalidate(&mut self) {
        self.cached_geometry = None;
        self.last_output = None;
    }
}

fn default_palette(kind: FractalKind) -> &'static Palette {
    let config = config_for(kind);
    find_palette(config.default_palette_id).unwrap_or(&palettes_for(kind)[0])
}

fn validate_surface(width: u32, height: u32) -> Result<(), EngineError> {
    let valid = (1..=MAX_SURFACE_DIM).contains(&width)
        && (1..=MAX_SURFACE_DIM).contains(&height)
        && (width as u64) * (height as u64) <= MAX_SURFACE_PIXELS;
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidSurface { width, height })
    }
}

fn validate_renderer(fractal: &Fractal, width: u32, height: u32) -> Result<(), EngineError> {
    match fractal.statistics() {
        FractalStats::Geometry { primitives, .. } if primitives > MAX_GEOMETRY_PRIMITIVES => {
            Err(EngineError::RendererInit {
                fractal: fractal.kind().id(),
                reason: format!("{} primitives exceeds the renderer bound", primitives),
            })
        }
        _ => validate_surface(width, height).map_err(|_| EngineError::RendererInit {
            fractal: fractal.kind().id(),
            reason: format!("cannot allocate a {}x{} framebuffer", width, height),
        }),
    }
}

fn sanitize_fractal(mut fractal: Fractal) -> Fractal {
    if let Some(n) = fractal.max_iterations() {
        fractal.set_max_iterations(n);
    }
    if let Some(r) = fractal.escape_radius() {
        fractal.set_escape_radius(r);
    }
    if let Some(d) = fractal.depth() {
        fractal.set_depth(d);
    }
    if let Fractal::Julia(p) = &mut fractal {
        if !p.c.is_finite() {
            p.c = JuliaParams::default().c;
        }
    }
    fractal
}
