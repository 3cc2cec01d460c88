//! One-shot frame renderer.
//!
//! Drives the engine to a requested view, renders a single settled frame and
//! encodes it as a PNG. This binary is the display-surface collaborator for
//! headless use; the interactive hosts feed the same engine from their own
//! event loops.

use clap::Parser;
use fractalscope_app::{
    config_for, export_snapshot, project_vertex, Engine, RenderOutput, Snapshot,
};
use fractalscope_compute::{Fractal, FractalKind};
use fractalscope_core::{Complex, Viewport};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fractalscope", about = "Render one fractal frame to a PNG")]
struct Args {
    /// Fractal id: mandelbrot, julia, koch, sierpinski, tree
    #[arg(long, default_value = "mandelbrot")]
    fractal: String,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Center real part (defaults to the fractal's home view)
    #[arg(long)]
    center_x: Option<f64>,

    /// Center imaginary part
    #[arg(long)]
    center_y: Option<f64>,

    #[arg(long)]
    zoom: Option<f64>,

    /// View rotation in radians
    #[arg(long, default_value_t = 0.0)]
    rotation: f64,

    #[arg(long, default_value_t = 256)]
    iterations: u32,

    /// Palette id (defaults to the fractal's default palette)
    #[arg(long)]
    palette: Option<String>,

    /// Recursion depth for the geometry fractals
    #[arg(long)]
    depth: Option<u32>,

    /// Print the session snapshot JSON to stdout after rendering
    #[arg(long)]
    print_snapshot: bool,

    #[arg(long, default_value = "fractal.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let Some(kind) = FractalKind::from_id(&args.fractal) else {
        return Err(format!("unknown fractal {:?}", args.fractal).into());
    };
    let config = config_for(kind);

    let mut fractal = Fractal::default_for(kind);
    fractal.set_max_iterations(args.iterations);
    if let Some(depth) = args.depth {
        fractal.set_depth(depth);
    }

    let center = Complex::new(
        args.center_x.unwrap_or(config.default_center.re),
        args.center_y.unwrap_or(config.default_center.im),
    );
    let viewport = Viewport::new(center, args.zoom.unwrap_or(config.default_zoom), args.rotation);
    let palette_id = args
        .palette
        .unwrap_or_else(|| config.default_palette_id.to_string());

    let mut engine = Engine::new(args.width, args.height)?;
    engine.restore(&Snapshot::new(fractal, viewport, palette_id, 0))?;

    let frame = engine.render_frame().clone();
    let pixels = match frame {
        RenderOutput::Pixels(buf) => buf.data,
        RenderOutput::Segments(segments) => {
            let mut canvas = blank(args.width, args.height);
            let params = engine
                .viewport()
                .render_params(args.width as f64, args.height as f64);
            for cs in &segments {
                draw_segment(
                    &mut canvas,
                    args.width,
                    args.height,
                    project_vertex(cs.segment.a, args.width, args.height, &params),
                    project_vertex(cs.segment.b, args.width, args.height, &params),
                    cs.color,
                );
            }
            canvas
        }
        RenderOutput::Triangles(triangles) => {
            let mut canvas = blank(args.width, args.height);
            let params = engine
                .viewport()
                .render_params(args.width as f64, args.height as f64);
            for ct in &triangles {
                let a = project_vertex(ct.triangle.a, args.width, args.height, &params);
                let b = project_vertex(ct.triangle.b, args.width, args.height, &params);
                let c = project_vertex(ct.triangle.c, args.width, args.height, &params);
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    draw_segment(&mut canvas, args.width, args.height, from, to, ct.color);
                }
            }
            canvas
        }
    };

    let image = image::RgbaImage::from_raw(args.width, args.height, pixels)
        .ok_or("framebuffer size mismatch")?;
    image.save(&args.output)?;
    log::info!("wrote {}", args.output.display());

    if args.print_snapshot {
        println!("{}", export_snapshot(&engine.snapshot())?);
    }
    Ok(())
}

fn blank(width: u32, height: u32) -> Vec<u8> {
    let mut canvas = vec![0u8; (width as usize) * (height as usize) * 4];
    for px in canvas.chunks_exact_mut(4) {
        px[3] = 255;
    }
    canvas
}

/// Plot a line by sampling along it; plenty for a demo export.
fn draw_segment(
    canvas: &mut [u8],
    width: u32,
    height: u32,
    from: (f64, f64),
    to: (f64, f64),
    color: [u8; 4],
) {
    let steps = ((to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
            continue;
        }
        let idx = ((y as u32 * width + x as u32) * 4) as usize;
        canvas[idx..idx + 4].copy_from_slice(&color);
    }
}
