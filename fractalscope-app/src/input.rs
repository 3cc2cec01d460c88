//! Input controller: host events → viewport target mutations.
//!
//! The host (browser canvas, window shell, test harness) feeds raw pointer,
//! wheel, touch and key events through [`InputEvent`]; held keys are polled
//! once per frame rather than acted on per key event, which is what makes
//! continuous pan-while-held deterministic.

use crate::config::config_for;
use fractalscope_compute::FractalKind;
use fractalscope_core::Viewport;
use std::collections::HashSet;

/// Movement below this (in either axis, from the press origin) is a click,
/// not a drag. Click-to-zoom is deliberately disabled; do not reintroduce it
/// here.
const DRAG_THRESHOLD_PX: f64 = 1.0;

/// Wheel zoom factors per event; no velocity accumulation.
const WHEEL_ZOOM_IN: f64 = 1.25;
const WHEEL_ZOOM_OUT: f64 = 0.8;

/// Plane-space pan speed per tick for held keys, divided by zoom.
const KEY_PAN_SPEED: f64 = 0.02;

/// Rotation per tick for held Q/E, in radians.
const KEY_ROTATE_SPEED: f64 = 0.02;

/// Discrete zoom factors for Ctrl +/− (once per keypress).
const KEY_ZOOM_IN: f64 = 1.2;
const KEY_ZOOM_OUT: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    Plus,
    Minus,
}

/// Host-agnostic input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// `delta_y > 0` scrolls away (zoom out), `< 0` scrolls toward (zoom in).
    Wheel { delta_y: f64, x: f64, y: f64 },
    TouchStart { a: (f64, f64), b: Option<(f64, f64)> },
    TouchMove { a: (f64, f64), b: Option<(f64, f64)> },
    TouchEnd,
    KeyDown { key: Key, ctrl: bool },
    KeyUp { key: Key },
}

#[derive(Clone, Copy, Debug)]
struct DragState {
    origin: (f64, f64),
    last: (f64, f64),
    active: bool,
}

pub struct InputController {
    width: f64,
    height: f64,
    drag: Option<DragState>,
    pinch_distance: Option<f64>,
    held: HashSet<Key>,
}

impl InputController {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drag: None,
            pinch_distance: None,
            held: HashSet::new(),
        }
    }

    /// Keep the controller's surface size in sync with the display.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Apply one event. The fractal kind selects the pan-axis sign policy:
    /// escape-time fractals use natural grab semantics, the geometric
    /// fractals keep their historical inverted axes.
    pub fn handle_event(&mut self, event: &InputEvent, viewport: &mut Viewport, kind: FractalKind) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.drag = Some(DragState {
                    origin: (x, y),
                    last: (x, y),
                    active: false,
                });
            }
            InputEvent::PointerMove { x, y } => self.pointer_drag(x, y, viewport, kind),
            InputEvent::PointerUp => {
                // A press that never crossed the threshold is a click; clicks
                // do nothing by design.
                self.drag = None;
            }
            InputEvent::Wheel { delta_y, x, y } => {
                let factor = if delta_y < 0.0 {
                    WHEEL_ZOOM_IN
                } else {
                    WHEEL_ZOOM_OUT
                };
                viewport.zoom_at(factor, x, y, self.width, self.height);
            }
            InputEvent::TouchStart { a, b } => match b {
                Some(b) => {
                    self.drag = None;
                    self.pinch_distance = Some(distance(a, b));
                }
                None => {
                    self.pinch_distance = None;
                    self.drag = Some(DragState {
                        origin: a,
                        last: a,
                        active: false,
                    });
                }
            },
            InputEvent::TouchMove { a, b } => match (b, self.pinch_distance) {
                (Some(b), Some(last_distance)) => {
                    let current = distance(a, b);
                    if last_distance > 0.0 && current > 0.0 {
                        let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
                        viewport.zoom_at(
                            current / last_distance,
                            mid.0,
                            mid.1,
                            self.width,
                            self.height,
                        );
                    }
                    self.pinch_distance = Some(current);
                }
                (Some(b), None) => self.pinch_distance = Some(distance(a, b)),
                (None, _) => self.pointer_drag(a.0, a.1, viewport, kind),
            },
            InputEvent::TouchEnd => {
                self.drag = None;
                self.pinch_distance = None;
            }
            InputEvent::KeyDown { key, ctrl } => self.key_down(key, ctrl, viewport, kind),
            InputEvent::KeyUp { key } => {
                self.held.remove(&key);
            }
        }
    }

    /// Per-frame poll of the held-key set; call once per frame before the
    /// viewport animation step.
    pub fn poll_held_keys(&mut self, viewport: &mut Viewport) {
        if self.held.is_empty() {
            return;
        }
        let speed = KEY_PAN_SPEED / viewport.target_zoom();
        let mut d_re = 0.0;
        let mut d_im = 0.0;
        for key in &self.held {
            match key {
                Key::Left | Key::A => d_re -= speed,
                Key::Right | Key::D => d_re += speed,
                Key::Up | Key::W => d_im += speed,
                Key::Down | Key::S => d_im -= speed,
                Key::Q => viewport.rotate(KEY_ROTATE_SPEED),
                Key::E => viewport.rotate(-KEY_ROTATE_SPEED),
                _ => {}
            }
        }
        if d_re != 0.0 || d_im != 0.0 {
            viewport.pan_plane(d_re, d_im);
        }
    }

    fn pointer_drag(&mut self, x: f64, y: f64, viewport: &mut Viewport, kind: FractalKind) {
        let Some(mut drag) = self.drag else {
            return;
        };
        if !drag.active {
            let moved_x = (x - drag.origin.0).abs();
            let moved_y = (y - drag.origin.1).abs();
            if moved_x <= DRAG_THRESHOLD_PX && moved_y <= DRAG_THRESHOLD_PX {
                return;
            }
            drag.active = true;
        }
        let (mut dx, mut dy) = (x - drag.last.0, y - drag.last.1);
        if kind.inverted_pan() {
            dx = -dx;
            dy = -dy;
        }
        viewport.pan(dx, dy, self.width, self.height);
        drag.last = (x, y);
        self.drag = Some(drag);
    }

    fn key_down(&mut self, key: Key, ctrl: bool, viewport: &mut Viewport, kind: FractalKind) {
        match (key, ctrl) {
            (Key::R, true) => {
                let config = config_for(kind);
                viewport.set_target(
                    config.default_center.re,
                    config.default_center.im,
                    config.default_zoom,
                    0.0,
                );
            }
            (Key::Plus, true) => {
                viewport.zoom_at(
                    KEY_ZOOM_IN,
                    self.width / 2.0,
                    self.height / 2.0,
                    self.width,
                    self.height,
                );
            }
            (Key::Minus, true) => {
                viewport.zoom_at(
                    KEY_ZOOM_OUT,
                    self.width / 2.0,
                    self.height / 2.0,
                    self.width,
                    self.height,
                );
            }
            _ => {
                self.held.insert(key);
            }
        }
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalscope_core::Complex;

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    fn setup() -> (InputController, Viewport) {
        (InputController::new(W, H), Viewport::default())
    }

    fn drag(
        input: &mut InputController,
        viewport: &mut Viewport,
        kind: FractalKind,
        from: (f64, f64),
        to: (f64, f64),
    ) {
        input.handle_event(
            &InputEvent::PointerDown {
                x: from.0,
                y: from.1,
            },
            viewport,
            kind,
        );
        input.handle_event(&InputEvent::PointerMove { x: to.0, y: to.1 }, viewport, kind);
        input.handle_event(&InputEvent::PointerUp, viewport, kind);
    }

    #[test]
    fn sub_threshold_movement_is_a_click_not_a_drag() {
        let (mut input, mut vp) = setup();
        drag(
            &mut input,
            &mut vp,
            FractalKind::Mandelbrot,
            (100.0, 100.0),
            (100.5, 100.9),
        );
        assert_eq!(vp.target_center(), Complex::ZERO);
        assert_eq!(vp.target_zoom(), 1.0);
    }

    #[test]
    fn drag_pans_escape_time_fractals_naturally() {
        let (mut input, mut vp) = setup();
        drag(
            &mut input,
            &mut vp,
            FractalKind::Mandelbrot,
            (100.0, 100.0),
            (150.0, 100.0),
        );
        // Drag right → center moves left
        assert!(vp.target_center().re < 0.0);
    }

    #[test]
    fn drag_pans_geometry_fractals_inverted() {
        let (mut input, mut vp) = setup();
        drag(
            &mut input,
            &mut vp,
            FractalKind::Koch,
            (100.0, 100.0),
            (150.0, 100.0),
        );
        // Same gesture, opposite sign for the geometric family
        assert!(vp.target_center().re > 0.0);
    }

    #[test]
    fn wheel_zooms_in_and_out_by_fixed_factors() {
        let (mut input, mut vp) = setup();
        input.handle_event(
            &InputEvent::Wheel {
                delta_y: -1.0,
                x: 400.0,
                y: 300.0,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        assert!((vp.target_zoom() - 1.25).abs() < 1e-12);
        input.handle_event(
            &InputEvent::Wheel {
                delta_y: 1.0,
                x: 400.0,
                y: 300.0,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        assert!((vp.target_zoom() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wheel_does_not_accumulate_velocity() {
        // Two identical events apply the factor exactly twice, nothing more
        let (mut input, mut vp) = setup();
        for _ in 0..2 {
            input.handle_event(
                &InputEvent::Wheel {
                    delta_y: -1.0,
                    x: 10.0,
                    y: 10.0,
                },
                &mut vp,
                FractalKind::Mandelbrot,
            );
        }
        assert!((vp.target_zoom() - 1.25 * 1.25).abs() < 1e-12);
    }

    #[test]
    fn pinch_zooms_by_distance_ratio_at_midpoint() {
        let (mut input, mut vp) = setup();
        let kind = FractalKind::Julia;
        input.handle_event(
            &InputEvent::TouchStart {
                a: (300.0, 300.0),
                b: Some((500.0, 300.0)),
            },
            &mut vp,
            kind,
        );
        input.handle_event(
            &InputEvent::TouchMove {
                a: (200.0, 300.0),
                b: Some((600.0, 300.0)),
            },
            &mut vp,
            kind,
        );
        // Separation doubled: 200px → 400px
        assert!((vp.target_zoom() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_touch_drags_like_a_pointer() {
        let (mut input, mut vp) = setup();
        let kind = FractalKind::Mandelbrot;
        input.handle_event(
            &InputEvent::TouchStart {
                a: (100.0, 100.0),
                b: None,
            },
            &mut vp,
            kind,
        );
        input.handle_event(
            &InputEvent::TouchMove {
                a: (160.0, 100.0),
                b: None,
            },
            &mut vp,
            kind,
        );
        assert!(vp.target_center().re < 0.0);
    }

    #[test]
    fn held_keys_pan_each_frame_at_zoom_normalized_speed() {
        let (mut input, mut vp) = setup();
        input.handle_event(
            &InputEvent::KeyDown {
                key: Key::Right,
                ctrl: false,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        input.poll_held_keys(&mut vp);
        assert!((vp.target_center().re - 0.02).abs() < 1e-12);
        input.poll_held_keys(&mut vp);
        assert!((vp.target_center().re - 0.04).abs() < 1e-12);

        input.handle_event(
            &InputEvent::KeyUp { key: Key::Right },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        input.poll_held_keys(&mut vp);
        assert!((vp.target_center().re - 0.04).abs() < 1e-12);
    }

    #[test]
    fn key_pan_speed_scales_with_zoom() {
        let mut input = InputController::new(W, H);
        let mut vp = Viewport::new(Complex::ZERO, 100.0, 0.0);
        input.handle_event(
            &InputEvent::KeyDown {
                key: Key::D,
                ctrl: false,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        input.poll_held_keys(&mut vp);
        assert!((vp.target_center().re - 0.02 / 100.0).abs() < 1e-15);
    }

    #[test]
    fn q_and_e_rotate_continuously() {
        let (mut input, mut vp) = setup();
        input.handle_event(
            &InputEvent::KeyDown {
                key: Key::Q,
                ctrl: false,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        input.poll_held_keys(&mut vp);
        input.poll_held_keys(&mut vp);
        assert!((vp.target_rotation() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn ctrl_r_resets_to_the_fractal_default() {
        let (mut input, mut vp) = setup();
        vp.set_target(2.0, 2.0, 500.0, 1.0);
        input.handle_event(
            &InputEvent::KeyDown {
                key: Key::R,
                ctrl: true,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        assert_eq!(vp.target_center(), Complex::new(-0.5, 0.0));
        assert_eq!(vp.target_zoom(), 1.0);
        assert_eq!(vp.target_rotation(), 0.0);
    }

    #[test]
    fn ctrl_plus_minus_zoom_once_per_keypress() {
        let (mut input, mut vp) = setup();
        input.handle_event(
            &InputEvent::KeyDown {
                key: Key::Plus,
                ctrl: true,
            },
            &mut vp,
            FractalKind::Mandelbrot,
        );
        assert!((vp.target_zoom() - 1.2).abs() < 1e-12);
        // Polling must not repeat a discrete zoom
        input.poll_held_keys(&mut vp);
        assert!((vp.target_zoom() - 1.2).abs() < 1e-12);
    }
}
