//! Parametric orbit ellipse and the comet's motion along it.

use std::f64::consts::TAU;

use crate::geometry::Point;
use crate::viewport::Viewport;

/// Progress offset used to sample the second point for the velocity estimate.
pub const VELOCITY_LOOKAHEAD: f64 = 0.002;

/// Length of the comet tail in logical units.
pub const COMET_TAIL_LENGTH: f32 = 26.0;

/// Every n-th sector gets a tick mark on the orbit path.
pub const TICK_STRIDE: u32 = 3;

/// Amplitude of the angular wobble applied to the vertical axis.
const WOBBLE: f64 = 0.02;

/// Smallest velocity magnitude used when normalizing the tail direction.
const MIN_VELOCITY: f32 = 0.001;

/// Orbit ellipse in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f32,
    pub ry: f32,
}

impl Ellipse {
    /// Orbit sized for the given viewport, proportional to its shorter side.
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let side = viewport.min_side();
        Self {
            center: Point::new(viewport.width * 0.52, viewport.height * 0.52),
            rx: side * 0.28,
            ry: side * 0.18,
        }
    }
}

/// Position on the orbit at the given progress.
pub fn orbit_point(progress: f64, ellipse: &Ellipse) -> Point {
    let angle = progress * TAU;
    let wobble = angle.sin() * WOBBLE;
    Point::new(
        ellipse.center.x + (angle.cos() as f32) * ellipse.rx,
        ellipse.center.y + ((angle + wobble).sin() as f32) * ellipse.ry,
    )
}

/// Instantaneous velocity, taken as the delta to a slightly later point.
pub fn comet_velocity(progress: f64, ellipse: &Ellipse) -> Point {
    let ahead = (progress + VELOCITY_LOOKAHEAD).rem_euclid(1.0);
    orbit_point(ahead, ellipse) - orbit_point(progress, ellipse)
}

/// Tail offset from the comet head, pointing opposite the velocity.
pub fn tail_vector(velocity: Point, length: f32) -> Point {
    let magnitude = velocity.length().max(MIN_VELOCITY);
    velocity * (-length / magnitude)
}

/// Angles (radians) of the tick marks for `sectors` divisions.
pub fn tick_angles(sectors: u32) -> impl Iterator<Item = f32> {
    let sectors = sectors.max(1);
    (0..sectors)
        .step_by(TICK_STRIDE as usize)
        .map(move |i| (i as f64 / sectors as f64 * TAU) as f32)
}
