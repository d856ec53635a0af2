//! Simulation state and the per-frame advance step.

use rand::Rng;

use crate::cycle::{Cycle, HudReadout};
use crate::geometry::Point;
use crate::orbit::{Ellipse, comet_velocity, orbit_point};
use crate::star::{Star, spawn_stars};
use crate::viewport::Viewport;

/// Everything the render loop owns between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    /// Epoch cycle parameters.
    pub cycle: Cycle,
    /// Current viewport.
    pub viewport: Viewport,
    /// Drifting background stars.
    pub stars: Vec<Star>,
    /// Clock reading of the last advance, in seconds.
    pub now: f64,
    /// Number of advances applied so far.
    pub frame: u64,
}

impl Default for SimState {
    /// An empty sky on a zero-sized viewport.
    fn default() -> Self {
        Self {
            cycle: Cycle::default(),
            viewport: Viewport::new(0.0, 0.0, 1.0),
            stars: Vec::new(),
            now: 0.0,
            frame: 0,
        }
    }
}

impl SimState {
    /// Create a state with a freshly scattered starfield.
    pub fn new<R: Rng + ?Sized>(
        cycle: Cycle,
        viewport: Viewport,
        star_count: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            cycle,
            viewport,
            stars: spawn_stars(star_count, &viewport, rng),
            now: 0.0,
            frame: 0,
        }
    }

    /// Replace the viewport. Stars keep their positions and re-wrap on the
    /// next advance.
    pub fn resized(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Derive the read-only values a frame is drawn from.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let progress = self.cycle.progress(self.now);
        let orbit = Ellipse::for_viewport(&self.viewport);
        Snapshot {
            progress,
            readout: self.cycle.readout(self.now),
            orbit,
            comet: orbit_point(progress, &orbit),
            velocity: comet_velocity(progress, &orbit),
            stars: &self.stars,
            viewport: self.viewport,
        }
    }
}

/// Advance the simulation to clock time `now`.
///
/// The orbit is a function of `now` alone, so skipped frames leave no drift;
/// only the starfield integrates per call.
pub fn advance(mut state: SimState, now: f64) -> SimState {
    let viewport = state.viewport;
    for star in &mut state.stars {
        star.step(&viewport);
    }
    state.now = now;
    state.frame += 1;
    state
}

/// Read-only view of one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Fraction of the current epoch, in `[0, 1)`.
    pub progress: f64,
    /// Values for the HUD overlay.
    pub readout: HudReadout,
    /// Orbit ellipse for the current viewport.
    pub orbit: Ellipse,
    /// Comet head position.
    pub comet: Point,
    /// Comet velocity per progress lookahead.
    pub velocity: Point,
    /// Stars, already advanced for this frame.
    pub stars: &'a [Star],
    /// Viewport the frame is drawn for.
    pub viewport: Viewport,
}

impl Snapshot<'_> {
    pub fn sectors(&self) -> u32 {
        self.readout.sectors
    }
}
