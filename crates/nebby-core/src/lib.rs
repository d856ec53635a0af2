//! Simulation core for the nebby orbit scene.
//!
//! Everything in this crate is free of drawing and terminal concerns: the
//! epoch cycle arithmetic, the orbit geometry, the drifting starfield, the
//! [`SimState`] that the frame loop advances, and the [`FrameScheduler`]
//! that drives it from an injectable [`Clock`].

mod cycle;
mod geometry;
mod orbit;
mod scheduler;
mod sim;
mod star;
mod viewport;

#[cfg(test)]
mod proptest_cycle;

pub use cycle::{Cycle, DEFAULT_EPOCH_SECONDS, DEFAULT_SECTORS, HudReadout};
pub use geometry::Point;
pub use orbit::{
    COMET_TAIL_LENGTH, Ellipse, TICK_STRIDE, VELOCITY_LOOKAHEAD, comet_velocity, orbit_point,
    tail_vector, tick_angles,
};
pub use scheduler::{
    CancellationToken, Clock, FrameScheduler, ManualClock, SchedulerReport, SystemClock,
};
pub use sim::{SimState, Snapshot, advance};
pub use star::{DEFAULT_STAR_COUNT, STAR_MARGIN, Star, spawn_stars};
pub use viewport::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO, Viewport};
