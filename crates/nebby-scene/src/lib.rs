//! Scene painting and terminal output for the nebby orbit scene.
//!
//! The painter draws a [`nebby_core::Snapshot`] onto any [`Surface`]. The
//! terminal backend is a [`PixelCanvas`] flushed as half-block cells, with
//! the HUD overlay rendered on top through ratatui widgets.

mod canvas;
mod color;
mod hud;
mod painter;
mod state;
mod surface;

#[cfg(test)]
mod recorder;

pub use canvas::PixelCanvas;
pub use color::{Rgba, pixel_to_color};
pub use hud::{hud_area, render_hud};
pub use painter::{draw_background, draw_comet, draw_orbit, render_scene};
pub use state::{SceneState, viewport_for_area};
pub use surface::{ColorStop, LineCap, Paint, Rect, Shadow, Stroke, Surface, stop};
