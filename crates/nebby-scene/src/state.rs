//! Scene render state management.

use nebby_core::{Snapshot, Viewport};
use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::canvas::PixelCanvas;
use crate::hud::render_hud;
use crate::painter::render_scene;
use crate::surface::Surface;

/// Logical viewport for a terminal area: one pixel per column, two per row.
pub fn viewport_for_area(width: u16, height: u16, pixel_ratio: f32) -> Viewport {
    Viewport::from_device(width as u32, height as u32 * 2, pixel_ratio)
}

/// Owns the pixel canvas between frames.
#[derive(Debug)]
pub struct SceneState {
    /// Backing canvas, reallocated when the viewport changes.
    canvas: PixelCanvas,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    /// Create a scene with an empty canvas. It is sized on first render.
    pub fn new() -> Self {
        Self {
            canvas: PixelCanvas::new(Viewport::new(0.0, 0.0, 1.0)),
        }
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Paint the snapshot and flush it to the frame, then the HUD on top.
    pub fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot<'_>, show_hud: bool) {
        if snapshot.viewport != self.canvas.viewport() {
            tracing::debug!(
                width = snapshot.viewport.width,
                height = snapshot.viewport.height,
                "reallocating canvas"
            );
            self.canvas.resize(snapshot.viewport);
        }

        if !snapshot.viewport.is_empty() {
            render_scene(&mut self.canvas, snapshot);
            let area = frame.area();
            let (_, device_height) = self.canvas.device_size();
            let rows = (device_height.div_ceil(2) as u16).min(area.height);
            let target = Rect { height: rows, ..area };
            frame.render_widget(Paragraph::new(self.canvas.to_lines()), target);
        }

        if show_hud {
            render_hud(frame, &snapshot.readout);
        }
    }
}
