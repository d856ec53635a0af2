//! Drifting starfield (stateful).

use rand::Rng;

use crate::viewport::Viewport;

/// Stars spawned when no count is configured.
pub const DEFAULT_STAR_COUNT: usize = 180;

/// Distance beyond the viewport edge at which a star wraps around.
pub const STAR_MARGIN: f32 = 20.0;

/// State for a single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position in logical units.
    pub x: f32,
    /// Vertical position in logical units.
    pub y: f32,
    /// Radius in logical units.
    pub radius: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Horizontal drift per frame.
    pub vx: f32,
    /// Vertical drift per frame.
    pub vy: f32,
}

impl Star {
    /// Integrate velocity for one frame and wrap around the margin.
    pub fn step(&mut self, viewport: &Viewport) {
        self.x += self.vx;
        self.y += self.vy;

        let right = viewport.width + STAR_MARGIN;
        let bottom = viewport.height + STAR_MARGIN;

        if self.x < -STAR_MARGIN {
            self.x = right;
        }
        if self.x > right {
            self.x = -STAR_MARGIN;
        }
        if self.y < -STAR_MARGIN {
            self.y = bottom;
        }
        if self.y > bottom {
            self.y = -STAR_MARGIN;
        }
    }

    /// Whether the star lies inside the wrap bounds for `viewport`.
    pub fn in_bounds(&self, viewport: &Viewport) -> bool {
        (-STAR_MARGIN..=viewport.width + STAR_MARGIN).contains(&self.x)
            && (-STAR_MARGIN..=viewport.height + STAR_MARGIN).contains(&self.y)
    }
}

/// Scatter `count` stars uniformly across the viewport.
pub fn spawn_stars<R: Rng + ?Sized>(count: usize, viewport: &Viewport, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: rng.gen_range(0.0..1.0f32) * viewport.width,
            y: rng.gen_range(0.0..1.0f32) * viewport.height,
            radius: rng.gen_range(0.2..1.8f32),
            alpha: rng.gen_range(0.2..1.0f32),
            vx: rng.gen_range(-0.03..0.03f32),
            vy: rng.gen_range(-0.03..0.03f32),
        })
        .collect()
}
