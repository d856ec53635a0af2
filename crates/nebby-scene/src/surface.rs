//! Immediate-mode 2D drawing surface.

use nebby_core::{Ellipse, Point, Viewport};

use crate::color::Rgba;

/// Axis-aligned rectangle in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: viewport.width,
            height: viewport.height,
        }
    }
}

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

pub const fn stop(offset: f32, color: Rgba) -> ColorStop {
    ColorStop { offset, color }
}

/// How a shape is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Gradient along the segment `start`..`end`.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
    /// Gradient from `center` out to `radius`.
    Radial {
        center: Point,
        radius: f32,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Color of the paint at a logical position.
    pub fn color_at(&self, p: Point) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear { start, end, stops } => {
                let axis = *end - *start;
                let len_sq = axis.dot(axis);
                let t = if len_sq > 0.0 {
                    (p - *start).dot(axis) / len_sq
                } else {
                    0.0
                };
                sample(stops, t)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius > 0.0 {
                    p.distance(*center) / radius
                } else {
                    1.0
                };
                sample(stops, t)
            }
        }
    }
}

/// Interpolate a color from stops sorted by offset.
fn sample(stops: &[ColorStop], t: f32) -> Rgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::BLACK.with_alpha(0.0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= 0.0 {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// End cap style for strokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Stroke style.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            cap: LineCap::Butt,
        }
    }
}

/// Soft glow drawn beneath filled circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur extent in logical units.
    pub blur: f32,
}

/// Drawing primitives the scene painter needs. Coordinates are logical.
pub trait Surface {
    /// Logical size and pixel ratio of the surface.
    fn viewport(&self) -> Viewport;

    /// Reset every pixel to transparent black.
    fn clear(&mut self);

    /// Multiply subsequent drawing by `alpha`.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Glow applied to subsequent filled circles, `None` to disable.
    fn set_shadow(&mut self, shadow: Option<Shadow>);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    /// Outline an axis-aligned ellipse.
    fn stroke_ellipse(&mut self, ellipse: &Ellipse, stroke: &Stroke);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);
}
