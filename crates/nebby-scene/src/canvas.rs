//! Software rasterizer backing the scene on a terminal.
//!
//! Pixels live at device resolution (`logical * pixel_ratio`). Shapes are
//! anti-aliased by estimating per-pixel coverage from a distance function,
//! and composited source-over onto an opaque RGB buffer.

use std::f32::consts::PI;
use std::ops::Range;

use nebby_core::{Ellipse, Point, Viewport};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::color::{Rgba, pixel_to_color};
use crate::surface::{LineCap, Paint, Rect, Shadow, Stroke, Surface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// RGB pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    viewport: Viewport,
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
    global_alpha: f32,
    shadow: Option<Shadow>,
}

impl PixelCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let (width, height) = viewport.device_size();
        Self {
            viewport,
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
            global_alpha: 1.0,
            shadow: None,
        }
    }

    /// Reallocate for a new viewport. Contents are cleared.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    /// Device size in pixels.
    pub fn device_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel at device coordinates, if inside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Flush to terminal lines, two pixel rows per line.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height.div_ceil(2))
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let top = self.pixel(x, row * 2).unwrap_or_default();
                        let bottom = self.pixel(x, row * 2 + 1).unwrap_or_default();
                        Span::styled(
                            HALF_BLOCK,
                            Style::new()
                                .fg(pixel_to_color(top))
                                .bg(pixel_to_color(bottom)),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn scale(&self) -> f32 {
        self.viewport.pixel_ratio
    }

    /// Device pixel ranges covering the logical box `min..max`, clipped.
    fn clip(&self, min: Point, max: Point) -> Option<(Range<usize>, Range<usize>)> {
        let s = self.scale();
        let x0 = (min.x * s).floor().max(0.0);
        let y0 = (min.y * s).floor().max(0.0);
        let x1 = (max.x * s).ceil().min(self.width as f32);
        let y1 = (max.y * s).ceil().min(self.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as usize..x1 as usize, y0 as usize..y1 as usize))
    }

    /// Visit every pixel in the clipped box with its device-space center.
    /// `coverage` maps a device-space center to `[0, 1]`.
    fn fill_with<F>(&mut self, min: Point, max: Point, paint: &Paint, coverage: F)
    where
        F: Fn(Point) -> f32,
    {
        let Some((xs, ys)) = self.clip(min, max) else {
            return;
        };
        let s = self.scale();
        for y in ys {
            for x in xs.clone() {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let cov = coverage(center);
                if cov <= 0.0 {
                    continue;
                }
                let color = paint.color_at(center * (1.0 / s));
                self.blend(x, y, color, cov);
            }
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba, coverage: f32) {
        let a = (color.a * coverage * self.global_alpha).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = &mut self.pixels[y * self.width + x];
        px[0] = px[0] * (1.0 - a) + color.r * a;
        px[1] = px[1] * (1.0 - a) + color.g * a;
        px[2] = px[2] * (1.0 - a) + color.b * a;
    }

    fn draw_glow(&mut self, center: Point, radius: f32, shadow: Shadow) {
        let s = self.scale();
        let c = center * s;
        let r = radius * s;
        let sigma = (shadow.blur * s / 2.0).max(0.01);
        let reach = radius + shadow.blur * 1.5;
        let extent = Point::new(reach, reach);
        let paint = Paint::Solid(shadow.color);
        self.fill_with(center - extent, center + extent, &paint, |p| {
            let outside = (p.distance(c) - r).max(0.0);
            (-(outside * outside) / (2.0 * sigma * sigma)).exp()
        });
    }
}

/// Coverage of a pixel by a disc of `radius` whose center is `distance` away.
/// Sub-pixel discs are dimmed by their area instead of vanishing.
fn disc_coverage(distance: f32, radius: f32) -> f32 {
    if radius >= 0.5 {
        (radius - distance + 0.5).clamp(0.0, 1.0)
    } else {
        (PI * radius * radius).min(1.0) * (1.0 - distance).clamp(0.0, 1.0)
    }
}

/// Coverage of a pixel by a band of `half_width` around a curve `distance` away.
fn band_coverage(distance: f32, half_width: f32) -> f32 {
    let distance = distance.abs();
    if half_width >= 0.5 {
        (half_width - distance + 0.5).clamp(0.0, 1.0)
    } else {
        (2.0 * half_width) * (1.0 - distance).clamp(0.0, 1.0)
    }
}

/// Approximate signed distance from `p` to an origin-centered ellipse.
fn ellipse_distance(p: Point, rx: f32, ry: f32) -> f32 {
    let k = ((p.x / rx).powi(2) + (p.y / ry).powi(2)).sqrt();
    if k <= f32::EPSILON {
        return -rx.min(ry);
    }
    let gradient = Point::new(p.x / (rx * rx * k), p.y / (ry * ry * k));
    (k - 1.0) / gradient.length()
}

impl Surface for PixelCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 3]);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let s = self.scale();
        let (x0, y0) = (rect.x * s, rect.y * s);
        let (x1, y1) = ((rect.x + rect.width) * s, (rect.y + rect.height) * s);
        let min = Point::new(rect.x, rect.y);
        let max = Point::new(rect.x + rect.width, rect.y + rect.height);
        self.fill_with(min, max, paint, |p| {
            let cx = ((p.x + 0.5).min(x1) - (p.x - 0.5).max(x0)).clamp(0.0, 1.0);
            let cy = ((p.y + 0.5).min(y1) - (p.y - 0.5).max(y0)).clamp(0.0, 1.0);
            cx * cy
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        if let Some(shadow) = self.shadow {
            self.draw_glow(center, radius, shadow);
        }
        let s = self.scale();
        let c = center * s;
        let r = radius * s;
        let pad = 1.0 / s;
        let extent = Point::new(radius + pad, radius + pad);
        self.fill_with(center - extent, center + extent, paint, |p| {
            disc_coverage(p.distance(c), r)
        });
    }

    fn stroke_ellipse(&mut self, ellipse: &Ellipse, stroke: &Stroke) {
        if ellipse.rx <= 0.0 || ellipse.ry <= 0.0 || stroke.width <= 0.0 {
            return;
        }
        let s = self.scale();
        let c = ellipse.center * s;
        let (rx, ry) = (ellipse.rx * s, ellipse.ry * s);
        let half = stroke.width * s / 2.0;
        let pad = stroke.width / 2.0 + 1.0 / s;
        let extent = Point::new(ellipse.rx + pad, ellipse.ry + pad);
        self.fill_with(
            ellipse.center - extent,
            ellipse.center + extent,
            &stroke.paint,
            |p| band_coverage(ellipse_distance(p - c, rx, ry), half),
        );
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        if stroke.width <= 0.0 {
            return;
        }
        let s = self.scale();
        let (a, b) = (from * s, to * s);
        let axis = b - a;
        let len_sq = axis.dot(axis);
        let half = stroke.width * s / 2.0;
        let cap = stroke.cap;
        let pad = stroke.width / 2.0 + 1.0 / s;
        let min = Point::new(from.x.min(to.x) - pad, from.y.min(to.y) - pad);
        let max = Point::new(from.x.max(to.x) + pad, from.y.max(to.y) + pad);
        self.fill_with(min, max, &stroke.paint, |p| {
            let t = if len_sq > 0.0 {
                (p - a).dot(axis) / len_sq
            } else {
                0.0
            };
            if cap == LineCap::Butt && !(0.0..=1.0).contains(&t) {
                return 0.0;
            }
            let nearest = a + axis * t.clamp(0.0, 1.0);
            band_coverage(p.distance(nearest), half)
        });
    }
}
