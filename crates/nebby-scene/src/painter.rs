//! Paints one frame of the orbit scene onto a [`Surface`].
//!
//! The painter holds no state: everything comes from the [`Snapshot`].

use nebby_core::{COMET_TAIL_LENGTH, Ellipse, Point, Snapshot, Star, tail_vector, tick_angles};

use crate::color::Rgba;
use crate::surface::{LineCap, Paint, Rect, Shadow, Stroke, Surface, stop};

/// Opacity of the two nebula haze blobs.
const HAZE_ALPHA: f32 = 0.12;

/// Radius of the comet head in logical units.
const COMET_RADIUS: f32 = 4.2;

const STAR_COLOR: Rgba = Rgba::rgb(220, 210, 255);
const HAZE_VIOLET: Rgba = Rgba::rgb(145, 70, 255);
const HAZE_BLUE: Rgba = Rgba::rgb(60, 160, 255);
const ORBIT_GLOW: Rgba = Rgba::rgba(180, 120, 255, 0.18);
const ORBIT_LINE: Rgba = Rgba::rgba(220, 210, 255, 0.35);
const ORBIT_TICK: Rgba = Rgba::rgba(180, 120, 255, 0.35);
const TAIL_HEAD: Rgba = Rgba::rgba(255, 180, 255, 0.85);
const TAIL_END: Rgba = Rgba::rgba(120, 160, 255, 0.0);
const COMET_CORE: Rgba = Rgba::rgba(245, 235, 255, 0.95);
const COMET_GLOW: Rgba = Rgba::rgba(170, 120, 255, 0.9);

/// Paint the whole scene for one frame.
pub fn render_scene<S: Surface + ?Sized>(surface: &mut S, snapshot: &Snapshot<'_>) {
    surface.clear();
    draw_background(surface, snapshot);
    draw_orbit(surface, &snapshot.orbit, snapshot.sectors());
    draw_comet(surface, snapshot.comet, snapshot.velocity);
}

/// Radial sky gradient, the starfield, then the nebula haze.
pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, snapshot: &Snapshot<'_>) {
    let viewport = snapshot.viewport;
    let (w, h) = (viewport.width, viewport.height);

    let sky = Paint::Radial {
        center: Point::new(w * 0.55, h * 0.45),
        radius: viewport.max_side(),
        stops: vec![
            stop(0.0, Rgba::rgb(32, 12, 55)),
            stop(0.45, Rgba::rgb(10, 8, 24)),
            stop(1.0, Rgba::BLACK),
        ],
    };
    surface.fill_rect(Rect::from_viewport(&viewport), &sky);

    draw_stars(surface, snapshot.stars);

    let side = viewport.min_side();
    surface.set_global_alpha(HAZE_ALPHA);
    surface.fill_circle(
        Point::new(w * 0.25, h * 0.35),
        side * 0.28,
        &Paint::Solid(HAZE_VIOLET),
    );
    surface.fill_circle(
        Point::new(w * 0.72, h * 0.62),
        side * 0.22,
        &Paint::Solid(HAZE_BLUE),
    );
    surface.set_global_alpha(1.0);
}

fn draw_stars<S: Surface + ?Sized>(surface: &mut S, stars: &[Star]) {
    for star in stars {
        surface.fill_circle(
            Point::new(star.x, star.y),
            star.radius,
            &Paint::Solid(STAR_COLOR.with_alpha(star.alpha)),
        );
    }
}

/// Orbit outline with a soft glow and sector ticks.
pub fn draw_orbit<S: Surface + ?Sized>(surface: &mut S, orbit: &Ellipse, sectors: u32) {
    surface.stroke_ellipse(orbit, &Stroke::solid(ORBIT_GLOW, 10.0));
    surface.stroke_ellipse(orbit, &Stroke::solid(ORBIT_LINE, 2.0));

    let tick = Stroke::solid(ORBIT_TICK, 1.0);
    for angle in tick_angles(sectors) {
        let (sin, cos) = angle.sin_cos();
        let inner = Point::new(cos * (orbit.rx - 2.0), sin * (orbit.ry - 2.0));
        let outer = Point::new(cos * (orbit.rx + 6.0), sin * (orbit.ry + 6.0));
        surface.stroke_line(orbit.center + inner, orbit.center + outer, &tick);
    }
}

/// Comet head with a glow and a tail trailing opposite its velocity.
pub fn draw_comet<S: Surface + ?Sized>(surface: &mut S, head: Point, velocity: Point) {
    let end = head + tail_vector(velocity, COMET_TAIL_LENGTH);
    let tail = Stroke {
        paint: Paint::Linear {
            start: head,
            end,
            stops: vec![stop(0.0, TAIL_HEAD), stop(1.0, TAIL_END)],
        },
        width: 6.0,
        cap: LineCap::Round,
    };
    surface.stroke_line(head, end, &tail);

    surface.set_shadow(Some(Shadow {
        color: COMET_GLOW,
        blur: 18.0,
    }));
    surface.fill_circle(head, COMET_RADIUS, &Paint::Solid(COMET_CORE));
    surface.set_shadow(None);
}
